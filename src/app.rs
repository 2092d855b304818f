//! App struct: configuration and the command loop.
//!
//! [`App`] feeds commands from an input stream into a [`Session`], one at a
//! time, until the input ends or the dialog is closed.

use std::io::{self, Read};

use thiserror::Error;
use tokio::io::AsyncRead;

use crate::command::{spawn_reader, CommandReader};
use crate::engine::{Outcome, Session};
use crate::render::{Renderer, Reporter};

/// Default free-text budget of one command, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

// ---------------------------------------------------------------------------
// DialogConfig
// ---------------------------------------------------------------------------

/// Configuration for a dialog session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    /// Window title.
    pub title: String,
    /// Text shown until the first command arrives.
    pub about: Option<String>,
    pub resizable: bool,
    /// Start with the dialog hidden until `show`.
    pub hidden: bool,
    /// Free-text budget of one command, in bytes.
    pub buffer_size: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: "dialogbox".to_owned(),
            about: None,
            resizable: false,
            hidden: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl DialogConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `DIALOGBOX_TITLE`, `DIALOGBOX_ABOUT`, `DIALOGBOX_HIDDEN` and
    /// `DIALOGBOX_RESIZABLE` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`DialogConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(title) = lookup("DIALOGBOX_TITLE").filter(|title| !title.is_empty()) {
            config.title = title;
        }
        config.about = lookup("DIALOGBOX_ABOUT").filter(|about| !about.is_empty());
        config.hidden = lookup("DIALOGBOX_HIDDEN").is_some_and(|value| truthy(&value));
        config.resizable = lookup("DIALOGBOX_RESIZABLE").is_some_and(|value| truthy(&value));
        config
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the start-up text (builder).
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the free-text budget (builder). Zero is raised to one byte.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }
}

fn truthy(value: &str) -> bool {
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no"))
}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read commands: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// A session plus the loop feeding it.
#[derive(Debug)]
pub struct App<R, P> {
    session: Session<R, P>,
}

impl<R: Renderer, P: Reporter> App<R, P> {
    pub fn new(renderer: R, reporter: P, config: DialogConfig) -> Self {
        Self {
            session: Session::with_config(renderer, reporter, config),
        }
    }

    pub fn session(&self) -> &Session<R, P> {
        &self.session
    }

    /// Mutable access, e.g. to forward user interactions.
    pub fn session_mut(&mut self) -> &mut Session<R, P> {
        &mut self.session
    }

    pub fn into_session(self) -> Session<R, P> {
        self.session
    }

    /// Apply commands read from `input` until it ends or the dialog closes.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run<I>(&mut self, input: I) -> Result<Option<Outcome>, AppError>
    where
        I: AsyncRead + Unpin + Send + 'static,
    {
        let mut feed = spawn_reader(input, self.session.config().buffer_size);
        while let Some(handoff) = feed.recv().await {
            self.session.apply(handoff.command());
            handoff.complete();
            if let Some(outcome) = self.session.outcome() {
                feed.abort();
                return Ok(Some(outcome));
            }
        }
        feed.finish().await?;
        Ok(self.session.outcome())
    }

    /// Blocking variant of [`App::run`].
    pub fn run_blocking(&mut self, input: impl Read) -> Result<Option<Outcome>, AppError> {
        for command in CommandReader::new(input, self.session.config().buffer_size) {
            self.session.apply(&command?);
            if self.session.outcome().is_some() {
                break;
            }
        }
        Ok(self.session.outcome())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{HeadlessRenderer, ReportLog};
    use pretty_assertions::assert_eq;

    fn headless_app(config: DialogConfig) -> App<HeadlessRenderer, ReportLog> {
        App::new(HeadlessRenderer::new(), ReportLog::new(), config)
    }

    // ── DialogConfig ─────────────────────────────────────────────────

    #[test]
    fn config_defaults() {
        let config = DialogConfig::new();
        assert_eq!(config.title, "dialogbox");
        assert!(config.about.is_none());
        assert!(!config.resizable);
        assert!(!config.hidden);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn config_builder() {
        let config = DialogConfig::new()
            .with_title("Setup")
            .with_about("loading")
            .with_resizable(true)
            .with_hidden(true)
            .with_buffer_size(0);
        assert_eq!(config.title, "Setup");
        assert_eq!(config.about.as_deref(), Some("loading"));
        assert!(config.resizable);
        assert!(config.hidden);
        assert_eq!(config.buffer_size, 1);
    }

    #[test]
    fn config_from_lookup() {
        let config = DialogConfig::from_lookup(|key| match key {
            "DIALOGBOX_TITLE" => Some("Env".to_owned()),
            "DIALOGBOX_HIDDEN" => Some("yes".to_owned()),
            "DIALOGBOX_RESIZABLE" => Some("0".to_owned()),
            "DIALOGBOX_ABOUT" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.title, "Env");
        assert!(config.hidden);
        assert!(!config.resizable);
        assert!(config.about.is_none());
    }

    #[test]
    fn hidden_config_hides_root() {
        let app = headless_app(DialogConfig::new().with_hidden(true));
        let doc = app.session().document();
        assert!(!doc.get(doc.root()).expect("root").visible);
    }

    // ── Running ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn run_applies_commands_until_end_of_input() {
        let mut app = headless_app(DialogConfig::new());
        let input = tokio_test::io::Builder::new()
            .read(b"add checkbox Go cb che")
            .read(b"cked\nquery")
            .build();
        let outcome = app.run(input).await.expect("run");
        assert_eq!(outcome, None);
        assert_eq!(app.session().reporter().lines(), ["cb=1"]);
    }

    #[tokio::test]
    async fn run_keeps_state_after_end_of_input() {
        let mut app = headless_app(DialogConfig::new());
        let input: &'static [u8] = b"add pushbutton Ok ok exit\n";
        app.run(input).await.expect("run");
        let session = app.session_mut();
        let ok = session.document().find_named("ok").expect("ok");
        session.click(ok).expect("click");
        assert_eq!(session.outcome(), Some(Outcome::Rejected));
    }

    #[test]
    fn run_blocking_reads_every_command() {
        let mut app = headless_app(DialogConfig::new());
        let input: &[u8] = b"add label Hi l\nset l text Bye\nquery\n";
        app.run_blocking(input).expect("run");
        assert_eq!(app.session().reporter().lines(), ["l=Bye"]);
    }

    #[test]
    fn buffer_size_truncates_slots() {
        let mut app = headless_app(DialogConfig::new().with_buffer_size(6));
        let input: &[u8] = b"add label Greetings l\n";
        app.run_blocking(input).expect("run");
        let doc = app.session().document();
        assert!(doc.find_named("l").is_none());
        let column = doc.first_column(doc.root()).expect("column");
        let label = doc.children(column).first().and_then(|&id| doc.control(id));
        assert_eq!(label.map(|control| control.caption()), Some("Greeti"));
    }
}
