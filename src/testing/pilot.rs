//! Pilot: programmatic driving of a headless session.
//!
//! The `Pilot` wraps a [`Session`] over a [`HeadlessRenderer`] and a
//! [`ReportLog`], feeds it command scripts, simulates user interaction by
//! widget name, and exposes the collected report lines.

use crate::app::DialogConfig;
use crate::command::parse_script;
use crate::dom::{Document, NodeId};
use crate::engine::{CommandError, Cursors, Outcome, Session};
use crate::render::{HeadlessRenderer, RenderOp, ReportLog};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless dialog driver for testing.
///
/// # Examples
///
/// ```
/// use dialogbox::testing::Pilot;
///
/// let mut pilot = Pilot::new();
/// pilot.run("add checkbox Go go checked\nquery\n");
/// assert_eq!(pilot.take_reports(), ["go=1"]);
/// ```
#[derive(Debug)]
pub struct Pilot {
    session: Session<HeadlessRenderer, ReportLog>,
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pilot {
    /// A pilot over a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DialogConfig::default())
    }

    pub fn with_config(config: DialogConfig) -> Self {
        Self {
            session: Session::with_config(HeadlessRenderer::new(), ReportLog::new(), config),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply every command of `script`. Failing commands are skipped, the
    /// same way the command loop skips them.
    pub fn run(&mut self, script: &str) {
        for command in parse_script(script) {
            self.session.apply(&command);
        }
    }

    /// Apply every command of `script`, collecting the error of each one
    /// that had no effect.
    pub fn try_run(&mut self, script: &str) -> Vec<CommandError> {
        parse_script(script)
            .iter()
            .filter_map(|command| self.session.try_apply(command).err())
            .collect()
    }

    // ── Interaction ──────────────────────────────────────────────────

    /// Click the control named `name`.
    pub fn click(&mut self, name: &str) -> Result<(), CommandError> {
        let node = self.lookup(name)?;
        self.session.click(node)
    }

    /// Make `row` the current row of the list or combo box named `name`.
    pub fn select(&mut self, name: &str, row: usize) -> Result<(), CommandError> {
        let node = self.lookup(name)?;
        self.session.select_item(node, row)
    }

    pub fn activate(&mut self, name: &str, row: usize) -> Result<(), CommandError> {
        let node = self.lookup(name)?;
        self.session.activate_item(node, row)
    }

    pub fn move_slider(&mut self, name: &str, value: i32) -> Result<(), CommandError> {
        let node = self.lookup(name)?;
        self.session.move_slider(node, value)
    }

    /// Type `text` into the text box or editable combo box named `name`.
    pub fn type_text(&mut self, name: &str, text: &str) -> Result<(), CommandError> {
        let node = self.lookup(name)?;
        self.session.edit_text(node, text)
    }

    /// Close the window.
    pub fn close(&mut self) {
        self.session.close();
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Drain the report lines collected so far.
    pub fn take_reports(&mut self) -> Vec<String> {
        self.session.reporter_mut().take()
    }

    /// Drain the renderer calls recorded so far.
    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        self.session.renderer_mut().take_ops()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.session.outcome()
    }

    pub fn document(&self) -> &Document {
        self.session.document()
    }

    pub fn cursors(&self) -> &Cursors {
        self.session.cursors()
    }

    pub fn session(&self) -> &Session<HeadlessRenderer, ReportLog> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<HeadlessRenderer, ReportLog> {
        &mut self.session
    }

    /// The node named `name`.
    ///
    /// # Panics
    ///
    /// Panics when no node has that name.
    pub fn named(&self, name: &str) -> NodeId {
        match self.document().find_named(name) {
            Some(node) => node,
            None => panic!("no node named `{name}`"),
        }
    }

    /// Names of the focusable nodes of the page holding `name`, in tab order.
    pub fn tab_order(&self, name: &str) -> Vec<String> {
        let doc = self.document();
        let page = doc.page_of(self.named(name));
        self.session
            .focus_chain(page)
            .map(|chain| {
                chain
                    .nodes()
                    .iter()
                    .map(|&id| doc.name(id).unwrap_or("?").to_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lookup(&self, name: &str) -> Result<NodeId, CommandError> {
        self.document()
            .find_named(name)
            .ok_or_else(|| CommandError::UnknownName(name.to_owned()))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::WidgetKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_pilot_is_empty() {
        let mut pilot = Pilot::new();
        assert!(pilot.take_reports().is_empty());
        assert_eq!(pilot.outcome(), None);
        assert_eq!(pilot.document().len(), 3);
    }

    #[test]
    fn with_config_applies_title() {
        let pilot = Pilot::with_config(DialogConfig::new().with_title("Setup"));
        let doc = pilot.document();
        let title = doc.get(doc.root()).and_then(|data| data.as_page()).map(|page| page.title.as_str());
        assert_eq!(title, Some("Setup"));
    }

    #[test]
    fn try_run_collects_errors() {
        let mut pilot = Pilot::new();
        let errors = pilot.try_run("add label A a\nremove ghost\nend\n");
        assert_eq!(
            errors,
            vec![
                CommandError::UnknownName("ghost".into()),
                CommandError::NothingToEnd
            ]
        );
    }

    #[test]
    fn interactions_by_name() {
        let mut pilot = Pilot::new();
        pilot.run("add slider s 0 10\nadd pushbutton Ok ok\n");
        pilot.move_slider("s", 4).expect("move");
        pilot.click("ok").expect("click");
        assert_eq!(pilot.take_reports(), ["s=4", "ok=clicked"]);
        assert_eq!(
            pilot.click("ghost"),
            Err(CommandError::UnknownName("ghost".into()))
        );
    }

    #[test]
    fn clicking_a_label_is_not_applicable() {
        let mut pilot = Pilot::new();
        pilot.run("add label Hi l\n");
        assert_eq!(
            pilot.click("l"),
            Err(CommandError::NotApplicable {
                operation: "click",
                kind: WidgetKind::Label
            })
        );
    }

    #[test]
    fn tab_order_by_name() {
        let mut pilot = Pilot::new();
        pilot.run("add pushbutton A a\nadd label L l\nadd checkbox C c\n");
        assert_eq!(pilot.tab_order("a"), ["a", "c"]);
    }
}
