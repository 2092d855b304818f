//! `dialogbox`: build a dialog from commands on standard input and write
//! report lines to standard output.
//!
//! This binary has no windowing backend. It maintains the widget tree and
//! answers `query` until the input ends or an exit button closes the dialog.
//! The exit status is 1 when the dialog was accepted, 0 otherwise.

use std::io;
use std::process::ExitCode;

use dialogbox::app::{App, DialogConfig};
use dialogbox::logging;
use dialogbox::render::{NullRenderer, WriteReporter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();

    let config = DialogConfig::from_env();
    tracing::debug!(?config, "starting");
    let mut app = App::new(NullRenderer::new(), WriteReporter::new(io::stdout()), config);

    match app.run(tokio::io::stdin()).await {
        Ok(outcome) => {
            let code = outcome.map_or(0, |outcome| outcome.exit_code());
            // the reader may still be parked on stdin
            std::process::exit(code)
        }
        Err(err) => {
            tracing::error!(error = %err, "dialogbox failed");
            ExitCode::from(2)
        }
    }
}
