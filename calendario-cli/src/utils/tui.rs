use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["-", "\\", "|", "/"];
const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner on stderr; hidden when stderr is not a terminal.
fn loading_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::default_spinner().tick_strings(TICKS).template("{msg} {spinner}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(TICK_INTERVAL);
    spinner
}

/// Await `work` behind a spinner, clearing it before the result is returned.
pub async fn with_spinner<F: Future>(message: impl Into<String>, work: F) -> F::Output {
    let spinner = loading_spinner(message.into());
    let output = work.await;
    spinner.finish_and_clear();
    output
}
