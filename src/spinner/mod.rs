//! Animated spinner for long-running operations.
//!
//! A spinner redraws `frame text` on the current line from a background
//! thread until [`Spinner::success`] or [`Spinner::error`] is called. Both
//! consume the handle, so a spinner can be terminated exactly once.

mod guard;

use std::{
    io::Write,
    sync::{
        Arc, Mutex,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::{
    QueueableCommand,
    cursor::{Hide, MoveToColumn, Show},
    terminal::{Clear, ClearType},
};
use derive_more::Display;
use log::{debug, warn};

pub(crate) use guard::LineGuard;

use crate::{
    error::{PromptError, PromptResult},
    prompt::render::Painter,
};

type SharedOutput = Arc<Mutex<Box<dyn Write + Send>>>;

/// Shortest time between two frames.
const MIN_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum SpinnerState {
    #[display("running")]
    Running,
    #[display("succeeded")]
    Succeeded,
    #[display("failed")]
    Failed,
}

/// Handle to a running spinner.
///
/// The handle is `Send`, so it can be terminated from a different thread
/// than the one that started it. Dropping a running spinner stops the
/// animation and clears its line.
pub struct Spinner {
    text: String,
    state: SpinnerState,
    out: SharedOutput,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    interactive: bool,
    painter: Painter,
    line: LineGuard,
}

impl Spinner {
    pub(crate) fn start(
        text: &str,
        interval: Duration,
        frames: Vec<String>,
        out: Box<dyn Write + Send>,
        interactive: bool,
        painter: Painter,
        line: LineGuard,
    ) -> PromptResult<Self> {
        if !line.try_claim() {
            return Err(PromptError::TerminalBusy);
        }

        let mut spinner = Self {
            text: text.to_string(),
            state: SpinnerState::Running,
            out: Arc::new(Mutex::new(out)),
            stop: None,
            worker: None,
            interactive,
            painter,
            line,
        };

        if !interactive {
            // No redraw-in-place: announce once, report the outcome later.
            spinner.write_line(text)?;
            return Ok(spinner);
        }

        if interval < MIN_INTERVAL {
            debug!(
                "Spinner interval of {}ms raised to {}ms",
                interval.as_millis(),
                MIN_INTERVAL.as_millis()
            );
        }
        let interval = interval.max(MIN_INTERVAL);

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let out = Arc::clone(&spinner.out);
        let painter = spinner.painter.clone();
        let text = spinner.text.clone();

        let worker = thread::Builder::new()
            .name("prompter-spinner".into())
            .spawn(move || {
                if let Ok(mut out) = out.lock() {
                    let _ = out.queue(Hide);
                }
                for glyph in frames.iter().cycle() {
                    if let Err(e) = draw_frame(&out, &painter.frame(glyph, &text)) {
                        debug!("Spinner frame write failed: {e}");
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        match worker {
            Ok(worker) => {
                spinner.stop = Some(stop_tx);
                spinner.worker = Some(worker);
                debug!("Spinner started: {}", spinner.text);
                Ok(spinner)
            }
            Err(e) => {
                spinner.state = SpinnerState::Failed;
                spinner.line.release();
                Err(e.into())
            }
        }
    }

    /// Stops the animation and replaces the line with a success message.
    pub fn success(mut self, message: &str) -> PromptResult<()> {
        self.finish(SpinnerState::Succeeded, message)
    }

    /// Stops the animation and replaces the line with an error message.
    pub fn error(mut self, message: &str) -> PromptResult<()> {
        self.finish(SpinnerState::Failed, message)
    }

    /// The text shown next to the animation.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn finish(&mut self, state: SpinnerState, message: &str) -> PromptResult<()> {
        // The worker is joined before the outcome is written, so no frame
        // can land after it.
        self.halt();
        self.state = state;

        let outcome = match state {
            SpinnerState::Succeeded => self.painter.success_outcome(message),
            _ => self.painter.error_outcome(message),
        };
        let written = self.write_line(&outcome);

        self.line.release();
        debug!("Spinner {state}: {message}");
        written
    }

    fn halt(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("Spinner thread panicked");
        }
    }

    /// Writes a full line, replacing the current one on interactive output.
    fn write_line(&self, line: &str) -> PromptResult<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| PromptError::Io(std::io::Error::other("spinner output lock poisoned")))?;

        if self.interactive {
            out.queue(MoveToColumn(0))?
                .queue(Clear(ClearType::CurrentLine))?;
        }
        writeln!(out, "{line}")?;
        if self.interactive && self.state != SpinnerState::Running {
            out.queue(Show)?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if self.state != SpinnerState::Running {
            return;
        }

        warn!("Spinner dropped while running: {}", self.text);
        self.halt();
        if self.interactive
            && let Ok(mut out) = self.out.lock()
        {
            let _ = out
                .queue(MoveToColumn(0))
                .and_then(|out| out.queue(Clear(ClearType::CurrentLine)))
                .and_then(|out| out.queue(Show))
                .and_then(|out| out.flush());
        }
        self.line.release();
    }
}

fn draw_frame(out: &SharedOutput, frame: &str) -> std::io::Result<()> {
    let Ok(mut out) = out.lock() else {
        return Ok(());
    };
    out.queue(MoveToColumn(0))?
        .queue(Clear(ClearType::CurrentLine))?;
    write!(out, "{frame}")?;
    out.flush()
}
