//! Transfer progress reporting.
//!
//! The transport calls a caller-supplied [`ProgressObserver`] synchronously
//! for every chunk it writes. Nothing is printed unless the caller installs
//! an observer that does so.

use std::io::Write;

/// Unknown-size transfers are redrawn after this many new bytes.
const UNKNOWN_SIZE_STEP: u64 = 1024 * 1024;

/// Snapshot of a transfer in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    received: u64,
    total: Option<u64>,
}

impl Progress {
    /// Create a progress snapshot.
    #[must_use]
    pub const fn new(received: u64, total: Option<u64>) -> Self {
        Self { received, total }
    }

    /// Bytes written so far.
    #[must_use]
    pub const fn received(&self) -> u64 {
        self.received
    }

    /// Expected body size, when the server announced one.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whole-number completion percentage, capped at 100.
    ///
    /// Returns `None` when the total is unknown or zero.
    #[must_use]
    pub fn percent(&self) -> Option<u64> {
        let total = self.total.filter(|total| *total > 0)?;
        self.received
            .saturating_mul(100)
            .checked_div(total)
            .map(|pct| pct.min(100))
    }
}

/// Receives progress notifications during a transfer.
pub trait ProgressObserver {
    /// Called after each chunk is written.
    fn on_progress(&mut self, progress: Progress);

    /// Called once when the body has been fully written.
    fn on_complete(&mut self, progress: Progress) {
        self.on_progress(progress);
    }
}

/// Observer that discards all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: Progress) {}
}

/// Observer that renders a single updating status line on a writer.
///
/// Known-size transfers redraw when the whole percentage changes;
/// unknown-size transfers redraw every mebibyte.
pub struct WriterProgress<W: Write> {
    writer: W,
    last_drawn: Option<u64>,
    line_open: bool,
}

impl<W: Write> WriterProgress<W> {
    /// Render progress on `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            last_drawn: None,
            line_open: false,
        }
    }

    /// Terminate a status line left open by an interrupted transfer.
    ///
    /// Does nothing when no line was drawn or the transfer completed.
    pub fn finish_line(&mut self) {
        if self.line_open {
            self.end_line();
        }
    }

    /// Consume the observer and return the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn should_draw(&self, progress: Progress) -> (bool, u64) {
        let marker = progress.percent().unwrap_or_else(|| {
            progress
                .received()
                .checked_div(UNKNOWN_SIZE_STEP)
                .unwrap_or_default()
        });
        (self.last_drawn != Some(marker), marker)
    }

    fn draw(&mut self, progress: Progress) {
        let line = render(progress);
        self.line_open = true;
        if write!(self.writer, "\r{line}").is_err() || self.writer.flush().is_err() {
            // Best-effort output; a broken terminal must not abort the transfer.
        }
    }

    fn end_line(&mut self) {
        self.line_open = false;
        if writeln!(self.writer).is_err() {
            // Best-effort output.
        }
    }
}

impl<W: Write> ProgressObserver for WriterProgress<W> {
    fn on_progress(&mut self, progress: Progress) {
        let (draw, marker) = self.should_draw(progress);
        if draw {
            self.last_drawn = Some(marker);
            self.draw(progress);
        }
    }

    fn on_complete(&mut self, progress: Progress) {
        self.draw(progress);
        self.end_line();
    }
}

/// Format a progress snapshot as a human-readable status line.
///
/// # Examples
///
/// ```
/// use maven_fetch::progress::{Progress, render};
///
/// assert_eq!(render(Progress::new(512, Some(1024))), "512/1024 bytes (50%)");
/// assert_eq!(render(Progress::new(512, None)), "512 bytes");
/// ```
#[must_use]
pub fn render(progress: Progress) -> String {
    match (progress.total(), progress.percent()) {
        (Some(total), Some(pct)) => format!("{}/{total} bytes ({pct}%)", progress.received()),
        _ => format!("{} bytes", progress.received()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::half(50, Some(100), Some(50))]
    #[case::complete(100, Some(100), Some(100))]
    #[case::overshoot(150, Some(100), Some(100))]
    #[case::unknown(50, None, None)]
    #[case::zero_total(0, Some(0), None)]
    fn percent_handles_edge_cases(
        #[case] received: u64,
        #[case] total: Option<u64>,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(Progress::new(received, total).percent(), expected);
    }

    #[test]
    fn writer_progress_redraws_only_on_percent_change() {
        let mut observer = WriterProgress::new(Vec::new());
        observer.on_progress(Progress::new(1, Some(1000)));
        observer.on_progress(Progress::new(2, Some(1000)));
        observer.on_progress(Progress::new(500, Some(1000)));
        let output = String::from_utf8(observer.into_inner()).expect("UTF-8 output");
        assert_eq!(output.matches('\r').count(), 2);
        assert!(output.ends_with("500/1000 bytes (50%)"));
    }

    #[test]
    fn writer_progress_degrades_to_byte_counter() {
        let mut observer = WriterProgress::new(Vec::new());
        observer.on_complete(Progress::new(42, None));
        let output = String::from_utf8(observer.into_inner()).expect("UTF-8 output");
        assert_eq!(output, "\r42 bytes\n");
    }

    #[test]
    fn finish_line_terminates_an_interrupted_line_once() {
        let mut observer = WriterProgress::new(Vec::new());
        observer.on_progress(Progress::new(10, Some(100)));
        observer.finish_line();
        observer.finish_line();
        let output = String::from_utf8(observer.into_inner()).expect("UTF-8 output");
        assert_eq!(output, "\r10/100 bytes (10%)\n");
    }

    #[rstest]
    #[case::nothing_drawn(None)]
    #[case::completed(Some(Progress::new(5, Some(5))))]
    fn finish_line_is_silent_without_an_open_line(#[case] complete: Option<Progress>) {
        let mut observer = WriterProgress::new(Vec::new());
        let completed = complete.is_some();
        if let Some(progress) = complete {
            observer.on_complete(progress);
        }
        observer.finish_line();
        let output = String::from_utf8(observer.into_inner()).expect("UTF-8 output");
        assert_eq!(output.matches('\n').count(), usize::from(completed));
    }
}
