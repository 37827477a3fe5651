//! Loading bar and status message

use tracing::trace;

use crate::config::ElementIds;
use crate::error::SurfaceError;
use crate::models::{BatchProgress, ProgressState};
use crate::platform::Surface;

/// Sink projecting a percentage and a message onto the loading indicator.
/// Keeps nothing between calls.
#[derive(Clone)]
pub struct ProgressReporter<S> {
    surface: S,
    bar_id: String,
    status_id: String,
}

impl<S: Surface> ProgressReporter<S> {
    pub fn new(surface: S, bar_id: impl Into<String>, status_id: impl Into<String>) -> Self {
        Self { surface, bar_id: bar_id.into(), status_id: status_id.into() }
    }

    pub fn from_elements(surface: S, elements: &ElementIds) -> Self {
        Self::new(surface, &elements.loading_bar, &elements.loading_status)
    }

    /// Out-of-range percentages are clamped, never rejected
    pub fn report(&self, percent: f64, message: &str) -> Result<ProgressState, SurfaceError> {
        let state = ProgressState::new(percent, message);
        trace!(percent = state.percent, message, "Loading progress");

        self.surface.set_style(&self.bar_id, "width", &format!("{}%", state.percent))?;
        self.surface.set_text(&self.status_id, &state.message)?;
        Ok(state)
    }
}

/// A sub-range of the loading bar assigned to one batch of work
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSpan {
    pub start: f64,
    pub span: f64,
}

impl ProgressSpan {
    pub const fn new(start: f64, span: f64) -> Self {
        Self { start, span }
    }

    pub fn percent(&self, progress: BatchProgress) -> f64 {
        if progress.total == 0 {
            return self.start + self.span;
        }
        self.start + progress.settled() as f64 / progress.total as f64 * self.span
    }

    pub fn message(&self, label: &str, progress: BatchProgress) -> String {
        format!("{}  {}/{}", label, progress.settled(), progress.total)
    }

    /// Report one batch step through `reporter`
    pub fn report<S: Surface>(
        &self,
        reporter: &ProgressReporter<S>,
        label: &str,
        progress: BatchProgress,
    ) -> Result<ProgressState, SurfaceError> {
        reporter.report(self.percent(progress), &self.message(label, progress))
    }
}
