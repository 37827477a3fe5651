//! Runtime bootstrap: fetch, instantiate and start the application module
//!
//! `NotStarted -> Fetching -> Instantiating -> Running`, or `Failed(stage)`
//! from any stage before `Running`. One bootstrap per page; a second call is
//! refused.

use std::cell::Cell;
use std::rc::Rc;
use tracing::{error, info};

use crate::error::BootstrapError;
use crate::models::{BootStage, BootState, RuntimeHandle, Viewport};
use crate::platform::{Surface, WasmHost};
use crate::progress::ProgressReporter;

pub struct Bootstrapper<H, S> {
    host: H,
    wasm_path: String,
    state: Rc<Cell<BootState>>,
    progress: Option<ProgressReporter<S>>,
}

impl<H: WasmHost, S: Surface> Bootstrapper<H, S> {
    pub fn new(host: H, wasm_path: impl Into<String>) -> Self {
        Self {
            host,
            wasm_path: wasm_path.into(),
            state: Rc::new(Cell::new(BootState::NotStarted)),
            progress: None,
        }
    }

    /// Publish every state transition into `state`, which is reset to
    /// `NotStarted`
    pub fn sharing_state(mut self, state: Rc<Cell<BootState>>) -> Self {
        state.set(self.state.get());
        self.state = state;
        self
    }

    /// Report bootstrap milestones on the loading indicator
    pub fn with_progress(mut self, reporter: ProgressReporter<S>) -> Self {
        self.progress = Some(reporter);
        self
    }

    pub fn state(&self) -> BootState {
        self.state.get()
    }

    pub async fn bootstrap(&mut self) -> Result<RuntimeHandle<H::Instance>, BootstrapError> {
        let state = self.state.get();
        if state != BootState::NotStarted {
            error!(%state, "Bootstrap invoked more than once");
            return Err(BootstrapError::AlreadyInvoked(state));
        }

        info!(path = %self.wasm_path, "Fetching application module");
        self.state.set(BootState::Fetching);
        self.milestone(0.0, "Downloading...");
        let fetched = self.host.fetch(&self.wasm_path).await;
        let response = match fetched {
            Ok(response) => response,
            Err(cause) => return Err(self.fail(BootStage::Fetch, cause)),
        };

        self.state.set(BootState::Instantiating);
        self.milestone(5.0, "Initializing...");
        let instantiated = self.host.instantiate(response).await;
        let instance = match instantiated {
            Ok(instance) => instance,
            Err(cause) => return Err(self.fail(BootStage::Instantiate, cause)),
        };

        self.milestone(10.0, "Starting...");
        let started = self.host.start(&instance).await;
        if let Err(cause) = started {
            return Err(self.fail(BootStage::Start, cause));
        }
        self.state.set(BootState::Running);

        info!(path = %self.wasm_path, "Application module started");
        Ok(RuntimeHandle::new(instance))
    }

    fn fail(&mut self, stage: BootStage, cause: String) -> BootstrapError {
        error!(%stage, %cause, "Initialization failed");
        self.state.set(BootState::Failed(stage));
        BootstrapError::Stage { stage, cause }
    }

    fn milestone(&self, percent: f64, message: &str) {
        if let Some(reporter) = &self.progress {
            if let Err(e) = reporter.report(percent, message) {
                error!(error = %e, "Failed to report bootstrap progress");
            }
        }
    }
}

/// Size the drawing surface to the viewport. No canvas is not an error.
pub fn fit_canvas<S: Surface>(surface: &S, canvas_id: &str, viewport: Viewport) -> bool {
    surface.set_canvas_size(canvas_id, viewport.width, viewport.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{init_tracing, FakeHost, FakeInstance, FakeSurface};

    fn bootstrapper(host: FakeHost) -> Bootstrapper<FakeHost, FakeSurface> {
        init_tracing();
        Bootstrapper::new(host, "main.wasm")
    }

    #[tokio::test]
    async fn runs_every_stage_in_order() {
        let mut boot = bootstrapper(FakeHost::new());
        assert_eq!(boot.state(), BootState::NotStarted);

        let handle = boot.bootstrap().await.unwrap();

        assert_eq!(boot.state(), BootState::Running);
        assert_eq!(handle.instance(), &FakeInstance { module: "main.wasm".into() });
        assert_eq!(
            *boot.host.calls.borrow(),
            vec!["fetch main.wasm", "instantiate main.wasm", "start main.wasm"]
        );
    }

    #[tokio::test]
    async fn stage_failures_are_tagged_and_terminal() {
        for (stage, calls) in [
            (BootStage::Fetch, 1),
            (BootStage::Instantiate, 2),
            (BootStage::Start, 3),
        ] {
            let mut boot = bootstrapper(FakeHost::failing_at(stage));

            let err = boot.bootstrap().await.unwrap_err();

            assert_eq!(err.stage(), Some(stage));
            assert_eq!(boot.state(), BootState::Failed(stage));
            assert_eq!(boot.host.calls.borrow().len(), calls);
        }
    }

    #[tokio::test]
    async fn second_invocation_is_refused() {
        let mut boot = bootstrapper(FakeHost::new());
        boot.bootstrap().await.unwrap();

        let err = boot.bootstrap().await.unwrap_err();

        assert_eq!(err, BootstrapError::AlreadyInvoked(BootState::Running));
        assert_eq!(boot.host.calls.borrow().len(), 3);
    }

    #[tokio::test]
    async fn failed_bootstrap_is_not_retried() {
        let mut boot = bootstrapper(FakeHost::failing_at(BootStage::Fetch));
        boot.bootstrap().await.unwrap_err();

        let err = boot.bootstrap().await.unwrap_err();

        assert_eq!(err, BootstrapError::AlreadyInvoked(BootState::Failed(BootStage::Fetch)));
        assert_eq!(boot.host.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn shared_state_follows_every_transition() {
        let state = Rc::new(Cell::new(BootState::Failed(BootStage::Fetch)));
        let host = FakeHost::new().observing(state.clone());
        let mut boot = bootstrapper(host).sharing_state(state.clone());
        assert_eq!(state.get(), BootState::NotStarted);

        boot.bootstrap().await.unwrap();

        assert_eq!(
            *boot.host.seen.borrow(),
            vec![BootState::Fetching, BootState::Instantiating, BootState::Instantiating]
        );
        assert_eq!(state.get(), BootState::Running);
    }

    #[tokio::test]
    async fn start_failure_never_reports_running() {
        let state = Rc::new(Cell::new(BootState::NotStarted));
        let host = FakeHost::failing_at(BootStage::Start).observing(state.clone());
        let mut boot = bootstrapper(host).sharing_state(state.clone());

        boot.bootstrap().await.unwrap_err();

        assert!(!boot.host.seen.borrow().contains(&BootState::Running));
        assert_eq!(state.get(), BootState::Failed(BootStage::Start));
    }

    #[tokio::test]
    async fn reports_milestones_when_attached() {
        let surface = FakeSurface::new()
            .with_element("loading_bar")
            .with_element("loading_status");
        let reporter = ProgressReporter::new(surface.clone(), "loading_bar", "loading_status");
        let mut boot = bootstrapper(FakeHost::new()).with_progress(reporter);

        boot.bootstrap().await.unwrap();

        assert_eq!(surface.element("loading_status").text, "Starting...");
        assert_eq!(surface.style("loading_bar", "width").as_deref(), Some("10%"));
    }

    #[test]
    fn canvas_matches_viewport_exactly() {
        let surface = FakeSurface::new().with_canvas("game_canvas");

        assert!(fit_canvas(&surface, "game_canvas", Viewport::new(800, 600)));
        assert_eq!(surface.element("game_canvas").canvas_size, Some((800, 600)));

        assert!(fit_canvas(&surface, "game_canvas", Viewport::new(1920, 1080)));
        assert_eq!(surface.element("game_canvas").canvas_size, Some((1920, 1080)));
    }

    #[test]
    fn missing_canvas_is_a_no_op() {
        let surface = FakeSurface::new().with_element("lobby_code");

        assert!(!fit_canvas(&surface, "game_canvas", Viewport::new(800, 600)));
        assert!(!surface.has_element("game_canvas"));
    }
}
