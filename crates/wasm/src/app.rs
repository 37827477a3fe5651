//! Page-wide bootstrap state shared by the exported functions

use bootkit_core::{
    BootConfig, BootState, Bootstrapper, LobbyControls, ProgressReporter, ResourceFetcher,
    RuntimeHandle, ScreenRegistry,
};
use js_sys::WebAssembly;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{error, warn};
use wasm_bindgen::JsValue;

use crate::clipboard::{NavigatorClipboard, TimeoutScheduler};
use crate::dom::DomSurface;
use crate::http_client::{GlooTransport, HtmlImageDecoder};
use crate::runtime::WebWasmHost;

// ============================================================================
// Shell
// ============================================================================

pub struct Shell {
    pub(crate) config: BootConfig,
    pub(crate) surface: DomSurface,
    pub(crate) screens: RefCell<ScreenRegistry<DomSurface>>,
    pub(crate) controls: LobbyControls<DomSurface, NavigatorClipboard, TimeoutScheduler>,
    pub(crate) progress: ProgressReporter<DomSurface>,
    pub(crate) fetcher: ResourceFetcher<GlooTransport, HtmlImageDecoder>,
    pub(crate) boot_state: Rc<Cell<BootState>>,
    runtime: RefCell<Option<RuntimeHandle<WebAssembly::Instance>>>,
}

thread_local! {
    static SHELL: RefCell<Option<Rc<Shell>>> = const { RefCell::new(None) };
}

impl Shell {
    fn new(surface: DomSurface, config: BootConfig) -> Self {
        Self {
            screens: RefCell::new(ScreenRegistry::from_config(surface.clone(), &config)),
            controls: LobbyControls::new(
                surface.clone(),
                NavigatorClipboard,
                TimeoutScheduler,
                &config,
            ),
            progress: ProgressReporter::from_elements(surface.clone(), &config.elements),
            fetcher: ResourceFetcher::new(GlooTransport, HtmlImageDecoder),
            boot_state: Rc::new(Cell::new(BootState::NotStarted)),
            runtime: RefCell::new(None),
            surface,
            config,
        }
    }

    /// Install the page's shell. Only the first call succeeds.
    pub fn install(surface: DomSurface, config: BootConfig) -> Result<Rc<Shell>, JsValue> {
        SHELL.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(JsValue::from_str("Bootkit is already installed on this page"));
            }
            let shell = Rc::new(Shell::new(surface, config));
            *slot = Some(shell.clone());
            Ok(shell)
        })
    }

    /// Show the configured initial screen, or adopt what the markup shows
    pub fn show_initial_screen(&self) {
        let mut screens = self.screens.borrow_mut();
        let result = match self.config.initial_screen {
            Some(initial) => screens.show_screen(initial),
            None => screens.adopt_markup_state().map(|_| ()),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to set up the initial screen");
        }
    }
}

pub fn shell() -> Result<Rc<Shell>, JsValue> {
    SHELL
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("Bootkit is not installed"))
}

// ============================================================================
// Bootstrap
// ============================================================================

/// Runs the one bootstrap of this page and keeps the instance alive
pub async fn run_bootstrap(shell: Rc<Shell>) {
    let host = WebWasmHost::from_config(&shell.config);
    let mut bootstrapper = Bootstrapper::new(host, shell.config.wasm_path.clone())
        .with_progress(shell.progress.clone())
        .sharing_state(shell.boot_state.clone());

    match bootstrapper.bootstrap().await {
        Ok(handle) => {
            *shell.runtime.borrow_mut() = Some(handle);
        }
        Err(e) => {
            error!(error = %e, "Initialization failed");
        }
    }
}
