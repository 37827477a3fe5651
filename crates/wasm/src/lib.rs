//! Bootkit browser layer
//!
//! Boots the application module on page load and exposes the host functions
//! it calls back into: screen switching, loading progress, lobby controls
//! and resource loading.

#![cfg(target_arch = "wasm32")]

mod app;
mod batch;
mod bridge;
mod clipboard;
mod dom;
mod http_client;
mod page;
mod runtime;

use bootkit_core::{BootkitError, CopyOutcome};
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::app::{shell, Shell};
use crate::dom::DomSurface;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let surface = DomSurface::from_window().ok_or_else(|| js_error("No document"))?;
    let config = page::read_config(&surface);
    let canvas_id = config.elements.canvas.clone();

    let shell = Shell::install(surface.clone(), config)?;

    page::fit_to_window(&surface, &canvas_id);
    page::install_resize_listener(surface, canvas_id)?;
    bridge::install_globals()?;
    shell.show_initial_screen();

    info!(wasm_path = %shell.config.wasm_path, "Bootkit installed");
    wasm_bindgen_futures::spawn_local(app::run_bootstrap(shell));
    Ok(())
}

// ============================================================================
// Screens and progress
// ============================================================================

#[wasm_bindgen(js_name = showScreen)]
pub fn show_screen(id: &str) -> Result<(), JsValue> {
    let shell = shell()?;
    let result = shell.screens.borrow_mut().show_screen_named(id);
    result.map_err(to_js)
}

#[wasm_bindgen(js_name = setLoadingProgress)]
pub fn set_loading_progress(progress: f64, message: &str) -> Result<(), JsValue> {
    shell()?
        .progress
        .report(progress, message)
        .map(|_| ())
        .map_err(|e| to_js(e.into()))
}

#[wasm_bindgen(js_name = resizeCanvas)]
pub fn resize_canvas() {
    if let Ok(shell) = shell() {
        page::fit_to_window(&shell.surface, &shell.config.elements.canvas);
    }
}

/// Current bootstrap state, e.g. `running` or `failed while fetching`
#[wasm_bindgen(js_name = bootState)]
pub fn boot_state() -> Result<String, JsValue> {
    Ok(shell()?.boot_state.get().to_string())
}

// ============================================================================
// Lobby controls
// ============================================================================

#[wasm_bindgen(js_name = updateOwnerControls)]
pub fn update_owner_controls(is_owner: bool) -> Result<(), JsValue> {
    shell()?
        .controls
        .set_owner_controls_visible(is_owner)
        .map_err(|e| to_js(e.into()))
}

#[wasm_bindgen(js_name = switchStartButtonState)]
pub fn switch_start_button_state(is_enabled: bool) -> Result<(), JsValue> {
    shell()?
        .controls
        .set_start_enabled(is_enabled)
        .map_err(|e| to_js(e.into()))
}

/// Resolves to whether the code was copied. Clipboard failures are logged
/// and resolve to `false`; a missing lobby code element rejects.
#[wasm_bindgen(js_name = copyLobbyCode)]
pub async fn copy_lobby_code() -> Result<bool, JsValue> {
    let shell = shell()?;
    let result = shell.controls.copy_lobby_code().await;
    match result {
        Ok(outcome) => Ok(outcome == CopyOutcome::Copied),
        Err(BootkitError::Clipboard(_)) => Ok(false),
        Err(e) => Err(to_js(e)),
    }
}

// ============================================================================
// Resource loading
// ============================================================================

#[wasm_bindgen(js_name = loadShader)]
pub async fn load_shader(path: String) -> Result<String, JsValue> {
    let shell = shell()?;
    let result = shell.fetcher.load_shader(&path).await;
    result.map_err(|e| to_js(e.into()))
}

#[wasm_bindgen(js_name = loadFile)]
pub async fn load_file(path: String) -> Result<String, JsValue> {
    let shell = shell()?;
    let result = shell.fetcher.load_file(&path).await;
    result.map_err(|e| to_js(e.into()))
}

#[wasm_bindgen(js_name = loadImage)]
pub async fn load_image(path: String) -> Result<HtmlImageElement, JsValue> {
    let shell = shell()?;
    let result = shell.fetcher.load_image(&path).await;
    result.map_err(|e| to_js(e.into()))
}

/// `loadFiles({ name: path }, progress?)` resolves to `{ name: text }`, or
/// rejects with the first failure once every load has settled
#[wasm_bindgen(js_name = loadFiles)]
pub async fn load_files(sources: JsValue, progress: JsValue) -> Result<JsValue, JsValue> {
    let shell = shell()?;
    let sources = batch::sources_from_js(&sources)?;
    let sink = batch::ProgressSink::from_js(&progress);

    let loaded = shell
        .fetcher
        .load_texts(&sources, |p| sink.report(&shell.progress, p))
        .await
        .into_result()
        .map_err(|e| to_js(e.into()))?;
    batch::to_js_object(loaded)
}

/// `loadImages({ name: path }, progress?)`, resolving to `{ name: <img> }`
#[wasm_bindgen(js_name = loadImages)]
pub async fn load_images(sources: JsValue, progress: JsValue) -> Result<JsValue, JsValue> {
    let shell = shell()?;
    let sources = batch::sources_from_js(&sources)?;
    let sink = batch::ProgressSink::from_js(&progress);

    let loaded = shell
        .fetcher
        .load_images(&sources, |p| sink.report(&shell.progress, p))
        .await
        .into_result()
        .map_err(|e| to_js(e.into()))?;
    batch::to_js_object(loaded)
}

// ============================================================================
// Helpers
// ============================================================================

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn to_js(err: BootkitError) -> JsValue {
    error!(error = %err, "Host call failed");
    js_error(&err.to_string())
}

/// Best-effort text of a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}
