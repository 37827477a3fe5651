//! Page helpers: embedded configuration, viewport and resize handling

use bootkit_core::{fit_canvas, BootConfig, Viewport};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::DomSurface;

const CONFIG_ELEMENT_ID: &str = "bootkit-config";

/// Reads `<script type="application/json" id="bootkit-config">`, falling
/// back to defaults when it is absent or malformed
pub fn read_config(surface: &DomSurface) -> BootConfig {
    let Some(json) = surface
        .document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        debug!("No embedded configuration, using defaults");
        return BootConfig::default();
    };

    match BootConfig::from_json(&json) {
        Ok(config) => {
            info!(wasm_path = %config.wasm_path, "Loaded embedded configuration");
            config
        }
        Err(e) => {
            warn!(error = %e, "Ignoring embedded configuration");
            BootConfig::default()
        }
    }
}

pub fn viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width.max(0.0) as u32, height.max(0.0) as u32))
}

/// Size the canvas to the window; a page without a canvas is left alone
pub fn fit_to_window(surface: &DomSurface, canvas_id: &str) {
    if let Some(viewport) = viewport() {
        if !fit_canvas(surface, canvas_id, viewport) {
            debug!(canvas = canvas_id, "No canvas to resize");
        }
    }
}

pub fn install_resize_listener(surface: DomSurface, canvas_id: String) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let onresize = Closure::<dyn FnMut()>::new(move || {
        fit_to_window(&surface, &canvas_id);
    });
    window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
    onresize.forget();

    Ok(())
}
