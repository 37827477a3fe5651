//! Installs the exported functions as globals.
//!
//! The application module looks its host functions up on the global object
//! (`showScreen`, `loadShader`, ...), so the module exports alone are not
//! enough.

use js_sys::{Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

fn install(name: &str, function: &JsValue) -> Result<(), JsValue> {
    Reflect::set(&js_sys::global(), &JsValue::from_str(name), function)?;
    Ok(())
}

/// Closure over an async export, returning a Promise to JS
fn async_loader<F, Fut>(load: F) -> Closure<dyn Fn(String) -> Promise>
where
    F: Fn(String) -> Fut + 'static,
    Fut: std::future::Future<Output = Result<JsValue, JsValue>> + 'static,
{
    Closure::new(move |path: String| future_to_promise(load(path)))
}

fn batch_loader<F, Fut>(load: F) -> Closure<dyn Fn(JsValue, JsValue) -> Promise>
where
    F: Fn(JsValue, JsValue) -> Fut + 'static,
    Fut: std::future::Future<Output = Result<JsValue, JsValue>> + 'static,
{
    Closure::new(move |sources: JsValue, progress: JsValue| {
        future_to_promise(load(sources, progress))
    })
}

pub fn install_globals() -> Result<(), JsValue> {
    let show_screen = Closure::<dyn Fn(String) -> Result<(), JsValue>>::new(|id: String| {
        crate::show_screen(&id)
    });
    install("showScreen", show_screen.as_ref())?;
    show_screen.forget();

    let set_progress =
        Closure::<dyn Fn(f64, String) -> Result<(), JsValue>>::new(|progress: f64, message: String| {
            crate::set_loading_progress(progress, &message)
        });
    install("setLoadingProgress", set_progress.as_ref())?;
    set_progress.forget();

    let owner_controls = Closure::<dyn Fn(bool) -> Result<(), JsValue>>::new(crate::update_owner_controls);
    install("updateOwnerControls", owner_controls.as_ref())?;
    owner_controls.forget();

    let start_state = Closure::<dyn Fn(bool) -> Result<(), JsValue>>::new(crate::switch_start_button_state);
    install("switchStartButtonState", start_state.as_ref())?;
    start_state.forget();

    let copy_code = Closure::<dyn Fn() -> Promise>::new(|| {
        future_to_promise(async { crate::copy_lobby_code().await.map(JsValue::from) })
    });
    install("copyLobbyCode", copy_code.as_ref())?;
    copy_code.forget();

    let resize = Closure::<dyn Fn()>::new(crate::resize_canvas);
    install("resizeCanvas", resize.as_ref())?;
    resize.forget();

    let load_shader = async_loader(|path| async move { crate::load_shader(path).await.map(JsValue::from) });
    install("loadShader", load_shader.as_ref())?;
    load_shader.forget();

    let load_file = async_loader(|path| async move { crate::load_file(path).await.map(JsValue::from) });
    install("loadFile", load_file.as_ref())?;
    load_file.forget();

    let load_image = async_loader(|path| async move { crate::load_image(path).await.map(JsValue::from) });
    install("loadImage", load_image.as_ref())?;
    load_image.forget();

    let load_files = batch_loader(|sources, progress| async move {
        crate::load_files(sources, progress).await
    });
    install("loadFiles", load_files.as_ref())?;
    load_files.forget();

    let load_images = batch_loader(|sources, progress| async move {
        crate::load_images(sources, progress).await
    });
    install("loadImages", load_images.as_ref())?;
    load_images.forget();

    Ok(())
}
