//! Fetching, instantiating and starting the application module in the browser

use async_trait::async_trait;
use bootkit_core::{BootConfig, WasmHost};
use js_sys::{Array, Function, Object, Promise, Reflect, WebAssembly};
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::js_message;

/// Host side of the application module.
///
/// With a host binding (an object exposing `importObject` and
/// `run(instance)`, as Go's `wasm_exec.js` provides) the module is
/// instantiated against that import object and started through `run`.
/// Without one, an empty import object is used and the configured export is
/// called directly.
pub struct WebWasmHost {
    binding: Option<JsValue>,
    import_object: Object,
    entry_point: String,
}

impl WebWasmHost {
    pub fn from_config(config: &BootConfig) -> Self {
        let binding = config.host_binding.as_deref().and_then(construct_binding);

        let import_object = binding
            .as_ref()
            .and_then(|b| Reflect::get(b, &JsValue::from_str("importObject")).ok())
            .and_then(|v| v.dyn_into::<Object>().ok())
            .unwrap_or_else(Object::new);

        Self { binding, import_object, entry_point: config.entry_point.clone() }
    }

    fn entry(&self, instance: &WebAssembly::Instance) -> Result<Function, String> {
        Reflect::get(&instance.exports(), &JsValue::from_str(&self.entry_point))
            .map_err(|e| js_message(&e))?
            .dyn_into::<Function>()
            .map_err(|_| format!("Module does not export {}()", self.entry_point))
    }
}

/// `new globalThis[name]()`, if such a constructor exists
fn construct_binding(name: &str) -> Option<JsValue> {
    let ctor = Reflect::get(&js_sys::global(), &JsValue::from_str(name)).ok()?;
    let Ok(ctor) = ctor.dyn_into::<Function>() else {
        warn!(binding = name, "Host binding not found, starting without it");
        return None;
    };

    match Reflect::construct(&ctor, &Array::new()) {
        Ok(binding) => Some(binding),
        Err(e) => {
            warn!(binding = name, cause = %js_message(&e), "Failed to construct host binding");
            None
        }
    }
}

#[async_trait(?Send)]
impl WasmHost for WebWasmHost {
    type Response = Response;
    type Instance = WebAssembly::Instance;

    async fn fetch(&self, path: &str) -> Result<Response, String> {
        let window = web_sys::window().ok_or_else(|| "No window".to_string())?;
        let response = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| js_message(&e))?
            .dyn_into::<Response>()
            .map_err(|_| "fetch did not resolve to a Response".to_string())?;

        if !response.ok() {
            return Err(format!("HTTP error! status: {}", response.status()));
        }
        Ok(response)
    }

    async fn instantiate(&self, response: Response) -> Result<WebAssembly::Instance, String> {
        let source = Promise::resolve(&response);
        let result = JsFuture::from(WebAssembly::instantiate_streaming(&source, &self.import_object))
            .await
            .map_err(|e| js_message(&e))?;

        Reflect::get(&result, &JsValue::from_str("instance"))
            .map_err(|e| js_message(&e))?
            .dyn_into::<WebAssembly::Instance>()
            .map_err(|_| "instantiateStreaming returned no instance".to_string())
    }

    async fn start(&self, instance: &WebAssembly::Instance) -> Result<(), String> {
        let outcome = match &self.binding {
            Some(binding) => {
                let run = Reflect::get(binding, &JsValue::from_str("run"))
                    .map_err(|e| js_message(&e))?
                    .dyn_into::<Function>()
                    .map_err(|_| "Host binding has no run()".to_string())?;
                run.call1(binding, instance)
            }
            None => self.entry(instance)?.call0(&JsValue::UNDEFINED),
        }
        .map_err(|e| js_message(&e))?;

        // The runtime decides when (if ever) it is done
        if let Ok(promise) = outcome.dyn_into::<Promise>() {
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => info!("Application runtime exited"),
                    Err(e) => error!(cause = %js_message(&e), "Application runtime failed"),
                }
            });
        }
        Ok(())
    }
}
