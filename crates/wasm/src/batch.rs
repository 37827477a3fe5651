//! JS side of the batch loaders: `name -> path` objects in, `name -> value`
//! objects out, progress to a callback or straight onto the loading bar

use bootkit_core::{BatchProgress, ProgressReporter, ProgressSpan};
use js_sys::{Array, Function, Object, Reflect};
use std::collections::BTreeMap;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::DomSurface;
use crate::js_message;

/// Where batch progress goes.
///
/// A function is called as `f(settled, total)`. An object
/// `{ start, span, label }` drives the loading bar over that range.
pub enum ProgressSink {
    Silent,
    Callback(Function),
    Bar { span: ProgressSpan, label: String },
}

impl ProgressSink {
    pub fn from_js(value: &JsValue) -> Self {
        if let Some(callback) = value.dyn_ref::<Function>() {
            return ProgressSink::Callback(callback.clone());
        }
        if !value.is_object() {
            return ProgressSink::Silent;
        }

        let field = |key: &str| Reflect::get(value, &JsValue::from_str(key)).ok();
        let start = field("start").and_then(|v| v.as_f64()).unwrap_or(0.0);
        let span = field("span").and_then(|v| v.as_f64()).unwrap_or(100.0);
        let label = field("label").and_then(|v| v.as_string()).unwrap_or_default();
        ProgressSink::Bar { span: ProgressSpan::new(start, span), label }
    }

    pub fn report(&self, bar: &ProgressReporter<DomSurface>, progress: BatchProgress) {
        match self {
            ProgressSink::Silent => {}
            ProgressSink::Callback(callback) => {
                let settled = JsValue::from(progress.settled() as u32);
                let total = JsValue::from(progress.total as u32);
                if let Err(e) = callback.call2(&JsValue::NULL, &settled, &total) {
                    warn!(cause = %js_message(&e), "Progress callback threw");
                }
            }
            ProgressSink::Bar { span, label } => {
                if let Err(e) = span.report(bar, label, progress) {
                    warn!(error = %e, "Failed to report batch progress");
                }
            }
        }
    }
}

/// `{ name: path, ... }` into an ordered map
pub fn sources_from_js(value: &JsValue) -> Result<BTreeMap<String, String>, JsValue> {
    let object = value
        .dyn_ref::<Object>()
        .ok_or_else(|| js_sys::Error::new("Expected an object of name -> path"))?;

    let mut sources = BTreeMap::new();
    for entry in Object::entries(object).iter() {
        let pair: Array = entry.unchecked_into();
        let name = pair.get(0).as_string().unwrap_or_default();
        let path = pair
            .get(1)
            .as_string()
            .ok_or_else(|| js_sys::Error::new(&format!("Path for {} is not a string", name)))?;
        sources.insert(name, path);
    }
    Ok(sources)
}

pub fn to_js_object<V: Into<JsValue>>(loaded: BTreeMap<String, V>) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (name, value) in loaded {
        Reflect::set(&object, &JsValue::from_str(&name), &value.into())?;
    }
    Ok(object.into())
}
