//! Clipboard and timer collaborators for the lobby controls

use async_trait::async_trait;
use bootkit_core::{Clipboard, Scheduler};
use gloo_timers::callback::Timeout;
use std::time::Duration;
use wasm_bindgen_futures::JsFuture;

use crate::js_message;

/// `navigator.clipboard`
pub struct NavigatorClipboard;

#[async_trait(?Send)]
impl Clipboard for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        let clipboard = web_sys::window()
            .ok_or_else(|| "No window".to_string())?
            .navigator()
            .clipboard();

        JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| js_message(&e))
    }
}

/// `setTimeout`, fire and forget
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}
