//! Collaborator traits implemented by the browser layer (and by test fakes)
//!
//! Failures cross these seams as plain `String` causes; the components wrap
//! them into typed errors with the path or stage attached.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::SurfaceError;
use crate::models::HttpResponse;

/// HTTP GET against a relative path
#[async_trait(?Send)]
pub trait Transport {
    /// `Err` only for transport-level failures. Non-success statuses are
    /// returned as responses.
    async fn get(&self, path: &str) -> Result<HttpResponse, String>;
}

/// Retrieves and decodes an image into a ready-to-use handle
#[async_trait(?Send)]
pub trait ImageDecoder {
    type Image;

    async fn decode(&self, path: &str) -> Result<Self::Image, String>;
}

#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

/// Runs a task once after a delay, without the caller awaiting it
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// The display surface, addressed by element id.
///
/// Methods take `&self`: the surface is shared by every component and the
/// browser DOM is interiorly mutable anyway.
pub trait Surface {
    fn has_element(&self, id: &str) -> bool;

    fn text(&self, id: &str) -> Result<String, SurfaceError>;

    fn set_text(&self, id: &str, text: &str) -> Result<(), SurfaceError>;

    fn has_class(&self, id: &str, class: &str) -> Result<bool, SurfaceError>;

    fn set_class(&self, id: &str, class: &str, enabled: bool) -> Result<(), SurfaceError>;

    /// `set_class` on every element carrying `marker`, whatever its id
    fn set_class_on_all(&self, marker: &str, class: &str, enabled: bool) -> Result<(), SurfaceError>;

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<(), SurfaceError>;

    fn set_disabled(&self, id: &str, disabled: bool) -> Result<(), SurfaceError>;

    /// Returns `false` when no canvas with this id exists.
    fn set_canvas_size(&self, id: &str, width: u32, height: u32) -> bool;
}

/// Fetches, instantiates and starts the application module
#[async_trait(?Send)]
pub trait WasmHost {
    type Response;
    type Instance;

    async fn fetch(&self, path: &str) -> Result<Self::Response, String>;

    async fn instantiate(&self, response: Self::Response) -> Result<Self::Instance, String>;

    /// Invokes the entry point. Whether the runtime ever "finishes" is its
    /// own business; implementations return once the call has been made.
    async fn start(&self, instance: &Self::Instance) -> Result<(), String>;
}
