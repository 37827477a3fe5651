//! Browser implementations of the loading collaborators
//!
//! Uses gloo-net for the fetch API and `HtmlImageElement::decode` for images

use async_trait::async_trait;
use bootkit_core::{HttpResponse, ImageDecoder, Transport};
use gloo_net::http::Request;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::js_message;

/// Plain GET through `window.fetch`
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse, String> {
        let response = Request::get(path)
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| format!("Failed to read response body: {}", e))?;

        Ok(HttpResponse { status, body })
    }
}

/// Decodes into an `<img>` element ready to upload as a texture
pub struct HtmlImageDecoder;

#[async_trait(?Send)]
impl ImageDecoder for HtmlImageDecoder {
    type Image = HtmlImageElement;

    async fn decode(&self, path: &str) -> Result<HtmlImageElement, String> {
        let img = HtmlImageElement::new().map_err(|e| js_message(&e))?;
        img.set_src(path);

        JsFuture::from(img.decode())
            .await
            .map_err(|e| format!("Failed to load image: {} ({})", path, js_message(&e)))?;

        Ok(img)
    }
}
