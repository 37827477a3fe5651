//! Asynchronous loading of text, binary and image resources
//!
//! Every load is independent: no caching, no retries, no cancellation and no
//! timeout. Failures are logged here and handed back to the caller, who
//! decides whether to retry or give up.

use futures_util::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::future::Future;
use tracing::{debug, error};

use crate::error::LoadError;
use crate::models::{BatchProgress, ContentKind, LoadRequest, LoadResult};
use crate::platform::{ImageDecoder, Transport};

pub struct ResourceFetcher<T, D> {
    transport: T,
    decoder: D,
}

impl<T: Transport, D: ImageDecoder> ResourceFetcher<T, D> {
    pub fn new(transport: T, decoder: D) -> Self {
        Self { transport, decoder }
    }

    /// GET `path` and return the body untouched
    pub async fn load_bytes(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let response = self.transport.get(path).await.map_err(|cause| {
            error!(path, %cause, "Transport error while loading resource");
            LoadError::Transport { path: path.to_string(), cause }
        })?;

        if !response.is_success() {
            error!(path, status = response.status, "HTTP error while loading resource");
            return Err(LoadError::HttpStatus { path: path.to_string(), status: response.status });
        }

        debug!(path, bytes = response.body.len(), "Loaded resource");
        Ok(response.body)
    }

    /// GET `path` and decode the body as UTF-8. The content is not inspected.
    pub async fn load_text(&self, path: &str) -> Result<String, LoadError> {
        let body = self.load_bytes(path).await?;
        String::from_utf8(body).map_err(|e| {
            error!(path, cause = %e, "Resource is not valid UTF-8");
            LoadError::DecodeFailure { path: path.to_string(), cause: e.to_string() }
        })
    }

    pub async fn load_shader(&self, path: &str) -> Result<String, LoadError> {
        self.load_text(path).await
    }

    pub async fn load_file(&self, path: &str) -> Result<String, LoadError> {
        self.load_text(path).await
    }

    /// Resolves once the image is decoded. A decode that never settles never
    /// resolves either.
    pub async fn load_image(&self, path: &str) -> Result<D::Image, LoadError> {
        match self.decoder.decode(path).await {
            Ok(image) => {
                debug!(path, "Decoded image");
                Ok(image)
            }
            Err(cause) => {
                error!(path, %cause, "Image load error");
                Err(LoadError::DecodeFailure { path: path.to_string(), cause })
            }
        }
    }

    pub async fn load(&self, request: &LoadRequest) -> Result<LoadResult<D::Image>, LoadError> {
        match request.kind {
            ContentKind::Text => self.load_text(&request.path).await.map(LoadResult::Text),
            ContentKind::Image => self.load_image(&request.path).await.map(LoadResult::Image),
            ContentKind::Binary => self.load_bytes(&request.path).await.map(LoadResult::Binary),
        }
    }

    /// Load every `name -> path` entry concurrently
    pub async fn load_texts<F>(&self, sources: &BTreeMap<String, String>, on_progress: F) -> Batch<String>
    where
        F: FnMut(BatchProgress),
    {
        let pending: FuturesUnordered<_> = sources
            .iter()
            .map(|(name, path)| async move { (name.clone(), self.load_text(path).await) })
            .collect();
        settle(pending, sources.len(), on_progress).await
    }

    pub async fn load_images<F>(&self, sources: &BTreeMap<String, String>, on_progress: F) -> Batch<D::Image>
    where
        F: FnMut(BatchProgress),
    {
        let pending: FuturesUnordered<_> = sources
            .iter()
            .map(|(name, path)| async move { (name.clone(), self.load_image(path).await) })
            .collect();
        settle(pending, sources.len(), on_progress).await
    }
}

async fn settle<V, Fut, F>(mut pending: FuturesUnordered<Fut>, total: usize, mut on_progress: F) -> Batch<V>
where
    Fut: Future<Output = (String, Result<V, LoadError>)>,
    F: FnMut(BatchProgress),
{
    let mut progress = BatchProgress { total, ..Default::default() };
    let mut batch = Batch { loaded: BTreeMap::new(), errors: Vec::new() };

    while let Some((name, result)) = pending.next().await {
        match result {
            Ok(value) => {
                progress.loaded += 1;
                batch.loaded.insert(name, value);
            }
            Err(e) => {
                progress.failed += 1;
                batch.errors.push(e);
            }
        }
        debug!(loaded = progress.loaded, failed = progress.failed, total, "Batch progress");
        on_progress(progress);
    }

    batch
}

/// Outcome of a batch load. Errors are kept in completion order.
#[derive(Debug)]
pub struct Batch<V> {
    pub loaded: BTreeMap<String, V>,
    pub errors: Vec<LoadError>,
}

impl<V> Batch<V> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<BTreeMap<String, V>, LoadError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(self.loaded),
        }
    }
}
