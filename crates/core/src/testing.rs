//! In-memory fakes for the collaborator traits, used by the unit tests

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use crate::error::SurfaceError;
use crate::models::{BootStage, BootState, HttpResponse};
use crate::platform::{Clipboard, ImageDecoder, Scheduler, Surface, Transport, WasmHost};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bootkit_core=debug")
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Surface
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub text: String,
    pub classes: BTreeSet<String>,
    pub styles: HashMap<String, String>,
    pub disabled: bool,
    pub canvas_size: Option<(u32, u32)>,
}

#[derive(Clone, Default)]
pub struct FakeSurface {
    elements: Rc<RefCell<HashMap<String, FakeElement>>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(self, id: &str) -> Self {
        self.elements.borrow_mut().insert(id.to_string(), FakeElement::default());
        self
    }

    pub fn with_text(self, id: &str, text: &str) -> Self {
        self.elements.borrow_mut().insert(
            id.to_string(),
            FakeElement { text: text.to_string(), ..Default::default() },
        );
        self
    }

    /// Element already carrying `classes`, as written in the markup
    pub fn with_classes(self, id: &str, classes: &[&str]) -> Self {
        self.elements.borrow_mut().insert(
            id.to_string(),
            FakeElement {
                classes: classes.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_canvas(self, id: &str) -> Self {
        self.elements.borrow_mut().insert(
            id.to_string(),
            FakeElement { canvas_size: Some((300, 150)), ..Default::default() },
        );
        self
    }

    pub fn element(&self, id: &str) -> FakeElement {
        self.elements.borrow().get(id).cloned().unwrap_or_default()
    }

    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.element(id).styles.get(property).cloned()
    }

    pub fn classed(&self, class: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .elements
            .borrow()
            .iter()
            .filter(|(_, el)| el.classes.contains(class))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn with_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut FakeElement) -> T,
    ) -> Result<T, SurfaceError> {
        self.elements
            .borrow_mut()
            .get_mut(id)
            .map(f)
            .ok_or_else(|| SurfaceError::MissingElement { id: id.to_string() })
    }
}

impl Surface for FakeSurface {
    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn text(&self, id: &str) -> Result<String, SurfaceError> {
        self.with_mut(id, |el| el.text.clone())
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), SurfaceError> {
        self.with_mut(id, |el| el.text = text.to_string())
    }

    fn has_class(&self, id: &str, class: &str) -> Result<bool, SurfaceError> {
        self.with_mut(id, |el| el.classes.contains(class))
    }

    fn set_class(&self, id: &str, class: &str, enabled: bool) -> Result<(), SurfaceError> {
        self.with_mut(id, |el| {
            if enabled {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        })
    }

    fn set_class_on_all(&self, marker: &str, class: &str, enabled: bool) -> Result<(), SurfaceError> {
        for el in self.elements.borrow_mut().values_mut() {
            if !el.classes.contains(marker) {
                continue;
            }
            if enabled {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        }
        Ok(())
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<(), SurfaceError> {
        self.with_mut(id, |el| {
            el.styles.insert(property.to_string(), value.to_string());
        })
    }

    fn set_disabled(&self, id: &str, disabled: bool) -> Result<(), SurfaceError> {
        self.with_mut(id, |el| el.disabled = disabled)
    }

    fn set_canvas_size(&self, id: &str, width: u32, height: u32) -> bool {
        let mut elements = self.elements.borrow_mut();
        match elements.get_mut(id) {
            Some(el) if el.canvas_size.is_some() => {
                el.canvas_size = Some((width, height));
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Transport / images
// ============================================================================

#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<String, Result<HttpResponse, String>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(
            path.to_string(),
            Ok(HttpResponse { status, body: body.into() }),
        );
        self
    }

    pub fn fail(mut self, path: &str, cause: &str) -> Self {
        self.routes.insert(path.to_string(), Err(cause.to_string()));
        self
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse, String> {
        self.requests.borrow_mut().push(path.to_string());
        self.routes
            .get(path)
            .cloned()
            .unwrap_or(Ok(HttpResponse { status: 404, body: Vec::new() }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeImage {
    pub src: String,
}

#[derive(Default)]
pub struct FakeDecoder {
    broken: HashSet<String>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken(mut self, path: &str) -> Self {
        self.broken.insert(path.to_string());
        self
    }
}

#[async_trait(?Send)]
impl ImageDecoder for FakeDecoder {
    type Image = FakeImage;

    async fn decode(&self, path: &str) -> Result<FakeImage, String> {
        if self.broken.contains(path) {
            return Err(format!("Failed to load image: {}", path));
        }
        Ok(FakeImage { src: path.to_string() })
    }
}

// ============================================================================
// Clipboard / scheduler
// ============================================================================

#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub writes: Rc<RefCell<Vec<String>>>,
    failure: Option<String>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(cause: &str) -> Self {
        Self { failure: Some(cause.to_string()), ..Default::default() }
    }
}

#[async_trait(?Send)]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        if let Some(cause) = &self.failure {
            return Err(cause.clone());
        }
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Records delayed tasks; tests fire them explicitly instead of sleeping
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Rc<RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Runs every pending task in scheduling order
    pub fn fire_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay, task));
    }
}

// ============================================================================
// Wasm host
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeInstance {
    pub module: String,
}

#[derive(Default)]
pub struct FakeHost {
    failing: Option<BootStage>,
    observed: Option<Rc<Cell<BootState>>>,
    pub calls: RefCell<Vec<String>>,
    /// Bootstrap state at each host call, when observing
    pub seen: RefCell<Vec<BootState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(stage: BootStage) -> Self {
        Self { failing: Some(stage), ..Default::default() }
    }

    pub fn observing(mut self, state: Rc<Cell<BootState>>) -> Self {
        self.observed = Some(state);
        self
    }

    fn step(&self, stage: BootStage, call: String) -> Result<(), String> {
        self.calls.borrow_mut().push(call);
        if let Some(state) = &self.observed {
            self.seen.borrow_mut().push(state.get());
        }
        if self.failing == Some(stage) {
            return Err(format!("{} exploded", stage));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl WasmHost for FakeHost {
    type Response = String;
    type Instance = FakeInstance;

    async fn fetch(&self, path: &str) -> Result<String, String> {
        self.step(BootStage::Fetch, format!("fetch {}", path))?;
        Ok(path.to_string())
    }

    async fn instantiate(&self, response: String) -> Result<FakeInstance, String> {
        self.step(BootStage::Instantiate, format!("instantiate {}", response))?;
        Ok(FakeInstance { module: response })
    }

    async fn start(&self, instance: &FakeInstance) -> Result<(), String> {
        self.step(BootStage::Start, format!("start {}", instance.module))
    }
}
