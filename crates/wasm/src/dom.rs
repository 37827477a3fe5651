//! `Surface` over the page's DOM

use bootkit_core::{Surface, SurfaceError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlElement};

use crate::js_message;

#[derive(Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Result<Element, SurfaceError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| SurfaceError::MissingElement { id: id.to_string() })
    }

    fn html_element(&self, id: &str) -> Result<HtmlElement, SurfaceError> {
        self.element(id)?.dyn_into::<HtmlElement>().map_err(|_| SurfaceError::Rejected {
            id: id.to_string(),
            cause: "not an HTML element".to_string(),
        })
    }
}

fn rejected(id: &str, err: wasm_bindgen::JsValue) -> SurfaceError {
    SurfaceError::Rejected { id: id.to_string(), cause: js_message(&err) }
}

impl Surface for DomSurface {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn text(&self, id: &str) -> Result<String, SurfaceError> {
        Ok(self.element(id)?.text_content().unwrap_or_default())
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), SurfaceError> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn has_class(&self, id: &str, class: &str) -> Result<bool, SurfaceError> {
        Ok(self.element(id)?.class_list().contains(class))
    }

    fn set_class(&self, id: &str, class: &str, enabled: bool) -> Result<(), SurfaceError> {
        self.element(id)?
            .class_list()
            .toggle_with_force(class, enabled)
            .map(|_| ())
            .map_err(|e| rejected(id, e))
    }

    fn set_class_on_all(&self, marker: &str, class: &str, enabled: bool) -> Result<(), SurfaceError> {
        let marked = self.document.get_elements_by_class_name(marker);
        for element in (0..marked.length()).filter_map(|i| marked.item(i)) {
            element
                .class_list()
                .toggle_with_force(class, enabled)
                .map_err(|e| rejected(&element.id(), e))?;
        }
        Ok(())
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<(), SurfaceError> {
        self.html_element(id)?
            .style()
            .set_property(property, value)
            .map_err(|e| rejected(id, e))
    }

    fn set_disabled(&self, id: &str, disabled: bool) -> Result<(), SurfaceError> {
        let element = self.element(id)?;
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
            return Ok(());
        }
        // Anything else carries the attribute
        let result = if disabled {
            element.set_attribute("disabled", "")
        } else {
            element.remove_attribute("disabled")
        };
        result.map_err(|e| rejected(id, e))
    }

    fn set_canvas_size(&self, id: &str, width: u32, height: u32) -> bool {
        let Some(canvas) = self
            .document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            return false;
        };
        canvas.set_width(width);
        canvas.set_height(height);
        true
    }
}
