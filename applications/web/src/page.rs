//! DOM backend for the control surface

use crate::{error::describe, events::EventListener};
use keepsake_playback::{Page, Result, SessionError};
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

pub struct DomPage {
    document: Document,
    /// Click listeners with the element they are attached to
    handlers: Vec<(Element, EventListener)>,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            handlers: Vec::new(),
        }
    }
}

fn render_error(e: &wasm_bindgen::JsValue) -> SessionError {
    SessionError::Render(describe(e))
}

impl Page for DomPage {
    type Node = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(e) => {
                warn!(selector, error = %describe(&e), "Invalid selector");
                Vec::new()
            }
        }
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_element(&mut self, tag: &str) -> Result<Element> {
        self.document.create_element(tag).map_err(|e| render_error(&e))
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<()> {
        node.set_attribute(name, value).map_err(|e| render_error(&e))
    }

    fn set_inner_html(&mut self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| render_error(&e))
    }

    fn remove(&mut self, node: &Element) {
        // Dropping a listener detaches it
        self.handlers
            .retain(|(owner, _)| !node.contains(Some(owner.as_ref())));
        node.remove();
    }

    fn on_activate(&mut self, node: &Element, handler: Rc<dyn Fn()>) -> Result<()> {
        let listener = EventListener::new(node.as_ref(), "click", move |_| handler())
            .map_err(|e| SessionError::Render(e.to_string()))?;
        self.handlers.push((node.clone(), listener));
        Ok(())
    }
}
