//! Platform abstraction layer
//!
//! Startup errors shared by both targets, plus DOM helpers for the web build.

use thiserror::Error;

/// Failures while bringing up the host
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    MissingWindow,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("element #{0} has the wrong type")]
    WrongElementType(String),
    #[error("graphics setup failed: {0}")]
    Gpu(String),
}

#[cfg(target_arch = "wasm32")]
pub mod dom {
    //! Thin wrappers over the page's fixed element ids

    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element};

    use super::PlatformError;

    pub fn document() -> Result<Document, PlatformError> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or(PlatformError::MissingWindow)
    }

    pub fn element(id: &str) -> Result<Element, PlatformError> {
        document()?
            .get_element_by_id(id)
            .ok_or_else(|| PlatformError::MissingElement(id.to_string()))
    }

    /// Element by id, cast to a concrete DOM type
    pub fn element_as<T: JsCast>(id: &str) -> Result<T, PlatformError> {
        element(id)?
            .dyn_into::<T>()
            .map_err(|_| PlatformError::WrongElementType(id.to_string()))
    }

    /// Set an element's text; missing elements are skipped
    pub fn set_text(id: &str, text: &str) {
        if let Ok(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle the `hidden` class
    pub fn set_visible(id: &str, visible: bool) {
        if let Ok(el) = element(id) {
            let class = if visible { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }
}
