//! Bootstrap 5 modal bindings
//!
//! The page loads Bootstrap's bundle globally; only the modal API is used.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Modal;

    #[wasm_bindgen(static_method_of = Modal, js_namespace = bootstrap, js_name = getOrCreateInstance)]
    pub fn get_or_create_instance(element: &Element) -> Modal;

    #[wasm_bindgen(method)]
    pub fn show(this: &Modal);

    #[wasm_bindgen(method)]
    pub fn hide(this: &Modal);
}

/// Show the modal with this element id, if present
pub fn show_modal(id: &str) {
    if let Some(element) = crate::dom::by_id(id) {
        Modal::get_or_create_instance(&element).show();
    }
}

pub fn hide_modal(id: &str) {
    if let Some(element) = crate::dom::by_id(id) {
        Modal::get_or_create_instance(&element).hide();
    }
}
