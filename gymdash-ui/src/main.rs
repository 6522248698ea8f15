//! GymAI Dashboard
//!
//! Browser entry point of the dashboard interaction layer (WASM).
//!
//! # Architecture
//!
//! The page shell and every section are rendered by the server. This crate
//! binds the sidebar to the view controller, fetches sections through the
//! browser's `fetch`, and re-binds each section's listeners after it is
//! swapped in. The profile setup page gets its wizard and schedule grid.

use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

mod bootstrap;
mod dom;
mod fetch;
mod views;

use dom::{data, on, DomSurface};
use fetch::FetchTransport;
use gymdash::ViewController;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    if dom::by_id("schedule-grid").is_some() || dom::query(".step").is_some() {
        views::profile::init();
    }

    let Some(surface) = DomSurface::from_document() else {
        return;
    };
    let links = surface.links().to_vec();

    let controller = ViewController::new(
        Rc::new(views::registry()),
        Rc::new(FetchTransport::new()),
        Rc::new(surface),
    );

    for link in links {
        let controller = controller.clone();
        let clicked = link.clone();
        on(&link, "click", move |event| {
            event.prevent_default();
            let Some(view) = data(&clicked, "view") else {
                return;
            };
            let controller = controller.clone();
            spawn_local(async move {
                controller.select_view(&view).await;
            });
        });
    }

    spawn_local(async move {
        controller.deep_link_on_load().await;
    });
}
