use wasm_bindgen_futures::spawn_local;

use super::meals::fill_from_card;
use crate::bootstrap::show_modal;
use crate::dom::{on, query, query_in};
use gymdash::ViewController;

pub fn init(controller: &ViewController) {
    let Some(card) = query(".overview-nutrition-card") else {
        return;
    };

    if let Some(link) = query_in(&card, ".overview-nutrition-link") {
        let controller = controller.clone();
        on(&link, "click", move |event| {
            event.stop_propagation();
            event.prevent_default();
            let controller = controller.clone();
            spawn_local(async move {
                controller.go_to_tab("nutrition").await;
            });
        });
    }

    let clicked = card.clone();
    on(&card, "click", move |_| {
        if fill_from_card(&clicked, false) {
            show_modal("mealModal");
        }
    });
}
