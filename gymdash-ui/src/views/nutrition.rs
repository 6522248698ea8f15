use wasm_bindgen_futures::spawn_local;

use super::meals::fill_from_card;
use crate::dom::{by_id, on, query_all};
use gymdash::ViewController;

pub fn init(controller: &ViewController) {
    if by_id("mealModalLabel").is_none() || by_id("meal-details").is_none() {
        return;
    }

    // Cards open the modal through data-bs-toggle; only the body is filled here
    for card in query_all(".day-card") {
        let clicked = card.clone();
        on(&card, "click", move |_| {
            fill_from_card(&clicked, true);
        });
    }

    if let Some(button) = by_id("generate-mealplan-btn") {
        let controller = controller.clone();
        on(&button, "click", move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.regenerate_meal_plan().await;
            });
        });
    }
}
