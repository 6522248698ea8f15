//! Meal modal filling shared by the overview and nutrition views

use web_sys::Element;

use crate::dom::{by_id, data};
use gymdash::meals::{modal_title, parse_meals, render_meal_details};

/// Fill the meal modal from a day card. Returns false when the card's meal
/// data is missing or unreadable.
pub fn fill_from_card(card: &Element, with_notes: bool) -> bool {
    let (Some(label), Some(details)) = (by_id("mealModalLabel"), by_id("meal-details")) else {
        return false;
    };
    let Some(script) = data(card, "meals-id").and_then(|id| by_id(&id)) else {
        return false;
    };

    let json = script.text_content().unwrap_or_default();
    let meals = match parse_meals(&json) {
        Ok(meals) => meals,
        Err(e) => {
            web_sys::console::error_1(&format!("Unreadable meal data: {}", e).into());
            return false;
        }
    };

    let day = data(card, "day").unwrap_or_default();
    let calories = data(card, "calories").unwrap_or_default();
    let notes = if with_notes { data(card, "notes") } else { None };

    label.set_text_content(Some(&modal_title(&day, &calories)));
    details.set_inner_html(&render_meal_details(&meals, notes.as_deref()));
    true
}
