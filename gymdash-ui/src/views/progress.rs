use chrono::NaiveDate;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::bootstrap::{hide_modal, show_modal};
use crate::dom::{by_id, data, on, query, query_all, set_value, value, value_of, DomProgressBoard};
use gymdash::progress::{
    DayEdit, Indicator, NutritionStatus, ProgressBoard, ProgressTracker, WorkoutStatus,
};
use gymdash::ViewController;

const EDIT_MODAL_ID: &str = "editDayModal";

pub fn init(controller: &ViewController) {
    let tracker = Rc::new(ProgressTracker::new(
        controller.api().clone(),
        Rc::new(DomProgressBoard),
    ));

    for indicator in [Indicator::Workout, Indicator::Nutrition] {
        for element in query_all(&format!(".{}", indicator.css_class())) {
            let tracker = tracker.clone();
            let clicked = element.clone();
            on(&element, "click", move |_| {
                let Some(date) = column_date(&clicked) else {
                    return;
                };
                let tracker = tracker.clone();
                spawn_local(async move {
                    tracker.cycle(date, indicator).await;
                });
            });
        }
    }

    for button in query_all(".note-btn") {
        let clicked = button.clone();
        on(&button, "click", move |_| open_editor(&clicked));
    }

    if let Some(save) = by_id("save-day-btn") {
        on(&save, "click", move |_| {
            let Some(edit) = read_editor() else {
                return;
            };
            let tracker = tracker.clone();
            spawn_local(async move {
                tracker.save_day(&edit).await;
            });
            hide_modal(EDIT_MODAL_ID);
        });
    }
}

fn column_date(element: &Element) -> Option<NaiveDate> {
    let column = element.closest(".day-column").ok().flatten()?;
    data(&column, "date")?.parse().ok()
}

/// Pre-fill the "edit day" modal from a note button and its column
fn open_editor(button: &Element) {
    let Some(date) = data(button, "date") else {
        return;
    };
    if let Some(field) = by_id("edit-date") {
        set_value(&field, &date);
    }
    if let Some(field) = by_id("day-notes") {
        set_value(&field, &data(button, "notes").unwrap_or_default());
    }

    let day = date
        .parse::<NaiveDate>()
        .ok()
        .and_then(|date| DomProgressBoard.day(date));
    if let Some(day) = day {
        check(&format!("workout-{}", day.workout));
        check(&format!("nutrition-{}", day.nutrition));
    }

    show_modal(EDIT_MODAL_ID);
}

fn check(id: &str) {
    if let Some(radio) = by_id(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
        radio.set_checked(true);
    }
}

fn checked(name: &str) -> Option<String> {
    let selected = query(&format!("input[name='{}']:checked", name))?;
    Some(value(&selected))
}

fn read_editor() -> Option<DayEdit> {
    let date = value_of("edit-date").parse().ok()?;
    Some(DayEdit {
        date,
        workout: checked("workout-status").map(|v| WorkoutStatus::from_attr(&v)),
        nutrition: checked("nutrition-status").map(|v| NutritionStatus::from_attr(&v)),
        notes: value_of("day-notes"),
    })
}
