//! Profile setup page: step wizard, goal cards and availability grid.
//!
//! Not a dashboard view; the page is standalone and initialized on load.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{by_id, data, document, on, query, query_all, query_in, set_value, value};
use gymdash::schedule::{block_key, cell_title, hour_label, WeeklySchedule, Wizard, BLOCK_HOURS, GRID_DAYS};

pub fn init() {
    init_wizard();
    init_goal_cards();
    init_schedule_grid();
}

fn init_wizard() {
    let steps = query_all(".step");
    if steps.is_empty() {
        return;
    }
    let wizard = Rc::new(Cell::new(Wizard::new(steps.len())));
    let steps = Rc::new(steps);

    let show = {
        let steps = steps.clone();
        move |step: usize| {
            for el in steps.iter() {
                let current = data(el, "step").and_then(|s| s.parse().ok()) == Some(step);
                let _ = el.class_list().toggle_with_force("d-none", !current);
            }
        }
    };

    for button in query_all(".next-step") {
        let wizard = wizard.clone();
        let show = show.clone();
        on(&button, "click", move |_| {
            let mut w = wizard.get();
            show(w.next());
            wizard.set(w);
        });
    }
    for button in query_all(".prev-step") {
        let wizard = wizard.clone();
        let show = show.clone();
        on(&button, "click", move |_| {
            let mut w = wizard.get();
            show(w.prev());
            wizard.set(w);
        });
    }
}

fn radio_in(card: &Element) -> Option<HtmlInputElement> {
    query_in(card, "input[type=\"radio\"]")?.dyn_into().ok()
}

fn init_goal_cards() {
    let cards = Rc::new(query_all(".goal-card"));

    for card in cards.iter() {
        let cards = cards.clone();
        let clicked = card.clone();
        on(card, "click", move |_| {
            let Some(radio) = radio_in(&clicked) else {
                return;
            };
            radio.set_checked(true);
            for c in cards.iter() {
                let _ = c.class_list().remove_1("selected");
            }
            let _ = clicked.class_list().add_1("selected");
        });
    }

    let preselected = query(".goal-card input[type=\"radio\"]:checked")
        .and_then(|radio| radio.closest(".goal-card").ok().flatten());
    if let Some(card) = preselected {
        let _ = card.class_list().add_1("selected");
    }
}

fn init_schedule_grid() {
    let (Some(grid), Some(input)) = (by_id("schedule-grid"), query("input[name='schedule']")) else {
        return;
    };
    let Some(doc) = document() else { return };

    let schedule = Rc::new(RefCell::new(WeeklySchedule::from_json(&value(&input))));

    let append = |class: &str, text: &str| -> Option<Element> {
        let el = doc.create_element("div").ok()?;
        el.set_class_name(class);
        el.set_text_content(Some(text));
        grid.append_child(&el).ok()?;
        Some(el)
    };

    // Header row, blank corner first
    append("day-label", "");
    for hour in BLOCK_HOURS {
        append("time-header", &hour_label(hour));
    }

    for day in GRID_DAYS {
        append("day-label", day);

        for hour in BLOCK_HOURS {
            let Some(cell) = append("time-slot", "") else {
                continue;
            };
            let _ = cell.set_attribute("data-day", &day.to_lowercase());
            let _ = cell.set_attribute("data-hour", &hour.to_string());
            let _ = cell.set_attribute("data-block", &block_key(hour));
            let _ = cell.set_attribute("title", &cell_title(day, hour));
            if schedule.borrow().is_busy(day, hour) {
                let _ = cell.class_list().add_1("busy");
            }

            let schedule = schedule.clone();
            let input = input.clone();
            let clicked = cell.clone();
            on(&cell, "click", move |_| {
                let busy = schedule.borrow_mut().toggle(day, hour);
                let _ = clicked.class_list().toggle_with_force("busy", busy);
                set_value(&input, &schedule.borrow().to_json());
            });
        }
    }
}
