//! DOM bindings
//!
//! Helpers over `web-sys` plus the implementations of the library's page seams
//! against the real document.

use chrono::NaiveDate;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement,
};

use gymdash::chat::{Bubble, BubbleContent, BubbleId, ChatWindow};
use gymdash::progress::{
    streak_cards, DayStatus, Indicator, NutritionStatus, ProgressBoard, WorkoutStatus,
};
use gymdash::{Streaks, Surface};

// ============ Helpers ============

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.query_selector_all(selector).ok())
        .map(|list| {
            (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// First descendant of `root` matching `selector`
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Attach a listener for the life of the element
pub fn on(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        web_sys::console::error_1(&e);
    }
    closure.forget();
}

/// Attach a listener that the browser drops after its first call
pub fn once(target: &Element, event: &str, handler: impl FnOnce(Event) + 'static) {
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(handler);
    if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.unchecked_ref(),
        &options,
    ) {
        web_sys::console::error_1(&e);
    }
}

pub fn data(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", name))
}

/// Value of an `<input>` or `<textarea>`
pub fn value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_value(element: &Element, text: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(text);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(text);
    }
}

pub fn value_of(id: &str) -> String {
    by_id(id).map(|el| value(&el)).unwrap_or_default()
}

pub fn focus(element: &Element) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.focus();
    }
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

/// Dim an element briefly as click feedback
pub fn flash(element: &Element) {
    set_style(element, "opacity", "0.5");
    let element = element.clone();
    Timeout::new(200, move || set_style(&element, "opacity", "1")).forget();
}

// ============ View shell ============

/// Sidebar, content region and loader overlay of the dashboard page
pub struct DomSurface {
    content: Element,
    loader: Element,
    links: Vec<Element>,
}

impl DomSurface {
    /// `None` when the page is not the dashboard shell
    pub fn from_document() -> Option<Self> {
        Some(Self {
            content: by_id("content-area")?,
            loader: by_id("loader-overlay")?,
            links: query_all("#sidebar a"),
        })
    }

    pub fn links(&self) -> &[Element] {
        &self.links
    }
}

impl Surface for DomSurface {
    fn set_active_entry(&self, selector: &str) {
        for link in &self.links {
            let active = data(link, "view").as_deref() == Some(selector);
            let _ = link.class_list().toggle_with_force("active", active);
        }
    }

    fn set_content_visible(&self, visible: bool) {
        let _ = self.content.class_list().toggle_with_force("d-none", !visible);
    }

    fn replace_content(&self, markup: &str) {
        self.content.set_inner_html(markup);
    }

    fn show_loader(&self, message: &str) {
        if let Some(text) = query_in(&self.loader, "p") {
            text.set_text_content(Some(message));
        }
        let _ = self.loader.class_list().remove_1("d-none");
        set_style(&self.loader, "opacity", "1");
    }

    fn hide_loader(&self) {
        set_style(&self.loader, "opacity", "0");

        // Fade out, unless a new transition raised it again meanwhile
        let loader = self.loader.clone();
        Timeout::new(400, move || {
            let faded = loader
                .dyn_ref::<HtmlElement>()
                .and_then(|el| el.style().get_property_value("opacity").ok())
                .is_some_and(|opacity| opacity == "0");
            if faded {
                let _ = loader.class_list().add_1("d-none");
            }
        })
        .forget();
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let search = web_sys::window()?.location().search().ok()?;
        web_sys::UrlSearchParams::new_with_str(&search)
            .ok()?
            .get(name)
    }

    fn replace_url(&self, url: &str) {
        let history = web_sys::window().and_then(|w| w.history().ok());
        if let Some(history) = history {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

// ============ Chat ============

pub struct DomChatWindow {
    window: Element,
    input: Element,
}

impl DomChatWindow {
    pub fn from_document() -> Option<Self> {
        Some(Self {
            window: by_id("chat-window")?,
            input: by_id("chat-input")?,
        })
    }

    pub fn input(&self) -> &Element {
        &self.input
    }
}

impl ChatWindow for DomChatWindow {
    fn append_bubble(&self, bubble: &Bubble) {
        let Some(doc) = document() else { return };
        let Ok(div) = doc.create_element("div") else { return };

        div.set_class_name(&format!("bubble {}", bubble.sender.css_class()));
        let _ = div.set_attribute("data-bubble-id", &bubble.id.0.to_string());
        match &bubble.content {
            BubbleContent::Text(text) => div.set_text_content(Some(text)),
            BubbleContent::Markup(html) => div.set_inner_html(html),
        }
        let _ = self.window.append_child(&div);
    }

    fn remove_bubble(&self, id: BubbleId) {
        if let Some(el) = query_in(&self.window, &format!("[data-bubble-id=\"{}\"]", id.0)) {
            el.remove();
        }
    }

    fn clear_input(&self) {
        set_value(&self.input, "");
    }

    fn scroll_to_bottom(&self) {
        self.window.set_scroll_top(self.window.scroll_height());
    }
}

// ============ Progress ============

/// Day columns, streak cards and note buttons of the progress view
pub struct DomProgressBoard;

impl DomProgressBoard {
    fn column(date: NaiveDate) -> Option<Element> {
        query(&format!(".day-column[data-date=\"{}\"]", date))
    }

    fn indicator(date: NaiveDate, indicator: Indicator) -> Option<Element> {
        query_in(&Self::column(date)?, &format!(".{}", indicator.css_class()))
    }

    fn render(indicator: &Element, status: &str, icon_classes: &[&str]) {
        let _ = indicator.set_attribute("data-status", status);
        let Some(icon) = query_in(indicator, ".status-icon") else {
            return;
        };

        icon.set_class_name("status-icon bi");
        for class in icon_classes.iter().chain(["pulse"].iter()) {
            let _ = icon.class_list().add_1(class);
        }
        Timeout::new(300, move || {
            let _ = icon.class_list().remove_1("pulse");
        })
        .forget();
    }
}

impl ProgressBoard for DomProgressBoard {
    fn day(&self, date: NaiveDate) -> Option<DayStatus> {
        let column = Self::column(date)?;
        let status = |indicator: Indicator| {
            query_in(&column, &format!(".{}", indicator.css_class()))
                .and_then(|el| data(&el, "status"))
                .unwrap_or_default()
        };

        Some(DayStatus {
            date,
            workout: WorkoutStatus::from_attr(&status(Indicator::Workout)),
            nutrition: NutritionStatus::from_attr(&status(Indicator::Nutrition)),
        })
    }

    fn show_workout(&self, date: NaiveDate, status: WorkoutStatus) {
        if let Some(el) = Self::indicator(date, Indicator::Workout) {
            Self::render(&el, status.as_str(), status.icon_classes());
        }
    }

    fn show_nutrition(&self, date: NaiveDate, status: NutritionStatus) {
        if let Some(el) = Self::indicator(date, Indicator::Nutrition) {
            Self::render(&el, status.as_str(), status.icon_classes());
        }
    }

    fn show_streaks(&self, streaks: &Streaks) {
        let cards = query_all(".streak-card");
        if cards.len() < 3 {
            return;
        }
        let Some(doc) = document() else { return };

        for (card, streak) in cards.iter().zip(streak_cards(streaks)) {
            if let Some(value) = query_in(card, ".streak-value") {
                value.set_inner_html("");
                let count = doc.create_text_node(&format!("{} ", streak.days));
                let _ = value.append_child(&count);
                if let Ok(unit) = doc.create_element("span") {
                    unit.set_class_name("streak-unit");
                    unit.set_text_content(Some("days"));
                    let _ = value.append_child(&unit);
                }
            }
            if let Some(best) = query_in(card, ".streak-best") {
                best.set_text_content(Some(&streak.best));
            }
        }
    }

    fn show_note(&self, date: NaiveDate, notes: &str) {
        if let Some(button) = query(&format!(".note-btn[data-date=\"{}\"]", date)) {
            let _ = button.set_attribute("data-notes", notes);
            let _ = button.set_attribute("title", notes);
            let _ = button.class_list().toggle_with_force("has-note", !notes.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_once_listener_fires_a_single_time() {
        let element = document().unwrap().create_element("div").unwrap();
        let calls = Rc::new(Cell::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            once(&element, "shown.bs.modal", move |_| calls.set(calls.get() + 1));
        }
        for _ in 0..3 {
            let event = Event::new("shown.bs.modal").unwrap();
            element.dispatch_event(&event).unwrap();
        }

        // One call per registration, not one per dispatch
        assert_eq!(calls.get(), 2);
    }
}
