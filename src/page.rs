//! In-memory page
//!
//! A headless stand-in for the dashboard document. It implements every page
//! seam so the controllers can run outside a browser, which is how the
//! terminal client and the test suite drive them.

use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::api::Streaks;
use crate::chat::{Bubble, BubbleId, ChatWindow};
use crate::progress::{DayStatus, NutritionStatus, ProgressBoard, WorkoutStatus};
use crate::view::Surface;

/// Visible mutation of the view shell, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    EntryActivated(String),
    ContentHidden,
    ContentShown,
    ContentReplaced,
    LoaderShown(String),
    LoaderHidden,
    UrlReplaced(String),
}

#[derive(Debug, Default)]
struct PageState {
    url: String,
    active_entry: Option<String>,
    content: String,
    content_visible: bool,
    loader: Option<String>,
    events: Vec<PageEvent>,

    bubbles: Vec<Bubble>,
    chat_input: String,

    days: BTreeMap<NaiveDate, DayStatus>,
    streaks: Option<Streaks>,
    notes: BTreeMap<NaiveDate, String>,
}

#[derive(Debug)]
pub struct MemoryPage {
    state: RefCell<PageState>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Page at the canonical dashboard address
    pub fn new() -> Self {
        Self::with_url(crate::view::CANONICAL_PATH)
    }

    /// Page loaded from `url` (path plus optional query)
    pub fn with_url(url: &str) -> Self {
        Self {
            state: RefCell::new(PageState {
                url: url.to_string(),
                content_visible: true,
                ..Default::default()
            }),
        }
    }

    pub fn url(&self) -> String {
        self.state.borrow().url.clone()
    }

    pub fn content(&self) -> String {
        self.state.borrow().content.clone()
    }

    pub fn is_content_visible(&self) -> bool {
        self.state.borrow().content_visible
    }

    pub fn is_loader_visible(&self) -> bool {
        self.state.borrow().loader.is_some()
    }

    /// Message of the loader, while it is up
    pub fn loader_message(&self) -> Option<String> {
        self.state.borrow().loader.clone()
    }

    /// Selector of the highlighted navigation entry
    pub fn active_entry(&self) -> Option<String> {
        self.state.borrow().active_entry.clone()
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.state.borrow().events.clone()
    }

    pub fn bubbles(&self) -> Vec<Bubble> {
        self.state.borrow().bubbles.clone()
    }

    pub fn set_chat_input(&self, text: &str) {
        self.state.borrow_mut().chat_input = text.to_string();
    }

    pub fn chat_input(&self) -> String {
        self.state.borrow().chat_input.clone()
    }

    /// Add (or reset) a progress column
    pub fn add_day(&self, date: NaiveDate, workout: WorkoutStatus, nutrition: NutritionStatus) {
        self.state.borrow_mut().days.insert(
            date,
            DayStatus {
                date,
                workout,
                nutrition,
            },
        );
    }

    /// Last streaks rendered
    pub fn streaks(&self) -> Option<Streaks> {
        self.state.borrow().streaks
    }

    pub fn note(&self, date: NaiveDate) -> Option<String> {
        self.state.borrow().notes.get(&date).cloned()
    }

    fn record(&self, event: PageEvent) {
        tracing::trace!(?event, "Page event");
        self.state.borrow_mut().events.push(event);
    }
}

impl Surface for MemoryPage {
    fn set_active_entry(&self, selector: &str) {
        self.state.borrow_mut().active_entry = Some(selector.to_string());
        self.record(PageEvent::EntryActivated(selector.to_string()));
    }

    fn set_content_visible(&self, visible: bool) {
        self.state.borrow_mut().content_visible = visible;
        self.record(if visible {
            PageEvent::ContentShown
        } else {
            PageEvent::ContentHidden
        });
    }

    fn replace_content(&self, markup: &str) {
        self.state.borrow_mut().content = markup.to_string();
        self.record(PageEvent::ContentReplaced);
    }

    fn show_loader(&self, message: &str) {
        self.state.borrow_mut().loader = Some(message.to_string());
        self.record(PageEvent::LoaderShown(message.to_string()));
    }

    fn hide_loader(&self) {
        self.state.borrow_mut().loader = None;
        self.record(PageEvent::LoaderHidden);
    }

    fn query_param(&self, name: &str) -> Option<String> {
        let url = self.state.borrow().url.clone();
        let (_, query) = url.split_once('?')?;
        let query = query.split('#').next().unwrap_or_default();

        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if decode_component(key) == name {
                Some(decode_component(value))
            } else {
                None
            }
        })
    }

    fn replace_url(&self, url: &str) {
        self.state.borrow_mut().url = url.to_string();
        self.record(PageEvent::UrlReplaced(url.to_string()));
    }
}

impl ChatWindow for MemoryPage {
    fn append_bubble(&self, bubble: &Bubble) {
        self.state.borrow_mut().bubbles.push(bubble.clone());
    }

    fn remove_bubble(&self, id: BubbleId) {
        self.state.borrow_mut().bubbles.retain(|b| b.id != id);
    }

    fn clear_input(&self) {
        self.state.borrow_mut().chat_input.clear();
    }

    fn scroll_to_bottom(&self) {}
}

impl ProgressBoard for MemoryPage {
    fn day(&self, date: NaiveDate) -> Option<DayStatus> {
        self.state.borrow().days.get(&date).copied()
    }

    fn show_workout(&self, date: NaiveDate, status: WorkoutStatus) {
        if let Some(day) = self.state.borrow_mut().days.get_mut(&date) {
            day.workout = status;
        }
    }

    fn show_nutrition(&self, date: NaiveDate, status: NutritionStatus) {
        if let Some(day) = self.state.borrow_mut().days.get_mut(&date) {
            day.nutrition = status;
        }
    }

    fn show_streaks(&self, streaks: &Streaks) {
        self.state.borrow_mut().streaks = Some(*streaks);
    }

    fn show_note(&self, date: NaiveDate, notes: &str) {
        self.state.borrow_mut().notes.insert(date, notes.to_string());
    }
}

/// Form-encoded query component: `+` is a space, then percent-decoding
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param() {
        let page = MemoryPage::with_url("/dashboard/?tab=%2Fphoto-locker&x=a+b#top");
        assert_eq!(page.query_param("tab").as_deref(), Some("/photo-locker"));
        assert_eq!(page.query_param("x").as_deref(), Some("a b"));
        assert_eq!(page.query_param("missing"), None);

        assert_eq!(MemoryPage::new().query_param("tab"), None);
        assert_eq!(
            MemoryPage::with_url("/dashboard/?tab").query_param("tab").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_surface_records_events() {
        let page = MemoryPage::new();
        page.show_loader("Loading...");
        assert_eq!(page.loader_message().as_deref(), Some("Loading..."));
        page.hide_loader();
        page.replace_url("/dashboard/");

        assert_eq!(
            page.events(),
            vec![
                PageEvent::LoaderShown("Loading...".to_string()),
                PageEvent::LoaderHidden,
                PageEvent::UrlReplaced("/dashboard/".to_string()),
            ]
        );
        assert!(!page.is_loader_visible());
    }

    #[test]
    fn test_board_ignores_unknown_days() {
        let page = MemoryPage::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        page.show_workout(date, WorkoutStatus::Done);
        assert!(page.day(date).is_none());

        page.add_day(date, WorkoutStatus::Rest, NutritionStatus::None);
        page.show_workout(date, WorkoutStatus::Done);
        assert_eq!(page.day(date).unwrap().workout, WorkoutStatus::Done);
    }
}
