//! Progress Indicators
//!
//! Each day column on the progress view has a workout and a nutrition
//! indicator. Clicking one advances it through a fixed cycle and posts both of
//! the day's statuses; the board then shows whatever the server stored, along
//! with the server's recomputed streaks. Streaks are never computed here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use crate::api::{DashboardApi, NoteUpdate, ProgressUpdate, Streaks};

/// Workout status of a day. Unrecognised values read as `Missed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Done,
    Rest,
    #[serde(other)]
    Missed,
}

impl WorkoutStatus {
    /// done → rest → missed → done
    pub fn next(self) -> Self {
        match self {
            Self::Done => Self::Rest,
            Self::Rest => Self::Missed,
            Self::Missed => Self::Done,
        }
    }

    /// Read a `data-status` attribute
    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "done" => Self::Done,
            "rest" => Self::Rest,
            _ => Self::Missed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Rest => "rest",
            Self::Missed => "missed",
        }
    }

    /// Bootstrap icon classes, on top of `status-icon bi`
    pub fn icon_classes(&self) -> &'static [&'static str] {
        match self {
            Self::Done => &["bi-check-circle-fill", "text-success"],
            Self::Rest => &["bi-circle", "text-secondary"],
            Self::Missed => &["bi-x-circle-fill", "text-danger"],
        }
    }
}

/// Nutrition status of a day. Unrecognised values read as `Missed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutritionStatus {
    Hit,
    None,
    #[serde(other)]
    Missed,
}

impl NutritionStatus {
    /// hit → none → missed → hit
    pub fn next(self) -> Self {
        match self {
            Self::Hit => Self::None,
            Self::None => Self::Missed,
            Self::Missed => Self::Hit,
        }
    }

    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "hit" => Self::Hit,
            "none" => Self::None,
            _ => Self::Missed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::None => "none",
            Self::Missed => "missed",
        }
    }

    pub fn icon_classes(&self) -> &'static [&'static str] {
        match self {
            Self::Hit => &["bi-droplet-fill", "text-success"],
            Self::None => &["bi-circle", "text-secondary"],
            Self::Missed => &["bi-droplet-half", "text-danger"],
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NutritionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which indicator of a day column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Workout,
    Nutrition,
}

impl Indicator {
    /// Class of the indicator element, e.g. `workout-indicator`
    pub fn css_class(&self) -> &'static str {
        match self {
            Indicator::Workout => "workout-indicator",
            Indicator::Nutrition => "nutrition-indicator",
        }
    }
}

/// Statuses currently shown for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub workout: WorkoutStatus,
    pub nutrition: NutritionStatus,
}

/// Text for one streak card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakCard {
    pub days: u32,
    /// e.g. "4 days"
    pub current: String,
    /// e.g. "Best: 12"
    pub best: String,
}

/// Workout, nutrition and overall cards, in page order
pub fn streak_cards(streaks: &Streaks) -> [StreakCard; 3] {
    let card = |current: u32, best: u32| StreakCard {
        days: current,
        current: format!("{} days", current),
        best: format!("Best: {}", best),
    };
    [
        card(streaks.workout_current, streaks.workout_best),
        card(streaks.nutrition_current, streaks.nutrition_best),
        card(streaks.overall_current, streaks.overall_best),
    ]
}

/// The progress view's day columns, streak cards and note buttons
pub trait ProgressBoard {
    /// Statuses shown for `date`, if the column exists
    fn day(&self, date: NaiveDate) -> Option<DayStatus>;

    fn show_workout(&self, date: NaiveDate, status: WorkoutStatus);

    fn show_nutrition(&self, date: NaiveDate, status: NutritionStatus);

    fn show_streaks(&self, streaks: &Streaks);

    fn show_note(&self, date: NaiveDate, notes: &str);
}

/// How a save ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Server accepted; board updated from its reply
    Rendered,
    /// Server answered without `success`; board untouched
    Rejected,
    /// Request failed; board untouched
    Failed,
    /// No column for that date
    NoSuchDay,
}

/// Values from the "edit day" modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEdit {
    pub date: NaiveDate,
    /// Unchecked radio group means `missed`
    pub workout: Option<WorkoutStatus>,
    /// Unchecked radio group means `none`
    pub nutrition: Option<NutritionStatus>,
    pub notes: String,
}

/// Drives the progress board
pub struct ProgressTracker {
    api: DashboardApi,
    board: Rc<dyn ProgressBoard>,
}

impl ProgressTracker {
    pub fn new(api: DashboardApi, board: Rc<dyn ProgressBoard>) -> Self {
        Self { api, board }
    }

    /// Click on an indicator: advance it, keep the sibling, save
    pub async fn cycle(&self, date: NaiveDate, indicator: Indicator) -> SaveOutcome {
        let Some(day) = self.board.day(date) else {
            return SaveOutcome::NoSuchDay;
        };

        let (workout, nutrition) = match indicator {
            Indicator::Workout => (day.workout.next(), day.nutrition),
            Indicator::Nutrition => (day.workout, day.nutrition.next()),
        };

        self.save_progress(date, workout, nutrition).await
    }

    /// Post a day's statuses and render the server's answer
    pub async fn save_progress(
        &self,
        date: NaiveDate,
        workout: WorkoutStatus,
        nutrition: NutritionStatus,
    ) -> SaveOutcome {
        let update = ProgressUpdate {
            date,
            workout_status: workout,
            nutrition_status: nutrition,
        };

        let reply = match self.api.update_progress(&update).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(%date, error = %e, "Progress update failed");
                return SaveOutcome::Failed;
            }
        };

        if !reply.success {
            tracing::debug!(%date, error = ?reply.error, "Progress update rejected");
            return SaveOutcome::Rejected;
        }

        if let Some(status) = reply.workout_status {
            self.board.show_workout(date, status);
        }
        if let Some(status) = reply.nutrition_status {
            self.board.show_nutrition(date, status);
        }
        if let Some(streaks) = &reply.streaks {
            self.board.show_streaks(streaks);
        }
        SaveOutcome::Rendered
    }

    /// Post a day's note and reflect the stored text
    pub async fn save_note(&self, date: NaiveDate, notes: &str) -> SaveOutcome {
        let note = NoteUpdate {
            date,
            notes: notes.to_string(),
        };

        match self.api.save_note(&note).await {
            Ok(reply) if reply.success => {
                self.board.show_note(date, &reply.notes);
                SaveOutcome::Rendered
            }
            Ok(_) => SaveOutcome::Rejected,
            Err(e) => {
                tracing::warn!(%date, error = %e, "Saving note failed");
                SaveOutcome::Failed
            }
        }
    }

    /// Save from the "edit day" modal: statuses, then note
    pub async fn save_day(&self, edit: &DayEdit) -> (SaveOutcome, SaveOutcome) {
        let workout = edit.workout.unwrap_or(WorkoutStatus::Missed);
        let nutrition = edit.nutrition.unwrap_or(NutritionStatus::None);

        let progress = self.save_progress(edit.date, workout, nutrition).await;
        let note = self.save_note(edit.date, &edit.notes).await;
        (progress, note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PROGRESS_NOTE_PATH, PROGRESS_UPDATE_PATH};
    use crate::page::MemoryPage;
    use crate::testing::MockTransport;
    use crate::transport::{Body, Method};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn tracker() -> (ProgressTracker, Rc<MockTransport>, Rc<MemoryPage>) {
        let mock = Rc::new(MockTransport::new());
        let page = Rc::new(MemoryPage::new());
        page.add_day(date(), WorkoutStatus::Done, NutritionStatus::Hit);
        let tracker = ProgressTracker::new(DashboardApi::new(mock.clone()), page.clone());
        (tracker, mock, page)
    }

    fn posted_json(mock: &MockTransport, index: usize) -> serde_json::Value {
        match &mock.requests()[index].body {
            Body::Json(json) => serde_json::from_str(json).unwrap(),
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[test]
    fn test_workout_cycle() {
        assert_eq!(WorkoutStatus::Done.next(), WorkoutStatus::Rest);
        assert_eq!(WorkoutStatus::Rest.next(), WorkoutStatus::Missed);
        assert_eq!(WorkoutStatus::Missed.next(), WorkoutStatus::Done);
    }

    #[test]
    fn test_nutrition_cycle() {
        assert_eq!(NutritionStatus::Hit.next(), NutritionStatus::None);
        assert_eq!(NutritionStatus::None.next(), NutritionStatus::Missed);
        assert_eq!(NutritionStatus::Missed.next(), NutritionStatus::Hit);
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!(WorkoutStatus::from_attr("rest"), WorkoutStatus::Rest);
        assert_eq!(WorkoutStatus::from_attr("skipped"), WorkoutStatus::Missed);
        assert_eq!(NutritionStatus::from_attr(""), NutritionStatus::Missed);

        let status: WorkoutStatus = serde_json::from_str(r#""partial""#).unwrap();
        assert_eq!(status, WorkoutStatus::Missed);
    }

    #[test]
    fn test_icon_classes() {
        assert_eq!(
            WorkoutStatus::Done.icon_classes(),
            &["bi-check-circle-fill", "text-success"]
        );
        assert_eq!(
            NutritionStatus::Missed.icon_classes(),
            &["bi-droplet-half", "text-danger"]
        );
    }

    #[test]
    fn test_streak_cards() {
        let cards = streak_cards(&Streaks {
            workout_current: 4,
            workout_best: 12,
            overall_best: 7,
            ..Default::default()
        });
        assert_eq!(cards[0].days, 4);
        assert_eq!(cards[0].current, "4 days");
        assert_eq!(cards[0].best, "Best: 12");
        assert_eq!(cards[2].current, "0 days");
        assert_eq!(cards[2].best, "Best: 7");
    }

    #[tokio::test]
    async fn test_workout_click_from_done_requests_rest() {
        let (tracker, mock, _page) = tracker();
        mock.respond(
            Method::Post,
            PROGRESS_UPDATE_PATH,
            200,
            r#"{"success": true, "workout_status": "rest", "nutrition_status": "hit", "streaks": {}}"#,
        );

        tracker.cycle(date(), Indicator::Workout).await;

        let body = posted_json(&mock, 0);
        assert_eq!(body["date"], "2025-06-02");
        assert_eq!(body["workout_status"], "rest");
        assert_eq!(body["nutrition_status"], "hit");
    }

    #[tokio::test]
    async fn test_workout_click_from_missed_requests_done() {
        let (tracker, mock, page) = tracker();
        page.add_day(date(), WorkoutStatus::Missed, NutritionStatus::None);
        mock.respond(Method::Post, PROGRESS_UPDATE_PATH, 200, r#"{"success": false}"#);

        let outcome = tracker.cycle(date(), Indicator::Workout).await;

        assert_eq!(outcome, SaveOutcome::Rejected);
        assert_eq!(posted_json(&mock, 0)["workout_status"], "done");
        // Rejected saves leave the board alone
        assert_eq!(page.day(date()).unwrap().workout, WorkoutStatus::Missed);
    }

    #[tokio::test]
    async fn test_nutrition_click_keeps_workout() {
        let (tracker, mock, _page) = tracker();
        mock.respond(Method::Post, PROGRESS_UPDATE_PATH, 200, r#"{"success": false}"#);

        tracker.cycle(date(), Indicator::Nutrition).await;

        let body = posted_json(&mock, 0);
        assert_eq!(body["workout_status"], "done");
        assert_eq!(body["nutrition_status"], "none");
    }

    #[tokio::test]
    async fn test_server_status_wins() {
        let (tracker, mock, page) = tracker();
        // Asked for "rest", server kept "done"
        mock.respond(
            Method::Post,
            PROGRESS_UPDATE_PATH,
            200,
            r#"{"success": true, "workout_status": "done", "nutrition_status": "missed",
                "streaks": {"workout_current": 5, "workout_best": 8, "nutrition_current": 0,
                            "nutrition_best": 3, "overall_current": 0, "overall_best": 2}}"#,
        );

        let outcome = tracker.cycle(date(), Indicator::Workout).await;

        assert_eq!(outcome, SaveOutcome::Rendered);
        let day = page.day(date()).unwrap();
        assert_eq!(day.workout, WorkoutStatus::Done);
        assert_eq!(day.nutrition, NutritionStatus::Missed);
        assert_eq!(page.streaks().unwrap().workout_current, 5);
        assert_eq!(page.streaks().unwrap().nutrition_best, 3);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_board() {
        let (tracker, mock, page) = tracker();
        mock.fail(Method::Post, PROGRESS_UPDATE_PATH);

        let outcome = tracker.cycle(date(), Indicator::Nutrition).await;

        assert_eq!(outcome, SaveOutcome::Failed);
        assert_eq!(page.day(date()).unwrap().nutrition, NutritionStatus::Hit);
        assert!(page.streaks().is_none());
    }

    #[tokio::test]
    async fn test_unknown_day_sends_nothing() {
        let (tracker, mock, _page) = tracker();
        let other = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();

        assert_eq!(
            tracker.cycle(other, Indicator::Workout).await,
            SaveOutcome::NoSuchDay
        );
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_save_day_defaults_and_note() {
        let (tracker, mock, page) = tracker();
        mock.respond(
            Method::Post,
            PROGRESS_UPDATE_PATH,
            200,
            r#"{"success": true, "workout_status": "missed", "nutrition_status": "none"}"#,
        );
        mock.respond(
            Method::Post,
            PROGRESS_NOTE_PATH,
            200,
            r#"{"success": true, "notes": "Felt tired"}"#,
        );

        let outcomes = tracker
            .save_day(&DayEdit {
                date: date(),
                workout: None,
                nutrition: None,
                notes: "Felt tired".to_string(),
            })
            .await;

        assert_eq!(outcomes, (SaveOutcome::Rendered, SaveOutcome::Rendered));
        let body = posted_json(&mock, 0);
        assert_eq!(body["workout_status"], "missed");
        assert_eq!(body["nutrition_status"], "none");
        assert_eq!(posted_json(&mock, 1)["notes"], "Felt tired");
        assert_eq!(page.note(date()).as_deref(), Some("Felt tired"));
    }
}
