//! Data Transfer Objects
//!
//! Request and response bodies for the dashboard's JSON endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::progress::{NutritionStatus, WorkoutStatus};

// ============ Workout Plan ============

/// Body of the "modify plan" modal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanModification {
    pub goal: String,
    pub schedule: String,
    pub notes: String,
}

impl PlanModification {
    /// Build from raw input values, trimming each field
    pub fn from_inputs(goal: &str, schedule: &str, notes: &str) -> Self {
        Self {
            goal: goal.trim().to_string(),
            schedule: schedule.trim().to_string(),
            notes: notes.trim().to_string(),
        }
    }
}

// ============ Chat ============

/// Reply from `/api/chat/`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

// ============ Progress ============

/// Body of `/api/progress/update/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    pub date: NaiveDate,
    pub workout_status: WorkoutStatus,
    pub nutrition_status: NutritionStatus,
}

/// Server-computed streak counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Streaks {
    pub workout_current: u32,
    pub workout_best: u32,
    pub nutrition_current: u32,
    pub nutrition_best: u32,
    pub overall_current: u32,
    pub overall_best: u32,
}

/// Reply from `/api/progress/update/`. Error replies only carry `error`, so
/// everything else is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdateReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub workout_status: Option<WorkoutStatus>,
    #[serde(default)]
    pub nutrition_status: Option<NutritionStatus>,
    #[serde(default)]
    pub streaks: Option<Streaks>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `/api/progress/note/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteUpdate {
    pub date: NaiveDate,
    pub notes: String,
}

/// Reply from `/api/progress/note/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_modification_trims() {
        let plan = PlanModification::from_inputs("  build muscle ", "\tmon/wed/fri", "");
        assert_eq!(plan.goal, "build muscle");
        assert_eq!(plan.schedule, "mon/wed/fri");
        assert_eq!(
            serde_json::to_string(&plan).unwrap(),
            r#"{"goal":"build muscle","schedule":"mon/wed/fri","notes":""}"#
        );
    }

    #[test]
    fn test_progress_update_wire_format() {
        let update = ProgressUpdate {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            workout_status: WorkoutStatus::Rest,
            nutrition_status: NutritionStatus::Hit,
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"date":"2025-03-14","workout_status":"rest","nutrition_status":"hit"}"#
        );
    }

    #[test]
    fn test_progress_reply_error_shape() {
        let reply: ProgressUpdateReply =
            serde_json::from_str(r#"{"error": "Date is required"}"#).unwrap();
        assert!(!reply.success);
        assert!(reply.streaks.is_none());
        assert_eq!(reply.error.as_deref(), Some("Date is required"));
    }

    #[test]
    fn test_progress_reply_success_shape() {
        let reply: ProgressUpdateReply = serde_json::from_str(
            r#"{"success": true, "workout_status": "done", "nutrition_status": "none",
                "streaks": {"workout_current": 3, "workout_best": 9}}"#,
        )
        .unwrap();
        assert!(reply.success);
        assert_eq!(reply.workout_status, Some(WorkoutStatus::Done));
        assert_eq!(reply.nutrition_status, Some(NutritionStatus::None));
        let streaks = reply.streaks.unwrap();
        assert_eq!(streaks.workout_current, 3);
        assert_eq!(streaks.overall_best, 0);
    }
}
