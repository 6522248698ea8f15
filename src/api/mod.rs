//! Dashboard Backend API
//!
//! Typed calls against the server-rendered dashboard. The backend is a black
//! box: HTML fragments for views, small JSON documents for chat and progress.
//!
//! # Endpoints
//!
//! - `GET /dashboard{view}` - view fragment
//! - `POST /dashboard/workout/` - modify workout plan, returns fragment
//! - `POST /dashboard/nutrition/` - regenerate meal plan, returns fragment
//! - `POST /api/chat/` - chat message (form-encoded), returns `{response}`
//! - `POST /api/progress/update/` - day statuses, returns statuses + streaks
//! - `POST /api/progress/note/` - day note, returns `{success, notes}`

pub mod dto;

pub use dto::{
    ChatReply, NoteReply, NoteUpdate, PlanModification, ProgressUpdate, ProgressUpdateReply,
    Streaks,
};

use serde::de::DeserializeOwned;
use std::rc::Rc;

use crate::error::{ClientError, ClientResult};
use crate::transport::{Request, Response, Transport};

/// Prefix joined with a view selector to form its endpoint
pub const VIEW_PREFIX: &str = "/dashboard";
pub const WORKOUT_PLAN_PATH: &str = "/dashboard/workout/";
pub const NUTRITION_PLAN_PATH: &str = "/dashboard/nutrition/";
pub const CHAT_PATH: &str = "/api/chat/";
pub const PROGRESS_UPDATE_PATH: &str = "/api/progress/update/";
pub const PROGRESS_NOTE_PATH: &str = "/api/progress/note/";

/// Endpoint serving the fragment for a normalized selector (e.g. "/workout")
pub fn view_endpoint(selector: &str) -> String {
    format!("{}{}", VIEW_PREFIX, selector)
}

/// Request for the workout "modify plan" modal
pub fn workout_modification_request(plan: &PlanModification) -> ClientResult<Request> {
    Ok(Request::post_json(WORKOUT_PLAN_PATH, plan)?)
}

/// Request for the nutrition "regenerate" button. No body, CSRF header only.
pub fn meal_plan_regeneration_request() -> Request {
    Request::post(NUTRITION_PLAN_PATH)
}

/// Typed client over a [`Transport`]
#[derive(Clone)]
pub struct DashboardApi {
    transport: Rc<dyn Transport>,
}

impl DashboardApi {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request whose reply is an HTML fragment
    pub async fn fetch_html(&self, request: Request) -> ClientResult<String> {
        let response = self.transport.send(request).await?;
        into_success(response).map(|r| r.body)
    }

    /// Send a chat message, returning the coach's raw (Markdown) reply
    pub async fn send_chat(&self, message: &str) -> ClientResult<String> {
        let request = Request::post_form(CHAT_PATH, &[("message", message)]);
        let reply: ChatReply = self.fetch_json(request).await?;
        Ok(reply.response)
    }

    /// Store a day's statuses
    pub async fn update_progress(&self, update: &ProgressUpdate) -> ClientResult<ProgressUpdateReply> {
        let request = Request::post_json(PROGRESS_UPDATE_PATH, update)?;
        self.fetch_json(request).await
    }

    /// Store a day's note
    pub async fn save_note(&self, note: &NoteUpdate) -> ClientResult<NoteReply> {
        let request = Request::post_json(PROGRESS_NOTE_PATH, note)?;
        self.fetch_json(request).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: Request) -> ClientResult<T> {
        let response = self.transport.send(request).await?;
        let response = into_success(response)?;
        Ok(response.json()?)
    }
}

fn into_success(response: Response) -> ClientResult<Response> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            status: response.status,
            body: response.body,
        })
    }
}
