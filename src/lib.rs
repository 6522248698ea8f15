//! # GymDash
//!
//! Interaction layer of the GymAI coaching dashboard. The dashboard is a
//! server-rendered page whose sections are swapped in as HTML fragments; this
//! crate owns everything that happens between a click and the new markup.
//!
//! ## Modules
//!
//! - [`view`]: View controller, view registry and the page surface seam
//! - [`chat`]: Coach chat transcript
//! - [`progress`]: Workout/nutrition indicator cycling and streaks
//! - [`meals`]: Meal detail modal rendering
//! - [`photos`]: Photo preview modal
//! - [`schedule`]: Profile availability grid and setup wizard
//! - [`transport`]: HTTP seam, with a `reqwest` implementation on native targets
//! - [`api`]: Typed dashboard endpoints
//! - [`page`]: In-memory page used off the browser
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use gymdash::page::MemoryPage;
//! use gymdash::transport::{HttpTransport, HttpTransportConfig};
//! use gymdash::view::{ViewController, ViewRegistry};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Rc::new(HttpTransport::new(HttpTransportConfig::default())?);
//!     let page = Rc::new(MemoryPage::with_url("/dashboard/?tab=nutrition"));
//!     let registry = Rc::new(ViewRegistry::standard().build());
//!
//!     let controller = ViewController::new(registry, transport, page.clone());
//!     controller.deep_link_on_load().await;
//!
//!     println!("{}", page.content());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod csrf;
pub mod error;
pub mod markup;
pub mod meals;
pub mod page;
pub mod photos;
pub mod progress;
pub mod schedule;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use api::{DashboardApi, PlanModification, Streaks};

pub use chat::{Bubble, BubbleContent, ChatSession, ChatWindow, Exchange, Sender};

pub use config::{Config, ConfigError, LoggingConfig};

pub use error::{ClientError, ClientResult, TransportError};

pub use progress::{
    DayStatus, Indicator, NutritionStatus, ProgressBoard, ProgressTracker, SaveOutcome,
    WorkoutStatus,
};

pub use transport::{Method, Request, Response, Transport};

pub use view::{
    ControllerOptions, ControllerState, Surface, Transition, ViewController, ViewDescriptor,
    ViewInitializer, ViewRegistry,
};
