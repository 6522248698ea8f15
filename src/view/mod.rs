//! View Controller
//!
//! Swaps dashboard sections in and out of the content region.
//!
//! A transition marks the sidebar entry, hides the content behind the loading
//! overlay, fetches the section's fragment, installs it (or the error
//! fallback), re-runs the section's initializer and finally lifts the overlay.
//! Every transition carries a sequence token; only the latest one may touch the
//! page once its response arrives.

pub mod controller;
pub mod registry;
pub mod surface;

pub use controller::{
    ControllerOptions, ControllerState, Transition, ViewController, CANONICAL_PATH, DEFAULT_VIEW,
    TAB_PARAM,
};
pub use registry::{
    normalize_view_name, ViewDescriptor, ViewInitializer, ViewRegistry, ViewRegistryBuilder,
    DEFAULT_LOADING_MESSAGE, STANDARD_VIEWS,
};
pub use surface::Surface;
