use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::registry::{normalize_view_name, ViewRegistry};
use super::surface::Surface;
use crate::api::{self, DashboardApi, PlanModification};
use crate::markup::LOAD_ERROR_MARKUP;
use crate::transport::{Request, Transport};

/// View shown when the page is opened without a `tab` parameter
pub const DEFAULT_VIEW: &str = "overview";

/// Address the dashboard settles on after a deep link was consumed
pub const CANONICAL_PATH: &str = "/dashboard/";

/// Query parameter carrying the deep-linked view
pub const TAB_PARAM: &str = "tab";

/// Loader messages for the modal-driven partial updates
pub const WORKOUT_UPDATE_MESSAGE: &str = "Updating workout plan...";
pub const MEAL_PLAN_MESSAGE: &str = "Generating new meal plan...";

/// Snapshot of the controller's mutable state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Selector of the active sidebar entry
    pub active_view: Option<String>,
    /// True while the latest transition's request is in flight
    pub is_loading: bool,
}

/// How a transition ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Fragment installed and initializer run
    Applied,
    /// Error fallback installed
    Failed,
    /// A later transition started before this one's response arrived
    Superseded,
    /// No such view; nothing happened
    UnknownView,
}

/// Deep-link and default-view settings
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub default_view: String,
    pub canonical_path: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            default_view: DEFAULT_VIEW.to_string(),
            canonical_path: CANONICAL_PATH.to_string(),
        }
    }
}

struct Inner {
    registry: Rc<ViewRegistry>,
    api: DashboardApi,
    surface: Rc<dyn Surface>,
    options: ControllerOptions,
    /// Token of the most recently started transition
    latest: Cell<u64>,
    state: RefCell<ControllerState>,
}

/// Cheap-to-clone handle to the dashboard's view controller.
///
/// Clones share state; listeners bound by initializers keep a clone to start
/// transitions of their own.
#[derive(Clone)]
pub struct ViewController {
    inner: Rc<Inner>,
}

impl fmt::Debug for ViewController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewController")
            .field("views", &self.inner.registry.len())
            .field("latest", &self.inner.latest.get())
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

/// Clears the loading state when dropped, on every exit path, but only if its
/// transition is still the latest one.
struct LoadingGuard<'a> {
    inner: &'a Inner,
    token: u64,
}

impl LoadingGuard<'_> {
    fn is_current(&self) -> bool {
        self.inner.latest.get() == self.token
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.is_current() {
            return;
        }
        self.inner.surface.hide_loader();
        self.inner.surface.set_content_visible(true);
        self.inner.state.borrow_mut().is_loading = false;
    }
}

/// A started transition waiting for its response
struct Pending<'a> {
    guard: LoadingGuard<'a>,
    request: Request,
    /// View whose initializer runs after the swap
    selector: String,
}

impl ViewController {
    pub fn new(
        registry: Rc<ViewRegistry>,
        transport: Rc<dyn Transport>,
        surface: Rc<dyn Surface>,
    ) -> Self {
        Self::with_options(registry, transport, surface, ControllerOptions::default())
    }

    pub fn with_options(
        registry: Rc<ViewRegistry>,
        transport: Rc<dyn Transport>,
        surface: Rc<dyn Surface>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                registry,
                api: DashboardApi::new(transport),
                surface,
                options,
                latest: Cell::new(0),
                state: RefCell::new(ControllerState::default()),
            }),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.inner.state.borrow().clone()
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.inner.registry
    }

    pub fn api(&self) -> &DashboardApi {
        &self.inner.api
    }

    pub fn surface(&self) -> &Rc<dyn Surface> {
        &self.inner.surface
    }

    /// Switch to a view by name ("workout" or "/workout").
    ///
    /// Unknown names are ignored without touching the page.
    pub async fn select_view(&self, name: &str) -> Transition {
        match self.begin_view(name) {
            Some(pending) => self.complete(pending).await,
            None => Transition::UnknownView,
        }
    }

    /// Programmatic navigation, e.g. from a "view full plan" link
    pub async fn go_to_tab(&self, name: &str) -> Transition {
        self.select_view(name).await
    }

    /// Pick the first view from the page URL's `tab` parameter, falling back
    /// to the default view when it is absent or blank. A consumed deep link
    /// is removed from the address bar before the fragment arrives.
    pub async fn deep_link_on_load(&self) -> Transition {
        let tab = self
            .inner
            .surface
            .query_param(TAB_PARAM)
            .filter(|tab| !tab.trim().is_empty());
        let Some(tab) = tab else {
            let default_view = self.inner.options.default_view.clone();
            return self.select_view(&default_view).await;
        };

        tracing::debug!(tab = %tab, "Deep link requested");
        let pending = self.begin_view(&tab);
        self.inner.surface.replace_url(&self.inner.options.canonical_path);

        match pending {
            Some(pending) => self.complete(pending).await,
            None => Transition::UnknownView,
        }
    }

    /// Replace the content region with the fragment returned by `request`,
    /// then re-run `selector`'s initializer so the new markup is live.
    ///
    /// Used by modal forms whose submission re-renders the current view.
    pub async fn apply_partial_update(
        &self,
        request: Request,
        loading_message: &str,
        selector: &str,
    ) -> Transition {
        let guard = self.start(loading_message);
        let pending = Pending {
            guard,
            request,
            selector: normalize_view_name(selector),
        };
        self.complete(pending).await
    }

    /// Submit the workout "modify plan" modal
    pub async fn modify_workout_plan(&self, plan: &PlanModification) -> Transition {
        match api::workout_modification_request(plan) {
            Ok(request) => {
                self.apply_partial_update(request, WORKOUT_UPDATE_MESSAGE, "/workout")
                    .await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not build workout update");
                Transition::Failed
            }
        }
    }

    /// Ask the backend for a fresh meal plan
    pub async fn regenerate_meal_plan(&self) -> Transition {
        self.apply_partial_update(
            api::meal_plan_regeneration_request(),
            MEAL_PLAN_MESSAGE,
            "/nutrition",
        )
        .await
    }

    /// Synchronous half of a view switch: sidebar, overlay, token
    fn begin_view(&self, name: &str) -> Option<Pending<'_>> {
        let Some(view) = self.inner.registry.get(name) else {
            tracing::debug!(view = %name, "Ignoring unknown view");
            return None;
        };

        let selector = view.selector().to_string();
        self.inner.surface.set_active_entry(&selector);
        self.inner.state.borrow_mut().active_view = Some(selector.clone());
        self.inner.surface.set_content_visible(false);

        let guard = self.start(view.loading_message());
        tracing::debug!(view = %selector, token = guard.token, "Loading view");

        Some(Pending {
            guard,
            request: Request::get(view.endpoint()),
            selector,
        })
    }

    /// Issue a new token and raise the overlay
    fn start(&self, loading_message: &str) -> LoadingGuard<'_> {
        let token = self.inner.latest.get() + 1;
        self.inner.latest.set(token);

        self.inner.surface.show_loader(loading_message);
        self.inner.state.borrow_mut().is_loading = true;

        LoadingGuard {
            inner: &self.inner,
            token,
        }
    }

    /// Await the response and apply it if still current. The guard drops on
    /// return and lifts the overlay.
    async fn complete(&self, pending: Pending<'_>) -> Transition {
        let Pending {
            guard,
            request,
            selector,
        } = pending;

        let result = self.inner.api.fetch_html(request).await;

        if !guard.is_current() {
            tracing::debug!(view = %selector, token = guard.token, "Discarding stale response");
            return Transition::Superseded;
        }

        match result {
            Ok(html) => {
                self.inner.surface.replace_content(&html);
                let initializer = self
                    .inner
                    .registry
                    .get(&selector)
                    .and_then(|view| view.initializer().cloned());
                if let Some(initializer) = initializer {
                    initializer.initialize(self);
                }
                Transition::Applied
            }
            Err(e) => {
                tracing::warn!(view = %selector, error = %e, "Failed to load content");
                self.inner.surface.replace_content(LOAD_ERROR_MARKUP);
                Transition::Failed
            }
        }
    }
}
