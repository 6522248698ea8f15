//! View Registry
//!
//! The fixed set of dashboard sections, built once at startup and shared with
//! the controller. Each entry knows its endpoint, the loader message shown
//! while it loads, and the initializer that re-binds listeners after its
//! markup is swapped in.

use std::fmt;
use std::rc::Rc;

use super::controller::ViewController;
use crate::api::view_endpoint;

/// Loader message for ordinary section switches
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading your dashboard...";

/// Sidebar entries of the standard dashboard, in sidebar order
pub const STANDARD_VIEWS: &[&str] = &[
    "/overview",
    "/workout",
    "/nutrition",
    "/chat",
    "/progress",
    "/photo-locker",
    "/community-feed",
];

/// Runs after a view's markup replaced the content region.
///
/// Listeners bound to the previous markup died with it, so an initializer must
/// bind everything its view needs, every time. It receives the controller so
/// listeners can start further transitions (e.g. a partial update).
pub trait ViewInitializer {
    fn initialize(&self, controller: &ViewController);
}

impl<F> ViewInitializer for F
where
    F: Fn(&ViewController),
{
    fn initialize(&self, controller: &ViewController) {
        self(controller)
    }
}

/// Normalize a view name: "workout" and "/workout" both become "/workout"
pub fn normalize_view_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with('/') {
        name.to_string()
    } else {
        format!("/{}", name)
    }
}

/// One sidebar entry
#[derive(Clone)]
pub struct ViewDescriptor {
    selector: String,
    endpoint: String,
    loading_message: String,
    initializer: Option<Rc<dyn ViewInitializer>>,
}

impl ViewDescriptor {
    pub fn new(selector: &str) -> Self {
        let selector = normalize_view_name(selector);
        Self {
            endpoint: view_endpoint(&selector),
            selector,
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            initializer: None,
        }
    }

    /// Sidebar key, always starting with "/"
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn loading_message(&self) -> &str {
        &self.loading_message
    }

    pub fn initializer(&self) -> Option<&Rc<dyn ViewInitializer>> {
        self.initializer.as_ref()
    }
}

impl fmt::Debug for ViewDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewDescriptor")
            .field("selector", &self.selector)
            .field("endpoint", &self.endpoint)
            .field("loading_message", &self.loading_message)
            .field("has_initializer", &self.initializer.is_some())
            .finish()
    }
}

/// Immutable set of views
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: Vec<ViewDescriptor>,
}

impl ViewRegistry {
    pub fn builder() -> ViewRegistryBuilder {
        ViewRegistryBuilder::default()
    }

    /// Builder pre-populated with [`STANDARD_VIEWS`]
    pub fn standard() -> ViewRegistryBuilder {
        STANDARD_VIEWS
            .iter()
            .fold(Self::builder(), |builder, selector| builder.view(selector))
    }

    /// Look up a view by raw or normalized name
    pub fn get(&self, name: &str) -> Option<&ViewDescriptor> {
        let selector = normalize_view_name(name);
        self.views.iter().find(|v| v.selector == selector)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewDescriptor> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Builder for [`ViewRegistry`]
#[derive(Default)]
pub struct ViewRegistryBuilder {
    views: Vec<ViewDescriptor>,
    loading_message: Option<String>,
}

impl ViewRegistryBuilder {
    /// Add a view, or reset an existing one
    pub fn view(mut self, selector: &str) -> Self {
        let mut descriptor = ViewDescriptor::new(selector);
        if let Some(message) = &self.loading_message {
            descriptor.loading_message = message.clone();
        }

        match self.position(&descriptor.selector) {
            Some(i) => self.views[i] = descriptor,
            None => self.views.push(descriptor),
        }
        self
    }

    /// Attach an initializer to a view, adding the view if needed
    pub fn initializer<I>(self, selector: &str, initializer: I) -> Self
    where
        I: ViewInitializer + 'static,
    {
        self.shared_initializer(selector, Rc::new(initializer))
    }

    /// Attach an already shared initializer
    pub fn shared_initializer(mut self, selector: &str, initializer: Rc<dyn ViewInitializer>) -> Self {
        let selector = normalize_view_name(selector);
        if self.position(&selector).is_none() {
            self = self.view(&selector);
        }
        if let Some(i) = self.position(&selector) {
            self.views[i].initializer = Some(initializer);
        }
        self
    }

    /// Loader message for one view
    pub fn loading_message(mut self, selector: &str, message: &str) -> Self {
        if let Some(i) = self.position(&normalize_view_name(selector)) {
            self.views[i].loading_message = message.to_string();
        }
        self
    }

    /// Loader message for every view added so far and after
    pub fn default_loading_message(mut self, message: &str) -> Self {
        for view in &mut self.views {
            view.loading_message = message.to_string();
        }
        self.loading_message = Some(message.to_string());
        self
    }

    pub fn build(self) -> ViewRegistry {
        ViewRegistry { views: self.views }
    }

    fn position(&self, selector: &str) -> Option<usize> {
        self.views.iter().position(|v| v.selector == selector)
    }
}
