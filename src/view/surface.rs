//! Page shell seen by the view controller: sidebar, content region, loading
//! overlay and the address bar.

/// The parts of the dashboard page the controller drives.
///
/// Implementations must make [`Surface::replace_content`] atomic: after the
/// call the region holds exactly the new markup.
pub trait Surface {
    /// Mark `selector`'s sidebar entry active and every other entry inactive
    fn set_active_entry(&self, selector: &str);

    fn set_content_visible(&self, visible: bool);

    /// Replace the content region's markup wholesale
    fn replace_content(&self, html: &str);

    fn show_loader(&self, message: &str);

    fn hide_loader(&self);

    /// Query parameter from the URL the page was loaded with
    fn query_param(&self, name: &str) -> Option<String>;

    /// Rewrite the address bar without adding a history entry
    fn replace_url(&self, path: &str);
}
