//! Markup helpers: escaping, Markdown rendering, fixed fallback fragments.

use pulldown_cmark::{escape, html, Options, Parser};

/// Installed in the content region when a view or partial update fails
pub const LOAD_ERROR_MARKUP: &str = r#"<div class="alert alert-danger text-center mt-5">Failed to load this section. Please try again later.</div>"#;

/// Escape text for inclusion in element content or a double-quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail
    let _ = escape::escape_html(&mut out, text);
    out
}

/// Render coach replies (GitHub-flavoured Markdown) to HTML
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
