//! Markdown rendering for AI-written interpretations.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// URL schemes a rendered link or image may point at. Scheme-less
/// (relative) destinations are always kept.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render `markdown` to HTML with tables, strikethrough and task lists.
///
/// Raw HTML in the source is dropped and link or image destinations with
/// any other scheme (`javascript:`, `data:`, ...) are blanked, so the output
/// is safe to inject.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link { link_type, dest_url: sanitize_url(dest_url), title, id }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image { link_type, dest_url: sanitize_url(dest_url), title, id }))
        }
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) { url } else { CowStr::Borrowed("") }
}

/// True when `url` is relative or uses one of [`ALLOWED_SCHEMES`].
pub fn is_safe_url(url: &str) -> bool {
    // Browsers ignore leading whitespace and control characters.
    let url = url.trim_start_matches(|c: char| c <= ' ');
    let Some(colon) = url.find(':') else {
        return true;
    };
    let scheme = &url[..colon];
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    ALLOWED_SCHEMES.iter().any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}
