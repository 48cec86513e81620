//! `<picture>` injection.
//!
//! Wraps the first `<img>` of an HTML fragment in place: the generated
//! `<source>` tags and the `<picture>` open tag go immediately before the
//! matched tag, `</picture>` immediately after it. The tag itself (including
//! any `srcset` it already carries) is left byte-for-byte untouched, and
//! trailing content such as captions stays where it was, after the close tag.
//!
//! Fragments are assumed to carry exactly one primary image tag; later `<img>`
//! occurrences are ignored, and multi-image fragments are unsupported for a
//! single call. Calling this twice on the same fragment nests `<picture>`
//! elements — single invocation per fragment per rendering pass is the
//! caller's precondition, not something the injector detects.

use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use std::cell::Cell;

/// Wraps the first image tag of `html` with the given source tags.
///
/// Returns the input unchanged when `source_tags` is empty (no empty
/// `<picture>` wrapper is ever produced), when the fragment contains no image
/// tag, or when the fragment fails to rewrite at all.
pub fn wrap_first_image(html: &str, source_tags: &[String]) -> String {
    if source_tags.is_empty() || html.is_empty() {
        return html.to_string();
    }

    let mut opening = String::with_capacity(10 + source_tags.iter().map(String::len).sum::<usize>());
    opening.push_str("<picture>");
    for tag in source_tags {
        opening.push_str(tag);
    }

    let wrapped = Cell::new(false);
    let handlers = vec![element!("img", |el| {
        if wrapped.get() {
            return Ok(());
        }
        wrapped.set(true);
        el.before(&opening, ContentType::Html);
        el.after("</picture>", ContentType::Html);
        Ok(())
    })];

    let out = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    );

    match out {
        Ok(rewritten) => {
            if !wrapped.get() {
                tracing::debug!("no image tag in fragment; leaving it unchanged");
            }
            rewritten
        }
        Err(err) => {
            tracing::debug!(%err, "fragment rewrite failed; leaving it unchanged");
            html.to_string()
        }
    }
}
