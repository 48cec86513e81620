//! `<source>` tag rendering.

use crate::resolve::ConditionedSource;
use htmlize::escape_attribute;

/// Renders one `<source>` markup string per entry, in input order.
///
/// The consuming renderer takes the first matching condition, so emission
/// order is a precedence chain: the derived strategy lists narrowest first
/// via its ascending-width input, explicit callers order their own tokens.
///
/// Entries with an empty condition or an empty URL are skipped, not emitted.
/// The `data-size` attribute carries the variant name when known; it exists
/// for inspection and debugging, not rendering behavior.
pub fn build_source_tags(sources: &[ConditionedSource]) -> Vec<String> {
    sources
        .iter()
        .filter(|source| !source.condition.is_empty() && !source.variant.url.is_empty())
        .map(|source| {
            let mut tag = String::with_capacity(64);
            tag.push_str("<source");
            if let Some(name) = &source.variant.name {
                tag.push_str(" data-size=\"");
                tag.push_str(&escape_attribute(name));
                tag.push('"');
            }
            tag.push_str(" media=\"");
            tag.push_str(&escape_attribute(&source.condition));
            tag.push_str("\" srcset=\"");
            tag.push_str(&escape_attribute(&source.variant.url));
            tag.push_str("\">");
            tag
        })
        .collect()
}
