//! Candidate list parsing.
//!
//! A candidate list is the `srcset`-style enumeration of renditions for one
//! base image: comma-separated `<url> <width>w` pairs. The order of the raw
//! string carries no meaning; callers re-sort by width before deriving
//! breakpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One concrete rendition of a base image.
///
/// `name` is present only when the variant came from a registry registration
/// (a named size in the upstream size catalog); variants parsed out of a raw
/// candidate list are anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    pub width: u32,
}

impl Variant {
    pub fn new(url: impl Into<String>, width: u32) -> Self {
        Self {
            name: None,
            url: url.into(),
            width,
        }
    }

    pub fn named(name: impl Into<String>, url: impl Into<String>, width: u32) -> Self {
        Self {
            name: Some(name.into()),
            url: url.into(),
            width,
        }
    }
}

fn candidate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // URL, a single space, digits, a literal `w` width descriptor.
    RE.get_or_init(|| Regex::new(r"^(\S+) (\d+)w$").expect("valid regex"))
}

/// Parses a raw candidate list into variants.
///
/// Segments that do not match `<url> <width>w` are discarded silently, so
/// partial or garbled input degrades to fewer variants rather than an error.
/// URLs containing unescaped commas split across segments and are discarded
/// with them; density (`2x`) descriptors are not part of this catalog and are
/// likewise dropped. An empty or fully malformed string yields an empty
/// vector.
pub fn parse_candidate_list(raw: &str) -> Vec<Variant> {
    raw.split(',')
        .filter_map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return None;
            }
            let caps = candidate_regex().captures(segment)?;
            let url = caps[1].to_string();
            let Ok(width) = caps[2].parse::<u32>() else {
                tracing::trace!(segment, "discarding candidate with out-of-range width");
                return None;
            };
            Some(Variant::new(url, width))
        })
        .collect()
}

/// Sorts variants ascending by width.
///
/// The sort is stable: ties keep their relative input order, which downstream
/// breakpoint derivation relies on (widths must come out monotonically
/// non-decreasing).
pub fn sort_by_width(variants: &mut [Variant]) {
    variants.sort_by_key(|v| v.width);
}
