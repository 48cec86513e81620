#![forbid(unsafe_code)]

//! Responsive `<picture>` source resolution + injection (headless).
//!
//! Given one base image (a candidate list of width-descriptor renditions, or
//! a named size catalog registered per request) and an HTML fragment holding
//! its `<img>` tag, the engine resolves which rendition applies below which
//! viewport width and wraps the tag with the matching `<source>` elements.
//!
//! Design goals:
//! - degrade to no-op, never raise: malformed candidates, unknown size
//!   names, and fragments without an image tag all leave the fragment
//!   byte-for-byte unchanged
//! - no ambient state: the per-request [`VariantRegistry`] is constructed by
//!   the caller and passed by reference
//! - pure, bounded string transformations: no I/O, nothing fetched
//!
//! ```
//! use respic::{Engine, SourceStrategy};
//!
//! let engine = Engine::new();
//! let html = engine.rewrite_fragment(
//!     r#"<img src="a.jpg">"#,
//!     SourceStrategy::Derived { candidates: "a-300.jpg 300w, a-600.jpg 600w" },
//! );
//! assert!(html.starts_with("<picture>"));
//! ```

pub mod candidate;
pub mod config;
pub mod error;
pub mod inject;
pub mod markup;
pub mod registry;
pub mod resolve;

pub use candidate::{Variant, parse_candidate_list, sort_by_width};
pub use config::{DEFAULT_BREAKPOINT_MARGIN, EngineConfig};
pub use error::{Error, Result};
pub use inject::wrap_first_image;
pub use markup::build_source_tags;
pub use registry::{ImageId, VariantRegistry};
pub use resolve::{ConditionedSource, SizeToken, derive_conditions, parse_size_tokens, resolve_explicit};

/// How the engine should obtain `(condition, variant)` pairs for one
/// fragment. Chosen once by the caller; there is no fallback from one
/// strategy to the other.
#[derive(Debug, Clone, Copy)]
pub enum SourceStrategy<'a> {
    /// Synthesize `max-width` breakpoints from a raw candidate list.
    Derived { candidates: &'a str },
    /// Resolve caller-declared `"<condition> <name>"` tokens against the
    /// request's registry. An empty `sizes` string falls back to the
    /// config's `default_sizes`, if any.
    Explicit {
        sizes: &'a str,
        registry: &'a VariantRegistry,
        image: ImageId,
    },
}

/// The resolution + injection engine. Cheap to construct and to clone; holds
/// only configuration.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves sources for one fragment and wraps its first image tag.
    ///
    /// Returns the fragment unchanged when nothing resolves: an empty or
    /// fully malformed candidate list, an empty/unmatchable token list, or a
    /// fragment with no image tag.
    pub fn rewrite_fragment(&self, html: &str, strategy: SourceStrategy<'_>) -> String {
        let sources = self.resolve_sources(strategy);
        if sources.is_empty() {
            tracing::debug!("no resolvable sources; leaving fragment unchanged");
            return html.to_string();
        }
        let tags = markup::build_source_tags(&sources);
        tracing::debug!(sources = tags.len(), "wrapping first image tag");
        inject::wrap_first_image(html, &tags)
    }

    /// Parses a raw candidate list and returns its variants sorted ascending
    /// by width, ready for breakpoint derivation or for the caller to
    /// register in a [`VariantRegistry`]. Malformed segments are dropped, so
    /// garbled input yields fewer (or zero) variants, never an error.
    pub fn ingest_candidate_list(&self, raw: &str) -> Vec<Variant> {
        let mut variants = candidate::parse_candidate_list(raw);
        candidate::sort_by_width(&mut variants);
        variants
    }

    /// Resolves `(condition, variant)` pairs without touching any HTML.
    pub fn resolve_sources(&self, strategy: SourceStrategy<'_>) -> Vec<ConditionedSource> {
        match strategy {
            SourceStrategy::Derived { candidates } => {
                let variants = self.ingest_candidate_list(candidates);
                resolve::derive_conditions(&variants, self.config.breakpoint_margin)
            }
            SourceStrategy::Explicit {
                sizes,
                registry,
                image,
            } => {
                let sizes = if sizes.trim().is_empty() {
                    self.config.default_sizes.as_deref().unwrap_or(sizes)
                } else {
                    sizes
                };
                let tokens = resolve::parse_size_tokens(sizes);
                if tokens.is_empty() {
                    return Vec::new();
                }
                resolve::resolve_explicit(&tokens, registry, image)
            }
        }
    }
}

#[cfg(test)]
mod tests;
