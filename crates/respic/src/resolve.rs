//! Media condition resolution.
//!
//! Two strategies turn variants into `(media condition, variant)` pairs:
//!
//! - *Derived*: synthesize a `max-width` breakpoint from each variant's own
//!   width plus a fixed margin. Used when the caller declared nothing.
//! - *Explicit*: the caller supplies ordered `"<condition> <name>"` tokens and
//!   each name is resolved against the request's [`VariantRegistry`].
//!
//! The strategy is picked once by the caller (see [`crate::SourceStrategy`]);
//! it is never inferred from whether some value happens to be present.

use crate::candidate::Variant;
use crate::registry::{ImageId, VariantRegistry};
use serde::Serialize;

/// One `<source>` to emit: a media condition plus the variant it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionedSource {
    pub condition: String,
    pub variant: Variant,
}

/// A parsed `"<condition> <name>"` token from a caller-declared sizes list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeToken {
    pub condition: String,
    pub name: String,
}

/// Splits a comma-separated sizes list into tokens.
///
/// Each item is split on its first space into `(condition, name)`; items that
/// do not yield two non-empty halves are discarded silently. The condition
/// half therefore cannot contain spaces (`(max-width:480px)`, not
/// `(max-width: 480px)`), matching the catalog format the surrounding
/// pipeline persists.
pub fn parse_size_tokens(raw: &str) -> Vec<SizeToken> {
    raw.split(',')
        .filter_map(|item| {
            let item = item.trim();
            let (condition, name) = item.split_once(' ')?;
            let condition = condition.trim();
            let name = name.trim();
            if condition.is_empty() || name.is_empty() {
                return None;
            }
            Some(SizeToken {
                condition: condition.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Derives one `max-width` condition per variant.
///
/// Emits exactly one entry per input variant, in input order; callers pass
/// variants already sorted ascending by width so the narrowest breakpoint is
/// checked first. The margin pads each breakpoint so it triggers slightly
/// before the viewport reaches the variant's native width.
pub fn derive_conditions(variants: &[Variant], margin: u32) -> Vec<ConditionedSource> {
    variants
        .iter()
        .map(|variant| ConditionedSource {
            condition: format!("(max-width:{}px)", variant.width.saturating_add(margin)),
            variant: variant.clone(),
        })
        .collect()
}

/// Resolves explicit size tokens against the registry.
///
/// Output order matches token order; the caller owns condition precedence and
/// this strategy never re-sorts by width. Tokens naming a size the registry
/// does not know for this image are dropped silently, so the output length is
/// at most the token count. Duplicate tokens naming the same variant each
/// resolve independently.
pub fn resolve_explicit(
    tokens: &[SizeToken],
    registry: &VariantRegistry,
    image: ImageId,
) -> Vec<ConditionedSource> {
    tokens
        .iter()
        .filter_map(|token| {
            let Some(variant) = registry.get(image, &token.name) else {
                tracing::trace!(name = %token.name, image, "size token names an unknown variant");
                return None;
            };
            Some(ConditionedSource {
                condition: token.condition.clone(),
                variant: variant.clone(),
            })
        })
        .collect()
}
