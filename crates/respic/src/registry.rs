//! Request-scoped variant registry.
//!
//! The surrounding rendering pipeline enumerates the known size catalog for
//! each image it encounters and registers the results here before resolving
//! any explicit size tokens for that image. The registry lives for one
//! rendering pass and is passed by reference into the resolver; it is never a
//! process-wide singleton.

use crate::candidate::Variant;
use indexmap::IndexMap;

/// Identifier of a base image within the surrounding pipeline (e.g. an
/// attachment id). Opaque to the engine.
pub type ImageId = u64;

/// `(image, size name) -> Variant` mapping for one rendering pass.
///
/// Registration under an already-registered name is last-write-wins; the
/// name keeps its original position in iteration order. Variants for
/// different images occupy disjoint keys in the same instance.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    by_image: IndexMap<ImageId, IndexMap<String, Variant>>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one named variant for an image.
    pub fn register(&mut self, image: ImageId, name: &str, url: impl Into<String>, width: u32) {
        self.by_image
            .entry(image)
            .or_default()
            .insert(name.to_string(), Variant::named(name, url, width));
    }

    /// Looks up a named variant for an image.
    pub fn get(&self, image: ImageId, name: &str) -> Option<&Variant> {
        self.by_image.get(&image)?.get(name)
    }

    /// Iterates the variants registered for an image, in registration order.
    pub fn variants(&self, image: ImageId) -> impl Iterator<Item = &Variant> {
        self.by_image.get(&image).into_iter().flat_map(|m| m.values())
    }

    pub fn contains_image(&self, image: ImageId) -> bool {
        self.by_image
            .get(&image)
            .is_some_and(|names| !names.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.by_image.values().all(|names| names.is_empty())
    }

    /// Drops all registrations. The registry is request-scoped, so callers
    /// that reuse an instance across passes must clear it between them.
    pub fn clear(&mut self) {
        self.by_image.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_get_round_trip() {
        let mut registry = VariantRegistry::new();
        registry.register(7, "thumbnail", "http://x/a-150.jpg", 150);
        registry.register(7, "medium", "http://x/a-300.jpg", 300);

        let v = registry.get(7, "thumbnail").expect("registered");
        assert_eq!(v.name.as_deref(), Some("thumbnail"));
        assert_eq!(v.url, "http://x/a-150.jpg");
        assert_eq!(v.width, 150);

        assert!(registry.get(7, "large").is_none());
        assert!(registry.get(8, "thumbnail").is_none());
    }

    #[test]
    fn duplicate_registration_is_last_write_wins() {
        let mut registry = VariantRegistry::new();
        registry.register(7, "thumbnail", "http://x/old.jpg", 150);
        registry.register(7, "medium", "http://x/m.jpg", 300);
        registry.register(7, "thumbnail", "http://x/new.jpg", 160);

        let v = registry.get(7, "thumbnail").expect("registered");
        assert_eq!(v.url, "http://x/new.jpg");
        assert_eq!(v.width, 160);

        // Overwrite keeps the name's original iteration position.
        let names: Vec<_> = registry
            .variants(7)
            .map(|v| v.name.clone().unwrap())
            .collect();
        assert_eq!(names, ["thumbnail", "medium"]);
    }

    #[test]
    fn images_occupy_disjoint_keys() {
        let mut registry = VariantRegistry::new();
        registry.register(1, "thumbnail", "http://x/1.jpg", 150);
        registry.register(2, "thumbnail", "http://x/2.jpg", 150);

        assert_eq!(registry.get(1, "thumbnail").unwrap().url, "http://x/1.jpg");
        assert_eq!(registry.get(2, "thumbnail").unwrap().url, "http://x/2.jpg");
        assert!(registry.contains_image(1));
        assert!(!registry.contains_image(3));
    }
}
