//! Typed registry of renderer slots.
//!
//! A [`ComponentSet`] maps every [`SlotKey`] to an optional renderer. Caller overrides
//! replace defaults key by key; a `None` override suppresses the region entirely.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    Container,
    Header,
    HeaderClose,
    HeaderFullscreen,
    Footer,
    FooterCaption,
    FooterCount,
    Navigation,
    NavigationPrev,
    NavigationNext,
    View,
}

impl SlotKey {
    pub const ALL: [SlotKey; 11] = [
        SlotKey::Container,
        SlotKey::Header,
        SlotKey::HeaderClose,
        SlotKey::HeaderFullscreen,
        SlotKey::Footer,
        SlotKey::FooterCaption,
        SlotKey::FooterCount,
        SlotKey::Navigation,
        SlotKey::NavigationPrev,
        SlotKey::NavigationNext,
        SlotKey::View,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::Container => "container",
            SlotKey::Header => "header",
            SlotKey::HeaderClose => "header_close",
            SlotKey::HeaderFullscreen => "header_fullscreen",
            SlotKey::Footer => "footer",
            SlotKey::FooterCaption => "footer_caption",
            SlotKey::FooterCount => "footer_count",
            SlotKey::Navigation => "navigation",
            SlotKey::NavigationPrev => "navigation_prev",
            SlotKey::NavigationNext => "navigation_next",
            SlotKey::View => "view",
        }
    }
}

/// Resolved renderer per slot. Absent keys render nothing.
#[derive(Debug, Clone)]
pub struct ComponentSet<C> {
    slots: BTreeMap<SlotKey, C>,
}

impl<C> Default for ComponentSet<C> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<C> ComponentSet<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: SlotKey, component: C) -> Self {
        self.slots.insert(key, component);
        self
    }

    pub fn get(&self, key: SlotKey) -> Option<&C> {
        self.slots.get(&key)
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Caller replacements. `Some(c)` replaces the default, `None` removes the slot.
#[derive(Debug, Clone)]
pub struct ComponentOverrides<C> {
    entries: BTreeMap<SlotKey, Option<C>>,
}

impl<C> Default for ComponentOverrides<C> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<C> ComponentOverrides<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(mut self, key: SlotKey, component: C) -> Self {
        self.entries.insert(key, Some(component));
        self
    }

    pub fn suppress(mut self, key: SlotKey) -> Self {
        self.entries.insert(key, None);
        self
    }

    pub fn get(&self, key: SlotKey) -> Option<&Option<C>> {
        self.entries.get(&key)
    }
}

/// Merge caller overrides over the defaults, key by key
pub fn resolve<C: Clone>(
    defaults: &ComponentSet<C>,
    overrides: Option<&ComponentOverrides<C>>,
) -> ComponentSet<C> {
    let mut slots = BTreeMap::new();
    for key in SlotKey::ALL {
        let chosen = match overrides.and_then(|o| o.get(key)) {
            Some(replacement) => replacement.as_ref(),
            None => defaults.get(key),
        };
        if let Some(component) = chosen {
            slots.insert(key, component.clone());
        }
    }
    ComponentSet { slots }
}

/// Caches the resolved set and re-resolves only when the override `Arc` changes
#[derive(Debug)]
pub struct ComponentRegistry<C> {
    defaults: ComponentSet<C>,
    source: Option<Arc<ComponentOverrides<C>>>,
    resolved: Arc<ComponentSet<C>>,
}

impl<C: Clone> ComponentRegistry<C> {
    pub fn new(defaults: ComponentSet<C>, overrides: Option<Arc<ComponentOverrides<C>>>) -> Self {
        let resolved = Arc::new(resolve(&defaults, overrides.as_deref()));
        Self {
            defaults,
            source: overrides,
            resolved,
        }
    }

    /// Returns true when the overrides changed identity and the set was rebuilt
    pub fn refresh(&mut self, overrides: Option<&Arc<ComponentOverrides<C>>>) -> bool {
        let unchanged = match (self.source.as_ref(), overrides) {
            (None, None) => true,
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.source = overrides.cloned();
        self.resolved = Arc::new(resolve(&self.defaults, self.source.as_deref()));
        debug!(slots = self.resolved.len(), "Re-resolved carousel components");
        true
    }

    pub fn resolved(&self) -> &Arc<ComponentSet<C>> {
        &self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ComponentSet<&'static str> {
        ComponentSet::new()
            .with(SlotKey::Container, "container")
            .with(SlotKey::Header, "header")
            .with(SlotKey::Navigation, "navigation")
            .with(SlotKey::View, "view")
    }

    #[test]
    fn test_resolve_without_overrides_keeps_defaults() {
        let set = resolve(&defaults(), None);
        assert_eq!(set.len(), 4);
        assert_eq!(set.get(SlotKey::Header), Some(&"header"));
        assert_eq!(set.get(SlotKey::Footer), None);
    }

    #[test]
    fn test_override_replaces_single_key() {
        let overrides = ComponentOverrides::new().replace(SlotKey::Header, "custom");
        let set = resolve(&defaults(), Some(&overrides));
        assert_eq!(set.get(SlotKey::Header), Some(&"custom"));
        assert_eq!(set.get(SlotKey::View), Some(&"view"));
        assert_eq!(set.get(SlotKey::Navigation), Some(&"navigation"));
    }

    #[test]
    fn test_override_can_suppress_and_add() {
        let overrides = ComponentOverrides::new()
            .suppress(SlotKey::Navigation)
            .replace(SlotKey::Footer, "footer");
        let set = resolve(&defaults(), Some(&overrides));
        assert!(!set.contains(SlotKey::Navigation));
        assert_eq!(set.get(SlotKey::Footer), Some(&"footer"));
    }

    #[test]
    fn test_registry_refresh_uses_identity() {
        let overrides = Arc::new(ComponentOverrides::new().replace(SlotKey::Header, "a"));
        let mut registry = ComponentRegistry::new(defaults(), Some(overrides.clone()));
        let before = registry.resolved().clone();

        assert!(!registry.refresh(Some(&overrides)));
        assert!(Arc::ptr_eq(&before, registry.resolved()));

        // equal contents, new identity
        let copy = Arc::new(ComponentOverrides::new().replace(SlotKey::Header, "a"));
        assert!(registry.refresh(Some(&copy)));
        assert!(!Arc::ptr_eq(&before, registry.resolved()));

        assert!(registry.refresh(None));
        assert_eq!(registry.resolved().get(SlotKey::Header), Some(&"header"));
        assert!(!registry.refresh(None));
    }
}
