#![forbid(unsafe_code)]

//! Element identity → profile lookup.

use ahash::AHashMap;

use crate::event::ElementId;
use crate::profile::ElementProfile;

/// Profiles of every registered element, keyed by element id.
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    profiles: AHashMap<ElementId, ElementProfile>,
}

impl ProfileRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `profile` for `id`, returning the profile it replaced.
    pub fn insert(&mut self, id: ElementId, profile: ElementProfile) -> Option<ElementProfile> {
        self.profiles.insert(id, profile)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<ElementProfile> {
        self.profiles.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ElementProfile> {
        self.profiles.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementProfile> {
        self.profiles.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.profiles.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
