//! Backend interface
//!
//! The presentation layer only ever talks to the outside world through these
//! traits, so views and tests can run against the in-memory fakes below.

use anyhow::{bail, Result};
use uuid::Uuid;

use crate::profile::AiProfile;

/// Something that can hand over a whole item collection at once
pub trait ItemSource<T> {
    /// Fetch every item. May fail; callers keep what they had.
    fn fetch_all(&self) -> Result<Vec<T>>;
}

/// Persistence for AI connection profiles
pub trait ProfileStore {
    /// All stored profiles in insertion order
    fn list(&self) -> Result<Vec<AiProfile>>;

    /// Insert or replace a profile (matched by id).
    ///
    /// `api_key` of `None` or blank keeps whatever secret is already stored.
    fn save(&mut self, profile: AiProfile, api_key: Option<&str>) -> Result<()>;

    /// Remove a profile and its secret. Unknown ids are not an error.
    fn delete(&mut self, id: Uuid) -> Result<()>;
}

/// In-memory item source
#[derive(Debug, Clone, Default)]
pub struct MemorySource<T> {
    items: Vec<T>,
    failure: Option<String>,
}

impl<T: Clone> MemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            failure: None,
        }
    }

    /// Make every subsequent fetch fail with `message`
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// Replace the served items and clear any failure
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.failure = None;
    }
}

impl<T: Clone> ItemSource<T> for MemorySource<T> {
    fn fetch_all(&self) -> Result<Vec<T>> {
        if let Some(ref message) = self.failure {
            bail!("{}", message);
        }
        Ok(self.items.clone())
    }
}

/// In-memory profile store that remembers which profiles have a key
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Vec<AiProfile>,
    keys: Vec<(Uuid, String)>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The API key stored for a profile, if any
    pub fn api_key(&self, id: Uuid) -> Option<&str> {
        self.keys
            .iter()
            .find(|(key_id, _)| *key_id == id)
            .map(|(_, key)| key.as_str())
    }
}

impl ProfileStore for MemoryProfileStore {
    fn list(&self) -> Result<Vec<AiProfile>> {
        Ok(self.profiles.clone())
    }

    fn save(&mut self, profile: AiProfile, api_key: Option<&str>) -> Result<()> {
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            self.keys.retain(|(id, _)| *id != profile.id);
            self.keys.push((profile.id, key.to_string()));
        }

        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        self.keys.retain(|(key_id, _)| *key_id != id);
        self.profiles.retain(|p| p.id != id);
        Ok(())
    }
}
