//! AI connection profiles
//!
//! A profile names an OpenAI-compatible chat endpoint and model. The API key
//! belonging to a profile never lives in the profile file; it goes through a
//! [`SecretStore`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::ProfileStore;
use crate::config::Config;

/// File name of the profile list inside the config directory
pub const PROFILES_FILENAME: &str = "ai_profiles.json";

/// Endpoint pre-filled into a fresh profile form
pub const DEFAULT_ENDPOINT: &str = "https://gen.pollinations.ai/v1/chat/completions";

/// Model pre-filled into a fresh profile form
pub const DEFAULT_MODEL: &str = "gemini";

/// A saved connection profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiProfile {
    /// Unique identifier
    pub id: Uuid,
    /// User-defined name
    pub name: String,
    /// Chat completions URL
    pub endpoint: String,
    /// Model name sent with each request
    pub model: String,
}

impl AiProfile {
    /// Create a profile with a fresh id
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }
}

/// Why a profile form cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("API key is required for new profiles")]
    MissingApiKey,
}

/// A validated form, ready to hand to a [`ProfileStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSubmission {
    pub profile: AiProfile,
    /// `None` when editing and the key field was left blank
    pub api_key: Option<String>,
}

/// Editable state behind the "Add / Edit Profile" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    /// Set while editing an existing profile
    pub editing: Option<Uuid>,
    pub name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
}

impl ProfileForm {
    /// Blank form pre-filled with the given endpoint and model
    pub fn with_defaults(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            editing: None,
            name: String::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: String::new(),
        }
    }

    /// Form for editing `profile`; the key field starts blank
    pub fn edit(profile: &AiProfile) -> Self {
        Self {
            editing: Some(profile.id),
            name: profile.name.clone(),
            endpoint: profile.endpoint.clone(),
            model: profile.model.clone(),
            api_key: String::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Check the form and build the profile to save.
    ///
    /// New profiles get a fresh id and must carry a key; edits keep their id
    /// and may leave the key blank to keep the stored one.
    pub fn validate(&self) -> Result<ProfileSubmission, ProfileError> {
        let name = self.name.trim();
        let endpoint = self.endpoint.trim();
        let model = self.model.trim();

        if name.is_empty() {
            return Err(ProfileError::MissingField("Profile name"));
        }
        if endpoint.is_empty() {
            return Err(ProfileError::MissingField("API endpoint"));
        }
        if model.is_empty() {
            return Err(ProfileError::MissingField("Model name"));
        }

        let api_key = Some(self.api_key.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        if self.editing.is_none() && api_key.is_none() {
            return Err(ProfileError::MissingApiKey);
        }

        Ok(ProfileSubmission {
            profile: AiProfile {
                id: self.editing.unwrap_or_else(Uuid::new_v4),
                name: name.to_string(),
                endpoint: endpoint.to_string(),
                model: model.to_string(),
            },
            api_key,
        })
    }
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }
}

/// Storage for API keys, keyed by profile id
pub trait SecretStore: Send {
    fn set(&self, id: Uuid, secret: &str) -> Result<()>;
    fn get(&self, id: Uuid) -> Result<Option<String>>;
    fn remove(&self, id: Uuid) -> Result<()>;
}

/// Keys held for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<HashMap<Uuid, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn set(&self, id: Uuid, secret: &str) -> Result<()> {
        self.secrets
            .lock()
            .map_err(|_| anyhow!("Secret store lock poisoned"))?
            .insert(id, secret.to_string());
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<String>> {
        Ok(self
            .secrets
            .lock()
            .map_err(|_| anyhow!("Secret store lock poisoned"))?
            .get(&id)
            .cloned())
    }

    fn remove(&self, id: Uuid) -> Result<()> {
        self.secrets
            .lock()
            .map_err(|_| anyhow!("Secret store lock poisoned"))?
            .remove(&id);
        Ok(())
    }
}

/// Profiles persisted as a JSON array, keys delegated to a [`SecretStore`]
pub struct JsonProfileStore {
    path: PathBuf,
    secrets: Box<dyn SecretStore>,
}

impl JsonProfileStore {
    /// Store in the default config directory
    pub fn new(secrets: Box<dyn SecretStore>) -> Result<Self> {
        let path = Config::config_dir()?.join(PROFILES_FILENAME);
        Ok(Self::at(path, secrets))
    }

    /// Store at an explicit file path
    pub fn at(path: impl Into<PathBuf>, secrets: Box<dyn SecretStore>) -> Self {
        Self {
            path: path.into(),
            secrets,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a key is stored for `id`
    pub fn has_api_key(&self, id: Uuid) -> bool {
        matches!(self.secrets.get(id), Ok(Some(_)))
    }

    fn write(&self, profiles: &[AiProfile]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create profile directory")?;
        }
        let data = serde_json::to_string_pretty(profiles)
            .context("Failed to serialize profiles")?;
        fs::write(&self.path, data).context("Failed to write profiles file")?;
        Ok(())
    }

    fn store_key(&self, id: Uuid, key: &str) -> Result<()> {
        self.secrets
            .set(id, key)
            .context("Failed to write to secure storage")?;

        match self.secrets.get(id) {
            Ok(Some(stored)) if stored == key => {
                debug!("Key saved and verified for profile {}", id);
                Ok(())
            }
            Ok(Some(_)) => bail!("Secure storage data mismatch (saved vs read)"),
            Ok(None) => bail!("Secure storage did not persist the key"),
            Err(e) => Err(e.context("Secure storage verification failed")),
        }
    }
}

impl ProfileStore for JsonProfileStore {
    fn list(&self) -> Result<Vec<AiProfile>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path).context("Failed to read profiles file")?;
        serde_json::from_str(&data).context("Failed to parse profiles file")
    }

    fn save(&mut self, profile: AiProfile, api_key: Option<&str>) -> Result<()> {
        let mut profiles = self.list()?;
        let is_new = !profiles.iter().any(|p| p.id == profile.id);

        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => self.store_key(profile.id, key)?,
            None if is_new => {
                warn!("Saving new profile {} without an API key", profile.name);
            }
            None => {}
        }

        info!("Saving profile {} ({})", profile.name, profile.id);
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }

        self.write(&profiles)
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        if let Err(e) = self.secrets.remove(id) {
            debug!("No secret removed for profile {}: {}", id, e);
        }

        let mut profiles = self.list()?;
        profiles.retain(|p| p.id != id);
        info!("Deleted profile {}", id);
        self.write(&profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonProfileStore {
        JsonProfileStore::at(
            dir.path().join(PROFILES_FILENAME),
            Box::new(MemorySecretStore::new()),
        )
    }

    #[test]
    fn test_form_requires_fields() {
        let mut form = ProfileForm::default();
        form.api_key = "sk-1".into();
        assert_eq!(form.validate(), Err(ProfileError::MissingField("Profile name")));

        form.name = "OpenAI".into();
        form.endpoint = "   ".into();
        assert_eq!(form.validate(), Err(ProfileError::MissingField("API endpoint")));

        form.endpoint = DEFAULT_ENDPOINT.into();
        form.model.clear();
        assert_eq!(form.validate(), Err(ProfileError::MissingField("Model name")));
    }

    #[test]
    fn test_new_profile_requires_key() {
        let mut form = ProfileForm::default();
        form.name = "Local LLM".into();
        assert_eq!(form.validate(), Err(ProfileError::MissingApiKey));

        form.api_key = "  sk-abc ".into();
        let submission = form.validate().unwrap();
        assert_eq!(submission.api_key.as_deref(), Some("sk-abc"));
        assert_eq!(submission.profile.model, DEFAULT_MODEL);
        assert_eq!(submission.profile.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_edit_keeps_id_and_allows_blank_key() {
        let profile = AiProfile::new("Work", "https://api.example.com/v1", "gpt-4o");
        let mut form = ProfileForm::edit(&profile);
        assert!(form.is_editing());
        assert!(form.api_key.is_empty());

        form.model = "gpt-4o-mini".into();
        let submission = form.validate().unwrap();
        assert_eq!(submission.profile.id, profile.id);
        assert_eq!(submission.profile.model, "gpt-4o-mini");
        assert_eq!(submission.api_key, None);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_json_store_save_update_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let mut first = AiProfile::new("First", "https://a.example/v1", "m1");
        let second = AiProfile::new("Second", "https://b.example/v1", "m2");
        store.save(first.clone(), Some(" key-1 ")).unwrap();
        store.save(second.clone(), None).unwrap();
        assert!(store.has_api_key(first.id));
        assert!(!store.has_api_key(second.id));

        first.name = "First (renamed)".into();
        store.save(first.clone(), None).unwrap();
        assert!(store.has_api_key(first.id), "blank key keeps the stored one");

        let profiles = store.list().unwrap();
        assert_eq!(profiles, vec![first.clone(), second.clone()]);

        store.delete(first.id).unwrap();
        assert_eq!(store.list().unwrap(), vec![second]);
        assert!(!store.has_api_key(first.id));
    }

    #[test]
    fn test_json_store_file_has_no_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .save(AiProfile::new("P", "https://x.example", "m"), Some("sk-secret"))
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("sk-secret"));
        assert!(raw.contains("\"endpoint\""));
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();
        let err = store.list().unwrap_err();
        assert!(err.to_string().contains("Failed to parse profiles file"));
    }

    /// Accepts writes but reads back something else
    struct GarbledSecrets;

    impl SecretStore for GarbledSecrets {
        fn set(&self, _id: Uuid, _secret: &str) -> Result<()> {
            Ok(())
        }

        fn get(&self, _id: Uuid) -> Result<Option<String>> {
            Ok(Some("garbled".into()))
        }

        fn remove(&self, _id: Uuid) -> Result<()> {
            Ok(())
        }
    }

    /// Accepts writes but never keeps them
    struct ForgetfulSecrets;

    impl SecretStore for ForgetfulSecrets {
        fn set(&self, _id: Uuid, _secret: &str) -> Result<()> {
            Ok(())
        }

        fn get(&self, _id: Uuid) -> Result<Option<String>> {
            Ok(None)
        }

        fn remove(&self, _id: Uuid) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_key_mismatch_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROFILES_FILENAME);
        let mut store = JsonProfileStore::at(&path, Box::new(GarbledSecrets));

        let err = store
            .save(AiProfile::new("P", "https://x.example", "m"), Some("sk-real"))
            .unwrap_err();
        assert!(err.to_string().contains("data mismatch"));
        assert!(!path.exists());
    }

    #[test]
    fn test_key_not_persisted_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROFILES_FILENAME);

        let existing = AiProfile::new("Existing", "https://a.example", "m1");
        store_in(&dir).save(existing.clone(), Some("sk-1")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let mut store = JsonProfileStore::at(&path, Box::new(ForgetfulSecrets));
        let err = store
            .save(AiProfile::new("New", "https://b.example", "m2"), Some("sk-2"))
            .unwrap_err();
        assert!(err.to_string().contains("did not persist"));

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(store.list().unwrap(), vec![existing]);
    }
}
