//! Storage substrates for the persisted session record
//!
//! Provides the production file-backed durable store, in-memory doubles for
//! both substrates, and the [`SessionVault`] that keeps the durable store and
//! the cookie jar in lockstep: every write and every clear touches both.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use painel_domain::constants::{
    ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_KEY, REFRESH_TOKEN_COOKIE, REFRESH_TOKEN_KEY, USER_KEY,
};
use painel_domain::{Result, SessionError, UserProfile};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::traits::{CookieJar, DurableStore};

/// In-memory durable store
///
/// Used by tests and by hosts that keep the session for the process lifetime
/// only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, String> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), String> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> std::result::Result<(), String> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// In-memory cookie jar
///
/// Records what a browser jar would hold so tests can assert on the cookie
/// substrate.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RwLock<HashMap<String, String>>,
}

impl MemoryCookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a cookie, if set
    pub async fn value(&self, name: &str) -> Option<String> {
        self.cookies.read().await.get(name).cloned()
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn set(&self, name: &str, value: &str) -> std::result::Result<(), String> {
        self.cookies.write().await.insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, name: &str) -> std::result::Result<(), String> {
        self.cookies.write().await.remove(name);
        Ok(())
    }
}

/// File-backed durable store
///
/// Persists the session record as a flat JSON object. Writes within one
/// process are serialized by an internal lock; across processes the file is
/// last-writer-wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), guard: Mutex::new(()) }
    }

    async fn read_entries(&self) -> std::result::Result<HashMap<String, String>, String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| format!("session store at {} is corrupt: {e}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(format!("failed to read {}: {e}", self.path.display())),
        }
    }

    async fn write_entries(
        &self,
        entries: &HashMap<String, String>,
    ) -> std::result::Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
            }
        }

        let contents = serde_json::to_string(entries)
            .map_err(|e| format!("failed to encode session store: {e}"))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| format!("failed to write {}: {e}", self.path.display()))
    }
}

#[async_trait]
impl DurableStore for FileStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, String> {
        let _guard = self.guard.lock().await;
        Ok(self.read_entries().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> std::result::Result<(), String> {
        let _guard = self.guard.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> std::result::Result<(), String> {
        let _guard = self.guard.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}

/// Couples the durable store and the cookie jar
///
/// The persisted session record lives in both substrates: three durable keys
/// plus the two token cookies the edge guard reads. The vault is the only
/// writer, which is what keeps them in lockstep.
#[derive(Clone)]
pub struct SessionVault {
    store: Arc<dyn DurableStore>,
    cookies: Arc<dyn CookieJar>,
}

impl SessionVault {
    #[must_use]
    pub fn new(store: Arc<dyn DurableStore>, cookies: Arc<dyn CookieJar>) -> Self {
        Self { store, cookies }
    }

    /// Persist a full session record after login
    ///
    /// # Errors
    /// Returns `SessionError::Storage` if either substrate cannot be written
    pub async fn persist_session(
        &self,
        access: &str,
        refresh: &str,
        user: &UserProfile,
    ) -> Result<()> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| SessionError::Storage(format!("failed to encode user profile: {e}")))?;

        self.store.set(ACCESS_TOKEN_KEY, access).await.map_err(SessionError::Storage)?;
        self.store.set(REFRESH_TOKEN_KEY, refresh).await.map_err(SessionError::Storage)?;
        self.store.set(USER_KEY, &user_json).await.map_err(SessionError::Storage)?;

        self.cookies.set(ACCESS_TOKEN_COOKIE, access).await.map_err(SessionError::Storage)?;
        self.cookies.set(REFRESH_TOKEN_COOKIE, refresh).await.map_err(SessionError::Storage)?;

        debug!("Session record persisted");
        Ok(())
    }

    /// Replace the access token in both substrates
    ///
    /// # Errors
    /// Returns `SessionError::Storage` if either substrate cannot be written
    pub async fn persist_access(&self, access: &str) -> Result<()> {
        self.store.set(ACCESS_TOKEN_KEY, access).await.map_err(SessionError::Storage)?;
        self.cookies.set(ACCESS_TOKEN_COOKIE, access).await.map_err(SessionError::Storage)?;
        debug!("Access token updated");
        Ok(())
    }

    /// Replace the refresh token in both substrates
    ///
    /// # Errors
    /// Returns `SessionError::Storage` if either substrate cannot be written
    pub async fn persist_refresh(&self, refresh: &str) -> Result<()> {
        self.store.set(REFRESH_TOKEN_KEY, refresh).await.map_err(SessionError::Storage)?;
        self.cookies.set(REFRESH_TOKEN_COOKIE, refresh).await.map_err(SessionError::Storage)?;
        debug!("Refresh token rotated");
        Ok(())
    }

    /// Stored access token, if any
    ///
    /// # Errors
    /// Returns `SessionError::Storage` if the substrate cannot be read
    pub async fn access_token(&self) -> Result<Option<String>> {
        self.store.get(ACCESS_TOKEN_KEY).await.map_err(SessionError::Storage)
    }

    /// Stored refresh token, if any
    ///
    /// # Errors
    /// Returns `SessionError::Storage` if the substrate cannot be read
    pub async fn refresh_token(&self) -> Result<Option<String>> {
        self.store.get(REFRESH_TOKEN_KEY).await.map_err(SessionError::Storage)
    }

    /// Stored user profile, if any
    ///
    /// # Errors
    /// Returns `SessionError::MalformedSession` if the stored profile is not
    /// valid JSON, `SessionError::Storage` if the substrate cannot be read
    pub async fn user(&self) -> Result<Option<UserProfile>> {
        match self.store.get(USER_KEY).await.map_err(SessionError::Storage)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SessionError::MalformedSession(format!("stored user profile: {e}"))),
            None => Ok(None),
        }
    }

    /// Remove the session record from both substrates
    ///
    /// Best-effort: a substrate failure must never keep the rest of the
    /// record alive, so individual removals are not propagated.
    pub async fn clear(&self) {
        let _ = self.store.remove(ACCESS_TOKEN_KEY).await;
        let _ = self.store.remove(REFRESH_TOKEN_KEY).await;
        let _ = self.store.remove(USER_KEY).await;

        let _ = self.cookies.clear(ACCESS_TOKEN_COOKIE).await;
        let _ = self.cookies.clear(REFRESH_TOKEN_COOKIE).await;

        debug!("Session record cleared");
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for session::storage.
    use tempfile::TempDir;

    use super::*;

    fn sample_user() -> UserProfile {
        UserProfile {
            id: 1,
            email: "a@b.com".to_string(),
            name: "Ana Souza".to_string(),
            cpf: None,
            phone: None,
            avatar: None,
            direction_id: Some(2),
            direction_name: Some("Diretoria de TI".to_string()),
            management_id: None,
            management_name: None,
            coordination_id: None,
            coordination_name: None,
        }
    }

    fn memory_vault() -> (SessionVault, Arc<MemoryStore>, Arc<MemoryCookieJar>) {
        let store = Arc::new(MemoryStore::new());
        let cookies = Arc::new(MemoryCookieJar::new());
        let vault = SessionVault::new(store.clone(), cookies.clone());
        (vault, store, cookies)
    }

    /// Validates `MemoryStore` behavior for the get/set/remove roundtrip
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures an absent key reads as `None`.
    /// - Confirms a written value reads back.
    /// - Ensures a removed key reads as `None` and removal is idempotent.
    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("access_token", "T1").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), Some("T1".to_string()));

        store.remove("access_token").await.unwrap();
        store.remove("access_token").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), None);
    }

    /// Validates `FileStore` behavior for the reopen scenario.
    ///
    /// Assertions:
    /// - Confirms values written by one instance are visible to another
    ///   instance opened on the same path.
    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        tokio_test::block_on(async {
            let store = FileStore::new(&path);
            store.set("access_token", "T1").await.unwrap();
            store.set("user", r#"{"id":1}"#).await.unwrap();
        });

        tokio_test::block_on(async {
            let reopened = FileStore::new(&path);
            assert_eq!(reopened.get("access_token").await.unwrap(), Some("T1".to_string()));
            assert_eq!(reopened.get("user").await.unwrap(), Some(r#"{"id":1}"#.to_string()));
        });
    }

    /// Validates `FileStore` behavior for the missing file scenario.
    ///
    /// Assertions:
    /// - Ensures reading before any write yields `None` instead of an error.
    /// - Ensures removing from a missing file succeeds.
    #[tokio::test]
    async fn test_file_store_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("never-written.json"));

        assert_eq!(store.get("access_token").await.unwrap(), None);
        store.remove("access_token").await.unwrap();
    }

    /// Validates `FileStore` behavior for the corrupt file scenario.
    ///
    /// Assertions:
    /// - Ensures a file that is not a JSON object surfaces a storage error.
    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        let result = store.get("access_token").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("corrupt"));
    }

    /// Validates `SessionVault::persist_session` behavior for the lockstep
    /// write scenario.
    ///
    /// Assertions:
    /// - Confirms all three durable keys are written.
    /// - Confirms both token cookies are written with the same values.
    #[tokio::test]
    async fn test_vault_persist_session_writes_both_substrates() {
        let (vault, store, cookies) = memory_vault();

        vault.persist_session("T1", "R1", &sample_user()).await.unwrap();

        assert_eq!(store.get("access_token").await.unwrap(), Some("T1".to_string()));
        assert_eq!(store.get("refresh_token").await.unwrap(), Some("R1".to_string()));
        assert!(store.get("user").await.unwrap().is_some());

        assert_eq!(cookies.value("access_token").await, Some("T1".to_string()));
        assert_eq!(cookies.value("refresh_token").await, Some("R1".to_string()));
    }

    /// Validates `SessionVault::persist_access` behavior for the partial
    /// update scenario.
    ///
    /// Assertions:
    /// - Confirms the access token changes in both substrates.
    /// - Confirms the refresh token is untouched in both substrates.
    #[tokio::test]
    async fn test_vault_persist_access_leaves_refresh_untouched() {
        let (vault, store, cookies) = memory_vault();
        vault.persist_session("T1", "R1", &sample_user()).await.unwrap();

        vault.persist_access("T2").await.unwrap();

        assert_eq!(store.get("access_token").await.unwrap(), Some("T2".to_string()));
        assert_eq!(store.get("refresh_token").await.unwrap(), Some("R1".to_string()));
        assert_eq!(cookies.value("access_token").await, Some("T2".to_string()));
        assert_eq!(cookies.value("refresh_token").await, Some("R1".to_string()));
    }

    /// Validates `SessionVault::persist_refresh` behavior for the rotation
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms the refresh token changes in both substrates.
    #[tokio::test]
    async fn test_vault_persist_refresh_rotates_both_substrates() {
        let (vault, store, cookies) = memory_vault();
        vault.persist_session("T1", "R1", &sample_user()).await.unwrap();

        vault.persist_refresh("R2").await.unwrap();

        assert_eq!(store.get("refresh_token").await.unwrap(), Some("R2".to_string()));
        assert_eq!(cookies.value("refresh_token").await, Some("R2".to_string()));
    }

    /// Validates `SessionVault::user` behavior for the roundtrip and corrupt
    /// record scenarios.
    ///
    /// Assertions:
    /// - Confirms a persisted profile reads back equal.
    /// - Ensures a corrupt stored profile surfaces `MalformedSession`.
    #[tokio::test]
    async fn test_vault_user_roundtrip_and_malformed_record() {
        let (vault, store, _cookies) = memory_vault();
        let user = sample_user();

        vault.persist_session("T1", "R1", &user).await.unwrap();
        assert_eq!(vault.user().await.unwrap(), Some(user));

        store.set("user", "{not json").await.unwrap();
        let result = vault.user().await;
        assert!(matches!(result, Err(SessionError::MalformedSession(_))));
    }

    /// Validates `SessionVault::clear` behavior for the teardown scenario.
    ///
    /// Assertions:
    /// - Ensures all durable keys are removed.
    /// - Ensures both cookies are removed.
    /// - Ensures clearing an already-empty vault completes.
    #[tokio::test]
    async fn test_vault_clear_empties_both_substrates() {
        let (vault, store, cookies) = memory_vault();
        vault.persist_session("T1", "R1", &sample_user()).await.unwrap();

        vault.clear().await;

        assert_eq!(store.get("access_token").await.unwrap(), None);
        assert_eq!(store.get("refresh_token").await.unwrap(), None);
        assert_eq!(store.get("user").await.unwrap(), None);
        assert_eq!(cookies.value("access_token").await, None);
        assert_eq!(cookies.value("refresh_token").await, None);

        vault.clear().await;
    }
}
