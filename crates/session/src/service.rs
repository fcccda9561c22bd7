//! Session lifecycle service
//!
//! Central owner of the persisted session record. Everything that creates,
//! restores, renews, or destroys a session goes through [`SessionService`];
//! the request gateway consumes it through the
//! [`CredentialProvider`](super::traits::CredentialProvider) trait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use painel_domain::{Result, SessionConfig, SessionError, UserProfile};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::claims;
use super::storage::SessionVault;
use super::traits::{AccountsBackend, CredentialProvider};
use super::types::ActiveSession;

/// Session service with scheduled token renewal
///
/// Owns the session lifecycle end to end:
/// 1. Exchanges credentials for a token pair on login
/// 2. Restores the session from the durable record on startup
/// 3. Renews the access token, coalescing concurrent renewals
/// 4. Runs a background watcher that renews shortly before expiry
/// 5. Revokes the refresh token and clears everything on logout
pub struct SessionService<B: AccountsBackend + 'static> {
    backend: Arc<B>,
    vault: SessionVault,
    refresh_threshold_seconds: i64,
    check_interval: Duration,
    /// Outcome of the most recent renewal; the lock serializes renewals.
    renewal_outcome: Mutex<bool>,
    /// Bumped after every completed renewal so queued callers can tell that
    /// a renewal finished while they waited.
    renewal_generation: AtomicU64,
    watcher: Mutex<Option<JoinHandle<()>>>,
    forced_logout: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl<B: AccountsBackend + 'static> SessionService<B> {
    /// Create a new session service
    ///
    /// # Arguments
    /// * `backend` - Accounts backend used for login, renewal, and revocation
    /// * `vault` - Coupled storage for the persisted session record
    /// * `config` - Renewal threshold and watcher interval
    #[must_use]
    pub fn new(backend: B, vault: SessionVault, config: &SessionConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            vault,
            refresh_threshold_seconds: config.refresh_threshold_seconds,
            check_interval: Duration::from_secs(config.expiry_check_interval_seconds),
            renewal_outcome: Mutex::new(false),
            renewal_generation: AtomicU64::new(0),
            watcher: Mutex::new(None),
            forced_logout: None,
        }
    }

    /// Override the watcher interval
    #[must_use]
    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Register a callback invoked when the session is torn down
    ///
    /// Fires at the end of [`logout`](Self::logout) and of the forced logout
    /// issued by the gateway, after the persisted record has been cleared.
    /// Hosts typically navigate to the login screen here.
    #[must_use]
    pub fn with_forced_logout_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.forced_logout = Some(Arc::new(hook));
        self
    }

    /// Storage handle for the persisted session record
    #[must_use]
    pub fn vault(&self) -> &SessionVault {
        &self.vault
    }

    /// Check whether a session record is currently persisted
    #[must_use]
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.vault.access_token().await, Ok(Some(_)))
    }

    /// User profile from the persisted record
    #[must_use]
    pub async fn user(&self) -> Option<UserProfile> {
        self.vault.user().await.ok().flatten()
    }

    /// Access token from the persisted record
    ///
    /// Reads the live value, so it reflects renewals issued after the
    /// [`ActiveSession`] snapshot was taken.
    #[must_use]
    pub async fn access_token(&self) -> Option<String> {
        self.vault.access_token().await.ok().flatten()
    }

    /// Exchange credentials for a session
    ///
    /// On success the full record is persisted to both substrates before the
    /// session is returned.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidCredentials` with the backend's message
    /// when the credentials are rejected, `SessionError::Network` when the
    /// backend is unreachable, `SessionError::Storage` when the record cannot
    /// be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<ActiveSession> {
        let response = self.backend.obtain_token(email, password).await?;
        self.vault.persist_session(&response.access, &response.refresh, &response.user).await?;

        info!(user_id = response.user.id, "Login succeeded");

        Ok(ActiveSession { access_token: response.access, user: response.user })
    }

    /// Terminate the session
    ///
    /// Revokes the refresh token when both tokens are still stored, then
    /// clears the record from both substrates and fires the forced-logout
    /// hook so the host navigates away. Revocation is best-effort and never
    /// blocks the local teardown, so this cannot fail.
    pub async fn logout(&self) {
        let access = self.vault.access_token().await.ok().flatten();
        let refresh = self.vault.refresh_token().await.ok().flatten();

        if let (Some(access), Some(refresh)) = (access, refresh) {
            if let Err(e) = self.backend.logout(&access, &refresh).await {
                debug!("Token revocation failed: {e}");
            }
        }

        self.clear_and_notify().await;
        info!("Logged out");
    }

    /// Restore the session from the durable record
    ///
    /// Call once on startup. A record with a live access token is returned
    /// as-is; an expired token triggers one renewal that decides whether the
    /// session survives. An unreadable record is cleared.
    ///
    /// # Returns
    /// `Ok(None)` when no usable session is stored.
    ///
    /// # Errors
    /// Returns `SessionError::Storage` if the durable store cannot be read
    pub async fn initialize(&self) -> Result<Option<ActiveSession>> {
        let access = self.vault.access_token().await?;
        let user = match self.vault.user().await {
            Ok(user) => user,
            Err(SessionError::MalformedSession(e)) => {
                warn!("Clearing unreadable session record: {e}");
                self.vault.clear().await;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let (Some(access), Some(user)) = (access, user) else {
            return Ok(None);
        };

        let expired = match claims::is_expired(&access) {
            Ok(expired) => expired,
            Err(e) => {
                warn!("Clearing session with undecodable access token: {e}");
                self.vault.clear().await;
                return Ok(None);
            }
        };

        if !expired {
            debug!("Session restored from durable record");
            return Ok(Some(ActiveSession { access_token: access, user }));
        }

        // Stored token already expired; one renewal decides whether the
        // session survives.
        if self.refresh_access_token().await {
            if let Some(access) = self.vault.access_token().await? {
                return Ok(Some(ActiveSession { access_token: access, user }));
            }
        }

        Ok(None)
    }

    /// Renew the access token using the stored refresh token
    ///
    /// Concurrent callers coalesce: whoever arrives while a renewal is in
    /// flight waits for it and adopts its outcome instead of issuing a
    /// second backend request.
    ///
    /// # Returns
    /// `true` when a renewed token was persisted. `false` means the session
    /// could not be renewed and the persisted record has been cleared.
    pub async fn refresh_access_token(&self) -> bool {
        let generation = self.renewal_generation.load(Ordering::SeqCst);
        let mut outcome = self.renewal_outcome.lock().await;

        if self.renewal_generation.load(Ordering::SeqCst) != generation {
            // A renewal completed while this caller waited for the lock.
            debug!("Adopting outcome of the renewal that just finished");
            return *outcome;
        }

        let renewed = self.renew_once().await;
        *outcome = renewed;
        self.renewal_generation.fetch_add(1, Ordering::SeqCst);
        renewed
    }

    async fn renew_once(&self) -> bool {
        let refresh = match self.vault.refresh_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No refresh token stored; clearing session");
                self.vault.clear().await;
                return false;
            }
            Err(e) => {
                warn!("Failed to read refresh token: {e}");
                self.vault.clear().await;
                return false;
            }
        };

        let response = match self.backend.refresh_token(&refresh).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Access token renewal rejected: {e}");
                self.vault.clear().await;
                return false;
            }
        };

        if let Err(e) = self.vault.persist_access(&response.access).await {
            warn!("Failed to persist renewed access token: {e}");
            self.vault.clear().await;
            return false;
        }

        // The backend rotates refresh tokens; keep the stored one when no
        // replacement is issued.
        if let Some(rotated) = response.refresh {
            if let Err(e) = self.vault.persist_refresh(&rotated).await {
                warn!("Failed to persist rotated refresh token: {e}");
                self.vault.clear().await;
                return false;
            }
        }

        info!("Access token renewed");
        true
    }

    /// Start the background expiry watcher
    ///
    /// Checks the stored access token on a fixed interval and renews it once
    /// it is within the refresh threshold. Starting again replaces the
    /// previous watcher, so repeated calls never stack checks.
    ///
    /// # Example
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use painel_domain::PainelConfig;
    /// # use painel_session::accounts::AccountsClient;
    /// # use painel_session::service::SessionService;
    /// # use painel_session::storage::{FileStore, MemoryCookieJar, SessionVault};
    /// # async fn example() -> painel_domain::Result<()> {
    /// let config = PainelConfig::default();
    /// let vault = SessionVault::new(
    ///     Arc::new(FileStore::new("session.json")),
    ///     Arc::new(MemoryCookieJar::new()),
    /// );
    /// let service = Arc::new(SessionService::new(
    ///     AccountsClient::new(&config.http)?,
    ///     vault,
    ///     &config.session,
    /// ));
    /// service.clone().start_watcher().await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn start_watcher(self: Arc<Self>) {
        let mut watcher = self.watcher.lock().await;
        if let Some(previous) = watcher.take() {
            previous.abort();
        }

        let service = Arc::clone(&self);
        *watcher = Some(tokio::spawn(async move {
            debug!("Expiry watcher started");
            loop {
                sleep(service.check_interval).await;
                service.check_expiry().await;
            }
        }));
    }

    /// Stop the background expiry watcher
    ///
    /// Call during host teardown. Stopping without a running watcher is a
    /// no-op.
    pub async fn shutdown(&self) {
        if let Some(watcher) = self.watcher.lock().await.take() {
            watcher.abort();
            debug!("Expiry watcher stopped");
        }
    }

    async fn check_expiry(&self) {
        let Ok(Some(access)) = self.vault.access_token().await else {
            return;
        };

        match claims::seconds_until_expiry(&access) {
            Ok(remaining) if remaining < self.refresh_threshold_seconds => {
                debug!(remaining, "Access token near expiry, renewing");
                if !self.refresh_access_token().await {
                    warn!("Scheduled renewal failed; session cleared");
                }
            }
            Ok(_) => {}
            // Undecodable token; leave it for request-time handling.
            Err(_) => {}
        }
    }

    /// Clear the persisted record, then tell the host the session is gone.
    async fn clear_and_notify(&self) {
        self.vault.clear().await;

        if let Some(hook) = &self.forced_logout {
            hook();
        }
    }
}

#[async_trait]
impl<B: AccountsBackend + 'static> CredentialProvider for SessionService<B> {
    async fn stored_access_token(&self) -> Option<String> {
        self.vault.access_token().await.ok().flatten()
    }

    async fn renew_credentials(&self) -> bool {
        self.refresh_access_token().await
    }

    async fn force_logout(&self) {
        self.clear_and_notify().await;
        info!("Session forcibly terminated");
    }
}
