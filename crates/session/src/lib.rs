//! Session lifecycle for the Painel dashboard
//!
//! This crate owns the authenticated session: the JWT pair issued by the
//! accounts backend, the user profile stored next to it, and every
//! transition the record goes through between login and logout.
//!
//! # Features
//!
//! - **Credential Exchange**: Email/password login against the accounts API
//! - **Durable Record**: Token pair and profile persisted through pluggable
//!   storage, mirrored into cookies for the edge route guard
//! - **Coalesced Renewal**: One in-flight refresh shared by every caller
//! - **Expiry Watcher**: Background task that renews shortly before expiry
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  SessionService  │  Lifecycle orchestrator
//! └────────┬─────────┘
//!          │
//!          ├──► AccountsClient  (HTTP token endpoints)
//!          ├──► SessionVault    (Durable store + cookie jar in lockstep)
//!          │         │
//!          │         └──► DurableStore / CookieJar  (Host-provided substrates)
//!          │
//!          └──► claims          (Unverified expiry decode)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use painel_domain::PainelConfig;
//! use painel_session::{
//!     AccountsClient, FileStore, MemoryCookieJar, SessionService, SessionVault,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PainelConfig::default();
//!     let vault = SessionVault::new(
//!         Arc::new(FileStore::new("session.json")),
//!         Arc::new(MemoryCookieJar::new()),
//!     );
//!     let service = Arc::new(SessionService::new(
//!         AccountsClient::new(&config.http)?,
//!         vault,
//!         &config.session,
//!     ));
//!
//!     let session = service.login("user@example.com", "password").await?;
//!     println!("signed in as {}", session.user.name);
//!
//!     service.clone().start_watcher().await;
//!     // ... hand the service to the request gateway ...
//!     service.shutdown().await;
//!     service.logout().await;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod accounts;
pub mod claims;
pub mod service;
pub mod storage;
pub mod traits;
pub mod types;

pub use accounts::AccountsClient;
pub use service::SessionService;
pub use storage::{FileStore, MemoryCookieJar, MemoryStore, SessionVault};
pub use traits::{AccountsBackend, CookieJar, CredentialProvider, DurableStore};
pub use types::{ActiveSession, LoginResponse, RefreshResponse};
