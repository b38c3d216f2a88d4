//! Application state shared across handlers

use auth::{
    CredentialService, ResetPolicy, SessionManager,
    repositories::{
        MemoryResetTokenRepository, MemorySessionRepository, MemoryUserRepository,
        PgResetTokenRepository, PgSessionRepository, PgUserRepository, ResetTokenRepository,
        SessionRepository, UserRepository,
    },
};
use catalog::{
    CatalogCache, CatalogClient,
    repositories::{
        BookRepository, GenreRepository, MemoryBookRepository, MemoryGenreRepository,
        PgBookRepository, PgGenreRepository,
    },
};
use chrono::Duration;
use common::{
    notifications::{
        MemoryNotificationRepository, NotificationLedger, NotificationRepository,
        PgNotificationRepository,
    },
    settings::Settings,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    contact::ContactService,
    cookie::CookieConfig,
    repositories::{ContactRepository, MemoryContactRepository, PgContactRepository},
};

/// Every storage handle the services need
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub reset_tokens: Arc<dyn ResetTokenRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub books: Arc<dyn BookRepository>,
    pub contacts: Arc<dyn ContactRepository>,
}

impl Repositories {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            reset_tokens: Arc::new(PgResetTokenRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool.clone())),
            notifications: Arc::new(PgNotificationRepository::new(pool.clone())),
            genres: Arc::new(PgGenreRepository::new(pool.clone())),
            books: Arc::new(PgBookRepository::new(pool.clone())),
            contacts: Arc::new(PgContactRepository::new(pool.clone())),
        }
    }

    pub fn in_memory() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(MemoryUserRepository::new());
        Self {
            reset_tokens: Arc::new(MemoryResetTokenRepository::new(users.clone())),
            users,
            sessions: Arc::new(MemorySessionRepository::new()),
            notifications: Arc::new(MemoryNotificationRepository::new()),
            genres: Arc::new(MemoryGenreRepository::new()),
            books: Arc::new(MemoryBookRepository::new()),
            contacts: Arc::new(MemoryContactRepository::new()),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialService,
    pub catalog: CatalogCache,
    pub notifications: NotificationLedger,
    pub contact: ContactService,
    pub cookie: CookieConfig,
    /// Absent when running on the in-memory backend
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        catalog_client: Arc<dyn CatalogClient>,
        settings: &Settings,
        db_pool: Option<PgPool>,
    ) -> Self {
        let notifications = NotificationLedger::new(repositories.notifications);

        let sessions = SessionManager::new(
            repositories.sessions,
            Duration::days(settings.session.ttl_days),
        );
        let credentials = CredentialService::new(
            repositories.users,
            repositories.reset_tokens,
            sessions,
            notifications.clone(),
            ResetPolicy {
                token_ttl: Duration::minutes(settings.reset.token_ttl_minutes),
                public_base_url: settings.reset.public_base_url.clone(),
            },
        );

        let catalog = CatalogCache::new(repositories.genres, repositories.books, catalog_client)
            .with_max_results(settings.catalog.max_results)
            .with_timeout(std::time::Duration::from_secs(settings.catalog.timeout_secs));

        let contact = ContactService::new(repositories.contacts, notifications.clone());

        Self {
            credentials,
            catalog,
            notifications,
            contact,
            cookie: CookieConfig::from_settings(&settings.session),
            db_pool,
        }
    }
}
