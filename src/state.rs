//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, UserService};
use crate::infrastructure::persistence::{
    PgLinkRepository, PgSessionRepository, PgUserRepository,
};

pub type AppLinkService = LinkService<PgLinkRepository, PgUserRepository>;
pub type AppUserService = UserService<PgUserRepository, PgSessionRepository>;
pub type AppAuthService = AuthService<PgSessionRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub user_service: Arc<AppUserService>,
    pub auth_service: Arc<AppAuthService>,
    pub db: Arc<PgPool>,
    /// Prefix for rendered short URLs, e.g. `https://s.example.com`.
    pub base_url: String,
}

impl AppState {
    /// Wires repositories and services on top of a connection pool.
    pub fn new(
        pool: Arc<PgPool>,
        base_url: String,
        signing_secret: String,
        anonymous_listing: bool,
    ) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let session_repository = Arc::new(PgSessionRepository::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(session_repository, signing_secret));
        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            auth_service.clone(),
        ));
        let link_service = Arc::new(
            LinkService::new(link_repository, user_repository)
                .with_anonymous_listing(anonymous_listing),
        );

        Self {
            link_service,
            user_service,
            auth_service,
            db: pool,
            base_url,
        }
    }

    /// Renders the public short URL for a link identifier.
    pub fn short_url(&self, link_id: &str) -> String {
        self.link_service.get_short_url(&self.base_url, link_id)
    }
}
