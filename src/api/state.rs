//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::repositories::{
    CategoryStore, MediaStore, OrderStore, PostStore, ServiceStore, SettingStore, TokenStore,
    UserStore,
};
use crate::infra::{Database, SmtpMailer};
use crate::services::{
    AuthService, Authenticator, CatalogManager, CatalogService, CategoryManager, CategoryService,
    MailDispatcher, MailService, MediaManager, MediaService, OrderManager, OrderService,
    PolicyEngine, PostManager, PostService, SettingManager, SettingService, TokenService,
    UserManager, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub category_service: Arc<dyn CategoryService>,
    pub post_service: Arc<dyn PostService>,
    pub catalog_service: Arc<dyn CatalogService>,
    pub order_service: Arc<dyn OrderService>,
    pub media_service: Arc<dyn MediaService>,
    pub setting_service: Arc<dyn SettingService>,
    pub mail_service: Arc<dyn MailService>,
    /// Access-token verification for the auth middleware
    pub tokens: TokenService,
    /// Immutable role → permission table
    pub policy: Arc<PolicyEngine>,
    /// Service-to-service credential, when configured
    pub api_key: Option<String>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire repositories and services from a connected database and the
    /// loaded configuration.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let db = database.get_connection();

        let users = Arc::new(UserStore::new(db.clone()));
        let verifications = Arc::new(TokenStore::new(db.clone()));
        let categories = Arc::new(CategoryStore::new(db.clone()));
        let posts = Arc::new(PostStore::new(db.clone()));
        let services = Arc::new(ServiceStore::new(db.clone()));
        let orders = Arc::new(OrderStore::new(db.clone()));
        let media = Arc::new(MediaStore::new(db.clone()));
        let settings = Arc::new(SettingStore::new(db));

        let tokens = TokenService::new(&config);
        let policy = Arc::new(PolicyEngine::from_file(&config.permissions_path)?);
        let mailer = Arc::new(SmtpMailer::new(config.smtp.clone()));

        let auth_service = Arc::new(Authenticator::new(
            users.clone(),
            verifications,
            settings.clone(),
            mailer.clone(),
            tokens.clone(),
        ));

        Ok(Self {
            auth_service,
            user_service: Arc::new(UserManager::new(users)),
            category_service: Arc::new(CategoryManager::new(categories.clone())),
            post_service: Arc::new(PostManager::new(posts, categories)),
            catalog_service: Arc::new(CatalogManager::new(services.clone())),
            order_service: Arc::new(OrderManager::new(orders.clone(), services)),
            media_service: Arc::new(MediaManager::new(media)),
            setting_service: Arc::new(SettingManager::new(settings.clone())),
            mail_service: Arc::new(MailDispatcher::new(settings, orders, mailer)),
            tokens,
            policy,
            api_key: config.api_key.clone(),
            database,
        })
    }
}
