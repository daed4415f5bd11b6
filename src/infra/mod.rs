//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - SMTP mail transport
//! - Schema migrations

pub mod db;
pub mod mailer;
pub mod repositories;

pub use db::{Database, Migrator};
pub use mailer::{MailMessage, MailTemplate, Mailer, OrderLine, SmtpMailer};
pub use repositories::{
    CategoryRepository, CategoryStore, MediaRepository, MediaStore, OrderRepository, OrderStore,
    PostRepository, PostStore, ServiceRepository, ServiceStore, SettingRepository, SettingStore,
    TokenRepository, TokenStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use mailer::MockMailer;
