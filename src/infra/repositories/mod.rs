//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;

mod category_repository;
mod media_repository;
mod order_repository;
mod post_repository;
mod service_repository;
mod setting_repository;
mod token_repository;
mod user_repository;

pub use category_repository::{CategoryRepository, CategoryStore};
pub use media_repository::{MediaFileRef, MediaRepository, MediaStore};
pub use order_repository::{OrderRepository, OrderStore};
pub use post_repository::{PostRepository, PostStore};
pub use service_repository::{ServiceRepository, ServiceStore};
pub use setting_repository::{SettingRepository, SettingStore};
pub use token_repository::{TokenRepository, TokenStore, VerificationRecord};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use media_repository::MockMediaRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use post_repository::MockPostRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service_repository::MockServiceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use setting_repository::MockSettingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use token_repository::MockTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
