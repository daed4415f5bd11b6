//! HTTP request handlers.

pub mod auth_handler;
pub mod category_handler;
pub mod mail_handler;
pub mod media_handler;
pub mod order_handler;
pub mod post_handler;
pub mod public_handler;
pub mod service_handler;
pub mod setting_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use category_handler::category_routes;
pub use mail_handler::mail_routes;
pub use media_handler::media_routes;
pub use order_handler::order_routes;
pub use post_handler::post_routes;
pub use public_handler::public_routes;
pub use service_handler::service_routes;
pub use setting_handler::setting_routes;
pub use user_handler::user_routes;
