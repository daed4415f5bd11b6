//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, category_handler, mail_handler, media_handler, order_handler, post_handler,
    public_handler, service_handler, setting_handler, user_handler,
};
use crate::domain::category::{CategoryDetail, CategoryNode, CreateCategory, UpdateCategory};
use crate::domain::media::{FailedDelete, MediaDeleteOutcome, MediaListItem, MediaUploadOutcome};
use crate::domain::order::{
    BulkIds, CreateOrder, OrderItemInput, OrderItemView, OrderView, ServiceRef, UpdateOrder,
};
use crate::domain::post::{
    CategoryRef, CreatePost, PostDetail, PostListItem, PublicPostDetail, PublicPostItem,
    UpdatePost,
};
use crate::domain::service::{
    AddOnInput, AddOnItem, CreateService, ImageInput, ImagePair, LabelInput, LabelItem,
    PublicServiceDetail, PublicServiceItem, ServiceDetail, ServiceListItem, StepDetailInput,
    StepDetailItem, StepInput, StepItem, UpdateService,
};
use crate::domain::setting::{
    SettingBatch, SettingCreateOutcome, SettingEntry, SettingUpdateOutcome,
};
use crate::domain::user::{AuthorRef, Identity, UserListItem, UserRef, UserRole};
use crate::services::{ContactSubmission, LoginResponse, TokenPair};
use crate::types::response::{
    BulkMutationResponse, MessageResponse, MutationResponse, SuccessType,
};

/// OpenAPI documentation for the Studio API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Studio API",
        version = "0.1.0",
        description = "Content/commerce administration backend for a photo-editing studio",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        // Auth
        auth_handler::register,
        auth_handler::verify_email,
        auth_handler::login,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        auth_handler::refresh_token,
        // Users
        user_handler::find_all,
        // Categories
        category_handler::find_all,
        category_handler::create,
        category_handler::find_one,
        category_handler::update,
        category_handler::delete_one,
        category_handler::set_default,
        // Posts
        post_handler::find_all,
        post_handler::create,
        post_handler::find_one,
        post_handler::update,
        post_handler::soft_delete,
        post_handler::restore,
        post_handler::hard_delete,
        // Services
        service_handler::find_all,
        service_handler::create,
        service_handler::find_one,
        service_handler::update,
        service_handler::soft_delete,
        service_handler::restore,
        service_handler::hard_delete,
        // Orders
        order_handler::find_all,
        order_handler::create,
        order_handler::find_one,
        order_handler::update,
        order_handler::soft_delete,
        order_handler::restore,
        order_handler::hard_delete,
        // Media
        media_handler::find_all,
        media_handler::upload,
        media_handler::delete_many,
        // Settings
        setting_handler::create_many,
        setting_handler::update_many,
        setting_handler::upsert_many,
        // Mail
        mail_handler::send_test,
        mail_handler::submit_contact,
        mail_handler::send_order,
        // Public
        public_handler::list_posts,
        public_handler::post_by_slug,
        public_handler::list_services,
        public_handler::service_by_slug,
        public_handler::submit_order,
        public_handler::settings_by_namespaces,
        public_handler::settings_by_namespace,
    ),
    components(
        schemas(
            // Shared
            SuccessType,
            MutationResponse,
            BulkMutationResponse,
            MessageResponse,
            BulkIds,
            // Users & auth
            UserRole,
            Identity,
            UserListItem,
            UserRef,
            AuthorRef,
            TokenPair,
            LoginResponse,
            auth_handler::RegisterRequest,
            auth_handler::VerifyEmailRequest,
            auth_handler::LoginRequest,
            auth_handler::ForgotPasswordRequest,
            auth_handler::ResetPasswordRequest,
            auth_handler::RefreshTokenRequest,
            // Categories
            CategoryNode,
            CategoryDetail,
            CreateCategory,
            UpdateCategory,
            // Posts
            PostListItem,
            PostDetail,
            PublicPostItem,
            PublicPostDetail,
            CategoryRef,
            CreatePost,
            UpdatePost,
            // Services
            ServiceListItem,
            ServiceDetail,
            PublicServiceItem,
            PublicServiceDetail,
            ImagePair,
            LabelItem,
            AddOnItem,
            StepItem,
            StepDetailItem,
            ImageInput,
            LabelInput,
            AddOnInput,
            StepInput,
            StepDetailInput,
            CreateService,
            UpdateService,
            // Orders
            OrderView,
            OrderItemView,
            ServiceRef,
            OrderItemInput,
            CreateOrder,
            UpdateOrder,
            // Media
            MediaListItem,
            MediaUploadOutcome,
            MediaDeleteOutcome,
            FailedDelete,
            // Settings
            SettingEntry,
            SettingBatch,
            SettingCreateOutcome,
            SettingUpdateOutcome,
            // Mail
            ContactSubmission,
            mail_handler::SendTestEmailRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, verification and token flows"),
        (name = "Users", description = "User administration"),
        (name = "Categories", description = "Hierarchical taxonomy"),
        (name = "Posts", description = "Blog content"),
        (name = "Services", description = "Bookable offerings"),
        (name = "Orders", description = "Customer orders"),
        (name = "Media", description = "Upload library"),
        (name = "Settings", description = "Namespaced key/value configuration"),
        (name = "Mail", description = "Transactional email"),
        (name = "Public", description = "Anonymous read-only surface")
    )
)]
pub struct ApiDoc;

/// Security schemes: JWT bearer for users, X-API-KEY for services
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from /auth/login"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-KEY"))),
            );
        }
    }
}
