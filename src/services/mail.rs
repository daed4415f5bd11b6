//! Mail orchestration: resolves from-addresses and site context from the
//! settings store, then hands rendered-on-send messages to the transport.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{
    KEY_ADMIN_EMAIL, KEY_FROM_EMAIL, KEY_FROM_NAME, KEY_SITE_NAME, NS_EMAIL, NS_GENERAL,
};
use crate::errors::{AppError, AppResult};
use crate::infra::mailer::{MailMessage, MailTemplate, Mailer, OrderLine};
use crate::infra::repositories::{OrderRepository, SettingRepository};
use crate::types::MessageResponse;

/// Contact form payload from the public surface.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[validate(length(min = 1, message = "Họ tên không được để trống"))]
    pub full_name: String,
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
    pub phone: Option<String>,
    pub property_address: Option<String>,
    pub note: Option<String>,
}

/// Mail service trait for dependency injection.
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a test message to verify the SMTP configuration
    async fn send_test(&self, to: String) -> AppResult<MessageResponse>;

    /// Acknowledge a contact submission to the sender and notify the admin
    async fn submit_contact(&self, data: ContactSubmission) -> AppResult<MessageResponse>;

    /// Send the order confirmation to the customer and the admin copy
    async fn send_order_email(&self, order_id: i32) -> AppResult<MessageResponse>;
}

/// Concrete implementation of MailService.
pub struct MailDispatcher {
    settings: Arc<dyn SettingRepository>,
    orders: Arc<dyn OrderRepository>,
    mailer: Arc<dyn Mailer>,
}

impl MailDispatcher {
    pub fn new(
        settings: Arc<dyn SettingRepository>,
        orders: Arc<dyn OrderRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            settings,
            orders,
            mailer,
        }
    }

    /// `"From Name" <address>` assembled from the email settings namespace.
    async fn from_header(&self) -> AppResult<Option<String>> {
        let from_email = self.settings.get_value(NS_EMAIL, KEY_FROM_EMAIL).await?;
        let from_name = self.settings.get_value(NS_EMAIL, KEY_FROM_NAME).await?;

        Ok(from_email.map(|email| match from_name {
            Some(name) => format!("\"{}\" <{}>", name, email),
            None => email,
        }))
    }

    async fn site_name(&self) -> AppResult<String> {
        Ok(self
            .settings
            .get_value(NS_GENERAL, KEY_SITE_NAME)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl MailService for MailDispatcher {
    async fn send_test(&self, to: String) -> AppResult<MessageResponse> {
        let from = self.from_header().await?;

        self.mailer
            .send(MailMessage {
                to: vec![to.clone()],
                subject: "Test email".to_string(),
                from,
                template: MailTemplate::Test { email: to },
            })
            .await?;

        Ok(MessageResponse::new("Test email sent"))
    }

    async fn submit_contact(&self, data: ContactSubmission) -> AppResult<MessageResponse> {
        let from = self.from_header().await?;
        let website = self.site_name().await?;
        let note = data.note.clone().unwrap_or_else(|| "N/A".to_string());

        // Acknowledgement to the sender
        self.mailer
            .send(MailMessage {
                to: vec![data.email.clone()],
                subject: "We Received Your Contact Submission".to_string(),
                from: from.clone(),
                template: MailTemplate::ContactSubmission {
                    name: data.full_name.clone(),
                    full_name: data.full_name.clone(),
                    email: data.email.clone(),
                    phone: data.phone.clone(),
                    property_address: data.property_address.clone(),
                    note: note.clone(),
                    website: website.clone(),
                },
            })
            .await?;

        // Admin notification, when an admin address is configured
        match self.settings.get_value(NS_EMAIL, KEY_ADMIN_EMAIL).await? {
            Some(admin_email) => {
                self.mailer
                    .send(MailMessage {
                        to: vec![admin_email],
                        subject: "New Contact Submission".to_string(),
                        from,
                        template: MailTemplate::ContactSubmission {
                            name: "Admin".to_string(),
                            full_name: data.full_name,
                            email: data.email,
                            phone: data.phone,
                            property_address: data.property_address,
                            note,
                            website,
                        },
                    })
                    .await?;
            }
            None => tracing::warn!("email.ADMIN_EMAIL not configured, skipping admin copy"),
        }

        Ok(MessageResponse::new("Contact email sent successfully"))
    }

    async fn send_order_email(&self, order_id: i32) -> AppResult<MessageResponse> {
        let order = self
            .orders
            .find_view(order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        let from = self.from_header().await?;
        let website = self.site_name().await?;

        let items: Vec<OrderLine> = order
            .items
            .iter()
            .map(|item| OrderLine {
                service_name: item
                    .service
                    .as_ref()
                    .map(|s| s.title.clone())
                    .unwrap_or_default(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        let note = order.note.clone().unwrap_or_else(|| "N/A".to_string());

        self.mailer
            .send(MailMessage {
                to: vec![order.email.clone()],
                subject: "Your Order Has Been Created".to_string(),
                from: from.clone(),
                template: MailTemplate::OrderCreated {
                    name: order.name.clone(),
                    order_id: order.id,
                    customer_name: order.name.clone(),
                    customer_email: order.email.clone(),
                    customer_phone: order.phone.clone(),
                    customer_address: order.address.clone(),
                    note: note.clone(),
                    items: items.clone(),
                    website: website.clone(),
                    is_admin: false,
                },
            })
            .await?;

        match self.settings.get_value(NS_EMAIL, KEY_ADMIN_EMAIL).await? {
            Some(admin_email) => {
                self.mailer
                    .send(MailMessage {
                        to: vec![admin_email],
                        subject: "New Order Notification".to_string(),
                        from,
                        template: MailTemplate::OrderCreated {
                            name: "Admin".to_string(),
                            order_id: order.id,
                            customer_name: order.name,
                            customer_email: order.email,
                            customer_phone: order.phone,
                            customer_address: order.address,
                            note,
                            items,
                            website,
                            is_admin: true,
                        },
                    })
                    .await?;
            }
            None => tracing::warn!("email.ADMIN_EMAIL not configured, skipping admin copy"),
        }

        Ok(MessageResponse::new("Order email sent"))
    }
}
