//! SMTP mail transport.
//!
//! Rendering and transport live behind the [`Mailer`] trait; the core only
//! decides when to send and what context to pass. Without SMTP_HOST set,
//! messages are logged instead of sent (development mode).

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::SmtpConfig;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A rendered-on-send transactional email.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub subject: String,
    /// `"Name" <address>` override; falls back to the transport default
    pub from: Option<String>,
    pub template: MailTemplate,
}

/// Typed template + context. The variants mirror the transactional mails
/// the application sends.
#[derive(Debug, Clone)]
pub enum MailTemplate {
    Signup {
        verify_url: String,
        website: String,
    },
    ForgotPassword {
        name: String,
        reset_link: String,
        website: String,
    },
    ContactSubmission {
        name: String,
        full_name: String,
        email: String,
        phone: Option<String>,
        property_address: Option<String>,
        note: String,
        website: String,
    },
    OrderCreated {
        name: String,
        order_id: i32,
        customer_name: String,
        customer_email: String,
        customer_phone: Option<String>,
        customer_address: Option<String>,
        note: String,
        items: Vec<OrderLine>,
        website: String,
        is_admin: bool,
    },
    Test {
        email: String,
    },
}

#[derive(Debug, Clone)]
pub struct OrderLine {
    pub service_name: String,
    pub quantity: i32,
    pub price: i64,
}

impl MailTemplate {
    /// Plain-text body for the template.
    fn render(&self) -> String {
        match self {
            MailTemplate::Signup {
                verify_url,
                website,
            } => format!(
                "Chào mừng bạn đến với {website}!\n\n\
                 Vui lòng xác minh địa chỉ email của bạn bằng liên kết sau:\n\
                 {verify_url}\n\n\
                 Liên kết có hiệu lực trong 1 giờ.\n"
            ),
            MailTemplate::ForgotPassword {
                name,
                reset_link,
                website,
            } => format!(
                "Xin chào {name},\n\n\
                 Chúng tôi nhận được yêu cầu đặt lại mật khẩu cho tài khoản của bạn tại {website}.\n\
                 Đặt lại mật khẩu tại đây:\n{reset_link}\n\n\
                 Nếu bạn không yêu cầu, hãy bỏ qua email này.\n"
            ),
            MailTemplate::ContactSubmission {
                name,
                full_name,
                email,
                phone,
                property_address,
                note,
                website,
            } => format!(
                "Xin chào {name},\n\n\
                 {website} đã nhận được yêu cầu liên hệ:\n\
                 - Họ tên: {full_name}\n\
                 - Email: {email}\n\
                 - Điện thoại: {}\n\
                 - Địa chỉ: {}\n\
                 - Ghi chú: {note}\n",
                phone.as_deref().unwrap_or("N/A"),
                property_address.as_deref().unwrap_or("N/A"),
            ),
            MailTemplate::OrderCreated {
                name,
                order_id,
                customer_name,
                customer_email,
                customer_phone,
                customer_address,
                note,
                items,
                website,
                is_admin,
            } => {
                let mut body = if *is_admin {
                    format!("Xin chào {name},\n\nĐơn hàng mới #{order_id} trên {website}:\n")
                } else {
                    format!(
                        "Xin chào {name},\n\n\
                         Đơn hàng #{order_id} của bạn trên {website} đã được tạo.\n"
                    )
                };
                body.push_str(&format!(
                    "- Khách hàng: {customer_name} ({customer_email})\n\
                     - Điện thoại: {}\n\
                     - Địa chỉ: {}\n\
                     - Ghi chú: {note}\n\nDịch vụ:\n",
                    customer_phone.as_deref().unwrap_or("N/A"),
                    customer_address.as_deref().unwrap_or("N/A"),
                ));
                for line in items {
                    body.push_str(&format!(
                        "  {} x{} — {}\n",
                        line.service_name, line.quantity, line.price
                    ));
                }
                body
            }
            MailTemplate::Test { email } => {
                format!("This is a test email sent to {email}.\n")
            }
        }
    }
}

/// Notification dispatch contract. A failure is surfaced to the caller as
/// a hard error but is never allowed to roll back an already-committed
/// primary write.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}

/// Lettre-backed SMTP mailer.
pub struct SmtpMailer {
    config: SmtpConfig,
    default_from: String,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self {
            config,
            default_from: "noreply@example.com".to_string(),
        }
    }

    fn build_transport(&self, host: &str) -> AppResult<SmtpTransport> {
        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let transport = if self.config.use_starttls {
            SmtpTransport::starttls_relay(host)
        } else {
            SmtpTransport::relay(host)
        }
        .map_err(|e| AppError::DispatchFailure(format!("SMTP transport: {}", e)))?
        .port(self.config.port)
        .credentials(credentials)
        .build();

        Ok(transport)
    }

    fn build_message(&self, message: &MailMessage, to: &str) -> AppResult<Message> {
        let from = message
            .from
            .as_deref()
            .unwrap_or(&self.default_from)
            .parse()
            .map_err(|e| AppError::DispatchFailure(format!("invalid from address: {}", e)))?;

        let to = to
            .parse()
            .map_err(|e| AppError::DispatchFailure(format!("invalid to address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.template.render())
            .map_err(|e| AppError::DispatchFailure(format!("build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let Some(host) = self.config.host.clone() else {
            // Development mode: log the email instead of sending
            tracing::warn!("SMTP not configured - logging email instead of sending");
            tracing::info!(
                to = ?message.to,
                subject = %message.subject,
                "=== EMAIL (not sent) ===\n{}",
                message.template.render()
            );
            return Ok(());
        };

        let transport = self.build_transport(&host)?;

        for recipient in &message.to {
            let mail = self.build_message(&message, recipient)?;
            let transport = transport.clone();

            // lettre's sync transport; run it off the async runtime
            tokio::task::spawn_blocking(move || {
                transport
                    .send(&mail)
                    .map_err(|e| AppError::DispatchFailure(format!("send failed: {}", e)))
            })
            .await
            .map_err(|e| AppError::internal(format!("mail task join error: {}", e)))??;

            tracing::info!(to = %recipient, subject = %message.subject, "Email sent");
        }

        Ok(())
    }
}
