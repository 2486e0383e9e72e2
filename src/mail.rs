//! Outbound mail for password-reset links.

use anyhow::Context;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;
use uuid::Uuid;

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    frontend_url: String,
}

impl Mailer {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("SMTP_HOST").context("SMTP_HOST must be set")?;
        let username = env::var("SMTP_USERNAME").context("SMTP_USERNAME must be set")?;
        let password = env::var("SMTP_PASSWORD").context("SMTP_PASSWORD must be set")?;
        let from = env::var("MAIL_FROM")
            .unwrap_or_else(|_| username.clone())
            .parse::<Mailbox>()
            .context("MAIL_FROM is not a valid mailbox")?;
        let frontend_url = env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .trim_end_matches('/')
            .to_string();

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)?
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self {
            transport,
            from,
            frontend_url,
        })
    }

    pub async fn send_password_reset(
        &self,
        to: &str,
        user_id: Uuid,
        token: &str,
    ) -> anyhow::Result<()> {
        let reset_link = format!("{}/reset-password/{}/{}", self.frontend_url, user_id, token);
        let body = format!(
            "<h2>Password Reset Request</h2>\
             <p>Click the link below to reset your password:</p>\
             <a href=\"{reset_link}\">Reset Password</a>\
             <p>This link will expire in 1 hour.</p>"
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse::<Mailbox>().context("invalid recipient address")?)
            .subject("Password Reset Request")
            .header(ContentType::TEXT_HTML)
            .body(body)?;

        self.transport
            .send(message)
            .await
            .context("SMTP delivery failed")?;
        log::info!("Password reset mail sent to {to}");
        Ok(())
    }
}
