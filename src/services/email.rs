//! Email notifications
//!
//! Best-effort SMTP notifications to the admin when a visitor leaves a new
//! comment. When no SMTP settings are configured the service is a no-op, so
//! the blog works out of the box without a mail server.

use anyhow::{anyhow, Result};
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::MailConfig;

/// Email service for comment notifications
pub struct EmailService {
    mail: Option<MailConfig>,
}

impl EmailService {
    pub fn new(mail: Option<MailConfig>) -> Self {
        Self { mail }
    }

    /// Whether sending is configured at all.
    pub fn is_configured(&self) -> bool {
        self.mail.is_some()
    }

    /// Notify the admin about a new comment on a post.
    pub async fn send_new_comment_notification(
        &self,
        post_title: &str,
        post_url: &str,
    ) -> Result<()> {
        let Some(mail) = &self.mail else {
            tracing::debug!("SMTP not configured, skipping comment notification");
            return Ok(());
        };

        let subject = format!("New comment on \"{}\"", post_title);
        let body = format!(
            "A new comment is waiting for review.\n\nPost: {}\n{}\n",
            post_title, post_url
        );

        let email = Message::builder()
            .from(mail.from.parse().map_err(|e| anyhow!("Invalid from address: {}", e))?)
            .to(mail.notify.parse().map_err(|e| anyhow!("Invalid notify address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| anyhow!("Failed to build email: {}", e))?;

        let creds = Credentials::new(mail.username.clone(), mail.password.clone());
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.smtp_host)
                .map_err(|e| anyhow!("Failed to create SMTP transport: {}", e))?
                .credentials(creds)
                .port(mail.smtp_port)
                .build();

        mailer
            .send(email)
            .await
            .map_err(|e| anyhow!("Failed to send email: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_service_is_noop() {
        let service = EmailService::new(None);

        assert!(!service.is_configured());
        service
            .send_new_comment_notification("A Post", "http://localhost/post/1")
            .await
            .expect("Unconfigured notification should be a no-op");
    }
}
