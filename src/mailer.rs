/**
 * Invitation Mailer
 *
 * Best-effort email delivery for workspace invitations over SMTP. The
 * mailer is optional: when SMTP is not configured the server runs without
 * it, and a failed send never fails the operation that triggered it.
 */

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Mailer errors (logged, never surfaced to clients)
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Async SMTP mailer for invitation emails
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Build a mailer from environment configuration
    ///
    /// Reads `SMTP_HOST`, `SMTP_USER`, `SMTP_PASS` and optionally
    /// `SMTP_FROM` (defaults to `SMTP_USER`). Returns `None` when any
    /// required variable is missing or malformed, so the server can start
    /// without email support.
    pub fn from_env() -> Option<Mailer> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let user = std::env::var("SMTP_USER").ok()?;
        let pass = std::env::var("SMTP_PASS").ok()?;
        let from_addr = std::env::var("SMTP_FROM").unwrap_or_else(|_| user.clone());

        let from: Mailbox = match format!("TaskHive <{}>", from_addr).parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                tracing::error!("Invalid SMTP_FROM address {}: {:?}", from_addr, e);
                return None;
            }
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::relay(&host) {
            Ok(builder) => builder.credentials(Credentials::new(user, pass)).build(),
            Err(e) => {
                tracing::error!("Failed to configure SMTP relay {}: {:?}", host, e);
                return None;
            }
        };

        tracing::info!("SMTP mailer configured for relay {}", host);
        Some(Mailer { transport, from })
    }

    /// Send a workspace invitation email
    pub async fn send_invitation(
        &self,
        to: &str,
        inviter_name: &str,
        inviter_email: &str,
        workspace_name: &str,
    ) -> Result<(), MailerError> {
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; line-height: 1.6;">
  <h2>{inviter_name} invited you</h2>
  <p>
    <strong>{inviter_name}</strong> ({inviter_email}) has invited you
    to join the workspace <strong>{workspace_name}</strong>.
  </p>
  <hr />
  <p style="font-size: 12px; color: #777;">
    This invitation was sent via TaskHive.
  </p>
</div>"#
        );

        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(format!(
                "{} invited you to join {}",
                inviter_name, workspace_name
            ))
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.transport.send(email).await?;
        tracing::info!("Invitation email sent to {}", to);

        Ok(())
    }
}
