//! Email Module
//!
//! Outbound mail for the password-reset flow. The mailer wraps an async
//! lettre SMTP transport configured from the environment; like the database
//! pool it is optional, so a development instance without SMTP credentials
//! still serves every endpoint and just logs the reset link instead.

use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::backend::auth::users::User;

/// Async SMTP mailer for notification dispatch
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    /// Build a mailer from `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`,
    /// and optionally `SMTP_PORT` and `SMTP_FROM`
    ///
    /// Returns `None` when the required variables are absent or the relay
    /// cannot be configured; the caller decides how to degrade.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let username = std::env::var("SMTP_USERNAME").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;
        let from = std::env::var("SMTP_FROM")
            .unwrap_or_else(|_| format!("ClassHub Support <{}>", username));

        let mut builder = match AsyncSmtpTransport::<Tokio1Executor>::relay(&host) {
            Ok(builder) => builder,
            Err(e) => {
                tracing::error!("Failed to create SMTP transport for {}: {}", host, e);
                return None;
            }
        };
        builder = builder.credentials(Credentials::new(username, password));
        if let Ok(port) = std::env::var("SMTP_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                builder = builder.port(port);
            }
        }

        Some(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Send a plain-text email
    pub async fn send(&self, subject: &str, body: &str, recipient: &str) -> Result<(), String> {
        let email = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {}", e))?,
            )
            .to(recipient
                .parse()
                .map_err(|e| format!("Invalid to address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("Failed to create email: {}", e))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| format!("Failed to send email: {}", e))
    }
}

/// Render the password-reset notification
///
/// Returns `(subject, body)`; the body embeds the reset link carrying the
/// encoded uid reference and signed token.
pub fn render_reset_email(user: &User, link: &str) -> (String, String) {
    let subject = "Password Reset Request".to_string();
    let body = format!(
        "Hello {first_name},\n\
        \n\
        A password reset was requested for your ClassHub account ({email}).\n\
        To choose a new password, follow the link below:\n\
        \n\
        {link}\n\
        \n\
        The link expires after a short while and can only be used once.\n\
        If you did not request this reset, you can safely ignore this email;\n\
        your password will not change.\n\
        \n\
        Warm regards,\n\
        ClassHub Support",
        first_name = user.first_name,
        email = user.email,
        link = link,
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            active: true,
            admin: false,
            is_student: false,
            is_teacher: false,
            bio: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_reset_email_embeds_link() {
        let user = make_user();
        let link = "http://localhost:3000/reset-password-email/dXNlcg/123-abc";
        let (subject, body) = render_reset_email(&user, link);

        assert_eq!(subject, "Password Reset Request");
        assert!(body.contains(link));
        assert!(body.contains("Ada"));
        assert!(body.contains("a@x.com"));
    }

    #[test]
    fn test_mailer_from_env_requires_config() {
        // No SMTP_* variables set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(Mailer::from_env().is_none());
    }
}
