use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::domain::repository::Mailer;
use crate::error::WebServiceError;

/// SMTP mailer. Delivery is synchronous by contract: callers treat a failed
/// send as a hard stop, so failures map to `MAIL_DELIVERY` here.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(creds)
            .build();

        let from = match &config.from_name {
            Some(name) => format!("{} <{}>", name, config.from_email),
            None => config.from_email.clone(),
        }
        .parse()?;

        Ok(Self { transport, from })
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), WebServiceError> {
        let to_addr = match to.parse() {
            Ok(addr) => addr,
            Err(e) => {
                tracing::warn!(error = %e, "invalid recipient address");
                return Err(WebServiceError::MailDelivery);
            }
        };

        let message = match Message::builder()
            .from(self.from.clone())
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
        {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "failed to build email");
                return Err(WebServiceError::MailDelivery);
            }
        };

        if let Err(e) = self.transport.send(message).await {
            tracing::warn!(error = %e, "mail delivery failed");
            return Err(WebServiceError::MailDelivery);
        }
        Ok(())
    }
}

impl Mailer for SmtpMailer {
    async fn send_signup_code(&self, to: &str, code: &str) -> Result<(), WebServiceError> {
        let body = format!(
            "Your verification code is: {code}\n\n\
             Enter this code to finish creating your account. It expires in 10 minutes.\n\n\
             If you didn't request this, you can safely ignore this email."
        );
        self.send(to, "Your verification code", body).await
    }

    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), WebServiceError> {
        let body = format!(
            "Your password reset code is: {code}\n\n\
             Enter this code to reset your password. It expires in 10 minutes.\n\n\
             If you didn't request this, you can safely ignore this email."
        );
        self.send(to, "Password reset code", body).await
    }
}
