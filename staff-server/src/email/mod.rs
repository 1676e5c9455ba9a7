//! Outgoing email
//!
//! [`Mailer`] is the transport seam (AWS SES in production, log output in
//! development). [`EmailService`] owns the message templates and the codes
//! that travel in them.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::error::BoxError;

/// Length of an employee join code
pub const JOIN_CODE_LEN: usize = 8;

/// Plain-text mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError>;
}

/// AWS SES v2 transport
pub struct SesMailer {
    ses: SesClient,
    from: String,
}

impl SesMailer {
    pub fn new(ses: SesClient, from: impl Into<String>) -> Self {
        Self {
            ses,
            from: from.into(),
        }
    }

    /// Build a client from the default AWS credential chain
    pub async fn from_env(region: Option<&str>, from: impl Into<String>) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let ses = match region {
            Some(region) => {
                let ses_config = aws_config
                    .to_builder()
                    .region(aws_config::Region::new(region.to_string()))
                    .build();
                SesClient::new(&ses_config)
            }
            None => SesClient::new(&aws_config),
        };
        Self::new(ses, from)
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError> {
        let subject = Content::builder().data(subject).build()?;
        let body = Body::builder()
            .text(Content::builder().data(body).build()?)
            .build();
        let message = Message::builder().subject(subject).body(body).build();

        self.ses
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;
        Ok(())
    }
}

/// Writes messages to the log instead of delivering them
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError> {
        tracing::info!(to = to, subject = subject, "Email (log transport)");
        tracing::debug!(to = to, body = body, "Email body");
        Ok(())
    }
}

/// Email templates for join and verification codes
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
}

impl EmailService {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// New one-time join code (uppercase alphanumeric)
    pub fn create_join_code(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(JOIN_CODE_LEN)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect()
    }

    /// New 6-digit email verification code
    pub fn create_verification_code(&self) -> String {
        let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
        code.to_string()
    }

    pub async fn send_join_code(&self, email: &str, code: &str) -> Result<(), BoxError> {
        let body = format!(
            "You have been invited to join your team.\n\
             Sign in and enter this join code to link your account: {code}"
        );
        self.mailer.send(email, "Your join code", &body).await?;
        tracing::info!(to = email, "Join code sent");
        Ok(())
    }

    pub async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), BoxError> {
        let body = format!(
            "Your verification code is: {code}\n\
             Valid for 5 minutes."
        );
        self.mailer.send(email, "Your verification code", &body).await?;
        tracing::info!(to = email, "Verification code sent");
        Ok(())
    }
}
