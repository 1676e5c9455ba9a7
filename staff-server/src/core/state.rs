//! Shared application state

use std::sync::Arc;

use crate::auth::{LoginSuccessHandler, SessionStore};
use crate::core::config::{Config, EmailTransport};
use crate::db::DbService;
use crate::email::{EmailService, LogMailer, Mailer, SesMailer};
use crate::error::BoxError;
use crate::services::{AccountService, EmployeeService, OrganizationService};

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub sessions: SessionStore,
    pub login_handler: LoginSuccessHandler,
    pub employees: EmployeeService,
    pub accounts: AccountService,
    pub organizations: OrganizationService,
}

impl AppState {
    /// Open the database and build the mail transport selected by `config`
    pub async fn initialize(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_path).await?;

        let mailer: Arc<dyn Mailer> = match config.email_transport {
            EmailTransport::Ses => Arc::new(
                SesMailer::from_env(config.ses_region.as_deref(), config.ses_from_email.clone())
                    .await,
            ),
            EmailTransport::Log => {
                tracing::warn!("EMAIL_TRANSPORT=log: emails are written to the log, not delivered");
                Arc::new(LogMailer)
            }
        };

        Ok(Self::with_parts(config.clone(), db, mailer))
    }

    /// Assemble state from an opened database and a mail transport
    pub fn with_parts(config: Config, db: DbService, mailer: Arc<dyn Mailer>) -> Self {
        let email = EmailService::new(mailer);
        let pool = db.pool.clone();
        Self {
            sessions: SessionStore::new(config.session_ttl),
            login_handler: LoginSuccessHandler::new(
                config.login_redirect_uri.clone(),
                config.user_unauthorized_uri.clone(),
            ),
            employees: EmployeeService::new(pool.clone(), email.clone()),
            accounts: AccountService::new(pool.clone(), email),
            organizations: OrganizationService::new(pool),
            config: Arc::new(config),
            db,
        }
    }

    /// Periodic removal of idle sessions (every 5 minutes)
    pub fn start_background_tasks(&self) {
        let sessions = self.sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
            loop {
                interval.tick().await;
                let removed = sessions.cleanup();
                if removed > 0 {
                    tracing::debug!(removed, "Expired sessions removed");
                }
            }
        });
    }
}
