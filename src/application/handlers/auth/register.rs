//! RegisterHandler - Command handler for account creation.

use std::sync::Arc;

use crate::domain::session::Session;
use crate::domain::user::{User, UserError};
use crate::ports::{SessionRepository, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// A freshly registered account with its first session.
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user: User,
    pub session: Session,
}

/// Handler for account registration.
///
/// Registration logs the user straight in: the response carries a minted
/// session alongside the new account.
pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl RegisterHandler {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { users, sessions }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, UserError> {
        // 1. Reject a taken email up front; the unique index backs this up
        //    against concurrent registration.
        if self.users.find_by_email(&cmd.email).await?.is_some() {
            return Err(UserError::email_taken(cmd.email));
        }

        // 2. Validate and hash.
        let user = User::register(cmd.name, cmd.email, cmd.phone, &cmd.password)?;

        // 3. Persist the account.
        self.users.insert(&user).await?;

        // 4. Mint the first session.
        let session = Session::mint(user.id);
        self.sessions.insert(&session).await?;

        tracing::info!(user_id = %user.id, "account registered");

        Ok(RegisterResult { user, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::{MockSessionRepository, MockUserRepository};

    fn command() -> RegisterCommand {
        RegisterCommand {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+911234567890".to_string(),
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn registers_and_mints_a_session() {
        let users = Arc::new(MockUserRepository::new());
        let sessions = Arc::new(MockSessionRepository::new());
        let handler = RegisterHandler::new(users.clone(), sessions.clone());

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.session.user_id, result.user.id);
        assert_eq!(users.inserted().len(), 1);
        assert_eq!(sessions.inserted().len(), 1);
    }

    #[tokio::test]
    async fn rejects_taken_email() {
        let users = Arc::new(MockUserRepository::new());
        let sessions = Arc::new(MockSessionRepository::new());
        let handler = RegisterHandler::new(users.clone(), sessions.clone());

        handler.handle(command()).await.unwrap();
        let result = handler.handle(command()).await;

        assert!(matches!(result, Err(UserError::EmailTaken { .. })));
        assert_eq!(users.inserted().len(), 1);
    }

    #[tokio::test]
    async fn rejects_short_password_without_writes() {
        let users = Arc::new(MockUserRepository::new());
        let sessions = Arc::new(MockSessionRepository::new());
        let handler = RegisterHandler::new(users.clone(), sessions.clone());

        let mut cmd = command();
        cmd.password = "short".to_string();
        assert!(handler.handle(cmd).await.is_err());
        assert!(users.inserted().is_empty());
        assert!(sessions.inserted().is_empty());
    }
}
