//! LoginHandler - Command handler for email/password login.

use std::sync::Arc;

use crate::domain::session::Session;
use crate::domain::user::{User, UserError};
use crate::ports::{SessionRepository, UserRepository};

/// Command to log in with email and password.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub session: Session,
}

/// Handler for password login.
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { users, sessions }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, UserError> {
        // An unknown email and a wrong password produce the same error.
        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(UserError::invalid_credentials)?;

        user.verify_password(&cmd.password)?;

        let session = Session::mint(user.id);
        self.sessions.insert(&session).await?;

        tracing::info!(user_id = %user.id, "password login");

        Ok(LoginResult { user, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::{
        MockSessionRepository, MockUserRepository,
    };

    fn user() -> User {
        User::register(
            "Asha".to_string(),
            "asha@example.com".to_string(),
            "+911234567890".to_string(),
            "correct horse",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_credentials_mint_a_session() {
        let users = MockUserRepository::with_user(user());
        let sessions = Arc::new(MockSessionRepository::new());
        let handler = LoginHandler::new(users, sessions.clone());

        let result = handler
            .handle(LoginCommand {
                email: "asha@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(sessions.inserted().len(), 1);
        assert_eq!(result.session.user_id, result.user.id);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let users = MockUserRepository::with_user(user());
        let sessions = Arc::new(MockSessionRepository::new());
        let handler = LoginHandler::new(users, sessions.clone());

        let result = handler
            .handle(LoginCommand {
                email: "asha@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
        assert!(sessions.inserted().is_empty());
    }

    #[tokio::test]
    async fn unknown_email_is_indistinguishable_from_wrong_password() {
        let users = Arc::new(MockUserRepository::new());
        let sessions = Arc::new(MockSessionRepository::new());
        let handler = LoginHandler::new(users, sessions);

        let result = handler
            .handle(LoginCommand {
                email: "nobody@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }
}
