//! GetProfileHandler - Query handler for the current user's profile.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Handler returning the authenticated user's account and preferences.
pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| UserError::not_found(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::MockUserRepository;

    #[tokio::test]
    async fn returns_the_stored_profile() {
        let user = User::register(
            "Asha".to_string(),
            "asha@example.com".to_string(),
            "+911234567890".to_string(),
            "correct horse",
        )
        .unwrap();
        let handler = GetProfileHandler::new(MockUserRepository::with_user(user.clone()));

        let profile = handler.handle(user.id).await.unwrap();
        assert_eq!(profile.email, "asha@example.com");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let handler = GetProfileHandler::new(Arc::new(MockUserRepository::new()));
        assert!(matches!(
            handler.handle(UserId::new()).await,
            Err(UserError::NotFound(_))
        ));
    }
}
