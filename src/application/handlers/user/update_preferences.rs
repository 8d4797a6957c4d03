//! UpdatePreferencesHandler - Command handler for learner preferences.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{
    EnglishLevel, LearningGoal, SkillFocus, SpeakingPartner, User, UserError,
};
use crate::ports::UserRepository;

/// One preference field update. Labels are parsed into the closed enums at
/// the HTTP boundary, so an unknown label never reaches this handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceUpdate {
    EnglishLevel(EnglishLevel),
    LearningGoals(Vec<LearningGoal>),
    SkillsFocus(Vec<SkillFocus>),
    SpeakingPartner(SpeakingPartner),
}

/// Handler applying a preference update to the current user.
pub struct UpdatePreferencesHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdatePreferencesHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        user_id: UserId,
        update: PreferenceUpdate,
    ) -> Result<User, UserError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| UserError::not_found(user_id))?;

        let mut preferences = user.preferences.clone();
        match update {
            PreferenceUpdate::EnglishLevel(level) => preferences.english_level = Some(level),
            PreferenceUpdate::LearningGoals(goals) => preferences.learning_goals = goals,
            PreferenceUpdate::SkillsFocus(skills) => preferences.skills_focus = skills,
            PreferenceUpdate::SpeakingPartner(partner) => {
                preferences.speaking_partner = Some(partner)
            }
        }
        user.set_preferences(preferences);

        self.users.update(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::MockUserRepository;

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
    async fn update_replaces_only_the_named_field() {
        let u = user();
        let users = MockUserRepository::with_user(u.clone());
        let handler = UpdatePreferencesHandler::new(users.clone());

        handler
            .handle(u.id, PreferenceUpdate::EnglishLevel(EnglishLevel::Advanced))
            .await
            .unwrap();
        let updated = handler
            .handle(
                u.id,
                PreferenceUpdate::LearningGoals(vec![LearningGoal::Career, LearningGoal::Travel]),
            )
            .await
            .unwrap();

        assert_eq!(updated.preferences.english_level, Some(EnglishLevel::Advanced));
        assert_eq!(updated.preferences.learning_goals.len(), 2);
        assert!(updated.preferences.speaking_partner.is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let handler = UpdatePreferencesHandler::new(Arc::new(MockUserRepository::new()));
        let result = handler
            .handle(
                UserId::new(),
                PreferenceUpdate::SpeakingPartner(SpeakingPartner::AnyTutor),
            )
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
