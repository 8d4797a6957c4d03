//! HTTP handlers for user profile and preference endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::auth::UserResponse;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireSession;
use crate::application::handlers::user::{
    GetProfileHandler, PreferenceUpdate, UpdatePreferencesHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::user::UserError;

use super::dto::{
    UpdateEnglishLevelRequest, UpdateLearningGoalsRequest, UpdateSkillsFocusRequest,
    UpdateSpeakingPartnerRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UserHandlers {
    get_profile_handler: Arc<GetProfileHandler>,
    update_preferences_handler: Arc<UpdatePreferencesHandler>,
}

impl UserHandlers {
    pub fn new(
        get_profile_handler: Arc<GetProfileHandler>,
        update_preferences_handler: Arc<UpdatePreferencesHandler>,
    ) -> Self {
        Self {
            get_profile_handler,
            update_preferences_handler,
        }
    }

    async fn apply_update(
        &self,
        user_id: UserId,
        update: Result<PreferenceUpdate, UserError>,
    ) -> Response {
        let update = match update {
            Ok(update) => update,
            Err(e) => return ApiError::from(e).into_response(),
        };

        match self
            .update_preferences_handler
            .handle(user_id, update)
            .await
        {
            Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
            Err(e) => ApiError::from(e).into_response(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/user/profile - Current user with preferences
pub async fn get_profile(
    State(handlers): State<UserHandlers>,
    RequireSession(session): RequireSession,
) -> Response {
    match handlers.get_profile_handler.handle(session.user_id).await {
        Ok(user) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT /api/user/english-level
pub async fn update_english_level(
    State(handlers): State<UserHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<UpdateEnglishLevelRequest>,
) -> Response {
    handlers.apply_update(session.user_id, req.parse()).await
}

/// PUT /api/user/learning-goals
pub async fn update_learning_goals(
    State(handlers): State<UserHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<UpdateLearningGoalsRequest>,
) -> Response {
    handlers.apply_update(session.user_id, req.parse()).await
}

/// PUT /api/user/skills-focus
pub async fn update_skills_focus(
    State(handlers): State<UserHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<UpdateSkillsFocusRequest>,
) -> Response {
    handlers.apply_update(session.user_id, req.parse()).await
}

/// PUT /api/user/speaking-partner
pub async fn update_speaking_partner(
    State(handlers): State<UserHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<UpdateSpeakingPartnerRequest>,
) -> Response {
    handlers.apply_update(session.user_id, req.parse()).await
}
