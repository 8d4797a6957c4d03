//! HTTP routes for user profile and preference endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    get_profile, update_english_level, update_learning_goals, update_skills_focus,
    update_speaking_partner, UserHandlers,
};

/// Creates the user router with all endpoints.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/english-level", put(update_english_level))
        .route("/learning-goals", put(update_learning_goals))
        .route("/skills-focus", put(update_skills_focus))
        .route("/speaking-partner", put(update_speaking_partner))
        .with_state(handlers)
}
