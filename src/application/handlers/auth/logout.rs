//! LogoutHandler - Command handler for ending a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::user::UserError;
use crate::ports::SessionRepository;

/// Handler for logout. Deleting an already-deleted session is a no-op.
pub struct LogoutHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl LogoutHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<(), UserError> {
        self.sessions.delete(session_id).await?;
        tracing::info!(session_id = %session_id, "session ended");
        Ok(())
    }
}
