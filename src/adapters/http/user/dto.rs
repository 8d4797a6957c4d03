//! Request DTOs for user preference endpoints.
//!
//! Preference values arrive as plain labels and are parsed into the closed
//! domain enums here; an unknown label never leaves the HTTP boundary.

use serde::Deserialize;

use crate::application::handlers::user::PreferenceUpdate;
use crate::domain::user::{EnglishLevel, LearningGoal, SkillFocus, SpeakingPartner, UserError};

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEnglishLevelRequest {
    pub english_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLearningGoalsRequest {
    pub learning_goals: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSkillsFocusRequest {
    pub skills_focus: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpeakingPartnerRequest {
    pub speaking_partner: String,
}

impl UpdateEnglishLevelRequest {
    pub fn parse(self) -> Result<PreferenceUpdate, UserError> {
        let level: EnglishLevel = self.english_level.parse()?;
        Ok(PreferenceUpdate::EnglishLevel(level))
    }
}

impl UpdateLearningGoalsRequest {
    pub fn parse(self) -> Result<PreferenceUpdate, UserError> {
        let goals = self
            .learning_goals
            .iter()
            .map(|label| label.parse::<LearningGoal>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PreferenceUpdate::LearningGoals(goals))
    }
}

impl UpdateSkillsFocusRequest {
    pub fn parse(self) -> Result<PreferenceUpdate, UserError> {
        let skills = self
            .skills_focus
            .iter()
            .map(|label| label.parse::<SkillFocus>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PreferenceUpdate::SkillsFocus(skills))
    }
}

impl UpdateSpeakingPartnerRequest {
    pub fn parse(self) -> Result<PreferenceUpdate, UserError> {
        let partner: SpeakingPartner = self.speaking_partner.parse()?;
        Ok(PreferenceUpdate::SpeakingPartner(partner))
    }
}
