//! Learner preference enums.
//!
//! Preferences are closed enumerations shared with the client and validated
//! at the boundary; an unknown label is a 400, never a silent fallback.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UserError;

macro_rules! preference_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Every accepted label, for error messages and docs.
            pub fn labels() -> &'static [&'static str] {
                &[$($label),+]
            }
        }

        impl FromStr for $name {
            type Err = UserError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(UserError::validation_failed(
                        $field,
                        format!("expected one of {:?}", Self::labels()),
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

preference_enum!(
    /// Self-assessed English level.
    EnglishLevel, "english_level" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
        Fluent => "fluent",
    }
);

preference_enum!(
    /// Why the learner is studying.
    LearningGoal, "learning_goals" {
        Career => "career",
        Travel => "travel",
        Education => "education",
        Interview => "interview",
        Everyday => "everyday",
    }
);

preference_enum!(
    /// Skill the learner wants the sessions to concentrate on.
    SkillFocus, "skills_focus" {
        Speaking => "speaking",
        Listening => "listening",
        Vocabulary => "vocabulary",
        Grammar => "grammar",
        Pronunciation => "pronunciation",
    }
);

preference_enum!(
    /// Preferred speaking partner for practice sessions.
    SpeakingPartner, "speaking_partner" {
        AnyTutor => "any_tutor",
        MaleTutor => "male_tutor",
        FemaleTutor => "female_tutor",
    }
);

/// A learner's collected preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub english_level: Option<EnglishLevel>,
    pub learning_goals: Vec<LearningGoal>,
    pub skills_focus: Vec<SkillFocus>,
    pub speaking_partner: Option<SpeakingPartner>,
}
