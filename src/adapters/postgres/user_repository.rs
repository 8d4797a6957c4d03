//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{
    EnglishLevel, LearningGoal, PasswordHash, Preferences, SkillFocus, SpeakingPartner, User,
};
use crate::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    password_salt: Option<String>,
    password_hash: Option<String>,
    english_level: Option<String>,
    learning_goals: Vec<String>,
    skills_focus: Vec<String>,
    speaking_partner: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let password = match (row.password_salt, row.password_hash) {
            (Some(salt), Some(hash)) => Some(PasswordHash::from_parts(salt, hash)),
            (None, None) => None,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("User {} has a half-filled password hash", row.id),
                ))
            }
        };

        let preferences = Preferences {
            english_level: row
                .english_level
                .as_deref()
                .map(|s| parse_pref::<EnglishLevel>("english_level", s))
                .transpose()?,
            learning_goals: row
                .learning_goals
                .iter()
                .map(|s| parse_pref::<LearningGoal>("learning_goals", s))
                .collect::<Result<_, _>>()?,
            skills_focus: row
                .skills_focus
                .iter()
                .map(|s| parse_pref::<SkillFocus>("skills_focus", s))
                .collect::<Result<_, _>>()?,
            speaking_partner: row
                .speaking_partner
                .as_deref()
                .map(|s| parse_pref::<SpeakingPartner>("speaking_partner", s))
                .transpose()?,
        };

        Ok(User {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            password,
            preferences,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_pref<T: std::str::FromStr>(column: &str, s: &str) -> Result<T, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} value: {}", column, s),
        )
    })
}

const USER_COLUMNS: &str = "id, name, email, phone, password_salt, password_hash, \
     english_level, learning_goals, skills_focus, speaking_partner, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, phone, password_salt, password_hash,
                english_level, learning_goals, skills_focus, speaking_partner,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(user.password.as_ref().map(|p| p.salt.as_str()))
        .bind(user.password.as_ref().map(|p| p.hash.as_str()))
        .bind(user.preferences.english_level.map(|l| l.as_str()))
        .bind(goal_strings(&user.preferences))
        .bind(skill_strings(&user.preferences))
        .bind(user.preferences.speaking_partner.map(|p| p.as_str()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return DomainError::validation("email", "Email is already registered")
                        .with_detail("email", user.email.clone());
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert user: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE phone = $1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(fetch_error)?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                english_level = $3,
                learning_goals = $4,
                skills_focus = $5,
                speaking_partner = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(user.preferences.english_level.map(|l| l.as_str()))
        .bind(goal_strings(&user.preferences))
        .bind(skill_strings(&user.preferences))
        .bind(user.preferences.speaking_partner.map(|p| p.as_str()))
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update user: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id),
            ));
        }

        Ok(())
    }
}

fn fetch_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to fetch user: {}", e),
    )
}

fn goal_strings(preferences: &Preferences) -> Vec<&'static str> {
    preferences.learning_goals.iter().map(|g| g.as_str()).collect()
}

fn skill_strings(preferences: &Preferences) -> Vec<&'static str> {
    preferences.skills_focus.iter().map(|s| s.as_str()).collect()
}
