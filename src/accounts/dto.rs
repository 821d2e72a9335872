use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::accounts::repo_types::{Tutor, User};
use crate::validation::{Patch, Validate, ValidationErrors};

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Request body for updating a user; absent keys are left as stored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub full_name: Patch<String>,
    #[serde(default)]
    pub password: Patch<String>,
}

/// Public view of a user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            created_at: u.created_at,
        }
    }
}

/// Request body for creating a tutor.
#[derive(Debug, Deserialize)]
pub struct CreateTutor {
    pub email: String,
    pub full_name: String,
    pub subject: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTutor {
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub full_name: Patch<String>,
    #[serde(default)]
    pub subject: Patch<String>,
    #[serde(default)]
    pub password: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub subject: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Tutor> for TutorResponse {
    fn from(t: Tutor) -> Self {
        Self {
            id: t.id,
            email: t.email,
            full_name: t.full_name,
            subject: t.subject,
            created_at: t.created_at,
        }
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validate for CreateUser {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_email("email", &self.email);
        errors.into_result()
    }
}

impl Validate for UpdateUser {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(email) = self.email.as_set() {
            errors.check_email("email", email);
        }
        errors.into_result()
    }
}

impl Validate for CreateTutor {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_email("email", &self.email);
        errors.into_result()
    }
}

impl Validate for UpdateTutor {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(email) = self.email.as_set() {
            errors.check_email("email", email);
        }
        errors.into_result()
    }
}

// Login only needs both strings present; a malformed email simply matches nobody.
impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn create_user_requires_every_field() {
        let err = serde_json::from_str::<CreateUser>(r#"{"email": "a@x.com", "full_name": "A"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `password`"));
    }

    #[test]
    fn create_user_rejects_bad_email() {
        let input: CreateUser =
            serde_json::from_str(r#"{"email": "nope", "full_name": "A", "password": "p"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.fields()[0].field, "email");
    }

    #[test]
    fn create_tutor_requires_subject() {
        let err = serde_json::from_str::<CreateTutor>(
            r#"{"email": "t@x.com", "full_name": "T", "password": "p"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("subject"));
    }

    #[test]
    fn update_only_checks_present_fields() {
        let patch: UpdateUser = serde_json::from_str(r#"{"full_name": ""}"#).unwrap();
        assert!(patch.validate().is_ok());
        assert_eq!(patch.email, Patch::Unchanged);
        assert_eq!(patch.full_name, Patch::Set(String::new()));

        let patch: UpdateTutor = serde_json::from_str(r#"{"email": ""}"#).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn update_rejects_wrong_primitive_type() {
        assert!(serde_json::from_str::<UpdateTutor>(r#"{"subject": 5}"#).is_err());
        assert!(serde_json::from_str::<UpdateUser>(r#"{"password": null}"#).is_err());
    }

    #[test]
    fn responses_never_carry_the_password() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            full_name: "A".into(),
            created_at: datetime!(2024-02-20 10:00 UTC),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["created_at"], "2024-02-20T10:00:00Z");
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());

        let tutor = Tutor {
            id: 2,
            email: "t@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            full_name: "T".into(),
            subject: "Maths".into(),
            created_at: datetime!(2024-02-20 10:00 UTC),
        };
        let json = serde_json::to_string(&TutorResponse::from(tutor)).unwrap();
        assert!(json.contains("Maths"));
        assert!(!json.contains("argon2"));
    }
}
