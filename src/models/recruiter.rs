//! Recruiter accounts and auth payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_empty, validate_slug, Normalize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecruiterRole {
    Owner,
    Editor,
}

text_enum!(RecruiterRole {
    Owner => "OWNER",
    Editor => "EDITOR",
});

/// An editor account belonging to one company.
#[derive(Debug, Clone)]
pub struct Recruiter {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub email: String,
    pub passcode_hash: String,
    pub role: RecruiterRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Minimal company reference returned by auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// The signed-in recruiter, as returned by `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: RecruiterRole,
    pub company: CompanyRef,
}

/// Request body for creating a tenant and its owner.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 80, message = "Company name must be 3-80 characters"))]
    pub company_name: String,
    #[serde(default)]
    #[validate(length(min = 2, max = 40), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(length(min = 2, max = 60, message = "Your name must be 2-60 characters"))]
    pub recruiter_name: String,
    #[validate(email(message = "Enter a valid email"))]
    pub recruiter_email: String,
    #[validate(length(min = 6, message = "Passcode must be at least 6 characters"))]
    pub passcode: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub subheadline: Option<String>,
}

impl Normalize for SignupRequest {
    fn normalize(self) -> Self {
        Self {
            company_name: self.company_name.trim().to_string(),
            slug: non_empty(self.slug),
            recruiter_name: self.recruiter_name.trim().to_string(),
            recruiter_email: self.recruiter_email.trim().to_lowercase(),
            headline: non_empty(self.headline),
            subheadline: non_empty(self.subheadline),
            ..self
        }
    }
}

/// Response body for a successful signup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub company: SignupCompany,
    pub recruiter: SignupRecruiter,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupCompany {
    pub name: String,
    pub slug: String,
    pub headline: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRecruiter {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    #[validate(length(min = 4, message = "Passcode must be at least 4 characters"))]
    pub passcode: String,
}

impl Normalize for LoginRequest {
    fn normalize(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub company: CompanyRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_text_matches_serialized_form() {
        for role in [RecruiterRole::Owner, RecruiterRole::Editor] {
            assert_eq!(RecruiterRole::parse(role.as_str()), Some(role));
            assert_eq!(serde_json::to_value(role).unwrap(), role.as_str());
        }
        assert_eq!(RecruiterRole::parse("EDITOR"), Some(RecruiterRole::Editor));
        assert_eq!(RecruiterRole::parse("owner"), None);
    }

    #[test]
    fn test_login_email_is_normalized() {
        let request = LoginRequest {
            email: "  Ada@Acme.TEST ".to_string(),
            passcode: "secret".to_string(),
        }
        .normalize();
        assert_eq!(request.email, "ada@acme.test");
        assert!(request.validate().is_ok());
    }
}
