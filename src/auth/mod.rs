//! Cookie session authentication.
//!
//! A signed HS256 token is carried in the `career_session` cookie. Handlers
//! take a [`Session`] to require a signed-in recruiter, or `Option<Session>`
//! when signing in is optional.

mod passcode;

pub use passcode::{hash_passcode, verify_passcode};

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Path},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{Company, Recruiter, RecruiterRole};
use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "career_session";

/// Session lifetime, also used as the cookie `Max-Age`.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Claims carried inside the session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: String,
    pub recruiter_id: String,
    pub company_id: String,
    pub role: RecruiterRole,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys for session tokens.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Random secret for processes started without one. Sessions do not
    /// survive a restart.
    pub fn ephemeral() -> Self {
        let secret = format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
        Self::new(secret.as_bytes())
    }

    /// Issue a session token for a recruiter.
    pub fn issue(&self, recruiter: &Recruiter) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: recruiter.id.clone(),
            recruiter_id: recruiter.id.clone(),
            company_id: recruiter.company_id.clone(),
            role: recruiter.role,
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify a token's signature and expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
    }
}

/// The signed-in recruiter for the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub recruiter_id: String,
    pub company_id: String,
    pub role: RecruiterRole,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self {
            recruiter_id: claims.recruiter_id,
            company_id: claims.company_id,
            role: claims.role,
        }
    }
}

fn session_from_parts(parts: &Parts, state: &AppState) -> Option<Session> {
    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = jar.get(SESSION_COOKIE).filter(|c| !c.value().is_empty())?;
    match state.sessions.verify(cookie.value()) {
        Ok(claims) => Some(claims.into()),
        Err(e) => {
            tracing::debug!("Rejected session token: {}", e);
            None
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        session_from_parts(parts, state)
            .ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))
    }
}

impl OptionalFromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Infallible> {
        Ok(session_from_parts(parts, state))
    }
}

/// Resolve `slug` and check that the session belongs to that company.
///
/// Unknown slugs are 404; a session for another company is 403.
pub async fn authorize_company(
    repo: &Repository,
    session: &Session,
    slug: &str,
) -> Result<Company, AppError> {
    let company = repo
        .get_company_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", slug)))?;

    if company.id != session.company_id {
        tracing::warn!(
            recruiter_id = %session.recruiter_id,
            slug = %slug,
            "Cross-tenant access rejected"
        );
        return Err(AppError::Forbidden(
            "You do not have access to this company".to_string(),
        ));
    }

    Ok(company)
}

/// A session that has been authorized for the `{slug}` in the request path.
///
/// Put it before any body extractor so ownership is checked before the
/// payload is validated.
#[derive(Debug, Clone)]
pub struct CompanyAccess {
    pub session: Session,
    pub company: Company,
}

impl FromRequestParts<AppState> for CompanyAccess {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = <Session as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        let Path(params) =
            <Path<HashMap<String, String>> as FromRequestParts<AppState>>::from_request_parts(
                parts, state,
            )
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let slug = params
            .get("slug")
            .ok_or_else(|| AppError::Internal("Route has no {slug} parameter".to_string()))?;

        let company = authorize_company(&state.repo, &session, slug).await?;
        Ok(Self { session, company })
    }
}

/// `Set-Cookie` value for a freshly issued session.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        Duration::days(SESSION_TTL_DAYS).num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recruiter() -> Recruiter {
        Recruiter {
            id: "r1".to_string(),
            company_id: "c1".to_string(),
            name: "Ada".to_string(),
            email: "ada@acme.test".to_string(),
            passcode_hash: String::new(),
            role: RecruiterRole::Owner,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let keys = SessionKeys::new(b"test-secret");
        let token = keys.issue(&recruiter()).unwrap();
        let session: Session = keys.verify(&token).unwrap().into();
        assert_eq!(
            session,
            Session {
                recruiter_id: "r1".to_string(),
                company_id: "c1".to_string(),
                role: RecruiterRole::Owner,
            }
        );
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = SessionKeys::new(b"one").issue(&recruiter()).unwrap();
        assert!(SessionKeys::new(b"two").verify(&token).is_err());
        assert!(SessionKeys::ephemeral().verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let secret = b"test-secret";
        let now = Utc::now();
        let claims = SessionClaims {
            sub: "r1".to_string(),
            recruiter_id: "r1".to_string(),
            company_id: "c1".to_string(),
            role: RecruiterRole::Editor,
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();
        assert!(SessionKeys::new(secret).verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(SessionKeys::new(b"s").verify("not.a.token").is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc", false);
        assert!(cookie.starts_with("career_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie("abc", true).ends_with("; Secure"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
