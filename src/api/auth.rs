//! Auth API endpoints.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
};

use super::{created, success, Ack, ApiResponse, ApiResult, ValidatedJson};
use crate::auth::{clear_session_cookie, hash_passcode, session_cookie, verify_passcode, Session};
use crate::errors::AppError;
use crate::models::{
    slugify, LoginRequest, LoginResponse, RecruiterProfile, SignupCompany, SignupRecruiter,
    SignupRequest, SignupResponse,
};
use crate::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or passcode";

fn cookie_headers(cookie: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))?;
    headers.insert(SET_COOKIE, value);
    Ok(headers)
}

/// POST /api/auth/signup - Create a company and its owner account.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<SignupResponse> {
    let slug = request
        .slug
        .clone()
        .unwrap_or_else(|| slugify(&request.company_name));
    if slug.len() < 2 {
        return Err(AppError::validation(
            "Choose a slug of at least 2 characters",
        ));
    }

    if state.repo.slug_exists(&slug).await? {
        return Err(AppError::Conflict(
            "Slug already taken. Please choose another.".to_string(),
        ));
    }
    if state.repo.email_exists(&request.recruiter_email).await? {
        return Err(AppError::Conflict(
            "An account with this email already exists.".to_string(),
        ));
    }

    let passcode_hash = hash_passcode(&request.passcode).await?;
    let (company, recruiter) = state
        .repo
        .create_tenant(&request, &slug, &passcode_hash)
        .await?;

    tracing::info!(slug = %company.slug, "Company signed up");

    created(SignupResponse {
        company: SignupCompany {
            name: company.name,
            slug: company.slug,
            headline: company.headline,
        },
        recruiter: SignupRecruiter {
            email: recruiter.email,
        },
    })
}

/// POST /api/auth/login - Verify credentials and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(HeaderMap, ApiResponse<LoginResponse>), AppError> {
    let recruiter = state.repo.get_recruiter_by_email(&request.email).await?;
    let stored = recruiter.as_ref().map(|r| r.passcode_hash.as_str());
    let verified = verify_passcode(&request.passcode, stored).await?;
    let recruiter = recruiter
        .filter(|_| verified)
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let company = state
        .repo
        .get_company_ref(&recruiter.company_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    state.repo.touch_last_login(&recruiter.id).await?;
    let token = state.sessions.issue(&recruiter)?;
    let headers = cookie_headers(&session_cookie(&token, state.config.secure_cookies))?;

    tracing::info!(recruiter_id = %recruiter.id, slug = %company.slug, "Recruiter logged in");

    Ok((
        headers,
        ApiResponse::new(LoginResponse { ok: true, company }),
    ))
}

/// POST /api/auth/logout - Clear the session cookie.
pub async fn logout() -> Result<(HeaderMap, ApiResponse<Ack>), AppError> {
    let headers = cookie_headers(&clear_session_cookie())?;
    Ok((headers, ApiResponse::new(Ack { ok: true })))
}

/// GET /api/auth/me - The signed-in recruiter, or null.
pub async fn me(
    State(state): State<AppState>,
    session: Option<Session>,
) -> ApiResult<Option<RecruiterProfile>> {
    let Some(session) = session else {
        return success(None);
    };

    let profile = state
        .repo
        .get_recruiter_profile(&session.recruiter_id)
        .await?
        .filter(|p| p.company.id == session.company_id);
    success(profile)
}
