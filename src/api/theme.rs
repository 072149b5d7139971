//! Theme API endpoints.

use axum::extract::State;

use super::{success, ApiResult, ValidatedJson};
use crate::auth::CompanyAccess;
use crate::errors::AppError;
use crate::models::{CompanyProfile, ThemeSettings};
use crate::AppState;

/// GET /api/companies/{slug}/theme - Company fields and theme.
pub async fn get_theme(
    State(state): State<AppState>,
    access: CompanyAccess,
) -> ApiResult<CompanyProfile> {
    let profile = state
        .repo
        .get_company_profile(&access.company.slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", access.company.slug)))?;
    success(profile)
}

/// PATCH /api/companies/{slug}/theme - Update company fields and theme together.
pub async fn update_theme(
    State(state): State<AppState>,
    access: CompanyAccess,
    ValidatedJson(settings): ValidatedJson<ThemeSettings>,
) -> ApiResult<CompanyProfile> {
    let profile = state
        .repo
        .update_theme_settings(&access.company.id, &settings)
        .await?;
    tracing::info!(
        slug = %access.company.slug,
        recruiter_id = %access.session.recruiter_id,
        role = access.session.role.as_str(),
        "Theme updated"
    );
    success(profile)
}
