//! Careers page endpoints: the public listing and the owner preview.

use axum::extract::{Path, Query, State};

use super::{success, ApiResult};
use crate::auth::CompanyAccess;
use crate::careers::{render, CareersPage, CommittedPage, JobFilters, ViewMode};
use crate::errors::AppError;
use crate::models::{Company, CompanyProfile, JobStatus};
use crate::AppState;

async fn load_committed(
    state: &AppState,
    company: Company,
    status: Option<JobStatus>,
) -> Result<CommittedPage, AppError> {
    let theme = state.repo.get_theme(&company.id).await?;
    let sections = state.repo.list_sections(&company.id).await?;
    let jobs = state.repo.list_jobs(&company.id, status).await?;
    Ok(CommittedPage {
        profile: CompanyProfile { company, theme },
        sections,
        jobs,
    })
}

/// GET /api/careers/{slug} - Public careers page with published jobs.
pub async fn public_careers(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(filters): Query<JobFilters>,
) -> ApiResult<CareersPage> {
    let company = state
        .repo
        .get_company_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", slug)))?;

    let committed = load_committed(&state, company, Some(JobStatus::Published)).await?;
    success(render(committed, None, filters, ViewMode::Public))
}

/// GET /api/companies/{slug}/preview - Owner preview with the draft applied.
pub async fn preview_careers(
    State(state): State<AppState>,
    access: CompanyAccess,
    Query(filters): Query<JobFilters>,
) -> ApiResult<CareersPage> {
    let draft = state.drafts.snapshot(&access.company.slug).await;
    let committed = load_committed(&state, access.company, None).await?;
    success(render(committed, draft.as_ref(), filters, ViewMode::Preview))
}
