//! Section API endpoints.

use axum::extract::{Path, State};

use super::{created, success, ApiResult, ValidatedJson};
use crate::auth::CompanyAccess;
use crate::models::{CreateSectionRequest, Section, UpdateSectionRequest};
use crate::AppState;

/// GET /api/companies/{slug}/sections - List sections by sort order.
pub async fn list_sections(
    State(state): State<AppState>,
    access: CompanyAccess,
) -> ApiResult<Vec<Section>> {
    success(state.repo.list_sections(&access.company.id).await?)
}

/// POST /api/companies/{slug}/sections - Create a section.
pub async fn create_section(
    State(state): State<AppState>,
    access: CompanyAccess,
    ValidatedJson(request): ValidatedJson<CreateSectionRequest>,
) -> ApiResult<Section> {
    let section = state
        .repo
        .create_section(&access.company.id, &request)
        .await?;
    tracing::info!(slug = %access.company.slug, section_id = %section.id, "Section created");
    created(section)
}

/// PATCH /api/companies/{slug}/sections/{sectionId} - Partially update a section.
pub async fn update_section(
    State(state): State<AppState>,
    access: CompanyAccess,
    Path((_, section_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateSectionRequest>,
) -> ApiResult<Section> {
    let section = state
        .repo
        .update_section(&access.company.id, &section_id, &request)
        .await?;
    success(section)
}

/// DELETE /api/companies/{slug}/sections/{sectionId} - Delete a section.
pub async fn delete_section(
    State(state): State<AppState>,
    access: CompanyAccess,
    Path((_, section_id)): Path<(String, String)>,
) -> ApiResult<Section> {
    let section = state
        .repo
        .delete_section(&access.company.id, &section_id)
        .await?;
    tracing::info!(slug = %access.company.slug, section_id = %section.id, "Section deleted");
    success(section)
}
