//! Draft API endpoints.
//!
//! Drafts live only in process memory; nothing here touches the database.

use axum::extract::State;

use super::{success, Ack, ApiResult, ValidatedJson};
use crate::auth::CompanyAccess;
use crate::models::{StagedDraft, WriteDraftRequest};
use crate::AppState;

/// GET /api/companies/{slug}/draft - Read the staged draft as written, or null.
pub async fn get_draft(
    State(state): State<AppState>,
    access: CompanyAccess,
) -> ApiResult<Option<StagedDraft>> {
    success(state.drafts.read(&access.company.slug).await)
}

/// PUT /api/companies/{slug}/draft - Stage theme and/or sections.
pub async fn put_draft(
    State(state): State<AppState>,
    access: CompanyAccess,
    ValidatedJson(request): ValidatedJson<WriteDraftRequest>,
) -> ApiResult<Option<StagedDraft>> {
    let theme = request
        .theme
        .map(|value| serde_json::to_string(&value))
        .transpose()?;
    let sections = request
        .sections
        .map(|value| serde_json::to_string(&value))
        .transpose()?;

    let slug = &access.company.slug;
    state.drafts.write(slug, theme, sections).await;
    success(state.drafts.read(slug).await)
}

/// DELETE /api/companies/{slug}/draft - Discard the staged draft.
pub async fn delete_draft(
    State(state): State<AppState>,
    access: CompanyAccess,
) -> ApiResult<Ack> {
    state.drafts.clear(&access.company.slug).await;
    success(Ack { ok: true })
}
