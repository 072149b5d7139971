//! Job API endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{created, success, ApiResult, ValidatedJson};
use crate::auth::CompanyAccess;
use crate::errors::AppError;
use crate::models::{CreateJobRequest, Job, JobStatus, UpdateJobRequest};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

impl JobListQuery {
    /// `None` for "all", otherwise the requested status.
    fn status(&self) -> Result<Option<JobStatus>, AppError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => JobStatus::parse(&s.to_ascii_uppercase())
                .map(Some)
                .ok_or_else(|| AppError::validation(format!("Unknown job status '{}'", s))),
        }
    }
}

/// GET /api/companies/{slug}/jobs - List jobs, optionally by status.
pub async fn list_jobs(
    State(state): State<AppState>,
    access: CompanyAccess,
    Query(query): Query<JobListQuery>,
) -> ApiResult<Vec<Job>> {
    let status = query.status()?;
    success(state.repo.list_jobs(&access.company.id, status).await?)
}

/// POST /api/companies/{slug}/jobs - Create a job.
pub async fn create_job(
    State(state): State<AppState>,
    access: CompanyAccess,
    ValidatedJson(request): ValidatedJson<CreateJobRequest>,
) -> ApiResult<Job> {
    let job = state.repo.create_job(&access.company.id, &request).await?;
    tracing::info!(
        slug = %access.company.slug,
        job_id = %job.id,
        recruiter_id = %access.session.recruiter_id,
        "Job created"
    );
    created(job)
}

/// PATCH /api/companies/{slug}/jobs/{jobId} - Partially update a job.
pub async fn update_job(
    State(state): State<AppState>,
    access: CompanyAccess,
    Path((_, job_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> ApiResult<Job> {
    let job = state
        .repo
        .update_job(&access.company.id, &job_id, &request)
        .await?;
    tracing::info!(slug = %access.company.slug, job_id = %job.id, "Job updated");
    success(job)
}

/// DELETE /api/companies/{slug}/jobs/{jobId} - Delete a job.
pub async fn delete_job(
    State(state): State<AppState>,
    access: CompanyAccess,
    Path((_, job_id)): Path<(String, String)>,
) -> ApiResult<Job> {
    let job = state.repo.delete_job(&access.company.id, &job_id).await?;
    tracing::info!(slug = %access.company.slug, job_id = %job.id, "Job deleted");
    success(job)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(status: Option<&str>) -> JobListQuery {
        JobListQuery {
            status: status.map(str::to_string),
        }
    }

    #[test]
    fn test_status_query_parsing() {
        assert_eq!(query(None).status().unwrap(), None);
        assert_eq!(query(Some("")).status().unwrap(), None);
        assert_eq!(query(Some("ALL")).status().unwrap(), None);
        assert_eq!(
            query(Some("published")).status().unwrap(),
            Some(JobStatus::Published)
        );
        assert_eq!(query(Some("DRAFT")).status().unwrap(), Some(JobStatus::Draft));
        assert!(query(Some("archived")).status().is_err());
    }
}
