//! Database repository for CRUD operations.
//!
//! Every job and section query is scoped by `company_id`, so an id that
//! belongs to another tenant behaves exactly like an unknown id.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    next_published_at, non_empty, unique_slug, Company, CompanyProfile, CompanyRef,
    CreateJobRequest, CreateSectionRequest, Department, ExperienceLevel, Job, JobStatus, JobType,
    Recruiter, RecruiterProfile, RecruiterRole, Section, SignupRequest, Theme, ThemeSettings,
    UpdateJobRequest, UpdateSectionRequest, WorkSetting, DEFAULT_SORT_ORDER,
};

const COMPANY_COLUMNS: &str = "id, slug, name, headline, subheadline, mission, story, headquarters, website, size_range, industries, show_salary, created_at, updated_at";

const THEME_COLUMNS: &str = "id, company_id, primary_color, secondary_color, accent_color, background_color, hero_background, banner_image_url, logo_url, culture_video_url, eyebrow";

const SECTION_COLUMNS: &str =
    "id, company_id, title, slug, summary, content, sort_order, created_at, updated_at";

const JOB_COLUMNS: &str = "id, company_id, title, slug, status, location, job_type, work_setting, department, experience_level, salary_range, description, apply_url, tags, featured, published_at, created_at, updated_at";

const RECRUITER_COLUMNS: &str =
    "id, company_id, name, email, passcode_hash, role, last_login_at, created_at";

/// Theme a new tenant starts with.
const DEFAULT_THEME: (&str, &str, &str, &str, &str, &str) = (
    "#0f172a",
    "#10b981",
    "#fbbf24",
    "#f0fdfa",
    "linear-gradient(135deg,#0f172a,#0ea5e9)",
    "Careers",
);

const DEFAULT_SUBHEADLINE: &str =
    "Tell your story, highlight your benefits, and make it easy to browse jobs.";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== COMPANY OPERATIONS ====================

    /// Get a company by slug.
    pub async fn get_company_by_slug(&self, slug: &str) -> Result<Option<Company>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM companies WHERE slug = ?",
            COMPANY_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(company_from_row))
    }

    /// Get the theme of a company.
    pub async fn get_theme(&self, company_id: &str) -> Result<Option<Theme>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM themes WHERE company_id = ?",
            THEME_COLUMNS
        ))
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(theme_from_row))
    }

    /// Get a company together with its theme.
    pub async fn get_company_profile(
        &self,
        slug: &str,
    ) -> Result<Option<CompanyProfile>, AppError> {
        let Some(company) = self.get_company_by_slug(slug).await? else {
            return Ok(None);
        };
        let theme = self.get_theme(&company.id).await?;
        Ok(Some(CompanyProfile { company, theme }))
    }

    /// Whether a company slug is already taken.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM companies WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("n") > 0)
    }

    /// Create a company with its default theme, a starter section and its owner.
    pub async fn create_tenant(
        &self,
        request: &SignupRequest,
        slug: &str,
        passcode_hash: &str,
    ) -> Result<(Company, Recruiter), AppError> {
        let now = Utc::now();
        let company = Company {
            id: uuid::Uuid::new_v4().to_string(),
            slug: slug.to_string(),
            name: request.company_name.clone(),
            headline: request
                .headline
                .clone()
                .unwrap_or_else(|| format!("Join {}", request.company_name)),
            subheadline: Some(
                request
                    .subheadline
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUBHEADLINE.to_string()),
            ),
            mission: None,
            story: None,
            headquarters: None,
            website: None,
            size_range: None,
            industries: Vec::new(),
            show_salary: true,
            created_at: now,
            updated_at: now,
        };
        let recruiter = Recruiter {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: company.id.clone(),
            name: request.recruiter_name.clone(),
            email: request.recruiter_email.clone(),
            passcode_hash: passcode_hash.to_string(),
            role: RecruiterRole::Owner,
            last_login_at: None,
            created_at: now,
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            "INSERT INTO companies ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            COMPANY_COLUMNS
        ))
        .bind(&company.id)
        .bind(&company.slug)
        .bind(&company.name)
        .bind(&company.headline)
        .bind(&company.subheadline)
        .bind(&company.mission)
        .bind(&company.story)
        .bind(&company.headquarters)
        .bind(&company.website)
        .bind(&company.size_range)
        .bind(to_json_array(&company.industries))
        .bind(company.show_salary as i32)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_or(e, "Slug already taken. Please choose another."))?;

        let (primary, secondary, accent, background, hero, eyebrow) = DEFAULT_THEME;
        sqlx::query(&format!(
            "INSERT INTO themes ({}) VALUES (?, ?, ?, ?, ?, ?, ?, NULL, NULL, NULL, ?)",
            THEME_COLUMNS
        ))
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&company.id)
        .bind(primary)
        .bind(secondary)
        .bind(accent)
        .bind(background)
        .bind(hero)
        .bind(eyebrow)
        .execute(&mut *tx)
        .await?;

        sqlx::query(&format!(
            "INSERT INTO sections ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            SECTION_COLUMNS
        ))
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&company.id)
        .bind("About the team")
        .bind(format!("about-{}", company.slug))
        .bind("What you do and how you work.")
        .bind("Describe your mission, how your teams collaborate, and what success looks like. You can edit or reorder this later.")
        .bind(1_i64)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(&format!(
            "INSERT INTO recruiters ({}) VALUES (?, ?, ?, ?, ?, ?, NULL, ?)",
            RECRUITER_COLUMNS
        ))
        .bind(&recruiter.id)
        .bind(&recruiter.company_id)
        .bind(&recruiter.name)
        .bind(&recruiter.email)
        .bind(&recruiter.passcode_hash)
        .bind(recruiter.role.as_str())
        .bind(recruiter.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_or(e, "An account with this email already exists."))?;

        tx.commit().await?;

        Ok((company, recruiter))
    }

    /// Update company fields and upsert the theme in one transaction.
    pub async fn update_theme_settings(
        &self,
        company_id: &str,
        settings: &ThemeSettings,
    ) -> Result<CompanyProfile, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"UPDATE companies SET
                headline = ?, subheadline = ?, mission = ?, story = ?, headquarters = ?,
                website = ?, size_range = ?, industries = ?, show_salary = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&settings.headline)
        .bind(&settings.subheadline)
        .bind(&settings.mission)
        .bind(&settings.story)
        .bind(&settings.headquarters)
        .bind(&settings.website)
        .bind(&settings.size_range)
        .bind(to_json_array(&settings.industries))
        .bind(settings.show_salary as i32)
        .bind(now)
        .bind(company_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Company {} not found",
                company_id
            )));
        }

        let theme = &settings.theme;
        sqlx::query(
            r#"INSERT INTO themes (
                id, company_id, primary_color, secondary_color, accent_color, background_color,
                hero_background, banner_image_url, logo_url, culture_video_url, eyebrow
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(company_id) DO UPDATE SET
                primary_color = excluded.primary_color,
                secondary_color = excluded.secondary_color,
                accent_color = excluded.accent_color,
                background_color = excluded.background_color,
                hero_background = excluded.hero_background,
                banner_image_url = excluded.banner_image_url,
                logo_url = excluded.logo_url,
                culture_video_url = excluded.culture_video_url,
                eyebrow = excluded.eyebrow"#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(company_id)
        .bind(&theme.primary_color)
        .bind(&theme.secondary_color)
        .bind(&theme.accent_color)
        .bind(&theme.background_color)
        .bind(&theme.hero_background)
        .bind(&theme.banner_image_url)
        .bind(&theme.logo_url)
        .bind(&theme.culture_video_url)
        .bind(&theme.eyebrow)
        .execute(&mut *tx)
        .await?;

        let company_row = sqlx::query(&format!(
            "SELECT {} FROM companies WHERE id = ?",
            COMPANY_COLUMNS
        ))
        .bind(company_id)
        .fetch_one(&mut *tx)
        .await?;
        let theme_row = sqlx::query(&format!(
            "SELECT {} FROM themes WHERE company_id = ?",
            THEME_COLUMNS
        ))
        .bind(company_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CompanyProfile {
            company: company_from_row(&company_row),
            theme: theme_row.as_ref().map(theme_from_row),
        })
    }

    // ==================== RECRUITER OPERATIONS ====================

    /// Get a recruiter by email.
    pub async fn get_recruiter_by_email(&self, email: &str) -> Result<Option<Recruiter>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM recruiters WHERE email = ?",
            RECRUITER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(recruiter_from_row).transpose()
    }

    /// Whether an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM recruiters WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("n") > 0)
    }

    /// Get a recruiter with their company reference.
    pub async fn get_recruiter_profile(
        &self,
        recruiter_id: &str,
    ) -> Result<Option<RecruiterProfile>, AppError> {
        let row = sqlx::query(
            r#"SELECT r.id, r.name, r.email, r.role,
                      c.id AS company_id, c.name AS company_name, c.slug AS company_slug
               FROM recruiters r JOIN companies c ON c.id = r.company_id
               WHERE r.id = ?"#,
        )
        .bind(recruiter_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let role: String = row.get("role");
        Ok(Some(RecruiterProfile {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            role: parse_column(&role, RecruiterRole::parse, "recruiter role")?,
            company: CompanyRef {
                id: row.get("company_id"),
                name: row.get("company_name"),
                slug: row.get("company_slug"),
            },
        }))
    }

    /// Get the company reference for a company id.
    pub async fn get_company_ref(&self, company_id: &str) -> Result<Option<CompanyRef>, AppError> {
        let row = sqlx::query("SELECT id, name, slug FROM companies WHERE id = ?")
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| CompanyRef {
            id: row.get("id"),
            name: row.get("name"),
            slug: row.get("slug"),
        }))
    }

    /// Record a successful login.
    pub async fn touch_last_login(&self, recruiter_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE recruiters SET last_login_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(recruiter_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== SECTION OPERATIONS ====================

    /// List sections of a company by sort order.
    pub async fn list_sections(&self, company_id: &str) -> Result<Vec<Section>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM sections WHERE company_id = ? ORDER BY sort_order ASC, created_at ASC",
            SECTION_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(section_from_row).collect())
    }

    /// Get a section of a company.
    pub async fn get_section(
        &self,
        company_id: &str,
        id: &str,
    ) -> Result<Option<Section>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sections WHERE id = ? AND company_id = ?",
            SECTION_COLUMNS
        ))
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(section_from_row))
    }

    /// Create a section.
    pub async fn create_section(
        &self,
        company_id: &str,
        request: &CreateSectionRequest,
    ) -> Result<Section, AppError> {
        let now = Utc::now();
        let section = Section {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            title: request.title.clone(),
            slug: request
                .slug
                .clone()
                .unwrap_or_else(|| unique_slug(&request.title)),
            summary: request.summary.clone(),
            content: request.content.clone(),
            sort_order: request.sort_order.unwrap_or(DEFAULT_SORT_ORDER),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO sections ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            SECTION_COLUMNS
        ))
        .bind(&section.id)
        .bind(&section.company_id)
        .bind(&section.title)
        .bind(&section.slug)
        .bind(&section.summary)
        .bind(&section.content)
        .bind(section.sort_order)
        .bind(section.created_at)
        .bind(section.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(section)
    }

    /// Apply a partial update to a section.
    pub async fn update_section(
        &self,
        company_id: &str,
        id: &str,
        request: &UpdateSectionRequest,
    ) -> Result<Section, AppError> {
        let existing = self
            .get_section(company_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section {} not found", id)))?;

        let updated = Section {
            title: request.title.clone().unwrap_or(existing.title),
            slug: request.slug.clone().unwrap_or(existing.slug),
            // A blank summary clears it.
            summary: match &request.summary {
                Some(summary) => non_empty(Some(summary.clone())),
                None => existing.summary,
            },
            content: request.content.clone().unwrap_or(existing.content),
            sort_order: request.sort_order.unwrap_or(existing.sort_order),
            updated_at: Utc::now(),
            ..existing
        };

        sqlx::query(
            "UPDATE sections SET title = ?, slug = ?, summary = ?, content = ?, sort_order = ?, updated_at = ? WHERE id = ? AND company_id = ?",
        )
        .bind(&updated.title)
        .bind(&updated.slug)
        .bind(&updated.summary)
        .bind(&updated.content)
        .bind(updated.sort_order)
        .bind(updated.updated_at)
        .bind(id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a section, returning the removed record.
    pub async fn delete_section(&self, company_id: &str, id: &str) -> Result<Section, AppError> {
        let existing = self
            .get_section(company_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section {} not found", id)))?;

        sqlx::query("DELETE FROM sections WHERE id = ? AND company_id = ?")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;

        Ok(existing)
    }

    // ==================== JOB OPERATIONS ====================

    /// List jobs of a company, featured first then newest first.
    pub async fn list_jobs(
        &self,
        company_id: &str,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>, AppError> {
        let rows = match status {
            Some(status) => {
                sqlx::query(&format!(
                    "SELECT {} FROM jobs WHERE company_id = ? AND status = ? ORDER BY featured DESC, created_at DESC",
                    JOB_COLUMNS
                ))
                .bind(company_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM jobs WHERE company_id = ? ORDER BY featured DESC, created_at DESC",
                    JOB_COLUMNS
                ))
                .bind(company_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(job_from_row).collect()
    }

    /// Get a job of a company.
    pub async fn get_job(&self, company_id: &str, id: &str) -> Result<Option<Job>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM jobs WHERE id = ? AND company_id = ?",
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(job_from_row).transpose()
    }

    /// Create a job. Jobs created as published are stamped immediately.
    pub async fn create_job(
        &self,
        company_id: &str,
        request: &CreateJobRequest,
    ) -> Result<Job, AppError> {
        let now = Utc::now();
        let job = Job {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: company_id.to_string(),
            title: request.title.clone(),
            slug: unique_slug(&request.title),
            status: request.status,
            location: request.location.clone(),
            job_type: request.job_type,
            work_setting: request.work_setting,
            department: request.department,
            experience_level: request.experience_level,
            salary_range: request.salary_range.clone(),
            description: request.description.clone(),
            apply_url: request.apply_url.clone(),
            tags: request.tags.clone(),
            featured: request.featured.unwrap_or(false),
            published_at: next_published_at(None, request.status, now),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO jobs ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            JOB_COLUMNS
        ))
        .bind(&job.id)
        .bind(&job.company_id)
        .bind(&job.title)
        .bind(&job.slug)
        .bind(job.status.as_str())
        .bind(&job.location)
        .bind(job.job_type.as_str())
        .bind(job.work_setting.as_str())
        .bind(job.department.as_str())
        .bind(job.experience_level.as_str())
        .bind(&job.salary_range)
        .bind(&job.description)
        .bind(&job.apply_url)
        .bind(to_json_array(&job.tags))
        .bind(job.featured as i32)
        .bind(job.published_at)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    /// Apply a partial update to a job.
    pub async fn update_job(
        &self,
        company_id: &str,
        id: &str,
        request: &UpdateJobRequest,
    ) -> Result<Job, AppError> {
        let existing = self
            .get_job(company_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))?;

        let now = Utc::now();
        let status = request.status.unwrap_or(existing.status);
        let published_at =
            next_published_at(Some((existing.status, existing.published_at)), status, now);

        let updated = Job {
            title: request.title.clone().unwrap_or(existing.title),
            status,
            location: request.location.clone().unwrap_or(existing.location),
            job_type: request.job_type.unwrap_or(existing.job_type),
            work_setting: request.work_setting.unwrap_or(existing.work_setting),
            department: request.department.unwrap_or(existing.department),
            experience_level: request.experience_level.unwrap_or(existing.experience_level),
            salary_range: request.salary_range.clone().unwrap_or(existing.salary_range),
            description: request.description.clone().unwrap_or(existing.description),
            apply_url: request.apply_url.clone().unwrap_or(existing.apply_url),
            tags: request.tags.clone().unwrap_or(existing.tags),
            featured: request.featured.unwrap_or(existing.featured),
            published_at,
            updated_at: now,
            ..existing
        };

        sqlx::query(
            r#"UPDATE jobs SET
                title = ?, status = ?, location = ?, job_type = ?, work_setting = ?,
                department = ?, experience_level = ?, salary_range = ?, description = ?,
                apply_url = ?, tags = ?, featured = ?, published_at = ?, updated_at = ?
            WHERE id = ? AND company_id = ?"#,
        )
        .bind(&updated.title)
        .bind(updated.status.as_str())
        .bind(&updated.location)
        .bind(updated.job_type.as_str())
        .bind(updated.work_setting.as_str())
        .bind(updated.department.as_str())
        .bind(updated.experience_level.as_str())
        .bind(&updated.salary_range)
        .bind(&updated.description)
        .bind(&updated.apply_url)
        .bind(to_json_array(&updated.tags))
        .bind(updated.featured as i32)
        .bind(updated.published_at)
        .bind(updated.updated_at)
        .bind(id)
        .bind(company_id)
        .execute(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a job, returning the removed record.
    pub async fn delete_job(&self, company_id: &str, id: &str) -> Result<Job, AppError> {
        let existing = self
            .get_job(company_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", id)))?;

        sqlx::query("DELETE FROM jobs WHERE id = ? AND company_id = ?")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;

        Ok(existing)
    }
}

// Helper functions for row conversion

fn company_from_row(row: &sqlx::sqlite::SqliteRow) -> Company {
    let show_salary: i32 = row.get("show_salary");
    let industries: String = row.get("industries");
    Company {
        id: row.get("id"),
        slug: row.get("slug"),
        name: row.get("name"),
        headline: row.get("headline"),
        subheadline: row.get("subheadline"),
        mission: row.get("mission"),
        story: row.get("story"),
        headquarters: row.get("headquarters"),
        website: row.get("website"),
        size_range: row.get("size_range"),
        industries: parse_json_array(&industries),
        show_salary: show_salary != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn theme_from_row(row: &sqlx::sqlite::SqliteRow) -> Theme {
    Theme {
        id: row.get("id"),
        company_id: row.get("company_id"),
        primary_color: row.get("primary_color"),
        secondary_color: row.get("secondary_color"),
        accent_color: row.get("accent_color"),
        background_color: row.get("background_color"),
        hero_background: row.get("hero_background"),
        banner_image_url: row.get("banner_image_url"),
        logo_url: row.get("logo_url"),
        culture_video_url: row.get("culture_video_url"),
        eyebrow: row.get("eyebrow"),
    }
}

fn section_from_row(row: &sqlx::sqlite::SqliteRow) -> Section {
    Section {
        id: row.get("id"),
        company_id: row.get("company_id"),
        title: row.get("title"),
        slug: row.get("slug"),
        summary: row.get("summary"),
        content: row.get("content"),
        sort_order: row.get("sort_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn job_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Job, AppError> {
    let status: String = row.get("status");
    let job_type: String = row.get("job_type");
    let work_setting: String = row.get("work_setting");
    let department: String = row.get("department");
    let experience_level: String = row.get("experience_level");
    let tags: String = row.get("tags");
    let featured: i32 = row.get("featured");
    let published_at: Option<DateTime<Utc>> = row.get("published_at");

    Ok(Job {
        id: row.get("id"),
        company_id: row.get("company_id"),
        title: row.get("title"),
        slug: row.get("slug"),
        status: parse_column(&status, JobStatus::parse, "job status")?,
        location: row.get("location"),
        job_type: parse_column(&job_type, JobType::parse, "job type")?,
        work_setting: parse_column(&work_setting, WorkSetting::parse, "work setting")?,
        department: parse_column(&department, Department::parse, "department")?,
        experience_level: parse_column(
            &experience_level,
            ExperienceLevel::parse,
            "experience level",
        )?,
        salary_range: row.get("salary_range"),
        description: row.get("description"),
        apply_url: row.get("apply_url"),
        tags: parse_json_array(&tags),
        featured: featured != 0,
        published_at,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn recruiter_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Recruiter, AppError> {
    let role: String = row.get("role");
    Ok(Recruiter {
        id: row.get("id"),
        company_id: row.get("company_id"),
        name: row.get("name"),
        email: row.get("email"),
        passcode_hash: row.get("passcode_hash"),
        role: parse_column(&role, RecruiterRole::parse, "recruiter role")?,
        last_login_at: row.get("last_login_at"),
        created_at: row.get("created_at"),
    })
}

fn parse_column<T>(value: &str, parse: fn(&str) -> Option<T>, what: &str) -> Result<T, AppError> {
    parse(value).ok_or_else(|| AppError::Internal(format!("Unknown {} '{}' in database", what, value)))
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

fn to_json_array(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Map a unique-constraint violation to a conflict, anything else to a database error.
fn conflict_or(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::Conflict(message.to_string());
        }
    }
    err.into()
}
