//! Job posting model and its enumerations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_empty, Normalize};

/// Publication state of a job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Draft,
    Published,
}

text_enum!(JobStatus {
    Draft => "DRAFT",
    Published => "PUBLISHED",
});

/// Employment type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

text_enum!(JobType {
    FullTime => "FULL_TIME",
    PartTime => "PART_TIME",
    Contract => "CONTRACT",
    Internship => "INTERNSHIP",
    Temporary => "TEMPORARY",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkSetting {
    Onsite,
    Hybrid,
    Remote,
}

text_enum!(WorkSetting {
    Onsite => "ONSITE",
    Hybrid => "HYBRID",
    Remote => "REMOTE",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Engineering,
    Product,
    Design,
    Marketing,
    Sales,
    Operations,
    People,
    Finance,
    Other,
}

text_enum!(Department {
    Engineering => "ENGINEERING",
    Product => "PRODUCT",
    Design => "DESIGN",
    Marketing => "MARKETING",
    Sales => "SALES",
    Operations => "OPERATIONS",
    People => "PEOPLE",
    Finance => "FINANCE",
    Other => "OTHER",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Intern,
    Junior,
    Mid,
    Senior,
    Lead,
    Executive,
}

text_enum!(ExperienceLevel {
    Intern => "INTERN",
    Junior => "JUNIOR",
    Mid => "MID",
    Senior => "SENIOR",
    Lead => "LEAD",
    Executive => "EXECUTIVE",
});

/// A job posting owned by one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    pub location: String,
    pub job_type: JobType,
    pub work_setting: WorkSetting,
    pub department: Department,
    pub experience_level: ExperienceLevel,
    pub salary_range: String,
    pub description: String,
    pub apply_url: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_published(&self) -> bool {
        self.status == JobStatus::Published
    }
}

/// Publish timestamp after a status change.
///
/// Stamped on the transition into `Published`; never cleared afterwards.
pub fn next_published_at(
    previous: Option<(JobStatus, Option<DateTime<Utc>>)>,
    next_status: JobStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let publishing = next_status == JobStatus::Published;
    match previous {
        Some((JobStatus::Published, stamp)) if publishing => stamp.or(Some(now)),
        _ if publishing => Some(now),
        Some((_, stamp)) => stamp,
        None => None,
    }
}

/// Request body for creating a job.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 3, max = 120))]
    pub title: String,
    #[validate(length(min = 2))]
    pub location: String,
    pub job_type: JobType,
    pub work_setting: WorkSetting,
    pub description: String,
    #[validate(url(message = "Enter a valid URL"))]
    pub apply_url: String,
    pub status: JobStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    pub department: Department,
    pub experience_level: ExperienceLevel,
    #[validate(length(min = 1))]
    pub salary_range: String,
}

impl Normalize for CreateJobRequest {
    fn normalize(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            apply_url: self.apply_url.trim().to_string(),
            tags: normalize_tags(self.tags),
            ..self
        }
    }
}

/// Request body for a partial job update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 120))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 2))]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub work_setting: Option<WorkSetting>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL"))]
    pub apply_url: Option<String>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub salary_range: Option<String>,
}

impl Normalize for UpdateJobRequest {
    fn normalize(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            location: self.location.map(|l| l.trim().to_string()),
            apply_url: self.apply_url.map(|u| u.trim().to_string()),
            tags: self.tags.map(normalize_tags),
            ..self
        }
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .filter_map(|t| non_empty(Some(t)))
        .collect()
}
