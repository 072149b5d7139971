//! Careers page rendering.
//!
//! Pure functions that turn committed company data, an optional draft and a
//! set of job filters into the JSON view model served to clients.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    CompanyProfile, DraftSnapshot, Job, JobStatus, JobType, Section, SectionView,
};

/// How long a posting stays valid after publication.
const POSTING_VALID_DAYS: i64 = 60;

/// Candidate-facing job filters, taken from the query string.
///
/// Empty values and `"all"` disable the corresponding condition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobFilters {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(skip)]
    pub status: Option<JobStatus>,
}

fn is_any(value: &str) -> bool {
    value.is_empty() || value == "all"
}

impl JobFilters {
    pub fn matches(&self, job: &Job) -> bool {
        let matches_query =
            self.q.is_empty() || job.title.to_lowercase().contains(&self.q.to_lowercase());
        let matches_location = is_any(&self.location) || job.location == self.location;
        let matches_job_type = is_any(&self.job_type) || job.job_type.as_str() == self.job_type;
        let matches_status = self.status.map_or(true, |status| job.status == status);

        matches_query && matches_location && matches_job_type && matches_status
    }
}

/// Sort jobs featured first, then newest first. The sort is stable.
pub fn order_jobs(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Jobs matching `filters`, in input order.
pub fn filter_jobs(jobs: &[Job], filters: &JobFilters) -> Vec<Job> {
    jobs.iter().filter(|job| filters.matches(job)).cloned().collect()
}

/// Filter options derived from the unfiltered job list.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub locations: Vec<String>,
    pub job_types: Vec<JobType>,
}

impl Facets {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let mut facets = Facets::default();
        for job in jobs {
            if !facets.locations.contains(&job.location) {
                facets.locations.push(job.location.clone());
            }
            if !facets.job_types.contains(&job.job_type) {
                facets.job_types.push(job.job_type);
            }
        }
        facets
    }
}

/// schema.org `JobPosting` structured data.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub date_posted: Option<DateTime<Utc>>,
    pub employment_type: JobType,
    pub hiring_organization: Organization,
    pub job_location: Place,
    pub direct_apply: bool,
    pub valid_through: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub same_as: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Place {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub address: String,
}

impl JobPosting {
    pub fn new(job: &Job, company: &CompanyProfile, now: DateTime<Utc>) -> Self {
        Self {
            context: "https://schema.org/",
            kind: "JobPosting",
            title: job.title.clone(),
            description: job.description.clone(),
            date_posted: job.published_at,
            employment_type: job.job_type,
            hiring_organization: Organization {
                kind: "Organization",
                name: company.company.name.clone(),
                same_as: company.company.website.clone(),
            },
            job_location: Place {
                kind: "Place",
                address: job.location.clone(),
            },
            direct_apply: true,
            valid_through: job
                .published_at
                .map(|published| published + Duration::days(POSTING_VALID_DAYS))
                .unwrap_or(now),
        }
    }
}

/// Who a page is rendered for.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Public,
    Preview,
}

/// Committed data a page is rendered from.
#[derive(Debug, Clone)]
pub struct CommittedPage {
    pub profile: CompanyProfile,
    pub sections: Vec<Section>,
    pub jobs: Vec<Job>,
}

/// Rendered careers page view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareersPage {
    pub mode: ViewMode,
    pub company: CompanyProfile,
    pub sections: Vec<SectionView>,
    pub jobs: Vec<Job>,
    pub total_jobs: usize,
    pub facets: Facets,
    pub filters: JobFilters,
    pub structured_data: Vec<JobPosting>,
    pub has_unsaved_changes: bool,
}

/// Overlay a draft onto committed company data and sections.
///
/// Returns the merged profile, the section views and whether any draft part
/// was applied.
pub fn merge(
    profile: &CompanyProfile,
    sections: &[Section],
    draft: Option<&DraftSnapshot>,
) -> (CompanyProfile, Vec<SectionView>, bool) {
    let theme_draft = draft.and_then(|d| d.theme.as_ref());
    let sections_draft = draft.and_then(|d| d.sections.as_ref());

    let merged_profile = match theme_draft {
        Some(settings) => settings.apply_to(profile),
        None => profile.clone(),
    };

    let merged_sections = match sections_draft {
        Some(drafts) => {
            let mut views: Vec<SectionView> = drafts
                .iter()
                .enumerate()
                .map(|(position, section)| section.to_view(position))
                .collect();
            views.sort_by_key(|view| view.sort_order);
            views
        }
        None => sections.iter().map(SectionView::from).collect(),
    };

    (
        merged_profile,
        merged_sections,
        theme_draft.is_some() || sections_draft.is_some(),
    )
}

/// Render a careers page.
pub fn render(
    committed: CommittedPage,
    draft: Option<&DraftSnapshot>,
    filters: JobFilters,
    mode: ViewMode,
) -> CareersPage {
    let CommittedPage {
        profile,
        sections,
        mut jobs,
    } = committed;

    let (company, sections, has_unsaved_changes) = merge(&profile, &sections, draft);

    order_jobs(&mut jobs);
    let now = Utc::now();
    let structured_data = jobs
        .iter()
        .map(|job| JobPosting::new(job, &company, now))
        .collect();
    let facets = Facets::from_jobs(&jobs);
    let total_jobs = jobs.len();
    let jobs = filter_jobs(&jobs, &filters);

    CareersPage {
        mode,
        company,
        sections,
        jobs,
        total_jobs,
        facets,
        filters,
        structured_data,
        has_unsaved_changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Company, Department, ExperienceLevel, SectionDraft, ThemeColors, ThemeSettings,
        WorkSetting,
    };

    fn job(title: &str, location: &str, job_type: JobType, featured: bool, age_days: i64) -> Job {
        let created = Utc::now() - Duration::days(age_days);
        Job {
            id: format!("job-{}", title.to_lowercase()),
            company_id: "c1".to_string(),
            title: title.to_string(),
            slug: title.to_lowercase(),
            status: JobStatus::Published,
            location: location.to_string(),
            job_type,
            work_setting: WorkSetting::Remote,
            department: Department::Engineering,
            experience_level: ExperienceLevel::Mid,
            salary_range: "$1".to_string(),
            description: "desc".to_string(),
            apply_url: "https://acme.example.com/apply".to_string(),
            tags: vec![],
            featured,
            published_at: Some(created),
            created_at: created,
            updated_at: created,
        }
    }

    fn profile() -> CompanyProfile {
        let now = Utc::now();
        CompanyProfile {
            company: Company {
                id: "c1".to_string(),
                slug: "acme".to_string(),
                name: "Acme".to_string(),
                headline: "Join Acme".to_string(),
                subheadline: None,
                mission: None,
                story: None,
                headquarters: None,
                website: Some("https://acme.example.com".to_string()),
                size_range: None,
                industries: vec![],
                show_salary: true,
                created_at: now,
                updated_at: now,
            },
            theme: None,
        }
    }

    fn section(id: &str, sort_order: i64) -> Section {
        let now = Utc::now();
        Section {
            id: id.to_string(),
            company_id: "c1".to_string(),
            title: format!("Section {}", id),
            slug: id.to_string(),
            summary: None,
            content: "Body".to_string(),
            sort_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            job("Engineer", "Austin", JobType::FullTime, false, 1),
            job("Designer", "Remote", JobType::Contract, false, 2),
        ]
    }

    fn filters(q: &str, location: &str, job_type: &str) -> JobFilters {
        JobFilters {
            q: q.to_string(),
            location: location.to_string(),
            job_type: job_type.to_string(),
            status: None,
        }
    }

    #[test]
    fn test_empty_filters_return_everything_in_order() {
        let jobs = sample_jobs();
        assert_eq!(filter_jobs(&jobs, &filters("", "all", "all")), jobs);
        assert_eq!(filter_jobs(&jobs, &JobFilters::default()), jobs);
    }

    #[test]
    fn test_query_is_case_insensitive_substring_of_title() {
        let result = filter_jobs(&sample_jobs(), &filters("eng", "all", "all"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Engineer");

        let result = filter_jobs(&sample_jobs(), &filters("DESIGN", "", ""));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Designer");
    }

    #[test]
    fn test_whitespace_query_is_not_empty() {
        assert!(filter_jobs(&sample_jobs(), &filters(" ", "all", "all")).is_empty());
        assert!(filter_jobs(&sample_jobs(), &filters(" eng", "all", "all")).is_empty());

        let mut jobs = sample_jobs();
        jobs[0].title = "Senior Engineer".to_string();
        let result = filter_jobs(&jobs, &filters(" eng", "all", "all"));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let jobs = sample_jobs();
        assert_eq!(filter_jobs(&jobs, &filters("", "Remote", "all")).len(), 1);
        assert_eq!(filter_jobs(&jobs, &filters("", "all", "FULL_TIME")).len(), 1);
        assert!(filter_jobs(&jobs, &filters("eng", "Remote", "all")).is_empty());
        assert!(filter_jobs(&jobs, &filters("", "Austin", "CONTRACT")).is_empty());
    }

    #[test]
    fn test_status_filter() {
        let mut jobs = sample_jobs();
        jobs[1].status = JobStatus::Draft;
        let mut f = JobFilters::default();
        f.status = Some(JobStatus::Draft);
        let result = filter_jobs(&jobs, &f);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Designer");
    }

    #[test]
    fn test_order_featured_first_then_newest() {
        let mut jobs = vec![
            job("Old", "Austin", JobType::FullTime, false, 10),
            job("New", "Austin", JobType::FullTime, false, 1),
            job("Pinned", "Austin", JobType::FullTime, true, 30),
        ];
        order_jobs(&mut jobs);
        let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Pinned", "New", "Old"]);
    }

    #[test]
    fn test_facets_are_distinct_in_first_seen_order() {
        let mut jobs = sample_jobs();
        jobs.push(job("Writer", "Austin", JobType::FullTime, false, 3));
        let facets = Facets::from_jobs(&jobs);
        assert_eq!(facets.locations, vec!["Austin".to_string(), "Remote".to_string()]);
        assert_eq!(facets.job_types, vec![JobType::FullTime, JobType::Contract]);
    }

    #[test]
    fn test_job_posting_valid_through() {
        let company = profile();
        let now = Utc::now();
        let published = job("Engineer", "Austin", JobType::FullTime, false, 0);
        let posting = JobPosting::new(&published, &company, now);
        assert_eq!(
            posting.valid_through,
            published.published_at.unwrap() + Duration::days(60)
        );

        let mut draft = published.clone();
        draft.published_at = None;
        assert_eq!(JobPosting::new(&draft, &company, now).valid_through, now);

        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(value["@type"], "JobPosting");
        assert_eq!(value["hiringOrganization"]["sameAs"], "https://acme.example.com");
        assert_eq!(value["employmentType"], "FULL_TIME");
    }

    #[test]
    fn test_merge_without_draft_uses_committed_data() {
        let committed = profile();
        let sections = vec![section("a", 1), section("b", 2)];
        let (company, views, changed) = merge(&committed, &sections, None);
        assert_eq!(company, committed);
        assert_eq!(views.len(), 2);
        assert!(!changed);

        let (_, _, changed) = merge(&committed, &sections, Some(&DraftSnapshot::default()));
        assert!(!changed);
    }

    #[test]
    fn test_sections_draft_replaces_list() {
        let sections = vec![section("a", 1), section("b", 2)];
        let draft = DraftSnapshot {
            theme: None,
            sections: Some(vec![
                SectionDraft {
                    id: None,
                    title: "Perks".to_string(),
                    slug: None,
                    summary: Some("".to_string()),
                    content: "Snacks".to_string(),
                    sort_order: 5,
                },
                SectionDraft {
                    id: Some("b".to_string()),
                    title: "Renamed".to_string(),
                    slug: Some("b".to_string()),
                    summary: None,
                    content: "Body".to_string(),
                    sort_order: 0,
                },
            ]),
        };

        let committed = profile();
        let (company, views, changed) = merge(&committed, &sections, Some(&draft));
        assert!(changed);
        assert_eq!(company, committed);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].title, "Renamed");
        assert_eq!(views[1].id, "draft-0");
        assert_eq!(views[1].slug, "perks");
        assert_eq!(views[1].summary, None);
    }

    #[test]
    fn test_theme_draft_replaces_company_fields() {
        let draft = DraftSnapshot {
            theme: Some(ThemeSettings {
                headline: "Draft headline".to_string(),
                subheadline: Some(String::new()),
                mission: None,
                story: None,
                headquarters: None,
                website: None,
                size_range: None,
                industries: vec![],
                show_salary: true,
                theme: ThemeColors {
                    primary_color: "#000000".to_string(),
                    secondary_color: "#111111".to_string(),
                    accent_color: "#222222".to_string(),
                    background_color: "#333333".to_string(),
                    hero_background: None,
                    banner_image_url: None,
                    logo_url: None,
                    culture_video_url: None,
                    eyebrow: None,
                },
            }),
            sections: None,
        };
        let sections = vec![section("a", 1)];
        let (company, views, changed) = merge(&profile(), &sections, Some(&draft));
        assert!(changed);
        assert_eq!(company.company.headline, "Draft headline");
        assert_eq!(company.company.website, None);
        assert_eq!(company.theme.unwrap().primary_color, "#000000");
        assert_eq!(views[0].id, "a");
    }

    #[test]
    fn test_render_orders_filters_and_keeps_facets_unfiltered() {
        let committed = CommittedPage {
            profile: profile(),
            sections: vec![section("b", 2), section("a", 1)],
            jobs: vec![
                job("Designer", "Remote", JobType::Contract, false, 2),
                job("Engineer", "Austin", JobType::FullTime, true, 5),
            ],
        };

        let page = render(
            committed,
            None,
            filters("design", "all", "all"),
            ViewMode::Public,
        );
        assert_eq!(page.total_jobs, 2);
        assert_eq!(page.jobs.len(), 1);
        assert_eq!(page.jobs[0].title, "Designer");
        assert_eq!(page.facets.locations, vec!["Austin".to_string(), "Remote".to_string()]);
        assert_eq!(page.structured_data.len(), 2);
        assert!(!page.has_unsaved_changes);
    }
}
