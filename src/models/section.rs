//! Careers page section model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_empty, slugify, validate_slug, Normalize};

/// A content block on a company's careers page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub company_id: String,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Default `sortOrder` for sections created without one.
pub const DEFAULT_SORT_ORDER: i64 = 100;

/// Request body for creating a section.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    #[validate(length(min = 3))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub content: String,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl Normalize for CreateSectionRequest {
    fn normalize(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            slug: non_empty(self.slug),
            summary: non_empty(self.summary),
            ..self
        }
    }
}

/// Request body for a partial section update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    #[serde(default)]
    #[validate(length(min = 3))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl Normalize for UpdateSectionRequest {
    fn normalize(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            slug: non_empty(self.slug),
            // Kept as `Some("")` so an update can clear the summary.
            summary: self.summary.map(|s| s.trim().to_string()),
            ..self
        }
    }
}

/// An unsaved section as held in a sections draft.
///
/// Sections added in the editor have no id yet, so most fields are lenient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sort_order: i64,
}

/// Section as shown on a rendered careers page.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub sort_order: i64,
}

impl From<&Section> for SectionView {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            slug: section.slug.clone(),
            summary: section.summary.clone(),
            content: section.content.clone(),
            sort_order: section.sort_order,
        }
    }
}

impl SectionDraft {
    /// Render a draft section; `position` names sections that have no id yet.
    pub fn to_view(&self, position: usize) -> SectionView {
        SectionView {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| format!("draft-{}", position)),
            title: self.title.clone(),
            slug: self
                .slug
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| slugify(&self.title)),
            summary: non_empty(self.summary.clone()),
            content: self.content.clone(),
            sort_order: self.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_without_id_gets_positional_id_and_slug() {
        let draft: SectionDraft =
            serde_json::from_str(r#"{"title":"Life at Acme","sortOrder":20}"#).unwrap();
        let view = draft.to_view(3);
        assert_eq!(view.id, "draft-3");
        assert_eq!(view.slug, "life-at-acme");
        assert_eq!(view.sort_order, 20);
        assert_eq!(view.content, "");
    }

    #[test]
    fn test_create_request_rejects_bad_slug() {
        let request = CreateSectionRequest {
            title: "About us".to_string(),
            slug: Some("About Us!".to_string()),
            summary: None,
            content: "Hello".to_string(),
            sort_order: None,
        }
        .normalize();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_trims_summary() {
        let request = UpdateSectionRequest {
            title: None,
            slug: Some("  ".to_string()),
            summary: Some("  Perks and more \n".to_string()),
            content: None,
            sort_order: None,
        }
        .normalize();
        assert_eq!(request.summary.as_deref(), Some("Perks and more"));
        assert_eq!(request.slug, None);

        let blank = UpdateSectionRequest {
            summary: Some("   ".to_string()),
            ..request
        }
        .normalize();
        assert_eq!(blank.summary.as_deref(), Some(""));
    }
}
