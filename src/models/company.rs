//! Company and theme models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_empty, Normalize};

/// A tenant: one company and its public careers page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub headline: String,
    pub subheadline: Option<String>,
    pub mission: Option<String>,
    pub story: Option<String>,
    pub headquarters: Option<String>,
    pub website: Option<String>,
    pub size_range: Option<String>,
    pub industries: Vec<String>,
    pub show_salary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Visual branding of a company's careers page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub company_id: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub hero_background: Option<String>,
    pub banner_image_url: Option<String>,
    pub logo_url: Option<String>,
    pub culture_video_url: Option<String>,
    pub eyebrow: Option<String>,
}

/// Company together with its (optional) theme.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(flatten)]
    pub company: Company,
    pub theme: Option<Theme>,
}

/// Editable company and theme fields.
///
/// Used both as the theme update payload and as the shape of a theme draft
/// snapshot, which is why nothing here is required beyond the headline and
/// the four colors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    #[validate(length(min = 6, max = 180, message = "Headline must be 6-180 characters"))]
    pub headline: String,
    #[serde(default)]
    pub subheadline: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL"))]
    pub website: Option<String>,
    #[serde(default)]
    pub size_range: Option<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default = "default_show_salary")]
    pub show_salary: bool,
    #[validate(nested)]
    pub theme: ThemeColors,
}

fn default_show_salary() -> bool {
    true
}

/// Theme part of [`ThemeSettings`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    #[validate(length(min = 4))]
    pub primary_color: String,
    #[validate(length(min = 4))]
    pub secondary_color: String,
    #[validate(length(min = 4))]
    pub accent_color: String,
    #[validate(length(min = 4))]
    pub background_color: String,
    #[serde(default)]
    pub hero_background: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL"))]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL"))]
    pub logo_url: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Enter a valid URL"))]
    pub culture_video_url: Option<String>,
    #[serde(default)]
    pub eyebrow: Option<String>,
}

impl Normalize for ThemeSettings {
    fn normalize(self) -> Self {
        Self {
            headline: self.headline.trim().to_string(),
            subheadline: non_empty(self.subheadline),
            mission: non_empty(self.mission),
            story: non_empty(self.story),
            headquarters: non_empty(self.headquarters),
            website: non_empty(self.website),
            size_range: non_empty(self.size_range),
            industries: self
                .industries
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            show_salary: self.show_salary,
            theme: ThemeColors {
                primary_color: self.theme.primary_color,
                secondary_color: self.theme.secondary_color,
                accent_color: self.theme.accent_color,
                background_color: self.theme.background_color,
                hero_background: non_empty(self.theme.hero_background),
                banner_image_url: non_empty(self.theme.banner_image_url),
                logo_url: non_empty(self.theme.logo_url),
                culture_video_url: non_empty(self.theme.culture_video_url),
                eyebrow: non_empty(self.theme.eyebrow),
            },
        }
    }
}

impl ThemeSettings {
    /// Overlay these settings onto a committed profile.
    ///
    /// Every editable field is replaced; identity fields (`id`, `slug`, `name`,
    /// timestamps) are kept from the committed company.
    pub fn apply_to(&self, profile: &CompanyProfile) -> CompanyProfile {
        let settings = self.clone().normalize();
        let company = Company {
            headline: settings.headline,
            subheadline: settings.subheadline,
            mission: settings.mission,
            story: settings.story,
            headquarters: settings.headquarters,
            website: settings.website,
            size_range: settings.size_range,
            industries: settings.industries,
            show_salary: settings.show_salary,
            ..profile.company.clone()
        };
        let theme = Theme {
            id: profile
                .theme
                .as_ref()
                .map(|t| t.id.clone())
                .unwrap_or_default(),
            company_id: profile.company.id.clone(),
            primary_color: settings.theme.primary_color,
            secondary_color: settings.theme.secondary_color,
            accent_color: settings.theme.accent_color,
            background_color: settings.theme.background_color,
            hero_background: settings.theme.hero_background,
            banner_image_url: settings.theme.banner_image_url,
            logo_url: settings.theme.logo_url,
            culture_video_url: settings.theme.culture_video_url,
            eyebrow: settings.theme.eyebrow,
        };
        CompanyProfile {
            company,
            theme: Some(theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn settings(website: &str) -> ThemeSettings {
        ThemeSettings {
            headline: "  Build the future with us ".to_string(),
            subheadline: Some("   ".to_string()),
            mission: None,
            story: Some("We ship.".to_string()),
            headquarters: None,
            website: Some(website.to_string()),
            size_range: None,
            industries: vec!["Climate".to_string(), " ".to_string()],
            show_salary: false,
            theme: ThemeColors {
                primary_color: "#0f172a".to_string(),
                secondary_color: "#10b981".to_string(),
                accent_color: "#fbbf24".to_string(),
                background_color: "#f0fdfa".to_string(),
                hero_background: Some(String::new()),
                banner_image_url: Some("".to_string()),
                logo_url: None,
                culture_video_url: None,
                eyebrow: Some("Careers".to_string()),
            },
        }
    }

    #[test]
    fn test_normalize_turns_blank_strings_into_none() {
        let normalized = settings("").normalize();
        assert_eq!(normalized.headline, "Build the future with us");
        assert_eq!(normalized.subheadline, None);
        assert_eq!(normalized.website, None);
        assert_eq!(normalized.theme.hero_background, None);
        assert_eq!(normalized.theme.banner_image_url, None);
        assert_eq!(normalized.industries, vec!["Climate".to_string()]);
        assert!(normalized.validate().is_ok());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let normalized = settings("not a url").normalize();
        assert!(normalized.validate().is_err());
    }

    #[test]
    fn test_apply_to_keeps_identity_fields() {
        let now = Utc::now();
        let profile = CompanyProfile {
            company: Company {
                id: "c1".to_string(),
                slug: "acme".to_string(),
                name: "Acme".to_string(),
                headline: "Old headline".to_string(),
                subheadline: Some("Old sub".to_string()),
                mission: None,
                story: None,
                headquarters: None,
                website: None,
                size_range: None,
                industries: vec![],
                show_salary: true,
                created_at: now,
                updated_at: now,
            },
            theme: None,
        };

        let merged = settings("https://acme.example.com").apply_to(&profile);
        assert_eq!(merged.company.id, "c1");
        assert_eq!(merged.company.slug, "acme");
        assert_eq!(merged.company.headline, "Build the future with us");
        assert_eq!(merged.company.subheadline, None);
        assert!(!merged.company.show_salary);
        let theme = merged.theme.unwrap();
        assert_eq!(theme.company_id, "c1");
        assert_eq!(theme.primary_color, "#0f172a");
    }
}
