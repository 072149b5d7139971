//! Data models for the careers page builder.
//!
//! Field names serialize as camelCase to match the editor client.

/// Generates `as_str`/`parse` for a text-backed enum column.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

mod company;
mod draft;
mod job;
mod recruiter;
mod section;

pub use company::*;
pub use draft::*;
pub use job::*;
pub use recruiter::*;
pub use section::*;

use validator::ValidationError;

/// Clean-up applied to a request payload before it is validated.
pub trait Normalize: Sized {
    fn normalize(self) -> Self {
        self
    }
}

/// Trim an optional string, mapping blank values to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Lowercase URL-safe slug: alphanumerics kept, everything else collapsed to `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug followed by four random lowercase characters, e.g. `senior-engineer-3fa9`.
pub fn unique_slug(title: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let base = slugify(title);
    if base.is_empty() {
        suffix[..4].to_string()
    } else {
        format!("{}-{}", base, &suffix[..4])
    }
}

pub(crate) fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message =
            Some("Slug can only contain lowercase letters, numbers, and dashes".into());
        Err(err)
    }
}
