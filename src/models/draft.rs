//! Draft snapshot model: unsaved editor state for one company.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{Normalize, SectionDraft, ThemeSettings};

/// Staged editor state exactly as the client wrote it.
///
/// This is what `GET`/`PUT /draft` return. Nothing here is checked against
/// the editor shapes; that happens in [`DraftSnapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StagedDraft {
    pub theme: Option<Value>,
    pub sections: Option<Value>,
}

impl StagedDraft {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.sections.is_none()
    }
}

/// Uncommitted theme fields and section list for a company, decoded for
/// rendering.
///
/// Either part may be absent; absent parts fall back to committed data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub theme: Option<ThemeSettings>,
    pub sections: Option<Vec<SectionDraft>>,
}

impl DraftSnapshot {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.sections.is_none()
    }
}

/// Request body for `PUT /api/companies/{slug}/draft`.
///
/// Values are staged as sent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WriteDraftRequest {
    #[serde(default)]
    pub theme: Option<Value>,
    #[serde(default)]
    pub sections: Option<Value>,
}

impl Normalize for WriteDraftRequest {}
