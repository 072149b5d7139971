//! Process-local staging of unsaved editor state.
//!
//! Each company slug holds at most one theme snapshot and one sections
//! snapshot. Entries are kept exactly as the client sent them. [`DraftStore::read`]
//! hands them back untouched, while [`DraftStore::snapshot`] decodes them for
//! the preview and drops whatever does not fit the editor shapes.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::models::{DraftSnapshot, SectionDraft, StagedDraft, ThemeSettings};

/// Which part of the editor state a staged entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftKind {
    Theme,
    Sections,
}

impl DraftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftKind::Theme => "theme-snapshot",
            DraftKind::Sections => "sections-snapshot",
        }
    }
}

/// In-memory draft store keyed by `(kind, company slug)`.
#[derive(Default)]
pub struct DraftStore {
    entries: RwLock<HashMap<(DraftKind, String), String>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage raw payloads for a slug. Kinds passed as `None` keep their
    /// current value.
    pub async fn write(&self, slug: &str, theme: Option<String>, sections: Option<String>) {
        let mut entries = self.entries.write().await;
        if let Some(raw) = theme {
            entries.insert((DraftKind::Theme, slug.to_string()), raw);
        }
        if let Some(raw) = sections {
            entries.insert((DraftKind::Sections, slug.to_string()), raw);
        }
        tracing::debug!(slug = %slug, "Draft staged");
    }

    /// Read back what was staged, or `None` when nothing is staged.
    ///
    /// Only entries that are not JSON at all are dropped.
    pub async fn read(&self, slug: &str) -> Option<StagedDraft> {
        let entries = self.entries.read().await;
        let staged = StagedDraft {
            theme: decode::<Value>(&entries, DraftKind::Theme, slug),
            sections: decode::<Value>(&entries, DraftKind::Sections, slug),
        };
        (!staged.is_empty()).then_some(staged)
    }

    /// Decode the staged entries for rendering, or `None` when no kind fits.
    pub async fn snapshot(&self, slug: &str) -> Option<DraftSnapshot> {
        let entries = self.entries.read().await;
        let snapshot = DraftSnapshot {
            theme: decode::<ThemeSettings>(&entries, DraftKind::Theme, slug),
            sections: decode::<Vec<SectionDraft>>(&entries, DraftKind::Sections, slug),
        };
        (!snapshot.is_empty()).then_some(snapshot)
    }

    /// Drop both kinds for a slug.
    pub async fn clear(&self, slug: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(&(DraftKind::Theme, slug.to_string()));
        entries.remove(&(DraftKind::Sections, slug.to_string()));
        tracing::debug!(slug = %slug, "Draft cleared");
    }
}

fn decode<T: DeserializeOwned>(
    entries: &HashMap<(DraftKind, String), String>,
    kind: DraftKind,
    slug: &str,
) -> Option<T> {
    let raw = entries.get(&(kind, slug.to_string()))?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                slug = %slug,
                kind = kind.as_str(),
                "Ignoring malformed draft: {}",
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const THEME: &str = r##"{
        "headline": "Build rockets with us",
        "subheadline": "",
        "industries": ["Aerospace"],
        "theme": {
            "primaryColor": "#111111",
            "secondaryColor": "#222222",
            "accentColor": "#333333",
            "backgroundColor": "#444444"
        }
    }"##;

    const SECTIONS: &str = r#"[{"id":"s1","title":"Benefits","content":"Health","sortOrder":2}]"#;

    #[tokio::test]
    async fn test_write_then_snapshot_decodes_both_kinds() {
        let store = DraftStore::new();
        store
            .write("acme", Some(THEME.to_string()), Some(SECTIONS.to_string()))
            .await;

        let snapshot = store.snapshot("acme").await.unwrap();
        let theme = snapshot.theme.unwrap();
        assert_eq!(theme.headline, "Build rockets with us");
        assert!(theme.show_salary);
        let sections = snapshot.sections.unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Benefits");
    }

    #[tokio::test]
    async fn test_read_returns_exactly_what_was_written() {
        let sections = json!([{
            "id": "s1",
            "companyId": "c1",
            "title": "Perks",
            "content": "Lunch",
            "sortOrder": 0,
            "collapsed": true
        }]);
        let store = DraftStore::new();
        store.write("acme", None, Some(sections.to_string())).await;

        let staged = store.read("acme").await.unwrap();
        assert_eq!(staged.sections, Some(sections));
        assert_eq!(staged.theme, None);
    }

    #[tokio::test]
    async fn test_partial_theme_is_readable_but_not_rendered() {
        let store = DraftStore::new();
        store
            .write("acme", Some(r#"{"headline":"Hello there"}"#.to_string()), None)
            .await;

        let staged = store.read("acme").await.unwrap();
        assert_eq!(staged.theme, Some(json!({"headline": "Hello there"})));
        assert!(store.snapshot("acme").await.is_none());
    }

    #[tokio::test]
    async fn test_never_written_is_absent() {
        let store = DraftStore::new();
        assert!(store.read("acme").await.is_none());
        assert!(store.snapshot("acme").await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_both_kinds() {
        let store = DraftStore::new();
        store
            .write("acme", Some(THEME.to_string()), Some(SECTIONS.to_string()))
            .await;
        store.clear("acme").await;
        assert!(store.read("acme").await.is_none());
        assert!(store.snapshot("acme").await.is_none());
    }

    #[tokio::test]
    async fn test_partial_write_keeps_other_kind() {
        let store = DraftStore::new();
        store.write("acme", Some(THEME.to_string()), None).await;
        store.write("acme", None, Some(SECTIONS.to_string())).await;

        let staged = store.read("acme").await.unwrap();
        assert!(staged.theme.is_some());
        assert!(staged.sections.is_some());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = DraftStore::new();
        store.write("acme", None, Some(SECTIONS.to_string())).await;
        store.write("acme", None, Some("[]".to_string())).await;

        let staged = store.read("acme").await.unwrap();
        assert_eq!(staged.sections, Some(json!([])));
        let snapshot = store.snapshot("acme").await.unwrap();
        assert_eq!(snapshot.sections, Some(vec![]));
    }

    #[tokio::test]
    async fn test_malformed_entry_is_treated_as_absent() {
        let store = DraftStore::new();
        store
            .write("acme", Some("{not json".to_string()), Some(SECTIONS.to_string()))
            .await;

        let staged = store.read("acme").await.unwrap();
        assert!(staged.theme.is_none());
        assert!(staged.sections.is_some());

        store.write("globex", Some("{not json".to_string()), None).await;
        assert!(store.read("globex").await.is_none());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_skipped_per_kind_when_rendering() {
        let store = DraftStore::new();
        store
            .write("acme", Some("42".to_string()), Some(SECTIONS.to_string()))
            .await;

        let staged = store.read("acme").await.unwrap();
        assert_eq!(staged.theme, Some(json!(42)));

        let snapshot = store.snapshot("acme").await.unwrap();
        assert!(snapshot.theme.is_none());
        assert_eq!(snapshot.sections.map(|s| s.len()), Some(1));
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let store = DraftStore::new();
        store.write("acme", Some(THEME.to_string()), None).await;
        assert!(store.read("globex").await.is_none());

        store.clear("globex").await;
        assert!(store.read("acme").await.is_some());
    }
}
