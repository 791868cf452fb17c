use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::mood::MoodEntry;

/// Local synchronization state of a cached entry. Server responses always
/// deserialize as `Synced`; the other states exist only for optimistic
/// copies the page created itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    Synced,
    Pending,
    Failed,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::Synced
    }
}

/// A user-authored journal entry, optionally carrying the mood the analyzer
/// derived from it. The `id` is server-issued except while an optimistic
/// create is in flight, when it is a client-temporary v4 uuid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub mood: Option<MoodEntry>,
    #[serde(skip, default)]
    pub sync: SyncState,
}

impl JournalEntry {
    /// An optimistic placeholder for a create that has not round-tripped yet.
    pub fn pending(content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            content,
            created_at: now,
            updated_at: now,
            mood: None,
            sync: SyncState::Pending,
        }
    }

    /// List views show the first non-empty line of the content as the title.
    pub fn title(&self) -> &str {
        self.content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("Untitled entry")
    }

    /// Everything after the title line, with the separating blank lines
    /// stripped.
    pub fn body(&self) -> &str {
        let trimmed = self.content.trim_start();
        match trimmed.split_once('\n') {
            Some((_, rest)) => rest.trim_start_matches(|c| c == '\r' || c == '\n'),
            None => "",
        }
    }

    /// Mood label for list views, when the entry has been analyzed.
    pub fn mood_label(&self) -> Option<String> {
        self.mood.as_ref().map(MoodEntry::label)
    }

    pub fn is_analyzed(&self) -> bool {
        self.mood.is_some()
    }
}
