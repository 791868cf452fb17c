//! Page-scoped journal state: a cached entry list that mutates optimistically
//! and reconciles against the backend.

use uuid::Uuid;
use validator::Validate;

use crate::api::ApiClient;
use crate::dto::{CreateJournalRequest, UpdateJournalRequest};
use crate::error::{ClientError, ClientResult};
use crate::models::journal::{JournalEntry, SyncState};

pub struct JournalStore {
    api: ApiClient,
    entries: Vec<JournalEntry>,
}

impl JournalStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            entries: Vec::new(),
        }
    }

    /// Current page state, newest first, optimistic entries ahead of synced
    /// ones.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Refetch the list. Server data wins for synced entries; optimistic
    /// entries that have not resolved yet are kept ahead of the server list
    /// so a refetch never silently drops an in-flight create.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let fetched = self.api.list_journal().await?;
        self.entries.retain(|e| e.sync != SyncState::Synced);
        self.entries.extend(fetched);
        Ok(())
    }

    /// The entry form submits a title and body; they travel as one composed
    /// content blob.
    pub async fn create(&mut self, title: &str, body: &str) -> ClientResult<&JournalEntry> {
        let request = CreateJournalRequest::from_form(title, body);
        request.validate()?;
        self.submit_create(request, false).await
    }

    /// Create through the analyzer, attaching a `MoodEntry` to the saved
    /// entry.
    pub async fn create_analyzed(&mut self, title: &str, body: &str) -> ClientResult<&JournalEntry> {
        let request = CreateJournalRequest::from_form(title, body);
        request.validate()?;
        self.submit_create(request, true).await
    }

    async fn submit_create(
        &mut self,
        request: CreateJournalRequest,
        analyze: bool,
    ) -> ClientResult<&JournalEntry> {
        let placeholder = JournalEntry::pending(request.content.clone());
        let temp_id = placeholder.id;
        self.entries.insert(0, placeholder);

        let result = if analyze {
            self.api.analyze_and_save(&request).await
        } else {
            self.api.create_journal(&request).await
        };

        // The placeholder cannot move while the request is in flight: the
        // store is `&mut self` for the whole await.
        match result {
            Ok(saved) => match self.position(temp_id) {
                Some(idx) => {
                    self.entries[idx] = saved;
                    Ok(&self.entries[idx])
                }
                None => {
                    self.entries.insert(0, saved);
                    Ok(&self.entries[0])
                }
            },
            Err(e) => {
                if let Some(idx) = self.position(temp_id) {
                    self.entries[idx].sync = SyncState::Failed;
                }
                Err(e)
            }
        }
    }

    /// Optimistic in-place edit; the previous copy is restored when the
    /// PATCH fails.
    pub async fn update(&mut self, id: Uuid, content: &str) -> ClientResult<&JournalEntry> {
        let request = UpdateJournalRequest {
            content: content.to_string(),
        };
        request.validate()?;

        let idx = self
            .position(id)
            .ok_or_else(|| ClientError::NotFound("Entry not found".into()))?;
        let previous = self.entries[idx].clone();

        let entry = &mut self.entries[idx];
        entry.content = request.content.clone();
        entry.updated_at = chrono::Utc::now();
        entry.sync = SyncState::Pending;

        match self.api.update_journal(id, &request).await {
            Ok(saved) => {
                self.entries[idx] = saved;
                Ok(&self.entries[idx])
            }
            Err(e) => {
                self.entries[idx] = previous;
                Err(e)
            }
        }
    }

    /// Remove the entry from the page immediately — one DELETE, no refetch.
    /// The entry is restored in place when the server refuses.
    pub async fn delete(&mut self, id: Uuid) -> ClientResult<()> {
        let idx = self
            .position(id)
            .ok_or_else(|| ClientError::NotFound("Entry not found".into()))?;
        let removed = self.entries.remove(idx);

        // An entry the server never accepted has nothing to delete remotely.
        if removed.sync != SyncState::Synced {
            return Ok(());
        }

        match self.api.delete_journal(id).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.entries.insert(idx, removed);
                Err(e)
            }
        }
    }
}
