use reqwest::Method;
use uuid::Uuid;
use validator::Validate;

use crate::api::ApiClient;
use crate::dto::{CreateJournalRequest, DeleteResponse, UpdateJournalRequest};
use crate::error::ClientResult;
use crate::models::journal::JournalEntry;

impl ApiClient {
    pub async fn list_journal(&self) -> ClientResult<Vec<JournalEntry>> {
        let request = self.authed(Method::GET, "/journal").await?;
        self.execute(request).await
    }

    pub async fn create_journal(&self, request: &CreateJournalRequest) -> ClientResult<JournalEntry> {
        request.validate()?;
        let builder = self.authed(Method::POST, "/journal").await?;
        self.execute(builder.json(request)).await
    }

    pub async fn update_journal(
        &self,
        id: Uuid,
        request: &UpdateJournalRequest,
    ) -> ClientResult<JournalEntry> {
        request.validate()?;
        let builder = self
            .authed(Method::PATCH, &format!("/journal/{}", id))
            .await?;
        self.execute(builder.json(request)).await
    }

    pub async fn delete_journal(&self, id: Uuid) -> ClientResult<DeleteResponse> {
        let request = self
            .authed(Method::DELETE, &format!("/journal/{}", id))
            .await?;
        self.execute(request).await
    }

    /// One round trip that both persists the entry and runs mood analysis on
    /// it; the response carries the attached `MoodEntry`.
    pub async fn analyze_and_save(
        &self,
        request: &CreateJournalRequest,
    ) -> ClientResult<JournalEntry> {
        request.validate()?;
        let builder = self.authed(Method::POST, "/journal/analyze-and-save").await?;
        self.execute(builder.json(request)).await
    }
}
