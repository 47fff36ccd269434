//! The generic CRUD page controller.
//!
//! One [`CrudPage`] drives every management screen: it owns the table
//! state, the current list query, the open form (if any), and the notice
//! queue, and talks to the backend through the API client. The per-entity
//! screens are this controller plus an [`EntityDef`](crate::entities::EntityDef)
//! from the registry.

use std::sync::Arc;

use tracing::{debug, warn};

use campus_erp_client::{ApiClient, ClientError};
use campus_erp_core::settings;
use campus_erp_forms::{build_submission, FormState, SubmitAbort};

use crate::entities::EntityDef;
use crate::notices::Notices;
use crate::table::{ListQuery, TableState};

/// Where the page is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Showing the table; nothing in flight.
    Idle,
    /// A list or detail fetch is in flight.
    Loading,
    /// The create/edit form is open.
    FormOpen,
    /// A submission is in flight; further submits are ignored.
    Submitting,
}

/// One entity's management screen.
pub struct CrudPage {
    entity: EntityDef,
    client: Arc<ApiClient>,
    table: TableState,
    query: ListQuery,
    form: Option<FormState>,
    state: PageState,
    notices: Notices,
    fetch_seq: u64,
}

impl CrudPage {
    /// Creates the page for one registered entity.
    pub fn for_entity(entity: EntityDef, client: Arc<ApiClient>) -> Self {
        let page_size = settings::settings().default_page_size;
        Self {
            entity,
            client,
            table: TableState::new(page_size),
            query: ListQuery::new(page_size),
            form: None,
            state: PageState::Idle,
            notices: Notices::new(),
            fetch_seq: 0,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// The entity this page manages.
    pub fn entity(&self) -> &EntityDef {
        &self.entity
    }

    /// Current table state.
    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Current list query.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// The open form, if any.
    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// Mutable access to the open form, for value edits.
    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        self.form.as_mut()
    }

    /// Lifecycle state.
    pub const fn state(&self) -> PageState {
        self.state
    }

    /// Takes the queued notices.
    pub fn drain_notices(&mut self) -> Vec<crate::notices::Notice> {
        self.notices.drain()
    }

    // ── List ───────────────────────────────────────────────────────────

    /// Fetches the current page of records.
    ///
    /// On failure the previous rows stay on screen and an error notice is
    /// queued. A fetch that was superseded by a newer one is discarded.
    pub async fn refresh(&mut self) {
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        self.table.loading = true;
        self.state = PageState::Loading;

        let result = self
            .client
            .list(&self.entity.base_path, &self.query.to_body())
            .await;

        if seq != self.fetch_seq {
            debug!(entity = %self.entity.label, "dropping stale list response");
            return;
        }
        self.table.loading = false;
        self.state = PageState::Idle;

        match result {
            Ok(page) => {
                self.table.rows = page.data;
                self.table.pagination.current = self.query.page;
                self.table.pagination.page_size = self.query.page_size;
                self.table.pagination.total = page.count;
            }
            Err(err) => {
                warn!(entity = %self.entity.label, %err, "list fetch failed");
                self.notices
                    .error(format!("Failed to load {}: {err}", self.entity.label));
            }
        }
    }

    /// Applies a free-text search and reloads from page 1.
    pub async fn search(&mut self, text: impl Into<String>) {
        self.query.search_text = Some(text.into());
        self.query.page = 1;
        self.refresh().await;
    }

    /// Sets one entity filter and reloads from page 1.
    pub async fn set_filter(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.query.filters.insert(key.into(), value);
        self.query.page = 1;
        self.refresh().await;
    }

    /// Moves to another page (and page size) and reloads.
    pub async fn change_page(&mut self, page: u64, page_size: usize) {
        self.query.page = page.max(1);
        if page_size > 0 {
            self.query.page_size = page_size;
        }
        self.refresh().await;
    }

    // ── Form ───────────────────────────────────────────────────────────

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.form = Some(FormState::open_create(self.entity.fields.clone()));
        self.state = PageState::FormOpen;
    }

    /// Fetches a record and opens the edit form prefilled with it.
    pub async fn open_edit(&mut self, id: &str) {
        self.state = PageState::Loading;
        match self.client.detail(&self.entity.base_path, id).await {
            Ok(record) => {
                self.form = Some(FormState::open_edit(self.entity.fields.clone(), record));
                self.state = PageState::FormOpen;
            }
            Err(err) => {
                warn!(entity = %self.entity.label, id, %err, "detail fetch failed");
                self.notices
                    .error(format!("Failed to load {}: {err}", self.entity.label));
                self.state = PageState::Idle;
            }
        }
    }

    /// Closes the form without saving.
    pub fn close_form(&mut self) {
        self.form = None;
        self.state = PageState::Idle;
    }

    /// Submits the open form.
    ///
    /// Local validation failures and backend field errors land on the form
    /// and keep it open. Success closes the form, queues a success notice,
    /// and reloads the list. A submit while one is already in flight is
    /// ignored.
    pub async fn submit(&mut self) {
        if self.state == PageState::Submitting {
            debug!(entity = %self.entity.label, "duplicate submit ignored");
            return;
        }
        let Some(form) = &self.form else {
            return;
        };

        let submission = match build_submission(form) {
            Ok(submission) => submission,
            Err(SubmitAbort::Validation(errors)) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_errors(errors);
                }
                self.notices.error("Please fix the highlighted fields");
                return;
            }
            Err(SubmitAbort::NoChanges) => {
                self.notices.info("No changes to save");
                return;
            }
        };

        self.state = PageState::Submitting;
        let result = self.client.submit(&self.entity.base_path, &submission).await;
        match result {
            Ok(_) => {
                self.form = None;
                self.state = PageState::Idle;
                self.notices
                    .success(format!("{} saved", self.entity.label));
                self.refresh().await;
            }
            Err(ClientError::Validation { field_errors }) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_errors(field_errors);
                }
                self.state = PageState::FormOpen;
                self.notices.error("Please fix the highlighted fields");
            }
            Err(err) => {
                warn!(entity = %self.entity.label, %err, "submission failed");
                self.state = PageState::FormOpen;
                self.notices
                    .error(format!("Failed to save {}: {err}", self.entity.label));
            }
        }
    }

    // ── Row actions ────────────────────────────────────────────────────

    /// Flips a record's active flag, then reloads the list.
    pub async fn toggle_active(&mut self, id: &str, is_active: bool) {
        match self
            .client
            .toggle_active(&self.entity.base_path, id, is_active)
            .await
        {
            Ok(_) => {
                self.notices
                    .success(format!("{} updated", self.entity.label));
                self.refresh().await;
            }
            Err(err) => {
                warn!(entity = %self.entity.label, id, %err, "status toggle failed");
                self.notices
                    .error(format!("Failed to update {}: {err}", self.entity.label));
            }
        }
    }
}
