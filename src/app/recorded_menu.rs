use crate::app::balloon::Balloon;
use crate::app::recorded::{RecordedItem, RuleId};
use crate::app::recorded_client::{ApiError, RecordedApi};
use crate::app::snackbar::Snackbar;
use crate::app::state_delete_dialog::{DeleteDialogState, DeleteFile};
use crate::app::view_model::ViewModel;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub const MENU_ID: &str = "recorded-menu";
pub const DELETE_ID: &str = "recorded-delete";

/// Time given to a closing panel before the delete panel opens.
pub const DELETE_DIALOG_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAllResult {
    Deleted,
    StreamingInProgress,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No recorded item was set.
    Skipped,
    All(DeleteAllResult),
    Partial { deleted: usize, failed: usize },
}

/// Menu for a single recorded item: remembers which files the user wants
/// gone and carries out the deletion.
pub struct RecordedMenu<B, A, S> {
    balloon: Arc<B>,
    api: Arc<A>,
    snackbar: Arc<S>,
    recorded: Option<RecordedItem>,
    delete_dialog: DeleteDialogState,
    dialog_delay: Duration,
    pending_open: Option<JoinHandle<()>>,
}

impl<B, A, S> RecordedMenu<B, A, S>
where
    B: Balloon + 'static,
    A: RecordedApi,
    S: Snackbar,
{
    pub fn new(balloon: Arc<B>, api: Arc<A>, snackbar: Arc<S>) -> Self {
        Self {
            balloon,
            api,
            snackbar,
            recorded: None,
            delete_dialog: DeleteDialogState::default(),
            dialog_delay: DELETE_DIALOG_DELAY,
            pending_open: None,
        }
    }

    pub fn with_dialog_delay(mut self, delay: Duration) -> Self {
        self.dialog_delay = delay;
        self
    }

    /// Targets `recorded` and rebuilds the file list, discarding earlier toggles.
    pub fn set(&mut self, recorded: RecordedItem) {
        self.delete_dialog.rebuild(&recorded);
        self.recorded = Some(recorded);
    }

    pub fn title(&self) -> &str {
        self.recorded.as_ref().map_or("", |r| r.name.as_str())
    }

    pub fn rule_id(&self) -> Option<RuleId> {
        self.recorded.as_ref().and_then(|r| r.rule_id)
    }

    pub fn files(&self) -> &[DeleteFile] {
        self.delete_dialog.files()
    }

    pub fn set_checked(&mut self, index: usize, checked: bool) -> bool {
        self.delete_dialog.set_checked(index, checked)
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        self.delete_dialog.toggle(index)
    }

    pub fn uncheck_by_name(&mut self, name: &str) -> bool {
        self.delete_dialog.uncheck_by_name(name)
    }

    pub fn checked_count(&self) -> usize {
        self.delete_dialog.checked_count()
    }

    /// Closes whatever panel is showing and opens the delete panel once the
    /// dialog delay has passed. Without a tokio runtime there is no timer to
    /// run on, so the panel opens right away.
    pub fn open_delete_dialog(&mut self) {
        self.close_dialog();
        self.cancel_pending_open();

        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime, opening delete dialog without delay");
            self.balloon.open(DELETE_ID);
            return;
        };

        let balloon = Arc::clone(&self.balloon);
        let delay = self.dialog_delay;
        debug!(?delay, "scheduling delete dialog");
        self.pending_open = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            balloon.open(DELETE_ID);
        }));
    }

    /// Waits for a scheduled delete dialog to open. Returns `false` when
    /// nothing was pending or the open was cancelled.
    pub async fn wait_delete_dialog(&mut self) -> bool {
        match self.pending_open.take() {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }

    pub fn close_dialog(&self) {
        self.balloon.close();
    }

    /// Deletes the checked files of the current item, then refreshes the
    /// recorded list and the tag index.
    ///
    /// Delete failures are reported through the snackbar and never returned;
    /// only a failing refresh yields `Err`.
    pub async fn delete(&mut self) -> Result<DeleteOutcome, ApiError> {
        let Some(recorded) = self.recorded.as_ref() else {
            return Ok(DeleteOutcome::Skipped);
        };

        let outcome = if self.delete_dialog.is_delete_all() {
            DeleteOutcome::All(self.delete_all(recorded).await)
        } else {
            self.delete_checked(recorded).await
        };

        self.api.refresh_list().await?;
        self.api.refresh_tags().await?;
        Ok(outcome)
    }

    async fn delete_all(&self, recorded: &RecordedItem) -> DeleteAllResult {
        match self.api.delete_all(recorded.id).await {
            Ok(()) => {
                info!(id = %recorded.id, "deleted recorded item");
                self.snackbar.show(format!("Deleted: {}", recorded.name));
                DeleteAllResult::Deleted
            }
            Err(ApiError::StreamingInProgress) => {
                warn!(id = %recorded.id, "recorded item is being streamed, not deleted");
                self.snackbar
                    .show(format!("Delete failed (in use): {}", recorded.name));
                DeleteAllResult::StreamingInProgress
            }
            Err(e) => {
                error!(id = %recorded.id, error = %e, "failed to delete recorded item");
                self.snackbar.show(format!("Delete failed: {}", recorded.name));
                DeleteAllResult::Failed
            }
        }
    }

    async fn delete_checked(&self, recorded: &RecordedItem) -> DeleteOutcome {
        let mut deleted = 0;
        let mut failed = 0;

        // Each request is awaited before the next is sent; the server must
        // never see two deletes for the same item at once.
        for file in self.delete_dialog.checked_files() {
            match self.api.delete_file(recorded.id, file.target).await {
                Ok(()) => {
                    info!(id = %recorded.id, target = %file.target, "deleted file");
                    deleted += 1;
                }
                Err(e) => {
                    error!(id = %recorded.id, target = %file.target, error = %e, "failed to delete file");
                    failed += 1;
                    let message = match e {
                        ApiError::FileLocked => format!("File is locked: {}", file.name),
                        _ => format!("Failed to delete file: {}", file.name),
                    };
                    self.snackbar.show(message);
                }
            }
        }

        if deleted > 0 {
            self.snackbar
                .show(format!("Deleted selected files: {}", recorded.name));
        }
        DeleteOutcome::Partial { deleted, failed }
    }
}

impl<B, A, S> RecordedMenu<B, A, S> {
    fn cancel_pending_open(&mut self) {
        if let Some(handle) = self.pending_open.take() {
            handle.abort();
        }
    }
}

impl<B, A, S> ViewModel for RecordedMenu<B, A, S> {
    fn on_deactivate(&mut self) {
        self.cancel_pending_open();
    }
}

impl<B, A, S> Drop for RecordedMenu<B, A, S> {
    fn drop(&mut self) {
        self.cancel_pending_open();
    }
}
