pub mod balloon;
pub mod recorded;
pub mod recorded_client;
pub mod recorded_menu;
pub mod snackbar;
pub mod state_delete_dialog;
pub mod view_model;


pub use balloon::{Balloon, BalloonState};
pub use recorded::{EncodedId, EncodedVariant, RecordedId, RecordedItem, RuleId};
pub use recorded_client::{ApiError, HttpRecordedApi, RecordedApi};
pub use recorded_menu::{DeleteAllResult, DeleteOutcome, RecordedMenu, DELETE_ID, MENU_ID};
pub use snackbar::{Snackbar, SnackbarQueue};
pub use state_delete_dialog::{DeleteFile, DeleteTarget};
pub use view_model::ViewModel;
