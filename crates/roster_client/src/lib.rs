//! Roster client: REST directory access and effect execution for the user list.
mod controller;
mod directory;
mod types;

pub use controller::UserListController;
pub use directory::{DirectorySettings, ReqwestDirectory, UserDirectory, DEFAULT_BASE_URL};
pub use types::{DirectoryError, FailureKind};
