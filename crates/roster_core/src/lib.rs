//! Roster core: pure user-list state machine, view-model helpers and the
//! notification channel.
mod effect;
mod form;
mod msg;
mod notification;
mod state;
mod update;
mod user;
mod view_model;

pub use effect::Effect;
pub use form::{FormState, FormValidation};
pub use msg::Msg;
pub use notification::{Notification, NotificationChannel, Severity, SubscriptionId};
pub use state::AppState;
pub use update::{
    update, MSG_REMOVE_FAILED, MSG_USERS_LOADED, MSG_USERS_REMOVED, MSG_USER_UPDATED,
};
pub use user::{NewUser, User, UserId};
pub use view_model::{AppViewModel, FormMode, UserRowView};
