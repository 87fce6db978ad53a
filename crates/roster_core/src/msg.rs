use crate::{User, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The user list view became active.
    Activated,
    /// User edited the name field.
    NameChanged(String),
    /// User edited the email field.
    EmailChanged(String),
    /// User submitted the form.
    FormSubmitted,
    /// User picked a record to edit.
    EditRequested(User),
    /// User abandoned the current edit.
    EditCancelled,
    /// User asked to remove a record. `None` when the row had no id.
    DeleteRequested(Option<UserId>),
    /// Directory answered a list request. Errors carry the failure text.
    UsersLoaded(Result<Vec<User>, String>),
    /// Directory answered a create request.
    UserCreated(Result<User, String>),
    /// User dismissed the visible toast.
    NotificationDismissed,
}
