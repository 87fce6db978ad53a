use crate::{NewUser, Notification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the whole collection; answered with `Msg::UsersLoaded`.
    LoadUsers,
    /// Create a record; answered with `Msg::UserCreated`.
    CreateUser(NewUser),
    Notify(Notification),
    ClearNotification,
}
