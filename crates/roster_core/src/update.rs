use crate::{AppState, Effect, Msg, Notification};

pub const MSG_USERS_LOADED: &str = "Users loaded successfully";
pub const MSG_USER_UPDATED: &str = "User updated successfully";
pub const MSG_USERS_REMOVED: &str = "Users removed successfully";
pub const MSG_REMOVE_FAILED: &str = "We could not remove the user";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Activated => {
            state.request_started();
            vec![Effect::LoadUsers]
        }
        Msg::NameChanged(name) => {
            state.set_name(name);
            Vec::new()
        }
        Msg::EmailChanged(email) => {
            state.set_email(email);
            Vec::new()
        }
        Msg::FormSubmitted => {
            if !state.form_is_valid() {
                return (state, Vec::new());
            }
            match state.take_selected() {
                Some(selected) => {
                    let updated = state.form().merge_into(&selected);
                    // A missing match still reports success; the list is left as is.
                    state.replace_matching(updated);
                    state.clear_selection();
                    vec![Effect::Notify(Notification::success(MSG_USER_UPDATED))]
                }
                None => {
                    state.request_started();
                    vec![Effect::CreateUser(state.form().to_new_user())]
                }
            }
        }
        Msg::EditRequested(user) => {
            state.select(user);
            Vec::new()
        }
        Msg::EditCancelled => {
            state.clear_selection();
            Vec::new()
        }
        Msg::DeleteRequested(Some(id)) => {
            state.remove_by_id(id);
            vec![Effect::Notify(Notification::success(MSG_USERS_REMOVED))]
        }
        Msg::DeleteRequested(None) => {
            vec![Effect::Notify(Notification::error(MSG_REMOVE_FAILED))]
        }
        Msg::UsersLoaded(result) => {
            state.request_finished();
            match result {
                Ok(users) => {
                    state.replace_users(users);
                    vec![Effect::Notify(Notification::success(MSG_USERS_LOADED))]
                }
                Err(message) => vec![Effect::Notify(Notification::error(message))],
            }
        }
        Msg::UserCreated(result) => {
            state.request_finished();
            match result {
                Ok(_) => {
                    state.request_started();
                    vec![Effect::LoadUsers]
                }
                Err(message) => vec![Effect::Notify(Notification::error(message))],
            }
        }
        Msg::NotificationDismissed => vec![Effect::ClearNotification],
    };

    (state, effects)
}
