use std::collections::VecDeque;
use std::sync::Arc;

use roster_core::{
    update, AppState, AppViewModel, Effect, FormValidation, Msg, NotificationChannel, User,
    UserId,
};
use roster_logging::{roster_debug, roster_info, roster_warn};

use crate::UserDirectory;

/// Drives the user list: applies messages to the pure state machine and
/// executes the resulting effects against the directory and the
/// notification channel.
///
/// Remote failures are turned into their message text here and published as
/// error notifications; they never escape a `dispatch`.
pub struct UserListController {
    directory: Arc<dyn UserDirectory>,
    notifications: Arc<NotificationChannel>,
    state: AppState,
}

impl UserListController {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        notifications: Arc<NotificationChannel>,
        validation: FormValidation,
    ) -> Self {
        Self {
            directory,
            notifications,
            state: AppState::with_validation(validation),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn users(&self) -> &[User] {
        self.state.users()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn notifications(&self) -> &Arc<NotificationChannel> {
        &self.notifications
    }

    pub async fn activate(&mut self) {
        self.dispatch(Msg::Activated).await;
    }

    pub async fn set_form(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.dispatch(Msg::NameChanged(name.into())).await;
        self.dispatch(Msg::EmailChanged(email.into())).await;
    }

    pub async fn submit(&mut self) {
        self.dispatch(Msg::FormSubmitted).await;
    }

    pub async fn edit_user(&mut self, user: User) {
        self.dispatch(Msg::EditRequested(user)).await;
    }

    pub async fn cancel_edit(&mut self) {
        self.dispatch(Msg::EditCancelled).await;
    }

    pub async fn delete_user(&mut self, id: Option<UserId>) {
        self.dispatch(Msg::DeleteRequested(id)).await;
    }

    pub async fn dismiss_notification(&mut self) {
        self.dispatch(Msg::NotificationDismissed).await;
    }

    /// Looks a single record up remotely. Failures become error notifications.
    pub async fn fetch_user(&self, id: UserId) -> Option<User> {
        match self.directory.get_by_id(id).await {
            Ok(user) => Some(user),
            Err(err) => {
                roster_warn!("get user {} failed: {}", id, err);
                self.notifications.error(err.to_string());
                None
            }
        }
    }

    /// Applies `msg` and every follow-up message produced by its effects.
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            roster_debug!("dispatch {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(next) = self.run_effect(effect).await {
                    inbox.push_back(next);
                }
            }
        }
    }

    async fn run_effect(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::LoadUsers => {
                let result = self.directory.list().await;
                match &result {
                    Ok(users) => roster_info!("loaded {} users", users.len()),
                    Err(err) => roster_warn!("list users failed: {}", err),
                }
                Some(Msg::UsersLoaded(result.map_err(|err| err.to_string())))
            }
            Effect::CreateUser(new_user) => {
                let result = self.directory.create(&new_user).await;
                match &result {
                    Ok(user) => roster_info!("created user id={:?}", user.id),
                    Err(err) => roster_warn!("create user failed: {}", err),
                }
                Some(Msg::UserCreated(result.map_err(|err| err.to_string())))
            }
            Effect::Notify(notification) => {
                self.notifications.notify(notification);
                None
            }
            Effect::ClearNotification => {
                self.notifications.clear();
                None
            }
        }
    }
}

impl std::fmt::Debug for UserListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserListController")
            .field("state", &self.state)
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}
