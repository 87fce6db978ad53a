use crate::view_model::{AppViewModel, FormMode, UserRowView};
use crate::{FormState, FormValidation, User, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    users: Vec<User>,
    form: FormState,
    selected: Option<User>,
    validation: FormValidation,
    in_flight: usize,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation(validation: FormValidation) -> Self {
        Self {
            validation,
            ..Self::default()
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn selected(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    /// Requests issued but not yet answered. Informational only.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == Some(id))
    }

    pub fn view(&self) -> AppViewModel {
        let selected_id = self.selected.as_ref().map(|user| user.id);
        let users = self
            .users
            .iter()
            .map(|user| UserRowView {
                id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
                selected: selected_id == Some(user.id),
            })
            .collect::<Vec<_>>();
        AppViewModel {
            user_count: users.len(),
            users,
            form: self.form.clone(),
            mode: match &self.selected {
                Some(user) => FormMode::Edit { id: user.id },
                None => FormMode::Create,
            },
            in_flight: self.in_flight,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn form_is_valid(&self) -> bool {
        self.validation.accepts(&self.form)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        if self.form.name != name {
            self.form.name = name;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_email(&mut self, email: String) {
        if self.form.email != email {
            self.form.email = email;
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, user: User) {
        self.form = FormState::from_user(&user);
        self.selected = Some(user);
        self.mark_dirty();
    }

    pub(crate) fn take_selected(&mut self) -> Option<User> {
        self.selected.take()
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
        self.form.reset();
        self.mark_dirty();
    }

    /// Replaces the first entry whose id equals `user.id`.
    pub(crate) fn replace_matching(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => {
                *existing = user;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Removes every entry with `id`; returns how many were dropped.
    pub(crate) fn remove_by_id(&mut self, id: UserId) -> usize {
        let before = self.users.len();
        self.users.retain(|user| user.id != Some(id));
        let removed = before - self.users.len();
        if removed > 0 {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn request_started(&mut self) {
        self.in_flight += 1;
        self.mark_dirty();
    }

    pub(crate) fn request_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
