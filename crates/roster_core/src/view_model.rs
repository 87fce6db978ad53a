use crate::{FormState, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Next submit creates a new user.
    #[default]
    Create,
    /// Next submit updates the selected user locally.
    Edit { id: Option<UserId> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub users: Vec<UserRowView>,
    pub user_count: usize,
    pub form: FormState,
    pub mode: FormMode,
    pub in_flight: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRowView {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub selected: bool,
}
