use crate::{NewUser, User};

/// Values bound to the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub name: String,
    pub email: String,
}

impl FormState {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    /// Form values override the selected record; the id is kept.
    pub fn merge_into(&self, selected: &User) -> User {
        User {
            id: selected.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Policy deciding whether a form may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormValidation {
    /// Every form is valid, including one with empty fields.
    #[default]
    Permissive,
    /// Name must be non-blank and email must look like `local@domain`.
    RequireFields,
}

impl FormValidation {
    pub fn accepts(self, form: &FormState) -> bool {
        match self {
            FormValidation::Permissive => true,
            FormValidation::RequireFields => {
                !form.name.trim().is_empty() && looks_like_email(&form.email)
            }
        }
    }
}

fn looks_like_email(raw: &str) -> bool {
    match raw.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
