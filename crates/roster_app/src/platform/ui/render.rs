use std::fmt::Write as _;

use roster_core::{AppViewModel, FormMode, UserRowView};

const NAME_WIDTH: usize = 24;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:>4}  {:<NAME_WIDTH$}  EMAIL", "ID", "NAME");
    if view.users.is_empty() {
        let _ = writeln!(out, "  (no users)");
    }
    for row in &view.users {
        let _ = writeln!(out, "{}", format_row(row));
    }
    let _ = writeln!(out, "{} user(s)", view.user_count);
    let _ = write!(out, "{}", format_form(view));
    if view.in_flight > 0 {
        let _ = write!(out, "  ({} request(s) pending)", view.in_flight);
    }
    out
}

fn format_row(row: &UserRowView) -> String {
    let marker = if row.selected { '>' } else { ' ' };
    let id = row
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{marker} {id:>4}  {name:<NAME_WIDTH$}  {email}",
        name = truncate(&row.name, NAME_WIDTH),
        email = row.email
    )
}

fn format_form(view: &AppViewModel) -> String {
    let mode = match view.mode {
        FormMode::Create => "new user".to_string(),
        FormMode::Edit { id: Some(id) } => format!("editing #{id}"),
        FormMode::Edit { id: None } => "editing unsaved user".to_string(),
    };
    format!(
        "Form ({mode}): name={:?} email={:?}",
        view.form.name, view.form.email
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
