use roster_core::UserId;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  list             show the local user list and form
  name <text>      set the form name
  email <text>     set the form email
  submit           create a user, or apply the edit in progress
  edit <id>        load a listed user into the form
  cancel           abandon the edit in progress
  delete [id]      remove a user from the local list
  get <id>         fetch a single user from the service
  reload           fetch the whole list again
  dismiss          clear the current notification
  help             show this text
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Name(String),
    Email(String),
    Submit,
    Edit(UserId),
    Cancel,
    Delete(Option<UserId>),
    Get(UserId),
    Reload,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an id")]
    MissingId(&'static str),
    #[error("{0:?} is not a user id")]
    InvalidId(String),
}

/// Parses one input line. Field values keep inner spaces: `name Ada Lovelace`.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "list" | "ls" => Ok(Command::List),
        "name" => Ok(Command::Name(rest.to_string())),
        "email" => Ok(Command::Email(rest.to_string())),
        "submit" | "save" => Ok(Command::Submit),
        "edit" => required_id("edit", rest).map(Command::Edit),
        "cancel" => Ok(Command::Cancel),
        "delete" | "rm" => optional_id(rest).map(Command::Delete),
        "get" => required_id("get", rest).map(Command::Get),
        "reload" => Ok(Command::Reload),
        "dismiss" => Ok(Command::Dismiss),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn required_id(command: &'static str, raw: &str) -> Result<UserId, CommandError> {
    optional_id(raw)?.ok_or(CommandError::MissingId(command))
}

fn optional_id(raw: &str) -> Result<Option<UserId>, CommandError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_values_keep_inner_spaces() {
        assert_eq!(
            parse("  name   Ada Lovelace "),
            Ok(Command::Name("Ada Lovelace".to_string()))
        );
        assert_eq!(parse("email"), Ok(Command::Email(String::new())));
    }

    #[test]
    fn delete_id_is_optional() {
        assert_eq!(parse("delete 3"), Ok(Command::Delete(Some(3))));
        assert_eq!(parse("delete"), Ok(Command::Delete(None)));
        assert_eq!(
            parse("delete three"),
            Err(CommandError::InvalidId("three".to_string()))
        );
    }

    #[test]
    fn edit_and_get_require_ids() {
        assert_eq!(parse("EDIT 7"), Ok(Command::Edit(7)));
        assert_eq!(parse("get"), Err(CommandError::MissingId("get")));
    }

    #[test]
    fn blank_and_unknown_lines_are_errors() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(
            parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}
