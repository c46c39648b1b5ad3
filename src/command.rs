// Shell command parsing

use crate::filter::StatusFilter;
use crate::task::{DraftField, Status};
use eyre::{Context, Result, eyre};

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetField(DraftField, String),
    Submit,
    Edit(usize),
    Cancel,
    SetStatus(usize, Status),
    Delete(usize),
    Filter(StatusFilter),
    List,
    Draft,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  name <text>             set the draft name
  desc <text>             set the draft description
  submit                  add the draft, or update the task being edited
  edit <i>                load task i into the draft
  cancel                  stop editing and clear the draft
  done <i> | undone <i>   mark task i complete / incomplete
  status <i> <status>     set task i to complete or incomplete
  delete <i>              remove task i
  filter <filter>         show all, incomplete or complete tasks
  list                    show the task list
  draft                   show the draft
  json                    print the current state as JSON
  help                    show this help
  quit                    leave the shell";

/// Parse a line of input; blank lines and `#` comments yield `None`
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "name" => Command::SetField(DraftField::Name, rest.to_string()),
        "desc" | "description" => Command::SetField(DraftField::Description, rest.to_string()),
        "submit" | "add" | "update" => no_args(word, rest, Command::Submit)?,
        "edit" => Command::Edit(parse_index(rest)?),
        "cancel" => no_args(word, rest, Command::Cancel)?,
        "done" => Command::SetStatus(parse_index(rest)?, Status::Complete),
        "undone" => Command::SetStatus(parse_index(rest)?, Status::Incomplete),
        "status" => {
            let (index, status) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| eyre!("Usage: status <index> <complete|incomplete>"))?;
            Command::SetStatus(parse_index(index)?, status.trim().parse()?)
        }
        "delete" | "rm" => Command::Delete(parse_index(rest)?),
        "filter" => Command::Filter(rest.parse()?),
        "list" | "ls" => no_args(word, rest, Command::List)?,
        "draft" => no_args(word, rest, Command::Draft)?,
        "json" => no_args(word, rest, Command::Json)?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(eyre!("Unknown command: {} (try `help`)", other)),
    };

    Ok(Some(command))
}

fn parse_index(s: &str) -> Result<usize> {
    if s.is_empty() {
        return Err(eyre!("Missing task index"));
    }
    s.parse::<usize>()
        .with_context(|| format!("Invalid task index: {}", s))
}

fn no_args(word: &str, rest: &str, command: Command) -> Result<Command> {
    if !rest.is_empty() {
        return Err(eyre!("`{}` takes no arguments", word));
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# groceries").unwrap(), None);
    }

    #[test]
    fn test_draft_fields_keep_inner_spaces() {
        assert_eq!(
            parse_line("name  Buy   milk ").unwrap(),
            Some(Command::SetField(DraftField::Name, "Buy   milk".to_string()))
        );
        assert_eq!(
            parse_line("desc").unwrap(),
            Some(Command::SetField(DraftField::Description, String::new()))
        );
    }

    #[test]
    fn test_index_commands() {
        assert_eq!(parse_line("edit 1").unwrap(), Some(Command::Edit(1)));
        assert_eq!(parse_line("delete 0").unwrap(), Some(Command::Delete(0)));
        assert_eq!(
            parse_line("done 2").unwrap(),
            Some(Command::SetStatus(2, Status::Complete))
        );
        assert_eq!(
            parse_line("status 3 incomplete").unwrap(),
            Some(Command::SetStatus(3, Status::Incomplete))
        );
    }

    #[test]
    fn test_filter_command() {
        assert_eq!(
            parse_line("filter Complete").unwrap(),
            Some(Command::Filter(StatusFilter::Complete))
        );
        assert!(parse_line("filter later").is_err());
    }

    #[test]
    fn test_bad_input() {
        assert!(parse_line("edit").is_err());
        assert!(parse_line("edit -1").is_err());
        assert!(parse_line("status 1").is_err());
        assert!(parse_line("submit now").is_err());
        assert!(parse_line("frobnicate").is_err());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse_line("add").unwrap(), Some(Command::Submit));
        assert_eq!(parse_line("ls").unwrap(), Some(Command::List));
        assert_eq!(parse_line("exit").unwrap(), Some(Command::Quit));
    }
}
