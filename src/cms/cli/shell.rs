//! Interactive session. One API instance lives for the whole session, so undo
//! works across commands and nothing is written until `save`.

use super::commands::confirm;
use super::render::{print_messages, print_records, print_status};
use cms::api::CmsApi;
use cms::commands::{CmdMessage, CmdResult};
use cms::error::{CmsError, Result};
use cms::model::RecordDraft;
use cms::store::StorageBackend;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const PROMPT: &str = "cms> ";

const HELP: &str = "\
Commands:
  open FILE                         Open a records file
  close                             Close the file, discarding unsaved changes
  show                              Show all records
  insert ID NAME PROGRAMME MARK     Insert a record (quote values with spaces)
  update ID FIELD VALUE             Change name, programme or mark
  delete ID                         Delete a record (asks for confirmation)
  query id|name|programme|mark VALUE
                                    Search records
  sort id|mark [asc|desc]           Sort records
  undo                              Revert the last insert, update or delete
  save [FILE]                       Save to the current file, or to FILE
  status                            Show the open file and pending undo
  help                              Show this help
  exit                              Leave the session";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub(super) struct Session<'a, B: StorageBackend, R: BufRead> {
    api: &'a mut CmsApi<B>,
    input: R,
}

impl<'a, B: StorageBackend, R: BufRead> Session<'a, B, R> {
    pub(super) fn new(api: &'a mut CmsApi<B>, input: R) -> Self {
        Self { api, input }
    }

    pub(super) fn run(mut self, file: Option<PathBuf>) -> Result<()> {
        if let Some(path) = file {
            report(self.api.open(&path));
        }
        println!("{}", "Type \"help\" for a list of commands.".dimmed());

        loop {
            print!("{}", PROMPT);
            io::stdout().flush().map_err(CmsError::Io)?;

            let mut line = String::new();
            if self.input.read_line(&mut line).map_err(CmsError::Io)? == 0 {
                println!();
                break;
            }
            if self.execute_line(&line)? == Flow::Exit {
                break;
            }
        }

        if self.api.table().pending_undo().is_some() {
            log::warn!("Session ended with unsaved changes");
        }
        Ok(())
    }

    /// Runs one input line. Command failures are printed; only terminal I/O
    /// errors end the session.
    fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let args = match split_args(line) {
            Some(args) => args,
            None => {
                print_messages(&[CmdMessage::error("Unterminated quote")]);
                return Ok(Flow::Continue);
            }
        };
        let Some((command, rest)) = args.split_first() else {
            return Ok(Flow::Continue);
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        match command.to_lowercase().as_str() {
            "exit" | "quit" => return Ok(Flow::Exit),
            "help" => println!("{}", HELP),
            "delete" => self.delete(&rest)?,
            other => report(self.dispatch(other, &rest)),
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<CmdResult> {
        match (command, args) {
            ("open", [file]) => self.api.open(file),
            ("close", []) => self.api.close(),
            ("show" | "showall", []) => self.api.list_all(),
            ("insert", [id, name, programme, mark]) => self
                .api
                .insert(&RecordDraft::new(*id, *name, *programme, *mark)),
            ("update", [id, field, value]) => self.api.update(id, field, value),
            ("query", [field, value]) => match field.to_lowercase().as_str() {
                "id" => self.api.find_by_id(value),
                "name" => self.api.find_by_name(value),
                "programme" | "program" => self.api.find_by_programme(value),
                "mark" => self.api.find_by_mark(value),
                other => Err(CmsError::UnknownField(other.to_string())),
            },
            ("sort", [key]) => self.sort(key, "asc"),
            ("sort", [key, direction]) => self.sort(key, direction),
            ("undo", []) => self.api.undo(),
            ("save", []) => self.api.save(None),
            ("save", [file]) => self.api.save(Some(Path::new(*file))),
            ("status", []) => self.api.status(),
            (known, _) if is_command(known) => Ok(CmdResult::default().with_message(
                CmdMessage::error(format!("Wrong arguments for \"{}\". Type \"help\".", known)),
            )),
            (unknown, _) => Ok(CmdResult::default().with_message(CmdMessage::error(format!(
                "Unknown command \"{}\". Type \"help\".",
                unknown
            )))),
        }
    }

    fn sort(&mut self, key: &str, direction: &str) -> Result<CmdResult> {
        let ascending = match direction.to_lowercase().as_str() {
            "asc" | "ascending" => true,
            "desc" | "descending" => false,
            other => {
                return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
                    "Unknown sort direction \"{}\" (expected asc or desc)",
                    other
                ))))
            }
        };
        match key.to_lowercase().as_str() {
            "id" => self.api.sort_by_id(ascending),
            "mark" => self.api.sort_by_mark(ascending),
            other => Err(CmsError::UnknownField(other.to_string())),
        }
    }

    /// Shows the record, asks for confirmation, then deletes.
    fn delete(&mut self, args: &[&str]) -> Result<()> {
        let [id] = args else {
            print_messages(&[CmdMessage::error(
                "Wrong arguments for \"delete\". Type \"help\".",
            )]);
            return Ok(());
        };

        let found = match self.api.find_by_id(id) {
            Ok(found) => found,
            Err(e) => {
                report(Err(e));
                return Ok(());
            }
        };
        print_records(&found.listed_records);

        let prompt = format!(
            "Are you sure you want to delete the record with ID={}? Type \"Y\" to confirm or \"N\" to cancel: ",
            id.trim()
        );
        if confirm(&mut self.input, &prompt)? {
            report(self.api.delete(id));
        } else {
            print_messages(&[CmdMessage::info("The deletion is cancelled")]);
        }
        Ok(())
    }
}

fn is_command(name: &str) -> bool {
    matches!(
        name,
        "open" | "close" | "show" | "showall" | "insert" | "update" | "query" | "sort" | "undo"
            | "save" | "status"
    )
}

fn report(result: Result<CmdResult>) {
    match result {
        Ok(result) => {
            print_records(&result.listed_records);
            if let Some(status) = &result.status {
                print_status(status);
            }
            print_messages(&result.messages);
        }
        Err(e) => print_messages(&[CmdMessage::error(e.to_string())]),
    }
}

/// Splits a line on whitespace, keeping single- or double-quoted runs together.
/// Returns `None` for an unterminated quote.
fn split_args(line: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if quote.is_some() {
        return None;
    }
    if in_arg {
        args.push(current);
    }
    Some(args)
}
