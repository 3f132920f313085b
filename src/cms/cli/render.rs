use cms::commands::{CmdMessage, MessageLevel, TableStatus};
use cms::model::Record;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 10;
const NAME_WIDTH: usize = 40;
const PROGRAMME_WIDTH: usize = 40;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Prints only warnings and errors, for commands where a successful load is implied.
pub(super) fn print_problems(messages: &[CmdMessage]) {
    let problems: Vec<CmdMessage> = messages
        .iter()
        .filter(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
        .cloned()
        .collect();
    print_messages(&problems);
}

pub(super) fn print_records(records: &[Record]) {
    if records.is_empty() {
        return;
    }
    println!("{}", format_header().bold());
    for record in records {
        println!("{}", format_row(record));
    }
}

pub(super) fn print_status(status: &TableStatus) {
    for line in format_status(status) {
        println!("{}", line);
    }
}

fn format_header() -> String {
    format!(
        "{}{}{}{}",
        fit("ID", ID_WIDTH),
        fit("Name", NAME_WIDTH),
        fit("Programme", PROGRAMME_WIDTH),
        "Mark"
    )
}

fn format_row(record: &Record) -> String {
    format!(
        "{}{}{}{}",
        fit(&record.id.to_string(), ID_WIDTH),
        fit(&record.name, NAME_WIDTH),
        fit(&record.programme, PROGRAMME_WIDTH),
        record.mark
    )
}

fn format_status(status: &TableStatus) -> Vec<String> {
    let file = status
        .filename
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let undo = status
        .pending_undo
        .map(|op| op.to_string())
        .unwrap_or_else(|| "-".to_string());

    vec![
        format!("Open:     {}", if status.is_open { "yes" } else { "no" }),
        format!("File:     {}", file),
        format!("Records:  {} / {}", status.records, status.capacity),
        format!("Undo:     {}", undo),
    ]
}

/// Pads or truncates `s` to exactly `width` columns, always leaving one trailing space.
fn fit(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width.saturating_sub(1));
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
