use chrono::{DateTime, Utc};
use colored::Colorize;
use repokit::api::{CmdMessage, MessageLevel};
use repokit::model::DatasetRecord;
use repokit::report::provided_label;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TYPE_WIDTH: usize = 12;
const STATS_WIDTH: usize = 22;
const TIME_WIDTH: usize = 16;

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

pub(super) fn print_record_list(records: &[DatasetRecord]) {
    let now = Utc::now();
    for line in records.iter().map(|r| record_line(r, now)) {
        println!("{}", line);
    }
}

fn record_line(record: &DatasetRecord, now: DateTime<Utc>) -> String {
    let data_type = truncate_to_width(&record.data_type, TYPE_WIDTH);
    let stats = format!(
        "{} files {:>8.2} MB",
        record.number_of_files, record.total_size_mb
    );
    let available = LINE_WIDTH.saturating_sub(TYPE_WIDTH + STATS_WIDTH + TIME_WIDTH + 3);
    let name = truncate_to_width(&record.data_name, available);
    let padding = available.saturating_sub(name.width());

    format!(
        "{}{} {}{} {:>width$} {}",
        name.bold(),
        " ".repeat(padding),
        data_type.cyan(),
        " ".repeat(TYPE_WIDTH.saturating_sub(data_type.width())),
        stats,
        format_time_ago(record.timestamp, now).dimmed(),
        width = STATS_WIDTH
    )
}

pub(super) fn print_full_records(records: &[DatasetRecord]) {
    for (i, r) in records.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", r.data_name.bold(), format!("({})", r.data_type).cyan());
        println!("--------------------------------");
        field("Location", Some(r.destination.as_str()));
        field("Status", Some(provided_label(r)));
        field("Source", r.source.as_deref());
        field("Run command", r.run_command.as_deref());
        field("Hash", r.hash.as_deref());
        field("DOI", r.doi.as_deref());
        field("Citation", r.citation.as_deref());
        field("License", r.license.as_deref());
        field("Notes", r.notes.as_deref());
        field("Registered", Some(r.timestamp.to_rfc3339().as_str()));
        println!(
            "{} {} ({:.2} MB)",
            format!("{:<12}", "Files:").dimmed(),
            r.number_of_files,
            r.total_size_mb
        );
        for (file, size) in r.data_files.iter().zip(&r.data_size) {
            println!("    {} {}", file, format!("{:.2} MB", size).dimmed());
        }
    }
}

fn field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let label = format!("{}:", label);
        println!("{} {}", format!("{:<12}", label).dimmed(), value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
