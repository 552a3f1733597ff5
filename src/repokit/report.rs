//! # Dataset Reports
//!
//! Renders the provenance store as markdown:
//!
//! - [`compact_table`]: one row per dataset, spliced into the project README.
//! - [`full_table`]: one row per file, written to the dataset list used in
//!   replication packages.
//!
//! Both group records by `data_type` under a `### <data_type>` heading, groups
//! sorted by name, records in store order within a group.
//!
//! [`splice_into_readme`] inserts a table right below the first line mentioning
//! the heading. It does not replace a table inserted by an earlier call: running
//! it twice leaves two tables.

use crate::error::{RepokitError, Result};
use crate::model::DatasetRecord;
use pulldown_cmark::{Event, Options, Parser, Tag};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const MISSING: &str = "N/A";

const COMPACT_COLUMNS: &[&str] = &[
    "Name",
    "Location",
    "Provided",
    "Run Command",
    "File Count",
    "Total Size MB",
    "Formats",
    "Source",
    "DOI",
    "Citation",
    "License",
    "Notes",
];

const FULL_COLUMNS: &[&str] = &[
    "Name",
    "File",
    "Location",
    "Provided",
    "File Size MB",
    "Run Command",
    "Source",
    "DOI",
    "Citation",
    "License",
    "Notes",
];

pub fn provided_label(record: &DatasetRecord) -> &'static str {
    if record.is_provided() {
        "Provided"
    } else {
        "Can be re-created"
    }
}

pub fn compact_table(records: &[DatasetRecord]) -> String {
    let mut out = String::new();
    for (data_type, group) in group_by_type(records) {
        push_table_start(&mut out, data_type, COMPACT_COLUMNS);
        for r in group {
            push_row(
                &mut out,
                &[
                    cell(&r.data_name),
                    cell(&r.destination),
                    provided_label(r).to_string(),
                    optional(&r.run_command),
                    r.number_of_files.to_string(),
                    format_mb(r.total_size_mb),
                    formats(r),
                    optional(&r.source),
                    optional(&r.doi),
                    optional(&r.citation),
                    optional(&r.license),
                    optional(&r.notes),
                ],
            );
        }
        out.push('\n');
    }
    out
}

pub fn full_table(records: &[DatasetRecord]) -> String {
    let mut out = String::new();
    for (data_type, group) in group_by_type(records) {
        if group.iter().all(|r| r.data_files.is_empty()) {
            continue;
        }
        push_table_start(&mut out, data_type, FULL_COLUMNS);
        for r in group {
            for (i, file) in r.data_files.iter().enumerate() {
                let size = r
                    .data_size
                    .get(i)
                    .map(|s| format_mb(*s))
                    .unwrap_or_else(|| "?".to_string());
                push_row(
                    &mut out,
                    &[
                        cell(&r.data_name),
                        cell(file),
                        cell(&r.destination),
                        provided_label(r).to_string(),
                        size,
                        optional(&r.run_command),
                        optional(&r.source),
                        optional(&r.doi),
                        optional(&r.citation),
                        optional(&r.license),
                        optional(&r.notes),
                    ],
                );
            }
        }
        out.push('\n');
    }
    out
}

/// Count the body rows of every markdown table in `markdown`.
pub fn table_row_count(markdown: &str) -> usize {
    Parser::new_ext(markdown, Options::ENABLE_TABLES)
        .filter(|event| matches!(event, Event::Start(Tag::TableRow)))
        .count()
}

pub fn splice_into_readme(markdown: &str, readme_path: &Path, heading: &str) -> Result<()> {
    let content = match fs::read_to_string(readme_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(report_error(readme_path, e)),
    };

    if let Some(parent) = readme_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| report_error(readme_path, e))?;
        }
    }

    fs::write(readme_path, splice(&content, markdown, heading))
        .map_err(|e| report_error(readme_path, e))
}

pub fn splice(content: &str, markdown: &str, heading: &str) -> String {
    let table = markdown.trim_end();

    match content.lines().position(|line| line.contains(heading)) {
        Some(at) => {
            let mut out = String::with_capacity(content.len() + table.len() + 4);
            for (i, line) in content.lines().enumerate() {
                out.push_str(line);
                out.push('\n');
                if i == at {
                    out.push('\n');
                    out.push_str(table);
                    out.push_str("\n\n");
                }
            }
            out
        }
        None => {
            let mut out = content.trim_end().to_string();
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(&format!("# {}\n\n{}\n", heading, table));
            out
        }
    }
}

pub fn write_dataset_list(markdown: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| report_error(path, e))?;
        }
    }
    fs::write(path, markdown).map_err(|e| report_error(path, e))
}

fn report_error(path: &Path, e: std::io::Error) -> RepokitError {
    RepokitError::ReportGeneration(format!("{}: {}", path.display(), e))
}

fn group_by_type(records: &[DatasetRecord]) -> BTreeMap<&str, Vec<&DatasetRecord>> {
    let mut groups: BTreeMap<&str, Vec<&DatasetRecord>> = BTreeMap::new();
    for r in records {
        groups.entry(r.data_type.as_str()).or_default().push(r);
    }
    groups
}

fn push_table_start(out: &mut String, data_type: &str, columns: &[&str]) {
    out.push_str(&format!("### {}\n\n", data_type));
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    let divider: Vec<String> = columns.iter().map(|c| "-".repeat(c.len())).collect();
    out.push_str(&format!("| {} |\n", divider.join(" | ")));
}

fn push_row(out: &mut String, cells: &[String]) {
    out.push_str(&format!("| {} |\n", cells.join(" | ")));
}

fn cell(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return MISSING.to_string();
    }
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn optional(value: &Option<String>) -> String {
    value.as_deref().map(cell).unwrap_or_else(|| MISSING.to_string())
}

fn format_mb(mb: f64) -> String {
    format!("{:.2}", mb)
}

fn formats(record: &DatasetRecord) -> String {
    if record.file_formats.is_empty() {
        return MISSING.to_string();
    }
    record
        .file_formats
        .iter()
        .map(|f| if f.is_empty() { "(none)" } else { f.as_str() })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::FileStats;
    use tempfile::TempDir;

    fn record(name: &str, destination: &str, files: &[&str]) -> DatasetRecord {
        let sizes: Vec<f64> = files.iter().map(|_| 1.5).collect();
        DatasetRecord::new(
            name.into(),
            destination.into(),
            files.iter().map(|f| f.to_string()).collect(),
            FileStats {
                count: files.len(),
                total_size_mb: sizes.iter().sum(),
                formats: files
                    .iter()
                    .map(|f| crate::inventory::extension_of(Path::new(f)))
                    .collect(),
                sizes_mb: sizes,
            },
        )
    }

    fn sample() -> Vec<DatasetRecord> {
        vec![
            record(
                "survey",
                "data/raw/survey",
                &["data/raw/survey/a.csv", "data/raw/survey/b.csv"],
            ),
            record("empty", "data/raw/empty", &[]),
            record("model", "data/processed/model.pkl", &["data/processed/model.pkl"]),
        ]
    }

    #[test]
    fn test_compact_table_has_one_row_per_record() {
        let records = sample();
        let md = compact_table(&records);
        assert_eq!(table_row_count(&md), records.len());
        assert!(md.contains("### processed"));
        assert!(md.contains("### raw"));
        assert!(md.find("### processed").unwrap() < md.find("### raw").unwrap());
    }

    #[test]
    fn test_full_table_has_one_row_per_file() {
        let records = sample();
        let md = full_table(&records);
        let files: usize = records.iter().map(|r| r.data_files.len()).sum();
        assert_eq!(table_row_count(&md), files);
        assert!(md.contains("| survey | data/raw/survey/b.csv |"));
    }

    #[test]
    fn test_provided_label() {
        let records = sample();
        let md = compact_table(&records);
        assert!(md.contains("| empty | data/raw/empty | Can be re-created |"));
        assert!(md.contains("| survey | data/raw/survey | Provided |"));
    }

    #[test]
    fn test_cells_escape_pipes_and_fill_missing() {
        let mut r = record("x", "data/raw/x", &["data/raw/x/a"]);
        r.run_command = Some("grep a|b".into());
        r.notes = Some("line one\nline two".into());
        let md = compact_table(&[r]);
        assert!(md.contains("grep a\\|b"));
        assert!(md.contains("line one line two"));
        assert!(md.contains("| (none) |"));
        assert!(md.contains("| N/A |"));
        assert_eq!(table_row_count(&md), 1);
    }

    #[test]
    fn test_empty_store_renders_nothing() {
        assert_eq!(compact_table(&[]), "");
        assert_eq!(full_table(&[]), "");
        assert_eq!(table_row_count(""), 0);
    }

    #[test]
    fn test_splice_below_heading() {
        let readme = "# Project\n\n## Dataset List\n\nSee below.\n";
        let out = splice(readme, "| a |\n| - |\n| 1 |\n", "Dataset List");
        assert_eq!(
            out,
            "# Project\n\n## Dataset List\n\n| a |\n| - |\n| 1 |\n\n\nSee below.\n"
        );
    }

    #[test]
    fn test_splice_appends_section_when_heading_missing() {
        let out = splice("# Project\n\n", "| a |\n| - |\n| 1 |", "Dataset List");
        assert_eq!(out, "# Project\n\n# Dataset List\n\n| a |\n| - |\n| 1 |\n");

        let out = splice("", "| a |\n| - |\n| 1 |", "Dataset List");
        assert_eq!(out, "# Dataset List\n\n| a |\n| - |\n| 1 |\n");
    }

    #[test]
    fn test_repeated_splice_stacks_tables() {
        let temp = TempDir::new().unwrap();
        let readme = temp.path().join("README.md");
        let table = compact_table(&sample());

        splice_into_readme(&table, &readme, "Dataset List").unwrap();
        splice_into_readme(&table, &readme, "Dataset List").unwrap();

        let content = fs::read_to_string(&readme).unwrap();
        assert_eq!(content.matches("# Dataset List").count(), 1);
        assert_eq!(table_row_count(&content), 2 * sample().len());
    }

    #[test]
    fn test_write_dataset_list_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docs/dataset_list.md");
        write_dataset_list("| a |\n", &path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "| a |\n");
    }
}
