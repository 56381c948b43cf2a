//! Human-readable console table projection

use crate::formatter::format_datetime;
use crate::types::RepositoryDescriptor;

const HEADERS: [&str; 7] = [
    "NAME",
    "VISIBILITY",
    "FORK",
    "ARCHIVED",
    "STARS",
    "UPDATED",
    "URL",
];

/// Literal notice emitted instead of an empty table
pub const EMPTY_NOTICE: &str = "No repositories found.";

/// Render the descriptor sequence as a width-aligned table, most recently
/// updated first. Ties keep their original fetch order (stable sort).
pub fn render(descriptors: &[RepositoryDescriptor]) -> String {
    if descriptors.is_empty() {
        return format!("{}\n", EMPTY_NOTICE);
    }

    let mut sorted: Vec<&RepositoryDescriptor> = descriptors.iter().collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let rows: Vec<[String; 7]> = sorted
        .iter()
        .map(|descriptor| {
            [
                descriptor.name.to_string(),
                descriptor.visibility.to_string(),
                yes_no(descriptor.is_fork),
                yes_no(descriptor.archived),
                descriptor.stargazer_count.to_string(),
                format_datetime(descriptor.updated_at),
                descriptor.url.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 7] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    output.push_str(&format_row(&HEADERS.map(String::from), &widths));
    for row in &rows {
        output.push_str(&format_row(row, &widths));
    }

    output
}

fn format_row(cells: &[String; 7], widths: &[usize; 7]) -> String {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        // the last column is not padded, keeping line ends clean
        if index == cells.len() - 1 {
            line.push_str(cell);
        } else {
            line.push_str(&format!("{:<width$}", cell, width = *width));
        }
    }
    line.push('\n');
    line
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RepositoryName, RepositoryUrl, RepositoryVisibility};
    use chrono::{TimeZone, Utc};

    fn descriptor(name: &str, updated_day: u32) -> RepositoryDescriptor {
        RepositoryDescriptor {
            name: RepositoryName::from(name),
            full_name: format!("octocat/{}", name),
            description: None,
            homepage_url: None,
            topics: Vec::new(),
            visibility: RepositoryVisibility::Public,
            is_private: false,
            is_fork: false,
            archived: false,
            url: RepositoryUrl::new(format!("https://github.com/octocat/{}", name)),
            ssh_url: format!("git@github.com:octocat/{}.git", name),
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, updated_day, 0, 0, 0).unwrap(),
            stargazer_count: 5,
            watchers_count: 1,
            open_issues_count: 0,
            default_branch: None,
            license: None,
        }
    }

    #[test]
    fn test_empty_input_emits_notice_and_no_table() {
        let output = render(&[]);
        assert_eq!(output, "No repositories found.\n");
        assert!(!output.contains("NAME"));
    }

    #[test]
    fn test_rows_sorted_by_update_time_descending() {
        let output = render(&[
            descriptor("older", 1),
            descriptor("newest", 20),
            descriptor("middle", 10),
        ]);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("newest"));
        assert!(lines[2].starts_with("middle"));
        assert!(lines[3].starts_with("older"));
    }

    #[test]
    fn test_tie_on_update_time_keeps_fetch_order() {
        let output = render(&[descriptor("first", 10), descriptor("second", 10)]);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("first"));
        assert!(lines[2].starts_with("second"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let output = render(&[descriptor("short", 1), descriptor("much-longer-name", 2)]);

        let lines: Vec<&str> = output.lines().collect();
        let header_visibility = lines[0].find("VISIBILITY").unwrap();
        for line in &lines[1..] {
            assert_eq!(&line[header_visibility..header_visibility + 6], "public");
        }
    }
}
