//! Input parsing and result display for the urlalive binary

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::constants::output_formats;
use crate::core::error::{LivenessError, Result};
use crate::core::types::{LinkStatus, LivenessResult, ResultMap};
use crate::ui::color::{Colors, colorize, status_color, status_marker};

/// Counts per status for a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub alive: usize,
    pub dead: usize,
    pub invalid: usize,
    pub error: usize,
}

impl Summary {
    pub fn from_results(results: &ResultMap) -> Self {
        let mut summary = Summary {
            total: results.len(),
            ..Default::default()
        };
        for result in results.values() {
            match result.status {
                LinkStatus::Alive => summary.alive += 1,
                LinkStatus::Dead => summary.dead += 1,
                LinkStatus::Invalid => summary.invalid += 1,
                LinkStatus::Error => summary.error += 1,
            }
        }
        summary
    }

    pub fn issues(&self) -> usize {
        self.total - self.alive
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    results: BTreeMap<&'a str, &'a LivenessResult>,
}

/// Read a URL list from a file
pub fn read_url_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        LivenessError::InvalidArgument(format!(
            "Could not read input file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_url_list(&content)
}

/// Parse a URL list, either a JSON array of strings or one URL per line.
///
/// Blank lines and lines starting with `#` are skipped in the line format.
pub fn parse_url_list(content: &str) -> Result<Vec<String>> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with('[') {
        return Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect());
    }

    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    let items = value.as_array().ok_or_else(|| {
        LivenessError::Validation("URL list must be a JSON array of strings".to_string())
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                LivenessError::Validation(format!(
                    "URL list entry {index} is not a string: {item}"
                ))
            })
        })
        .collect()
}

/// Render results as a JSON document with a summary
pub fn render_json(results: &ResultMap) -> Result<String> {
    let report = JsonReport {
        summary: Summary::from_results(results),
        results: results.iter().map(|(url, r)| (url.as_str(), r)).collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Render results as text, one line per URL sorted by URL
pub fn render_text(results: &ResultMap) -> String {
    let mut sorted: Vec<(&String, &LivenessResult)> = results.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (url, result) in sorted {
        let color = status_color(result.status);
        let detail = match (result.status_code, result.description.as_deref()) {
            (Some(code), _) => format!(" {code}"),
            (None, Some(description)) => format!(" ({description})"),
            (None, None) => String::new(),
        };
        out.push_str(&format!(
            "{} {:<7}{} {}\n",
            colorize(status_marker(result.status), color),
            colorize(result.status.as_str(), color),
            detail,
            url
        ));
    }

    let summary = Summary::from_results(results);
    let line = format!(
        "{} checked: {} alive, {} dead, {} invalid, {} error",
        summary.total, summary.alive, summary.dead, summary.invalid, summary.error
    );
    if summary.issues() == 0 {
        out.push_str(&colorize(&line, Colors::BRIGHT_GREEN));
    } else {
        out.push_str(&colorize(
            &format!("{}{}{}", Colors::BOLD, line, Colors::RESET),
            Colors::BRIGHT_RED,
        ));
    }
    out.push('\n');
    out
}

/// Print results in the requested format
pub fn display_results(results: &ResultMap, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => println!("{}", render_json(results)?),
        _ => print!("{}", render_text(results)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;

    fn sample_results() -> ResultMap {
        ResultMap::from([
            ("https://a.test/".to_string(), LivenessResult::alive(200)),
            ("https://b.test/".to_string(), LivenessResult::dead(Some(404))),
            ("ftp://c.test/".to_string(), LivenessResult::invalid()),
            (
                "https://d.test/".to_string(),
                LivenessResult::error(Some("connection refused".to_string())),
            ),
        ])
    }

    #[test]
    fn test_parse_url_list__when_lines() {
        let urls = parse_url_list("https://a.test\n\n  https://b.test  \n# comment\n").unwrap();

        assert_eq!(urls, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_parse_url_list__when_json_array() {
        let urls = parse_url_list(r#"["https://a.test", "/relative"]"#).unwrap();

        assert_eq!(urls, vec!["https://a.test", "/relative"]);
    }

    #[test]
    fn test_parse_url_list__when_json_array_has_non_string() {
        let result = parse_url_list(r#"["https://a.test", 42]"#);

        assert!(matches!(result, Err(LivenessError::Validation(_))));
    }

    #[test]
    fn test_parse_url_list__when_json_malformed() {
        let result = parse_url_list("[\"https://a.test\"");

        assert!(matches!(result, Err(LivenessError::Json(_))));
    }

    #[test]
    fn test_parse_url_list__when_empty() {
        assert!(parse_url_list("").unwrap().is_empty());
        assert!(parse_url_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_read_url_file__when_file_exists() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"https://a.test\nhttps://b.test\n").unwrap();

        let urls = read_url_file(file.path()).unwrap();

        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn test_read_url_file__when_missing() {
        let result = read_url_file("/path/that/does/not/exist.txt");

        assert!(matches!(result, Err(LivenessError::InvalidArgument(_))));
    }

    #[test]
    fn test_summary_from_results() {
        let summary = Summary::from_results(&sample_results());

        assert_eq!(
            summary,
            Summary {
                total: 4,
                alive: 1,
                dead: 1,
                invalid: 1,
                error: 1,
            }
        );
        assert_eq!(summary.issues(), 3);
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample_results()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total"], 4);
        assert_eq!(value["results"]["https://a.test/"]["status"], "alive");
        assert_eq!(value["results"]["https://a.test/"]["statusCode"], 200);
        assert_eq!(value["results"]["https://b.test/"]["statusCode"], 404);
        assert!(value["results"]["ftp://c.test/"].get("statusCode").is_none());
        assert_eq!(
            value["results"]["https://d.test/"]["description"],
            "connection refused"
        );
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_results());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("invalid") && lines[0].ends_with("ftp://c.test/"));
        assert!(lines[1].contains("alive") && lines[1].contains("200"));
        assert!(lines[2].contains("dead") && lines[2].contains("404"));
        assert!(lines[3].contains("(connection refused)"));
        assert_eq!(
            lines[4],
            "4 checked: 1 alive, 1 dead, 1 invalid, 1 error"
        );
    }

    #[test]
    fn test_render_text__when_empty() {
        let text = render_text(&ResultMap::new());

        assert_eq!(text, "0 checked: 0 alive, 0 dead, 0 invalid, 0 error\n");
    }
}
