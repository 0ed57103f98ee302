//! Structured results for cross-process handoff.
//!
//! A successful run serializes as
//! `{ "source", "total_pages", "section_count", "output_dir", "method", "sections": [...] }`;
//! a failed run as `{ "error", "sections": [] }`. Callers tell the two apart
//! by the presence of `error`.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Result, SplitterError};
use crate::splitting::{DroppedEntry, SplitMethod};
use crate::types::Section;

/// Serialization format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// One exported (or planned) section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRecord {
    pub title: String,
    pub start_page: usize,
    pub end_page: usize,
    pub file_path: PathBuf,
    pub page_count: usize,
}

impl SectionRecord {
    /// Build a record for `section` written to `file_path`.
    #[must_use]
    pub fn new(section: &Section, file_path: impl Into<PathBuf>) -> Self {
        Self {
            title: section.title.clone(),
            start_page: section.start_page,
            end_page: section.end_page,
            file_path: file_path.into(),
            page_count: section.page_count(),
        }
    }
}

/// Result of a successful split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub total_pages: usize,
    pub section_count: usize,
    pub output_dir: PathBuf,
    pub method: SplitMethod,
    pub sections: Vec<SectionRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<DroppedEntry>,
}

impl SplitReport {
    /// Serialize in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render(self, format)
    }
}

/// Error payload for a failed split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub sections: Vec<SectionRecord>,
}

impl ErrorReport {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            sections: Vec::new(),
        }
    }

    /// Serialize in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render(self, format)
    }
}

impl From<&SplitterError> for ErrorReport {
    fn from(err: &SplitterError) -> Self {
        Self::new(err.to_string())
    }
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::DropReason;
    use pretty_assertions::assert_eq;

    fn sample_report() -> SplitReport {
        let sections = [Section::new("Intro", 0, 9), Section::new("Body", 10, 29)];
        SplitReport {
            source: PathBuf::from("paper.pdf"),
            total_pages: 30,
            section_count: 2,
            output_dir: PathBuf::from("out"),
            method: SplitMethod::Outline,
            sections: sections
                .iter()
                .enumerate()
                .map(|(i, s)| SectionRecord::new(s, format!("out/{i:03}_{}.pdf", s.title)))
                .collect(),
            dropped: Vec::new(),
        }
    }

    #[test]
    fn test_report_json_shape() {
        let json = sample_report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"], "paper.pdf");
        assert_eq!(value["total_pages"], 30);
        assert_eq!(value["section_count"], 2);
        assert_eq!(value["method"], "outline");
        assert_eq!(value["sections"][1]["title"], "Body");
        assert_eq!(value["sections"][1]["start_page"], 10);
        assert_eq!(value["sections"][1]["end_page"], 29);
        assert_eq!(value["sections"][1]["page_count"], 20);
        assert_eq!(value["sections"][1]["file_path"], "out/001_Body.pdf");
        assert!(value.get("error").is_none());
        assert!(value.get("dropped").is_none());
    }

    #[test]
    fn test_report_lists_dropped_entries() {
        let mut report = sample_report();
        report
            .dropped
            .push(DroppedEntry::new("Ghost", DropReason::UnresolvableDestination));

        let json = report.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dropped"][0]["title"], "Ghost");
        assert_eq!(value["dropped"][0]["reason"], "unresolvable_destination");
    }

    #[test]
    fn test_report_yaml() {
        let yaml = sample_report().render(OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("total_pages: 30"));
        assert!(yaml.contains("method: outline"));
        assert!(yaml.contains("title: Intro"));
    }

    #[test]
    fn test_error_report_shape() {
        let err = SplitterError::SourceUnreadable {
            path: PathBuf::from("missing.pdf"),
            reason: "not found".to_string(),
        };
        let json = ErrorReport::from(&err).render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["error"],
            "Cannot read source document missing.pdf: not found"
        );
        assert_eq!(value["sections"], serde_json::json!([]));
    }
}
