//! Splitter service that ties loading, planning and exporting together.

use std::path::Path;

use crate::config::SplitterConfig;
use crate::document::PdfDocument;
use crate::error::Result;
use crate::export::SectionExporter;
use crate::report::{SectionRecord, SplitReport};
use crate::splitting::{SplitEngine, SplitPlan};
use crate::types::Section;

/// Whether sections are written to disk or only planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Write one PDF per section.
    Write,
    /// Plan only; report the paths that would be written.
    DryRun,
}

/// Split a PDF into per-section files.
///
/// # Arguments
/// * `source` - Source PDF (relative paths resolve against the config root)
/// * `output_dir` - Directory for section files (created if missing)
/// * `config` - Splitter configuration
///
/// # Returns
/// A `SplitReport` listing every written section.
pub fn split_document(
    source: &Path,
    output_dir: &Path,
    config: &SplitterConfig,
) -> Result<SplitReport> {
    split_document_with(source, output_dir, config, ExportMode::Write, |_, _, _| {})
}

/// Split a PDF, reporting progress after each section.
///
/// `on_section` receives the 0-based ordinal, the section count and the
/// section just handled.
pub fn split_document_with<F>(
    source: &Path,
    output_dir: &Path,
    config: &SplitterConfig,
    mode: ExportMode,
    mut on_section: F,
) -> Result<SplitReport>
where
    F: FnMut(usize, usize, &Section),
{
    config.validate()?;
    config.validate_root()?;

    let source = config.resolve_path(source);
    let output_dir = config.resolve_path(output_dir);

    let document = PdfDocument::open(&source)?;
    let plan = SplitEngine::from_config(config).plan(&document);

    tracing::info!(
        source = %source.display(),
        method = plan.method.as_str(),
        sections = plan.sections.len(),
        dropped = plan.dropped.len(),
        "Planned split"
    );

    let exporter = SectionExporter::new(&output_dir, config.max_title_len);
    if mode == ExportMode::Write {
        exporter.prepare()?;
    }

    let count = plan.sections.len();
    let mut records = Vec::with_capacity(count);
    for (ordinal, section) in plan.sections.iter().enumerate() {
        let path = match mode {
            ExportMode::Write => exporter.write(document.inner(), ordinal, section)?.0,
            ExportMode::DryRun => exporter.path_for(ordinal, section),
        };
        records.push(SectionRecord::new(section, path));
        on_section(ordinal, count, section);
    }

    Ok(build_report(document.path(), exporter.output_dir(), plan, records))
}

fn build_report(
    source: &Path,
    output_dir: &Path,
    plan: SplitPlan,
    sections: Vec<SectionRecord>,
) -> SplitReport {
    SplitReport {
        source: source.to_path_buf(),
        total_pages: plan.total_pages,
        section_count: sections.len(),
        output_dir: output_dir.to_path_buf(),
        method: plan.method,
        sections,
        dropped: plan.dropped,
    }
}
