//! PDF report rendering
//!
//! Renders a per-dataset tabular report: title, upload timestamp, summary
//! lines, and the full equipment table with a bold header row at the top of
//! every page.
//!
//! Rendering is an optional capability. The renderer is constructed from an
//! explicit font source probed at startup; when the fonts are absent it
//! stays constructible and every render reports
//! [`ReportError::Unavailable`], a recoverable condition callers map to a
//! distinct status instead of a crash. [`ReportRenderer::disabled`] builds
//! the unavailable state directly so tests can exercise both sides.

use std::path::PathBuf;

use genpdf::{elements, fonts, style, Element};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::features::datasets::types::DatasetSummary;
use cev_common::EquipmentFields;

/// Equipment rows per report page. Each chunk starts with a fresh header
/// row, so the table header appears on every page of the document.
const ROWS_PER_PAGE: usize = 28;

/// Report rendering failures
#[derive(Debug, Error)]
pub enum ReportError {
    /// The rendering capability is not present in this runtime (fonts
    /// missing). Distinct from not-found and from render failures.
    #[error("PDF generation not available (report fonts missing)")]
    Unavailable,
    /// Layout or write failure while building the document.
    #[error("Report rendering failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone)]
struct FontSource {
    dir: PathBuf,
    family: String,
}

/// Renders dataset reports as PDF documents.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    fonts: Option<FontSource>,
}

impl ReportRenderer {
    /// Probe the configured font directory and build a renderer.
    ///
    /// A missing or unloadable font family downgrades the renderer to the
    /// unavailable state rather than failing startup.
    pub fn from_config(config: &ReportConfig) -> Self {
        match fonts::from_files(&config.font_dir, &config.font_family, None) {
            Ok(_) => {
                info!(
                    font_dir = %config.font_dir.display(),
                    font_family = %config.font_family,
                    "Report fonts loaded, PDF rendering available"
                );
                Self {
                    fonts: Some(FontSource {
                        dir: config.font_dir.clone(),
                        family: config.font_family.clone(),
                    }),
                }
            },
            Err(error) => {
                warn!(
                    font_dir = %config.font_dir.display(),
                    %error,
                    "Report fonts not found, PDF rendering disabled"
                );
                Self { fonts: None }
            },
        }
    }

    /// Build a renderer with the capability absent.
    pub fn disabled() -> Self {
        Self { fonts: None }
    }

    /// Whether PDF rendering is available in this runtime.
    pub fn is_available(&self) -> bool {
        self.fonts.is_some()
    }

    /// Render the report for one dataset.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Unavailable`] - fonts are not present
    /// - [`ReportError::Render`] - document layout or write failure
    pub fn render(
        &self,
        summary: &DatasetSummary,
        rows: &[EquipmentFields],
    ) -> Result<Vec<u8>, ReportError> {
        let source = self.fonts.as_ref().ok_or(ReportError::Unavailable)?;

        // Fonts are loaded per render; the document consumes the family.
        let family = fonts::from_files(&source.dir, &source.family, None)
            .map_err(|_| ReportError::Unavailable)?;

        let mut doc = genpdf::Document::new(family);
        doc.set_title(format!("Dataset Report: {}", summary.name));

        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new(format!("Dataset Report: {}", summary.name))
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.0));

        doc.push(elements::Paragraph::new(format!(
            "Uploaded: {}",
            summary.uploaded_at.to_rfc3339()
        )));
        doc.push(elements::Paragraph::new(format!(
            "Equipment Count: {}",
            summary.equipment_count
        )));
        doc.push(elements::Paragraph::new(format!(
            "Avg Flowrate: {:.2}",
            summary.avg_flowrate
        )));
        doc.push(elements::Paragraph::new(format!(
            "Avg Pressure: {:.2}",
            summary.avg_pressure
        )));
        doc.push(elements::Paragraph::new(format!(
            "Avg Temperature: {:.2}",
            summary.avg_temperature
        )));
        doc.push(elements::Break::new(1.0));

        if rows.is_empty() {
            doc.push(equipment_table(&[])?);
        } else {
            for (page, chunk) in rows.chunks(ROWS_PER_PAGE).enumerate() {
                if page > 0 {
                    doc.push(elements::PageBreak::new());
                }
                doc.push(equipment_table(chunk)?);
            }
        }

        let mut buf = Vec::new();
        doc.render(&mut buf)
            .map_err(|e| ReportError::Render(e.to_string()))?;

        Ok(buf)
    }
}

/// Build one page's table: bold header row plus the chunk's data rows.
fn equipment_table(rows: &[EquipmentFields]) -> Result<elements::TableLayout, ReportError> {
    let mut table = elements::TableLayout::new(vec![3, 2, 2, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for title in ["Name", "Type", "Flowrate", "Pressure", "Temperature"] {
        header.push_element(elements::Paragraph::new(title).styled(style::Effect::Bold));
    }
    header
        .push()
        .map_err(|e| ReportError::Render(e.to_string()))?;

    for row in rows {
        let mut data_row = table.row();
        data_row.push_element(elements::Paragraph::new(row.name.clone()));
        data_row.push_element(elements::Paragraph::new(row.equipment_type.clone()));
        data_row.push_element(elements::Paragraph::new(row.flowrate.to_string()));
        data_row.push_element(elements::Paragraph::new(row.pressure.to_string()));
        data_row.push_element(elements::Paragraph::new(row.temperature.to_string()));
        data_row
            .push()
            .map_err(|e| ReportError::Render(e.to_string()))?;
    }

    Ok(table)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn summary() -> DatasetSummary {
        DatasetSummary {
            id: Uuid::new_v4(),
            name: "sample.csv".to_string(),
            uploaded_at: Utc::now(),
            equipment_count: 1,
            avg_flowrate: 120.0,
            avg_pressure: 5.2,
            avg_temperature: 110.0,
            type_distribution: HashMap::from([("Pump".to_string(), 1)]),
        }
    }

    #[test]
    fn test_disabled_renderer_reports_unavailable() {
        let renderer = ReportRenderer::disabled();
        assert!(!renderer.is_available());

        let result = renderer.render(&summary(), &[]);
        assert!(matches!(result, Err(ReportError::Unavailable)));
    }

    #[test]
    fn test_missing_font_dir_downgrades_to_unavailable() {
        let config = ReportConfig {
            font_dir: PathBuf::from("/nonexistent/font/dir"),
            font_family: "LiberationSans".to_string(),
        };

        let renderer = ReportRenderer::from_config(&config);
        assert!(!renderer.is_available());
        assert!(matches!(
            renderer.render(&summary(), &[]),
            Err(ReportError::Unavailable)
        ));
    }
}
