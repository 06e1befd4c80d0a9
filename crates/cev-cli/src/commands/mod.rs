//! CLI subcommand implementations

pub mod datasets;
pub mod export;
pub mod login;
pub mod report;
pub mod status;
pub mod summary;
pub mod upload;

use crate::api::types::DatasetSummary;
use comfy_table::{presets::UTF8_FULL, Table};

/// Render dataset summaries as a terminal table.
pub(crate) fn summary_table(summaries: &[DatasetSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header([
        "ID",
        "Name",
        "Uploaded",
        "Count",
        "Avg Flowrate",
        "Avg Pressure",
        "Avg Temperature",
    ]);

    for summary in summaries {
        table.add_row([
            summary.id.to_string(),
            summary.name.clone(),
            summary.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
            summary.equipment_count.to_string(),
            format!("{:.2}", summary.avg_flowrate),
            format!("{:.2}", summary.avg_pressure),
            format!("{:.2}", summary.avg_temperature),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[test]
    fn test_summary_table_renders_rows() {
        let summaries = vec![DatasetSummary {
            id: Uuid::new_v4(),
            name: "test.csv".to_string(),
            uploaded_at: Utc::now(),
            equipment_count: 2,
            avg_flowrate: 107.5,
            avg_pressure: 6.8,
            avg_temperature: 102.5,
            type_distribution: HashMap::new(),
        }];

        let rendered = summary_table(&summaries).to_string();
        assert!(rendered.contains("test.csv"));
        assert!(rendered.contains("107.50"));
    }
}
