use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use crate::model::Block;
use crate::store::StoredEvaluation;

/// Export columns, matching the stored-evaluations table:
/// row number, organization, year, overall index, then one column per block.
const HEADER: &str = "#,Organization,Year,Total index,R,P,O,I";

/// Quote a CSV field if it contains a delimiter, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serialize stored records into CSV text, one row per record in the order
/// given (callers pass `Store::ordered()`).
pub fn format_csv(records: &[&StoredEvaluation]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HEADER.to_string());

    for (idx, record) in records.iter().enumerate() {
        let organization = record.organization.as_deref().unwrap_or("");
        let year = record.year.map(|y| y.to_string()).unwrap_or_default();
        lines.push(format!(
            "{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3}",
            idx + 1,
            csv_field(organization),
            year,
            record.total_index,
            record.block_value(Block::R),
            record.block_value(Block::P),
            record.block_value(Block::O),
            record.block_value(Block::I),
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Timestamped default export filename, e.g. sci_index_export_20240131_154500.csv
pub fn default_export_filename() -> String {
    format!("sci_index_export_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write stored records to a CSV file
pub fn write_csv(path: &Path, records: &[&StoredEvaluation]) -> Result<()> {
    fs::write(path, format_csv(records))
        .with_context(|| format!("Failed to write export file at {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn record(id: u64, organization: Option<&str>, year: Option<i32>) -> StoredEvaluation {
        let mut block_values = BTreeMap::new();
        block_values.insert(Block::R, 0.8);
        block_values.insert(Block::P, 0.2);
        block_values.insert(Block::O, 0.5);
        block_values.insert(Block::I, 0.0);
        StoredEvaluation {
            id,
            organization: organization.map(str::to_string),
            year,
            total_index: 0.375,
            block_values,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let csv = format_csv(&[]);
        assert_eq!(csv, "#,Organization,Year,Total index,R,P,O,I\n");
    }

    #[test]
    fn test_row_shape() {
        let rec = record(1, Some("Institute of Physics"), Some(2024));
        let csv = format_csv(&[&rec]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "1,Institute of Physics,2024,0.375,0.800,0.200,0.500,0.000"
        );
    }

    #[test]
    fn test_missing_metadata_yields_empty_cells() {
        let rec = record(1, None, None);
        let csv = format_csv(&[&rec]);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].starts_with("1,,,0.375,"));
    }

    #[test]
    fn test_organization_with_comma_is_quoted() {
        let rec = record(1, Some("Institute of Physics, Tashkent"), Some(2024));
        let csv = format_csv(&[&rec]);
        assert!(csv.contains("\"Institute of Physics, Tashkent\""));
    }

    #[test]
    fn test_organization_with_quote_is_escaped() {
        let rec = record(1, Some("\"Fan\" Institute"), None);
        let csv = format_csv(&[&rec]);
        assert!(csv.contains("\"\"\"Fan\"\" Institute\""));
    }

    #[test]
    fn test_row_numbers_follow_given_order() {
        let a = record(7, Some("A"), Some(2024));
        let b = record(3, Some("B"), Some(2025));
        let csv = format_csv(&[&a, &b]);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].starts_with("1,A,"));
        assert!(lines[2].starts_with("2,B,"));
    }

    #[test]
    fn test_default_filename_shape() {
        let name = default_export_filename();
        assert!(name.starts_with("sci_index_export_"));
        assert!(name.ends_with(".csv"));
    }
}
