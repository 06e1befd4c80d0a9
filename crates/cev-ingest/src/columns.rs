//! Header column resolution
//!
//! Each logical equipment field maps to an ordered list of candidate header
//! names, tried in priority order. Matching is case-sensitive against the
//! whitespace-trimmed header cell; the first candidate that matches wins.

use csv::StringRecord;

/// Candidate header names for the equipment name column, in priority order.
pub const NAME_COLUMNS: &[&str] = &["Equipment Name", "name"];

/// Candidate header names for the equipment type column, in priority order.
pub const TYPE_COLUMNS: &[&str] = &["Type", "type"];

/// Candidate header names for the material column.
pub const MATERIAL_COLUMNS: &[&str] = &["Material"];

/// Candidate header names for the flowrate column.
pub const FLOWRATE_COLUMNS: &[&str] = &["Flowrate"];

/// Candidate header names for the pressure column.
pub const PRESSURE_COLUMNS: &[&str] = &["Pressure"];

/// Candidate header names for the temperature column.
pub const TEMPERATURE_COLUMNS: &[&str] = &["Temperature"];

/// Resolved column indexes for one parsed header row.
///
/// `None` means the column is absent from the input. Absence is not an error
/// here; the parser decides per field whether a missing column defaults or
/// invalidates the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub equipment_type: Option<usize>,
    pub material: Option<usize>,
    pub flowrate: Option<usize>,
    pub pressure: Option<usize>,
    pub temperature: Option<usize>,
}

impl ColumnMap {
    /// Resolve column indexes from a header record.
    pub fn resolve(headers: &StringRecord) -> Self {
        Self {
            name: find_column(headers, NAME_COLUMNS),
            equipment_type: find_column(headers, TYPE_COLUMNS),
            material: find_column(headers, MATERIAL_COLUMNS),
            flowrate: find_column(headers, FLOWRATE_COLUMNS),
            pressure: find_column(headers, PRESSURE_COLUMNS),
            temperature: find_column(headers, TEMPERATURE_COLUMNS),
        }
    }
}

/// Find the index of the first candidate present in the header.
///
/// Candidates are tried in order, so an input carrying both "Equipment Name"
/// and "name" resolves to the former regardless of their positions.
fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h.trim() == *candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn test_resolve_canonical_header() {
        let map = ColumnMap::resolve(&header(&[
            "Equipment Name",
            "Type",
            "Material",
            "Flowrate",
            "Pressure",
            "Temperature",
        ]));

        assert_eq!(map.name, Some(0));
        assert_eq!(map.equipment_type, Some(1));
        assert_eq!(map.material, Some(2));
        assert_eq!(map.flowrate, Some(3));
        assert_eq!(map.pressure, Some(4));
        assert_eq!(map.temperature, Some(5));
    }

    #[test]
    fn test_resolve_lowercase_synonyms() {
        let map = ColumnMap::resolve(&header(&["name", "type", "Flowrate"]));

        assert_eq!(map.name, Some(0));
        assert_eq!(map.equipment_type, Some(1));
        assert_eq!(map.flowrate, Some(2));
        assert_eq!(map.material, None);
    }

    #[test]
    fn test_first_candidate_wins() {
        // Both synonyms present: "Equipment Name" takes priority even though
        // "name" appears first in the record.
        let map = ColumnMap::resolve(&header(&["name", "Equipment Name"]));
        assert_eq!(map.name, Some(1));
    }

    #[test]
    fn test_header_cells_are_trimmed() {
        let map = ColumnMap::resolve(&header(&["  Equipment Name ", " Flowrate"]));
        assert_eq!(map.name, Some(0));
        assert_eq!(map.flowrate, Some(1));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let map = ColumnMap::resolve(&header(&["FLOWRATE", "NAME"]));
        assert_eq!(map.flowrate, None);
        assert_eq!(map.name, None);
    }
}
