//! Shared domain types
//!
//! Types that cross crate boundaries: the ingest parser produces
//! [`EquipmentFields`] values and the server persists them.

use serde::{Deserialize, Serialize};

/// One equipment record's field values, independent of any dataset or
/// database identity.
///
/// The `equipment_type` field serializes as `type` (a Rust keyword).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentFields {
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub material: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_type_serializes_as_type() {
        let fields = EquipmentFields {
            name: "Pump-1".to_string(),
            equipment_type: "Pump".to_string(),
            material: "Steel".to_string(),
            flowrate: 120.0,
            pressure: 5.2,
            temperature: 110.0,
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["type"], "Pump");
        assert!(json.get("equipment_type").is_none());
    }
}
