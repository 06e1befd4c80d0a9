//! Equipment types shared across commands and queries

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An equipment row as persisted and serialized
///
/// `equipment_type` is the `type` column on the wire (a Rust keyword).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EquipmentRow {
    pub id: Uuid,
    pub dataset_id: Uuid,
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
        let row = EquipmentRow {
            id: Uuid::new_v4(),
            dataset_id: Uuid::new_v4(),
            name: "Pump-1".to_string(),
            equipment_type: "Pump".to_string(),
            material: "Steel".to_string(),
            flowrate: 120.0,
            pressure: 5.2,
            temperature: 110.0,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "Pump");
        assert!(json.get("equipment_type").is_none());
    }
}
