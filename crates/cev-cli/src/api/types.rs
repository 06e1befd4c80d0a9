//! API response types
//!
//! Mirrors of the server's wire shapes, deserialization-only.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Success envelope wrapping every JSON response
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Error envelope returned on failures
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Aggregate summary for one dataset
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSummary {
    pub id: Uuid,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub equipment_count: i64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    pub type_distribution: HashMap<String, i64>,
}

/// Result of uploading a CSV
#[derive(Debug, Clone, Deserialize)]
pub struct IngestResult {
    pub dataset: DatasetSummary,
    pub created: i64,
}

/// Issued API token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenData {
    pub token: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_deserializes_from_server_shape() {
        let json = r#"{
            "success": true,
            "data": {
                "id": "8c4f7d82-54d5-4f80-9e6b-6e9f6b1f2a3c",
                "name": "test.csv",
                "uploaded_at": "2025-01-18T12:00:00Z",
                "equipment_count": 2,
                "avg_flowrate": 107.5,
                "avg_pressure": 6.8,
                "avg_temperature": 102.5,
                "type_distribution": {"Pump": 1, "Compressor": 1}
            }
        }"#;

        let response: ApiResponse<DatasetSummary> = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.data.equipment_count, 2);
        assert_eq!(response.data.type_distribution["Pump"], 1);
    }

    #[test]
    fn test_error_envelope_deserializes() {
        let json = r#"{"success": false, "error": {"code": "NOT_FOUND", "message": "gone"}}"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.code, "NOT_FOUND");
    }
}
