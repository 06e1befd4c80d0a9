//! Dataset types shared across commands and queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A dataset row as persisted
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatasetRecord {
    pub id: Uuid,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Aggregate summary for one dataset
///
/// Always recomputed from the current equipment rows on read; never cached
/// or persisted. Averages are 0 (not null) for empty datasets, and the type
/// distribution omits types with no rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
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
