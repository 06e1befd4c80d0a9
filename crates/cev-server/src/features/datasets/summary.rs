//! Aggregate summary computation
//!
//! The single place that turns a dataset row into its derived summary.
//! Ingest responses, the recent listing, the summary endpoint, and the PDF
//! report all go through [`summarize`], so every caller observes the same
//! aggregation semantics.

use sqlx::PgPool;

use super::types::{DatasetRecord, DatasetSummary};

#[derive(Debug, sqlx::FromRow)]
struct AggregateRow {
    equipment_count: i64,
    avg_flowrate: f64,
    avg_pressure: f64,
    avg_temperature: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct TypeCountRow {
    equipment_type: String,
    count: i64,
}

/// Compute the aggregate summary for one dataset from its current rows.
///
/// `COALESCE(AVG(..), 0)` makes empty datasets report zero averages rather
/// than null, matching the wire contract.
pub(crate) async fn summarize(
    pool: &PgPool,
    dataset: DatasetRecord,
) -> Result<DatasetSummary, sqlx::Error> {
    let aggregate = sqlx::query_as::<_, AggregateRow>(
        r#"
        SELECT
            COUNT(*) AS equipment_count,
            COALESCE(AVG(flowrate), 0)::DOUBLE PRECISION AS avg_flowrate,
            COALESCE(AVG(pressure), 0)::DOUBLE PRECISION AS avg_pressure,
            COALESCE(AVG(temperature), 0)::DOUBLE PRECISION AS avg_temperature
        FROM equipment
        WHERE dataset_id = $1
        "#,
    )
    .bind(dataset.id)
    .fetch_one(pool)
    .await?;

    let type_counts = sqlx::query_as::<_, TypeCountRow>(
        r#"
        SELECT equipment_type, COUNT(*) AS count
        FROM equipment
        WHERE dataset_id = $1
        GROUP BY equipment_type
        "#,
    )
    .bind(dataset.id)
    .fetch_all(pool)
    .await?;

    Ok(DatasetSummary {
        id: dataset.id,
        name: dataset.name,
        uploaded_at: dataset.uploaded_at,
        equipment_count: aggregate.equipment_count,
        avg_flowrate: aggregate.avg_flowrate,
        avg_pressure: aggregate.avg_pressure,
        avg_temperature: aggregate.avg_temperature,
        type_distribution: type_counts
            .into_iter()
            .map(|t| (t.equipment_type, t.count))
            .collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn insert_dataset(pool: &PgPool, name: &str) -> DatasetRecord {
        sqlx::query_as::<_, DatasetRecord>(
            "INSERT INTO datasets (name) VALUES ($1) RETURNING id, name, uploaded_at",
        )
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn insert_equipment(
        pool: &PgPool,
        dataset_id: Uuid,
        name: &str,
        equipment_type: &str,
        flowrate: f64,
        pressure: f64,
        temperature: f64,
    ) {
        sqlx::query(
            r#"
            INSERT INTO equipment
                (dataset_id, name, equipment_type, material, flowrate, pressure, temperature)
            VALUES ($1, $2, $3, '', $4, $5, $6)
            "#,
        )
        .bind(dataset_id)
        .bind(name)
        .bind(equipment_type)
        .bind(flowrate)
        .bind(pressure)
        .bind(temperature)
        .execute(pool)
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_empty_dataset_reports_zeros(pool: PgPool) {
        let dataset = insert_dataset(&pool, "empty.csv").await;

        let summary = summarize(&pool, dataset).await.unwrap();

        assert_eq!(summary.equipment_count, 0);
        assert_eq!(summary.avg_flowrate, 0.0);
        assert_eq!(summary.avg_pressure, 0.0);
        assert_eq!(summary.avg_temperature, 0.0);
        assert!(summary.type_distribution.is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_average_is_exact(pool: PgPool) {
        let dataset = insert_dataset(&pool, "avg.csv").await;
        insert_equipment(&pool, dataset.id, "Pump-1", "Pump", 120.0, 5.2, 110.0).await;
        insert_equipment(&pool, dataset.id, "Compressor-1", "Compressor", 95.0, 8.4, 95.0).await;

        let summary = summarize(&pool, dataset).await.unwrap();

        assert_eq!(summary.equipment_count, 2);
        assert_eq!(summary.avg_flowrate, 107.5);
        assert!((summary.avg_pressure - 6.8).abs() < 1e-9);
        assert_eq!(summary.avg_temperature, 102.5);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_type_distribution_counts_by_type(pool: PgPool) {
        let dataset = insert_dataset(&pool, "types.csv").await;
        insert_equipment(&pool, dataset.id, "P1", "Pump", 1.0, 1.0, 1.0).await;
        insert_equipment(&pool, dataset.id, "P2", "Pump", 1.0, 1.0, 1.0).await;
        insert_equipment(&pool, dataset.id, "C1", "Compressor", 1.0, 1.0, 1.0).await;

        let summary = summarize(&pool, dataset).await.unwrap();

        assert_eq!(summary.type_distribution.len(), 2);
        assert_eq!(summary.type_distribution["Pump"], 2);
        assert_eq!(summary.type_distribution["Compressor"], 1);
    }
}
