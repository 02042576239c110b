//! src/datasets.rs
use crate::store::StoreError;
use anyhow::Context;
use sqlx::PgPool;

/// One week of mortality statistics for a country, split by sex.
/// `d*` columns are weekly death counts per age band, `r*` columns the
/// corresponding mortality coefficients; `split`, `splitsex` and `forecast`
/// record how the source data was prepared.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MortalityRow {
    pub id: i32,
    pub country: String,
    pub year: i32,
    pub week: i32,
    pub sex: String,
    pub d14: f64,
    pub d64: f64,
    pub d74: f64,
    pub d84: f64,
    pub dp: f64,
    pub dall: f64,
    pub r14: f64,
    pub r64: f64,
    pub r74: f64,
    pub r84: f64,
    pub rp: f64,
    pub rall: f64,
    pub split: i32,
    pub splitsex: i32,
    pub forecast: i32,
}

/// Read-only access to the mortality dataset backing the public viewer.
#[async_trait::async_trait]
pub trait TabularSource: Send + Sync {
    /// Returns at most `limit` rows, ordered by id.
    async fn fetch_mortality(&self, limit: i64) -> Result<Vec<MortalityRow>, StoreError>;
}

pub struct PgDatasets {
    pool: PgPool,
}

impl PgDatasets {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TabularSource for PgDatasets {
    #[tracing::instrument(name = "Fetch mortality rows", skip(self))]
    async fn fetch_mortality(&self, limit: i64) -> Result<Vec<MortalityRow>, StoreError> {
        let rows = sqlx::query_as::<_, MortalityRow>(
            r#"
SELECT id, country, year, week, sex,
       d14, d64, d74, d84, dp, dall,
       r14, r64, r74, r84, rp, rall,
       split, splitsex, forecast
FROM mortality
ORDER BY id
LIMIT $1
"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch rows from the mortality table.")
        .map_err(StoreError)?;
        Ok(rows)
    }
}

/// Fixed rows served without a database, used by the API tests.
pub struct InMemoryDatasets {
    rows: Vec<MortalityRow>,
}

impl InMemoryDatasets {
    pub fn new(rows: Vec<MortalityRow>) -> Self {
        Self { rows }
    }

    pub fn with_sample_rows() -> Self {
        let rows = ["Norway", "Sweden"]
            .iter()
            .enumerate()
            .map(|(i, country)| MortalityRow {
                id: i as i32 + 1,
                country: country.to_string(),
                year: 2020,
                week: 14,
                sex: "b".to_string(),
                d14: 1.0,
                d64: 110.0,
                d74: 161.0,
                d84: 253.0,
                dp: 305.0,
                dall: 830.0,
                r14: 0.1,
                r64: 1.7,
                r74: 21.5,
                r84: 64.2,
                rp: 187.9,
                rall: 8.1,
                split: 0,
                splitsex: 0,
                forecast: 1,
            })
            .collect();
        Self::new(rows)
    }
}

#[async_trait::async_trait]
impl TabularSource for InMemoryDatasets {
    async fn fetch_mortality(&self, limit: i64) -> Result<Vec<MortalityRow>, StoreError> {
        Ok(self.rows.iter().take(limit as usize).cloned().collect())
    }
}
