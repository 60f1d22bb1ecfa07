//! Stock service: loads the record streams and runs reconciliation

use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::cut_product::CutProductRow;
use crate::services::production::ProductionRow;
use crate::services::shipment::ShipmentRow;
use shared::models::{
    reconcile, CutProduct, NormalTotalsPolicy, Production, Shipment, StockBucket, StockReport,
};

/// Stock service computing current inventory from the event history
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
    policy: NormalTotalsPolicy,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool, policy: NormalTotalsPolicy) -> Self {
        Self { db, policy }
    }

    /// Current stock, one bucket per stock-keeping unit
    pub async fn compute_stock(&self) -> AppResult<Vec<StockBucket>> {
        Ok(self.report().await?.buckets)
    }

    /// Full reconciliation run including diagnostics
    pub async fn report(&self) -> AppResult<StockReport> {
        let productions = self.load_productions().await?;
        let cut_products = self.load_cut_products().await?;
        let shipments = self.load_shipments().await?;

        let report = reconcile(&productions, &cut_products, &shipments, self.policy);

        tracing::debug!(
            productions = productions.len(),
            cut_products = cut_products.len(),
            shipments = shipments.len(),
            buckets = report.buckets.len(),
            tolerance_matches = report.tolerance_matches,
            policy = self.policy.as_str(),
            "Stock reconciled"
        );
        if !report.unmatched_shipments.is_empty() {
            tracing::warn!(
                count = report.unmatched_shipments.len(),
                ids = ?report.unmatched_shipments,
                "Shipments matched no stock bucket"
            );
        }
        if !report.orphan_cuts.is_empty() {
            tracing::warn!(
                count = report.orphan_cuts.len(),
                ids = ?report.orphan_cuts,
                "Cutting jobs drew from a roll bucket that does not exist"
            );
        }

        Ok(report)
    }

    /// Render rows as CSV with a header line
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    // Oldest first, so "last seen" per-unit dimensions are the newest production
    async fn load_productions(&self) -> AppResult<Vec<Production>> {
        let rows = sqlx::query_as::<_, ProductionRow>(
            r#"
            SELECT id, date, machine, thickness_mm, width_cm, length_m, area_m2, pieces,
                   core_type, color_category, color, kind, created_at
            FROM productions
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Production::from).collect())
    }

    async fn load_cut_products(&self) -> AppResult<Vec<CutProduct>> {
        let rows = sqlx::query_as::<_, CutProductRow>(
            r#"
            SELECT id, date, source_thickness_mm, source_width_cm, source_length_m, source_area_m2,
                   source_color_category, source_color, target_thickness_mm, target_width_cm,
                   target_length_cm, target_color_category, target_color, target_pieces,
                   consumed_source_units, created_at
            FROM cut_products
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CutProduct::from).collect())
    }

    async fn load_shipments(&self) -> AppResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, date, buyer, kind, thickness_mm, width_cm, length_m, area_m2, pieces,
                   color_category, color, delivery_note_no, vehicle_plate, driver, departure_time,
                   created_at
            FROM shipments
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Shipment::from).collect())
    }
}
