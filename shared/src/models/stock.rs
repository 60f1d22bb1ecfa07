//! Stock reconciliation
//!
//! Stock is never stored. It is rebuilt on every query by replaying the full
//! production, cut-product and shipment history into buckets keyed by product
//! kind, dimensions and color. Replay order is fixed: productions first, then
//! cutting jobs, then shipments, so every shipment sees the buckets it may draw
//! from.
//!
//! Negative totals are kept as they are. They mean more was shipped or cut
//! than was ever produced.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CutProduct, Production, Shipment, ShipmentLine};
use crate::types::{m_to_cm, ColorSpec, ProductKind};

/// Largest length difference (in metres) accepted when a cut shipment has no
/// exact bucket
pub const LENGTH_TOLERANCE_M: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// How `Normal` buckets report their length and area totals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalTotalsPolicy {
    /// Dimensions of one roll, taken from the last production in the bucket
    #[default]
    PerUnit,
    /// Sum over every roll produced, less what was cut or shipped
    RunningSum,
}

impl NormalTotalsPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalTotalsPolicy::PerUnit => "per_unit",
            NormalTotalsPolicy::RunningSum => "running_sum",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "per_unit" => Some(NormalTotalsPolicy::PerUnit),
            "running_sum" => Some(NormalTotalsPolicy::RunningSum),
            _ => None,
        }
    }
}

/// Identity of a stock-keeping unit
///
/// Decimal fields are normalized on construction so `1.50` and `1.5` compare,
/// hash and render identically. Cut lengths are always in metres.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockKey {
    pub kind: ProductKind,
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    /// Piece length, present only for `Cut`
    pub length_m: Option<Decimal>,
    pub color_category: String,
    pub color: String,
}

impl StockKey {
    pub fn normal(thickness_mm: Decimal, width_cm: Decimal, color: ColorSpec) -> Self {
        Self {
            kind: ProductKind::Normal,
            thickness_mm: thickness_mm.normalize(),
            width_cm: width_cm.normalize(),
            length_m: None,
            color_category: color.category,
            color: color.color,
        }
    }

    pub fn cut(
        thickness_mm: Decimal,
        width_cm: Decimal,
        length_m: Decimal,
        color: ColorSpec,
    ) -> Self {
        Self {
            kind: ProductKind::Cut,
            thickness_mm: thickness_mm.normalize(),
            width_cm: width_cm.normalize(),
            length_m: Some(length_m.normalize()),
            color_category: color.category,
            color: color.color,
        }
    }

    fn of_production(p: &Production) -> Self {
        match p.kind {
            ProductKind::Normal => Self::normal(p.thickness_mm, p.width_cm, p.color_spec()),
            ProductKind::Cut => Self::cut(p.thickness_mm, p.width_cm, p.length_m, p.color_spec()),
        }
    }

    fn of_shipment(s: &Shipment) -> Self {
        match &s.line {
            ShipmentLine::Normal { .. } => Self::normal(s.thickness_mm, s.width_cm, s.color_spec()),
            ShipmentLine::Cut { piece_length_m } => {
                Self::cut(s.thickness_mm, s.width_cm, *piece_length_m, s.color_spec())
            }
        }
    }

    /// Same kind and cross-section, length and color aside
    fn shares_section(&self, other: &StockKey) -> bool {
        self.kind == other.kind
            && self.thickness_mm == other.thickness_mm
            && self.width_cm == other.width_cm
    }

    /// Display label, e.g. `1.5mm x 100cm` or `1.5mm x 100cm x 200cm`
    pub fn model_label(&self) -> String {
        match self.length_m {
            Some(length_m) => format!(
                "{}mm x {}cm x {}cm",
                self.thickness_mm,
                self.width_cm,
                m_to_cm(length_m).normalize()
            ),
            None => format!("{}mm x {}cm", self.thickness_mm, self.width_cm),
        }
    }
}

impl fmt::Display for StockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.kind, self.thickness_mm, self.width_cm)?;
        if let Some(length_m) = self.length_m {
            write!(f, "_{}", length_m)?;
        }
        write!(f, "_{}_{}", self.color_category, self.color)
    }
}

/// Current stock of one stock-keeping unit
///
/// For `Normal` buckets the length and area follow the configured
/// [`NormalTotalsPolicy`]. For `Cut` buckets they describe a single piece.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockBucket {
    pub key: String,
    pub kind: ProductKind,
    pub model: String,
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    pub length_cm: Option<Decimal>,
    pub color_category: String,
    pub color: String,
    pub total_length_m: Decimal,
    pub total_area_m2: Decimal,
    pub total_pieces: i64,
}

/// Result of one reconciliation run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StockReport {
    pub buckets: Vec<StockBucket>,
    /// Shipments that matched no bucket and were left out
    pub unmatched_shipments: Vec<Uuid>,
    /// Cut shipments placed through the length tolerance
    pub tolerance_matches: usize,
    /// Cutting jobs whose source roll bucket did not exist
    pub orphan_cuts: Vec<Uuid>,
}

#[derive(Debug, Default, Clone)]
struct Tally {
    pieces: i64,
    unit_length_m: Decimal,
    unit_area_m2: Decimal,
    running_length_m: Decimal,
    running_area_m2: Decimal,
}

impl Tally {
    fn add(&mut self, pieces: i32, length_m: Decimal, area_m2: Decimal) {
        let count = Decimal::from(pieces);
        self.pieces += i64::from(pieces);
        self.running_length_m += length_m * count;
        self.running_area_m2 += area_m2 * count;
    }

    fn remove(&mut self, pieces: i32, length_m: Decimal, area_m2: Decimal) {
        let count = Decimal::from(pieces);
        self.pieces -= i64::from(pieces);
        self.running_length_m -= length_m * count;
        self.running_area_m2 -= area_m2 * count;
    }
}

#[derive(Debug, Default)]
struct StockLedger {
    tallies: BTreeMap<StockKey, Tally>,
    unmatched_shipments: Vec<Uuid>,
    tolerance_matches: usize,
    orphan_cuts: Vec<Uuid>,
}

impl StockLedger {
    fn apply_production(&mut self, p: &Production) {
        let tally = self.tallies.entry(StockKey::of_production(p)).or_default();
        tally.add(p.pieces, p.length_m, p.area_m2);
        tally.unit_length_m = p.length_m;
        tally.unit_area_m2 = p.area_m2;
    }

    fn apply_cut_product(&mut self, cut: &CutProduct) {
        let target = &cut.target;
        let target_key = StockKey::cut(
            target.thickness_mm,
            target.width_cm,
            target.piece_length_m(),
            target.color_spec(),
        );
        self.tallies.entry(target_key).or_default().add(
            target.pieces,
            target.piece_length_m(),
            target.piece_area_m2(),
        );

        let source = &cut.source;
        let source_key =
            StockKey::normal(source.thickness_mm, source.width_cm, source.color_spec());
        match self.tallies.get_mut(&source_key) {
            Some(tally) => tally.remove(cut.consumed_source_units, source.length_m, source.area_m2),
            None => self.orphan_cuts.push(cut.id),
        }
    }

    fn apply_shipment(&mut self, s: &Shipment) {
        let wanted = StockKey::of_shipment(s);
        let Some(key) = self.resolve(&wanted) else {
            self.unmatched_shipments.push(s.id);
            return;
        };
        if key != wanted {
            self.tolerance_matches += 1;
        }

        let Some(tally) = self.tallies.get_mut(&key) else {
            return;
        };
        match &s.line {
            ShipmentLine::Normal { length_m, area_m2 } => tally.remove(s.pieces, *length_m, *area_m2),
            ShipmentLine::Cut { .. } => tally.pieces -= i64::from(s.pieces),
        }
    }

    /// Exact key first, then the closest cut length within tolerance among
    /// buckets of the same thickness and width. Ties go to the first key in order.
    ///
    /// The fallback does not compare color: a Cut shipment whose color has no
    /// bucket of its own draws from any color of that cross-section, and is
    /// counted in `tolerance_matches`.
    fn resolve(&self, wanted: &StockKey) -> Option<StockKey> {
        if self.tallies.contains_key(wanted) {
            return Some(wanted.clone());
        }
        let target = wanted.length_m?;

        self.tallies
            .keys()
            .filter(|candidate| candidate.shares_section(wanted))
            .filter_map(|candidate| {
                let delta = (candidate.length_m? - target).abs();
                (delta <= LENGTH_TOLERANCE_M).then_some((delta, candidate))
            })
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, key)| key.clone())
    }

    fn finish(self, policy: NormalTotalsPolicy) -> StockReport {
        let buckets = self
            .tallies
            .into_iter()
            .map(|(key, tally)| finalize_bucket(key, tally, policy))
            .collect();

        StockReport {
            buckets,
            unmatched_shipments: self.unmatched_shipments,
            tolerance_matches: self.tolerance_matches,
            orphan_cuts: self.orphan_cuts,
        }
    }
}

fn finalize_bucket(key: StockKey, tally: Tally, policy: NormalTotalsPolicy) -> StockBucket {
    let (total_length_m, total_area_m2) = match (key.length_m, policy) {
        (Some(length_m), _) => (length_m, key.width_cm / Decimal::ONE_HUNDRED * length_m),
        (None, NormalTotalsPolicy::PerUnit) => (tally.unit_length_m, tally.unit_area_m2),
        (None, NormalTotalsPolicy::RunningSum) => (tally.running_length_m, tally.running_area_m2),
    };

    StockBucket {
        key: key.to_string(),
        kind: key.kind,
        model: key.model_label(),
        thickness_mm: key.thickness_mm,
        width_cm: key.width_cm,
        length_cm: key.length_m.map(|m| m_to_cm(m).normalize()),
        total_length_m: total_length_m.normalize(),
        total_area_m2: total_area_m2.normalize(),
        total_pieces: tally.pieces,
        color_category: key.color_category,
        color: key.color,
    }
}

/// Replay the three record streams into a stock report
pub fn reconcile(
    productions: &[Production],
    cut_products: &[CutProduct],
    shipments: &[Shipment],
    policy: NormalTotalsPolicy,
) -> StockReport {
    let mut ledger = StockLedger::default();

    for production in productions {
        ledger.apply_production(production);
    }
    for cut in cut_products {
        ledger.apply_cut_product(cut);
    }
    for shipment in shipments {
        ledger.apply_shipment(shipment);
    }

    ledger.finish(policy)
}

/// Current stock, sorted by key
pub fn compute_stock(
    productions: &[Production],
    cut_products: &[CutProduct],
    shipments: &[Shipment],
    policy: NormalTotalsPolicy,
) -> Vec<StockBucket> {
    reconcile(productions, cut_products, shipments, policy).buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CutSource, CutTarget};
    use chrono::{NaiveDate, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn production(thickness: &str, width: &str, pieces: i32) -> Production {
        Production {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            machine: "Makine 1".to_string(),
            thickness_mm: dec(thickness),
            width_cm: dec(width),
            length_m: dec("500"),
            area_m2: dec("500"),
            pieces,
            core_type: "Masura 100".to_string(),
            color_category: "Colorless".to_string(),
            color: "Natural".to_string(),
            kind: ProductKind::Normal,
            created_at: Utc::now(),
        }
    }

    fn shipment(thickness: &str, width: &str, line: ShipmentLine, pieces: i32) -> Shipment {
        Shipment {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            buyer: "Acme Ambalaj".to_string(),
            thickness_mm: dec(thickness),
            width_cm: dec(width),
            line,
            pieces,
            color_category: "Colorless".to_string(),
            color: "Natural".to_string(),
            delivery_note_no: "IRS-001".to_string(),
            vehicle_plate: "34 ABC 123".to_string(),
            driver: "Ali".to_string(),
            departure_time: "08:30".to_string(),
            created_at: Utc::now(),
        }
    }

    fn normal_line() -> ShipmentLine {
        ShipmentLine::Normal {
            length_m: dec("500"),
            area_m2: dec("500"),
        }
    }

    fn cut_line(length_m: &str) -> ShipmentLine {
        ShipmentLine::Cut {
            piece_length_m: dec(length_m),
        }
    }

    fn cut_job(consumed: i32, length_cm: &str, pieces: i32) -> CutProduct {
        CutProduct {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            source: CutSource {
                thickness_mm: dec("1.5"),
                width_cm: dec("100"),
                length_m: dec("500"),
                area_m2: dec("500"),
                color_category: "Colorless".to_string(),
                color: "Natural".to_string(),
            },
            target: CutTarget {
                thickness_mm: dec("1.5"),
                width_cm: dec("100"),
                length_cm: dec(length_cm),
                color_category: "Colorless".to_string(),
                color: "Natural".to_string(),
                pieces,
            },
            consumed_source_units: consumed,
            created_at: Utc::now(),
        }
    }

    fn bucket<'a>(buckets: &'a [StockBucket], kind: ProductKind) -> &'a StockBucket {
        buckets.iter().find(|b| b.kind == kind).unwrap()
    }

    #[test]
    fn test_empty_history_yields_no_stock() {
        let stock = compute_stock(&[], &[], &[], NormalTotalsPolicy::PerUnit);
        assert!(stock.is_empty());
    }

    #[test]
    fn test_single_production_creates_one_bucket() {
        let stock = compute_stock(
            &[production("1.5", "100", 10)],
            &[],
            &[],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].kind, ProductKind::Normal);
        assert_eq!(stock[0].thickness_mm, dec("1.5"));
        assert_eq!(stock[0].width_cm, dec("100"));
        assert_eq!(stock[0].total_pieces, 10);
        assert_eq!(stock[0].key, "Normal_1.5_100_Colorless_Natural");
        assert_eq!(stock[0].model, "1.5mm x 100cm");
    }

    #[test]
    fn test_shipment_decrements_matching_bucket() {
        let stock = compute_stock(
            &[production("1.5", "100", 10)],
            &[],
            &[shipment("1.5", "100", normal_line(), 4)],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].total_pieces, 6);
    }

    #[test]
    fn test_equal_decimals_share_a_bucket() {
        let stock = compute_stock(
            &[production("1.50", "100.0", 3), production("1.5", "100", 2)],
            &[],
            &[],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].total_pieces, 5);
        assert_eq!(stock[0].key, "Normal_1.5_100_Colorless_Natural");
    }

    #[test]
    fn test_cut_job_draws_down_source_and_creates_cut_bucket() {
        let stock = compute_stock(
            &[production("1.5", "100", 10)],
            &[cut_job(1, "200", 10)],
            &[],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock.len(), 2);
        assert_eq!(bucket(&stock, ProductKind::Normal).total_pieces, 9);

        let cut = bucket(&stock, ProductKind::Cut);
        assert_eq!(cut.total_pieces, 10);
        assert_eq!(cut.length_cm, Some(dec("200")));
        assert_eq!(cut.key, "Cut_1.5_100_2_Colorless_Natural");
        assert_eq!(cut.model, "1.5mm x 100cm x 200cm");
        // One piece of 1m x 2m
        assert_eq!(cut.total_area_m2, dec("2"));
        assert_eq!(cut.total_length_m, dec("2"));
    }

    #[test]
    fn test_tolerance_fallback_ignores_color() {
        let mut blue = shipment("1.5", "100", cut_line("2.0"), 4);
        blue.color_category = "Colored".to_string();
        blue.color = "Blue".to_string();

        let report = reconcile(
            &[production("1.5", "100", 10)],
            &[cut_job(1, "200", 10)],
            &[blue],
            NormalTotalsPolicy::PerUnit,
        );

        let cut = bucket(&report.buckets, ProductKind::Cut);
        assert_eq!(cut.color, "Natural");
        assert_eq!(cut.total_pieces, 6);
        assert_eq!(report.tolerance_matches, 1);
        assert!(report.unmatched_shipments.is_empty());
        assert_eq!(report.buckets.len(), 2);
    }

    #[test]
    fn test_cut_shipment_matches_exact_length() {
        let stock = compute_stock(
            &[production("1.5", "100", 10)],
            &[cut_job(1, "200", 10)],
            &[shipment("1.5", "100", cut_line("2.0"), 5)],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(bucket(&stock, ProductKind::Cut).total_pieces, 5);
    }

    #[test]
    fn test_cut_shipment_matches_within_tolerance() {
        let report = reconcile(
            &[production("1.5", "100", 10)],
            &[cut_job(1, "200", 10)],
            &[shipment("1.5", "100", cut_line("1.995"), 5)],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(bucket(&report.buckets, ProductKind::Cut).total_pieces, 5);
        assert_eq!(report.tolerance_matches, 1);
        assert!(report.unmatched_shipments.is_empty());
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let stock = compute_stock(
            &[],
            &[cut_job(0, "200", 10)],
            &[shipment("1.5", "100", cut_line("2.01"), 3)],
            NormalTotalsPolicy::PerUnit,
        );
        assert_eq!(bucket(&stock, ProductKind::Cut).total_pieces, 7);

        let stock = compute_stock(
            &[],
            &[cut_job(0, "200", 10)],
            &[shipment("1.5", "100", cut_line("2.02"), 3)],
            NormalTotalsPolicy::PerUnit,
        );
        assert_eq!(bucket(&stock, ProductKind::Cut).total_pieces, 10);
    }

    #[test]
    fn test_tolerance_prefers_closest_length() {
        // 199cm and 200.5cm are both within 1cm of 199.8cm; 200.5 is closer
        let stock = compute_stock(
            &[],
            &[cut_job(0, "199", 10), cut_job(0, "200.5", 10)],
            &[shipment("1.5", "100", cut_line("1.998"), 4)],
            NormalTotalsPolicy::PerUnit,
        );

        let by_length = |cm: &str| {
            stock
                .iter()
                .find(|b| b.length_cm == Some(dec(cm)))
                .unwrap()
                .total_pieces
        };
        assert_eq!(by_length("199"), 10);
        assert_eq!(by_length("200.5"), 6);
    }

    #[test]
    fn test_tolerance_requires_same_thickness_and_width() {
        let report = reconcile(
            &[],
            &[cut_job(0, "200", 10)],
            &[shipment("2", "100", cut_line("2"), 5)],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(bucket(&report.buckets, ProductKind::Cut).total_pieces, 10);
        assert_eq!(report.unmatched_shipments.len(), 1);
    }

    #[test]
    fn test_unmatched_shipment_changes_nothing() {
        let productions = [production("1.5", "100", 10)];
        let before = compute_stock(&productions, &[], &[], NormalTotalsPolicy::RunningSum);

        let stray = shipment("3", "120", normal_line(), 4);
        let report = reconcile(
            &productions,
            &[],
            std::slice::from_ref(&stray),
            NormalTotalsPolicy::RunningSum,
        );

        assert_eq!(report.buckets, before);
        assert_eq!(report.unmatched_shipments, vec![stray.id]);
    }

    #[test]
    fn test_over_shipment_goes_negative() {
        let stock = compute_stock(
            &[production("1.5", "100", 2)],
            &[],
            &[shipment("1.5", "100", normal_line(), 5)],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock[0].total_pieces, -3);
    }

    #[test]
    fn test_cut_without_source_bucket_is_reported() {
        let cut = cut_job(2, "150", 8);
        let report = reconcile(&[], std::slice::from_ref(&cut), &[], NormalTotalsPolicy::PerUnit);

        assert_eq!(report.buckets.len(), 1);
        assert_eq!(report.buckets[0].kind, ProductKind::Cut);
        assert_eq!(report.orphan_cuts, vec![cut.id]);
    }

    #[test]
    fn test_per_unit_policy_keeps_last_roll_dimensions() {
        let mut second = production("1.5", "100", 4);
        second.length_m = dec("600");
        second.area_m2 = dec("600");

        let stock = compute_stock(
            &[production("1.5", "100", 10), second],
            &[cut_job(1, "200", 10)],
            &[shipment("1.5", "100", normal_line(), 3)],
            NormalTotalsPolicy::PerUnit,
        );

        let normal = bucket(&stock, ProductKind::Normal);
        assert_eq!(normal.total_pieces, 10);
        assert_eq!(normal.total_length_m, dec("600"));
        assert_eq!(normal.total_area_m2, dec("600"));
    }

    #[test]
    fn test_running_sum_policy_nets_all_movements() {
        // 10 rolls of 500m/500m², 1 roll cut, 3 rolls shipped => 6 rolls left
        let stock = compute_stock(
            &[production("1.5", "100", 10)],
            &[cut_job(1, "200", 10)],
            &[shipment("1.5", "100", normal_line(), 3)],
            NormalTotalsPolicy::RunningSum,
        );

        let normal = bucket(&stock, ProductKind::Normal);
        assert_eq!(normal.total_pieces, 6);
        assert_eq!(normal.total_length_m, dec("3000"));
        assert_eq!(normal.total_area_m2, dec("3000"));
    }

    #[test]
    fn test_legacy_blank_colors_bucket_with_defaults() {
        let mut legacy = production("1.5", "100", 1);
        legacy.color_category = String::new();
        legacy.color = " ".to_string();

        let stock = compute_stock(
            &[legacy, production("1.5", "100", 2)],
            &[],
            &[],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].total_pieces, 3);
        assert_eq!(stock[0].color_category, "Colorless");
        assert_eq!(stock[0].color, "Natural");
    }

    #[test]
    fn test_colors_split_buckets() {
        let mut blue = production("1.5", "100", 1);
        blue.color_category = "Renkli".to_string();
        blue.color = "Mavi".to_string();

        let stock = compute_stock(
            &[blue, production("1.5", "100", 2)],
            &[],
            &[],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock.len(), 2);
    }

    #[test]
    fn test_cut_production_joins_cut_job_bucket() {
        let mut cut_run = production("1.5", "100", 4);
        cut_run.kind = ProductKind::Cut;
        cut_run.length_m = dec("2.00");

        let stock = compute_stock(
            &[cut_run],
            &[cut_job(0, "200", 10)],
            &[],
            NormalTotalsPolicy::PerUnit,
        );

        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].total_pieces, 14);
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(
            NormalTotalsPolicy::from_str("running_sum"),
            Some(NormalTotalsPolicy::RunningSum)
        );
        assert_eq!(NormalTotalsPolicy::PerUnit.as_str(), "per_unit");
        assert_eq!(NormalTotalsPolicy::from_str("sum"), None);
        assert_eq!(LENGTH_TOLERANCE_M, dec("0.01"));
    }
}
