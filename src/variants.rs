//! Variants and the variant table normalizer.
//!
//! [`normalize()`] turns a [`RawTable`] of string cells into a [`VariantTable`]:
//! rows whose position is not an amino acid coordinate are dropped (and
//! counted), carrier counts are read per configured cohort, and the result is
//! stably sorted by position.

use indexmap::{IndexMap, IndexSet};

use crate::{
    cohorts::CohortConfig, error::LollipopError, traits::GenericVariant, Count, Position,
};

/// Cell values that stand for a missing count.
const MISSING_VALUES: &[&str] = &["", ".", "NA", "NaN", "nan"];

/// One input row, as header → cell.
pub type RawRow = IndexMap<String, String>;

/// An unvalidated variant table, as read from a TSV file.
#[derive(Clone, Debug, Default)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
    /// Rows the reader could not split into the header's columns.
    pub malformed: usize,
}

impl RawTable {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
            malformed: 0,
        }
    }

    /// Add a row from its cells, in header order.
    pub fn push_cells<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let row = self
            .header
            .iter()
            .cloned()
            .zip(cells.into_iter().map(Into::into))
            .collect();
        self.rows.push(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The names of the columns holding each variant's position, exon and label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub position: String,
    pub exon: String,
    pub label: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            position: "AA".to_string(),
            exon: "exon".to_string(),
            label: "variant".to_string(),
        }
    }
}

/// Heterozygous and homozygous carrier counts of one cohort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarrierCounts {
    pub het: Count,
    pub hom: Count,
}

impl CarrierCounts {
    pub fn new(het: Count, hom: Count) -> Self {
        Self { het, hom }
    }

    /// Carriers of either genotype, saturating at [`Count::MAX`].
    pub fn total(&self) -> Count {
        self.het.saturating_add(self.hom)
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

/// A single amino acid level variant.
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    pub position: Position,
    pub exon: String,
    pub label: String,
    pub counts: IndexMap<String, CarrierCounts>,
}

impl Variant {
    pub fn new(position: Position, exon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            position,
            exon: exon.into(),
            label: label.into(),
            counts: IndexMap::new(),
        }
    }

    /// Builder-style method to set one cohort's counts.
    pub fn with_counts(mut self, cohort: impl Into<String>, het: Count, hom: Count) -> Self {
        self.counts.insert(cohort.into(), CarrierCounts::new(het, hom));
        self
    }

    /// The counts for `cohort`; `(0, 0)` if the cohort has no columns.
    pub fn counts(&self, cohort: &str) -> CarrierCounts {
        self.counts.get(cohort).copied().unwrap_or_default()
    }
}

impl GenericVariant for Variant {
    fn position(&self) -> Position {
        self.position
    }
    fn exon(&self) -> &str {
        &self.exon
    }
}

/// The normalized variant table: valid rows only, sorted by position.
#[derive(Clone, Debug, Default)]
pub struct VariantTable {
    variants: Vec<Variant>,
    available_cohorts: IndexSet<String>,
    dropped: usize,
}

impl VariantTable {
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of input rows that were dropped during normalization.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// The largest position in the table.
    pub fn max_position(&self) -> Option<Position> {
        self.variants.last().map(|variant| variant.position)
    }

    /// Check that at least one of `cohort`'s columns was in the input header.
    pub fn require_cohort(&self, cohort: &str) -> Result<(), LollipopError> {
        if self.available_cohorts.contains(cohort) {
            Ok(())
        } else {
            Err(LollipopError::UnknownCohort(cohort.to_string()))
        }
    }
}

/// Coerce a position cell into an amino acid coordinate.
///
/// Integers and integral floats (`"12.0"`) are accepted; anything else,
/// including negative and fractional values, is a [`LollipopError::MalformedRow`].
/// A lollipop axis is a residue index, so `-3` or `12.5` cannot be placed on it
/// even though a general numeric parse would accept them.
pub fn parse_position(value: &str) -> Result<Position, LollipopError> {
    let value = value.trim();
    if let Ok(position) = value.parse::<Position>() {
        return Ok(position);
    }
    match value.parse::<f64>() {
        Ok(x) if x.is_finite() && x.fract() == 0.0 && x >= 0.0 && x <= Position::MAX as f64 => {
            Ok(x as Position)
        }
        _ => Err(LollipopError::MalformedRow(value.to_string())),
    }
}

/// Parse a carrier count cell; missing or unparseable cells count as zero.
pub fn parse_count(value: Option<&String>) -> Count {
    let value = match value {
        Some(value) => value.trim(),
        None => return 0,
    };
    if MISSING_VALUES.contains(&value) {
        return 0;
    }
    value.parse::<Count>().unwrap_or_else(|_| match value.parse::<f64>() {
        Ok(x) if x.is_finite() && x.fract() == 0.0 && x >= 0.0 && x <= Count::MAX as f64 => {
            x as Count
        }
        _ => 0,
    })
}

/// Validate, coerce and stably sort a raw table into a [`VariantTable`].
///
/// The position and exon columns must be in the header; the label column
/// is optional (labels default to empty). Returns
/// [`LollipopError::EmptyDataset`] if no rows survive coercion.
pub fn normalize(
    raw: &RawTable,
    schema: &TableSchema,
    cohorts: &CohortConfig,
) -> Result<VariantTable, LollipopError> {
    for required in [&schema.position, &schema.exon] {
        if !raw.header.contains(required) {
            return Err(LollipopError::MissingColumn(required.clone()));
        }
    }

    let available_cohorts = cohorts
        .iter()
        .filter(|(_, columns)| columns.present_in(&raw.header))
        .map(|(cohort, _)| cohort.clone())
        .collect();

    let mut dropped = raw.malformed;
    let mut variants = Vec::with_capacity(raw.len());
    for row in &raw.rows {
        let cell = row.get(&schema.position).map(String::as_str).unwrap_or("");
        let position = match parse_position(cell) {
            Ok(position) => position,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };
        let exon = row.get(&schema.exon).cloned().unwrap_or_default();
        let label = row.get(&schema.label).cloned().unwrap_or_default();
        let mut variant = Variant::new(position, exon, label);
        for (cohort, columns) in cohorts.iter() {
            let het = parse_count(row.get(&columns.het));
            let hom = columns
                .hom
                .as_ref()
                .map_or(0, |column| parse_count(row.get(column)));
            variant.counts.insert(cohort.clone(), CarrierCounts::new(het, hom));
        }
        variants.push(variant);
    }

    if dropped > 0 {
        log::debug!("dropped {} rows without a numeric position", dropped);
    }
    if variants.is_empty() {
        return Err(LollipopError::EmptyDataset { dropped });
    }

    // Vec::sort_by_key is stable, so ties keep their input order.
    variants.sort_by_key(|variant| variant.position);

    Ok(VariantTable {
        variants,
        available_cohorts,
        dropped,
    })
}
