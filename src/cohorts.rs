//! Cohort column conventions and the resolved cohort configuration.
//!
//! Variant tables name their carrier count columns in several incompatible
//! ways, e.g. `ad.Het` / `ad.Hom_A1`, `ad_het` / `ad_hom`, or a bare `case`
//! and `control` count. A [`ColumnConvention`] describes one such scheme, and
//! is resolved once, before any rows are read, into a [`CohortConfig`] that
//! maps each cohort identifier to its concrete [`CohortColumns`].

use indexmap::{IndexMap, IndexSet};
use lazy_static::lazy_static;

use crate::error::LollipopError;

const COHORT_PLACEHOLDER: &str = "{cohort}";

lazy_static! {
    /// The built-in column conventions, keyed by the name used on the command line.
    pub static ref CONVENTIONS: IndexMap<&'static str, ColumnConvention> = {
        let mut conventions = IndexMap::new();
        conventions.insert(
            "dot",
            ColumnConvention::Template {
                het: "{cohort}.Het".to_string(),
                hom: "{cohort}.Hom_A1".to_string(),
            },
        );
        conventions.insert(
            "underscore",
            ColumnConvention::Template {
                het: "{cohort}_het".to_string(),
                hom: "{cohort}_hom".to_string(),
            },
        );
        conventions.insert(
            "prefixed",
            ColumnConvention::Template {
                het: "het_{cohort}".to_string(),
                hom: "hom_{cohort}".to_string(),
            },
        );
        conventions.insert(
            "case-control",
            ColumnConvention::SingleCount {
                columns: vec!["case".to_string(), "control".to_string()],
            },
        );
        conventions
    };
}

/// The order the two carrier counts appear in a variant's label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelOrder {
    /// `label (hom / het)`
    #[default]
    HomHet,
    /// `label (het / hom)`
    HetHom,
}

/// The concrete columns holding one cohort's carrier counts.
///
/// Cohorts with a single count column (e.g. `case`) have no homozygous
/// column; their count is read as heterozygous and homozygous is zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CohortColumns {
    pub het: String,
    pub hom: Option<String>,
    pub order: LabelOrder,
}

impl CohortColumns {
    pub fn new(het: impl Into<String>, hom: Option<String>, order: LabelOrder) -> Self {
        Self {
            het: het.into(),
            hom,
            order,
        }
    }

    /// Whether any of this cohort's columns appear in `header`.
    pub fn present_in(&self, header: &[String]) -> bool {
        header.iter().any(|column| {
            *column == self.het || self.hom.as_deref() == Some(column.as_str())
        })
    }
}

/// A scheme for naming carrier count columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnConvention {
    /// Heterozygous and homozygous columns built from templates containing
    /// a `{cohort}` placeholder, e.g. `{cohort}.Het`.
    Template { het: String, hom: String },
    /// One count column per cohort, named after the cohort itself.
    SingleCount { columns: Vec<String> },
}

impl Default for ColumnConvention {
    fn default() -> Self {
        CONVENTIONS["dot"].clone()
    }
}

impl ColumnConvention {
    /// Look up one of the built-in conventions by name.
    pub fn named(name: &str) -> Result<Self, LollipopError> {
        CONVENTIONS
            .get(name)
            .cloned()
            .ok_or_else(|| LollipopError::UnknownConvention(name.to_string()))
    }

    /// Build a template convention, checking both templates carry exactly one
    /// `{cohort}` placeholder.
    pub fn template(het: &str, hom: &str) -> Result<Self, LollipopError> {
        for template in [het, hom] {
            if template.matches(COHORT_PLACEHOLDER).count() != 1 {
                return Err(LollipopError::InvalidTemplate(template.to_string()));
            }
        }
        Ok(ColumnConvention::Template {
            het: het.to_string(),
            hom: hom.to_string(),
        })
    }

    /// The columns this convention uses for `cohort`.
    pub fn columns_for(&self, cohort: &str, order: LabelOrder) -> CohortColumns {
        match self {
            ColumnConvention::Template { het, hom } => CohortColumns::new(
                het.replace(COHORT_PLACEHOLDER, cohort),
                Some(hom.replace(COHORT_PLACEHOLDER, cohort)),
                order,
            ),
            ColumnConvention::SingleCount { .. } => CohortColumns::new(cohort, None, order),
        }
    }

    /// Detect the cohorts present in a header, in order of first appearance.
    pub fn detect_cohorts(&self, header: &[String]) -> IndexSet<String> {
        match self {
            ColumnConvention::Template { het, hom } => header
                .iter()
                .filter_map(|column| {
                    match_template(het, column).or_else(|| match_template(hom, column))
                })
                .collect(),
            ColumnConvention::SingleCount { columns } => header
                .iter()
                .filter(|column| columns.contains(*column))
                .cloned()
                .collect(),
        }
    }
}

/// Extract the cohort name from `column` if it fits `template`.
fn match_template(template: &str, column: &str) -> Option<String> {
    let (prefix, suffix) = template.split_once(COHORT_PLACEHOLDER)?;
    if column.len() <= prefix.len() + suffix.len() {
        return None;
    }
    column
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .map(|cohort| cohort.to_string())
}

/// The resolved mapping of cohort identifier to count columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CohortConfig {
    cohorts: IndexMap<String, CohortColumns>,
}

impl CohortConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `convention` for an explicit list of cohort identifiers.
    pub fn from_convention(
        convention: &ColumnConvention,
        cohorts: &[String],
        order: LabelOrder,
    ) -> Self {
        let mut config = Self::new();
        for cohort in cohorts {
            config.insert(cohort.clone(), convention.columns_for(cohort, order));
        }
        config
    }

    /// Resolve `convention` for every cohort detected in `header`.
    pub fn from_header(
        convention: &ColumnConvention,
        header: &[String],
        order: LabelOrder,
    ) -> Self {
        let cohorts: Vec<String> = convention.detect_cohorts(header).into_iter().collect();
        Self::from_convention(convention, &cohorts, order)
    }

    pub fn insert(&mut self, cohort: impl Into<String>, columns: CohortColumns) {
        self.cohorts.insert(cohort.into(), columns);
    }

    /// Get the columns of a cohort, or [`LollipopError::UnknownCohort`].
    pub fn columns(&self, cohort: &str) -> Result<&CohortColumns, LollipopError> {
        self.cohorts
            .get(cohort)
            .ok_or_else(|| LollipopError::UnknownCohort(cohort.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CohortColumns)> {
        self.cohorts.iter()
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which cohort (or cohort pair) a rendering shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CohortView {
    /// One cohort. If a `reference` cohort is given, clusters with no
    /// carriers in it are flagged.
    Single {
        cohort: String,
        reference: Option<String>,
    },
    /// The composite case/control view: a variant counts if it has carriers
    /// in either cohort, labels read `(case / control)`, and the control
    /// cohort is the reference.
    CaseControl { case: String, control: String },
}

impl CohortView {
    pub fn single(cohort: impl Into<String>) -> Self {
        CohortView::Single {
            cohort: cohort.into(),
            reference: None,
        }
    }

    pub fn with_reference(cohort: impl Into<String>, reference: impl Into<String>) -> Self {
        CohortView::Single {
            cohort: cohort.into(),
            reference: Some(reference.into()),
        }
    }

    pub fn case_control(case: impl Into<String>, control: impl Into<String>) -> Self {
        CohortView::CaseControl {
            case: case.into(),
            control: control.into(),
        }
    }

    /// The reference cohort, if this view has one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            CohortView::Single { reference, .. } => reference.as_deref(),
            CohortView::CaseControl { control, .. } => Some(control.as_str()),
        }
    }

    /// Every cohort this view reads counts from.
    pub fn cohorts(&self) -> Vec<&str> {
        match self {
            CohortView::Single { cohort, reference } => {
                let mut cohorts = vec![cohort.as_str()];
                cohorts.extend(reference.as_deref());
                cohorts
            }
            CohortView::CaseControl { case, control } => vec![case.as_str(), control.as_str()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_dot_convention_columns() {
        let convention = ColumnConvention::named("dot").unwrap();
        let columns = convention.columns_for("ad", LabelOrder::HomHet);
        assert_eq!(columns.het, "ad.Het");
        assert_eq!(columns.hom.as_deref(), Some("ad.Hom_A1"));
    }

    #[test]
    fn test_unknown_convention() {
        let result = ColumnConvention::named("camel");
        assert!(matches!(result, Err(LollipopError::UnknownConvention(_))));
    }

    #[test]
    fn test_invalid_template() {
        assert!(matches!(
            ColumnConvention::template("het", "{cohort}.hom"),
            Err(LollipopError::InvalidTemplate(_))
        ));
        assert!(ColumnConvention::template("{cohort}:het", "{cohort}:hom").is_ok());
    }

    #[test]
    fn test_detect_cohorts_template() {
        let convention = ColumnConvention::default();
        let cols = header(&[
            "AA", "variant", "exon", "ad.Het", "ad.Hom_A1", "ftd.Het", "all.Hom_A1", ".Het",
        ]);
        let cohorts: Vec<_> = convention.detect_cohorts(&cols).into_iter().collect();
        assert_eq!(cohorts, vec!["ad", "ftd", "all"]);
    }

    #[test]
    fn test_detect_cohorts_prefixed() {
        let convention = ColumnConvention::named("prefixed").unwrap();
        let cols = header(&["AA", "het_case", "hom_case", "het_control"]);
        let cohorts: Vec<_> = convention.detect_cohorts(&cols).into_iter().collect();
        assert_eq!(cohorts, vec!["case", "control"]);
    }

    #[test]
    fn test_detect_cohorts_single_count() {
        let convention = ColumnConvention::named("case-control").unwrap();
        let cols = header(&["AA", "control", "variant", "case"]);
        let cohorts: Vec<_> = convention.detect_cohorts(&cols).into_iter().collect();
        assert_eq!(cohorts, vec!["control", "case"]);
    }

    #[test]
    fn test_cohort_config_unknown() {
        let config = CohortConfig::from_convention(
            &ColumnConvention::default(),
            &["ad".to_string()],
            LabelOrder::HomHet,
        );
        assert!(config.columns("ad").is_ok());
        assert!(matches!(
            config.columns("eod"),
            Err(LollipopError::UnknownCohort(ref c)) if c == "eod"
        ));
    }

    #[test]
    fn test_columns_present_in() {
        let columns = ColumnConvention::default().columns_for("ad", LabelOrder::HomHet);
        assert!(columns.present_in(&header(&["AA", "ad.Hom_A1"])));
        assert!(!columns.present_in(&header(&["AA", "ftd.Het"])));
    }

    #[test]
    fn test_view_cohorts() {
        let view = CohortView::case_control("case", "control");
        assert_eq!(view.reference(), Some("control"));
        assert_eq!(view.cohorts(), vec!["case", "control"]);
        assert_eq!(CohortView::single("ad").reference(), None);
    }
}
