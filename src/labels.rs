//! Cohort filtering and cluster labels.
//!
//! For a given [`CohortView`], clusters with no carriers are dropped, and
//! each retained cluster gets a multi-line label with one line per member
//! that has carriers in the view.

use crate::{
    clusters::Cluster,
    cohorts::{CohortConfig, CohortView, LabelOrder},
    variants::Variant,
    Count,
};

/// A cluster that survived cohort filtering, with its label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledCluster {
    pub cluster: Cluster,
    pub label: String,
    /// True if a reference cohort is in view and no member has carriers in it.
    pub reference: bool,
}

/// The two numbers shown for a variant under `view`, in label order.
fn label_counts(variant: &Variant, view: &CohortView, order: LabelOrder) -> (Count, Count) {
    match view {
        CohortView::Single { cohort, .. } => {
            let counts = variant.counts(cohort);
            match order {
                LabelOrder::HomHet => (counts.hom, counts.het),
                LabelOrder::HetHom => (counts.het, counts.hom),
            }
        }
        CohortView::CaseControl { case, control } => {
            (variant.counts(case).total(), variant.counts(control).total())
        }
    }
}

fn has_carriers(variant: &Variant, view: &CohortView, order: LabelOrder) -> bool {
    let (a, b) = label_counts(variant, view, order);
    a > 0 || b > 0
}

/// Drop clusters with no carriers under `view`, and label the rest.
///
/// A cohort missing from `cohorts` reads as all-zero counts, so every
/// cluster is dropped.
pub fn filter_and_label(
    clusters: &[Cluster],
    variants: &[Variant],
    view: &CohortView,
    cohorts: &CohortConfig,
) -> Vec<LabeledCluster> {
    let order = match view {
        CohortView::Single { cohort, .. } => cohorts
            .columns(cohort)
            .map(|columns| columns.order)
            .unwrap_or_default(),
        CohortView::CaseControl { .. } => LabelOrder::default(),
    };

    clusters
        .iter()
        .filter_map(|cluster| {
            let members = cluster.members(variants);
            let lines: Vec<String> = members
                .iter()
                .filter(|variant| has_carriers(variant, view, order))
                .map(|variant| {
                    let (a, b) = label_counts(variant, view, order);
                    format!("{} ({} / {})", variant.label, a, b)
                })
                .collect();
            if lines.is_empty() {
                return None;
            }
            let reference = view.reference().map_or(false, |reference| {
                members
                    .iter()
                    .all(|variant| variant.counts(reference).is_zero())
            });
            Some(LabeledCluster {
                cluster: cluster.clone(),
                label: lines.join("\n"),
                reference,
            })
        })
        .collect()
}
