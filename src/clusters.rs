//! Proximity clustering of sorted variants.
//!
//! Clusters chain each variant onto the *last* member of the current
//! cluster, so a run of variants each within `distance` of its neighbor
//! forms one cluster even when the run spans more than `distance`.

use crate::{traits::GenericVariant, Position};

/// The default maximum distance between chained neighbors.
pub const DEFAULT_CLUSTER_DISTANCE: Position = 10;

/// A [`Cluster`] is a non-empty, contiguous run of variants in a sorted
/// table, stored as a 0-indexed right-exclusive index range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub start: usize,
    pub end: usize,
}

impl Cluster {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of variants in the cluster.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clusters are never empty; this exists for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The member variants, sliced out of the table this cluster was built from.
    pub fn members<'a, V>(&self, variants: &'a [V]) -> &'a [V] {
        &variants[self.start..self.end]
    }
}

/// Group sorted variants into proximity clusters in a single forward pass.
///
/// A variant joins the current cluster if it is on the same exon as, and at
/// most `distance` residues from, the cluster's last member; otherwise the
/// current cluster is closed and a new one started. Clusters are returned in
/// the order they were closed.
pub fn cluster_variants<V: GenericVariant>(variants: &[V], distance: Position) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    if variants.is_empty() {
        return clusters;
    }

    let mut start = 0;
    for (i, pair) in variants.windows(2).enumerate() {
        let (prev, current) = (&pair[0], &pair[1]);
        if !current.chains_onto(prev, distance) {
            clusters.push(Cluster::new(start, i + 1));
            start = i + 1;
        }
    }
    clusters.push(Cluster::new(start, variants.len()));
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{random_variants, variants_on};
    use crate::variants::Variant;

    fn member_positions(clusters: &[Cluster], variants: &[Variant]) -> Vec<Vec<Position>> {
        clusters
            .iter()
            .map(|c| c.members(variants).iter().map(|v| v.position).collect())
            .collect()
    }

    #[test]
    fn test_empty() {
        let variants: Vec<Variant> = Vec::new();
        assert!(cluster_variants(&variants, 10).is_empty());
    }

    #[test]
    fn test_single_variant() {
        let variants = variants_on("E1", &[42]);
        assert_eq!(cluster_variants(&variants, 10), vec![Cluster::new(0, 1)]);
    }

    #[test]
    fn test_nearby_and_distant() {
        let variants = variants_on("E1", &[10, 15, 100]);
        let clusters = cluster_variants(&variants, 10);
        assert_eq!(
            member_positions(&clusters, &variants),
            vec![vec![10, 15], vec![100]]
        );
    }

    #[test]
    fn test_distance_boundary() {
        let variants = variants_on("E1", &[10, 19]);
        assert_eq!(cluster_variants(&variants, 10).len(), 1);

        let variants = variants_on("E1", &[10, 20]);
        assert_eq!(cluster_variants(&variants, 10).len(), 1);

        let variants = variants_on("E1", &[10, 21]);
        assert_eq!(cluster_variants(&variants, 10).len(), 2);
    }

    #[test]
    fn test_chains_onto_last_member() {
        // each neighbor is 8 apart, so the whole run chains even though it
        // spans 32 residues
        let variants = variants_on("E1", &[10, 18, 26, 34, 42]);
        let clusters = cluster_variants(&variants, 10);
        assert_eq!(clusters, vec![Cluster::new(0, 5)]);
    }

    #[test]
    fn test_exon_change_splits() {
        let mut variants = variants_on("E1", &[10, 12]);
        variants.extend(variants_on("E2", &[13, 14]));
        variants.extend(variants_on("E1", &[15]));
        let clusters = cluster_variants(&variants, 10);
        assert_eq!(
            member_positions(&clusters, &variants),
            vec![vec![10, 12], vec![13, 14], vec![15]]
        );
    }

    #[test]
    fn test_random_invariants() {
        let variants = random_variants(5000);
        let distance = DEFAULT_CLUSTER_DISTANCE;
        let clusters = cluster_variants(&variants, distance);

        // adjacency: every chained neighbor shares an exon and is close
        for cluster in &clusters {
            assert!(!cluster.is_empty());
            for pair in cluster.members(&variants).windows(2) {
                assert_eq!(pair[0].exon, pair[1].exon);
                assert!(pair[1].position - pair[0].position <= distance);
            }
        }

        // completeness: clusters partition the table, in order
        let rebuilt: Vec<&Variant> = clusters
            .iter()
            .flat_map(|c| c.members(&variants))
            .collect();
        assert_eq!(rebuilt.len(), variants.len());
        assert!(rebuilt.iter().zip(variants.iter()).all(|(a, b)| *a == b));

        // maximality: a cluster boundary is always a real break
        for pair in clusters.windows(2) {
            let last = &variants[pair[0].end - 1];
            let next = &variants[pair[1].start];
            assert!(!next.chains_onto(last, distance));
        }
    }
}
