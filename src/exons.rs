//! Exon bands for the below-axis gene structure track.

use indexmap::IndexMap;

use crate::{traits::GenericVariant, Position};

/// The default minimum width of an exon band, in residues.
pub const DEFAULT_MIN_EXON_WIDTH: f64 = 5.0;

/// The observed extent of one exon, possibly widened to a minimum width.
#[derive(Clone, Debug, PartialEq)]
pub struct ExonBand {
    pub exon: String,
    pub start: f64,
    pub end: f64,
}

impl ExonBand {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Compute one band per distinct exon.
///
/// Bands are emitted in order of the exon's first appearance in `variants`,
/// which should be sorted by position. A band narrower than `min_width` is
/// widened symmetrically about its midpoint to exactly `min_width`; the
/// start is not clamped at zero.
pub fn build_exon_bands<V: GenericVariant>(variants: &[V], min_width: f64) -> Vec<ExonBand> {
    let mut extents: IndexMap<&str, (Position, Position)> = IndexMap::new();
    for variant in variants {
        let position = variant.position();
        extents
            .entry(variant.exon())
            .and_modify(|(min, max)| {
                *min = (*min).min(position);
                *max = (*max).max(position);
            })
            .or_insert((position, position));
    }

    extents
        .into_iter()
        .map(|(exon, (min, max))| {
            let (mut start, mut end) = (min as f64, max as f64);
            if end - start < min_width {
                let mid = (start + end) / 2.0;
                start = mid - min_width / 2.0;
                end = mid + min_width / 2.0;
            }
            ExonBand {
                exon: exon.to_string(),
                start,
                end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{random_variants, variants_on};

    #[test]
    fn test_narrow_band_widened() {
        let variants = variants_on("E3", &[50, 52]);
        let bands = build_exon_bands(&variants, 5.0);
        assert_eq!(
            bands,
            vec![ExonBand {
                exon: "E3".to_string(),
                start: 48.5,
                end: 53.5
            }]
        );
    }

    #[test]
    fn test_wide_band_untouched() {
        let variants = variants_on("E1", &[10, 15, 40]);
        let bands = build_exon_bands(&variants, 5.0);
        assert_eq!((bands[0].start, bands[0].end), (10.0, 40.0));
    }

    #[test]
    fn test_start_not_clamped() {
        let variants = variants_on("E1", &[1]);
        let bands = build_exon_bands(&variants, 5.0);
        assert_eq!((bands[0].start, bands[0].end), (-1.5, 3.5));
    }

    #[test]
    fn test_first_appearance_order() {
        let mut variants = variants_on("E10", &[5, 8]);
        variants.extend(variants_on("E2", &[30]));
        variants.extend(variants_on("E10", &[40]));
        variants.extend(variants_on("E1", &[90]));
        let exons: Vec<_> = build_exon_bands(&variants, 5.0)
            .into_iter()
            .map(|band| band.exon)
            .collect();
        assert_eq!(exons, vec!["E10", "E2", "E1"]);
    }

    #[test]
    fn test_random_band_monotonicity() {
        let variants = random_variants(2000);
        let min_width = DEFAULT_MIN_EXON_WIDTH;
        for band in build_exon_bands(&variants, min_width) {
            let positions: Vec<f64> = variants
                .iter()
                .filter(|v| v.exon == band.exon)
                .map(|v| v.position as f64)
                .collect();
            let min = positions.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = positions.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!(band.width() >= min_width);
            assert!(band.start <= min);
            assert!(band.end >= max);
        }
    }
}
