//! Screen-space layout of labeled clusters and exon bands.
//!
//! All y coordinates are in normalized plot-height units; x coordinates are
//! amino acid positions.

use crate::{
    exons::ExonBand, labels::LabeledCluster, traits::TsvSerialize, variants::Variant, Position,
};

/// A named or hex color, as understood by common plotting backends.
pub type Color = &'static str;

/// Marker color of clusters with no carriers in the reference cohort.
pub const HIGHLIGHT_COLOR: Color = "crimson";
/// Marker color of every other cluster.
pub const NEUTRAL_COLOR: Color = "black";
/// Color of the backbone track drawn beneath the exon bands.
pub const BACKBONE_COLOR: Color = "lightgray";

/// The 12-color "Paired" qualitative palette used for exon bands.
pub const PAIRED_PALETTE: [Color; 12] = [
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

/// Look up the palette color for the `index`-th exon band, wrapping around
/// once the palette is exhausted.
///
/// # Panics
/// Panics if `palette` is empty.
pub fn palette_color(palette: &[Color], index: usize) -> Color {
    palette[index % palette.len()]
}

/// Layout constants.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Height of the top marker of every cluster.
    pub marker_y: f64,
    /// Where cluster stems start, just above the exon track.
    pub stem_base_y: f64,
    /// Vertical distance between stacked member markers.
    pub stack_step: f64,
    /// Label anchor rise per cluster member.
    pub label_step: f64,
    /// Label anchor rise above the top marker, independent of size.
    pub label_offset: f64,
    pub track_y: f64,
    pub track_height: f64,
    /// Room added to the right of the last variant.
    pub x_padding: f64,
    pub y_limits: (f64, f64),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            marker_y: -0.03,
            stem_base_y: -0.07,
            stack_step: 0.005,
            label_step: 0.003,
            label_offset: 0.01,
            track_y: -0.08,
            track_height: 0.005,
            x_padding: 50.0,
            y_limits: (-0.1, 0.25),
        }
    }
}

/// A cluster ready to draw: one stem at `centroid_x` from `stem.0` up to
/// `stem.1`, a marker per member at `marker_y + offsets[i]`, and a label
/// anchored at `(centroid_x, label_y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCluster {
    pub centroid_x: f64,
    pub marker_y: f64,
    pub offsets: Vec<f64>,
    pub stem: (f64, f64),
    pub label: String,
    pub label_y: f64,
    pub reference: bool,
    pub color: Color,
}

impl RenderedCluster {
    /// The y coordinate of every member marker, top first.
    pub fn marker_ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.offsets.iter().map(move |offset| self.marker_y + offset)
    }
}

/// Column names of [`RenderedCluster`] TSV output.
pub const CLUSTER_TSV_COLUMNS: [&str; 8] = [
    "centroid_x",
    "marker_y",
    "label_y",
    "color",
    "reference",
    "members",
    "offsets",
    "label",
];

/// Column names of [`RenderedExonBand`] TSV output.
pub const EXON_TSV_COLUMNS: [&str; 5] = ["exon", "start", "end", "y", "color"];

impl TsvSerialize for RenderedCluster {
    /// Multi-line labels are joined with `;` to keep one cluster per line.
    fn to_tsv(&self) -> String {
        let offsets: Vec<String> = self
            .offsets
            .iter()
            .map(|offset| format!("{:.4}", offset))
            .collect();
        format!(
            "{:.2}\t{:.4}\t{:.4}\t{}\t{}\t{}\t{}\t{}",
            self.centroid_x,
            self.marker_y,
            self.label_y,
            self.color,
            self.reference,
            self.offsets.len(),
            offsets.join(","),
            self.label.replace('\n', ";")
        )
    }
}

/// An exon band ready to draw on the track.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedExonBand {
    pub exon: String,
    pub start: f64,
    pub end: f64,
    pub y: f64,
    pub color: Color,
}

impl TsvSerialize for RenderedExonBand {
    fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{:.4}\t{}",
            self.exon, self.start, self.end, self.y, self.color
        )
    }
}

/// The axes extents and the backbone track underneath the exon bands.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotFrame {
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    /// The backbone track, from residue 1 to the right edge of the plot.
    pub backbone: (f64, f64),
    pub track_y: f64,
    pub track_height: f64,
    pub backbone_color: Color,
}

/// Arithmetic mean of member positions, unweighted by counts.
fn centroid(members: &[Variant]) -> f64 {
    let sum: f64 = members.iter().map(|variant| variant.position as f64).sum();
    sum / members.len() as f64
}

/// Place each labeled cluster.
pub fn layout_clusters(
    labeled: &[LabeledCluster],
    variants: &[Variant],
    config: &LayoutConfig,
) -> Vec<RenderedCluster> {
    labeled
        .iter()
        .map(|labeled| {
            let members = labeled.cluster.members(variants);
            let offsets = (0..members.len())
                .map(|i| 0.0 - i as f64 * config.stack_step)
                .collect();
            let color = if labeled.reference {
                HIGHLIGHT_COLOR
            } else {
                NEUTRAL_COLOR
            };
            RenderedCluster {
                centroid_x: centroid(members),
                marker_y: config.marker_y,
                offsets,
                stem: (config.stem_base_y, config.marker_y),
                label: labeled.label.clone(),
                label_y: config.marker_y
                    + members.len() as f64 * config.label_step
                    + config.label_offset,
                reference: labeled.reference,
                color,
            }
        })
        .collect()
}

/// Color exon bands by their emission order and place them on the track.
pub fn layout_exon_bands(
    bands: &[ExonBand],
    palette: &[Color],
    config: &LayoutConfig,
) -> Vec<RenderedExonBand> {
    bands
        .iter()
        .enumerate()
        .map(|(i, band)| RenderedExonBand {
            exon: band.exon.clone(),
            start: band.start,
            end: band.end,
            y: config.track_y,
            color: palette_color(palette, i),
        })
        .collect()
}

/// The plot frame for a table whose largest position is `max_position`.
pub fn plot_frame(max_position: Position, config: &LayoutConfig) -> PlotFrame {
    let right = max_position as f64 + config.x_padding;
    PlotFrame {
        x_limits: (0.0, right),
        y_limits: config.y_limits,
        backbone: (1.0, right),
        track_y: config.track_y,
        track_height: config.track_height,
        backbone_color: BACKBONE_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::Cluster;

    const EPS: f64 = 1e-12;

    fn labeled(start: usize, end: usize, reference: bool) -> LabeledCluster {
        LabeledCluster {
            cluster: Cluster::new(start, end),
            label: "x".to_string(),
            reference,
        }
    }

    fn variants(positions: &[Position]) -> Vec<Variant> {
        positions
            .iter()
            .map(|&p| Variant::new(p, "E1", format!("V{}", p)))
            .collect()
    }

    #[test]
    fn test_centroid_and_offsets() {
        let variants = variants(&[10, 15, 20, 100]);
        let config = LayoutConfig::default();
        let rendered = layout_clusters(&[labeled(0, 3, false)], &variants, &config);
        let cluster = &rendered[0];
        assert_eq!(cluster.centroid_x, 15.0);
        assert_eq!(cluster.offsets.len(), 3);
        assert_eq!(cluster.offsets[0], 0.0);
        assert!((cluster.offsets[1] + 0.005).abs() < EPS);
        assert!((cluster.offsets[2] + 0.010).abs() < EPS);
        let ys: Vec<f64> = cluster.marker_ys().collect();
        assert!((ys[2] - -0.04).abs() < EPS);
        assert_eq!(cluster.stem, (-0.07, -0.03));
    }

    #[test]
    fn test_label_anchor_grows_with_size() {
        let variants = variants(&[10, 15, 20, 100]);
        let config = LayoutConfig::default();
        let rendered = layout_clusters(
            &[labeled(0, 3, false), labeled(3, 4, false)],
            &variants,
            &config,
        );
        assert!((rendered[0].label_y - (-0.03 + 3.0 * 0.003 + 0.01)).abs() < EPS);
        assert!((rendered[1].label_y - (-0.03 + 0.003 + 0.01)).abs() < EPS);
        assert!(rendered[0].label_y > rendered[1].label_y);
    }

    #[test]
    fn test_colors() {
        let variants = variants(&[10, 100]);
        let config = LayoutConfig::default();
        let rendered = layout_clusters(
            &[labeled(0, 1, true), labeled(1, 2, false)],
            &variants,
            &config,
        );
        assert_eq!(rendered[0].color, HIGHLIGHT_COLOR);
        assert_eq!(rendered[1].color, NEUTRAL_COLOR);
    }

    #[test]
    fn test_palette_wraps() {
        let bands: Vec<ExonBand> = (0..14)
            .map(|i| ExonBand {
                exon: format!("E{}", i),
                start: i as f64 * 10.0,
                end: i as f64 * 10.0 + 5.0,
            })
            .collect();
        let rendered = layout_exon_bands(&bands, &PAIRED_PALETTE, &LayoutConfig::default());
        assert_eq!(rendered[0].color, "#a6cee3");
        assert_eq!(rendered[11].color, "#b15928");
        assert_eq!(rendered[12].color, rendered[0].color);
        assert_eq!(rendered[13].color, rendered[1].color);
        assert!(rendered.iter().all(|band| band.y == -0.08));
    }

    #[test]
    fn test_cluster_to_tsv() {
        let variants = variants(&[10, 15]);
        let mut labeled = labeled(0, 2, true);
        labeled.label = "p10 (0 / 1)\np15 (1 / 0)".to_string();
        let rendered = layout_clusters(&[labeled], &variants, &LayoutConfig::default());
        assert_eq!(
            rendered[0].to_tsv(),
            "12.50\t-0.0300\t-0.0140\tcrimson\ttrue\t2\t0.0000,-0.0050\tp10 (0 / 1);p15 (1 / 0)"
        );
    }

    #[test]
    fn test_exon_band_to_tsv() {
        let band = ExonBand {
            exon: "exon7".to_string(),
            start: 203.5,
            end: 208.5,
        };
        let rendered = layout_exon_bands(&[band], &PAIRED_PALETTE, &LayoutConfig::default());
        assert_eq!(rendered[0].to_tsv(), "exon7\t203.5\t208.5\t-0.0800\t#a6cee3");
    }

    #[test]
    fn test_plot_frame() {
        let frame = plot_frame(467, &LayoutConfig::default());
        assert_eq!(frame.x_limits, (0.0, 517.0));
        assert_eq!(frame.backbone, (1.0, 517.0));
        assert_eq!(frame.y_limits, (-0.1, 0.25));
    }
}
