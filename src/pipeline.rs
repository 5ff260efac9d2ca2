//! The render pipeline: normalize → cluster → label → lay out.
//!
//! A [`Pipeline`] holds everything resolved once at setup (the table schema,
//! the cohort configuration and the layout constants). Each call to
//! [`Pipeline::render()`] is an independent render request: it owns every
//! structure it derives and shares nothing mutable, so requests can run on
//! separate threads.

use crate::{
    clusters::{cluster_variants, DEFAULT_CLUSTER_DISTANCE},
    cohorts::{CohortConfig, CohortView},
    exons::{build_exon_bands, DEFAULT_MIN_EXON_WIDTH},
    labels::filter_and_label,
    layout::{
        layout_clusters, layout_exon_bands, plot_frame, Color, LayoutConfig, PlotFrame,
        RenderedCluster, RenderedExonBand, PAIRED_PALETTE,
    },
    reporting::{Recovered, Report},
    variants::{normalize, RawTable, TableSchema, VariantTable},
    Position,
};

/// Everything a rendering target needs to draw one lollipop diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rendering {
    pub clusters: Vec<RenderedCluster>,
    pub exon_bands: Vec<RenderedExonBand>,
    /// `None` when there were no variants to frame.
    pub frame: Option<PlotFrame>,
    pub report: Report,
}

impl Rendering {
    fn empty(report: Report) -> Self {
        Self {
            report,
            ..Default::default()
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.exon_bands.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Pipeline {
    pub schema: TableSchema,
    pub cohorts: CohortConfig,
    pub cluster_distance: Position,
    pub min_exon_width: f64,
    pub layout: LayoutConfig,
    pub palette: &'static [Color],
}

impl Pipeline {
    /// Create a pipeline with the default schema, clustering distance,
    /// minimum exon width and layout.
    pub fn new(cohorts: CohortConfig) -> Self {
        Self {
            schema: TableSchema::default(),
            cohorts,
            cluster_distance: DEFAULT_CLUSTER_DISTANCE,
            min_exon_width: DEFAULT_MIN_EXON_WIDTH,
            layout: LayoutConfig::default(),
            palette: &PAIRED_PALETTE,
        }
    }

    pub fn with_schema(mut self, schema: TableSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_cluster_distance(mut self, distance: Position) -> Self {
        self.cluster_distance = distance;
        self
    }

    pub fn with_min_exon_width(mut self, width: f64) -> Self {
        self.min_exon_width = width;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Normalize `raw`, recording recovered conditions on `report`.
    pub fn normalize(&self, raw: &RawTable, report: &mut Report) -> Option<VariantTable> {
        match normalize(raw, &self.schema, &self.cohorts) {
            Ok(table) => {
                if table.dropped() > 0 {
                    report.add_issue(Recovered::MalformedRows(table.dropped()));
                }
                Some(table)
            }
            Err(error) => {
                if let Err(error) = report.recover(error) {
                    log::error!("unexpected error during normalization: {}", error);
                }
                None
            }
        }
    }

    /// Run one render request over a raw table.
    ///
    /// This never fails: an empty or unusable table gives an empty
    /// [`Rendering`], and an unknown cohort gives one with exon bands but
    /// no clusters. The report says which of these happened.
    pub fn render(&self, raw: &RawTable, view: &CohortView) -> Rendering {
        let mut report = Report::new();
        match self.normalize(raw, &mut report) {
            Some(table) => self.render_table(&table, view, report),
            None => Rendering::empty(report),
        }
    }

    /// Run the stages after normalization over an already normalized table.
    pub fn render_table(
        &self,
        table: &VariantTable,
        view: &CohortView,
        mut report: Report,
    ) -> Rendering {
        for cohort in view.cohorts() {
            let known = self
                .cohorts
                .columns(cohort)
                .and_then(|_| table.require_cohort(cohort));
            if let Err(error) = known {
                if let Err(error) = report.recover(error) {
                    log::error!("unexpected error resolving cohort: {}", error);
                }
            }
        }

        let variants = table.variants();
        let clusters = cluster_variants(variants, self.cluster_distance);
        let labeled = filter_and_label(&clusters, variants, view, &self.cohorts);
        log::debug!(
            "{} variants in {} clusters, {} with carriers",
            variants.len(),
            clusters.len(),
            labeled.len()
        );

        Rendering {
            clusters: layout_clusters(&labeled, variants, &self.layout),
            exon_bands: self.exon_bands(table),
            frame: table
                .max_position()
                .map(|max_position| plot_frame(max_position, &self.layout)),
            report,
        }
    }

    /// The colored exon bands of a normalized table; these do not depend
    /// on the cohort view.
    pub fn exon_bands(&self, table: &VariantTable) -> Vec<RenderedExonBand> {
        let bands = build_exon_bands(table.variants(), self.min_exon_width);
        layout_exon_bands(&bands, self.palette, &self.layout)
    }
}
