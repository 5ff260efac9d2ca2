//! The library side of the `lollipop` command line tool.
//!
//! Each command reads a variant table, runs the pipeline and writes TSV. The
//! number of rows written and the pipeline's recovered conditions are handed
//! back on the [`CommandOutput`] rather than failing the command.

use std::io::Write;
use std::path::PathBuf;

use crate::{
    cohorts::{CohortConfig, CohortView, ColumnConvention, LabelOrder},
    error::LollipopError,
    io::{read_variant_table, OutputFile},
    layout::{CLUSTER_TSV_COLUMNS, EXON_TSV_COLUMNS},
    pipeline::Pipeline,
    reporting::{CommandOutput, Report},
    traits::TsvSerialize,
    variants::TableSchema,
    Position,
};

/// Settings shared by the commands that build a [`Pipeline`].
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub schema: TableSchema,
    pub convention: ColumnConvention,
    pub label_order: LabelOrder,
    pub cluster_distance: Position,
    pub min_exon_width: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            schema: TableSchema::default(),
            convention: ColumnConvention::default(),
            label_order: LabelOrder::default(),
            cluster_distance: crate::clusters::DEFAULT_CLUSTER_DISTANCE,
            min_exon_width: crate::exons::DEFAULT_MIN_EXON_WIDTH,
        }
    }
}

impl PipelineOptions {
    /// Resolve the cohort configuration against `header` and build the pipeline.
    pub fn pipeline(&self, header: &[String]) -> Pipeline {
        let cohorts = CohortConfig::from_header(&self.convention, header, self.label_order);
        log::debug!("resolved {} cohorts from the header", cohorts.len());
        Pipeline::new(cohorts)
            .with_schema(self.schema.clone())
            .with_cluster_distance(self.cluster_distance)
            .with_min_exon_width(self.min_exon_width)
    }
}

fn output_file(output: Option<&PathBuf>, columns: &[&str]) -> OutputFile {
    let header = Some(columns.iter().map(|c| c.to_string()).collect());
    output.map_or(OutputFile::new_stdout(header.clone()), |file| {
        OutputFile::new(file, header)
    })
}

/// Write the rendered clusters of one cohort view, returning the number of
/// clusters written.
pub fn lollipop_clusters(
    variants: &PathBuf,
    view: &CohortView,
    options: &PipelineOptions,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<usize>, LollipopError> {
    let raw = read_variant_table(variants)?;
    let rendering = options.pipeline(&raw.header).render(&raw, view);
    log::info!(
        "{} clusters with carriers in {:?}",
        rendering.clusters.len(),
        view.cohorts()
    );

    let mut writer = output_file(output, &CLUSTER_TSV_COLUMNS).writer()?;
    for cluster in &rendering.clusters {
        writeln!(writer, "{}", cluster.to_tsv())?;
    }
    writer.flush()?;
    Ok(CommandOutput::new(rendering.clusters.len(), rendering.report))
}

/// Write the colored exon bands, in legend order, returning the number of
/// bands written.
pub fn lollipop_exons(
    variants: &PathBuf,
    options: &PipelineOptions,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<usize>, LollipopError> {
    let raw = read_variant_table(variants)?;
    let pipeline = options.pipeline(&raw.header);

    let mut report = Report::new();
    let bands = pipeline
        .normalize(&raw, &mut report)
        .map(|table| pipeline.exon_bands(&table))
        .unwrap_or_default();
    log::info!("{} exon bands", bands.len());

    let mut writer = output_file(output, &EXON_TSV_COLUMNS).writer()?;
    for band in &bands {
        writeln!(writer, "{}", band.to_tsv())?;
    }
    writer.flush()?;
    Ok(CommandOutput::new(bands.len(), report))
}

/// List the cohorts found in the header under the configured convention,
/// returning the number of cohorts written.
pub fn lollipop_cohorts(
    variants: &PathBuf,
    options: &PipelineOptions,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<usize>, LollipopError> {
    let raw = read_variant_table(variants)?;
    let cohorts =
        CohortConfig::from_header(&options.convention, &raw.header, options.label_order);

    let mut writer = output_file(output, &["cohort", "het_column", "hom_column"]).writer()?;
    for (cohort, columns) in cohorts.iter() {
        let row = vec![
            cohort.clone(),
            columns.het.clone(),
            columns.hom.clone().unwrap_or_else(|| ".".to_string()),
        ];
        writeln!(writer, "{}", row.to_tsv())?;
    }
    writer.flush()?;
    Ok(CommandOutput::new(cohorts.len(), Report::new()))
}
