use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lollipop::{
    commands::{lollipop_clusters, lollipop_cohorts, lollipop_exons, PipelineOptions},
    prelude::*,
    reporting::CommandOutput,
    Position,
};

const INFO: &str = "\
lollipop: variant clustering and lollipop diagram layout
usage: lollipop [--help] <subcommand>

Subcommands:

  clusters: cluster nearby variants and lay out the lollipops for one cohort view.
  exons:    compute the colored exon bands of the gene track.
  cohorts:  list the cohorts found in a variant table's header.

";

#[derive(Parser)]
#[clap(name = "lollipop")]
#[clap(about = INFO)]
struct Cli {
    /// raise log verbosity (-d for info, -dd for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    HomHet,
    HetHom,
}

impl From<Order> for LabelOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::HomHet => LabelOrder::HomHet,
            Order::HetHom => LabelOrder::HetHom,
        }
    }
}

#[derive(Args)]
struct TableArgs {
    /// a headered, tab-delimited variant table (optionally gzip-compressed)
    #[arg(required = true)]
    variants: PathBuf,

    /// cohort count column convention: dot, underscore, prefixed or case-control
    #[arg(long, default_value = "dot")]
    convention: String,

    /// het/hom column templates, e.g. "{cohort}.Het,{cohort}.Hom_A1" (overrides --convention)
    #[arg(long, value_delimiter = ',', num_args = 2)]
    templates: Option<Vec<String>>,

    /// the column holding amino acid positions
    #[arg(long, default_value = "AA")]
    position_column: String,

    /// the column holding exon identifiers
    #[arg(long, default_value = "exon")]
    exon_column: String,

    /// the column holding variant labels
    #[arg(long, default_value = "variant")]
    label_column: String,

    /// an optional output file (standard output will be used if not specified)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    Clusters {
        #[command(flatten)]
        table: TableArgs,

        /// the cohort to show
        #[arg(long, required = true)]
        cohort: String,

        /// highlight clusters with no carriers in this reference cohort
        #[arg(long, conflicts_with = "control")]
        reference: Option<String>,

        /// composite case/control view, with --cohort as the case cohort
        #[arg(long)]
        control: Option<String>,

        /// maximum distance between chained neighboring variants
        #[arg(long, default_value_t = 10)]
        distance: Position,

        /// order of the two carrier counts in labels
        #[arg(long, value_enum, default_value_t = Order::HomHet)]
        label_order: Order,
    },
    Exons {
        #[command(flatten)]
        table: TableArgs,

        /// minimum exon band width, in residues
        #[arg(long, default_value_t = 5.0)]
        min_width: f64,
    },
    Cohorts {
        #[command(flatten)]
        table: TableArgs,
    },
}

fn pipeline_options(table: &TableArgs) -> Result<PipelineOptions, LollipopError> {
    let convention = match &table.templates {
        Some(templates) => ColumnConvention::template(&templates[0], &templates[1])?,
        None => ColumnConvention::named(&table.convention)?,
    };
    Ok(PipelineOptions {
        schema: TableSchema {
            position: table.position_column.clone(),
            exon: table.exon_column.clone(),
            label: table.label_column.clone(),
        },
        convention,
        ..Default::default()
    })
}

fn run(cli: Cli) -> Result<CommandOutput<usize>, LollipopError> {
    match cli.command {
        Some(Commands::Clusters {
            table,
            cohort,
            reference,
            control,
            distance,
            label_order,
        }) => {
            let options = PipelineOptions {
                cluster_distance: distance,
                label_order: label_order.into(),
                ..pipeline_options(&table)?
            };
            let view = match (control, reference) {
                (Some(control), _) => CohortView::case_control(cohort, control),
                (None, Some(reference)) => CohortView::with_reference(cohort, reference),
                (None, None) => CohortView::single(cohort),
            };
            lollipop_clusters(&table.variants, &view, &options, table.output.as_ref())
        }
        Some(Commands::Exons { table, min_width }) => {
            let options = PipelineOptions {
                min_exon_width: min_width,
                ..pipeline_options(&table)?
            };
            lollipop_exons(&table.variants, &options, table.output.as_ref())
        }
        Some(Commands::Cohorts { table }) => {
            let options = pipeline_options(&table)?;
            lollipop_cohorts(&table.variants, &options, table.output.as_ref())
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(match cli.debug {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match run(cli) {
        Ok(output) => {
            log::info!("{} rows written", output.value);
            if !output.report.is_clean() {
                log::info!("{} conditions were recovered", output.report.entries().len());
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
