// Entry point and CLI flow.
//
// Subcommands:
// - `ask` loads and canonicalizes both CSVs and answers a question,
//   printing the structured result as pretty JSON on stdout.
// - `integrate` merges crop totals with annual rainfall by state/year.
// - `fetch` downloads a dataset CSV from a data portal.
//
// Logging goes to stderr so stdout stays machine-readable.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tabled::Tabled;
use tracing_subscriber::EnvFilter;

use agri_qa::aggregate::{aggregate_annual_rainfall, integrate_crop_and_rainfall};
use agri_qa::engine::answer;
use agri_qa::error::QaResult;
use agri_qa::types::{Answer, IntegratedRecord, RegionReport};
use agri_qa::util::{format_int, format_number};
use agri_qa::{fetch, loader, output};

#[derive(Parser, Debug)]
#[command(name = "agri-qa")]
#[command(about = "Rule-based Q&A over crop production and rainfall datasets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a natural-language question over the datasets
    Ask {
        /// Question text, e.g. "Compare rainfall in Maharashtra and
        /// Karnataka for the last 5 years and list top 3 crops"
        #[arg(short, long)]
        question: String,

        /// Crop production CSV
        #[arg(long, default_value = "data/sample_crop_production.csv")]
        crop: PathBuf,

        /// Monthly rainfall CSV
        #[arg(long, default_value = "data/sample_rainfall.csv")]
        rainfall: PathBuf,

        /// Write the JSON answer to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also print per-region top-crop tables
        #[arg(long)]
        tables: bool,
    },

    /// Merge crop production totals with annual rainfall by state and year
    Integrate {
        /// Crop production CSV
        #[arg(long, default_value = "data/sample_crop_production.csv")]
        crop: PathBuf,

        /// Monthly rainfall CSV
        #[arg(long, default_value = "data/sample_rainfall.csv")]
        rainfall: PathBuf,

        /// Write the merged table to this CSV instead of previewing it
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Download a dataset CSV from a URL
    Fetch {
        #[arg(long)]
        url: String,

        #[arg(long)]
        dest: PathBuf,
    },
}

#[derive(Tabled, Clone)]
struct CropRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Crop")]
    crop: String,
    #[tabled(rename = "ProductionTonnes")]
    production: String,
}

#[derive(Tabled, Clone)]
struct IntegratedRow {
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "ProductionTonnes")]
    production: String,
    #[tabled(rename = "AnnualRainfallMm")]
    rainfall: String,
}

impl From<&IntegratedRecord> for IntegratedRow {
    fn from(r: &IntegratedRecord) -> Self {
        IntegratedRow {
            state: r.state.clone(),
            year: r.year,
            production: format_number(r.production_tonnes, 2),
            rainfall: r
                .annual_rainfall_mm
                .map(|mm| format_number(mm, 2))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn print_region(region: &str, report: &RegionReport) {
    let avg = report
        .avg_annual_rainfall_mm
        .map(|mm| format!("{} mm", format_number(mm, 2)))
        .unwrap_or_else(|| "no data".to_string());
    println!("{} (avg annual rainfall: {})", region, avg);
    let rows: Vec<CropRow> = report
        .top_crops
        .iter()
        .enumerate()
        .map(|(idx, c)| CropRow {
            rank: idx + 1,
            crop: c.crop.clone(),
            production: format_number(c.production_tonnes, 2),
        })
        .collect();
    output::preview_table(&rows, rows.len().max(1));
}

fn run(cli: Cli) -> QaResult<()> {
    match cli.command {
        Commands::Ask {
            question,
            crop,
            rainfall,
            out,
            tables,
        } => {
            let crop_rows = loader::load_crop_csv(&crop)?;
            let rainfall_rows = loader::load_rainfall_csv(&rainfall)?;
            tracing::info!(
                "loaded {} crop rows, {} rainfall rows",
                format_int(crop_rows.len() as i64),
                format_int(rainfall_rows.len() as i64)
            );
            let result = answer(&question, &crop_rows, &rainfall_rows)?;
            match &out {
                Some(path) => output::write_json(path, &result)?,
                None => println!("{}", serde_json::to_string_pretty(&result)?),
            }
            if tables {
                if let Answer::Report(report) = &result {
                    println!();
                    for (region, region_report) in &report.results {
                        print_region(region, region_report);
                    }
                }
            }
            Ok(())
        }
        Commands::Integrate {
            crop,
            rainfall,
            out,
        } => {
            let crop_rows = loader::load_crop_csv(&crop)?;
            let rainfall_rows = loader::load_rainfall_csv(&rainfall)?;
            let annual = aggregate_annual_rainfall(&rainfall_rows);
            let merged = integrate_crop_and_rainfall(&crop_rows, &annual);
            match &out {
                Some(path) => {
                    output::write_csv(path, &merged)?;
                    println!(
                        "Wrote {} rows to {}",
                        format_int(merged.len() as i64),
                        path.display()
                    );
                }
                None => {
                    let rows: Vec<IntegratedRow> = merged.iter().map(IntegratedRow::from).collect();
                    output::preview_table(&rows, 20);
                }
            }
            Ok(())
        }
        Commands::Fetch { url, dest } => fetch::download_csv(&url, &dest),
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
