use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use log::info;
use serde_json::json;
use simple_logger::SimpleLogger;

use crate::aggregate::{cumulative, pluviosity_by_date, total};
use crate::filter::filter_inside;
use crate::poly::Polygon;

mod aggregate;
mod bounds;
mod contour;
mod error;
mod filter;
mod forecast;
mod poly;
#[cfg(test)]
mod tests;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate forecast precipitation over a basin contour
    Report(Report),
}

#[derive(Args)]
pub struct Report {
    /// Contour file (.bln) defining the basin boundary
    #[clap(short, long)]
    contour: Option<PathBuf>,

    /// Basin boundary as a WKT POLYGON, alternative to --contour
    #[clap(short, long)]
    wkt: Option<String>,

    /// Directory holding the forecast .dat files
    #[clap(short, long, default_value = "forecast_files")]
    dir: PathBuf,

    /// Forecast issue date (ddmmyy)
    #[clap(short, long)]
    issue_date: String,

    /// Emit the report as JSON instead of a table
    #[clap(short, long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new().env().init()?;
    let cli = Cli::parse();
    match &cli.command {
        Commands::Report(args) => report(args)?,
    }
    Ok(())
}

fn report(args: &Report) -> Result<(), Box<dyn Error>> {
    let polygon = match (&args.wkt, &args.contour) {
        (Some(wkt), _) => Polygon::from_wkt(wkt)?,
        (None, Some(path)) => contour::read_contour_file(path)?,
        (None, None) => return Err("either --contour or --wkt is required".into()),
    };

    let samples = forecast::read_forecast_dir(&args.dir, &args.issue_date)?;
    info!("Classifying {} samples against the contour", samples.len());
    let begin = Instant::now();
    let retained = filter_inside(&polygon, samples);
    info!("Retained {} samples in {:.3?}", retained.len(), begin.elapsed());

    let series = pluviosity_by_date(&retained);
    if args.json {
        let days: Vec<_> = series
            .iter()
            .zip(cumulative(&series))
            .map(|((date, v), (_, c))| {
                json!({ "date": date.to_string(), "pluviosity_mm": v, "cumulative_mm": c })
            })
            .collect();
        let doc = json!({
            "issue_date": args.issue_date,
            "days": days,
            "total_mm": total(&series),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("Rainfall forecast per day:");
        for ((date, v), (_, c)) in series.iter().zip(cumulative(&series)) {
            println!("{date}  {v:>8.1} mm  (cumulative {c:.1} mm)");
        }
        println!("Total: {:.1} mm", total(&series));
    }
    Ok(())
}
