use clap::{Parser, Subcommand};
use std::io;
use std::io::Write;
use std::path::PathBuf;

use boundary_tool::boundary::{line_from_geojson_str, BoundaryCollection};
use boundary_tool::split::{split_with, SplitOptions};

#[derive(Debug, Parser)]
#[clap(
  name = "boundary_tool",
  about = "A tool for splitting administrative boundary polygons",
  version
)]
struct Cli {
  #[clap(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  #[clap(
    name = "split",
    about = "Split a boundary polygon along a drawn line and write the updated collection"
  )]
  Split {
    /// Original boundary collection (GeoJSON FeatureCollection)
    #[clap(value_parser)]
    boundaries: PathBuf,

    /// Drawn cut line (GeoJSON Feature, Geometry or FeatureCollection)
    #[clap(value_parser)]
    line: PathBuf,

    /// Output path for the updated collection
    #[clap(value_parser)]
    output: PathBuf,

    /// Fragments from previous splits (GeoJSON FeatureCollection)
    #[clap(long, value_parser)]
    fragments: Option<PathBuf>,

    /// Corridor offset in kilometers
    #[clap(long, default_value_t = 0.01)]
    offset: f64,

    /// Overlap tolerance in kilometers
    #[clap(long, default_value_t = 0.005)]
    tolerance: f64,
  },
}

fn main() {
  env_logger::init();
  let args = Cli::parse();
  match args.command {
    Commands::Split {
      boundaries,
      line,
      output,
      fragments,
      offset,
      tolerance,
    } => {
      if !boundaries.exists() {
        panic!("Boundaries file does not exist");
      }
      if !line.exists() {
        panic!("Line file does not exist");
      }

      if output.exists() {
        print!("Output file already exists. Overwrite? (y/n) ");
        io::stdout().flush().unwrap();
        let mut answer = String::new();
        io::stdin().read_line(&mut answer).unwrap();
        if answer.trim() != "y" {
          panic!("Aborted");
        }
      }

      let fallback = BoundaryCollection::from_geojson_str(
        &std::fs::read_to_string(&boundaries).unwrap(),
      )
      .unwrap();
      let candidates = match &fragments {
        Some(path) => {
          BoundaryCollection::from_geojson_str(&std::fs::read_to_string(path).unwrap()).unwrap()
        }
        None => BoundaryCollection::default(),
      };
      let cut_line = line_from_geojson_str(&std::fs::read_to_string(&line).unwrap()).unwrap();

      println!(
        "Splitting with a {}-point line against {} fragments and {} boundaries",
        cut_line.0.len(),
        candidates.features.len(),
        fallback.features.len()
      );

      let options = SplitOptions {
        corridor_offset_km: offset,
        overlap_tolerance_km: tolerance,
      };
      match split_with(&cut_line, &candidates.features, &fallback.features, &options) {
        Ok(updated) => {
          std::fs::write(&output, updated.to_feature_collection().to_string()).unwrap();
          println!(
            "Wrote {} features to {}",
            updated.features.len(),
            output.display()
          );
        }
        Err(err) => {
          eprintln!("Split failed: {}", err);
          std::process::exit(1);
        }
      }
    }
  }
}
