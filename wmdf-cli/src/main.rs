//! wmdf CLI - WeaveMaker to WIF converter
//!
//! Reads WeaveMaker `.wmd`/`.wmdf` drafts and writes WIF files, one per colorway.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{ConvertArgs, cmd_convert, cmd_info, cmd_structure};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wmdf_wif::{Units, WifConfig};

#[derive(Parser)]
#[command(name = "wmdf")]
#[command(author, version, about = "Convert WeaveMaker drafts to WIF")]
#[command(long_about = "
wmdf reads WeaveMaker loom drafts (.wmd, .wmdf) and writes them as WIF
(Weaving Information File), one file per colorway.

Examples:
  wmdf convert twill.wmdf
  wmdf convert twill.wmdf -c 2
  wmdf convert *.wmdf --all-colorways -o out/
  wmdf info twill.wmdf
  wmdf info twill.wmdf --json
  wmdf structure twill.wmdf
")]
struct Cli {
    /// Log decoding details (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert drafts to WIF
    #[command(alias = "c")]
    Convert {
        /// Draft files to convert
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Colorway to export, starting at 1
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..), conflicts_with = "all_colorways")]
        colorway: Option<u16>,

        /// Write one WIF per colorway
        #[arg(short, long)]
        all_colorways: bool,

        /// Thread units (decipoints, inches, centimeters)
        #[arg(long, default_value = "centimeters")]
        units: Units,

        /// Thread spacing
        #[arg(long, default_value_t = WifConfig::DEFAULT.spacing)]
        spacing: f64,

        /// Thread thickness
        #[arg(long, default_value_t = WifConfig::DEFAULT.thickness)]
        thickness: f64,
    },

    /// Show a summary of a draft
    #[command(alias = "i")]
    Info {
        /// Draft file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// List the segments of a draft
    #[command(alias = "s")]
    Structure {
        /// Draft file to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            files,
            output,
            colorway,
            all_colorways,
            units,
            spacing,
            thickness,
        } => {
            let config = WifConfig::new()
                .with_units(units)
                .with_spacing(spacing)
                .with_thickness(thickness);
            cmd_convert(&ConvertArgs {
                files: &files,
                output: output.as_deref(),
                colorway: colorway.map(|c| usize::from(c) - 1),
                all_colorways,
                config,
            })
            .map(|_| ())
        }
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Structure { file, json } => cmd_structure(&file, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
