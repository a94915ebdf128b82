use clap::{Parser, Subcommand};
use darkslide::effects::Effect;
use darkslide::pipeline::{self, FilterOptions};
use darkslide::{config, disk, logging, naming, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "darkslide")]
#[command(about = "Photo effect engine for a single-board camera")]
#[command(long_about = "\
Photo effect engine for a single-board camera

Applies one effect to one capture and always leaves a JPEG at the output
path. If the capture cannot be decoded or the effect fails, the original
file is copied there instead.

Output naming:

  foto_16102026_142501.jpg           capture
  foto_16102026_142501_grain.jpg     film grain
  foto_16102026_142501_terminal.jpg  matrix terminal

Run 'darkslide effects' to list every effect and 'darkslide gen-config' to
generate a documented darkslide.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding darkslide.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply one effect to a capture
    Apply {
        /// Effect id (see `darkslide effects`)
        #[arg(long, short)]
        effect: Effect,
        /// Capture to read
        input: PathBuf,
        /// Where to write the result (default: next to the input, with the effect suffix)
        output: Option<PathBuf>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether enough disk space is free to capture
    CheckDisk {
        /// Directory to check (default: [disk].path from config)
        path: Option<PathBuf>,
        /// Threshold in MiB (default: [disk].min_free_mb from config)
        #[arg(long)]
        min_free_mb: Option<u64>,
    },
    /// Print a timestamped capture file name
    Name {
        #[arg(long, default_value = "foto")]
        prefix: String,
        #[arg(long, default_value = naming::OUTPUT_EXTENSION)]
        ext: String,
    },
    /// List every effect with its output suffix and quality
    Effects,
    /// Print a stock darkslide.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let engine_config = config::load_config(&cli.config)?;
    logging::init_from_config(&engine_config.logging, cli.verbose, cli.json_logs);

    match cli.command {
        Command::Apply {
            effect,
            input,
            output: target,
            json,
        } => {
            let target = target.unwrap_or_else(|| naming::effect_output_path(&input, effect));
            let options = FilterOptions::from_engine_config(&engine_config);
            let outcome = pipeline::apply_filter(effect, &input, &target, &options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                output::print_outcome(&outcome);
            }
        }
        Command::CheckDisk { path, min_free_mb } => {
            let path = path.unwrap_or_else(|| engine_config.disk.path.clone());
            let min_free_mb = min_free_mb.unwrap_or(engine_config.disk.min_free_mb);
            let sufficient = disk::check_disk_space(&path, min_free_mb);
            output::print_disk_check(&path, min_free_mb, sufficient);
            if !sufficient {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Name { prefix, ext } => {
            println!("{}", naming::capture_filename_now(&prefix, &ext));
        }
        Command::Effects => {
            output::print_catalog();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}
