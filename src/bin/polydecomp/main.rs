//! Polydecomp CLI - convex decomposition command-line tool.
//!
//! Usage: polydecomp <COMMAND> [OPTIONS] <INPUT>
//!
//! Run `polydecomp --help` for available commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::info;

use polydecomp::algo::{decompose_with_progress, DecomposeOptions, Progress};
use polydecomp::geometry::is_clockwise;
use polydecomp::io;
use polydecomp::mesh::{build_from_ring, HalfEdgeMesh};

#[derive(Parser)]
#[command(name = "polydecomp")]
#[command(author, version, about = "Convex polygon decomposition CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display polygon information
    Info {
        /// Input ring file
        input: PathBuf,
    },

    /// Decompose a polygon into convex pieces
    Decompose {
        /// Input ring file
        input: PathBuf,

        /// Directory for output1.txt, output2.txt and output3.txt
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Stop after the split phase
        #[arg(long)]
        no_merge: bool,

        /// Append "<vertices> <seconds>" to this file
        #[arg(short, long)]
        timing: Option<PathBuf>,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Decompose {
            input,
            out_dir,
            no_merge,
            timing,
            progress,
        } => {
            cmd_decompose(&input, &out_dir, no_merge, timing.as_deref(), progress)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let last_percent = Arc::new(AtomicUsize::new(usize::MAX));

    Progress::new(move |current, total, stage| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Each stage restarts at 0%, so only skip exact repeats
        if last_percent.swap(percent, Ordering::Relaxed) == percent && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, percent, stage);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let ring = io::load_ring(input)?;
    let clockwise = is_clockwise(&ring);
    let mesh: HalfEdgeMesh = build_from_ring(&ring)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!(
        "Orientation: {}",
        if clockwise { "clockwise" } else { "counter-clockwise" }
    );
    println!("Notches: {}", mesh.notches().count());

    Ok(())
}

fn cmd_decompose(
    input: &Path,
    out_dir: &Path,
    no_merge: bool,
    timing: Option<&Path>,
    show_progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    let ring = io::load_ring(input)?;
    info!("Loaded: {} vertices", ring.len());

    let options = DecomposeOptions::new().with_merge(!no_merge);
    let progress = if show_progress {
        create_progress()
    } else {
        Progress::none()
    };
    let result = decompose_with_progress::<u32>(&ring, &options, &progress)?;

    std::fs::create_dir_all(out_dir)?;
    io::save_snapshot(&result.initial, out_dir.join("output1.txt"))?;
    io::save_snapshot(&result.after_split, out_dir.join("output2.txt"))?;
    info!(
        "After split: {} diagonals",
        result.after_split.num_diagonals()
    );
    if let Some(after_merge) = &result.after_merge {
        io::save_snapshot(after_merge, out_dir.join("output3.txt"))?;
        info!("After merge: {} diagonals", after_merge.num_diagonals());
    }

    let elapsed = start.elapsed();
    info!(
        "Decomposed into {} convex pieces ({:.2?})",
        result.num_pieces(),
        elapsed
    );

    if let Some(path) = timing {
        io::append_timing(path, ring.len(), elapsed)?;
    }

    Ok(())
}
