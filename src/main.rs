use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dgtd::io::TextRecorder;
use dgtd::simulation::solve_files;
use log::{LevelFilter, error, info};
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[command(name = "dgtd")]
#[command(about = "One-dimensional nodal Discontinuous Galerkin time-domain solver")]
#[command(version)]
struct Cli {
    /// Gmsh 4.1 ASCII mesh file (.msh)
    mesh: PathBuf,
    /// JSON solver input
    input: PathBuf,
    /// Directory for times.txt, coordinates.txt and one file per field
    #[arg(short, long, default_value = "results")]
    output_dir: PathBuf,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Could not initialize logging: {}", e);
    }

    println!("dgtd {}", env!("CARGO_PKG_VERSION"));
    println!("Discontinuous Galerkin time-domain solver");
    println!();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> dgtd::Result<()> {
    let mut recorder = TextRecorder::new(&cli.output_dir)?;
    let fields = solve_files(&cli.mesh, &cli.input, &mut recorder)?;
    recorder.flush()?;

    info!(
        "Wrote {} elements x {} nodes to {} (max |u| = {:.6})",
        fields.n_elements(),
        fields.n_nodes(),
        recorder.dir().display(),
        fields.max_abs()
    );
    Ok(())
}
