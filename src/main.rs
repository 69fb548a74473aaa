use clap::Parser;
use mmsolve::solver::{
    FaerLuEngine, LuStrategy, MatrixMarketSolver, SolveSettings, SolverError,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(
    about = "Solve A x = 1 for a square Matrix Market matrix with sparse LU and verify the solution"
)]
struct Cli {
    /// Matrix Market file (coordinate, real, general or symmetric)
    #[arg(default_value = "bfwb62.mtx")]
    matrix: PathBuf,

    /// "1" prints the matrix summary, settings and timings
    #[arg(default_value = "0")]
    verbose: String,

    /// "1" requests the unsymmetric factorization strategy
    #[arg(default_value = "0")]
    enforce_unsymmetric: String,

    /// JSON file with solver settings, applied before the positional options
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        // the solver has already reported the offending entry
        Err(e) if e.is_tolerance_failure() => ExitCode::from(1),
        Err(e) => {
            println!("{e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<(), SolverError> {
    let mut settings = match &cli.settings {
        Some(path) => SolveSettings::<f64>::from_json_file(path)?,
        None => SolveSettings::<f64>::default(),
    };
    if cli.verbose == "1" {
        settings.verbose = true;
    }
    if cli.enforce_unsymmetric == "1" {
        settings.strategy = LuStrategy::Unsymmetric;
    }

    let mut solver = MatrixMarketSolver::new(FaerLuEngine::new(), settings)?;
    solver.solve_file(&cli.matrix)?;
    Ok(())
}
