use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use sparse_matrix::utils::dense_grid;
use sparse_matrix::{
    read_matrix_with, write_matrix, BoundsPolicy, MatrixConfig, MultiplyStrategy, Operation,
    SparseMatrix, ZeroPolicy,
};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Add, subtract or multiply two sparse matrix files")]
struct Cli {
    /// Operation to perform: add, subtract or multiply (case-insensitive)
    operation: String,

    /// First matrix file
    matrix_a: PathBuf,

    /// Second matrix file
    matrix_b: PathBuf,

    /// Also write the result to this file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Drop entries whose result is zero
    #[arg(long)]
    prune_zeros: bool,

    /// Reject entries outside the declared dimensions
    #[arg(long)]
    strict_bounds: bool,

    /// Multiplication algorithm
    #[arg(long, value_enum, default_value_t = Strategy::RowJoin)]
    strategy: Strategy,

    /// Print the result as a dense grid as well
    #[arg(long)]
    dense: bool,

    /// Suppress progress messages
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    NestedScan,
    RowJoin,
}

impl Cli {
    fn config(&self) -> MatrixConfig {
        MatrixConfig {
            zero_policy: if self.prune_zeros {
                ZeroPolicy::Prune
            } else {
                ZeroPolicy::Keep
            },
            multiply_strategy: match self.strategy {
                Strategy::NestedScan => MultiplyStrategy::NestedScan,
                Strategy::RowJoin => MultiplyStrategy::RowJoin,
            },
            bounds_policy: if self.strict_bounds {
                BoundsPolicy::Strict
            } else {
                BoundsPolicy::Unchecked
            },
        }
    }

    fn progress(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}

fn load(cli: &Cli, path: &Path, config: &MatrixConfig) -> sparse_matrix::Result<SparseMatrix> {
    let matrix = read_matrix_with(path, config)?;
    cli.progress(&format!(
        "Loaded {} with dimensions {:?} ({} entries)",
        path.display(),
        matrix.dimensions(),
        matrix.nnz()
    ));
    Ok(matrix)
}

fn run(cli: &Cli) -> sparse_matrix::Result<()> {
    let operation: Operation = cli.operation.parse()?;
    let config = cli.config();

    cli.progress("Loading matrices...");
    let a = load(cli, &cli.matrix_a, &config)?;
    let b = load(cli, &cli.matrix_b, &config)?;

    let dims = operation.check_dimensions(a.dimensions(), b.dimensions())?;
    cli.progress(&format!("Computing {operation}, result dimensions {dims:?}"));

    let result = operation.apply(&a, &b, &config)?;

    let grid = if cli.dense {
        Some(dense_grid(&result)?)
    } else {
        None
    };

    print!("{result}");
    if let Some(grid) = grid {
        println!();
        print!("{grid}");
    }

    if let Some(path) = &cli.output {
        write_matrix(path, &result)?;
        cli.progress(&format!("Result written to {}", path.display()));
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
