pub mod capacity;
pub mod dimacs;
pub mod error;
pub mod formula;
pub mod generate;
pub mod log;
pub mod params;
pub mod sample;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    error::{Error, Result},
    log::info,
    params::{Dimensions, Params, Width},
};

/// Generate random DQBF instances in DQDIMACS format.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Number of clauses
    #[arg(short = 'm', default_value_t = 50)]
    clauses: usize,
    /// Existential clause width, or `free`
    #[arg(short = 'w', default_value_t = Width::Fixed(4))]
    existential_width: Width,
    /// Universal clause width, or `free`
    #[arg(short = 'v', default_value_t = Width::Fixed(3))]
    universal_width: Width,
    /// Number of existential variables
    #[arg(short = 'x', default_value_t = 12)]
    existentials: usize,
    /// Number of universal variables
    #[arg(short = 'u', default_value_t = 6)]
    universals: usize,
    /// Size of each dependency set, or `free`
    #[arg(short = 'd', default_value_t = Width::Fixed(3))]
    dependencies: Width,
    /// Sample every parameter p uniformly from [p(1-s), p(1+s)]
    #[arg(short = 's', default_value_t = 0., allow_negative_numbers = true)]
    jitter: f64,
    /// Seed for the random generator; drawn from the OS if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Write the instance here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Give up after this many clause draws
    #[arg(long)]
    max_draws: Option<u64>,
    /// More log output; repeat for more
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn params(&self) -> Result<Params> {
        let nominal = Dimensions {
            universals: self.universals,
            existentials: self.existentials,
            clauses: self.clauses,
            universal_width: self.universal_width,
            existential_width: self.existential_width,
            dependencies: self.dependencies,
        };
        Params::new(nominal, self.jitter)
    }
}

fn run(args: &Args) -> Result<()> {
    let params = args.params()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let dims = params.sample(&mut rng);
    let instance = generate::generate(&mut rng, &dims, args.max_draws)?;

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);
    dimacs::write_instance(&mut out, &instance)?;
    out.flush()?;
    Ok(())
}

/// Fatal diagnostic line, printed regardless of the log filter.
fn fatal(e: &Error) -> String {
    format!("error: {e}")
}

fn main() -> ExitCode {
    let args = Args::parse();
    crate::log::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", fatal(&e));
            ExitCode::FAILURE
        }
    }
}
