use std::io;

use clap::Parser;
use log::LevelFilter;
use setc::{run, OutputMode, RunOptions};

#[derive(Debug, Parser)]
#[command(
    name = "setc",
    version,
    about = "Evaluate set-algebra expressions over integer sets",
    long_about = "setc reads one expression of integer set literals combined with\n\
        union (U), intersection (^) and difference (\\), grouped with parentheses,\n\
        and prints the sorted result set.\n\n\
        EXAMPLES:\n\
        \n  echo '[1,2,3]U[3,4]' | setc          Prints [1,2,3,4]\n\
        \n  setc '([1,2]U[3])^[2,3]'             Prints [2,3]\n\
        \n  setc --json '[1,2]\\[2]'              Prints {\"result\":[1]}",
    after_help = "Intersection binds tighter than union and difference; operators of equal\n\
        precedence are applied left to right."
)]
struct Cli {
    /// Expression to evaluate (reads one line from stdin if not provided)
    #[arg(value_name = "EXPR")]
    expression: Option<String>,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write the result or error as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Exit with 1 on input errors and 2 on internal errors instead of 0
    #[arg(long = "strict-exit")]
    strict_exit: bool,
}

impl Cli {
    fn options(&self) -> RunOptions {
        RunOptions {
            mode: if self.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            },
            strict_exit: self.strict_exit,
            verbose: self.verbose > 0,
        }
    }
}

fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbose))
        .target(env_logger::Target::Stderr)
        .parse_default_env();
    let _ = builder.try_init();
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run(
        cli.expression.as_deref(),
        stdin.lock(),
        &mut stdout,
        &mut stderr,
        &cli.options(),
    )
}

fn main() {
    std::process::exit(run_cli());
}
