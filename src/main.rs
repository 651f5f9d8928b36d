use std::{fs, process::ExitCode};

use clap::{Parser, Subcommand};
use numfields::{
    Formula, FormulaError, Number, is_valid_formula, scan,
    sequence::{DEFAULT_LENGTH, DEFAULT_SEED},
};

mod logger;

/// numfields generates numeric sequences from small recurrence formulas such
/// as `history[n-1] + history[n-2]`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells numfields to read the formula from a file instead of the
    /// argument.
    #[arg(short, long, global = true)]
    file: bool,

    /// Log more. Repeat for more detail; `-vvv` shows every generated term.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generates a sequence and prints it as comma-separated terms.
    Generate {
        formula: String,

        /// The first terms, copied verbatim. Defaults to `0,1`.
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        seed: Option<Vec<Number>>,

        /// Total number of terms, seed included.
        #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
    },
    /// Prints `valid` or `invalid`; the exit code is 0 or 1 accordingly.
    Validate { formula: String },
    /// Prints the token stream, one token per line.
    Tokens { formula: String },
    /// Prints the parsed tree.
    Tree { formula: String },
}

impl Command {
    fn formula(&self) -> &str {
        match self {
            Self::Generate { formula, .. }
            | Self::Validate { formula }
            | Self::Tokens { formula }
            | Self::Tree { formula } => formula,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logger::init(args.verbose) {
        eprintln!("Failed to install the logger: {e}");
    }

    let source = if args.file {
        match fs::read_to_string(args.command.formula()) {
            Ok(source) => source,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          args.command.formula());
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.command.formula().to_string()
    };

    match run(&args.command, &source) {
        Ok(code) => code,
        Err(e) if e.is_rejected() => {
            eprintln!("The formula is not well-formed. {e}");
            ExitCode::FAILURE
        },
        Err(e) => {
            eprintln!("The formula failed while computing a term. {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(command: &Command, source: &str) -> Result<ExitCode, FormulaError> {
    match command {
        Command::Generate { seed, length, .. } => {
            let seed = seed.as_deref().unwrap_or(DEFAULT_SEED);
            let terms = Formula::parse(source)?.generate(seed, *length)?;
            let rendered = terms.iter().map(ToString::to_string).collect::<Vec<_>>();
            println!("{}", rendered.join(", "));
        },
        Command::Validate { .. } => {
            if is_valid_formula(source) {
                println!("valid");
            } else {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Tokens { .. } => {
            for token in scan(source)? {
                println!("{:>4}  {:<12} {token}", token.line, format!("{:?}", token.kind));
            }
        },
        Command::Tree { .. } => print!("{}", Formula::parse(source)?.tree().tree()),
    }

    Ok(ExitCode::SUCCESS)
}
