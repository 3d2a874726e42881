use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use lox_syntax as lox;

use lox::ast_printer::AstPrinter;
use lox::error::{Diagnostics, Reporter};
use lox::parser::Parser;
use lox::scanner::{self, Scanner};

/// Exit status for malformed input (sysexits `EX_DATAERR`).
const EXIT_DATAERR: i32 = 65;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox front end: scanner and parser inspection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses input from a file and prints its syntax tree
    Parse {
        filename: Option<PathBuf>,

        /// Parse a single expression instead of a program
        #[arg(long)]
        expr: bool,

        /// Print the tree as JSON instead of prefix form
        #[arg(long)]
        json: bool,
    },
}

/// Reads the contents of a file as UTF‑8 text
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf).context(format!("File {:?} is not valid UTF-8", filename))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'lox_syntax::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("lox_syntax::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env() // RUST_LOG still wins
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn report_all(diagnostics: &Diagnostics) {
    for e in diagnostics.errors() {
        eprintln!("{}", e);
    }
}

fn tokenize(source: &str) -> bool {
    let mut tokenized = true;

    for token in Scanner::new(source) {
        match token {
            Ok(token) => println!("{}", token),

            Err(e) => {
                tokenized = false;

                debug!("Tokenization debug: {}", e);

                eprintln!("{}", e);
            }
        }
    }

    tokenized
}

fn parse(source: &str, expr: bool, json: bool) -> Result<bool> {
    let mut diagnostics = Diagnostics::new();
    let tokens = scanner::scan(source, &mut diagnostics);
    let mut parser = Parser::new(&tokens, &mut diagnostics);

    let rendered: Option<String> = if expr {
        match parser.parse_expression() {
            Some(e) if json => Some(serde_json::to_string_pretty(&e)?),
            Some(e) => Some(AstPrinter::print(&e)),
            None => None,
        }
    } else {
        let program = parser.parse();
        if json {
            Some(serde_json::to_string_pretty(&program)?)
        } else {
            Some(AstPrinter::print_program(&program))
        }
    };

    report_all(&diagnostics);

    if diagnostics.had_error() {
        return Ok(false);
    }

    if let Some(rendered) = rendered {
        println!("{}", rendered);
    }

    Ok(true)
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .parse_default_env()
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let (had_input, ok) = match args.commands {
        Commands::Tokenize { filename } => match filename {
            Some(filename) => {
                info!("Running Tokenize subcommand");
                let source = read_file(filename)?;
                (true, tokenize(&source))
            }
            None => (false, true),
        },

        Commands::Parse {
            filename,
            expr,
            json,
        } => match filename {
            Some(filename) => {
                info!("Running Parse subcommand");
                let source = read_file(filename)?;
                (true, parse(&source, expr, json)?)
            }
            None => (false, true),
        },
    };

    if !had_input {
        info!("No filepath provided");
        println!("No input filepath was provided. Exiting...");
        return Ok(());
    }

    if !ok {
        debug!("Front end reported errors, exiting with code {}", EXIT_DATAERR);
        std::process::exit(EXIT_DATAERR);
    }

    Ok(())
}
