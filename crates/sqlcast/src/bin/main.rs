//! sqlcast command-line interface

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sqlcast::cli::cast::{self, SourceKind};
use sqlcast::cli::matrix;
use sqlcast::cli::output::{self, OutputFormat};
use std::path::PathBuf;

/// SQL CAST evaluation tool
#[derive(Parser)]
#[command(name = "sqlcast")]
#[command(author, version, about = "Evaluate SQL CAST expressions", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a literal to a SQL type
    Cast {
        /// Literal to cast
        value: String,

        /// How the literal is typed
        #[arg(long, value_enum, default_value = "string")]
        from: SourceKind,

        /// Target type (SIGNED, UNSIGNED, DOUBLE, DECIMAL, CHAR, DATE, TIME, JSON, ...)
        #[arg(long)]
        to: String,

        /// Unsigned integer target
        #[arg(long)]
        unsigned: bool,

        /// Display width or string length
        #[arg(long)]
        len: Option<u32>,

        /// Decimal scale or fractional seconds precision
        #[arg(long)]
        scale: Option<u8>,

        /// Binary charset for string targets
        #[arg(long)]
        binary: bool,

        /// Fail on overflow and truncation instead of warning
        #[arg(long)]
        strict: bool,

        /// Parse string sources as JSON documents
        #[arg(long, conflicts_with = "json_scalar")]
        json_text: bool,

        /// Wrap string sources as JSON strings
        #[arg(long)]
        json_scalar: bool,

        /// Date used to anchor TIME values (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Print the source × target routine table
    Matrix,
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);

    let result = match cli.command {
        Commands::Cast {
            value,
            from,
            to,
            unsigned,
            len,
            scale,
            binary,
            strict,
            json_text,
            json_scalar,
            today,
        } => {
            let parse_json = match (json_text, json_scalar) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let config = cast::CastConfig {
                value,
                from,
                to,
                unsigned,
                len,
                scale,
                binary,
                strict,
                parse_json,
                today,
                verbose: cli.verbose,
                output_format: cli.format,
                output_file: cli.output.clone(),
            };
            cast::cast(config)
        }

        Commands::Matrix => matrix::matrix(matrix::MatrixConfig {
            output_format: cli.format,
            output_file: cli.output.clone(),
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
