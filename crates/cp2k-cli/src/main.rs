#![doc = include_str!("../README.md")]
//! CP2K input CLI tool
//!
//! Examples:
//!   cp2k job.inp                  - pretty JSON to stdout
//!   cp2k -                        - read stdin
//!   cp2k job.inp -o job.json      - write JSON to a file
//!   cp2k --format debug job.inp   - indented tree dump

use std::fmt::Write as _;
use std::io::{self, Read};

use clap::{Parser, ValueEnum};
use cp2k_tree::{Block, Document, ParseError, ParseOptions, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_USAGE_ERROR: i32 = 2;
const EXIT_IO_ERROR: i32 = 3;

// ============================================================================
// CLI argument structures
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "cp2k", version)]
#[command(about = "Convert CP2K input files into a JSON tree")]
struct Args {
    /// Input file, or `-` for stdin
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Close sections left open at end of input instead of failing
    #[arg(long)]
    close_at_eof: bool,

    /// Header of the verbatim coordinate section
    #[arg(long, value_name = "NAME", default_value = "&COORD")]
    coord_section: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// JSON object tree
    Json,
    /// Indented tree dump
    Debug,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            match &e {
                CliError::Parse {
                    error,
                    source,
                    filename,
                } => error.write_report(filename, source, io::stderr()),
                _ => eprintln!("error: {e}"),
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    if args.compact && args.format == Format::Debug {
        return Err(CliError::Usage(
            "--compact only applies to --format json".into(),
        ));
    }
    if args.coord_section.trim().is_empty() {
        return Err(CliError::Usage("--coord-section must not be empty".into()));
    }

    let options = ParseOptions::new()
        .close_at_eof(args.close_at_eof)
        .coord_section(args.coord_section.trim());

    let source = read_input(&args.input)?;
    let filename = if args.input == "-" {
        "<stdin>".to_string()
    } else {
        args.input.clone()
    };
    debug!(file = %filename, bytes = source.len(), "read input");

    let doc = Document::parse_with(&source, &options).map_err(|error| CliError::Parse {
        error,
        source: source.clone(),
        filename,
    })?;

    let output = match args.format {
        Format::Json => render_json(&doc, args.compact)?,
        Format::Debug => render_tree(&doc.root),
    };

    match &args.output {
        Some(path) => write_output(path, &output)?,
        None => print!("{output}"),
    }

    Ok(())
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Parse {
        error: ParseError,
        source: String,
        filename: String,
    },
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::Parse { .. } => EXIT_SYNTAX_ERROR,
            CliError::Usage(_) => EXIT_USAGE_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Parse {
                error, filename, ..
            } => write!(f, "{filename}: {error}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(io::Error::other(e))
    }
}

// ============================================================================
// Input / output
// ============================================================================

fn read_input(file: &str) -> Result<String, io::Error> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
    }
}

fn write_output(path: &str, content: &str) -> Result<(), io::Error> {
    if path == "-" {
        print!("{content}");
        Ok(())
    } else {
        std::fs::write(path, content)
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render_json(doc: &Document, compact: bool) -> Result<String, serde_json::Error> {
    let mut out = if compact {
        serde_json::to_string(doc)?
    } else {
        serde_json::to_string_pretty(doc)?
    };
    out.push('\n');
    Ok(out)
}

/// Indented dump of a block, one key per line.
fn render_tree(root: &Block) -> String {
    let mut out = String::new();
    write_block(&mut out, root, 0);
    out
}

fn write_block(out: &mut String, block: &Block, indent: usize) {
    for (key, value) in block.iter() {
        write_entry(out, key, value, indent);
    }
}

fn write_entry(out: &mut String, label: &str, value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Scalar(s) => {
            let _ = writeln!(out, "{pad}{label} = {s:?}");
        }
        Value::Block(block) if block.is_empty() => {
            let _ = writeln!(out, "{pad}{label} {{}}");
        }
        Value::Block(block) => {
            let _ = writeln!(out, "{pad}{label} {{");
            write_block(out, block, indent + 1);
            let _ = writeln!(out, "{pad}}}");
        }
        Value::List(items) => {
            let _ = writeln!(out, "{pad}{label} [");
            for (i, item) in items.iter().enumerate() {
                write_entry(out, &format!("[{i}]"), item, indent + 1);
            }
            let _ = writeln!(out, "{pad}]");
        }
        Value::Coord(coord) => {
            let _ = writeln!(out, "{pad}{label} ({} lines) {{", coord.len());
            for line in &coord.lines {
                let _ = writeln!(out, "{pad}  | {line}");
            }
            let _ = writeln!(out, "{pad}}}");
        }
    }
}
