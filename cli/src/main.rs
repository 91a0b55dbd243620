use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use damos::{DecodeOptions, EncodeOptions, Grammar, Indent, Number, Scheme};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "damos", version, about = "DAMOS scheme compiler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode schemes and print them as JSON or single lines.
    Schemes(SchemesArgs),
    /// Convert one magnitude and print it in readable form.
    Value(ValueArgs),
}

#[derive(Args, Debug)]
struct SchemesArgs {
    /// Scheme file path or literal scheme text. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Output layout.
    #[arg(long, value_enum, value_name = "format", default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Input grammar: auto (JSON, then single lines), json, lines.
    #[arg(long, value_enum, value_name = "grammar", default_value_t = GrammarArg::Auto)]
    grammar: GrammarArg,

    /// JSON indentation size; 0 prints one line (default: 4).
    #[arg(long, value_name = "number", default_value_t = 4)]
    indent: usize,

    /// Write numeric extremes instead of `max` in single line output.
    #[arg(long = "no-sentinels", action = ArgAction::SetFalse, default_value_t = true)]
    sentinels: bool,

    /// Treat the input as scheme text even when it names a file.
    #[arg(long = "no-read-files", action = ArgAction::SetFalse, default_value_t = true)]
    read_files: bool,
}

#[derive(Args, Debug)]
struct ValueArgs {
    /// How the text is interpreted.
    #[arg(value_enum)]
    kind: ValueKind,

    /// Magnitude text, e.g. "4 KiB", "2 h 1 m", "12.5 %", "max".
    text: String,

    /// Print raw digits instead of grouped, unit-suffixed text.
    #[arg(short, long)]
    machine_friendly: bool,

    /// Round durations to their largest unit below days.
    #[arg(long)]
    approx: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    Lines,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GrammarArg {
    Auto,
    Json,
    Lines,
}

impl From<GrammarArg> for Grammar {
    fn from(value: GrammarArg) -> Self {
        match value {
            GrammarArg::Auto => Grammar::Auto,
            GrammarArg::Json => Grammar::Json,
            GrammarArg::Lines => Grammar::Lines,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ValueKind {
    Number,
    Bytes,
    Duration,
    Percent,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse().command {
        Command::Schemes(args) => run_schemes(&args),
        Command::Value(args) => run_value(&args),
    }
}

fn run_schemes(args: &SchemesArgs) -> Result<(), Box<dyn Error>> {
    let options = DecodeOptions::new()
        .with_grammar(args.grammar.into())
        .with_read_files(args.read_files);

    let schemes = match args.input.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            damos::from_str_with_options(&buf, &options)?
        }
        Some(input) => damos::from_input_with_options(input, &options)?,
    };
    debug!(count = schemes.len(), "decoded schemes");

    let encode_options = EncodeOptions::new()
        .with_indent(Indent::Spaces(args.indent))
        .with_sentinels(args.sentinels);

    with_output_writer(args.output.as_deref(), |writer| {
        write_schemes(writer, &schemes, args.format, &encode_options)
    })
}

fn write_schemes(
    writer: &mut dyn Write,
    schemes: &[Scheme],
    format: FormatArg,
    options: &EncodeOptions,
) -> Result<(), Box<dyn Error>> {
    match format {
        FormatArg::Json => damos::to_writer_with_options(writer, schemes, options)?,
        FormatArg::Lines => {
            let lines = damos::to_lines_with_options(schemes, options)?;
            writer.write_all(lines.as_bytes())?;
        }
    }
    Ok(())
}

fn run_value(args: &ValueArgs) -> Result<(), Box<dyn Error>> {
    let mf = args.machine_friendly;
    let rendered = match args.kind {
        ValueKind::Number => match damos::parse_number(&args.text)? {
            Number::Int(n) => damos::format_number(n, mf),
            Number::Float(f) => f.to_string(),
        },
        ValueKind::Bytes => damos::format_bytes(damos::parse_bytes(&args.text)?, mf),
        ValueKind::Duration => {
            let ns = damos::parse_ns(&args.text)?;
            if args.approx {
                damos::format_duration_approx(ns, mf)
            } else {
                damos::format_duration_exact(ns, mf)
            }
        }
        ValueKind::Percent => {
            let percent = damos::parse_percent(&args.text)?;
            if mf {
                percent.to_string()
            } else {
                format!("{percent} %")
            }
        }
    };
    println!("{rendered}");
    Ok(())
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) if path != "-" => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}
