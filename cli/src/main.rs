use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dts_enumify_core::{CasingPolicy, EnumStrategy, TransformOptions, Transformer};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "dts-enumify")]
#[command(about = "Promote string-literal union types in a declaration tree to named enums")]
#[command(version)]
struct Cli {
    /// Input declaration-tree JSON file
    input: PathBuf,

    /// Output rewritten tree file (defaults to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Input schema document(s) to seed the schema-defined-enum index
    /// (repeatable; required for meaningful `schema` strategy runs)
    #[arg(short, long)]
    schema: Vec<PathBuf>,

    /// Promotion strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Schema)]
    strategy: StrategyArg,

    /// Enum member casing policy (default: pascal-cased keys, values as written)
    #[arg(long, value_enum)]
    casing: Option<CasingArg>,

    /// Emit `const enum` declarations
    #[arg(long)]
    const_enums: bool,

    /// Max traversal depth for schema extraction
    #[arg(long, default_value_t = 50)]
    max_depth: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum StrategyArg {
    Schema,
    All,
}

impl From<StrategyArg> for EnumStrategy {
    fn from(val: StrategyArg) -> Self {
        match val {
            StrategyArg::Schema => EnumStrategy::Schema,
            StrategyArg::All => EnumStrategy::All,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CasingArg {
    Value,
    Upper,
    Lower,
    Pascal,
}

impl From<CasingArg> for CasingPolicy {
    fn from(val: CasingArg) -> Self {
        match val {
            CasingArg::Value => CasingPolicy::Value,
            CasingArg::Upper => CasingPolicy::Upper,
            CasingArg::Lower => CasingPolicy::Lower,
            CasingArg::Pascal => CasingPolicy::Pascal,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let options = TransformOptions {
        strategy: cli.strategy.into(),
        casing: cli.casing.map(Into::into),
        const_enums: cli.const_enums,
        max_depth: cli.max_depth,
    };
    let mut transformer = Transformer::new(options);

    // Scan all schema documents before touching the declaration tree —
    // the schema strategy resolves names against a complete index.
    for path in &cli.schema {
        let schema = read_json(path)
            .with_context(|| format!("Failed to read schema from: {}", path.display()))?;
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        transformer.scan_schema(&id, &schema);
    }

    if matches!(cli.strategy, StrategyArg::Schema) && cli.schema.is_empty() {
        eprintln!(
            "Warning: No schema files specified. Under the `schema` strategy nothing will be promoted."
        );
    }

    let document = read_json(&cli.input)
        .with_context(|| format!("Failed to read declaration tree from: {}", cli.input.display()))?;

    let result = transformer
        .transform_document(&document)
        .map_err(|e| anyhow::Error::from(e).context("Transformation failed"))?;

    write_json(&result, cli.output.as_ref(), cli.format)?;

    Ok(())
}

fn read_json(path: &PathBuf) -> Result<serde_json::Value> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;

    Ok(())
}
