use clap::Parser;
use prd_template::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Transforms a PRD QC table into a dialogue template table
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the PRD QC table (.json records, or .xlsx/.xls/.ods)
    input_path: PathBuf,

    /// Where to write the template rows as JSON [default: transformed_<input>.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worksheet to read from a workbook (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Refuse the table if any numeric field is malformed
    #[arg(long)]
    strict: bool,

    /// Additional accepted image extension (repeatable)
    #[arg(long = "allow-extension", value_name = "EXT")]
    allow_extensions: Vec<String>,

    /// Map a sheet header onto a required column, as HEADER=COLUMN (repeatable)
    #[arg(long = "alias", value_name = "HEADER=COLUMN")]
    aliases: Vec<String>,

    /// Log the scan and stitching decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run_transformation(cli);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_transformation(cli: Cli) {
    let total_start = Instant::now();
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input_path));

    println!("=== PRD QC TABLE TRANSFORMER ===");
    println!("Input:  {}", cli.input_path.display());
    println!("Output: {}", output_path.display());

    // --- 1. Loading ---
    let load_start = Instant::now();
    let loader = cli
        .aliases
        .iter()
        .fold(TableLoader::new(), |loader, alias| match alias.split_once('=') {
            Some((header, column)) => loader.with_column_alias(header.trim(), column.trim()),
            None => exit_with_error(&format!("Invalid alias '{}', expected HEADER=COLUMN", alias)),
        });
    let loaded = load_table(&loader, &cli.input_path, cli.sheet.as_deref())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load input table: {}", e)));
    let load_duration = load_start.elapsed();
    println!("Loaded {} input rows", loaded.table.len());

    // --- 2. Transformation and validation ---
    let validator = cli
        .allow_extensions
        .iter()
        .fold(ImageLinkValidator::default(), |v, ext| v.with_extension(ext));
    let engine = TransformEngine::builder()
        .strict_fields(cli.strict)
        .validator(validator)
        .build();

    let transform_start = Instant::now();
    let transformation = match engine.transform_loaded(loaded) {
        Ok(transformation) => transformation,
        Err(TransformError::ImageLinks(violations)) => {
            eprintln!("\nValidation failed, no output written:");
            for violation in &violations {
                eprintln!("  - {}", violation);
            }
            std::process::exit(1);
        }
        Err(e) => exit_with_error(&e.to_string()),
    };
    let transform_duration = transform_start.elapsed();

    if !transformation.field_errors.is_empty() {
        println!(
            "\nWarning: {} malformed field(s) were treated as empty:",
            transformation.field_errors.len()
        );
        for error in &transformation.field_errors {
            println!("  - {}", error);
        }
    }

    // --- 3. Output ---
    write_json_records(&transformation.rows, &output_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    // --- 4. Summary ---
    let summary = TransformSummary::from_rows(&transformation.rows);
    println!("\n=== VALIDATION ===");
    println!("Question rows: {}", summary.question_rows);
    println!("Intent rows:   {}", summary.intent_rows);
    println!("Total rows:    {}", summary.total_rows);
    if summary.has_unique_descriptions() {
        println!("All intent descriptions are unique");
    } else {
        println!("Warning: duplicate intent descriptions found:");
        for description in &summary.duplicate_descriptions {
            println!("  - {}", description);
        }
    }

    println!("\n--- Performance Summary ---");
    println!("Loading:         {:?}", load_duration);
    println!("Transformation:  {:?}", transform_duration);
    println!("Total:           {:?}", total_start.elapsed());
    println!(
        "\nSuccessfully transformed '{}' to '{}'",
        cli.input_path.display(),
        output_path.display()
    );
}

fn load_table(
    loader: &TableLoader,
    path: &Path,
    sheet: Option<&str>,
) -> std::result::Result<LoadedTable, SchemaError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "json" => loader.load(prd_template::table::read_json_records(path)?),
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => {
            let source = SpreadsheetSource::new(path);
            match sheet {
                Some(sheet) => loader.load(source.with_sheet(sheet)),
                None => loader.load(source),
            }
        }
        other => Err(SchemaError::UnsupportedFormat(other.to_string())),
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("transformed_{}.json", stem))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
