//! tabconv CLI - tabular file conversion tool

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use tabconv::{convert_bytes, detect_format, preview_bytes, Error, Format, PreviewResult};

#[derive(Parser)]
#[command(name = "tabconv")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert tabular data files between JSON, CSV, and Excel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file to another format
    Convert {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target format (json, csv, xlsx)
        #[arg(short, long, value_name = "FORMAT")]
        to: Format,

        /// Output file (defaults to the input name with the target extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Preview a file as a paginated table
    #[command(alias = "view")]
    Preview {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-indexed; out-of-range pages are clamped)
        #[arg(short, long, default_value = "1")]
        page: i64,

        /// Rows per page
        #[arg(long, default_value_t = tabconv::DEFAULT_PREVIEW_PAGE_SIZE)]
        page_size: usize,

        /// Emit the preview as JSON instead of an aligned table
        #[arg(long)]
        json: bool,
    },

    /// Detect the format of a file without converting it
    Detect {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> tabconv::Result<()> {
    match cli.command {
        Commands::Convert { input, to, output } => convert_command(&input, to, output),
        Commands::Preview {
            input,
            page,
            page_size,
            json,
        } => preview_command(&input, page, page_size, json),
        Commands::Detect { input } => detect_command(&input),
    }
}

fn convert_command(input: &Path, target: Format, output: Option<PathBuf>) -> tabconv::Result<()> {
    let content = fs::read(input)?;
    let result = convert_bytes(&content, &file_name(input), target)?;

    let output = output.unwrap_or_else(|| input.with_extension(target.extension()));
    fs::write(&output, &result.bytes)?;

    println!(
        "{} {} ({} bytes, {})",
        "Wrote".green().bold(),
        output.display(),
        result.content_len(),
        result.mime_type
    );
    Ok(())
}

fn preview_command(input: &Path, page: i64, page_size: usize, as_json: bool) -> tabconv::Result<()> {
    let content = fs::read(input)?;
    let (format, preview) = preview_bytes(&content, &file_name(input), page, page_size)?;

    if as_json {
        let mut value = serde_json::to_value(&preview)
            .map_err(|e| Error::Serialize(e.to_string()))?;
        value["detected_format"] = serde_json::Value::String(format.tag().to_string());
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| Error::Serialize(e.to_string()))?;
        println!("{text}");
    } else {
        println!("{} {}", "Detected:".bold(), format);
        print_table(&preview);
        println!(
            "{}",
            format!(
                "page {} of {} ({} rows total)",
                preview.current_page, preview.total_pages, preview.total_rows
            )
            .dimmed()
        );
    }
    Ok(())
}

fn detect_command(input: &Path) -> tabconv::Result<()> {
    let content = fs::read(input)?;
    let format = detect_format(&content, &file_name(input)).ok_or(Error::UndetectedFormat)?;
    println!("{format}");
    Ok(())
}

/// Print a preview page as an aligned text table.
fn print_table(preview: &PreviewResult) {
    let mut widths: Vec<usize> = preview
        .columns
        .iter()
        .map(|column| column.chars().count())
        .collect();
    let rows: Vec<Vec<String>> = preview
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_field()).collect())
        .collect();
    for row in &rows {
        for (width, field) in widths.iter_mut().zip(row) {
            *width = (*width).max(field.chars().count());
        }
    }

    let header: Vec<String> = preview
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{column:<width$}"))
        .collect();
    println!("{}", header.join("  ").bold());

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(field, &width)| format!("{field:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
