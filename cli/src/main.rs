//! epubqa CLI - EPUB question/answer extraction tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use epubqa::package::is_content_item;
use epubqa::{
    render, EpubPackage, ExtractOptions, Extraction, JsonFormat, Signature, SignaturePreset,
};

/// Number of pairs shown in the closing summary.
const SAMPLE_PAIRS: usize = 3;
/// Answer characters shown per sample pair.
const PREVIEW_CHARS: usize = 200;

#[derive(Parser)]
#[command(name = "epubqa")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract question/answer pairs from EPUB files to JSON", long_about = None)]
struct Cli {
    /// Input EPUB file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Heading signature preset
    #[arg(long, value_enum, default_value = "generic")]
    preset: Preset,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract question/answer pairs to JSON
    Extract {
        /// Input EPUB file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON file (defaults to <FILE stem>_qa.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Heading signature preset
        #[arg(long, value_enum, default_value = "generic")]
        preset: Preset,

        /// Signature JSON file (overrides --preset)
        #[arg(long, value_name = "FILE", env = "EPUBQA_SIGNATURE")]
        signature: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip documents the HTML parser reports markup errors for
        #[arg(long)]
        strict: bool,

        /// Write the output file even when no pairs were found
        #[arg(long)]
        write_empty: bool,
    },

    /// List content documents in package order
    List {
        /// Input EPUB file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Also show skipped manifest items
        #[arg(short, long)]
        all: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// h2-h4 headings classed *heading*/*title*, questions ending in ？
    Generic,
    /// bodycontent-second-title headings with bodycontent-text answers
    Bodycontent,
}

impl From<Preset> for SignaturePreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Generic => SignaturePreset::Generic,
            Preset::Bodycontent => SignaturePreset::Bodycontent,
        }
    }
}

struct ExtractArgs<'a> {
    input: &'a Path,
    output: Option<&'a Path>,
    preset: Preset,
    signature: Option<&'a Path>,
    compact: bool,
    strict: bool,
    write_empty: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            preset,
            signature,
            compact,
            strict,
            write_empty,
        }) => cmd_extract(ExtractArgs {
            input: &input,
            output: output.as_deref(),
            preset,
            signature: signature.as_deref(),
            compact,
            strict,
            write_empty,
        }),
        Some(Commands::List { input, all }) => cmd_list(&input, all),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(ExtractArgs {
                    input: &input,
                    output: cli.output.as_deref(),
                    preset: cli.preset,
                    signature: None,
                    compact: false,
                    strict: false,
                    write_empty: false,
                })
            } else {
                println!("{}", "Usage: epubqa <FILE> [OUTPUT]".yellow());
                println!("       epubqa --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_qa.json", stem))
}

fn cmd_extract(args: ExtractArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let signature = match args.signature {
        Some(path) => {
            log::debug!("Loading signature from {}", path.display());
            Signature::from_file(path)?
        }
        None => SignaturePreset::from(args.preset).signature(),
    };

    let mut options = ExtractOptions::new().with_signature(signature);
    if args.strict {
        options = options.strict();
    }

    let extraction = epubqa::extract_file_with_options(args.input, &options)?;

    let output = args
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(args.input));

    if extraction.is_empty() && !args.write_empty {
        println!(
            "{} no pairs extracted, {} not written",
            "Warning:".yellow().bold(),
            output.display()
        );
        return Ok(());
    }

    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    render::write_json(&output, &extraction.pairs, format)?;

    print_summary(&extraction);
    println!("\n{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn print_summary(extraction: &Extraction) {
    let stats = &extraction.stats;

    println!("\n{}", "Extraction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Documents".bold(), stats.documents_total);
    println!("{}: {}", "With pairs".bold(), stats.documents_with_pairs);
    println!("{}: {}", "Failed".bold(), stats.documents_failed);
    println!("{}: {}", "Total pairs".bold(), stats.pair_count);

    if extraction.is_empty() {
        return;
    }

    println!("\n{}", "Sample Pairs".cyan().bold());
    for (i, pair) in extraction.pairs.iter().take(SAMPLE_PAIRS).enumerate() {
        println!("\n{} {}", "Pair".bold(), i + 1);
        println!("{}: {}", "Q".green(), pair.question());
        println!("{}: {}...", "A".green(), pair.answer_preview(PREVIEW_CHARS));
    }
}

fn cmd_list(input: &Path, all: bool) -> Result<(), Box<dyn std::error::Error>> {
    let package = EpubPackage::open(input)?;

    println!("{}: {}", "Package document".bold(), package.opf_path());
    println!("{}", "─".repeat(40).dimmed());

    let mut count = 0;
    for item in package.manifest() {
        if is_content_item(item) {
            println!("  {} {}", "+".green(), item.href);
            count += 1;
        } else if all {
            println!(
                "  {} {} {}",
                "-".dimmed(),
                item.href.dimmed(),
                format!("({})", item.media_type).dimmed()
            );
        }
    }

    println!("\n{} {} content documents", "Done!".green().bold(), count);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "epubqa".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("EPUB question/answer extraction tool");
    println!();
    println!("License: MIT");
}
