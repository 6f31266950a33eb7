//! worksheet CLI - compile problem images into a PDF worksheet

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use worksheet::{
    builder::compile_dir_with, render, CompileOptions, Document, JsonFormat, RenderOptions,
};

#[derive(Parser)]
#[command(name = "worksheet")]
#[command(version)]
#[command(about = "Compile a folder of problem images into a PDF worksheet", long_about = None)]
struct Cli {
    /// Directory containing PNG/JPG problem images
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Output PDF file
    #[arg(short, long, value_name = "FILE", default_value = "homework_worksheet.pdf")]
    out: PathBuf,

    /// Trim white borders and large blank gaps from each image
    #[arg(long)]
    trim: bool,

    /// Print the page layout as JSON instead of writing a PDF
    #[arg(long)]
    dry_run: bool,

    /// Output compact JSON with --dry-run
    #[arg(long, requires = "dry_run")]
    compact: bool,

    /// Author recorded in the PDF document information
    #[arg(long, value_name = "NAME")]
    author: Option<String>,

    /// Do not print per-page progress
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn compile_options(&self) -> CompileOptions {
        let mut options = CompileOptions::new();
        if self.trim {
            options = options.trimmed();
        }
        if let Some(author) = &self.author {
            options = options.with_author(author.clone());
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = if cli.dry_run {
        cmd_dry_run(&cli)
    } else {
        cmd_compile(&cli)
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_compile(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!(
        "Compiling {} into {} (trim: {})",
        cli.dir.display(),
        cli.out.display(),
        cli.trim
    );
    let doc = build(&cli.dir, &cli.compile_options(), cli.quiet, false)?;
    render::write_pdf(&doc, &cli.out, &RenderOptions::default())?;

    println!(
        "{} Worksheet saved as {}",
        "Success!".green().bold(),
        cli.out.display()
    );
    Ok(())
}

fn cmd_dry_run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("Dry run for {} (trim: {})", cli.dir.display(), cli.trim);
    // JSON owns stdout, so progress goes to stderr.
    let doc = build(&cli.dir, &cli.compile_options(), cli.quiet, true)?;
    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    println!("{}", render::to_json(&doc, format)?);
    Ok(())
}

/// Scan `dir` and lay out one page per image, reporting progress.
fn build(
    dir: &Path,
    options: &CompileOptions,
    quiet: bool,
    progress_to_stderr: bool,
) -> Result<Document, Box<dyn std::error::Error>> {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let result = compile_dir_with(dir, options, |index, total, entry| {
        pb.set_length(total as u64);
        pb.set_position(index as u64);
        if !quiet {
            let line = format!("{} {}...", "Adding".cyan(), entry.title);
            pb.suspend(|| {
                if progress_to_stderr {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            });
        }
        pb.set_message(entry.file_name.clone());
    });

    match result {
        Ok(doc) => {
            pb.finish_and_clear();
            log::debug!("Laid out {} pages", doc.page_count());
            Ok(doc)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}
