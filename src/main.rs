use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use cdlis_extract::config::Settings;
use cdlis_extract::report::address::PostalCodeSource;
use cdlis_extract::{DriverRecord, Extractor};

#[derive(Parser)]
#[command(name = "cdlis_extract", about = "Extract CDLIS lookup reports into driver records")]
struct Cli {
    /// Which address tokens fill the postal code (overrides CDLIS_POSTAL_CODE_SOURCE)
    #[arg(long, global = true, value_enum)]
    postal_code_source: Option<PostalArg>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one saved results panel and print the record as JSON
    Extract {
        /// Panel text file
        file: PathBuf,
    },
    /// Extract every .txt panel in a directory
    Batch {
        dir: PathBuf,
        /// Write JSON lines here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Render a record JSON file back into panel text
    Render {
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PostalArg {
    Postal,
    State,
}

impl From<PostalArg> for PostalCodeSource {
    fn from(arg: PostalArg) -> Self {
        match arg {
            PostalArg::Postal => PostalCodeSource::Postal,
            PostalArg::State => PostalCodeSource::State,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load()?.with_postal_code_source(cli.postal_code_source.map(Into::into));
    let extractor = Extractor::from_settings(&settings);

    let result = match cli.command {
        Commands::Extract { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let extraction = extractor
                .extract(&[text])
                .with_context(|| format!("Failed to extract {}", file.display()))?;
            for gap in &extraction.gaps {
                warn!(token = %gap.token, position = gap.position, "check address by hand");
            }
            println!("{}", serde_json::to_string_pretty(&extraction)?);
            Ok(())
        }
        Commands::Batch { dir, out } => {
            let files = list_reports(&dir)?;
            if files.is_empty() {
                println!("No .txt reports in {}", dir.display());
                return Ok(());
            }
            println!("Extracting {} reports...", files.len());
            let mut sink: Box<dyn Write> = match &out {
                Some(path) => Box::new(
                    fs::File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?,
                ),
                None => Box::new(std::io::stdout().lock()),
            };
            let counts = process_reports(&extractor, &files, &mut sink)?;
            sink.flush()?;
            counts.print();
            Ok(())
        }
        Commands::Render { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let record: DriverRecord =
                serde_json::from_str(&json).context("Record JSON does not match the driver record shape")?;
            if record.weight.is_some() != record.eye_color.is_some() {
                warn!("weight and eye color must both be set to render; dropping both");
            }
            println!("{}", record.render_panel());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn list_reports(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

struct BatchCounts {
    ok: usize,
    with_gaps: usize,
    failed: Vec<(String, String)>,
    by_kind: BTreeMap<&'static str, usize>,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Extracted {} reports ({} need address review), {} failed.",
            self.ok,
            self.with_gaps,
            self.failed.len()
        );
        if !self.failed.is_empty() {
            for (kind, n) in &self.by_kind {
                println!("  {:<14} {}", kind, n);
            }
            println!("\n--- Failed reports ---");
            for (name, reason) in &self.failed {
                println!("  {}: {}", truncate(name, 40), reason);
            }
        }
    }
}

fn process_reports(
    extractor: &Extractor,
    files: &[PathBuf],
    sink: &mut dyn Write,
) -> anyhow::Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = BatchCounts {
        ok: 0,
        with_gaps: 0,
        failed: Vec::new(),
        by_kind: BTreeMap::new(),
    };

    for chunk in files.chunks(500) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| {
                let outcome = fs::read_to_string(path)
                    .map_err(|e| ("io", e.to_string()))
                    .and_then(|text| {
                        extractor
                            .extract(&[text])
                            .map_err(|e| (e.kind(), e.to_string()))
                    });
                (path, outcome)
            })
            .collect();

        for (path, outcome) in results {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match outcome {
                Ok(extraction) => {
                    counts.ok += 1;
                    if !extraction.gaps.is_empty() {
                        counts.with_gaps += 1;
                    }
                    let line = serde_json::json!({ "file": name, "record": extraction.record, "gaps": extraction.gaps });
                    writeln!(sink, "{}", line)?;
                }
                Err((kind, reason)) => {
                    warn!(file = %name, kind, "extraction failed: {}", reason);
                    *counts.by_kind.entry(kind).or_default() += 1;
                    counts.failed.push((name, reason));
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(ok = counts.ok, failed = counts.failed.len(), "batch complete");
    Ok(counts)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
