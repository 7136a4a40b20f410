use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{bail, Context};
use clap::Parser;
use ocrlines::{vision::AnnotateResponse, LineReaderBuilder, PageSize, ReaderOptions};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Rebuild the text lines of a page from an OCR annotate response.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Annotate response JSON (single or batch).
    response: PathBuf,

    /// Source image; its dimensions define the page size.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Page width in pixels, when no image is given.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Page height in pixels, when no image is given.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// JSON file with reader options; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    slope_filter: Option<f64>,

    #[arg(long)]
    y_filter: Option<i32>,

    #[arg(long)]
    points_per_line: Option<usize>,

    /// Write the lines to this file instead of stdout.
    #[arg(long, conflicts_with = "save")]
    output: Option<PathBuf>,

    /// Write the lines to "<image stem> - out.txt" beside the image.
    #[arg(long, requires = "image", conflicts_with = "json")]
    save: bool,

    /// Print the lines as a JSON array.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn options(&self) -> anyhow::Result<ReaderOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid reader options in {}", path.display()))?
            }
            None => ReaderOptions::default(),
        };
        if let Some(slope_filter) = self.slope_filter {
            options.slope_filter = slope_filter;
        }
        if let Some(y_filter) = self.y_filter {
            options.y_filter = y_filter;
        }
        if let Some(points_per_line) = self.points_per_line {
            options.points_per_line = points_per_line;
        }
        Ok(options)
    }

    fn page_size(&self) -> anyhow::Result<Option<PageSize>> {
        if let Some(image) = &self.image {
            let (width, height) = image::image_dimensions(image)
                .with_context(|| format!("Failed to read dimensions of {}", image.display()))?;
            return Ok(Some(PageSize { width, height }));
        }
        Ok(self
            .width
            .zip(self.height)
            .map(|(width, height)| PageSize { width, height }))
    }

    fn output_path(&self) -> Option<PathBuf> {
        match (&self.output, &self.image) {
            (Some(output), _) => Some(output.clone()),
            (None, Some(image)) if self.save => Some(saved_text_path(image)),
            _ => None,
        }
    }
}

fn saved_text_path(image: &Path) -> PathBuf {
    let stem = image.file_stem().unwrap_or_default().to_string_lossy();
    image.with_file_name(format!("{stem} - out.txt"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let reader = LineReaderBuilder::new()
        .options(cli.options()?)
        .build()
        .context("Failed to build line reader")?;

    let raw = fs::read_to_string(&cli.response)
        .with_context(|| format!("Failed to read {}", cli.response.display()))?;
    let response = AnnotateResponse::from_json(&raw)
        .with_context(|| format!("Failed to parse {}", cli.response.display()))?;
    let page = response
        .to_page(cli.page_size()?)
        .context("Failed to build page")?;
    if page.size.width == 0 {
        bail!("Page width is zero");
    }

    let start = Instant::now();
    let lines = reader.read_page(&page).context("Failed to read lines")?;
    log::debug!("Read {} lines in {:?}", lines.len(), start.elapsed());

    let text = render(&lines, cli.json)?;
    match cli.output_path() {
        Some(path) => {
            fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} lines to {}", lines.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// One line per row, each newline-terminated, or a JSON array.
fn render(lines: &[String], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(lines)? + "\n");
    }
    Ok(lines.iter().map(|line| format!("{line}\n")).collect())
}
