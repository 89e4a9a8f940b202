//! Diff command
//!
//! Usage: linediff diff <BEFORE> <AFTER> [--config <FILE>] [--full] [--format text|json]

use super::render::{render_json, render_text};
use clap::{Args, ValueEnum};
use linediff_core::core_types::RequestContext;
use linediff_core::{
    split_lines, DiffConfig, Differ, ExError, ExErrorKind, Granularity, HighlightConfig,
    LineComparator,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Original file
    pub before: PathBuf,

    /// Modified file
    pub after: PathBuf,

    /// TOML configuration file (default: built-in defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show every line instead of compacting unchanged runs
    #[arg(long, conflicts_with = "context")]
    pub full: bool,

    /// Unchanged lines kept around each change
    #[arg(short = 'C', long, allow_negative_numbers = true)]
    pub context: Option<i64>,

    /// How lines are compared
    #[arg(long, value_enum)]
    pub comparator: Option<ComparatorArg>,

    /// Unit of inline highlighting
    #[arg(long, value_enum)]
    pub granularity: Option<GranularityArg>,

    /// Markup tag wrapped around highlighted spans, e.g. `b` or `<span class="d">`
    #[arg(long)]
    pub tag: Option<String>,

    /// Tab stop width
    #[arg(long, allow_negative_numbers = true)]
    pub tab_width: Option<i64>,

    /// Disable inline highlighting
    #[arg(long)]
    pub no_highlight: bool,

    /// Escape HTML special characters before highlighting
    #[arg(long)]
    pub escape_html: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ComparatorArg {
    Exact,
    CollapseWhitespace,
    IgnoreWhitespace,
}

impl From<ComparatorArg> for LineComparator {
    fn from(arg: ComparatorArg) -> Self {
        match arg {
            ComparatorArg::Exact => LineComparator::Exact,
            ComparatorArg::CollapseWhitespace => LineComparator::CollapseWhitespace,
            ComparatorArg::IgnoreWhitespace => LineComparator::IgnoreWhitespace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GranularityArg {
    Char,
    Word,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Char => Granularity::Char,
            GranularityArg::Word => Granularity::Word,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let base = match &args.config {
        Some(path) => super::config::load(path)?,
        None => DiffConfig::default(),
    };
    let config = overlay(base, &args);
    let differ = Differ::new(config).map_err(ExError::from)?;

    let before_text = read_input(&args.before)?;
    let after_text = read_input(&args.after)?;
    let before = split_lines(before_text.as_str());
    let after = split_lines(after_text.as_str());

    let ctx = RequestContext::new();
    tracing::debug!(
        request_id = %ctx.request_id,
        before = %args.before.display(),
        after = %args.after.display(),
        "diffing files"
    );
    let script = differ
        .diff_with_context(before.as_slice(), after.as_slice(), &ctx)
        .map_err(|e| ExError::from(e).with_request_id(ctx.request_id.clone()))?;

    let rendered = match args.format {
        OutputFormat::Text => render_text(&script),
        OutputFormat::Json => render_json(&script).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("render_json")
                .with_message(e.to_string())
        })?,
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
        println!("✓ Wrote diff to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

/// Apply command-line flags on top of a loaded configuration.
fn overlay(mut config: DiffConfig, args: &DiffArgs) -> DiffConfig {
    if args.full {
        config = config.full();
    }
    if let Some(radius) = args.context {
        config.context_radius = radius;
    }
    if let Some(comparator) = args.comparator {
        config.comparator = comparator.into();
    }
    if let Some(width) = args.tab_width {
        config.tab_width = Some(width);
    }
    if args.escape_html {
        config.escape_html = true;
    }

    if args.no_highlight {
        config.highlight = None;
    } else if args.granularity.is_some() || args.tag.is_some() {
        let highlight = config.highlight.get_or_insert_with(HighlightConfig::default);
        if let Some(granularity) = args.granularity {
            highlight.granularity = granularity.into();
        }
        if let Some(tag) = &args.tag {
            highlight.tag = tag.clone();
        }
    }

    config
}

fn read_input(path: &Path) -> Result<String, ExError> {
    std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("read_input")
            .with_message(format!("{}: {}", path.display(), e))
    })
}
