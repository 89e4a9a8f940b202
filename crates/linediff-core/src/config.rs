//! Diff configuration.
//!
//! `DiffConfig` is an explicitly constructed value owned by the caller. It
//! deserializes from any serde format (the CLI reads TOML) with every field
//! optional, and is validated once before any input is processed.

use crate::diff::align::ChangePairing;
use crate::diff::comparator::LineComparator;
use crate::errors::{LineDiffError, Result};
use crate::passes::{
    Compactor, Granularity, HighlightOptions, Highlighter, HtmlEscaper, Markup, Pass, Pipeline,
    TabExpander,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTEXT_RADIUS: i64 = 3;
pub const DEFAULT_TAB_WIDTH: i64 = 4;
pub const DEFAULT_PLACEHOLDER_LABEL: &str = "…";
pub const DEFAULT_MARKUP_TAG: &str = "b";
pub const DEFAULT_MAX_SPANS: i64 = 2;

/// Inline highlighting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Tag name or opening tag, e.g. `b` or `<span class="diff">`
    pub tag: String,
    pub granularity: Granularity,
    pub token_radius: i64,
    /// Span limit; absent means unlimited
    pub max_spans: Option<i64>,
    pub mark_unpaired: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_MARKUP_TAG.to_string(),
            granularity: Granularity::Word,
            token_radius: 0,
            max_spans: Some(DEFAULT_MAX_SPANS),
            mark_unpaired: false,
        }
    }
}

impl HighlightConfig {
    /// # Errors
    ///
    /// The first invalid field, as a configuration error.
    pub fn to_options(&self) -> Result<HighlightOptions> {
        let markup = Markup::from_tag(&self.tag)?;
        let token_radius = usize::try_from(self.token_radius).map_err(|_| {
            LineDiffError::InvalidTokenRadius {
                value: self.token_radius,
            }
        })?;
        let max_spans = match self.max_spans {
            None => None,
            Some(value) if value <= 0 => return Err(LineDiffError::InvalidMaxSpans { value }),
            Some(value) => Some(
                usize::try_from(value).map_err(|_| LineDiffError::InvalidMaxSpans { value })?,
            ),
        };

        Ok(HighlightOptions::new(markup)
            .with_granularity(self.granularity)
            .with_token_radius(token_radius)
            .with_max_spans(max_spans)
            .with_mark_unpaired(self.mark_unpaired))
    }
}

/// Everything a diff request needs besides the two inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    pub comparator: LineComparator,
    pub pairing: ChangePairing,
    /// Equal lines kept around each change; 0 shows the full diff
    pub context_radius: i64,
    pub placeholder_label: String,
    pub trim_edges: bool,
    /// Tab stop width; absent disables tab expansion
    pub tab_width: Option<i64>,
    pub escape_html: bool,
    /// Inline highlighting; absent disables it
    pub highlight: Option<HighlightConfig>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            comparator: LineComparator::Exact,
            pairing: ChangePairing::Pairwise,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            placeholder_label: DEFAULT_PLACEHOLDER_LABEL.to_string(),
            trim_edges: false,
            tab_width: Some(DEFAULT_TAB_WIDTH),
            escape_html: false,
            highlight: Some(HighlightConfig::default()),
        }
    }
}

impl DiffConfig {
    pub fn with_comparator(mut self, comparator: LineComparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn with_pairing(mut self, pairing: ChangePairing) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn with_context_radius(mut self, context_radius: i64) -> Self {
        self.context_radius = context_radius;
        self
    }

    pub fn with_placeholder_label(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self
    }

    pub fn with_trim_edges(mut self, trim_edges: bool) -> Self {
        self.trim_edges = trim_edges;
        self
    }

    pub fn with_tab_width(mut self, tab_width: Option<i64>) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    pub fn with_highlight(mut self, highlight: Option<HighlightConfig>) -> Self {
        self.highlight = highlight;
        self
    }

    /// Show every line (no compaction)
    pub fn full(self) -> Self {
        self.with_context_radius(0)
    }

    /// Check every field without building anything.
    ///
    /// # Errors
    ///
    /// The first invalid field, as a configuration error.
    pub fn validate(&self) -> Result<()> {
        self.build_pipeline().map(|_| ())
    }

    /// Build the pass pipeline in its fixed order: tab expansion, HTML
    /// escaping, highlighting, compaction. With highlighting on, escaping is
    /// done by the highlighter itself.
    ///
    /// # Errors
    ///
    /// The first invalid field, as a configuration error.
    pub fn build_pipeline(&self) -> Result<Pipeline> {
        let mut passes: Vec<Box<dyn Pass>> = Vec::new();

        if let Some(width) = self.tab_width {
            passes.push(Box::new(TabExpander::new(width)?));
        }
        let highlight = self
            .highlight
            .as_ref()
            .map(HighlightConfig::to_options)
            .transpose()?;
        match highlight {
            Some(options) => passes.push(Box::new(Highlighter::new(
                options.with_escape_html(self.escape_html),
            ))),
            None if self.escape_html => passes.push(Box::new(HtmlEscaper)),
            None => {}
        }
        // Always validated, even though radius 0 makes it a no-op.
        let compactor = Compactor::new(self.context_radius, self.placeholder_label.clone())?
            .with_trim_edges(self.trim_edges);
        if compactor.radius() > 0 {
            passes.push(Box::new(compactor));
        }

        Ok(Pipeline::new().add_passes(passes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_order() {
        let pipeline = DiffConfig::default().build_pipeline().unwrap();
        assert_eq!(
            pipeline.pass_names(),
            vec!["expand_tabs", "highlight", "compact"]
        );
    }

    #[test]
    fn test_full_drops_compaction() {
        let pipeline = DiffConfig::default().full().build_pipeline().unwrap();
        assert_eq!(pipeline.pass_names(), vec!["expand_tabs", "highlight"]);
    }

    #[test]
    fn test_escape_folds_into_highlight() {
        let pipeline = DiffConfig::default()
            .with_escape_html(true)
            .build_pipeline()
            .unwrap();
        assert_eq!(
            pipeline.pass_names(),
            vec!["expand_tabs", "highlight", "compact"]
        );

        let pipeline = DiffConfig::default()
            .with_escape_html(true)
            .with_highlight(None)
            .build_pipeline()
            .unwrap();
        assert_eq!(
            pipeline.pass_names(),
            vec!["expand_tabs", "escape_html", "compact"]
        );
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (
                DiffConfig::default().with_context_radius(-1),
                LineDiffError::InvalidContextRadius { value: -1 },
            ),
            (
                DiffConfig::default().with_tab_width(Some(0)),
                LineDiffError::InvalidTabWidth { value: 0 },
            ),
            (
                DiffConfig::default().with_highlight(Some(HighlightConfig {
                    tag: String::new(),
                    ..HighlightConfig::default()
                })),
                LineDiffError::EmptyMarkupTag,
            ),
            (
                DiffConfig::default().with_highlight(Some(HighlightConfig {
                    token_radius: -2,
                    ..HighlightConfig::default()
                })),
                LineDiffError::InvalidTokenRadius { value: -2 },
            ),
            (
                DiffConfig::default().with_highlight(Some(HighlightConfig {
                    max_spans: Some(0),
                    ..HighlightConfig::default()
                })),
                LineDiffError::InvalidMaxSpans { value: 0 },
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate().unwrap_err(), expected);
        }
    }

    #[test]
    fn test_empty_tag_allowed_when_highlighting_disabled() {
        assert!(DiffConfig::default().with_highlight(None).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DiffConfig =
            serde_json::from_str(r#"{"context_radius": 5, "comparator": "exact"}"#).unwrap();
        assert_eq!(config.context_radius, 5);
        assert_eq!(config.comparator, LineComparator::Exact);
        assert_eq!(config.tab_width, Some(DEFAULT_TAB_WIDTH));
        assert_eq!(config.placeholder_label, DEFAULT_PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed: std::result::Result<DiffConfig, _> =
            serde_json::from_str(r#"{"context": 5}"#);
        assert!(parsed.is_err());
    }
}
