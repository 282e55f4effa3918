//! Configuration types for graph inference and rendering.
//!
//! Every field has a default, so a configuration file only needs to name what
//! it changes. All types implement [`serde::Deserialize`].
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`InferenceConfig`] - Attribute names, option tags, the inline-marker
//!   pattern and the label length used to find nodes and edges.
//! - [`RenderConfig`] - Display mode and page settings for the exporters.
//!
//! # Example
//!
//! ```
//! # use plotgraph::config::{AppConfig, DisplayMode};
//! let config = AppConfig::default();
//! assert_eq!(config.inference().max_label_len(), 60);
//! assert_eq!(config.render().display(), DisplayMode::Id);
//! ```

use regex::Regex;
use serde::Deserialize;

use crate::PlotgraphError;

/// Identifier attribute names, in priority order.
pub const DEFAULT_ID_ATTRIBUTES: &[&str] = &["id", "Id", "ID", "name", "Name"];

/// Label attribute names, in priority order.
pub const DEFAULT_LABEL_ATTRIBUTES: &[&str] = &["label", "text", "title", "name"];

/// Target attribute names, in priority order.
pub const DEFAULT_TARGET_ATTRIBUTES: &[&str] =
    &["target", "to", "goto", "next", "ref", "idref", "targetId"];

/// Tag names of option-like child elements (compared case-insensitively).
pub const DEFAULT_OPTION_TAGS: &[&str] = &["choice", "option", "link", "goto", "jump", "action"];

/// Inline marker pattern; capture group 1 is the target identifier.
pub const DEFAULT_INLINE_PATTERN: &str = r"(?i)(?:goto|jump|->)\s*#?([A-Za-z0-9_\-:]+)";

/// Default maximum label length, in characters.
pub const DEFAULT_MAX_LABEL_LEN: usize = 60;

/// vis-network bundle loaded by the HTML page.
pub const DEFAULT_SCRIPT_URL: &str =
    "https://unpkg.com/vis-network@9.1.2/standalone/umd/vis-network.min.js";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Inference configuration section.
    #[serde(default)]
    inference: InferenceConfig,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(inference: InferenceConfig, render: RenderConfig) -> Self {
        Self { inference, render }
    }

    /// Returns the inference configuration.
    pub fn inference(&self) -> &InferenceConfig {
        &self.inference
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Replaces the display mode, e.g. from a command-line switch.
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.render.display = display;
        self
    }
}

/// The conventions used to recognize nodes and edges in a document.
///
/// Attribute names are matched case-sensitively and checked in list order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    id_attributes: Vec<String>,
    label_attributes: Vec<String>,
    target_attributes: Vec<String>,
    option_tags: Vec<String>,
    inline_pattern: String,
    max_label_len: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            id_attributes: strings(DEFAULT_ID_ATTRIBUTES),
            label_attributes: strings(DEFAULT_LABEL_ATTRIBUTES),
            target_attributes: strings(DEFAULT_TARGET_ATTRIBUTES),
            option_tags: strings(DEFAULT_OPTION_TAGS),
            inline_pattern: DEFAULT_INLINE_PATTERN.to_string(),
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}

impl InferenceConfig {
    /// Returns the identifier attribute names.
    pub fn id_attributes(&self) -> &[String] {
        &self.id_attributes
    }

    /// Returns the label attribute names.
    pub fn label_attributes(&self) -> &[String] {
        &self.label_attributes
    }

    /// Returns the target attribute names.
    pub fn target_attributes(&self) -> &[String] {
        &self.target_attributes
    }

    /// Returns the option tag names.
    pub fn option_tags(&self) -> &[String] {
        &self.option_tags
    }

    /// Returns the inline marker pattern source.
    pub fn inline_pattern(&self) -> &str {
        &self.inline_pattern
    }

    /// Returns the maximum label length in characters.
    pub fn max_label_len(&self) -> usize {
        self.max_label_len
    }

    /// Sets the identifier attribute names.
    pub fn with_id_attributes<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.id_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the label attribute names.
    pub fn with_label_attributes<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.label_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the target attribute names.
    pub fn with_target_attributes<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.target_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the option tag names.
    pub fn with_option_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.option_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the inline marker pattern.
    pub fn with_inline_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.inline_pattern = pattern.into();
        self
    }

    /// Sets the maximum label length.
    pub fn with_max_label_len(mut self, max_label_len: usize) -> Self {
        self.max_label_len = max_label_len;
        self
    }

    /// Compiles the inline marker pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PlotgraphError::Config`] if the pattern does not compile or
    /// has no capture group for the target identifier.
    pub fn inline_regex(&self) -> Result<Regex, PlotgraphError> {
        let regex = Regex::new(&self.inline_pattern).map_err(|err| {
            PlotgraphError::Config(format!("Invalid inline pattern in config: {err}"))
        })?;
        if regex.captures_len() < 2 {
            return Err(PlotgraphError::Config(format!(
                "Inline pattern `{}` needs a capture group for the target",
                self.inline_pattern
            )));
        }
        Ok(regex)
    }
}

/// What node labels show in the rendered graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Show node identifiers.
    #[default]
    Id,
    /// Show the derived label text.
    Label,
}

/// Settings for the DOT and HTML exporters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    display: DisplayMode,
    graph_name: String,
    page_title: String,
    script_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            display: DisplayMode::default(),
            graph_name: "story".to_string(),
            page_title: "Story Graph".to_string(),
            script_url: DEFAULT_SCRIPT_URL.to_string(),
        }
    }
}

impl RenderConfig {
    /// Returns the display mode.
    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// Returns the DOT graph name.
    pub fn graph_name(&self) -> &str {
        &self.graph_name
    }

    /// Returns the HTML page title.
    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    /// Returns the URL of the vis-network script.
    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    /// Sets the display mode.
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }
}
