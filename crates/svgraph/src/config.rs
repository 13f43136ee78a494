//! Configuration types for svgraph conversion.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources such as a TOML file. Every section and field is optional;
//! missing values fall back to the defaults below.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LinkConfig`] - Which attributes are treated as references to another element.
//! - [`ProjectionConfig`] - Which tags become nodes and which become connectors.
//! - [`OutputConfig`] - How the JSON document is written.
//!
//! # Example
//!
//! ```
//! # use svgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.links().attributes(), ["xlink:href", "href"]);
//! assert_eq!(config.projection().text_tags(), ["text"]);
//! assert!(config.output().pretty());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Link attribute section.
    #[serde(default)]
    links: LinkConfig,

    /// Tag classification section.
    #[serde(default)]
    projection: ProjectionConfig,

    /// Output formatting section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(links: LinkConfig, projection: ProjectionConfig, output: OutputConfig) -> Self {
        Self {
            links,
            projection,
            output,
        }
    }

    /// Returns the link configuration.
    pub fn links(&self) -> &LinkConfig {
        &self.links
    }

    /// Returns the projection configuration.
    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Attributes whose value names another element's `id`.
///
/// When an element carries more than one of them, the first one listed here
/// wins.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkConfig {
    #[serde(default = "default_link_attributes")]
    attributes: Vec<String>,
}

impl LinkConfig {
    /// Creates a [`LinkConfig`] recognising the given attribute names.
    pub fn new(attributes: Vec<String>) -> Self {
        Self { attributes }
    }

    /// Returns the reference attribute names in priority order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            attributes: default_link_attributes(),
        }
    }
}

/// Tag classification for the output schema.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionConfig {
    /// Tags projected into `texts`.
    #[serde(default = "default_text_tags")]
    text_tags: Vec<String>,

    /// Tags projected into `arrows`.
    #[serde(default = "default_connector_tags")]
    connector_tags: Vec<String>,

    /// Trim surrounding whitespace from node content.
    #[serde(default)]
    trim_content: bool,
}

impl ProjectionConfig {
    /// Creates a [`ProjectionConfig`].
    ///
    /// # Arguments
    ///
    /// * `text_tags` - Tags that become output nodes.
    /// * `connector_tags` - Tags that become output edges.
    /// * `trim_content` - Whether node content is trimmed.
    pub fn new(text_tags: Vec<String>, connector_tags: Vec<String>, trim_content: bool) -> Self {
        Self {
            text_tags,
            connector_tags,
            trim_content,
        }
    }

    /// Returns the text-like tags.
    pub fn text_tags(&self) -> &[String] {
        &self.text_tags
    }

    /// Returns the connector-like tags.
    pub fn connector_tags(&self) -> &[String] {
        &self.connector_tags
    }

    /// Returns whether node content is trimmed.
    pub fn trim_content(&self) -> bool {
        self.trim_content
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            text_tags: default_text_tags(),
            connector_tags: default_connector_tags(),
            trim_content: false,
        }
    }
}

/// JSON output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Indent the JSON document with two spaces.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

impl OutputConfig {
    /// Creates an [`OutputConfig`].
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns whether the document is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

fn default_link_attributes() -> Vec<String> {
    vec!["xlink:href".to_string(), "href".to_string()]
}

fn default_text_tags() -> Vec<String> {
    vec!["text".to_string()]
}

fn default_connector_tags() -> Vec<String> {
    vec!["path".to_string()]
}

fn default_pretty() -> bool {
    true
}
