//! Table configuration.
//!
//! [`TableConfig`] collects the presentation knobs a table instance needs
//! beyond its schema. Every field has a default, so a configuration file only
//! has to mention what it changes:
//!
//! ```toml
//! page_size = 25
//! empty_message = "No products match your search."
//! ```

use std::path::Path;

use horizon_tabular_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::format::FormatOptions;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default viewport width (in pixels) at which the desktop table replaces the
/// card layout.
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 768;

/// Presentation settings for one table instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Text shown for null values.
    pub placeholder: String,
    /// Text shown when no rows match.
    pub empty_message: String,
    /// Viewport width at or above which the desktop layout is used.
    pub mobile_breakpoint: u32,
    /// Symbol prefixed to currency values.
    pub currency_symbol: String,
    /// Whether rows can be selected.
    pub selectable: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            placeholder: "\u{2014}".into(),
            empty_message: "No results found.".into(),
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            currency_symbol: "$".into(),
            selectable: true,
        }
    }
}

impl TableConfig {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: TableConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), page_size = config.page_size, "loaded table configuration");
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidPageSize { size: 0 });
        }
        Ok(())
    }

    /// Builder-style page size override.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builder-style selection toggle.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// The formatting options derived from this configuration.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            placeholder: self.placeholder.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}
