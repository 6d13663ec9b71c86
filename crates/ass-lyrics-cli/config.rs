//! Settings file loading
//!
//! The optional `--config` file is TOML with two tables, both optional and
//! both partial:
//!
//! ```toml
//! [layout]
//! prev_lines = 3
//! sub_scale = 60
//!
//! [output]
//! keep_original = false
//! ```

use anyhow::{Context, Result};
use ass_lyrics::{LayoutConfig, WriteOptions};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Everything a run can be configured with
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Generator parameters
    pub layout: LayoutConfig,

    /// Output options
    pub output: WriteOptions,
}

impl Settings {
    /// Apply command-line overrides on top of the file values
    pub fn apply_overrides(
        &mut self,
        prev_lines: Option<usize>,
        next_lines: Option<usize>,
        drop_original: bool,
    ) {
        if let Some(count) = prev_lines {
            self.layout.prev_lines = count;
        }
        if let Some(count) = next_lines {
            self.layout.next_lines = count;
        }
        if drop_original {
            self.output.keep_original = false;
        }
    }
}

/// Parse settings from TOML text
pub fn parse(content: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(content).context("Failed to parse settings")?;
    settings
        .layout
        .validate()
        .context("Invalid layout settings")?;
    Ok(settings)
}

/// Load settings from `path`, or defaults when no file is given
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
}
