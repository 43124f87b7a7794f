//! Outline view configuration
//!
//! Stores user preferences in `~/.config/outline-mirror/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::outline::{Position, RenderOptions};
use crate::surface::DEFAULT_HIGHLIGHT_GROUP;

/// Origin of the host's cursor coordinates.
///
/// Subtracted from incoming positions to get 0-based line/column. Hosts
/// disagree on whether columns start at 0 or 1, so this is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorOrigin {
    #[serde(default = "one")]
    pub line_base: usize,
    #[serde(default = "one")]
    pub col_base: usize,
}

fn one() -> usize {
    1
}

impl Default for CursorOrigin {
    fn default() -> Self {
        Self {
            line_base: 1,
            col_base: 1,
        }
    }
}

impl CursorOrigin {
    pub const ZERO: CursorOrigin = CursorOrigin {
        line_base: 0,
        col_base: 0,
    };

    /// Convert a host position to a 0-based one
    pub fn normalize(&self, line: usize, col: usize) -> Position {
        Position::new(
            line.saturating_sub(self.line_base),
            col.saturating_sub(self.col_base),
        )
    }
}

/// Outline view configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Resolve and show the breadcrumb path on cursor moves
    pub show_breadcrumb: bool,
    /// Append declaration line numbers to rendered labels
    pub line_numbers: bool,
    /// Mark folded nodes in the rendered tree
    pub fold_markers: bool,
    /// Drop a document's outline when the editor closes it
    pub evict_closed_documents: bool,
    pub cursor_origin: CursorOrigin,
    /// Name of the scratch buffer holding the tree
    pub view_name: String,
    /// Width of the split the view opens in
    pub view_width: usize,
    /// Highlight group for the node under the cursor
    pub highlight_group: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            show_breadcrumb: true,
            line_numbers: false,
            fold_markers: false,
            evict_closed_documents: false,
            cursor_origin: CursorOrigin::default(),
            view_name: "__flutter_widget_tree".to_string(),
            view_width: 30,
            highlight_group: DEFAULT_HIGHLIGHT_GROUP.to_string(),
        }
    }
}

impl OutlineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Renderer switches derived from this config
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            line_numbers: self.line_numbers,
            fold_markers: self.fold_markers,
        }
    }
}
