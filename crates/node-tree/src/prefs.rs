use crate::TreeError;
use nodewrangler_layout::{ArrangeLayout, ColumnStrategy, FrameHandling};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Settings of the arrange operator
///
/// Missing fields take their default value when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Distance between linked nodes, never below zero
    pub margin: f32,
    pub start_align: bool,
    pub end_align: bool,
    /// Remove reroutes, reconnecting their links, before arranging
    pub delete_reroutes: bool,
    pub frame_handling: FrameHandling,
    pub columns: ColumnStrategy,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            margin: 80.0,
            start_align: true,
            end_align: true,
            delete_reroutes: true,
            frame_handling: FrameHandling::Ignore,
            columns: ColumnStrategy::Sweep,
        }
    }
}

impl Preferences {
    pub fn from_ron(text: &str) -> Result<Self, TreeError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        debug!("Loading preferences from {}", path.display());
        Self::from_ron(&std::fs::read_to_string(path)?)
    }

    /// Layout engine configured from these preferences
    pub fn layout(&self) -> ArrangeLayout {
        let margin = if self.margin.is_finite() && self.margin >= 0.0 {
            self.margin
        } else {
            warn!("Invalid margin {}, using 0", self.margin);
            0.0
        };

        ArrangeLayout {
            margin,
            start_align: self.start_align,
            end_align: self.end_align,
            frames: self.frame_handling,
            columns: self.columns,
        }
    }
}

/// Source of preferences for operators, e.g. a host settings screen
pub trait PreferencesProvider {
    fn preferences(&self) -> Preferences;
}

impl PreferencesProvider for Preferences {
    fn preferences(&self) -> Preferences {
        self.clone()
    }
}
