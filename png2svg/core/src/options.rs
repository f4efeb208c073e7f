use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grow::GrowthStrategy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizeOptions {
    /// Use only 4096 colors (`#abcdef` becomes `#ace`).
    pub limit_colors: bool,
    /// Fill boxes that grew beyond a single pixel with a highlight color.
    pub highlight_expanded: bool,
    /// Cover every pixel with its own 1x1 element instead of growing boxes.
    pub single_pixels: bool,
    pub strategy: GrowthStrategy,
    /// Seed for [`GrowthStrategy::RandomizedOmnidirectional`].
    pub seed: Option<u64>,
    pub group_by_color: bool,
    pub minify: bool,
}

impl Default for VectorizeOptions {
    fn default() -> Self {
        Self {
            limit_colors: false,
            highlight_expanded: false,
            single_pixels: false,
            strategy: GrowthStrategy::RightDownOnly,
            seed: None,
            group_by_color: true,
            minify: true,
        }
    }
}

impl VectorizeOptions {
    /// Parses options from a JSON object. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Single-pixel mode is meaningless when highlighting grown boxes.
    pub fn uses_single_pixels(&self) -> bool {
        self.single_pixels && !self.highlight_expanded
    }
}
