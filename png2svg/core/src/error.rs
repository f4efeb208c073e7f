use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorizeError>;

#[derive(Debug, Error)]
pub enum VectorizeError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// Raised by `first_uncovered` when the scanned range holds no uncovered pixel.
    #[error("no uncovered pixel at or after ({from_x}, {from_y})")]
    Exhausted { from_x: u32, from_y: u32 },
    #[error("the SVG representation does not cover all pixels ({uncovered} left)")]
    IncompleteCoverage { uncovered: usize },
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
