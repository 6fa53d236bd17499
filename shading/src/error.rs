use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShadingError {
    #[error("failed to access shading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid shading config: {0}")]
    Ron(#[from] ron::Error),
    #[error("face normal code {0} does not name an axis direction")]
    InvalidFaceCode(u8),
    #[error("texture of {width}x{height} needs {expected} texels, got {actual}")]
    TextureSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
