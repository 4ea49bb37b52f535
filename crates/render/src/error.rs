use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load font: {0}")]
    Font(String),
    #[error("failed to encode pdf: {0}")]
    Encode(String),
}
