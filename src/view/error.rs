use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Surface limit reached: at most {limit} charts can be mounted")]
    SurfaceLimit { limit: usize },

    #[error("Failed to write chart page: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render chart page: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to encode chart config: {0}")]
    Encode(#[from] serde_json::Error),
}
