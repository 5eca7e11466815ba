#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to bind to {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Server error: {0}")]
    Server(String),

    #[error("Failed to render response: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Conversion rejected: {0}")]
    Rejected(String),
}
