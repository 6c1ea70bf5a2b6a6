//! Error types for the embed client.

/// All errors that can occur while fetching a signed embed URL.
#[derive(Debug, thiserror::Error)]
pub enum EmbedClientError {
    /// The server answered with an error envelope (or a non-success
    /// status whose body could be parsed into one).
    #[error("embed API error {code}: {message}")]
    Api {
        /// Machine-readable error code from the server.
        code: String,
        /// Human-readable detail from the server.
        message: String,
    },

    /// The server answered 2xx but the body was not the expected
    /// success envelope.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    /// Network or HTTP client error.
    #[error("embed network error: {0}")]
    Network(#[from] reqwest::Error),
}
