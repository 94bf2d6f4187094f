use thiserror::Error;

/// Everything that can go wrong while relaying one message. The `Display`
/// text of each variant is what the user sees in the chat.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Ollama host is not configured. Please set the OLLAMA_HOST environment variable.")]
    HostNotConfigured,

    #[error(
        "Could not connect to the Ollama server at {host}. Please make sure it is running and accessible."
    )]
    Connection {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error from Ollama server: {status} {body}")]
    Server {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}
