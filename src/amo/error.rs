use thiserror::Error;

#[derive(Error, Debug)]
pub enum AmoError {
    #[error("{method} {url} failed with HTTP {status} {status_text}: {body}")]
    Request {
        method: String,
        url: String,
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Failed to parse response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize request body")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to send request")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to sign API token")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to open '{path}'")]
    Attachment {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
