use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinearError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Received non-OK response: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Server-reported errors. `data` holds whatever partial payload came with them.
    #[error("GraphQL errors: {}", messages.join("; "))]
    GraphQL {
        messages: Vec<String>,
        data: Option<serde_json::Value>,
    },

    #[error("Malformed {operation} response: missing or invalid `{key}`")]
    MalformedResponse {
        operation: &'static str,
        key: &'static str,
    },

    #[error("{operation} was not successful")]
    MutationFailed { operation: &'static str },

    #[error("Failed to load children of issue {id}: {source}")]
    Children {
        id: String,
        #[source]
        source: Box<LinearError>,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No API key found. Set LINEAR_API_KEY env var or add api_key to ~/.config/linear-mcp/config.toml"
    )]
    MissingApiKey,

    #[error("Invalid issue identifier: {0} (expected e.g. ENG-123)")]
    InvalidIdentifier(String),

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Attachment download failed (status {status}): {url}")]
    AttachmentDownloadFailed { url: String, status: u16 },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LinearError>;
