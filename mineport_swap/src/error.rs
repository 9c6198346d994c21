use error_stack::{AttachmentKind, FrameKind, Report};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type SwapResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error")]
    ParseError,

    #[error("Reqwest error")]
    ReqwestError,

    #[error("Models error")]
    ModelsError,

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    MissingParameters(String),

    #[error("{0}")]
    InvalidParameter(String),

    /// Every attempted routing leg failed; `details` embeds the upstream bodies.
    #[error("{message}")]
    NoRoute { message: String, details: Value },

    /// The aggregator refused to build a transaction for an otherwise valid route.
    #[error("{message}")]
    BuildFailed { message: String, details: Value },
}

pub trait ReportDisplayExt {
    fn format(&self) -> String;
}

impl ReportDisplayExt for Report<Error> {
    fn format(&self) -> String {
        let mut output = String::new();

        for frame in self.frames() {
            if let FrameKind::Attachment(AttachmentKind::Printable(attachment)) = frame.kind() {
                output.push_str(&format!(" {attachment} "));
            }
        }

        output.trim().to_string()
    }
}
