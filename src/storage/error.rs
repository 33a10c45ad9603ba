// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use thiserror::Error;

/// Errors that can occur during drive operations.
///
/// `RemoteApi` and `Transport` display the provider's message verbatim so
/// callers can surface it without unwrapping the variant.
#[derive(Error, Debug)]
pub enum DriveError {
    /// The operation needs an entry bound to a remote id, and none was given.
    #[error("Invalid drive reference: {0}")]
    InvalidReference(String),

    /// A structured API response carried an `error` field.
    #[error("{0}")]
    RemoteApi(String),

    /// A raw HTTP response had a non-success status.
    #[error("{message}")]
    Transport { status: u16, message: String },

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

impl DriveError {
    /// Returns the bare failure message, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            DriveError::InvalidReference(msg)
            | DriveError::RemoteApi(msg)
            | DriveError::Session(msg)
            | DriveError::ConfigError(msg) => msg.clone(),
            DriveError::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for drive operations
pub type DriveResult<T> = Result<T, DriveError>;
