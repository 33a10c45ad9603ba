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

//! Normalizes the provider's response shapes into `DriveResult`.

use bytes::Bytes;
use serde_json::Value;

use super::entry::FileEntry;
use super::error::{DriveError, DriveResult};
use super::remote::{ApiResponse, OCTET_STREAM};
use super::transport::HttpResponse;

/// Body and content type of a downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub body: Bytes,
    pub mime: String,
}

/// Require a bound entry, returning its id.
pub fn check_entry(entry: &FileEntry) -> DriveResult<&str> {
    entry.id.as_deref().ok_or_else(|| {
        DriveError::InvalidReference(format!("'{}' is not bound to a remote file", entry.path))
    })
}

/// Unwrap a structured response: `error` fails, otherwise `result` succeeds.
pub fn check_response<T>(response: ApiResponse<T>) -> DriveResult<T> {
    if let Some(error) = response.error {
        return Err(DriveError::RemoteApi(error.message));
    }
    response
        .result
        .ok_or_else(|| DriveError::RemoteApi("response carried no result".to_string()))
}

/// Pull `error.message` out of a JSON error body.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

/// Normalize a media download response.
///
/// A failing status becomes [`DriveError::Transport`] with the message from
/// the JSON error body. An error body that cannot be parsed is a
/// [`DriveError::Json`] failure.
pub fn check_download_response(
    response: HttpResponse,
    entry: &FileEntry,
) -> DriveResult<Download> {
    if response.is_success() {
        return Ok(Download {
            body: response.body,
            mime: entry.mime().unwrap_or(OCTET_STREAM).to_string(),
        });
    }

    match error_message(&response.body) {
        Some(message) => Err(DriveError::Transport {
            status: response.status,
            message,
        }),
        None => {
            // Surfaces the parse failure, or a missing message field.
            let value: Value = serde_json::from_slice(&response.body)?;
            Err(DriveError::Transport {
                status: response.status,
                message: value.to_string(),
            })
        }
    }
}

/// Normalize a media upload response into the number of bytes the provider reports.
///
/// The reply is the updated resource as JSON. An `error` member fails with
/// [`DriveError::RemoteApi`]. Any other failing status is a
/// [`DriveError::Transport`] carrying the body text. A missing or unparsable
/// `size` counts as zero.
pub fn check_upload_response(response: HttpResponse) -> DriveResult<u64> {
    let parsed: Option<Value> = serde_json::from_slice(&response.body).ok();

    if let Some(error) = parsed.as_ref().and_then(|v| v.get("error")) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string());
        return Err(DriveError::RemoteApi(message));
    }

    if !response.is_success() {
        let text = String::from_utf8_lossy(&response.body).trim().to_string();
        let message = if text.is_empty() || text == "{}" {
            format!("upload failed with status {}", response.status)
        } else {
            text
        };
        return Err(DriveError::Transport {
            status: response.status,
            message,
        });
    }

    let value = match parsed {
        Some(value) => value,
        None => serde_json::from_slice(&response.body)?,
    };
    let size = match value.get("size") {
        Some(Value::String(s)) => s.parse::<u64>().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    };
    Ok(size)
}
