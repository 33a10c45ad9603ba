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

//! Remote resource model and the structured API seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::DriveResult;

/// Type marker the provider uses for container resources.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Fallback content type for file payloads with no known mime.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Fields selector used for every listing page.
pub const LIST_FIELDS: &str = "nextPageToken, files";

/// A provider-side resource as returned by the metadata API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Byte count as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_app_authorized: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_content_link: Option<String>,
}

impl RemoteFile {
    /// Folder by mime type alone; `kind` is not consulted.
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }

    pub fn is_app_authorized(&self) -> bool {
        self.is_app_authorized == Some(true)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub files: Vec<RemoteFile>,
}

/// Parameters for a single listing page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub page_token: Option<String>,
    pub page_size: u32,
    pub fields: String,
    pub query: Option<String>,
}

/// Body of a resource creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    pub name: String,
    pub parents: Vec<String>,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
}

/// Envelope of a structured API call: either `result` or `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(ApiError {
                code: None,
                message: message.into(),
            }),
        }
    }
}

/// Structured calls against the provider's `files` collection.
///
/// Implementations report provider-side failures through
/// [`ApiResponse::error`] and reserve `Err` for failures to talk to the
/// provider at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// `files.list`
    async fn list_files(&self, request: &ListRequest) -> DriveResult<ApiResponse<FileList>>;

    /// `files.create` with metadata only.
    async fn create_file(&self, resource: &ResourceMetadata)
        -> DriveResult<ApiResponse<RemoteFile>>;

    /// `files.get` restricted to `fields`.
    async fn get_file(&self, file_id: &str, fields: &str) -> DriveResult<ApiResponse<RemoteFile>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_file_from_provider_json() {
        let file: RemoteFile = serde_json::from_value(json!({
            "kind": "drive#file",
            "id": "1AbC",
            "name": "report.pdf",
            "mimeType": "application/pdf",
            "size": "2048",
            "parents": ["0Root"],
            "isAppAuthorized": true
        }))
        .unwrap();

        assert_eq!(file.id, "1AbC");
        assert_eq!(file.size.as_deref(), Some("2048"));
        assert!(file.is_app_authorized());
        assert!(!file.is_folder());
    }

    #[test]
    fn test_missing_authorization_flag_is_not_authorized() {
        let file: RemoteFile = serde_json::from_value(json!({"id": "x", "name": "x"})).unwrap();
        assert!(!file.is_app_authorized());
    }

    #[test]
    fn test_folder_detection() {
        let folder = RemoteFile {
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            ..Default::default()
        };
        assert!(folder.is_folder());
    }

    #[test]
    fn test_resource_metadata_uses_camel_case() {
        let resource = ResourceMetadata {
            name: "x.txt".to_string(),
            parents: vec!["p1".to_string()],
            mime_type: OCTET_STREAM.to_string(),
        };
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"name": "x.txt", "parents": ["p1"], "mimeType": "application/octet-stream"})
        );
    }

    #[test]
    fn test_api_response_error_shape() {
        let response: ApiResponse<RemoteFile> =
            serde_json::from_value(json!({"error": {"code": 403, "message": "forbidden"}}))
                .unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().message, "forbidden");
    }
}
