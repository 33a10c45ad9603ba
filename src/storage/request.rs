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

//! Builds the requests the adapter sends: media download, media upload and
//! resource creation, plus the current-or-create id resolution that must
//! run before any upload.

use bytes::Bytes;
use reqwest::Method;
use tracing::info;

use super::entry::FileEntry;
use super::error::{DriveError, DriveResult};
use super::remote::{DriveApi, ResourceMetadata, FOLDER_MIME_TYPE, OCTET_STREAM};
use super::response::check_response;
use super::session::AccessToken;
use super::transport::HttpRequest;

/// `Authorization` header value, e.g. `Bearer ya29...`.
pub fn authorization_value(token: &AccessToken) -> String {
    format!("{} {}", token.token_type, token.access_token)
}

/// GET the media content of the resource `id`.
pub fn download_request(api_base: &str, token: &AccessToken, id: &str) -> HttpRequest {
    HttpRequest::new(
        Method::GET,
        format!("{}/files/{}?alt=media", api_base.trim_end_matches('/'), id),
    )
    .with_header("Authorization", authorization_value(token))
}

/// PATCH the media content of the resource `id` with `body`.
///
/// `Content-Type` comes from the entry's mime, falling back to octet-stream.
pub fn upload_request(
    upload_base: &str,
    token: &AccessToken,
    id: &str,
    entry: &FileEntry,
    body: Bytes,
) -> HttpRequest {
    HttpRequest::new(
        Method::PATCH,
        format!(
            "{}/files/{}?uploadType=media",
            upload_base.trim_end_matches('/'),
            id
        ),
    )
    .with_header("Content-Type", entry.mime().unwrap_or(OCTET_STREAM))
    .with_header("Authorization", authorization_value(token))
    .with_body(body)
}

fn parents(entry: &FileEntry) -> Vec<String> {
    entry.parent_id.iter().cloned().collect()
}

/// Creation metadata for a file resource.
pub fn file_resource(entry: &FileEntry) -> ResourceMetadata {
    ResourceMetadata {
        name: entry.name().to_string(),
        parents: parents(entry),
        mime_type: entry.mime().unwrap_or(OCTET_STREAM).to_string(),
    }
}

/// Creation metadata for a folder resource.
pub fn folder_resource(entry: &FileEntry) -> ResourceMetadata {
    ResourceMetadata {
        name: entry.name().to_string(),
        parents: parents(entry),
        mime_type: FOLDER_MIME_TYPE.to_string(),
    }
}

/// Resolve the remote id an upload should target.
///
/// A bound entry resolves to its own id with no remote call. An unbound
/// entry is created first, and the id the provider assigns is returned.
pub async fn current_or_create(api: &dyn DriveApi, entry: &FileEntry) -> DriveResult<String> {
    match entry.id.as_deref() {
        Some(id) => Ok(id.to_string()),
        None => {
            let resource = file_resource(entry);
            info!(
                "Creating resource name={} parents={:?}",
                resource.name, resource.parents
            );
            let created = check_response(api.create_file(&resource).await?)?;
            if created.id.is_empty() {
                return Err(DriveError::RemoteApi(format!(
                    "provider returned no id for '{}'",
                    resource.name
                )));
            }
            Ok(created.id)
        }
    }
}
