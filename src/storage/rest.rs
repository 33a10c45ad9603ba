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

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::DriveResult;
use super::remote::{
    ApiError, ApiResponse, DriveApi, FileList, ListRequest, RemoteFile, ResourceMetadata,
};
use super::request::authorization_value;
use super::session::AccessToken;

/// [`DriveApi`] over the provider's JSON REST endpoints.
#[derive(Clone)]
pub struct RestDriveApi {
    client: Client,
    api_base: String,
    token: AccessToken,
}

impl RestDriveApi {
    pub fn new(client: Client, api_base: &str, token: AccessToken) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.api_base)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> DriveResult<ApiResponse<T>> {
        let response = builder
            .header("Authorization", authorization_value(&self.token))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Drive API status={} body_len={}", status, body.len());
        into_api_response(status.is_success(), status.as_u16(), &body)
    }
}

/// Wrap a REST reply into the `result`/`error` envelope.
///
/// The REST API signals failure with `{"error": {"code", "message"}}`. A
/// failing status with an unreadable body still becomes an `error`, keyed
/// on the status code.
fn into_api_response<T: DeserializeOwned>(
    success: bool,
    status: u16,
    body: &[u8],
) -> DriveResult<ApiResponse<T>> {
    let value: Option<Value> = serde_json::from_slice(body).ok();

    if let Some(error) = value.as_ref().and_then(|v| v.get("error")) {
        let mut api_error: ApiError = serde_json::from_value(error.clone())
            .unwrap_or_else(|_| ApiError {
                code: Some(status),
                message: error.to_string(),
            });
        if api_error.code.is_none() {
            api_error.code = Some(status);
        }
        return Ok(ApiResponse {
            result: None,
            error: Some(api_error),
        });
    }

    if !success {
        return Ok(ApiResponse {
            result: None,
            error: Some(ApiError {
                code: Some(status),
                message: format!("request failed with status {}", status),
            }),
        });
    }

    let result = serde_json::from_value(value.unwrap_or(Value::Null))?;
    Ok(ApiResponse::ok(result))
}

#[async_trait]
impl DriveApi for RestDriveApi {
    async fn list_files(&self, request: &ListRequest) -> DriveResult<ApiResponse<FileList>> {
        let mut params: Vec<(&str, String)> = vec![
            ("pageSize", request.page_size.to_string()),
            ("fields", request.fields.clone()),
        ];
        if let Some(token) = &request.page_token {
            params.push(("pageToken", token.clone()));
        }
        if let Some(query) = &request.query {
            params.push(("q", query.clone()));
        }

        self.execute(self.client.get(self.files_url()).query(&params))
            .await
    }

    async fn create_file(
        &self,
        resource: &ResourceMetadata,
    ) -> DriveResult<ApiResponse<RemoteFile>> {
        self.execute(self.client.post(self.files_url()).json(resource))
            .await
    }

    async fn get_file(&self, file_id: &str, fields: &str) -> DriveResult<ApiResponse<RemoteFile>> {
        let url = format!("{}/{}", self.files_url(), file_id);
        self.execute(self.client.get(url).query(&[("fields", fields)]))
            .await
    }
}
