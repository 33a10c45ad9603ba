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
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::config::DriveConfig;
use super::error::{DriveError, DriveResult};
use super::remote::DriveApi;
use super::rest::RestDriveApi;

/// Token type and value, as handed out by an OAuth provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token_type: String,
    pub access_token: String,
}

impl AccessToken {
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
        }
    }

    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new("Bearer", access_token)
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(type={}, value=<redacted>)", self.token_type)
    }
}

/// Credentials plus the structured API client they authorize.
///
/// A session lives for one adapter operation and is dropped afterwards.
#[derive(Clone)]
pub struct Session {
    pub token: AccessToken,
    pub api: Arc<dyn DriveApi>,
}

impl Session {
    pub fn new(token: AccessToken, api: Arc<dyn DriveApi>) -> Self {
        Self { token, api }
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({:?})", self.token)
    }
}

/// Supplies a valid session on demand.
///
/// Called once at the start of every adapter operation. Implementations may
/// refresh or reuse credentials internally; the adapter never holds on to a
/// session between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn login(&self) -> DriveResult<Session>;
}

/// A [`SessionProvider`] over a fixed bearer token, talking to the REST API.
///
/// Suitable for tokens minted elsewhere (CLI tools, service accounts).
pub struct StaticTokenProvider {
    token: AccessToken,
    api: Arc<RestDriveApi>,
}

impl StaticTokenProvider {
    pub fn new(token: AccessToken, client: reqwest::Client, config: &DriveConfig) -> Self {
        let api = Arc::new(RestDriveApi::new(client, config.api_base(), token.clone()));
        Self { token, api }
    }

    /// Read the token from `DRIVE_ACCESS_TOKEN`.
    pub fn from_env(client: reqwest::Client, config: &DriveConfig) -> DriveResult<Self> {
        let value = std::env::var("DRIVE_ACCESS_TOKEN").map_err(|_| {
            DriveError::Session("DRIVE_ACCESS_TOKEN is not set".to_string())
        })?;
        Ok(Self::new(AccessToken::bearer(value), client, config))
    }
}

#[async_trait]
impl SessionProvider for StaticTokenProvider {
    async fn login(&self) -> DriveResult<Session> {
        if self.token.access_token.is_empty() {
            return Err(DriveError::Session("access token is empty".to_string()));
        }
        Ok(Session::new(self.token.clone(), self.api.clone()))
    }
}
