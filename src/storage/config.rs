// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{DriveError, DriveResult};

/// Default endpoint for structured metadata calls and media downloads.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Default endpoint for media uploads.
pub const DEFAULT_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Largest page the listing endpoint is asked for.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Configuration for the drive adapter.
///
/// Like the storage configs it is modelled on, this is a flat map of string
/// options with builder-style setters. Typed accessors parse on demand and
/// fall back to defaults.
///
/// Recognized options:
///
/// - api_base: Base URL of the metadata API (default [`DEFAULT_API_BASE`])
/// - upload_base: Base URL of the media upload API (default [`DEFAULT_UPLOAD_BASE`])
/// - page_size: Page size cap for directory listings (default 1000)
/// - timeout: Request timeout in seconds, "0" or "disabled" to turn off
/// - connect_timeout: Connect timeout in seconds, "0" or "disabled" to turn off
/// - pool_idle_timeout: Idle connection timeout in seconds
/// - pool_max_idle_per_host: Maximum idle connections per host
///
/// # Examples
///
/// ```
/// use drive_adapter::storage::DriveConfig;
///
/// let config = DriveConfig::new()
///     .with_option("page_size", "200")
///     .with_option("timeout", "60");
/// assert_eq!(config.page_size(), 200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveConfig {
    /// Create a configuration populated with [`DriveConfig::default_options`].
    pub fn new() -> Self {
        Self {
            options: Self::default_options(),
        }
    }

    /// Create a configuration from defaults overlaid with environment variables.
    ///
    /// Reads `DRIVE_API_BASE`, `DRIVE_UPLOAD_BASE` and `DRIVE_PAGE_SIZE` when set.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        for (var, key) in [
            ("DRIVE_API_BASE", "api_base"),
            ("DRIVE_UPLOAD_BASE", "upload_base"),
            ("DRIVE_PAGE_SIZE", "page_size"),
        ] {
            if let Ok(value) = std::env::var(var) {
                config = config.with_option(key, value);
            }
        }
        config
    }

    /// Get default options.
    ///
    /// # Returns
    ///
    /// A HashMap containing endpoint, page size, timeout and connection pool settings.
    pub fn default_options() -> HashMap<String, String> {
        [
            ("api_base", DEFAULT_API_BASE),
            ("upload_base", DEFAULT_UPLOAD_BASE),
            ("page_size", "1000"),
            ("timeout", "120"),
            ("connect_timeout", "30"),
            ("pool_idle_timeout", "15"),
            ("pool_max_idle_per_host", "5"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Add a configuration option.
    ///
    /// # Returns
    ///
    /// The `DriveConfig` instance with the added option (for method chaining).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add multiple configuration options.
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    pub fn api_base(&self) -> &str {
        self.get_option("api_base")
            .map(|s| s.trim_end_matches('/'))
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn upload_base(&self) -> &str {
        self.get_option("upload_base")
            .map(|s| s.trim_end_matches('/'))
            .unwrap_or(DEFAULT_UPLOAD_BASE)
    }

    /// Page size cap for listings. Zero or unparsable values fall back to the default.
    pub fn page_size(&self) -> u32 {
        self.get_option("page_size")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Check that both endpoints parse as absolute URLs.
    pub fn validate(&self) -> DriveResult<()> {
        for (key, value) in [("api_base", self.api_base()), ("upload_base", self.upload_base())] {
            let parsed = url::Url::parse(value)?;
            if parsed.cannot_be_a_base() {
                return Err(DriveError::ConfigError(format!(
                    "'{}' is not a base URL: {}",
                    key, value
                )));
            }
        }
        Ok(())
    }
}
