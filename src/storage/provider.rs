// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::entry::FileEntry;
use super::error::DriveResult;
use super::remote::RemoteFile;
use super::response::Download;

/// Per-call options. Keys are defined by the host; the adapter reads `q`
/// (an extra listing filter) and ignores the rest.
pub type Options = HashMap<String, Value>;

/// The file-system operations a host can perform through an adapter.
///
/// Every operation takes the entry it acts on plus a free-form options map.
/// Operations on existing objects need a bound entry (one with an `id`).
#[async_trait]
pub trait FileSystemAdapter: Send + Sync {
    /// Name of the backing service, used in logs and `Debug` output.
    fn name(&self) -> &str;

    /// List the children of a directory.
    ///
    /// # Arguments
    ///
    /// * `container` - The directory to list. An unbound entry lists the root.
    /// * `options` - Per-call options; `q` adds a filter expression
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<FileEntry>)` - Every child visible to this application, empty if there are none
    /// * `Err(DriveError)` - If any page request fails
    async fn list(&self, container: &FileEntry, options: &Options) -> DriveResult<Vec<FileEntry>>;

    /// Read the contents of a file.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The entry is not bound (no request is made)
    /// * The download responds with a failing status
    async fn read(&self, entry: &FileEntry, options: &Options) -> DriveResult<Download>;

    /// Write the contents of a file, creating it first if the entry is unbound.
    ///
    /// # Returns
    ///
    /// The number of bytes the provider reports for the stored file, 0 when it reports none.
    async fn write(&self, entry: &FileEntry, data: Bytes, options: &Options) -> DriveResult<u64>;

    /// Create a directory described by an unbound entry.
    ///
    /// # Returns
    ///
    /// The resource descriptor the provider returns for the new directory.
    async fn create_directory(&self, entry: &FileEntry, options: &Options)
        -> DriveResult<RemoteFile>;

    /// Get a URL from which the file's content can be fetched.
    async fn public_url(&self, entry: &FileEntry, options: &Options) -> DriveResult<String>;
}

impl Debug for dyn FileSystemAdapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "FileSystemAdapter(name={})", self.name())
    }
}
