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
use bytes::Bytes;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, info};

use super::config::DriveConfig;
use super::entry::FileEntry;
use super::error::{DriveError, DriveResult};
use super::lister::list_entries;
use super::provider::{FileSystemAdapter, Options};
use super::remote::RemoteFile;
use super::request::{current_or_create, download_request, folder_resource, upload_request};
use super::response::{
    check_download_response, check_entry, check_response, check_upload_response, Download,
};
use super::session::{Session, SessionProvider};
use super::transport::HttpTransport;
use crate::util::path::{PathJoin, SlashPathJoin};

/// Field selector for public URL lookups.
const PUBLIC_URL_FIELDS: &str = "webContentLink";

/// [`FileSystemAdapter`] over an ID-addressed cloud drive.
///
/// Holds only immutable collaborators. Each operation logs in afresh, and
/// concurrent operations share nothing mutable.
pub struct DriveAdapter {
    config: DriveConfig,
    session: Arc<dyn SessionProvider>,
    transport: Arc<dyn HttpTransport>,
    joiner: Arc<dyn PathJoin>,
}

impl DriveAdapter {
    /// Create an adapter using [`SlashPathJoin`] for logical paths.
    pub fn new(
        config: DriveConfig,
        session: Arc<dyn SessionProvider>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            session,
            transport,
            joiner: Arc::new(SlashPathJoin),
        }
    }

    /// Replace the path join rule.
    pub fn with_path_join(mut self, joiner: Arc<dyn PathJoin>) -> Self {
        self.joiner = joiner;
        self
    }

    async fn login(&self) -> DriveResult<Session> {
        self.session.login().await
    }
}

fn list_filter(options: &Options) -> Option<&str> {
    options.get("q").and_then(|q| q.as_str())
}

#[async_trait]
impl FileSystemAdapter for DriveAdapter {
    fn name(&self) -> &str {
        "drive"
    }

    async fn list(&self, container: &FileEntry, options: &Options) -> DriveResult<Vec<FileEntry>> {
        let session = self.login().await?;
        debug!("list path={} id={:?}", container.path, container.id);

        list_entries(
            session.api.as_ref(),
            container,
            list_filter(options),
            self.config.page_size(),
            self.joiner.as_ref(),
        )
        .await
    }

    async fn read(&self, entry: &FileEntry, _options: &Options) -> DriveResult<Download> {
        let id = check_entry(entry)?;
        let session = self.login().await?;
        debug!("read path={} id={}", entry.path, id);

        let request = download_request(self.config.api_base(), &session.token, id);
        let response = self.transport.send(request).await?;
        check_download_response(response, entry)
    }

    async fn write(&self, entry: &FileEntry, data: Bytes, _options: &Options) -> DriveResult<u64> {
        let session = self.login().await?;
        let id = current_or_create(session.api.as_ref(), entry).await?;
        debug!("write path={} id={} len={}", entry.path, id, data.len());

        let request = upload_request(self.config.upload_base(), &session.token, &id, entry, data);
        let response = self.transport.send(request).await?;
        let written = check_upload_response(response)?;

        info!("Wrote path={} id={} size={}", entry.path, id, written);
        Ok(written)
    }

    async fn create_directory(
        &self,
        entry: &FileEntry,
        _options: &Options,
    ) -> DriveResult<RemoteFile> {
        if let Some(id) = &entry.id {
            return Err(DriveError::InvalidReference(format!(
                "'{}' already exists as {}",
                entry.path, id
            )));
        }
        let session = self.login().await?;

        let resource = folder_resource(entry);
        let created = check_response(session.api.create_file(&resource).await?)?;
        info!(
            "Created directory path={} id={} parents={:?}",
            entry.path, created.id, resource.parents
        );
        Ok(created)
    }

    async fn public_url(&self, entry: &FileEntry, _options: &Options) -> DriveResult<String> {
        let id = check_entry(entry)?;
        let session = self.login().await?;

        let file = check_response(session.api.get_file(id, PUBLIC_URL_FIELDS).await?)?;
        file.web_content_link
            .ok_or_else(|| DriveError::RemoteApi(format!("no public url for {}", id)))
    }
}

impl Debug for DriveAdapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DriveAdapter(api_base={}, upload_base={}, page_size={})",
            self.config.api_base(),
            self.config.upload_base(),
            self.config.page_size()
        )
    }
}
