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

//! Paginated directory listing.
//!
//! [`list_pages`] is a lazy stream with one page request per poll, following
//! the provider's page tokens until one is omitted. [`list_entries`] drains
//! it and maps the concatenated resources onto [`FileEntry`] values.

use futures::stream::{self, Stream, TryStreamExt};
use serde_json::Map;
use tracing::{debug, info, warn};

use super::entry::{EntryKind, FileEntry};
use super::error::DriveResult;
use super::remote::{DriveApi, ListRequest, RemoteFile, LIST_FIELDS};
use super::response::check_response;
use crate::util::path::PathJoin;

/// Where the next page request starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    Start,
    Next(String),
    Done,
}

impl PageCursor {
    fn after(next_page_token: Option<String>) -> Self {
        match next_page_token {
            Some(token) if !token.is_empty() => PageCursor::Next(token),
            _ => PageCursor::Done,
        }
    }
}

/// Listing query for the children of `container`.
///
/// A bound container scopes the query to its id. The root has no scope and
/// leaves it to the provider. An extra `filter` expression is and-ed in.
pub fn container_query(container: &FileEntry, filter: Option<&str>) -> Option<String> {
    let scope = container
        .id
        .as_deref()
        .map(|id| format!("'{}' in parents", id.replace('\'', "\\'")));
    let filter = filter.map(str::trim).filter(|f| !f.is_empty());

    match (scope, filter) {
        (Some(scope), Some(filter)) => Some(format!("{} and ({})", scope, filter)),
        (Some(scope), None) => Some(scope),
        (None, Some(filter)) => Some(filter.to_string()),
        (None, None) => None,
    }
}

/// Stream the raw resource pages matching `query`.
///
/// Pages are fetched on demand; dropping the stream stops pagination. Empty
/// pages that still carry a token do not end the stream.
pub fn list_pages<'a>(
    api: &'a dyn DriveApi,
    query: Option<String>,
    page_size: u32,
) -> impl Stream<Item = DriveResult<Vec<RemoteFile>>> + 'a {
    stream::try_unfold(PageCursor::Start, move |cursor| {
        let query = query.clone();
        async move {
            let page_token = match cursor {
                PageCursor::Done => return Ok(None),
                PageCursor::Start => None,
                PageCursor::Next(token) => Some(token),
            };

            let request = ListRequest {
                page_token,
                page_size,
                fields: LIST_FIELDS.to_string(),
                query,
            };
            debug!(
                "Fetching page query={:?} has_token={}",
                request.query,
                request.page_token.is_some()
            );

            let page = check_response(api.list_files(&request).await?)?;
            debug!(
                "Fetched page count={} has_next={}",
                page.files.len(),
                page.next_page_token.is_some()
            );

            Ok(Some((page.files, PageCursor::after(page.next_page_token))))
        }
    })
}

/// Parse the provider's decimal size string.
///
/// Unparsable values yield `None` and a warning, the listing carries on.
fn parse_size(file: &RemoteFile) -> Option<u64> {
    let raw = file.size.as_deref()?;
    match raw.trim().parse::<u64>() {
        Ok(size) => Some(size),
        Err(e) => {
            warn!("Unparsable size id={} size={:?}: {}", file.id, raw, e);
            None
        }
    }
}

/// Map one remote resource into an entry under `container`.
pub fn to_entry(container: &FileEntry, file: RemoteFile, joiner: &dyn PathJoin) -> FileEntry {
    let kind = if file.is_folder() {
        EntryKind::Directory
    } else {
        EntryKind::File {
            size: parse_size(&file),
            mime: file.mime_type.clone(),
        }
    };
    let parent_id = container
        .id
        .clone()
        .or_else(|| file.parents.first().cloned());

    FileEntry {
        kind,
        path: joiner.join(&container.path, &file.name),
        filename: Some(file.name),
        id: Some(file.id),
        parent_id,
        stat: Map::new(),
    }
}

/// Keep the resources this application may access and map them to entries.
pub fn to_entries(
    container: &FileEntry,
    files: Vec<RemoteFile>,
    joiner: &dyn PathJoin,
) -> Vec<FileEntry> {
    files
        .into_iter()
        .filter(RemoteFile::is_app_authorized)
        .map(|file| to_entry(container, file, joiner))
        .collect()
}

/// List every child of `container`, across all pages.
pub async fn list_entries(
    api: &dyn DriveApi,
    container: &FileEntry,
    filter: Option<&str>,
    page_size: u32,
    joiner: &dyn PathJoin,
) -> DriveResult<Vec<FileEntry>> {
    let query = container_query(container, filter);
    let pages: Vec<Vec<RemoteFile>> = list_pages(api, query, page_size).try_collect().await?;

    let page_count = pages.len();
    let files: Vec<RemoteFile> = pages.into_iter().flatten().collect();
    let raw_count = files.len();
    let entries = to_entries(container, files, joiner);

    info!(
        "Listed path={} pages={} resources={} entries={}",
        container.path,
        page_count,
        raw_count,
        entries.len()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::DriveError;
    use crate::storage::remote::{ApiResponse, FileList, MockDriveApi, FOLDER_MIME_TYPE};
    use crate::util::path::SlashPathJoin;
    use futures::StreamExt;
    use mockall::Sequence;

    fn file(id: &str, name: &str) -> RemoteFile {
        RemoteFile {
            id: id.to_string(),
            name: name.to_string(),
            kind: Some("drive#file".to_string()),
            mime_type: Some("text/plain".to_string()),
            size: Some("10".to_string()),
            parents: vec!["origin".to_string()],
            is_app_authorized: Some(true),
            web_content_link: None,
        }
    }

    fn page(files: Vec<RemoteFile>, next: Option<&str>) -> ApiResponse<FileList> {
        ApiResponse::ok(FileList {
            next_page_token: next.map(|s| s.to_string()),
            files,
        })
    }

    /// Serves `pages` in order, checking each request carries the previous token.
    fn paged_api(pages: Vec<ApiResponse<FileList>>) -> MockDriveApi {
        let mut api = MockDriveApi::new();
        let mut seq = Sequence::new();
        let mut expected_token: Option<String> = None;
        for response in pages {
            let token = expected_token.clone();
            expected_token = response
                .result
                .as_ref()
                .and_then(|list| list.next_page_token.clone());
            api.expect_list_files()
                .withf(move |request| request.page_token == token)
                .times(1)
                .in_sequence(&mut seq)
                .return_once(move |_| Ok(response));
        }
        api
    }

    #[test]
    fn test_container_query() {
        let root = FileEntry::directory("/");
        let folder = FileEntry::directory("/docs").with_id("abc");

        assert_eq!(container_query(&root, None), None);
        assert_eq!(
            container_query(&folder, None).as_deref(),
            Some("'abc' in parents")
        );
        assert_eq!(
            container_query(&folder, Some("trashed = false")).as_deref(),
            Some("'abc' in parents and (trashed = false)")
        );
        assert_eq!(
            container_query(&root, Some("  starred = true ")).as_deref(),
            Some("starred = true")
        );
        assert_eq!(container_query(&root, Some("  ")), None);
    }

    #[tokio::test]
    async fn test_two_pages_flatten_in_order() {
        let api = paged_api(vec![
            page(vec![file("1", "a"), file("2", "b")], Some("t1")),
            page(vec![file("3", "c")], None),
        ]);
        let root = FileEntry::directory("/").with_id("root");

        let entries = list_entries(&api, &root, None, 2, &SlashPathJoin)
            .await
            .unwrap();

        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b", "/c"]);
        assert!(entries
            .iter()
            .all(|e| e.parent_id.as_deref() == Some("root")));
    }

    #[tokio::test]
    async fn test_empty_page_with_token_continues() {
        let api = paged_api(vec![
            page(vec![file("1", "a")], Some("t1")),
            page(vec![], Some("t2")),
            page(vec![file("2", "b")], None),
        ]);
        let root = FileEntry::directory("/");

        let entries = list_entries(&api, &root, None, 1000, &SlashPathJoin)
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_string_token_ends_listing() {
        let api = paged_api(vec![page(vec![file("1", "a")], Some(""))]);
        let entries = list_entries(&api, &FileEntry::directory("/"), None, 10, &SlashPathJoin)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mut api = MockDriveApi::new();
        api.expect_list_files()
            .withf(|request| {
                request.page_size == 25
                    && request.fields == "nextPageToken, files"
                    && request.query.as_deref() == Some("'d1' in parents")
            })
            .times(1)
            .returning(|_| Ok(page(vec![], None)));

        let folder = FileEntry::directory("/docs").with_id("d1");
        let entries = list_entries(&api, &folder, None, 25, &SlashPathJoin)
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_is_lazy() {
        let mut api = MockDriveApi::new();
        api.expect_list_files()
            .times(1)
            .returning(|_| Ok(page(vec![file("1", "a")], Some("more"))));

        let pages = list_pages(&api, None, 1);
        futures::pin_mut!(pages);
        let first = pages.next().await.unwrap().unwrap();
        assert_eq!(first.len(), 1);
        // Dropping here must not request the second page.
    }

    #[tokio::test]
    async fn test_page_error_stops_listing() {
        let mut api = MockDriveApi::new();
        let mut seq = Sequence::new();
        api.expect_list_files()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(page(vec![file("1", "a")], Some("t1"))));
        api.expect_list_files()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::err("Invalid Value")));

        let result = list_entries(&api, &FileEntry::directory("/"), None, 1, &SlashPathJoin).await;
        match result {
            Err(DriveError::RemoteApi(msg)) => assert_eq!(msg, "Invalid Value"),
            other => panic!("Expected RemoteApi error, got {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_resources_are_dropped() {
        let mut hidden = file("2", "hidden");
        hidden.is_app_authorized = Some(false);
        let mut unknown = file("3", "unknown");
        unknown.is_app_authorized = None;

        let entries = to_entries(
            &FileEntry::directory("/"),
            vec![file("1", "shown"), hidden, unknown],
            &SlashPathJoin,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename.as_deref(), Some("shown"));
    }

    #[test]
    fn test_folder_never_carries_file_metadata() {
        let mut folder = file("d1", "photos");
        folder.mime_type = Some(FOLDER_MIME_TYPE.to_string());
        folder.size = Some("4096".to_string());

        let entry = to_entry(&FileEntry::directory("/"), folder, &SlashPathJoin);
        assert!(entry.is_directory());
        assert_eq!(entry.mime(), None);
        assert_eq!(entry.size(), None);
    }

    #[test]
    fn test_file_entry_mapping() {
        let entry = to_entry(
            &FileEntry::directory("/docs"),
            file("f1", "a.txt"),
            &SlashPathJoin,
        );

        assert!(entry.is_file());
        assert_eq!(entry.mime(), Some("text/plain"));
        assert_eq!(entry.size(), Some(10));
        assert_eq!(entry.path, "/docs/a.txt");
        assert_eq!(entry.id.as_deref(), Some("f1"));
        // Root container has no id, so the resource's own parent is used.
        assert_eq!(entry.parent_id.as_deref(), Some("origin"));
        assert!(entry.stat.is_empty());
    }

    #[test]
    fn test_malformed_size_is_none() {
        let mut odd = file("f1", "odd");
        odd.size = Some("12abc".to_string());

        let entry = to_entry(&FileEntry::directory("/"), odd, &SlashPathJoin);
        assert!(entry.is_file());
        assert_eq!(entry.size(), None);
    }

    #[tokio::test]
    async fn test_pagination_transparency() {
        let children: Vec<RemoteFile> = (0..7)
            .map(|i| file(&i.to_string(), &format!("f{}", i)))
            .collect();

        for page_size in 1..=8usize {
            let chunks: Vec<Vec<RemoteFile>> =
                children.chunks(page_size).map(|c| c.to_vec()).collect();
            let last = chunks.len() - 1;
            let pages = chunks
                .into_iter()
                .enumerate()
                .map(|(i, files)| {
                    let token = format!("t{}", i);
                    page(files, (i < last).then_some(token.as_str()))
                })
                .collect();

            let api = paged_api(pages);
            let entries = list_entries(
                &api,
                &FileEntry::directory("/").with_id("root"),
                None,
                page_size as u32,
                &SlashPathJoin,
            )
            .await
            .unwrap();
            assert_eq!(entries.len(), 7, "page_size={}", page_size);
        }
    }
}
