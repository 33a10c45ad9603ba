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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::path::basename;

/// Whether an entry is a file or a directory.
///
/// File-only metadata lives inside the `File` variant, so a directory can
/// never carry a mime type or a size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File {
        mime: Option<String>,
        size: Option<u64>,
    },
    Directory,
}

/// A file or directory in the adapter's path-based namespace.
///
/// `path` is the logical path the caller sees. The remote side only knows
/// `id` and `parent_id`; an entry without an `id` has not been created
/// remotely yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "FileEntryRepr", from = "FileEntryRepr")]
pub struct FileEntry {
    pub kind: EntryKind,
    pub path: String,
    pub filename: Option<String>,
    pub id: Option<String>,
    pub parent_id: Option<String>,
    /// Reserved for extra metadata, empty when produced by the adapter.
    pub stat: Map<String, Value>,
}

impl FileEntry {
    /// An unbound file entry at `path`.
    pub fn file(path: impl Into<String>) -> Self {
        Self::with_kind(
            path,
            EntryKind::File {
                mime: None,
                size: None,
            },
        )
    }

    /// An unbound directory entry at `path`.
    pub fn directory(path: impl Into<String>) -> Self {
        Self::with_kind(path, EntryKind::Directory)
    }

    fn with_kind(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            kind,
            path: path.into(),
            filename: None,
            id: None,
            parent_id: None,
            stat: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the mime type. Has no effect on directories.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        if let EntryKind::File { mime: slot, .. } = &mut self.kind {
            *slot = Some(mime.into());
        }
        self
    }

    /// Set the size. Has no effect on directories.
    pub fn with_size(mut self, size: u64) -> Self {
        if let EntryKind::File { size: slot, .. } = &mut self.kind {
            *slot = Some(size);
        }
        self
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn mime(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { mime, .. } => mime.as_deref(),
            EntryKind::Directory => None,
        }
    }

    pub fn size(&self) -> Option<u64> {
        match &self.kind {
            EntryKind::File { size, .. } => *size,
            EntryKind::Directory => None,
        }
    }

    /// True when the entry refers to an existing remote object.
    pub fn is_bound(&self) -> bool {
        self.id.is_some()
    }

    /// Display name: `filename`, or the last segment of `path`.
    pub fn name(&self) -> &str {
        self.filename
            .as_deref()
            .unwrap_or_else(|| basename(&self.path))
    }
}

/// Flat wire shape, matching what file-manager front ends expect.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEntryRepr {
    is_file: bool,
    is_directory: bool,
    #[serde(default)]
    mime: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    path: String,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    stat: Map<String, Value>,
}

impl From<FileEntry> for FileEntryRepr {
    fn from(entry: FileEntry) -> Self {
        let (is_file, mime, size) = match entry.kind {
            EntryKind::File { mime, size } => (true, mime, size),
            EntryKind::Directory => (false, None, None),
        };
        Self {
            is_file,
            is_directory: !is_file,
            mime,
            size,
            path: entry.path,
            filename: entry.filename,
            id: entry.id,
            parent_id: entry.parent_id,
            stat: entry.stat,
        }
    }
}

impl From<FileEntryRepr> for FileEntry {
    fn from(repr: FileEntryRepr) -> Self {
        let kind = if repr.is_directory {
            EntryKind::Directory
        } else {
            EntryKind::File {
                mime: repr.mime,
                size: repr.size,
            }
        };
        Self {
            kind,
            path: repr.path,
            filename: repr.filename,
            id: repr.id,
            parent_id: repr.parent_id,
            stat: repr.stat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_directory_ignores_file_metadata() {
        let dir = FileEntry::directory("/docs")
            .with_mime("text/plain")
            .with_size(10);

        assert!(dir.is_directory());
        assert!(!dir.is_file());
        assert_eq!(dir.mime(), None);
        assert_eq!(dir.size(), None);
    }

    #[test]
    fn test_name_prefers_filename() {
        let entry = FileEntry::file("/a/b/report.txt");
        assert_eq!(entry.name(), "report.txt");

        let renamed = entry.with_filename("other.txt");
        assert_eq!(renamed.name(), "other.txt");
    }

    #[test]
    fn test_is_bound() {
        assert!(!FileEntry::file("/x").is_bound());
        assert!(FileEntry::file("/x").with_id("abc").is_bound());
    }

    #[test]
    fn test_serializes_flat_shape() {
        let entry = FileEntry::file("/notes.txt")
            .with_filename("notes.txt")
            .with_id("f1")
            .with_parent_id("root")
            .with_mime("text/plain")
            .with_size(12);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "isFile": true,
                "isDirectory": false,
                "mime": "text/plain",
                "size": 12,
                "path": "/notes.txt",
                "filename": "notes.txt",
                "id": "f1",
                "parentId": "root",
                "stat": {}
            })
        );
    }

    #[test]
    fn test_deserializes_directory_without_file_fields() {
        let entry: FileEntry = serde_json::from_value(json!({
            "isFile": false,
            "isDirectory": true,
            "mime": "text/plain",
            "path": "/photos",
            "id": "d1"
        }))
        .unwrap();

        assert!(entry.is_directory());
        assert_eq!(entry.mime(), None);
        assert_eq!(entry.id.as_deref(), Some("d1"));
        assert!(entry.stat.is_empty());
    }
}
