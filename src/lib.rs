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

//! # Drive Adapter
//!
//! A file-system adapter for cloud drives that address objects by opaque ids
//! instead of paths.
//!
//! Hosts speak in terms of [`FileEntry`] values (a logical path plus
//! metadata). The adapter translates five operations onto the drive's API:
//!
//! - **list**: pages through a folder's children and flattens them into entries
//! - **read**: downloads a file's media content
//! - **write**: uploads content, creating the remote file first when needed
//! - **create_directory**: creates a folder resource
//! - **public_url**: looks up a downloadable link
//!
//! Every operation obtains a fresh session from an injected
//! [`SessionProvider`], and every provider failure is normalized into
//! [`DriveError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use drive_adapter::{AccessToken, DriveAdapterFactory, DriveConfig, FileEntry, Options};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let adapter = DriveAdapterFactory::with_token(
//!     DriveConfig::from_env(),
//!     AccessToken::bearer("ya29.token"),
//! )?;
//!
//! let root = FileEntry::directory("/").with_id("root");
//! for entry in adapter.list(&root, &Options::new()).await? {
//!     println!("{} {:?}", entry.path, entry.size());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`storage`] - The adapter, its collaborators and the drive data model
//! - [`util`] - Utility functions and helpers

pub mod storage;
pub mod util;

// Re-export commonly used types
pub use storage::{
    AccessToken, DriveAdapter, DriveAdapterFactory, DriveConfig, DriveError, DriveResult,
    FileEntry, FileSystemAdapter, Options, SessionProvider,
};
