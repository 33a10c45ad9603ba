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

//! Drive storage adapter
//!
//! This module maps path-based file operations onto a cloud drive that
//! addresses objects by opaque ids. The pieces:
//!
//! - [`lister`] drives the paginated listing endpoint
//! - [`request`] builds download, upload and creation requests
//! - [`response`] normalizes the provider's response shapes into [`DriveError`]
//! - [`adapter`] composes them behind [`FileSystemAdapter`]
//!
//! Authentication ([`SessionProvider`]), structured API calls ([`DriveApi`])
//! and raw HTTP ([`HttpTransport`]) are injected, with reqwest-backed
//! implementations provided.

pub mod adapter;
pub mod config;
pub mod entry;
pub mod error;
pub mod factory;
pub mod lister;
pub mod provider;
pub mod remote;
pub mod request;
pub mod response;
pub mod rest;
pub mod session;
pub mod transport;

// Public exports
pub use adapter::DriveAdapter;
pub use config::DriveConfig;
pub use entry::{EntryKind, FileEntry};
pub use error::{DriveError, DriveResult};
pub use factory::DriveAdapterFactory;
pub use provider::{FileSystemAdapter, Options};
pub use remote::{DriveApi, RemoteFile};
pub use response::Download;
pub use session::{AccessToken, Session, SessionProvider, StaticTokenProvider};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
