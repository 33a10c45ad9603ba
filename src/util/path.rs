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

/// Last segment of a slash-separated path. Empty when the path ends in `/`.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Joins a logical parent path with a child name.
///
/// Injected into the adapter so hosts with their own namespace rules can
/// supply them.
pub trait PathJoin: Send + Sync {
    fn join(&self, base: &str, name: &str) -> String;
}

/// Joins with exactly one `/` between base and name.
///
/// Only the boundary is handled; repeated separators elsewhere are left as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlashPathJoin;

impl PathJoin for SlashPathJoin {
    fn join(&self, base: &str, name: &str) -> String {
        let name = name.strip_prefix('/').unwrap_or(name);
        if base.is_empty() {
            format!("/{}", name)
        } else if base.ends_with('/') {
            format!("{}{}", base, name)
        } else {
            format!("{}/{}", base, name)
        }
    }
}
