// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Serialize;
use std::fmt;

/// Where a deprecated name was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeOrigin {
    /// The deprecated type was instantiated and construction was redirected.
    Construction,
    /// The deprecated type was named as a base and replaced by its target.
    Subclassing,
}

/// A single use of a deprecated provider name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeprecationNotice {
    /// The deprecated name.
    pub deprecated: String,
    /// The name that replaces it.
    pub replacement: String,
    /// How the deprecated name was used.
    pub origin: NoticeOrigin,
}

impl DeprecationNotice {
    /// Creates a notice.
    pub fn new(
        deprecated: impl Into<String>,
        replacement: impl Into<String>,
        origin: NoticeOrigin,
    ) -> Self {
        Self {
            deprecated: deprecated.into(),
            replacement: replacement.into(),
            origin,
        }
    }

    /// The rendered message. Tooling greps for this exact text.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{old} has been renamed to {new} -- the alias {old} will be deprecated in the future.",
            old = self.deprecated,
            new = self.replacement,
        )
    }
}
