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

//! Settings for a provider catalog.

use crate::deprecation::WarningState;
use serde::Deserialize;
use thiserror::Error;

/// An error raised while loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The settings text could not be parsed.
    #[error("invalid catalog settings: {0}")]
    Parse(String),
}

/// Settings applied when a provider service starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Capture deprecation notices into logging instead of stderr.
    pub capture_notices: bool,
    /// Initial capacity of the metric registry's storage.
    pub initial_capacity: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            capture_notices: false,
            initial_capacity: 64,
        }
    }
}

impl CatalogSettings {
    /// Parses settings from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        ron::from_str(text).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// The process-wide notice handling these settings ask for.
    pub fn warning_state(&self) -> WarningState {
        WarningState {
            capture_notices: self.capture_notices,
        }
    }
}
