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

use std::sync::OnceLock;

/// Process-wide handling of deprecation notices.
///
/// Set once during initialization and fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarningState {
    /// When `true`, notices are captured into logging instead of being
    /// written to stderr. Off by default so notices are never hidden.
    pub capture_notices: bool,
}

static WARNING_STATE: OnceLock<WarningState> = OnceLock::new();

/// Sets the process-wide state.
///
/// Fails with the state already in force if it was set before, or if it
/// was read before being set (which fixes the default).
pub fn init_warning_state(state: WarningState) -> Result<(), WarningState> {
    WARNING_STATE.set(state).map_err(|_| warning_state())
}

/// The process-wide state, fixing the default if nothing was set yet.
pub fn warning_state() -> WarningState {
    *WARNING_STATE.get_or_init(WarningState::default)
}
