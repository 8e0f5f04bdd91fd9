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

//! Deprecation notices for renamed provider types.
//!
//! A notice is emitted every time a deprecated name is used: once per
//! redirected construction and once per aliased base substitution. Notices
//! are delivered to a [`NoticeSink`]; the default [`DiagnosticSink`] honours
//! the process-wide [`WarningState`].

mod notice;
mod sink;
mod state;

pub use self::notice::{DeprecationNotice, NoticeOrigin};
pub use self::sink::{ChannelSink, DiagnosticSink, NoticeRoute, NoticeSink, NOTICE_LOG_TARGET};
pub use self::state::{init_warning_state, warning_state, WarningState};
