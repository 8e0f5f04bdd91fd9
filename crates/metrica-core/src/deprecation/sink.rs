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

use super::notice::DeprecationNotice;
use super::state::{warning_state, WarningState};
use std::fmt::Debug;

/// The `log` target used when notices are captured into logging.
pub const NOTICE_LOG_TARGET: &str = "metrica::deprecation";

/// Receives deprecation notices.
pub trait NoticeSink: Send + Sync + Debug {
    /// Delivers one notice.
    fn emit(&self, notice: &DeprecationNotice);
}

/// Where [`DiagnosticSink`] delivers a notice, with the line it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeRoute {
    /// Written to stderr.
    Stderr(String),
    /// Logged at warn level under `target`.
    Log {
        /// The `log` target.
        target: &'static str,
        /// The logged message.
        message: String,
    },
}

/// The standard diagnostic channel.
///
/// With notice capture off (the default) notices are written to stderr.
/// With capture on they are routed into `log` under [`NOTICE_LOG_TARGET`],
/// where the logger configuration decides whether they are shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiagnosticSink;

impl DiagnosticSink {
    /// Picks the route for `notice` under `state`.
    pub fn route(state: WarningState, notice: &DeprecationNotice) -> NoticeRoute {
        if state.capture_notices {
            NoticeRoute::Log {
                target: NOTICE_LOG_TARGET,
                message: notice.message(),
            }
        } else {
            NoticeRoute::Stderr(format!("DeprecationWarning: {notice}"))
        }
    }
}

impl NoticeSink for DiagnosticSink {
    fn emit(&self, notice: &DeprecationNotice) {
        match Self::route(warning_state(), notice) {
            NoticeRoute::Stderr(line) => eprintln!("{line}"),
            NoticeRoute::Log { target, message } => log::warn!(target: target, "{message}"),
        }
    }
}

/// A sink that forwards notices over an unbounded channel.
///
/// Useful for tooling that inspects notices and for tests that count them.
#[derive(Debug)]
pub struct ChannelSink {
    sender: flume::Sender<DeprecationNotice>,
    receiver: flume::Receiver<DeprecationNotice>,
}

impl ChannelSink {
    /// Creates a sink with a fresh channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Returns a clone of the sending end.
    pub fn sender(&self) -> flume::Sender<DeprecationNotice> {
        self.sender.clone()
    }

    /// Returns the receiving end.
    pub fn receiver(&self) -> &flume::Receiver<DeprecationNotice> {
        &self.receiver
    }

    /// Takes every notice received so far.
    pub fn drain(&self) -> Vec<DeprecationNotice> {
        self.receiver.try_iter().collect()
    }
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeSink for ChannelSink {
    fn emit(&self, notice: &DeprecationNotice) {
        log::trace!("Dispatching deprecation notice for {}", notice.deprecated);
        if let Err(e) = self.sender.send(notice.clone()) {
            log::error!("Failed to deliver deprecation notice: {e}");
        }
    }
}
