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

//! # Metrica Registry
//!
//! The services that turn provider declarations into registered, alias-aware
//! provider types:
//!
//! - [`catalog::ProviderCatalog`] defines types, rewrites deprecated bases and
//!   redirects construction of deprecated names.
//! - [`metrics::MetricRegistry`] maps metric names to the types computing them,
//!   filled by the registration hook on every definition.
//! - [`bootstrap`] installs every definition submitted through `inventory`.
//! - [`service::ProviderService`] ties them together with settings and offers
//!   a process-wide instance.

#![warn(missing_docs)]

pub mod bootstrap;
pub mod catalog;
pub mod metrics;
pub mod service;
pub mod storage;

pub use catalog::ProviderCatalog;
pub use metrics::MetricRegistry;
pub use service::ProviderService;
