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

//! # Metrica Core
//!
//! Foundational crate containing the provider type model, alias bindings,
//! deprecation notices and the contracts shared by the catalog and the
//! metric registry.

#![warn(missing_docs)]

pub mod config;
pub mod deprecation;
pub mod graph;
pub mod metrics;
pub mod provider;

pub use config::{CatalogSettings, SettingsError};
pub use deprecation::{DeprecationNotice, NoticeOrigin, NoticeSink, WarningState};
pub use metrics::{MetricRegistration, RegisteredFunction, RegistryError, RegistryResult};
pub use provider::{
    is_instance_of_or_alias, is_subclass_of_or_alias, AliasBinding, ConstructionError,
    ConstructorArgs, DefinitionError, MetricFunction, ProviderDecl, ProviderDefinition,
    ProviderInstance, ProviderType, Typed,
};

// Re-exported so provider crates can submit definitions without naming the dependency.
pub use inventory;
