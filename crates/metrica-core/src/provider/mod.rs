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

//! The provider type model.
//!
//! A metric provider is described at runtime by a [`ProviderType`]. Types are
//! created by the catalog in `metrica-registry` and are always shared as
//! `Arc<ProviderType>`; two handles denote the same type exactly when they
//! point to the same allocation.

mod definition;
mod error;
mod function;
mod identity;
mod instance;
mod types;

pub use self::definition::{ProviderDecl, ProviderDefinition};
pub use self::error::{ConstructionError, DefinitionError};
pub use self::function::{ComputeFn, ExecutionEngine, MetricFnType, MetricFunction};
pub use self::identity::{is_instance_of_or_alias, is_subclass_of_or_alias};
pub use self::instance::{ArgsValidator, ConstructorArgs, ProviderInstance, Typed};
pub use self::types::{AliasBinding, ProviderType, ProviderTypeParts};
