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

use crate::metrics::RegistryError;
use thiserror::Error;

/// A fatal error raised while defining a provider type.
///
/// A failed definition leaves neither a type in the catalog nor entries in
/// the metric registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The alias target named by a deprecated type is not a defined type.
    #[error("provider `{provider}` is an alias of `{target}`, which is not a defined provider type")]
    UnresolvedAlias {
        /// The type being defined.
        provider: String,
        /// The alias target that could not be resolved.
        target: String,
    },
    /// A declared base is not a defined type.
    #[error("provider `{provider}` declares unknown base `{base}`")]
    UnknownBase {
        /// The type being defined.
        provider: String,
        /// The base that could not be resolved.
        base: String,
    },
    /// A type with the same name already exists.
    #[error("provider type `{0}` is already defined")]
    AlreadyDefined(String),
    /// The effective bases admit no consistent method-resolution order.
    #[error("cannot create a consistent base order for provider `{provider}` from bases [{}]", .bases.join(", "))]
    InconsistentLineage {
        /// The type being defined.
        provider: String,
        /// The effective base names.
        bases: Vec<String>,
    },
    /// Submitted definitions depend on each other in a cycle.
    #[error("provider definitions form a dependency cycle: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),
    /// The metric registry rejected the type's functions.
    #[error("failed to register metric functions of `{provider}`: {source}")]
    Registration {
        /// The type being defined.
        provider: String,
        /// The registry failure.
        #[source]
        source: RegistryError,
    },
}

/// An error raised while constructing a provider instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// No provider type has the requested name.
    #[error("unknown provider type `{0}`")]
    UnknownType(String),
    /// The constructing type rejected the arguments.
    #[error("invalid arguments for `{provider}`: {reason}")]
    InvalidArguments {
        /// The type whose validator rejected the arguments.
        provider: String,
        /// The validator's message.
        reason: String,
    },
}
