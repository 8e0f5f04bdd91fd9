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

//! Constructed provider instances and the arguments they are built from.

use super::types::ProviderType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A per-type check run on constructor arguments before an instance is built.
pub type ArgsValidator = fn(&ConstructorArgs) -> Result<(), String>;

/// Positional and keyword arguments passed to a provider constructor.
///
/// Redirected construction forwards these untouched to the replacement type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorArgs {
    /// Positional arguments, in call order.
    pub positional: Vec<Value>,
    /// Keyword arguments.
    pub keyword: Map<String, Value>,
}

impl ConstructorArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a keyword argument.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(key.into(), value.into());
        self
    }

    /// Total number of arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Returns `true` if no arguments were given.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Anything that reports a provider type for identity checks.
pub trait Typed {
    /// The concrete type the value was built as.
    fn runtime_type(&self) -> &Arc<ProviderType>;

    /// The type the value presents itself as. Usually the runtime type;
    /// wrappers may report the type they stand in for.
    fn nominal_type(&self) -> &Arc<ProviderType> {
        self.runtime_type()
    }
}

/// An instance of a provider type.
#[derive(Debug, Clone)]
pub struct ProviderInstance {
    provider_type: Arc<ProviderType>,
    args: ConstructorArgs,
}

impl ProviderInstance {
    /// Builds an instance of exactly `provider_type`, running its validator.
    ///
    /// This is the type's own constructor and never follows alias bindings.
    pub fn build(
        provider_type: &Arc<ProviderType>,
        args: &ConstructorArgs,
    ) -> Result<Self, String> {
        if let Some(validate) = provider_type.validator() {
            validate(args)?;
        }
        Ok(Self {
            provider_type: Arc::clone(provider_type),
            args: args.clone(),
        })
    }

    /// The instance's concrete type.
    pub fn provider_type(&self) -> &Arc<ProviderType> {
        &self.provider_type
    }

    /// The arguments the instance was built from.
    pub fn args(&self) -> &ConstructorArgs {
        &self.args
    }
}

impl PartialEq for ProviderInstance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.provider_type, &other.provider_type) && self.args == other.args
    }
}

impl Typed for ProviderInstance {
    fn runtime_type(&self) -> &Arc<ProviderType> {
        &self.provider_type
    }
}
