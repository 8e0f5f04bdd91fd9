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

//! Abstract definitions for the metric registry.
//!
//! The registry maps a metric name to the provider type that computes it,
//! one function per execution engine. Storage lives in `metrica-registry`.

use crate::provider::{ExecutionEngine, MetricFunction, ProviderType};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// A metric function together with the provider type that declared it.
#[derive(Debug, Clone)]
pub struct RegisteredFunction {
    /// The declaring provider type.
    pub provider: Arc<ProviderType>,
    /// The function itself.
    pub function: MetricFunction,
}

/// Everything registered under one metric name.
#[derive(Debug, Clone)]
pub struct MetricRegistration {
    /// The metric's name.
    pub metric_name: String,
    /// One function per engine.
    pub functions: BTreeMap<ExecutionEngine, RegisteredFunction>,
}

impl MetricRegistration {
    /// Creates an empty registration for `metric_name`.
    pub fn new(metric_name: impl Into<String>) -> Self {
        Self {
            metric_name: metric_name.into(),
            functions: BTreeMap::new(),
        }
    }

    /// Inserts `function` for its engine, returning the entry it replaced.
    pub fn insert(
        &mut self,
        provider: &Arc<ProviderType>,
        function: MetricFunction,
    ) -> Option<RegisteredFunction> {
        self.functions.insert(
            function.engine,
            RegisteredFunction {
                provider: Arc::clone(provider),
                function,
            },
        )
    }

    /// The function registered for `engine`.
    pub fn for_engine(&self, engine: ExecutionEngine) -> Option<&RegisteredFunction> {
        self.functions.get(&engine)
    }

    /// Returns `true` if any function was registered by `provider`.
    pub fn is_provided_by(&self, provider: &Arc<ProviderType>) -> bool {
        self.functions
            .values()
            .any(|entry| Arc::ptr_eq(&entry.provider, provider))
    }
}

/// A specialized `Result` type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// An error that can occur within the metric registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No metric with this name is registered.
    #[error("metric not registered: {0}")]
    MetricNotFound(String),
    /// The storage layer failed.
    #[error("storage error: {0}")]
    StorageError(String),
}
