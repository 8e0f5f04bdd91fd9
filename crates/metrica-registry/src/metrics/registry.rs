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

//! Registry mapping metric names to the provider types that compute them.

use crate::storage::{backend::RegistryBackend, memory_backend::InMemoryBackend, BackendStats};
use metrica_core::metrics::{MetricRegistration, RegisteredFunction, RegistryResult};
use metrica_core::provider::{ExecutionEngine, MetricFunction, ProviderType};
use std::sync::Arc;

/// Central registry of metric functions.
///
/// Storage and the collision policy belong to the backend; the registry adds
/// logging and convenience queries on top.
#[derive(Debug, Clone)]
pub struct MetricRegistry {
    backend: Arc<dyn RegistryBackend>,
}

impl MetricRegistry {
    /// Create a new registry with the default in-memory backend
    pub fn new() -> Self {
        Self::with_backend(Arc::new(InMemoryBackend::new()))
    }

    /// Create a new registry with an in-memory backend sized for `capacity` metrics
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_backend(Arc::new(InMemoryBackend::with_capacity(capacity)))
    }

    /// Create a new registry with a custom backend
    pub fn with_backend(backend: Arc<dyn RegistryBackend>) -> Self {
        Self { backend }
    }

    /// Register `functions` under `metric_name` for `provider`.
    ///
    /// Returns the entries the new functions replaced.
    pub fn register(
        &self,
        metric_name: &str,
        provider: &Arc<ProviderType>,
        functions: &[MetricFunction],
    ) -> RegistryResult<Vec<RegisteredFunction>> {
        let replaced = self
            .backend
            .register_functions(metric_name, provider, functions)?;

        for previous in &replaced {
            if !Arc::ptr_eq(&previous.provider, provider) {
                log::warn!(
                    "Metric `{}` on {} was provided by `{}`; now provided by `{}`",
                    metric_name,
                    previous.function.engine,
                    previous.provider.name(),
                    provider.name()
                );
            }
        }
        log::debug!(
            "Registered metric `{}` ({} function(s)) for `{}`",
            metric_name,
            functions.len(),
            provider.name()
        );
        Ok(replaced)
    }

    /// Put back entries returned by [`register`](Self::register), each under
    /// its original provider.
    pub fn reinstate(
        &self,
        metric_name: &str,
        entries: &[RegisteredFunction],
    ) -> RegistryResult<()> {
        for entry in entries {
            self.backend
                .register_functions(metric_name, &entry.provider, &[entry.function])?;
        }
        Ok(())
    }

    /// Get everything registered under a metric name
    pub fn get(&self, metric_name: &str) -> RegistryResult<MetricRegistration> {
        self.backend.get_registration(metric_name)
    }

    /// Find the function computing `metric_name` on `engine`
    pub fn resolve(&self, metric_name: &str, engine: ExecutionEngine) -> Option<RegisteredFunction> {
        self.backend
            .get_registration(metric_name)
            .ok()
            .and_then(|registration| registration.for_engine(engine).cloned())
    }

    /// Check if a metric name is registered
    pub fn contains(&self, metric_name: &str) -> bool {
        self.backend.contains_metric(metric_name)
    }

    /// All registered metric names, sorted
    pub fn metric_names(&self) -> Vec<String> {
        let mut names = self.backend.list_metric_names();
        names.sort();
        names
    }

    /// The metric names `provider` contributes at least one function to, sorted
    pub fn metrics_for_provider(&self, provider: &Arc<ProviderType>) -> Vec<String> {
        let registrations = if let Some(memory_backend) = self
            .backend
            .as_ref()
            .as_any()
            .downcast_ref::<InMemoryBackend>()
        {
            memory_backend.get_registrations_by_provider(provider)
        } else {
            self.backend
                .list_all_registrations()
                .into_iter()
                .filter(|r| r.is_provided_by(provider))
                .collect()
        };
        let mut names: Vec<String> = registrations.into_iter().map(|r| r.metric_name).collect();
        names.sort();
        names
    }

    /// Drop every function `provider` registered.
    pub fn remove_provider(&self, provider: &Arc<ProviderType>) -> RegistryResult<usize> {
        if let Some(memory_backend) = self
            .backend
            .as_ref()
            .as_any()
            .downcast_ref::<InMemoryBackend>()
        {
            return memory_backend.remove_provider(provider);
        }

        let mut removed = 0;
        for mut registration in self.backend.list_all_registrations() {
            let before = registration.functions.len();
            registration
                .functions
                .retain(|_, entry| !Arc::ptr_eq(&entry.provider, provider));
            if registration.functions.len() == before {
                continue;
            }
            removed += before - registration.functions.len();
            if registration.functions.is_empty() {
                self.backend.remove_registration(&registration.metric_name)?;
            } else {
                self.backend.put_registration(registration)?;
            }
        }
        Ok(removed)
    }

    /// Get the number of registered metric names
    pub fn metric_count(&self) -> usize {
        self.backend.metric_count()
    }

    /// Backend statistics, when the backend keeps them
    pub fn stats(&self) -> Option<BackendStats> {
        self.backend
            .as_ref()
            .as_any()
            .downcast_ref::<InMemoryBackend>()
            .map(InMemoryBackend::get_stats)
    }

    /// Clear all registrations
    pub fn clear_all(&self) -> RegistryResult<()> {
        self.backend.clear_all()
    }

    /// Get direct access to the backend
    pub fn backend(&self) -> &Arc<dyn RegistryBackend> {
        &self.backend
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}
