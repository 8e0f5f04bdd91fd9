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

use crate::storage::backend::{BackendStats, RegistryBackend};
use metrica_core::metrics::{
    MetricRegistration, RegisteredFunction, RegistryError, RegistryResult,
};
use metrica_core::provider::{ExecutionEngine, MetricFunction, ProviderType};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// In-memory registry backend using `RwLock<HashMap>`
///
/// Lookups take the read lock; every mutation, including a whole
/// `register_functions` call, happens under a single write lock so concurrent
/// definitions cannot lose each other's updates.
#[derive(Debug)]
pub struct InMemoryBackend {
    storage: RwLock<HashMap<String, MetricRegistration>>,
}

fn write_lock_error() -> RegistryError {
    RegistryError::StorageError("Failed to acquire write lock".to_string())
}

fn read_lock_error() -> RegistryError {
    RegistryError::StorageError("Failed to acquire read lock".to_string())
}

impl InMemoryBackend {
    /// Create a new in-memory backend
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new in-memory backend with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Get statistics about this backend
    pub fn get_stats(&self) -> BackendStats {
        let Ok(storage) = self.storage.read() else {
            return BackendStats {
                total_metrics: 0,
                total_functions: 0,
                provider_count: 0,
                deprecated_functions: 0,
            };
        };

        let mut providers: HashSet<*const ProviderType> = HashSet::new();
        let mut total_functions = 0;
        let mut deprecated_functions = 0;

        for entry in storage.values().flat_map(|r| r.functions.values()) {
            total_functions += 1;
            providers.insert(Arc::as_ptr(&entry.provider));
            if entry.provider.is_deprecated() {
                deprecated_functions += 1;
            }
        }

        BackendStats {
            total_metrics: storage.len(),
            total_functions,
            provider_count: providers.len(),
            deprecated_functions,
        }
    }

    /// Get the registrations that have at least one function from `provider`
    pub fn get_registrations_by_provider(
        &self,
        provider: &Arc<ProviderType>,
    ) -> Vec<MetricRegistration> {
        let Ok(storage) = self.storage.read() else {
            return Vec::new();
        };
        storage
            .values()
            .filter(|r| r.is_provided_by(provider))
            .cloned()
            .collect()
    }

    /// Get the metric names that can run on `engine`
    pub fn get_metric_names_by_engine(&self, engine: ExecutionEngine) -> Vec<String> {
        let Ok(storage) = self.storage.read() else {
            return Vec::new();
        };
        storage
            .values()
            .filter(|r| r.for_engine(engine).is_some())
            .map(|r| r.metric_name.clone())
            .collect()
    }

    /// Drop every function registered by `provider`, removing metric names
    /// left without functions. Returns the number of functions removed.
    pub fn remove_provider(&self, provider: &Arc<ProviderType>) -> RegistryResult<usize> {
        let mut storage = self.storage.write().map_err(|_| write_lock_error())?;

        let mut removed = 0;
        for registration in storage.values_mut() {
            let before = registration.functions.len();
            registration
                .functions
                .retain(|_, entry| !Arc::ptr_eq(&entry.provider, provider));
            removed += before - registration.functions.len();
        }
        storage.retain(|_, registration| !registration.functions.is_empty());

        Ok(removed)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBackend for InMemoryBackend {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn put_registration(&self, registration: MetricRegistration) -> RegistryResult<()> {
        let mut storage = self.storage.write().map_err(|_| write_lock_error())?;
        storage.insert(registration.metric_name.clone(), registration);
        Ok(())
    }

    fn get_registration(&self, metric_name: &str) -> RegistryResult<MetricRegistration> {
        let storage = self.storage.read().map_err(|_| read_lock_error())?;
        storage
            .get(metric_name)
            .cloned()
            .ok_or_else(|| RegistryError::MetricNotFound(metric_name.to_string()))
    }

    fn contains_metric(&self, metric_name: &str) -> bool {
        if let Ok(storage) = self.storage.read() {
            storage.contains_key(metric_name)
        } else {
            false
        }
    }

    fn remove_registration(&self, metric_name: &str) -> RegistryResult<()> {
        let mut storage = self.storage.write().map_err(|_| write_lock_error())?;
        storage
            .remove(metric_name)
            .map(|_| ())
            .ok_or_else(|| RegistryError::MetricNotFound(metric_name.to_string()))
    }

    fn list_metric_names(&self) -> Vec<String> {
        if let Ok(storage) = self.storage.read() {
            storage.keys().cloned().collect()
        } else {
            Vec::new()
        }
    }

    fn list_all_registrations(&self) -> Vec<MetricRegistration> {
        if let Ok(storage) = self.storage.read() {
            storage.values().cloned().collect()
        } else {
            Vec::new()
        }
    }

    fn clear_all(&self) -> RegistryResult<()> {
        let mut storage = self.storage.write().map_err(|_| write_lock_error())?;
        storage.clear();
        Ok(())
    }

    fn metric_count(&self) -> usize {
        if let Ok(storage) = self.storage.read() {
            storage.len()
        } else {
            0
        }
    }

    fn register_functions(
        &self,
        metric_name: &str,
        provider: &Arc<ProviderType>,
        functions: &[MetricFunction],
    ) -> RegistryResult<Vec<RegisteredFunction>> {
        let mut storage = self.storage.write().map_err(|_| write_lock_error())?;
        let registration = storage
            .entry(metric_name.to_string())
            .or_insert_with(|| MetricRegistration::new(metric_name));
        Ok(functions
            .iter()
            .filter_map(|function| registration.insert(provider, *function))
            .collect())
    }
}
