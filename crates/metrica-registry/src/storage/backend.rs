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

use metrica_core::metrics::{MetricRegistration, RegisteredFunction, RegistryResult};
use metrica_core::provider::{MetricFunction, ProviderType};
use std::fmt::Debug;
use std::sync::Arc;

/// Trait defining the interface for metric registry storage backends
pub trait RegistryBackend: Send + Sync + Debug + 'static {
    /// Get a reference to this object as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Store or replace the registration for its metric name
    fn put_registration(&self, registration: MetricRegistration) -> RegistryResult<()>;

    /// Retrieve the registration for a metric name
    fn get_registration(&self, metric_name: &str) -> RegistryResult<MetricRegistration>;

    /// Check if a metric name is registered
    fn contains_metric(&self, metric_name: &str) -> bool;

    /// Remove a metric name and everything registered under it
    fn remove_registration(&self, metric_name: &str) -> RegistryResult<()>;

    /// Get all registered metric names
    fn list_metric_names(&self) -> Vec<String>;

    /// Get all registrations (potentially expensive operation)
    fn list_all_registrations(&self) -> Vec<MetricRegistration>;

    /// Clear all registrations
    fn clear_all(&self) -> RegistryResult<()>;

    /// Get the number of registered metric names
    fn metric_count(&self) -> usize;

    /// Add `functions` under `metric_name` on behalf of `provider`.
    ///
    /// A function replaces whatever was registered for the same engine.
    /// Returns the replaced entries. The default implementation reads and
    /// writes back; backends shared between threads should override it with
    /// a single locked update.
    fn register_functions(
        &self,
        metric_name: &str,
        provider: &Arc<ProviderType>,
        functions: &[MetricFunction],
    ) -> RegistryResult<Vec<RegisteredFunction>> {
        let mut registration = self
            .get_registration(metric_name)
            .unwrap_or_else(|_| MetricRegistration::new(metric_name));
        let replaced = functions
            .iter()
            .filter_map(|function| registration.insert(provider, *function))
            .collect();
        self.put_registration(registration)?;
        Ok(replaced)
    }
}

/// Statistics about the registry backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStats {
    /// Number of registered metric names
    pub total_metrics: usize,
    /// Number of registered functions across all engines
    pub total_functions: usize,
    /// Number of distinct provider types with at least one function
    pub provider_count: usize,
    /// Number of functions registered by deprecated provider types
    pub deprecated_functions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrica_core::metrics::RegistryError;
    use metrica_core::provider::{ExecutionEngine, ProviderTypeParts};
    use std::sync::Mutex;

    // Single-slot backend relying on the default `register_functions`.
    #[derive(Debug, Default)]
    struct SlotBackend {
        slot: Mutex<Option<MetricRegistration>>,
    }

    impl RegistryBackend for SlotBackend {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn put_registration(&self, registration: MetricRegistration) -> RegistryResult<()> {
            *self.slot.lock().unwrap() = Some(registration);
            Ok(())
        }

        fn get_registration(&self, metric_name: &str) -> RegistryResult<MetricRegistration> {
            self.slot
                .lock()
                .unwrap()
                .clone()
                .filter(|r| r.metric_name == metric_name)
                .ok_or_else(|| RegistryError::MetricNotFound(metric_name.to_string()))
        }

        fn contains_metric(&self, metric_name: &str) -> bool {
            self.get_registration(metric_name).is_ok()
        }

        fn remove_registration(&self, metric_name: &str) -> RegistryResult<()> {
            self.get_registration(metric_name)?;
            *self.slot.lock().unwrap() = None;
            Ok(())
        }

        fn list_metric_names(&self) -> Vec<String> {
            self.slot
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.metric_name.clone())
                .collect()
        }

        fn list_all_registrations(&self) -> Vec<MetricRegistration> {
            self.slot.lock().unwrap().iter().cloned().collect()
        }

        fn clear_all(&self) -> RegistryResult<()> {
            *self.slot.lock().unwrap() = None;
            Ok(())
        }

        fn metric_count(&self) -> usize {
            self.list_metric_names().len()
        }
    }

    fn provider(name: &str) -> Arc<ProviderType> {
        Arc::new(ProviderType::from_parts(ProviderTypeParts {
            name: name.to_string(),
            declared_bases: Vec::new(),
            bases: Vec::new(),
            ancestors: Vec::new(),
            alias_target: None,
            metric_functions: Vec::new(),
            validator: None,
        }))
    }

    fn noop(_: &serde_json::Value) -> anyhow::Result<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }

    #[test]
    fn test_default_register_functions() {
        let backend = SlotBackend::default();
        let first = provider("TableRowCount");
        let second = provider("TableRowCountV2");
        let function = MetricFunction::value("table.row_count", ExecutionEngine::Sql, noop);

        let replaced = backend
            .register_functions("table.row_count", &first, &[function])
            .unwrap();
        assert!(replaced.is_empty());
        assert_eq!(backend.metric_count(), 1);

        let replaced = backend
            .register_functions("table.row_count", &second, &[function])
            .unwrap();
        assert_eq!(replaced.len(), 1);
        assert!(Arc::ptr_eq(&replaced[0].provider, &first));
    }
}
