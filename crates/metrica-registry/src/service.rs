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

//! Service owning a provider catalog and its metric registry.

use crate::bootstrap::install_submitted;
use crate::catalog::ProviderCatalog;
use crate::metrics::MetricRegistry;
use metrica_core::config::CatalogSettings;
use metrica_core::deprecation::{init_warning_state, DiagnosticSink, NoticeSink};
use metrica_core::provider::DefinitionError;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static GLOBAL_SERVICE: OnceLock<ProviderService> = OnceLock::new();
static GLOBAL_INIT: Mutex<()> = Mutex::new(());

/// Service owning the provider catalog and its metric registry.
#[derive(Debug)]
pub struct ProviderService {
    catalog: ProviderCatalog,
    settings: CatalogSettings,
}

impl ProviderService {
    /// Creates a service with an empty catalog reporting to the diagnostic channel.
    ///
    /// Applies the settings' notice handling to the process, unless it was
    /// already fixed.
    pub fn new(settings: CatalogSettings) -> Self {
        Self::with_sink(settings, Arc::new(DiagnosticSink))
    }

    /// Creates a service with an empty catalog reporting to `notices`.
    pub fn with_sink(settings: CatalogSettings, notices: Arc<dyn NoticeSink>) -> Self {
        if let Err(current) = init_warning_state(settings.warning_state()) {
            log::debug!("Warning state already set to {current:?}; keeping it");
        }
        let registry = MetricRegistry::with_capacity(settings.initial_capacity);
        Self {
            catalog: ProviderCatalog::with_sink(registry, notices),
            settings,
        }
    }

    /// Creates a service and installs every submitted provider definition.
    pub fn bootstrap(settings: CatalogSettings) -> Result<Self, DefinitionError> {
        let service = Self::new(settings);
        install_submitted(&service.catalog)?;
        Ok(service)
    }

    /// The process-wide service, bootstrapped on first call.
    ///
    /// Concurrent first calls bootstrap once; the others wait and share the
    /// result. A failed bootstrap leaves the service unset.
    pub fn init_global(settings: CatalogSettings) -> Result<&'static Self, DefinitionError> {
        init_once(&GLOBAL_SERVICE, &GLOBAL_INIT, || Self::bootstrap(settings))
    }

    /// The process-wide service, if it was initialized.
    pub fn global() -> Option<&'static Self> {
        GLOBAL_SERVICE.get()
    }

    /// Returns a reference to the provider catalog.
    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// Returns a reference to the metric registry.
    pub fn registry(&self) -> &MetricRegistry {
        self.catalog.registry()
    }

    /// The settings the service was created with.
    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }
}

fn init_once<T, E>(
    cell: &'static OnceLock<T>,
    guard: &Mutex<()>,
    build: impl FnOnce() -> Result<T, E>,
) -> Result<&'static T, E> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let _lock = guard.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = build()?;
    Ok(cell.get_or_init(|| value))
}

impl Default for ProviderService {
    fn default() -> Self {
        Self::new(CatalogSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrica_core::deprecation::{warning_state, ChannelSink};
    use metrica_core::provider::ProviderDecl;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_service_shares_registry_with_catalog() {
        let service = ProviderService::with_sink(
            CatalogSettings::default(),
            Arc::new(ChannelSink::new()),
        );
        assert!(std::ptr::eq(service.registry(), service.catalog().registry()));
        assert!(service.catalog().is_empty());
    }

    #[test]
    fn test_warning_state_is_fixed_once() {
        let _first = ProviderService::default();
        let fixed = warning_state();
        let _second = ProviderService::new(CatalogSettings {
            capture_notices: !fixed.capture_notices,
            ..CatalogSettings::default()
        });
        assert_eq!(warning_state(), fixed);
    }

    #[test]
    fn test_racing_initializers_build_once() {
        static CELL: OnceLock<usize> = OnceLock::new();
        static GUARD: Mutex<()> = Mutex::new(());
        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let value = init_once(&CELL, &GUARD, || {
                        BUILDS.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(10));
                        Ok::<_, ()>(i)
                    })
                    .unwrap();
                    value as *const usize as usize
                })
            })
            .collect();
        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(addresses.iter().all(|a| *a == addresses[0]));
    }

    #[test]
    fn test_failed_initializer_leaves_cell_unset() {
        static CELL: OnceLock<u8> = OnceLock::new();
        static GUARD: Mutex<()> = Mutex::new(());

        assert_eq!(init_once(&CELL, &GUARD, || Err("boom")), Err("boom"));
        assert!(CELL.get().is_none());
        assert_eq!(init_once(&CELL, &GUARD, || Ok::<_, &str>(7)), Ok(&7));
    }

    #[test]
    fn test_settings_are_kept() {
        let settings = CatalogSettings::from_ron_str("(initial_capacity: 4)").unwrap();
        let service = ProviderService::with_sink(settings.clone(), Arc::new(ChannelSink::new()));
        assert_eq!(service.settings(), &settings);

        service.catalog().define(ProviderDecl::new("Base")).unwrap();
        assert!(service.catalog().contains("Base"));
    }
}
