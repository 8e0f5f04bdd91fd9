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

//! The provider catalog: defines types, resolves deprecated aliases and
//! constructs instances.
//!
//! Defining a type runs, in order: alias target and base resolution, base
//! rewriting and de-duplication, linearization, construction of the
//! [`ProviderType`], then the registration hook that publishes its metric
//! functions. Any failure leaves the catalog and the registry unchanged.

mod factory;
mod lineage;

pub use self::factory::instantiate;
pub use self::lineage::effective_bases;

use crate::metrics::{register_metric_functions, MetricRegistry};
use metrica_core::deprecation::{DiagnosticSink, NoticeSink};
use metrica_core::provider::{
    is_instance_of_or_alias, is_subclass_of_or_alias, ConstructionError, ConstructorArgs,
    DefinitionError, ProviderDecl, ProviderInstance, ProviderType, ProviderTypeParts, Typed,
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
struct TypeTable {
    by_name: HashMap<String, Arc<ProviderType>>,
    order: Vec<String>,
}

/// A set of provider types keyed by name, bound to a metric registry.
#[derive(Debug)]
pub struct ProviderCatalog {
    types: RwLock<TypeTable>,
    registry: MetricRegistry,
    notices: Arc<dyn NoticeSink>,
}

impl ProviderCatalog {
    /// Creates an empty catalog writing notices to the diagnostic channel.
    pub fn new(registry: MetricRegistry) -> Self {
        Self::with_sink(registry, Arc::new(DiagnosticSink))
    }

    /// Creates an empty catalog writing notices to `notices`.
    pub fn with_sink(registry: MetricRegistry, notices: Arc<dyn NoticeSink>) -> Self {
        log::info!("Provider catalog initialized");
        Self {
            types: RwLock::new(TypeTable::default()),
            registry,
            notices,
        }
    }

    /// Defines a provider type.
    ///
    /// Deprecated bases are replaced by their targets (one notice each) and
    /// repeated bases collapse to their first occurrence. The new type's
    /// metric functions are registered before it becomes visible.
    pub fn define(&self, decl: ProviderDecl) -> Result<Arc<ProviderType>, DefinitionError> {
        let mut table = self.types.write().unwrap_or_else(PoisonError::into_inner);

        if table.by_name.contains_key(&decl.name) {
            return Err(DefinitionError::AlreadyDefined(decl.name));
        }

        let lineage = lineage::resolve(&decl, |name| table.by_name.get(name).cloned())?;
        let provider = Arc::new(ProviderType::from_parts(ProviderTypeParts {
            name: decl.name,
            declared_bases: decl.bases,
            bases: lineage.bases,
            ancestors: lineage.ancestors,
            alias_target: lineage.alias_target,
            metric_functions: decl.metric_functions,
            validator: decl.validator,
        }));

        if let Err(source) = register_metric_functions(&self.registry, &provider) {
            return Err(DefinitionError::Registration {
                provider: provider.name().to_string(),
                source,
            });
        }

        table
            .by_name
            .insert(provider.name().to_string(), Arc::clone(&provider));
        table.order.push(provider.name().to_string());
        drop(table);

        for notice in &lineage.substitutions {
            self.notices.emit(notice);
        }
        match provider.alias() {
            Some(binding) => log::debug!(
                "Defined provider type `{}` (deprecated alias of `{}`)",
                provider.name(),
                binding.target().name()
            ),
            None => log::debug!("Defined provider type `{}`", provider.name()),
        }

        Ok(provider)
    }

    /// Constructs an instance of the type named `name`.
    ///
    /// A deprecated name builds its alias target and emits one notice.
    pub fn construct(
        &self,
        name: &str,
        args: &ConstructorArgs,
    ) -> Result<ProviderInstance, ConstructionError> {
        let ty = self
            .get(name)
            .ok_or_else(|| ConstructionError::UnknownType(name.to_string()))?;
        self.construct_type(&ty, args)
    }

    /// Constructs an instance of `ty`, redirecting if it is deprecated.
    pub fn construct_type(
        &self,
        ty: &Arc<ProviderType>,
        args: &ConstructorArgs,
    ) -> Result<ProviderInstance, ConstructionError> {
        instantiate(ty, args, self.notices.as_ref())
    }

    /// Looks up a type by name.
    pub fn get(&self, name: &str) -> Option<Arc<ProviderType>> {
        self.read_table().by_name.get(name).cloned()
    }

    /// Returns `true` if a type named `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.read_table().by_name.contains_key(name)
    }

    /// All type names in definition order.
    pub fn names(&self) -> Vec<String> {
        self.read_table().order.clone()
    }

    /// Number of defined types.
    pub fn len(&self) -> usize {
        self.read_table().order.len()
    }

    /// Returns `true` if no type is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(deprecated, replacement)` name pairs in definition order.
    pub fn deprecated_aliases(&self) -> Vec<(String, String)> {
        let table = self.read_table();
        table
            .order
            .iter()
            .filter_map(|name| table.by_name.get(name))
            .filter_map(|ty| {
                ty.alias()
                    .map(|binding| (ty.name().to_string(), binding.target().name().to_string()))
            })
            .collect()
    }

    /// Alias-aware subclass check by name; `None` if either name is unknown.
    pub fn is_subclass(&self, name: &str, candidate: &str) -> Option<bool> {
        let ty = self.get(name)?;
        let candidate = self.get(candidate)?;
        Some(is_subclass_of_or_alias(&ty, &candidate))
    }

    /// Alias-aware instance check by name; `None` if the name is unknown.
    pub fn is_instance(&self, name: &str, instance: &dyn Typed) -> Option<bool> {
        let ty = self.get(name)?;
        Some(is_instance_of_or_alias(&ty, instance))
    }

    /// The metric registry this catalog publishes to.
    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// The sink receiving this catalog's deprecation notices.
    pub fn notices(&self) -> &Arc<dyn NoticeSink> {
        &self.notices
    }

    fn read_table(&self) -> std::sync::RwLockReadGuard<'_, TypeTable> {
        self.types.read().unwrap_or_else(PoisonError::into_inner)
    }
}
