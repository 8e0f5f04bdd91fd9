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

//! Startup installation of provider definitions submitted with `inventory`.
//!
//! Provider crates declare their types with
//! `metrica_core::inventory::submit! { ProviderDefinition::new(..) }`. At
//! startup [`install_submitted`] collects every submission, orders it so
//! bases and alias targets are defined first, and defines each type once.

use crate::catalog::ProviderCatalog;
use metrica_core::graph::topological_sort;
use metrica_core::provider::{DefinitionError, ProviderDecl, ProviderDefinition, ProviderType};
use std::collections::HashSet;
use std::sync::Arc;

/// Every submitted definition, sorted by name.
pub fn submitted_definitions() -> Vec<&'static ProviderDefinition> {
    let mut definitions: Vec<&'static ProviderDefinition> =
        inventory::iter::<ProviderDefinition>.into_iter().collect();
    definitions.sort_by_key(|definition| definition.name);
    definitions
}

/// Defines every submitted provider type not yet in `catalog`.
///
/// Returns the newly defined types in definition order.
pub fn install_submitted(
    catalog: &ProviderCatalog,
) -> Result<Vec<Arc<ProviderType>>, DefinitionError> {
    install_definitions(catalog, submitted_definitions())
}

/// Defines `definitions` in dependency order, skipping names `catalog`
/// already holds.
///
/// Dependencies are declared bases and alias targets. A dependency outside
/// the set must already be defined, or the dependent definition fails.
pub fn install_definitions<'a>(
    catalog: &ProviderCatalog,
    definitions: impl IntoIterator<Item = &'a ProviderDefinition>,
) -> Result<Vec<Arc<ProviderType>>, DefinitionError> {
    let mut pending: Vec<&ProviderDefinition> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for definition in definitions {
        if !seen.insert(definition.name) {
            return Err(DefinitionError::AlreadyDefined(definition.name.to_string()));
        }
        if catalog.contains(definition.name) {
            log::debug!("Skipping `{}`: already defined", definition.name);
            continue;
        }
        pending.push(definition);
    }

    let edges = pending.iter().flat_map(|definition| {
        definition
            .bases
            .iter()
            .copied()
            .chain(definition.alias)
            .map(move |dependency| (dependency, definition.name))
    });
    let order = topological_sort(pending.iter().map(|d| d.name), edges).map_err(|cycle| {
        DefinitionError::DependencyCycle(cycle.remaining.iter().map(|n| n.to_string()).collect())
    })?;

    let mut defined = Vec::with_capacity(order.len());
    for name in order {
        let Some(definition) = pending.iter().find(|d| d.name == name) else {
            continue;
        };
        defined.push(catalog.define(ProviderDecl::from(*definition))?);
    }

    log::info!("Installed {} provider type(s)", defined.len());
    Ok(defined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricRegistry;
    use metrica_core::deprecation::ChannelSink;

    fn catalog() -> ProviderCatalog {
        ProviderCatalog::with_sink(MetricRegistry::new(), Arc::new(ChannelSink::new()))
    }

    static BASE: ProviderDefinition = ProviderDefinition::new("Base");
    static BAR: ProviderDefinition = ProviderDefinition::new("Bar").with_bases(&["Base"]);
    static FOO: ProviderDefinition = ProviderDefinition::new("Foo")
        .with_bases(&["Base"])
        .with_alias("Bar");
    static BAZ: ProviderDefinition = ProviderDefinition::new("Baz").with_bases(&["Foo", "Bar"]);

    #[test]
    fn test_installs_in_dependency_order() {
        let catalog = catalog();
        let defined = install_definitions(&catalog, [&BAZ, &FOO, &BAR, &BASE]).unwrap();

        let names: Vec<_> = defined.iter().map(|t| t.name()).collect();
        let pos = |name| names.iter().position(|n| *n == name).unwrap();
        assert!(pos("Base") < pos("Bar"));
        assert!(pos("Bar") < pos("Foo"));
        assert!(pos("Foo") < pos("Baz"));

        let baz = catalog.get("Baz").unwrap();
        let bases: Vec<_> = baz.bases().iter().map(|b| b.name()).collect();
        assert_eq!(bases, vec!["Bar"]);
    }

    #[test]
    fn test_second_install_is_a_no_op() {
        let catalog = catalog();
        install_definitions(&catalog, [&BASE, &BAR]).unwrap();
        let again = install_definitions(&catalog, [&BASE, &BAR]).unwrap();
        assert!(again.is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_duplicate_submission_is_rejected() {
        let catalog = catalog();
        let err = install_definitions(&catalog, [&BASE, &BASE]).unwrap_err();
        assert_eq!(err, DefinitionError::AlreadyDefined("Base".to_string()));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_cycle_is_reported() {
        static LOOP_A: ProviderDefinition = ProviderDefinition::new("LoopA").with_bases(&["LoopB"]);
        static LOOP_B: ProviderDefinition = ProviderDefinition::new("LoopB").with_alias("LoopA");

        let catalog = catalog();
        let err = install_definitions(&catalog, [&LOOP_A, &LOOP_B]).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::DependencyCycle(vec!["LoopA".to_string(), "LoopB".to_string()])
        );
    }

    #[test]
    fn test_dependency_on_defined_type() {
        let catalog = catalog();
        install_definitions(&catalog, [&BASE]).unwrap();
        let defined = install_definitions(&catalog, [&BAR]).unwrap();
        assert_eq!(defined.len(), 1);
        assert!(defined[0].is_subclass_of(&catalog.get("Base").unwrap()));
    }
}
