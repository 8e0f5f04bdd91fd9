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

//! The registration hook run after every provider type is built.

use super::registry::MetricRegistry;
use metrica_core::metrics::{RegisteredFunction, RegistryResult};
use metrica_core::provider::{MetricFunction, ProviderType};
use std::sync::Arc;

/// Registers every metric function declared on `provider`, grouped by metric
/// name in declaration order. Returns the number of metric names registered.
///
/// Runs for deprecated types too; they register under their own identity.
/// If any group is rejected, the functions already registered are withdrawn
/// and the entries they replaced are put back before the error is returned.
pub fn register_metric_functions(
    registry: &MetricRegistry,
    provider: &Arc<ProviderType>,
) -> RegistryResult<usize> {
    let groups = group_by_metric(provider.metric_functions());
    let mut replaced: Vec<(&'static str, Vec<RegisteredFunction>)> = Vec::new();
    for (metric_name, functions) in &groups {
        match registry.register(metric_name, provider, functions) {
            Ok(previous) => replaced.push((*metric_name, previous)),
            Err(e) => {
                roll_back(registry, provider, &replaced);
                return Err(e);
            }
        }
    }
    Ok(groups.len())
}

fn roll_back(
    registry: &MetricRegistry,
    provider: &Arc<ProviderType>,
    replaced: &[(&'static str, Vec<RegisteredFunction>)],
) {
    if let Err(e) = registry.remove_provider(provider) {
        log::error!(
            "Failed to withdraw metric functions of `{}`: {e}",
            provider.name()
        );
    }
    for (metric_name, entries) in replaced {
        if let Err(e) = registry.reinstate(metric_name, entries) {
            log::error!("Failed to restore metric `{metric_name}`: {e}");
        }
    }
}

fn group_by_metric(functions: &[MetricFunction]) -> Vec<(&'static str, Vec<MetricFunction>)> {
    let mut groups: Vec<(&'static str, Vec<MetricFunction>)> = Vec::new();
    for function in functions {
        match groups
            .iter_mut()
            .find(|(name, _)| *name == function.metric_name)
        {
            Some((_, group)) => group.push(*function),
            None => groups.push((function.metric_name, vec![*function])),
        }
    }
    groups
}
