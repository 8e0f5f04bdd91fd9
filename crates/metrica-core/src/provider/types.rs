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

use super::function::MetricFunction;
use super::instance::ArgsValidator;
use std::fmt;
use std::sync::Arc;

/// A one-directional binding from a deprecated provider type to its replacement.
///
/// The target is resolved when the deprecated type is defined and never
/// changes afterwards. It is not re-resolved through the target's own binding.
#[derive(Clone)]
pub struct AliasBinding {
    deprecated: String,
    target: Arc<ProviderType>,
}

impl AliasBinding {
    /// The name of the deprecated type carrying this binding.
    pub fn deprecated_name(&self) -> &str {
        &self.deprecated
    }

    /// The replacement type.
    pub fn target(&self) -> &Arc<ProviderType> {
        &self.target
    }
}

impl fmt::Debug for AliasBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasBinding")
            .field("deprecated", &self.deprecated)
            .field("target", &self.target.name())
            .finish()
    }
}

/// The already-resolved pieces a catalog hands over to build a [`ProviderType`].
pub struct ProviderTypeParts {
    /// The type's name, unique within its catalog.
    pub name: String,
    /// Base names exactly as declared, before alias substitution.
    pub declared_bases: Vec<String>,
    /// The effective base list: aliases substituted, duplicates removed.
    pub bases: Vec<Arc<ProviderType>>,
    /// The linearized ancestry of the effective bases, nearest first.
    pub ancestors: Vec<Arc<ProviderType>>,
    /// The replacement type, when this type is a deprecated alias.
    pub alias_target: Option<Arc<ProviderType>>,
    /// Metric functions declared directly on this type.
    pub metric_functions: Vec<MetricFunction>,
    /// Optional argument check run when this type is instantiated.
    pub validator: Option<ArgsValidator>,
}

/// A concrete metric-provider type.
pub struct ProviderType {
    name: String,
    declared_bases: Vec<String>,
    bases: Vec<Arc<ProviderType>>,
    ancestors: Vec<Arc<ProviderType>>,
    alias: Option<AliasBinding>,
    metric_functions: Vec<MetricFunction>,
    validator: Option<ArgsValidator>,
}

impl ProviderType {
    /// Assembles a type from parts that were validated by the caller.
    pub fn from_parts(parts: ProviderTypeParts) -> Self {
        let alias = parts.alias_target.map(|target| AliasBinding {
            deprecated: parts.name.clone(),
            target,
        });
        Self {
            name: parts.name,
            declared_bases: parts.declared_bases,
            bases: parts.bases,
            ancestors: parts.ancestors,
            alias,
            metric_functions: parts.metric_functions,
            validator: parts.validator,
        }
    }

    /// The type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base names as they were written in the definition.
    pub fn declared_bases(&self) -> &[String] {
        &self.declared_bases
    }

    /// The effective base list used to build this type.
    pub fn bases(&self) -> &[Arc<ProviderType>] {
        &self.bases
    }

    /// Every ancestor in method-resolution order, excluding the type itself.
    pub fn ancestors(&self) -> &[Arc<ProviderType>] {
        &self.ancestors
    }

    /// The alias binding, if this type is a deprecated name for another one.
    pub fn alias(&self) -> Option<&AliasBinding> {
        self.alias.as_ref()
    }

    /// Returns `true` if this type is a deprecated alias.
    pub fn is_deprecated(&self) -> bool {
        self.alias.is_some()
    }

    /// Metric functions declared directly on this type.
    pub fn metric_functions(&self) -> &[MetricFunction] {
        &self.metric_functions
    }

    /// The argument validator, if any.
    pub fn validator(&self) -> Option<ArgsValidator> {
        self.validator
    }

    /// The native subclass relation: `self` is `other` or has it as an ancestor.
    ///
    /// Alias bindings are not consulted here; see
    /// [`is_subclass_of_or_alias`](super::is_subclass_of_or_alias).
    pub fn is_subclass_of(&self, other: &ProviderType) -> bool {
        std::ptr::eq(self, other)
            || self
                .ancestors
                .iter()
                .any(|ancestor| std::ptr::eq(ancestor.as_ref(), other))
    }

    /// The full linearization of `this`: the type itself followed by its ancestors.
    pub fn linearization(this: &Arc<Self>) -> Vec<Arc<ProviderType>> {
        let mut order = Vec::with_capacity(this.ancestors.len() + 1);
        order.push(Arc::clone(this));
        order.extend(this.ancestors.iter().cloned());
        order
    }
}

impl fmt::Debug for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderType")
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("alias", &self.alias.as_ref().map(|a| a.target().name()))
            .field("metric_functions", &self.metric_functions.len())
            .finish()
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
