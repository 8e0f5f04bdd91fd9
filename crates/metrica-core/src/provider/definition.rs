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

//! Declarations of provider types, before they are resolved by a catalog.

use super::function::MetricFunction;
use super::instance::ArgsValidator;

/// A provider declaration that lives in a `static` and is collected at startup.
///
/// Provider crates submit one next to each provider type:
///
/// ```ignore
/// use metrica_core::provider::{ExecutionEngine, MetricFunction, ProviderDefinition};
///
/// fn mean(_: &serde_json::Value) -> anyhow::Result<serde_json::Value> {
///     Ok(serde_json::json!(0.0))
/// }
///
/// metrica_core::inventory::submit! {
///     ProviderDefinition::new("ColumnMean")
///         .with_bases(&["ColumnAggregateMetricProvider"])
///         .with_metric_functions(&[MetricFunction::value(
///             "column.mean",
///             ExecutionEngine::DataFrame,
///             mean,
///         )])
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProviderDefinition {
    /// The type's name.
    pub name: &'static str,
    /// Declared base names.
    pub bases: &'static [&'static str],
    /// The replacement type's name, for deprecated aliases.
    pub alias: Option<&'static str>,
    /// Metric functions declared on the type.
    pub metric_functions: &'static [MetricFunction],
    /// Optional argument check.
    pub validator: Option<ArgsValidator>,
}

impl ProviderDefinition {
    /// A definition with no bases, alias or functions.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            bases: &[],
            alias: None,
            metric_functions: &[],
            validator: None,
        }
    }

    /// Sets the declared bases.
    pub const fn with_bases(mut self, bases: &'static [&'static str]) -> Self {
        self.bases = bases;
        self
    }

    /// Marks the type as a deprecated alias of `target`.
    pub const fn with_alias(mut self, target: &'static str) -> Self {
        self.alias = Some(target);
        self
    }

    /// Sets the declared metric functions.
    pub const fn with_metric_functions(mut self, functions: &'static [MetricFunction]) -> Self {
        self.metric_functions = functions;
        self
    }

    /// Sets the argument validator.
    pub const fn with_validator(mut self, validator: ArgsValidator) -> Self {
        self.validator = Some(validator);
        self
    }
}

inventory::collect!(ProviderDefinition);

/// An owned provider declaration, for types defined at runtime.
#[derive(Debug, Clone, Default)]
pub struct ProviderDecl {
    /// The type's name.
    pub name: String,
    /// Declared base names.
    pub bases: Vec<String>,
    /// The replacement type's name, for deprecated aliases.
    pub alias: Option<String>,
    /// Metric functions declared on the type.
    pub metric_functions: Vec<MetricFunction>,
    /// Optional argument check.
    pub validator: Option<ArgsValidator>,
}

impl ProviderDecl {
    /// A declaration with no bases, alias or functions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a declared base.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    /// Marks the type as a deprecated alias of `target`.
    pub fn alias(mut self, target: impl Into<String>) -> Self {
        self.alias = Some(target.into());
        self
    }

    /// Appends a metric function.
    pub fn metric_function(mut self, function: MetricFunction) -> Self {
        self.metric_functions.push(function);
        self
    }

    /// Sets the argument validator.
    pub fn validator(mut self, validator: ArgsValidator) -> Self {
        self.validator = Some(validator);
        self
    }
}

impl From<&ProviderDefinition> for ProviderDecl {
    fn from(definition: &ProviderDefinition) -> Self {
        Self {
            name: definition.name.to_string(),
            bases: definition.bases.iter().map(|b| b.to_string()).collect(),
            alias: definition.alias.map(str::to_string),
            metric_functions: definition.metric_functions.to_vec(),
            validator: definition.validator,
        }
    }
}
