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

//! Metric-computation functions declared by provider types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The signature of a metric computation.
///
/// The body belongs to the provider; this crate only carries the pointer.
pub type ComputeFn = fn(&serde_json::Value) -> anyhow::Result<serde_json::Value>;

/// The execution engine a metric function targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExecutionEngine {
    /// In-memory data frames.
    DataFrame,
    /// SQL databases.
    Sql,
    /// Spark clusters.
    Spark,
}

impl fmt::Display for ExecutionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionEngine::DataFrame => "dataframe",
            ExecutionEngine::Sql => "sql",
            ExecutionEngine::Spark => "spark",
        };
        f.write_str(name)
    }
}

/// How a metric function produces its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricFnType {
    /// Computes the final metric value directly.
    Value,
    /// Maps each row to a value.
    MapFn,
    /// Maps each row to a pass/fail condition.
    MapCondition,
    /// Computes a value over a window of rows.
    WindowFn,
    /// Aggregates rows into a partial result.
    AggregateFn,
}

/// A named metric computation declared on a provider type.
///
/// Every field is `'static` so definitions can be built in `const` context
/// and submitted through `inventory`.
#[derive(Clone, Copy)]
pub struct MetricFunction {
    /// The metric this function computes (e.g., "column.mean").
    pub metric_name: &'static str,
    /// The engine the function runs on.
    pub engine: ExecutionEngine,
    /// The kind of result the function produces.
    pub fn_type: MetricFnType,
    /// Keys identifying the domain the metric is computed over.
    pub domain_keys: &'static [&'static str],
    /// Keys of the parameters that change the metric's value.
    pub value_keys: &'static [&'static str],
    /// The computation itself.
    pub compute: ComputeFn,
}

impl MetricFunction {
    /// A value-producing function with no domain or value keys.
    pub const fn value(
        metric_name: &'static str,
        engine: ExecutionEngine,
        compute: ComputeFn,
    ) -> Self {
        Self {
            metric_name,
            engine,
            fn_type: MetricFnType::Value,
            domain_keys: &[],
            value_keys: &[],
            compute,
        }
    }

    /// Returns a copy with the given domain keys.
    pub const fn with_domain_keys(mut self, keys: &'static [&'static str]) -> Self {
        self.domain_keys = keys;
        self
    }

    /// Returns a copy with the given value keys.
    pub const fn with_value_keys(mut self, keys: &'static [&'static str]) -> Self {
        self.value_keys = keys;
        self
    }

    /// Returns a copy with the given function type.
    pub const fn with_fn_type(mut self, fn_type: MetricFnType) -> Self {
        self.fn_type = fn_type;
        self
    }
}

impl fmt::Debug for MetricFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricFunction")
            .field("metric_name", &self.metric_name)
            .field("engine", &self.engine)
            .field("fn_type", &self.fn_type)
            .field("domain_keys", &self.domain_keys)
            .field("value_keys", &self.value_keys)
            .finish()
    }
}
