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

use anyhow::{Context, Result};
use metrica_core::config::CatalogSettings;
use metrica_core::provider::{
    ConstructorArgs, ExecutionEngine, MetricFnType, MetricFunction, ProviderDefinition,
};
use metrica_registry::ProviderService;
use serde_json::{json, Value};

/// Path of an optional RON settings file.
const SETTINGS_ENV: &str = "METRICA_SETTINGS";

fn column_mean(input: &Value) -> Result<Value> {
    let values = input
        .as_array()
        .context("column.mean expects an array")?
        .iter()
        .filter_map(Value::as_f64)
        .collect::<Vec<_>>();
    if values.is_empty() {
        return Ok(Value::Null);
    }
    Ok(json!(values.iter().sum::<f64>() / values.len() as f64))
}

fn column_nulls(input: &Value) -> Result<Value> {
    let values = input.as_array().context("column.nulls expects an array")?;
    Ok(json!(values.iter().filter(|v| v.is_null()).count()))
}

fn require_column(args: &ConstructorArgs) -> std::result::Result<(), String> {
    match args.keyword.get("column") {
        Some(Value::String(_)) => Ok(()),
        _ => Err("`column` must be a string".to_string()),
    }
}

static COLUMN_METRICS: [MetricFunction; 3] = [
    MetricFunction::value("column.mean", ExecutionEngine::DataFrame, column_mean)
        .with_value_keys(&["column"]),
    MetricFunction::value("column.nulls", ExecutionEngine::DataFrame, column_nulls)
        .with_fn_type(MetricFnType::MapCondition)
        .with_domain_keys(&["column"]),
    MetricFunction::value("column.nulls", ExecutionEngine::Sql, column_nulls)
        .with_fn_type(MetricFnType::MapCondition)
        .with_domain_keys(&["column"]),
];

inventory::submit! {
    ProviderDefinition::new("MetricProvider")
}

inventory::submit! {
    ProviderDefinition::new("ColumnMetricProvider")
        .with_bases(&["MetricProvider"])
        .with_metric_functions(&COLUMN_METRICS)
        .with_validator(require_column)
}

inventory::submit! {
    ProviderDefinition::new("ColumnAggregateMetricProvider")
        .with_bases(&["MetricProvider"])
        .with_alias("ColumnMetricProvider")
}

inventory::submit! {
    ProviderDefinition::new("ColumnMedian")
        .with_bases(&["ColumnAggregateMetricProvider"])
}

fn load_settings() -> Result<CatalogSettings> {
    let Ok(path) = std::env::var(SETTINGS_ENV) else {
        return Ok(CatalogSettings::default());
    };
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading settings from {path}"))?;
    Ok(CatalogSettings::from_ron_str(&text)?)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = load_settings()?;
    let service = ProviderService::init_global(settings)?;
    let catalog = service.catalog();

    for name in catalog.names() {
        log::info!("Provider type: {name}");
    }
    for (old, new) in catalog.deprecated_aliases() {
        log::info!("Deprecated alias: {old} -> {new}");
    }

    let args = ConstructorArgs::new().kwarg("column", "price");
    let provider = catalog.construct("ColumnAggregateMetricProvider", &args)?;
    log::info!(
        "Constructed {} through its deprecated alias",
        provider.provider_type()
    );

    let sample = json!([1.0, 2.5, null, 4.0]);
    for metric in service.registry().metric_names() {
        let Some(entry) = service
            .registry()
            .resolve(&metric, ExecutionEngine::DataFrame)
        else {
            continue;
        };
        let value = (entry.function.compute)(&sample)?;
        log::info!("{metric} [{}] = {value}", entry.provider);
    }

    Ok(())
}
