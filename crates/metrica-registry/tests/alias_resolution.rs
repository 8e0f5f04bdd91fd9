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

use metrica_core::deprecation::{ChannelSink, NoticeOrigin};
use metrica_core::provider::{
    is_instance_of_or_alias, is_subclass_of_or_alias, ConstructorArgs, DefinitionError,
    ExecutionEngine, MetricFunction, ProviderDecl,
};
use metrica_registry::{MetricRegistry, ProviderCatalog};
use serde_json::json;
use std::sync::Arc;

fn noop(_: &serde_json::Value) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::Value::Null)
}

fn setup() -> (ProviderCatalog, Arc<ChannelSink>) {
    let sink = Arc::new(ChannelSink::new());
    let catalog = ProviderCatalog::with_sink(MetricRegistry::new(), sink.clone());
    (catalog, sink)
}

/// `Base`, `Bar(Base)` and the deprecated `Foo(Base)` aliased to `Bar`.
fn define_foo_bar(catalog: &ProviderCatalog) {
    catalog.define(ProviderDecl::new("Base")).unwrap();
    catalog.define(ProviderDecl::new("Bar").base("Base")).unwrap();
    catalog
        .define(ProviderDecl::new("Foo").base("Base").alias("Bar"))
        .unwrap();
}

#[test]
fn every_declared_metric_is_registered() {
    let (catalog, _) = setup();
    catalog.define(ProviderDecl::new("Base")).unwrap();
    let column_stats = catalog
        .define(
            ProviderDecl::new("ColumnStats")
                .base("Base")
                .metric_function(MetricFunction::value(
                    "column.min",
                    ExecutionEngine::DataFrame,
                    noop,
                ))
                .metric_function(MetricFunction::value("column.max", ExecutionEngine::Sql, noop))
                .metric_function(MetricFunction::value(
                    "column.max",
                    ExecutionEngine::Spark,
                    noop,
                )),
        )
        .unwrap();

    let registry = catalog.registry();
    for metric in ["column.min", "column.max"] {
        let registration = registry.get(metric).unwrap();
        assert!(registration.is_provided_by(&column_stats), "{metric}");
    }
    assert_eq!(
        registry.metrics_for_provider(&column_stats),
        vec!["column.max".to_string(), "column.min".to_string()]
    );
}

#[test]
fn deprecated_types_register_their_own_functions() {
    let (catalog, _) = setup();
    catalog.define(ProviderDecl::new("TableRowCount")).unwrap();
    let old = catalog
        .define(
            ProviderDecl::new("TableRows")
                .alias("TableRowCount")
                .metric_function(MetricFunction::value(
                    "table.rows.legacy",
                    ExecutionEngine::Sql,
                    noop,
                )),
        )
        .unwrap();

    let entry = catalog
        .registry()
        .resolve("table.rows.legacy", ExecutionEngine::Sql)
        .unwrap();
    assert!(Arc::ptr_eq(&entry.provider, &old));
}

#[test]
fn instance_built_through_alias_satisfies_both_names() {
    let (catalog, _) = setup();
    define_foo_bar(&catalog);
    let foo = catalog.get("Foo").unwrap();
    let bar = catalog.get("Bar").unwrap();

    let instance = catalog.construct("Foo", &ConstructorArgs::new()).unwrap();

    assert!(Arc::ptr_eq(instance.provider_type(), &bar));
    assert!(is_instance_of_or_alias(&foo, &instance));
    assert!(is_instance_of_or_alias(&bar, &instance));

    let direct = catalog.construct("Bar", &ConstructorArgs::new()).unwrap();
    assert!(is_instance_of_or_alias(&foo, &direct));
}

#[test]
fn subclass_check_is_one_directional() {
    let (catalog, _) = setup();
    define_foo_bar(&catalog);
    let foo = catalog.get("Foo").unwrap();
    let bar = catalog.get("Bar").unwrap();
    let base = catalog.get("Base").unwrap();

    assert!(is_subclass_of_or_alias(&foo, &bar));
    assert!(!is_subclass_of_or_alias(&bar, &foo));
    assert!(is_subclass_of_or_alias(&base, &bar));
    assert!(is_subclass_of_or_alias(&base, &foo));
}

#[test]
fn construction_redirect_forwards_arguments_and_warns_once() {
    let (catalog, sink) = setup();
    define_foo_bar(&catalog);
    sink.drain();

    let shapes = [
        ConstructorArgs::new(),
        ConstructorArgs::new().arg(1).arg("two").arg(json!([3])),
        ConstructorArgs::new().kwarg("column", "price").kwarg("mostly", 0.9),
        ConstructorArgs::new().arg(json!(null)).kwarg("strict", true),
    ];

    for args in &shapes {
        let via_old = catalog.construct("Foo", args).unwrap();
        let notices = sink.drain();
        let via_new = catalog.construct("Bar", args).unwrap();

        assert_eq!(via_old, via_new);
        assert_eq!(via_old.args(), args);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].origin, NoticeOrigin::Construction);
        assert_eq!(
            notices[0].message(),
            "Foo has been renamed to Bar -- the alias Foo will be deprecated in the future."
        );
        assert!(sink.drain().is_empty());
    }
}

#[test]
fn repeated_effective_base_collapses() {
    let (catalog, sink) = setup();
    define_foo_bar(&catalog);
    sink.drain();

    let baz = catalog
        .define(ProviderDecl::new("Baz").base("Foo").base("Bar"))
        .unwrap();

    let bases: Vec<_> = baz.bases().iter().map(|b| b.name()).collect();
    assert_eq!(bases, vec!["Bar"]);
    assert_eq!(baz.declared_bases(), &["Foo".to_string(), "Bar".to_string()]);

    let notices = sink.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].deprecated, "Foo");
    assert_eq!(notices[0].replacement, "Bar");
    assert_eq!(notices[0].origin, NoticeOrigin::Subclassing);
}

#[test]
fn dangling_alias_fails_definition() {
    let (catalog, sink) = setup();
    catalog.define(ProviderDecl::new("Base")).unwrap();

    let err = catalog
        .define(
            ProviderDecl::new("Ghost")
                .base("Base")
                .alias("Nowhere")
                .metric_function(MetricFunction::value("ghost.metric", ExecutionEngine::Sql, noop)),
        )
        .unwrap_err();

    assert_eq!(
        err,
        DefinitionError::UnresolvedAlias {
            provider: "Ghost".to_string(),
            target: "Nowhere".to_string(),
        }
    );
    assert!(catalog.get("Ghost").is_none());
    assert!(!catalog.registry().contains("ghost.metric"));
    assert!(sink.drain().is_empty());
    assert!(err.to_string().contains("Nowhere"));
}

#[test]
fn subclassing_a_deprecated_type() {
    let (catalog, sink) = setup();
    define_foo_bar(&catalog);
    sink.drain();

    let baz = catalog.define(ProviderDecl::new("Baz").base("Foo")).unwrap();

    let notices = sink.drain();
    assert_eq!(notices.len(), 1);
    assert!(notices[0]
        .message()
        .starts_with("Foo has been renamed to Bar"));

    let bases: Vec<_> = baz.bases().iter().map(|b| b.name()).collect();
    assert_eq!(bases, vec!["Bar"]);

    let foo = catalog.get("Foo").unwrap();
    let bar = catalog.get("Bar").unwrap();
    assert!(is_subclass_of_or_alias(&foo, &bar));
    assert!(is_subclass_of_or_alias(&foo, &baz));
    assert!(baz.is_subclass_of(&bar));
    assert!(!baz.is_subclass_of(&foo));
}

#[test]
fn alias_chain_is_not_followed() {
    let (catalog, sink) = setup();
    catalog.define(ProviderDecl::new("Newest")).unwrap();
    catalog
        .define(ProviderDecl::new("Newer").alias("Newest"))
        .unwrap();
    catalog.define(ProviderDecl::new("Old").alias("Newer")).unwrap();
    sink.drain();

    let instance = catalog.construct("Old", &ConstructorArgs::new()).unwrap();
    assert_eq!(instance.provider_type().name(), "Newer");
    assert_eq!(sink.drain().len(), 1);

    assert_eq!(catalog.is_subclass("Old", "Newer"), Some(true));
    assert_eq!(catalog.is_subclass("Old", "Newest"), Some(false));
}

#[test]
fn concurrent_definitions_are_all_kept() {
    let (catalog, _) = setup();
    let catalog = Arc::new(catalog);
    catalog.define(ProviderDecl::new("Base")).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || {
                catalog
                    .define(ProviderDecl::new(format!("Provider{i}")).base("Base").metric_function(
                        MetricFunction::value("shared.metric", ExecutionEngine::Sql, noop),
                    ))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(catalog.len(), 9);
    assert!(catalog.registry().contains("shared.metric"));
}
