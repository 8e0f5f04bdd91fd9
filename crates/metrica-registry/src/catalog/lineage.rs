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

//! Effective base lists and ancestry for newly defined types.

use metrica_core::deprecation::{DeprecationNotice, NoticeOrigin};
use metrica_core::graph::c3_merge;
use metrica_core::provider::{DefinitionError, ProviderDecl, ProviderType};
use std::sync::Arc;

/// Everything a declaration resolves to before its type is built.
#[derive(Debug)]
pub(crate) struct Lineage {
    pub alias_target: Option<Arc<ProviderType>>,
    pub bases: Vec<Arc<ProviderType>>,
    pub ancestors: Vec<Arc<ProviderType>>,
    pub substitutions: Vec<DeprecationNotice>,
}

/// Replaces each deprecated base by its alias target and drops repeats,
/// keeping first occurrences in order.
///
/// Returns the effective base list and one notice per substituted base.
pub fn effective_bases(
    declared: &[Arc<ProviderType>],
) -> (Vec<Arc<ProviderType>>, Vec<DeprecationNotice>) {
    let mut bases: Vec<Arc<ProviderType>> = Vec::with_capacity(declared.len());
    let mut notices = Vec::new();

    for base in declared {
        let resolved = match base.alias() {
            Some(binding) => {
                notices.push(DeprecationNotice::new(
                    base.name(),
                    binding.target().name(),
                    NoticeOrigin::Subclassing,
                ));
                binding.target()
            }
            None => base,
        };
        if !bases.iter().any(|b| Arc::ptr_eq(b, resolved)) {
            bases.push(Arc::clone(resolved));
        }
    }

    (bases, notices)
}

/// Resolves the alias target and the bases of `decl` against `lookup`.
///
/// Fails before producing any notice if a name does not resolve or the
/// bases cannot be linearized.
pub(crate) fn resolve<F>(decl: &ProviderDecl, lookup: F) -> Result<Lineage, DefinitionError>
where
    F: Fn(&str) -> Option<Arc<ProviderType>>,
{
    let alias_target = match &decl.alias {
        Some(target) => {
            let resolved =
                lookup(target.as_str()).ok_or_else(|| DefinitionError::UnresolvedAlias {
                    provider: decl.name.clone(),
                    target: target.clone(),
                })?;
            Some(resolved)
        }
        None => None,
    };

    let declared = decl
        .bases
        .iter()
        .map(|base| {
            lookup(base.as_str()).ok_or_else(|| DefinitionError::UnknownBase {
                provider: decl.name.clone(),
                base: base.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (bases, substitutions) = effective_bases(&declared);

    let mut sequences: Vec<Vec<Arc<ProviderType>>> =
        bases.iter().map(ProviderType::linearization).collect();
    sequences.push(bases.clone());
    let ancestors = c3_merge(sequences, Arc::ptr_eq).map_err(|_| {
        DefinitionError::InconsistentLineage {
            provider: decl.name.clone(),
            bases: bases.iter().map(|b| b.name().to_string()).collect(),
        }
    })?;

    Ok(Lineage {
        alias_target,
        bases,
        ancestors,
        substitutions,
    })
}
