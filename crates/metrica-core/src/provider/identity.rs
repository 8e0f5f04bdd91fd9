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

//! Alias-aware identity predicates.
//!
//! A deprecated type and its replacement answer identity checks as if they
//! were the same type, in one direction: anything that is a replacement is
//! also the deprecated type, but the replacement is not a subclass of the
//! deprecated type.

use super::instance::Typed;
use super::types::ProviderType;
use std::sync::Arc;

/// Returns `true` if `candidate` counts as a subclass of `ty`.
///
/// `candidate` is `ty` itself, or `ty` is a deprecated alias and `candidate`
/// is natively a subclass of the alias target, or `ty` carries no binding and
/// `candidate` is natively a subclass of `ty`. The target's own binding is
/// never followed.
pub fn is_subclass_of_or_alias(ty: &Arc<ProviderType>, candidate: &Arc<ProviderType>) -> bool {
    if Arc::ptr_eq(ty, candidate) {
        return true;
    }
    match ty.alias() {
        Some(binding) => candidate.is_subclass_of(binding.target()),
        None => candidate.is_subclass_of(ty),
    }
}

/// Returns `true` if `instance` counts as an instance of `ty`.
///
/// Both the runtime and the nominal type of the instance are checked with
/// [`is_subclass_of_or_alias`].
pub fn is_instance_of_or_alias(ty: &Arc<ProviderType>, instance: &dyn Typed) -> bool {
    is_subclass_of_or_alias(ty, instance.runtime_type())
        || is_subclass_of_or_alias(ty, instance.nominal_type())
}
