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

//! Construction of provider instances, with redirection for deprecated names.

use metrica_core::deprecation::{DeprecationNotice, NoticeOrigin, NoticeSink};
use metrica_core::provider::{ConstructionError, ConstructorArgs, ProviderInstance, ProviderType};
use std::sync::Arc;

/// Builds an instance of `ty`.
///
/// If `ty` is a deprecated alias, one notice is emitted and the alias target
/// is built instead with the same arguments. The target is built directly;
/// its own binding, if any, is not followed.
pub fn instantiate(
    ty: &Arc<ProviderType>,
    args: &ConstructorArgs,
    notices: &dyn NoticeSink,
) -> Result<ProviderInstance, ConstructionError> {
    let constructing = match ty.alias() {
        Some(binding) => {
            notices.emit(&DeprecationNotice::new(
                ty.name(),
                binding.target().name(),
                NoticeOrigin::Construction,
            ));
            binding.target()
        }
        None => ty,
    };

    ProviderInstance::build(constructing, args).map_err(|reason| {
        ConstructionError::InvalidArguments {
            provider: constructing.name().to_string(),
            reason,
        }
    })
}
