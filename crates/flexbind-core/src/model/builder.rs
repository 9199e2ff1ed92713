//! Binding model builder

use super::{AccessorKind, BindingModel, EnumDecl, EnumMember, PropertyTable};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::metadata::{LoadedMetadata, NativeEnumConstant};
use crate::naming;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Derives the binding model from loaded metadata
pub struct ModelBuilder {
    accessor_pattern: Regex,
    enum_overrides: BTreeMap<String, String>,
}

impl ModelBuilder {
    /// Create a builder for the configured accessor naming and enum overrides
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            accessor_pattern: config.accessor_pattern()?,
            enum_overrides: config.enum_overrides.clone(),
        })
    }

    /// Build the model, failing if no property survives exclusion
    #[instrument(skip_all)]
    pub fn build(&self, metadata: LoadedMetadata) -> Result<BindingModel> {
        let LoadedMetadata {
            constants,
            mut functions,
            delegates,
        } = metadata;

        let enums = group_enums(&constants);

        // Name order is also the order accessors are recorded in, which
        // decides the type of a member whose getter and setter disagree.
        functions.sort_by(|a, b| a.name.cmp(&b.name));

        let mut table = PropertyTable::new();
        for function in &functions {
            let Some(caps) = self.accessor_pattern.captures(&function.name) else {
                continue;
            };
            let kind = if &caps[1] == "g" {
                AccessorKind::Get
            } else {
                AccessorKind::Set
            };
            table.record(function, &caps[2], kind, &enums, &self.enum_overrides)?;
        }

        if table.is_empty() {
            return Err(Error::NoProperties);
        }

        info!(
            enums = enums.len(),
            functions = functions.len(),
            delegates = delegates.len(),
            properties = table.len(),
            "Binding model built"
        );

        Ok(BindingModel {
            enums,
            functions,
            delegates,
            properties: table.into_properties(),
        })
    }
}

/// Group constants into enums sorted by name, members by ascending value
fn group_enums(constants: &[NativeEnumConstant]) -> Vec<EnumDecl> {
    let mut groups: BTreeMap<String, Vec<EnumMember>> = BTreeMap::new();
    for constant in constants {
        groups
            .entry(naming::host_name(&constant.group))
            .or_default()
            .push(EnumMember {
                name: naming::host_name(&constant.name),
                value: constant.value,
            });
    }

    groups
        .into_iter()
        .map(|(name, mut members)| {
            members.sort_by_key(|member| member.value);
            EnumDecl { name, members }
        })
        .collect()
}
