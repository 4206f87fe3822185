//! Part discovery.
//!
//! [`TypeInspector`] decides whether a type is a part and, if so, collects
//! every export it declares: the type itself exported under one or more
//! contracts, and public readable instance properties exported individually.

use crate::compat::CompatibilityChecker;
use crate::config::InspectorConfig;
use crate::hierarchy::Hierarchy;
use crate::metadata::{self, MetadataConflict};
use partscope_api::{
    ActivationFeature, ActivationFeatures, AttributeProviderExt, AttributeProviderPtr,
    AttributeTarget, CompositionError, CompositionResult, ContractKey, DiscoveredExport,
    DiscoveredPart, DiscoveredPartBuilder, ExportAttribute, InstanceExport,
    PartNotDiscoverableAttribute, PropertyExport, TypeInfo, TypeRef, TypeSystemPtr,
};
use rayon::prelude::*;
use std::sync::Arc;

/// Outcome of inspecting a batch of types, in input order.
#[derive(Debug, Default)]
pub struct InspectionReport {
    pub parts: Vec<DiscoveredPart>,
    pub failures: Vec<CompositionError>,
}

impl InspectionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Inspects types for exports.
///
/// Holds only immutable configuration; a single inspector can serve
/// concurrent calls from any number of threads.
pub struct TypeInspector {
    attributes: AttributeProviderPtr,
    types: TypeSystemPtr,
    activation_features: ActivationFeatures,
    max_hierarchy_depth: usize,
}

impl TypeInspector {
    pub fn new(attributes: AttributeProviderPtr, types: TypeSystemPtr) -> Self {
        Self::with_config(attributes, types, &InspectorConfig::default())
    }

    pub fn with_config(
        attributes: AttributeProviderPtr,
        types: TypeSystemPtr,
        config: &InspectorConfig,
    ) -> Self {
        Self {
            attributes,
            types,
            activation_features: Arc::new(config.activation_features.clone()),
            max_hierarchy_depth: config.max_hierarchy_depth.max(1),
        }
    }

    pub fn activation_features(&self) -> &[ActivationFeature] {
        &self.activation_features
    }

    /// Returns the discovered part, `None` when the type is not a part.
    ///
    /// Fails on the first export whose contract the type cannot satisfy.
    pub fn inspect_type_for_part(
        &self,
        part_type: &TypeInfo,
    ) -> CompositionResult<Option<DiscoveredPart>> {
        if !self.is_discoverable(part_type) {
            return Ok(None);
        }

        let mut part: Option<DiscoveredPartBuilder> = None;
        for export in self.discover_exports(part_type)? {
            part.get_or_insert_with(|| {
                DiscoveredPartBuilder::new(
                    part_type.clone(),
                    Arc::clone(&self.activation_features),
                )
            })
            .add_export(export);
        }

        let Some(builder) = part else {
            tracing::trace!(part = %part_type.fqn, "no exports");
            return Ok(None);
        };

        let applied = self
            .attributes
            .declared_attributes(part_type, AttributeTarget::Type(part_type));
        let part_metadata = metadata::part_metadata(&applied).map_err(|conflict| {
            metadata_mismatch(conflict, part_type, &part_type.fqn, &part_type.fqn)
        })?;
        let part = builder.build(part_metadata);
        tracing::debug!(
            part = %part_type.fqn,
            exports = part.exports().len(),
            "discovered part"
        );
        Ok(Some(part))
    }

    /// Looks `fqn` up through the type system first; unknown types are not parts.
    pub fn inspect_fqn(&self, fqn: &str) -> CompositionResult<Option<DiscoveredPart>> {
        match self.types.get_type_info(fqn) {
            Some(part_type) => self.inspect_type_for_part(&part_type),
            None => {
                tracing::debug!(fqn, "type not found");
                Ok(None)
            }
        }
    }

    /// Inspects every type in parallel, collecting failures instead of stopping.
    pub fn inspect_all(&self, part_types: &[TypeInfo]) -> InspectionReport {
        let results: Vec<_> = part_types
            .par_iter()
            .map(|part_type| self.inspect_type_for_part(part_type))
            .collect();

        let mut report = InspectionReport::default();
        for result in results {
            match result {
                Ok(Some(part)) => report.parts.push(part),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(part = err.part(), error = %err, "part rejected");
                    report.failures.push(err);
                }
            }
        }
        report
    }

    fn is_discoverable(&self, part_type: &TypeInfo) -> bool {
        if part_type.is_abstract || !part_type.is_class() {
            tracing::trace!(part = %part_type.fqn, kind = ?part_type.kind, "not a concrete class");
            return false;
        }

        let marker = self
            .attributes
            .declared_attribute::<PartNotDiscoverableAttribute>(
                part_type,
                AttributeTarget::Type(part_type),
            );
        if marker.is_some() {
            tracing::debug!(part = %part_type.fqn, "marked not discoverable");
            return false;
        }
        true
    }

    fn discover_exports(&self, part_type: &TypeInfo) -> CompositionResult<Vec<DiscoveredExport>> {
        let checker = CompatibilityChecker::new(Hierarchy::new(
            self.types.as_ref(),
            self.max_hierarchy_depth,
        ));

        let mut exports = self.discover_instance_exports(part_type, &checker)?;
        exports.extend(self.discover_property_exports(part_type, &checker)?);
        Ok(exports)
    }

    fn discover_instance_exports(
        &self,
        part_type: &TypeInfo,
        checker: &CompatibilityChecker<'_>,
    ) -> CompositionResult<Vec<DiscoveredExport>> {
        let target = AttributeTarget::Type(part_type);
        let declared = self
            .attributes
            .declared_attributes_of::<ExportAttribute>(part_type, target);
        if declared.is_empty() {
            return Ok(Vec::new());
        }

        let applied = self.attributes.declared_attributes(part_type, target);
        let mut exports = Vec::with_capacity(declared.len());
        for export in declared {
            let contract_type = export
                .contract_type
                .clone()
                .unwrap_or_else(|| default_contract(part_type));
            checker.check_instance_export(part_type, &contract_type)?;
            let metadata = metadata::export_metadata(&export, &applied).map_err(|conflict| {
                let contract = contract_type.to_string();
                metadata_mismatch(conflict, part_type, &part_type.fqn, &contract)
            })?;

            let contract = ContractKey::new(contract_type, export.contract_name);
            tracing::debug!(part = %part_type.fqn, contract = %contract, "instance export");
            exports.push(DiscoveredExport::Instance(InstanceExport { contract, metadata }));
        }
        Ok(exports)
    }

    fn discover_property_exports(
        &self,
        part_type: &TypeInfo,
        checker: &CompatibilityChecker<'_>,
    ) -> CompositionResult<Vec<DiscoveredExport>> {
        let mut exports = Vec::new();

        for property in self
            .types
            .get_properties(&part_type.fqn)
            .into_iter()
            .filter(|p| p.is_exportable())
        {
            let target = AttributeTarget::Property(&property);
            let declared = self
                .attributes
                .declared_attributes_of::<ExportAttribute>(part_type, target);
            if declared.is_empty() {
                continue;
            }

            let applied = self.attributes.declared_attributes(part_type, target);
            for export in declared {
                let contract_type = export
                    .contract_type
                    .clone()
                    .unwrap_or_else(|| property.property_type.clone());
                checker.check_property_export(part_type, &property, &contract_type)?;
                let metadata = metadata::export_metadata(&export, &applied).map_err(|conflict| {
                    let contract = contract_type.to_string();
                    metadata_mismatch(conflict, part_type, &property.name, &contract)
                })?;

                let contract = ContractKey::new(contract_type, export.contract_name);
                tracing::debug!(
                    part = %part_type.fqn,
                    property = %property.name,
                    contract = %contract,
                    "property export"
                );
                exports.push(DiscoveredExport::Property(PropertyExport {
                    contract,
                    metadata,
                    property: property.clone(),
                }));
            }
        }
        Ok(exports)
    }
}

/// An open generic part exports its definition (`Box<>`), others their own type.
fn default_contract(part_type: &TypeInfo) -> TypeRef {
    match part_type.generic_shape() {
        Some(shape) => shape.into_definition(),
        None => part_type.self_ref(),
    }
}

fn metadata_mismatch(
    conflict: MetadataConflict,
    part_type: &TypeInfo,
    member: &str,
    contract: &str,
) -> CompositionError {
    tracing::debug!(part = %part_type.fqn, member, error = %conflict, "metadata conflict");
    CompositionError::MetadataTypeMismatch {
        name: conflict.name,
        contract: contract.to_string(),
        member: member.to_string(),
        part: part_type.fqn.clone(),
    }
}
