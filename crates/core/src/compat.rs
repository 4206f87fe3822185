//! Export/contract compatibility rules.
//!
//! A closed part may export any contract its exporting member is assignable
//! to. An open generic part may only export open generic contracts, and only
//! by forwarding its own parameters unchanged and in declaration order.

use crate::hierarchy::{DepthExceeded, Hierarchy};
use partscope_api::{CompositionError, CompositionResult, PropertyInfo, TypeInfo, TypeRef};

pub struct CompatibilityChecker<'a> {
    hierarchy: Hierarchy<'a>,
}

impl<'a> CompatibilityChecker<'a> {
    pub fn new(hierarchy: Hierarchy<'a>) -> Self {
        Self { hierarchy }
    }

    /// The part type itself exported under `contract`.
    pub fn check_instance_export(
        &self,
        part_type: &TypeInfo,
        contract: &TypeRef,
    ) -> CompositionResult<()> {
        let exporting = part_type.self_ref();
        if part_type.is_generic_definition() {
            return self.check_generic_contract(part_type, &exporting, &part_type.fqn, contract);
        }

        let assignable = self
            .hierarchy
            .is_assignable_from(contract, &exporting)
            .map_err(|err| too_deep(err, part_type, &part_type.fqn, contract))?;
        if !assignable {
            return Err(CompositionError::ContractNotAssignable {
                contract: contract.to_string(),
                member: part_type.fqn.clone(),
                part: part_type.fqn.clone(),
            });
        }
        Ok(())
    }

    /// A property of the part exported under `contract`.
    pub fn check_property_export(
        &self,
        part_type: &TypeInfo,
        property: &PropertyInfo,
        contract: &TypeRef,
    ) -> CompositionResult<()> {
        if part_type.is_generic_definition() {
            return self.check_generic_contract(
                part_type,
                &property.property_type,
                &property.name,
                contract,
            );
        }

        let assignable = self
            .hierarchy
            .is_assignable_from(contract, &property.property_type)
            .map_err(|err| too_deep(err, part_type, &property.name, contract))?;
        if !assignable {
            return Err(CompositionError::ExportedContractTypeNotAssignable {
                contract: contract.to_string(),
                member: property.name.clone(),
                part: part_type.fqn.clone(),
            });
        }
        Ok(())
    }

    fn check_generic_contract(
        &self,
        part_type: &TypeInfo,
        exporting: &TypeRef,
        member: &str,
        contract: &TypeRef,
    ) -> CompositionResult<()> {
        if !contract.is_generic_definition() {
            return Err(CompositionError::NonGenericContractFromGenericPart {
                contract: contract.to_string(),
                member: member.to_string(),
                part: part_type.fqn.clone(),
            });
        }

        let shape = contract.generic_shape();
        let matched = self
            .hierarchy
            .assignable_types(exporting)
            .map_err(|err| too_deep(err, part_type, member, contract))?
            .into_iter()
            .find(|candidate| candidate == contract || candidate.generic_shape() == shape);

        let Some(matched) = matched else {
            return Err(CompositionError::ExportNotCompatible {
                contract: contract.to_string(),
                member: member.to_string(),
                part: part_type.fqn.clone(),
            });
        };

        if matched.generic_arguments() != part_type.parameter_refs().as_slice() {
            tracing::debug!(
                part = %part_type.fqn,
                contract = %contract,
                matched = %matched,
                "generic arguments do not forward the part's parameters"
            );
            return Err(CompositionError::GenericArgumentMismatch {
                contract: contract.to_string(),
                member: member.to_string(),
                part: part_type.fqn.clone(),
            });
        }
        Ok(())
    }
}

fn too_deep(
    err: DepthExceeded,
    part_type: &TypeInfo,
    member: &str,
    contract: &TypeRef,
) -> CompositionError {
    tracing::warn!(part = %part_type.fqn, error = %err, "hierarchy walk stopped");
    CompositionError::HierarchyTooDeep {
        contract: contract.to_string(),
        member: member.to_string(),
        part: part_type.fqn.clone(),
    }
}
