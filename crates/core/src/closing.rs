//! Binding an open generic part to concrete type arguments.

use crate::hierarchy::Substitution;
use partscope_api::{
    ContractKey, DiscoveredExport, DiscoveredPart, DiscoveredPartBuilder, InstanceExport,
    PropertyExport, TypeInfo, TypeRef,
};
use std::sync::Arc;

/// Closes `part` over `args`, e.g. `Box<T>` exporting `IContainer<>` becomes
/// `Box<String>` exporting `IContainer<String>`.
///
/// Returns `None` unless `part` is an open generic definition with exactly
/// `args.len()` parameters. The closed part's descriptor has no remaining
/// parameters and records `args`, so [`DiscoveredPart::part_type_ref`] yields
/// the constructed type.
pub fn close_generic_part(part: &DiscoveredPart, args: &[TypeRef]) -> Option<DiscoveredPart> {
    let part_type = part.part_type();
    if !part_type.is_generic_definition() || part_type.type_parameters.len() != args.len() {
        return None;
    }

    let subst = Substitution::bind(&part_type.type_parameters, args);
    let closed_type = TypeInfo {
        type_parameters: Vec::new(),
        ..part_type.clone()
    };

    let mut builder =
        DiscoveredPartBuilder::new(closed_type, Arc::new(part.activation_features().to_vec()))
            .with_type_arguments(args.to_vec());
    for export in part.exports() {
        builder.add_export(close_export(export, &subst, args));
    }

    tracing::debug!(
        part = %part_type.fqn,
        args = args.len(),
        "closed generic part"
    );
    Some(builder.build(part.part_metadata().clone()))
}

fn close_export(
    export: &DiscoveredExport,
    subst: &Substitution,
    args: &[TypeRef],
) -> DiscoveredExport {
    match export {
        DiscoveredExport::Instance(instance) => DiscoveredExport::Instance(InstanceExport {
            contract: close_contract(&instance.contract, subst, args),
            metadata: instance.metadata.clone(),
        }),
        DiscoveredExport::Property(property_export) => {
            let mut property = property_export.property.clone();
            property.property_type = subst.apply(&property.property_type);
            DiscoveredExport::Property(PropertyExport {
                contract: close_contract(&property_export.contract, subst, args),
                metadata: property_export.metadata.clone(),
                property,
            })
        }
    }
}

fn close_contract(contract: &ContractKey, subst: &Substitution, args: &[TypeRef]) -> ContractKey {
    let closed = match contract.contract_type() {
        TypeRef::Definition { base, arity } if *arity == args.len() => {
            TypeRef::generic(base.clone(), args.to_vec())
        }
        other => subst.apply(other),
    };
    contract.with_contract_type(closed)
}
