use super::contract::ContractKey;
use super::metadata::Metadata;
use super::types::{PropertyInfo, TypeInfo, TypeRef};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Extension point applied when a part is activated. Opaque to discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationFeature {
    pub name: String,
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl ActivationFeature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: serde_json::Value::Null,
        }
    }
}

pub type ActivationFeatures = Arc<Vec<ActivationFeature>>;

/// The part type itself is the exported value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceExport {
    pub contract: ContractKey,
    pub metadata: Metadata,
}

/// The value of a property on an activated part is the exported value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyExport {
    pub contract: ContractKey,
    pub metadata: Metadata,
    pub property: PropertyInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiscoveredExport {
    Instance(InstanceExport),
    Property(PropertyExport),
}

impl DiscoveredExport {
    pub fn contract(&self) -> &ContractKey {
        match self {
            DiscoveredExport::Instance(export) => &export.contract,
            DiscoveredExport::Property(export) => &export.contract,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            DiscoveredExport::Instance(export) => &export.metadata,
            DiscoveredExport::Property(export) => &export.metadata,
        }
    }

    pub fn property(&self) -> Option<&PropertyInfo> {
        match self {
            DiscoveredExport::Instance(_) => None,
            DiscoveredExport::Property(export) => Some(&export.property),
        }
    }
}

/// A type together with every export it declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredPart {
    part_type: TypeInfo,
    /// Arguments an open generic part was closed over; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    type_arguments: Vec<TypeRef>,
    activation_features: ActivationFeatures,
    exports: Vec<DiscoveredExport>,
    part_metadata: Metadata,
}

impl DiscoveredPart {
    pub fn part_type(&self) -> &TypeInfo {
        &self.part_type
    }

    pub fn type_arguments(&self) -> &[TypeRef] {
        &self.type_arguments
    }

    /// The type activated for this part: `Box<T>` while open, `Box<String>`
    /// once closed over `String`, plain `Box` for a non-generic part.
    pub fn part_type_ref(&self) -> TypeRef {
        if self.type_arguments.is_empty() {
            self.part_type.self_ref()
        } else {
            TypeRef::generic(self.part_type.fqn.clone(), self.type_arguments.clone())
        }
    }

    pub fn activation_features(&self) -> &[ActivationFeature] {
        &self.activation_features
    }

    pub fn exports(&self) -> &[DiscoveredExport] {
        &self.exports
    }

    pub fn part_metadata(&self) -> &Metadata {
        &self.part_metadata
    }
}

/// Accumulates exports for one part; only materialized once something was exported.
#[derive(Debug)]
pub struct DiscoveredPartBuilder {
    part_type: TypeInfo,
    type_arguments: Vec<TypeRef>,
    activation_features: ActivationFeatures,
    exports: Vec<DiscoveredExport>,
}

impl DiscoveredPartBuilder {
    pub fn new(part_type: TypeInfo, activation_features: ActivationFeatures) -> Self {
        Self {
            part_type,
            type_arguments: Vec::new(),
            activation_features,
            exports: Vec::new(),
        }
    }

    pub fn with_type_arguments(mut self, type_arguments: Vec<TypeRef>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    pub fn add_export(&mut self, export: DiscoveredExport) {
        self.exports.push(export);
    }

    pub fn build(self, part_metadata: Metadata) -> DiscoveredPart {
        DiscoveredPart {
            part_type: self.part_type,
            type_arguments: self.type_arguments,
            activation_features: self.activation_features,
            exports: self.exports,
            part_metadata,
        }
    }
}
