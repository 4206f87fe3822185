//! Declarative annotations as seen through an [`AttributeProvider`](crate::AttributeProvider).

use super::metadata::MetadataScalar;
use super::types::TypeRef;
use serde::{Deserialize, Serialize};

/// A named value carried by a metadata-tagged annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataField {
    pub name: String,
    pub value: MetadataScalar,
}

impl MetadataField {
    pub fn new(name: impl Into<String>, value: impl Into<MetadataScalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Declares an export on a type or property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportAttribute {
    /// Overrides the exporting member's own type as contract.
    #[serde(default)]
    pub contract_type: Option<TypeRef>,
    #[serde(default)]
    pub contract_name: Option<String>,
    /// Fields of a custom, metadata-tagged export annotation. Empty for a plain export.
    #[serde(default)]
    pub metadata: Vec<MetadataField>,
}

impl ExportAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contract(contract_type: TypeRef) -> Self {
        Self {
            contract_type: Some(contract_type),
            ..Self::default()
        }
    }

    pub fn named(mut self, contract_name: impl Into<String>) -> Self {
        self.contract_name = Some(contract_name.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<MetadataScalar>) -> Self {
        self.metadata.push(MetadataField::new(name, value));
        self
    }
}

/// Explicit name/value pair attached to the exports of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadataAttribute {
    pub name: String,
    pub value: MetadataScalar,
}

impl ExportMetadataAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<MetadataScalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A custom annotation whose type is tagged as carrying export metadata.
/// Each declared field becomes one metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub attribute_type: String,
    pub fields: Vec<MetadataField>,
}

impl MetadataAttribute {
    pub fn new(attribute_type: impl Into<String>) -> Self {
        Self {
            attribute_type: attribute_type.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<MetadataScalar>) -> Self {
        self.fields.push(MetadataField::new(name, value));
        self
    }
}

/// Name/value pair describing the part itself rather than one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartMetadataAttribute {
    pub name: String,
    pub value: MetadataScalar,
}

impl PartMetadataAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<MetadataScalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Marks a part as shared, optionally within a named sharing boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SharedAttribute {
    #[serde(default)]
    pub sharing_boundary: Option<String>,
}

/// Excludes a type from discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartNotDiscoverableAttribute;

/// Annotation with no meaning for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub attribute_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    Export(ExportAttribute),
    ExportMetadata(ExportMetadataAttribute),
    Metadata(MetadataAttribute),
    PartMetadata(PartMetadataAttribute),
    Shared(SharedAttribute),
    PartNotDiscoverable(PartNotDiscoverableAttribute),
    Other(CustomAttribute),
}

/// Typed view over one [`Attribute`] variant.
pub trait FromAttribute: Clone {
    fn from_attribute(attribute: &Attribute) -> Option<&Self>;
}

macro_rules! impl_from_attribute {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl FromAttribute for $ty {
                fn from_attribute(attribute: &Attribute) -> Option<&Self> {
                    match attribute {
                        Attribute::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Attribute {
                fn from(value: $ty) -> Self {
                    Attribute::$variant(value)
                }
            }
        )*
    };
}

impl_from_attribute! {
    Export => ExportAttribute,
    ExportMetadata => ExportMetadataAttribute,
    Metadata => MetadataAttribute,
    PartMetadata => PartMetadataAttribute,
    Shared => SharedAttribute,
    PartNotDiscoverable => PartNotDiscoverableAttribute,
    Other => CustomAttribute,
}
