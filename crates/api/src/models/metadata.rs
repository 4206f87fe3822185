use super::types::TypeRef;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A single metadata value as written on an annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataScalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Type(TypeRef),
}

impl From<bool> for MetadataScalar {
    fn from(value: bool) -> Self {
        MetadataScalar::Bool(value)
    }
}

impl From<i64> for MetadataScalar {
    fn from(value: i64) -> Self {
        MetadataScalar::Int(value)
    }
}

impl From<f64> for MetadataScalar {
    fn from(value: f64) -> Self {
        MetadataScalar::Float(value)
    }
}

impl From<&str> for MetadataScalar {
    fn from(value: &str) -> Self {
        MetadataScalar::String(value.to_string())
    }
}

impl From<String> for MetadataScalar {
    fn from(value: String) -> Self {
        MetadataScalar::String(value)
    }
}

impl From<TypeRef> for MetadataScalar {
    fn from(value: TypeRef) -> Self {
        MetadataScalar::Type(value)
    }
}

impl MetadataScalar {
    /// Whether `self` and `other` may share one collection. `Null` fits any kind.
    pub fn is_same_kind(&self, other: &MetadataScalar) -> bool {
        matches!(self, MetadataScalar::Null)
            || matches!(other, MetadataScalar::Null)
            || std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Value stored under a metadata name. A name written more than once holds
/// every written value, in encounter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetadataValue {
    Scalar(MetadataScalar),
    Collection(Vec<MetadataScalar>),
}

impl MetadataValue {
    /// Whether `value` can be appended without mixing element kinds.
    pub fn accepts(&self, value: &MetadataScalar) -> bool {
        match self {
            MetadataValue::Scalar(existing) => existing.is_same_kind(value),
            MetadataValue::Collection(values) => values.iter().all(|v| v.is_same_kind(value)),
        }
    }

    pub fn as_collection(&self) -> Option<&[MetadataScalar]> {
        match self {
            MetadataValue::Collection(values) => Some(values),
            MetadataValue::Scalar(_) => None,
        }
    }
}

pub type MetadataMap = IndexMap<String, MetadataValue>;

static NO_METADATA: Lazy<Arc<MetadataMap>> = Lazy::new(|| Arc::new(MetadataMap::new()));

/// Finalized, immutable metadata of an export or part.
///
/// Every empty instance shares one allocation; see [`Metadata::is_shared_empty`].
#[derive(Clone)]
pub struct Metadata(Arc<MetadataMap>);

impl Metadata {
    pub fn empty() -> Self {
        Metadata(Arc::clone(&NO_METADATA))
    }

    pub fn from_map(map: MetadataMap) -> Self {
        if map.is_empty() {
            Self::empty()
        } else {
            Metadata(Arc::new(map))
        }
    }

    /// True when this is the process-wide empty mapping, not merely an empty one.
    pub fn is_shared_empty(&self) -> bool {
        Arc::ptr_eq(&self.0, &NO_METADATA)
    }

    pub fn get(&self, name: &str) -> Option<&MetadataValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn as_map(&self) -> &MetadataMap {
        &self.0
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl Serialize for Metadata {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        MetadataMap::deserialize(deserializer).map(Metadata::from_map)
    }
}
