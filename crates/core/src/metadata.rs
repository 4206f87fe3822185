//! Metadata merging for exports and parts.
//!
//! Values are merged in encounter order: the export annotation's own fields,
//! then every other annotation on the same member. A name that is written
//! again is appended to a collection, never replaced.

use indexmap::map::Entry;
use partscope_api::{
    Attribute, ExportAttribute, Metadata, MetadataField, MetadataMap, MetadataScalar,
    MetadataValue,
};

/// Part metadata name written by a `Shared` annotation.
pub const SHARING_BOUNDARY: &str = "SharingBoundary";

/// A repeated metadata name was written with a value of another kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("metadata '{name}' mixes values of different types")]
pub struct MetadataConflict {
    pub name: String,
}

pub type MergeResult<T> = std::result::Result<T, MetadataConflict>;

/// Adds `value` under `name`, promoting an existing entry to a collection.
///
/// A collection holds one scalar kind; `Null` is accepted alongside any kind.
pub fn add_metadata(
    metadata: &mut MetadataMap,
    name: &str,
    value: MetadataScalar,
) -> MergeResult<()> {
    match metadata.entry(name.to_string()) {
        Entry::Vacant(entry) => {
            entry.insert(MetadataValue::Scalar(value));
        }
        Entry::Occupied(mut entry) => {
            if !entry.get().accepts(&value) {
                return Err(MetadataConflict {
                    name: name.to_string(),
                });
            }
            let slot = entry.get_mut();
            let mut values = match std::mem::replace(slot, MetadataValue::Collection(Vec::new())) {
                MetadataValue::Scalar(previous) => vec![previous],
                MetadataValue::Collection(previous) => previous,
            };
            values.push(value);
            *slot = MetadataValue::Collection(values);
        }
    }
    Ok(())
}

pub fn read_metadata_fields(
    fields: &[MetadataField],
    metadata: &mut MetadataMap,
) -> MergeResult<()> {
    for field in fields {
        add_metadata(metadata, &field.name, field.value.clone())?;
    }
    Ok(())
}

/// Metadata contributed by annotations other than exports.
pub fn read_loose_metadata(applied: &[Attribute], metadata: &mut MetadataMap) -> MergeResult<()> {
    for attribute in applied {
        match attribute {
            Attribute::ExportMetadata(pair) => {
                add_metadata(metadata, &pair.name, pair.value.clone())?;
            }
            Attribute::Metadata(tagged) => read_metadata_fields(&tagged.fields, metadata)?,
            // Exports are read by their own pass; the rest describes the part.
            Attribute::Export(_)
            | Attribute::PartMetadata(_)
            | Attribute::Shared(_)
            | Attribute::PartNotDiscoverable(_)
            | Attribute::Other(_) => {}
        }
    }
    Ok(())
}

/// Finalized metadata of one export declared among `applied`.
pub fn export_metadata(export: &ExportAttribute, applied: &[Attribute]) -> MergeResult<Metadata> {
    let mut metadata = MetadataMap::new();
    read_metadata_fields(&export.metadata, &mut metadata)?;
    read_loose_metadata(applied, &mut metadata)?;
    Ok(Metadata::from_map(metadata))
}

/// Metadata describing the part as a whole.
pub fn part_metadata(applied: &[Attribute]) -> MergeResult<Metadata> {
    let mut metadata = MetadataMap::new();
    for attribute in applied {
        match attribute {
            Attribute::PartMetadata(pair) => {
                add_metadata(&mut metadata, &pair.name, pair.value.clone())?
            }
            Attribute::Shared(shared) => {
                let boundary = shared
                    .sharing_boundary
                    .clone()
                    .map_or(MetadataScalar::Null, MetadataScalar::String);
                add_metadata(&mut metadata, SHARING_BOUNDARY, boundary)?;
            }
            _ => {}
        }
    }
    Ok(Metadata::from_map(metadata))
}
