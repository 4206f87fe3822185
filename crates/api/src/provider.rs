//! Capability traits the inspector consumes.
//!
//! These traits abstract away where declarations come from, so attributes
//! read from compiled metadata, naming conventions or configuration files
//! can all drive the same discovery.

use crate::models::{Attribute, FromAttribute, PropertyInfo, TypeInfo, TypeRef};
use std::sync::Arc;

/// The member whose annotations are requested.
#[derive(Debug, Clone, Copy)]
pub enum AttributeTarget<'a> {
    Type(&'a TypeInfo),
    Property(&'a PropertyInfo),
}

/// Supplies the annotations declared on a type or one of its members.
pub trait AttributeProvider: Send + Sync {
    /// All annotations on `target`, regardless of kind, in declaration order.
    fn declared_attributes(&self, part_type: &TypeInfo, target: AttributeTarget<'_>)
    -> Vec<Attribute>;
}

/// Kind-filtered lookups on top of [`AttributeProvider`].
pub trait AttributeProviderExt: AttributeProvider {
    /// Zero or more annotations of kind `T`.
    fn declared_attributes_of<T: FromAttribute>(
        &self,
        part_type: &TypeInfo,
        target: AttributeTarget<'_>,
    ) -> Vec<T> {
        self.declared_attributes(part_type, target)
            .iter()
            .filter_map(T::from_attribute)
            .cloned()
            .collect()
    }

    /// At most one annotation of kind `T`; the first one wins.
    fn declared_attribute<T: FromAttribute>(
        &self,
        part_type: &TypeInfo,
        target: AttributeTarget<'_>,
    ) -> Option<T> {
        self.declared_attributes(part_type, target)
            .iter()
            .find_map(T::from_attribute)
            .cloned()
    }
}

impl<P: AttributeProvider + ?Sized> AttributeProviderExt for P {}

pub type AttributeProviderPtr = Arc<dyn AttributeProvider>;

/// Provides type information by FQN.
pub trait TypeProvider: Send + Sync {
    /// Returns `None` if the type is not found.
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo>;
}

/// Provides inheritance relationship information.
///
/// Related types are expressed in terms of the declaring type's own generic
/// parameters: for `class Box<T> : IContainer<T>`, `get_interfaces("Box")`
/// yields `IContainer<T>`.
pub trait InheritanceProvider: Send + Sync {
    /// Direct base type; `None` at the root of the hierarchy and for interfaces.
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef>;

    /// Interfaces directly declared by a type (base interfaces for an interface).
    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef>;
}

/// Provides member lookup.
pub trait MemberProvider: Send + Sync {
    /// Every property visible on the type, inherited ones included.
    fn get_properties(&self, type_fqn: &str) -> Vec<PropertyInfo>;
}

/// The combined type system interface.
pub trait TypeSystem: TypeProvider + InheritanceProvider + MemberProvider {}

// Blanket implementation: any type implementing all three traits gets TypeSystem
impl<T: TypeProvider + InheritanceProvider + MemberProvider> TypeSystem for T {}

/// Pointer type for the type system.
pub type TypeSystemPtr = Arc<dyn TypeSystem>;
