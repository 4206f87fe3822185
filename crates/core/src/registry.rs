//! In-memory registration tables.
//!
//! [`TypeRegistry`] and [`AttributeTable`] describe types and their
//! annotations explicitly instead of reading them from compiled metadata.
//! Hosts use them for convention- or configuration-driven discovery, and the
//! test suites use them as fixtures.

use crate::hierarchy::Substitution;
use partscope_api::{
    Accessor, Attribute, AttributeProvider, AttributeTarget, InheritanceProvider, MemberProvider,
    PropertyInfo, TypeInfo, TypeProvider, TypeRef,
};
use std::collections::{HashMap, HashSet};

/// Declaration of one type: descriptor, relations and declared properties.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    info: TypeInfo,
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    properties: Vec<PropertyInfo>,
}

impl TypeDecl {
    pub fn new(info: TypeInfo) -> Self {
        Self {
            info,
            superclass: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn class(fqn: &str) -> Self {
        Self::new(TypeInfo::class(fqn))
    }

    pub fn interface(fqn: &str) -> Self {
        Self::new(TypeInfo::interface(fqn))
    }

    pub fn type_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.info = self.info.with_type_parameters(names);
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.info.is_abstract = true;
        self
    }

    pub fn extends(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declares a public instance property with a getter.
    pub fn property(self, name: &str, property_type: TypeRef) -> Self {
        self.property_with_getter(name, property_type, Some(Accessor::default()))
    }

    pub fn property_with_getter(
        mut self,
        name: &str,
        property_type: TypeRef,
        getter: Option<Accessor>,
    ) -> Self {
        let property =
            PropertyInfo::new(name, self.info.fqn.clone(), property_type).with_getter(getter);
        self.properties.push(property);
        self
    }

    pub fn info(&self) -> &TypeInfo {
        &self.info
    }
}

/// A static type registration table.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDecl>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, replacing any earlier one with the same fqn.
    pub fn register(&mut self, decl: TypeDecl) -> &mut Self {
        self.types.insert(decl.info.fqn.clone(), decl);
        self
    }

    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.register(decl);
        self
    }

    pub fn type_info(&self, fqn: &str) -> Option<&TypeInfo> {
        self.types.get(fqn).map(TypeDecl::info)
    }

}

impl TypeProvider for TypeRegistry {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.type_info(fqn).cloned()
    }
}

impl InheritanceProvider for TypeRegistry {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        self.types.get(fqn)?.superclass.clone()
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        self.types
            .get(fqn)
            .map(|decl| decl.interfaces.clone())
            .unwrap_or_default()
    }
}

impl MemberProvider for TypeRegistry {
    /// Declared properties first, then inherited ones not hidden by name,
    /// with base type parameters substituted.
    fn get_properties(&self, type_fqn: &str) -> Vec<PropertyInfo> {
        let mut properties: Vec<PropertyInfo> = Vec::new();
        let mut visited = HashSet::new();
        let mut subst = Substitution::new();
        let mut current = Some(type_fqn.to_string());

        while let Some(fqn) = current.take() {
            if !visited.insert(fqn.clone()) {
                break;
            }
            let Some(decl) = self.types.get(&fqn) else {
                break;
            };

            for property in &decl.properties {
                if properties.iter().any(|p| p.name == property.name) {
                    continue;
                }
                let mut inherited = property.clone();
                inherited.property_type = subst.apply(&property.property_type);
                properties.push(inherited);
            }

            if let Some(superclass) = &decl.superclass {
                let bound = subst.apply(superclass);
                subst = Substitution::for_type_ref(self, &bound);
                current = bound.fqn().map(str::to_string);
            }
        }

        properties
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AttributeKey {
    type_fqn: String,
    member: Option<String>,
}

/// A static annotation table keyed by type and property name.
#[derive(Debug, Default, Clone)]
pub struct AttributeTable {
    entries: HashMap<AttributeKey, Vec<Attribute>>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotate_type(&mut self, type_fqn: &str, attribute: impl Into<Attribute>) -> &mut Self {
        self.push(type_fqn, None, attribute.into())
    }

    /// `type_fqn` is the type declaring the property.
    pub fn annotate_property(
        &mut self,
        type_fqn: &str,
        property: &str,
        attribute: impl Into<Attribute>,
    ) -> &mut Self {
        self.push(type_fqn, Some(property.to_string()), attribute.into())
    }

    pub fn with_type_attribute(mut self, type_fqn: &str, attribute: impl Into<Attribute>) -> Self {
        self.annotate_type(type_fqn, attribute);
        self
    }

    pub fn with_property_attribute(
        mut self,
        type_fqn: &str,
        property: &str,
        attribute: impl Into<Attribute>,
    ) -> Self {
        self.annotate_property(type_fqn, property, attribute);
        self
    }

    fn push(&mut self, type_fqn: &str, member: Option<String>, attribute: Attribute) -> &mut Self {
        self.entries
            .entry(AttributeKey {
                type_fqn: type_fqn.to_string(),
                member,
            })
            .or_default()
            .push(attribute);
        self
    }
}

impl AttributeProvider for AttributeTable {
    fn declared_attributes(
        &self,
        _part_type: &TypeInfo,
        target: AttributeTarget<'_>,
    ) -> Vec<Attribute> {
        let key = match target {
            AttributeTarget::Type(ty) => AttributeKey {
                type_fqn: ty.fqn.clone(),
                member: None,
            },
            AttributeTarget::Property(property) => AttributeKey {
                type_fqn: property.declaring_type.clone(),
                member: Some(property.name.clone()),
            },
        };
        self.entries.get(&key).cloned().unwrap_or_default()
    }
}
