//! Type descriptors handed to the inspector by a type system.
//!
//! These are pure data types; hierarchy walking lives in `partscope-core`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to a type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// Non-generic named type, e.g. `System.String`.
    Id(String),
    /// Constructed generic type, e.g. `IContainer<T>` or `IContainer<System.String>`.
    Generic { base: String, args: Vec<TypeRef> },
    /// Unbound generic definition, e.g. `IContainer<>`.
    Definition { base: String, arity: usize },
    /// Generic type parameter of an enclosing definition.
    Variable(String),
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },
}

impl TypeRef {
    pub fn id(fqn: impl Into<String>) -> Self {
        TypeRef::Id(fqn.into())
    }

    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: base.into(),
            args,
        }
    }

    pub fn definition(base: impl Into<String>, arity: usize) -> Self {
        TypeRef::Definition {
            base: base.into(),
            arity,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TypeRef::Variable(name.into())
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            dimensions: 1,
        }
    }

    /// Name of the type declaration this reference points at, if any.
    pub fn fqn(&self) -> Option<&str> {
        match self {
            TypeRef::Id(fqn) => Some(fqn),
            TypeRef::Generic { base, .. } | TypeRef::Definition { base, .. } => Some(base),
            TypeRef::Variable(_) | TypeRef::Array { .. } => None,
        }
    }

    pub fn is_generic_definition(&self) -> bool {
        matches!(self, TypeRef::Definition { .. })
    }

    /// Arguments of a constructed generic type; empty for everything else.
    pub fn generic_arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Generic { args, .. } => args,
            _ => &[],
        }
    }

    /// The definition shape shared by every construction of the same generic type.
    pub fn generic_shape(&self) -> Option<GenericShape> {
        match self {
            TypeRef::Generic { base, args } => Some(GenericShape::new(base.clone(), args.len())),
            TypeRef::Definition { base, arity } => Some(GenericShape::new(base.clone(), *arity)),
            _ => None,
        }
    }

    /// `IContainer<T>` -> `IContainer<>`; definitions map to themselves.
    pub fn generic_definition(&self) -> Option<TypeRef> {
        self.generic_shape().map(GenericShape::into_definition)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Id(fqn) | TypeRef::Variable(fqn) => f.write_str(fqn),
            TypeRef::Generic { base, args } => {
                write!(f, "{base}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeRef::Definition { base, arity } => {
                write!(f, "{base}<{}>", ",".repeat(arity.saturating_sub(1)))
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{element}")?;
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

/// Identity of a generic definition: originating definition plus arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericShape {
    pub definition: String,
    pub arity: usize,
}

impl GenericShape {
    pub fn new(definition: impl Into<String>, arity: usize) -> Self {
        Self {
            definition: definition.into(),
            arity,
        }
    }

    pub fn into_definition(self) -> TypeRef {
        TypeRef::Definition {
            base: self.definition,
            arity: self.arity,
        }
    }
}

/// Kind of type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Annotation,
    Primitive,
}

/// Information about a type (class, interface, enum, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Fully qualified name, e.g., "Acme.Storage.Box"
    pub fqn: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub is_abstract: bool,
    /// Generic type parameters in declaration order. Non-empty means the
    /// type is an open generic definition.
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
}

impl TypeInfo {
    pub fn new(fqn: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            is_abstract: false,
            type_parameters: Vec::new(),
        }
    }

    pub fn class(fqn: impl Into<String>) -> Self {
        Self::new(fqn, TypeKind::Class)
    }

    pub fn interface(fqn: impl Into<String>) -> Self {
        Self {
            is_abstract: true,
            ..Self::new(fqn, TypeKind::Interface)
        }
    }

    pub fn with_type_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = names
            .into_iter()
            .map(|name| TypeParameter { name: name.into() })
            .collect();
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    pub fn is_generic_definition(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    pub fn generic_shape(&self) -> Option<GenericShape> {
        self.is_generic_definition()
            .then(|| GenericShape::new(self.fqn.clone(), self.type_parameters.len()))
    }

    /// The type's own parameters as type references, in declaration order.
    pub fn parameter_refs(&self) -> Vec<TypeRef> {
        self.type_parameters
            .iter()
            .map(|p| TypeRef::Variable(p.name.clone()))
            .collect()
    }

    /// How the type refers to itself: `Box<T>` for a definition, `Box` otherwise.
    pub fn self_ref(&self) -> TypeRef {
        if self.is_generic_definition() {
            TypeRef::Generic {
                base: self.fqn.clone(),
                args: self.parameter_refs(),
            }
        } else {
            TypeRef::Id(self.fqn.clone())
        }
    }
}

/// A generic type parameter declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

/// Read accessor of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Accessor {
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
}

/// Information about a property visible on a type, inherited ones included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    /// The type that declares this property (may differ from the inspected type)
    pub declaring_type: String,
    pub property_type: TypeRef,
    /// `None` for write-only properties
    pub getter: Option<Accessor>,
}

impl PropertyInfo {
    /// A public instance property with a getter.
    pub fn new(
        name: impl Into<String>,
        declaring_type: impl Into<String>,
        property_type: TypeRef,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            property_type,
            getter: Some(Accessor::default()),
        }
    }

    pub fn with_getter(mut self, getter: Option<Accessor>) -> Self {
        self.getter = getter;
        self
    }

    /// Public, non-static and readable.
    pub fn is_exportable(&self) -> bool {
        matches!(
            self.getter,
            Some(Accessor {
                visibility: Visibility::Public,
                is_static: false,
            })
        )
    }
}
