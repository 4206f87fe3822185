//! Type hierarchy traversal.
//!
//! Related types come back from the [`TypeSystem`] in terms of the declaring
//! type's own parameters; every step of a walk substitutes them with the
//! arguments of the reference being walked, so `Box<T> : Base<T>` with
//! `Base<U> : IContainer<U>` reports `IContainer<T>` for `Box<T>`.

use indexmap::IndexSet;
use partscope_api::{TypeParameter, TypeRef, TypeSystem};
use std::collections::{HashMap, HashSet, VecDeque};

/// A map from type variables to the types bound to them.
#[derive(Debug, Default, Clone)]
pub struct Substitution {
    map: HashMap<String, TypeRef>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `params` to `args` position by position.
    pub fn bind(params: &[TypeParameter], args: &[TypeRef]) -> Self {
        let mut subst = Self::new();
        for (param, arg) in params.iter().zip(args) {
            subst.insert(param.name.clone(), arg.clone());
        }
        subst
    }

    /// Binds the parameters of the declaration behind `ty` to its arguments.
    /// Anything but a constructed generic type yields an empty substitution.
    pub fn for_type_ref(types: &dyn TypeSystem, ty: &TypeRef) -> Self {
        let TypeRef::Generic { base, args } = ty else {
            return Self::new();
        };
        match types.get_type_info(base) {
            Some(info) => Self::bind(&info.type_parameters, args),
            None => Self::new(),
        }
    }

    pub fn insert(&mut self, var: String, ty: TypeRef) {
        self.map.insert(var, ty);
    }

    /// Apply this substitution to a type. Replacements are not re-applied.
    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Variable(name) => {
                self.map.get(name).cloned().unwrap_or_else(|| ty.clone())
            }
            TypeRef::Generic { base, args } => TypeRef::Generic {
                base: base.clone(),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element: Box::new(self.apply(element)),
                dimensions: *dimensions,
            },
            TypeRef::Id(_) | TypeRef::Definition { .. } => ty.clone(),
        }
    }
}

/// A walk reached the configured maximum depth before the root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("hierarchy of '{ty}' is deeper than {limit} levels")]
pub struct DepthExceeded {
    pub ty: String,
    pub limit: usize,
}

pub type WalkResult<T> = std::result::Result<T, DepthExceeded>;

/// Walks base types and implemented interfaces of type references.
///
/// Walks go all the way to the root. A hierarchy deeper than `max_depth`
/// fails the walk rather than being cut short.
pub struct Hierarchy<'a> {
    types: &'a dyn TypeSystem,
    max_depth: usize,
}

impl<'a> Hierarchy<'a> {
    pub fn new(types: &'a dyn TypeSystem, max_depth: usize) -> Self {
        Self { types, max_depth }
    }

    pub fn superclass(&self, ty: &TypeRef) -> Option<TypeRef> {
        let declared = self.types.get_superclass(ty.fqn()?)?;
        Some(Substitution::for_type_ref(self.types, ty).apply(&declared))
    }

    pub fn direct_interfaces(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let Some(fqn) = ty.fqn() else {
            return vec![];
        };
        let declared = self.types.get_interfaces(fqn);
        if declared.is_empty() {
            return declared;
        }
        let subst = Substitution::for_type_ref(self.types, ty);
        declared.iter().map(|iface| subst.apply(iface)).collect()
    }

    /// `ty` followed by each base type up to the root.
    pub fn base_chain(&self, ty: &TypeRef) -> WalkResult<Vec<TypeRef>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(ty.clone());

        while let Some(step) = current {
            if !seen.insert(step.clone()) {
                tracing::warn!(ty = %ty, at = %step, "cycle in base chain");
                break;
            }
            if chain.len() == self.max_depth {
                return Err(self.exceeded(ty));
            }
            current = self.superclass(&step);
            chain.push(step);
        }

        Ok(chain)
    }

    /// Every interface implemented by `ty`, each yielded once: the ones declared
    /// along the base chain first, then their base interfaces breadth-first.
    pub fn implemented_interfaces(&self, ty: &TypeRef) -> WalkResult<Vec<TypeRef>> {
        let mut found = IndexSet::new();
        let mut queue = VecDeque::new();

        for step in self.base_chain(ty)? {
            for iface in self.direct_interfaces(&step) {
                queue.push_back((iface, 1usize));
            }
        }

        while let Some((iface, depth)) = queue.pop_front() {
            if found.contains(&iface) {
                continue;
            }
            let parents = self.direct_interfaces(&iface);
            if !parents.is_empty() && depth >= self.max_depth {
                return Err(self.exceeded(ty));
            }
            queue.extend(parents.into_iter().map(|parent| (parent, depth + 1)));
            found.insert(iface);
        }

        Ok(found.into_iter().collect())
    }

    /// Candidate supertypes in matching order: interfaces first, then the base chain.
    pub fn assignable_types(&self, ty: &TypeRef) -> WalkResult<Vec<TypeRef>> {
        let mut candidates = self.implemented_interfaces(ty)?;
        candidates.extend(self.base_chain(ty)?);
        tracing::trace!(ty = %ty, candidates = candidates.len(), "walked hierarchy");
        Ok(candidates)
    }

    /// Whether a value of type `source` can be used where `target` is expected.
    pub fn is_assignable_from(&self, target: &TypeRef, source: &TypeRef) -> WalkResult<bool> {
        if target == source {
            return Ok(true);
        }

        match (target, source) {
            // Arrays (covariant)
            (
                TypeRef::Array {
                    element: target_element,
                    dimensions: target_dims,
                },
                TypeRef::Array {
                    element: source_element,
                    dimensions: source_dims,
                },
            ) => Ok(target_dims == source_dims
                && self.is_assignable_from(target_element, source_element)?),
            (_, TypeRef::Array { .. }) | (TypeRef::Array { .. }, _) => Ok(false),
            _ => Ok(self
                .assignable_types(source)?
                .iter()
                .any(|candidate| candidate == target)),
        }
    }

    fn exceeded(&self, ty: &TypeRef) -> DepthExceeded {
        DepthExceeded {
            ty: ty.to_string(),
            limit: self.max_depth,
        }
    }
}
