use partscope_api::{TypeInfo, TypeRef};
use partscope_core::{AttributeTable, InspectorConfig, TypeDecl, TypeInspector, TypeRegistry};
use std::sync::Arc;

/// Base library every fixture starts from.
#[allow(dead_code)]
pub fn base_types() -> TypeRegistry {
    TypeRegistry::new()
        .with(TypeDecl::class("System.Object"))
        .with(TypeDecl::interface("System.IComparable"))
        .with(TypeDecl::interface("System.IDisposable"))
        .with(
            TypeDecl::class("System.String")
                .extends(TypeRef::id("System.Object"))
                .implements(TypeRef::id("System.IComparable")),
        )
        .with(TypeDecl::class("System.Int32").extends(TypeRef::id("System.Object")))
        .with(TypeDecl::interface("Acme.IEnumerable").type_parameters(["E"]))
        .with(
            TypeDecl::interface("Acme.IContainer")
                .type_parameters(["C"])
                .implements(TypeRef::generic("Acme.IEnumerable", vec![var("C")])),
        )
}

#[allow(dead_code)]
pub fn var(name: &str) -> TypeRef {
    TypeRef::variable(name)
}

#[allow(dead_code)]
pub fn string() -> TypeRef {
    TypeRef::id("System.String")
}

#[allow(dead_code)]
pub fn inspector(types: TypeRegistry, attributes: AttributeTable) -> TypeInspector {
    TypeInspector::new(Arc::new(attributes), Arc::new(types))
}

#[allow(dead_code)]
pub fn inspector_with_config(
    types: TypeRegistry,
    attributes: AttributeTable,
    config: &InspectorConfig,
) -> TypeInspector {
    TypeInspector::with_config(Arc::new(attributes), Arc::new(types), config)
}

#[allow(dead_code)]
pub fn info(types: &TypeRegistry, fqn: &str) -> TypeInfo {
    types
        .type_info(fqn)
        .cloned()
        .unwrap_or_else(|| panic!("{fqn} is not registered"))
}
