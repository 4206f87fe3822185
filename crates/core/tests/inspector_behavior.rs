mod common;

use common::{base_types, info, inspector, inspector_with_config, string};
use partscope_api::{
    Accessor, ActivationFeature, CompositionErrorKind, CustomAttribute, DiscoveredExport,
    ExportAttribute, ExportMetadataAttribute, MetadataAttribute, MetadataScalar, MetadataValue,
    PartMetadataAttribute, PartNotDiscoverableAttribute, SharedAttribute, TypeRef, Visibility,
};
use partscope_core::metadata::SHARING_BOUNDARY;
use partscope_core::{AttributeTable, InspectorConfig, TypeDecl};

#[test]
fn type_exporting_itself_uses_own_type_and_shared_empty_metadata() {
    let types = base_types().with(TypeDecl::class("Acme.Logger"));
    let attributes =
        AttributeTable::new().with_type_attribute("Acme.Logger", ExportAttribute::new());
    let part_type = info(&types, "Acme.Logger");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .expect("part should be discovered");

    assert_eq!(part.part_type(), &part_type);
    assert_eq!(part.exports().len(), 1);
    let export = &part.exports()[0];
    assert!(matches!(export, DiscoveredExport::Instance(_)));
    assert_eq!(export.contract().contract_type(), &TypeRef::id("Acme.Logger"));
    assert_eq!(export.contract().contract_name(), None);
    assert!(export.metadata().is_shared_empty());
    assert!(part.part_metadata().is_shared_empty());
}

#[test]
fn abstract_and_non_class_types_are_never_parts() {
    let types = base_types()
        .with(TypeDecl::class("Acme.AbstractLogger").abstract_type())
        .with(TypeDecl::interface("Acme.ILogger"))
        .with(TypeDecl::new(partscope_api::TypeInfo::new(
            "Acme.Level",
            partscope_api::TypeKind::Enum,
        )));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.AbstractLogger", ExportAttribute::new())
        .with_type_attribute("Acme.ILogger", ExportAttribute::new())
        .with_type_attribute("Acme.Level", ExportAttribute::new());
    let inspector = inspector(types.clone(), attributes);

    for fqn in ["Acme.AbstractLogger", "Acme.ILogger", "Acme.Level"] {
        let result = inspector.inspect_type_for_part(&info(&types, fqn)).unwrap();
        assert!(result.is_none(), "{fqn} must not be a part");
    }
}

#[test]
fn not_discoverable_marker_wins_over_exports() {
    let types = base_types().with(TypeDecl::class("Acme.Hidden").property("Name", string()));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Hidden", ExportAttribute::new())
        .with_type_attribute("Acme.Hidden", PartNotDiscoverableAttribute)
        .with_property_attribute("Acme.Hidden", "Name", ExportAttribute::new());
    let part_type = info(&types, "Acme.Hidden");

    let result = inspector(types, attributes).inspect_type_for_part(&part_type);
    assert_eq!(result, Ok(None));
}

#[test]
fn type_without_exports_is_not_a_part() {
    let types = base_types().with(TypeDecl::class("Acme.Plain").property("Name", string()));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Plain", ExportMetadataAttribute::new("Orphan", 1i64))
        .with_property_attribute(
            "Acme.Plain",
            "Name",
            CustomAttribute {
                attribute_type: "Acme.Obsolete".into(),
            },
        );
    let part_type = info(&types, "Acme.Plain");

    let result = inspector(types, attributes).inspect_type_for_part(&part_type);
    assert_eq!(result, Ok(None));
}

#[test]
fn repeated_metadata_name_with_mixed_value_types_is_rejected() {
    let types = base_types().with(TypeDecl::class("Acme.Handler"));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Handler", ExportAttribute::new().with_field("Route", 1i64))
        .with_type_attribute("Acme.Handler", ExportMetadataAttribute::new("Route", "/first"));
    let part_type = info(&types, "Acme.Handler");

    let err = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap_err();

    assert_eq!(err.kind(), CompositionErrorKind::MetadataTypeMismatch);
    assert_eq!(err.part(), "Acme.Handler");
    assert_eq!(err.contract(), "Acme.Handler");
}

#[test]
fn part_metadata_with_mixed_value_types_is_rejected() {
    let types = base_types().with(TypeDecl::class("Acme.Handler"));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Handler", ExportAttribute::new())
        .with_type_attribute("Acme.Handler", PartMetadataAttribute::new("Tier", 1i64))
        .with_type_attribute("Acme.Handler", PartMetadataAttribute::new("Tier", true));
    let part_type = info(&types, "Acme.Handler");

    let err = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap_err();
    assert_eq!(err.kind(), CompositionErrorKind::MetadataTypeMismatch);
    assert_eq!(err.member(), "Acme.Handler");
}

#[test]
fn repeated_metadata_pairs_become_ordered_collection() {
    let types = base_types().with(TypeDecl::class("Acme.Handler"));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Handler", ExportAttribute::new())
        .with_type_attribute("Acme.Handler", ExportMetadataAttribute::new("Route", "/first"))
        .with_type_attribute("Acme.Handler", ExportMetadataAttribute::new("Route", "/second"))
        .with_type_attribute("Acme.Handler", ExportMetadataAttribute::new("Priority", 3i64));
    let part_type = info(&types, "Acme.Handler");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();
    let metadata = part.exports()[0].metadata();

    assert_eq!(
        metadata.get("Route"),
        Some(&MetadataValue::Collection(vec![
            MetadataScalar::from("/first"),
            MetadataScalar::from("/second"),
        ]))
    );
    assert_eq!(
        metadata.get("Priority"),
        Some(&MetadataValue::Scalar(MetadataScalar::Int(3)))
    );
    let names: Vec<_> = metadata.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Route", "Priority"]);
}

#[test]
fn custom_export_fields_and_tagged_annotations_merge_in_order() {
    let types = base_types().with(TypeDecl::class("Acme.Handler"));
    let attributes = AttributeTable::new()
        .with_type_attribute(
            "Acme.Handler",
            MetadataAttribute::new("Acme.RouteAttribute").with_field("Route", "/tagged"),
        )
        .with_type_attribute(
            "Acme.Handler",
            ExportAttribute::new().with_field("Route", "/export"),
        );
    let part_type = info(&types, "Acme.Handler");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();

    assert_eq!(
        part.exports()[0].metadata().get("Route"),
        Some(&MetadataValue::Collection(vec![
            MetadataScalar::from("/export"),
            MetadataScalar::from("/tagged"),
        ]))
    );
}

#[test]
fn every_export_annotation_yields_its_own_export() {
    let types = base_types().with(
        TypeDecl::class("Acme.Cache")
            .implements(TypeRef::id("System.IDisposable")),
    );
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Cache", ExportAttribute::new())
        .with_type_attribute(
            "Acme.Cache",
            ExportAttribute::contract(TypeRef::id("System.IDisposable")).named("cache"),
        )
        .with_type_attribute("Acme.Cache", ExportMetadataAttribute::new("Tier", "memory"));
    let part_type = info(&types, "Acme.Cache");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();

    let contracts: Vec<_> = part.exports().iter().map(|e| e.contract().to_string()).collect();
    assert_eq!(
        contracts,
        vec!["Acme.Cache".to_string(), "System.IDisposable \"cache\"".to_string()]
    );
    // Loose metadata applies to every export of the member.
    for export in part.exports() {
        assert_eq!(
            export.metadata().get("Tier"),
            Some(&MetadataValue::Scalar(MetadataScalar::from("memory")))
        );
    }
}

#[test]
fn incompatible_instance_contract_fails_the_whole_type() {
    let types = base_types().with(TypeDecl::class("Acme.Cache"));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Cache", ExportAttribute::new())
        .with_type_attribute(
            "Acme.Cache",
            ExportAttribute::contract(TypeRef::id("System.IDisposable")),
        );
    let part_type = info(&types, "Acme.Cache");

    let err = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap_err();
    assert_eq!(err.kind(), CompositionErrorKind::ContractNotAssignable);
    assert_eq!(err.part(), "Acme.Cache");
    assert_eq!(err.contract(), "System.IDisposable");
    assert!(err.to_string().contains("System.IDisposable"));
}

#[test]
fn contract_inherited_through_base_class_is_assignable() {
    let types = base_types()
        .with(TypeDecl::class("Acme.Resource").implements(TypeRef::id("System.IDisposable")))
        .with(TypeDecl::class("Acme.FileResource").extends(TypeRef::id("Acme.Resource")));
    let attributes = AttributeTable::new().with_type_attribute(
        "Acme.FileResource",
        ExportAttribute::contract(TypeRef::id("System.IDisposable")),
    );
    let part_type = info(&types, "Acme.FileResource");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap();
    assert!(part.is_some());
}

#[test]
fn string_property_exported_as_comparable() {
    let types = base_types().with(TypeDecl::class("Acme.Settings").property("Name", string()));
    let attributes = AttributeTable::new().with_property_attribute(
        "Acme.Settings",
        "Name",
        ExportAttribute::contract(TypeRef::id("System.IComparable")),
    );
    let part_type = info(&types, "Acme.Settings");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();

    let DiscoveredExport::Property(export) = &part.exports()[0] else {
        panic!("expected a property export");
    };
    assert_eq!(export.property.name, "Name");
    assert_eq!(export.property.property_type, string());
    assert_eq!(
        export.contract.contract_type(),
        &TypeRef::id("System.IComparable")
    );
    assert!(export.metadata.is_shared_empty());
}

#[test]
fn property_defaults_to_its_own_type_as_contract() {
    let types = base_types().with(TypeDecl::class("Acme.Settings").property("Name", string()));
    let attributes = AttributeTable::new()
        .with_property_attribute("Acme.Settings", "Name", ExportAttribute::new().named("app-name"))
        .with_property_attribute(
            "Acme.Settings",
            "Name",
            ExportMetadataAttribute::new("Source", "env"),
        );
    let part_type = info(&types, "Acme.Settings");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();
    let export = &part.exports()[0];

    assert_eq!(export.contract().contract_type(), &string());
    assert_eq!(export.contract().contract_name(), Some("app-name"));
    assert_eq!(
        export.metadata().get("Source"),
        Some(&MetadataValue::Scalar(MetadataScalar::from("env")))
    );
    assert_eq!(export.property().map(|p| p.name.as_str()), Some("Name"));
}

#[test]
fn property_with_unimplemented_contract_is_rejected() {
    let types = base_types().with(
        TypeDecl::class("Acme.Settings").property("Count", TypeRef::id("System.Int32")),
    );
    let attributes = AttributeTable::new().with_property_attribute(
        "Acme.Settings",
        "Count",
        ExportAttribute::contract(TypeRef::id("System.IComparable")),
    );
    let part_type = info(&types, "Acme.Settings");

    let err = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap_err();
    assert_eq!(err.kind(), CompositionErrorKind::ExportedContractTypeNotAssignable);
    assert_eq!(err.member(), "Count");
    assert_eq!(err.part(), "Acme.Settings");
}

#[test]
fn only_public_readable_instance_properties_are_scanned() {
    let types = base_types().with(
        TypeDecl::class("Acme.Settings")
            .property_with_getter("WriteOnly", string(), None)
            .property_with_getter(
                "Secret",
                string(),
                Some(Accessor {
                    visibility: Visibility::Private,
                    is_static: false,
                }),
            )
            .property_with_getter(
                "Default",
                string(),
                Some(Accessor {
                    visibility: Visibility::Public,
                    is_static: true,
                }),
            ),
    );
    let mut attributes = AttributeTable::new();
    for name in ["WriteOnly", "Secret", "Default"] {
        attributes.annotate_property("Acme.Settings", name, ExportAttribute::new());
    }
    let part_type = info(&types, "Acme.Settings");

    let result = inspector(types, attributes).inspect_type_for_part(&part_type);
    assert_eq!(result, Ok(None));
}

#[test]
fn inherited_property_exports_are_discovered() {
    let types = base_types()
        .with(TypeDecl::class("Acme.Base").property("Name", string()))
        .with(TypeDecl::class("Acme.Derived").extends(TypeRef::id("Acme.Base")));
    let attributes =
        AttributeTable::new().with_property_attribute("Acme.Base", "Name", ExportAttribute::new());
    let part_type = info(&types, "Acme.Derived");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();
    let property = part.exports()[0].property().unwrap();
    assert_eq!(property.declaring_type, "Acme.Base");
}

#[test]
fn instance_exports_precede_property_exports() {
    let types = base_types().with(TypeDecl::class("Acme.Settings").property("Name", string()));
    let attributes = AttributeTable::new()
        .with_property_attribute("Acme.Settings", "Name", ExportAttribute::new())
        .with_type_attribute("Acme.Settings", ExportAttribute::new());
    let part_type = info(&types, "Acme.Settings");

    let part = inspector(types, attributes)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();

    assert!(matches!(part.exports()[0], DiscoveredExport::Instance(_)));
    assert!(matches!(part.exports()[1], DiscoveredExport::Property(_)));
}

#[test]
fn part_metadata_and_activation_features_are_attached() {
    let types = base_types().with(TypeDecl::class("Acme.Session"));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Session", ExportAttribute::new())
        .with_type_attribute(
            "Acme.Session",
            SharedAttribute {
                sharing_boundary: Some("Request".into()),
            },
        )
        .with_type_attribute("Acme.Session", PartMetadataAttribute::new("Owner", "web"));
    let config = InspectorConfig {
        activation_features: vec![
            ActivationFeature::new("lifetime"),
            ActivationFeature::new("disposal"),
        ],
        ..InspectorConfig::default()
    };
    let part_type = info(&types, "Acme.Session");

    let part = inspector_with_config(types, attributes, &config)
        .inspect_type_for_part(&part_type)
        .unwrap()
        .unwrap();

    assert_eq!(part.activation_features(), config.activation_features.as_slice());
    assert_eq!(
        part.part_metadata().get(SHARING_BOUNDARY),
        Some(&MetadataValue::Scalar(MetadataScalar::from("Request")))
    );
    assert_eq!(
        part.part_metadata().get("Owner"),
        Some(&MetadataValue::Scalar(MetadataScalar::from("web")))
    );
    // Part-level annotations do not leak into export metadata.
    assert!(part.exports()[0].metadata().is_shared_empty());
}

#[test]
fn inspecting_twice_yields_equal_parts() {
    let types = base_types().with(TypeDecl::class("Acme.Settings").property("Name", string()));
    let attributes = AttributeTable::new()
        .with_type_attribute("Acme.Settings", ExportAttribute::new())
        .with_type_attribute("Acme.Settings", ExportMetadataAttribute::new("Tier", 1i64))
        .with_type_attribute("Acme.Settings", ExportMetadataAttribute::new("Tier", 2i64))
        .with_property_attribute("Acme.Settings", "Name", ExportAttribute::new());
    let part_type = info(&types, "Acme.Settings");
    let inspector = inspector(types, attributes);

    let first = inspector.inspect_type_for_part(&part_type).unwrap();
    let second = inspector.inspect_type_for_part(&part_type).unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn unknown_fqn_is_not_a_part() {
    let types = base_types().with(TypeDecl::class("Acme.Logger"));
    let attributes =
        AttributeTable::new().with_type_attribute("Acme.Logger", ExportAttribute::new());
    let inspector = inspector(types, attributes);

    assert_eq!(inspector.inspect_fqn("Acme.Missing"), Ok(None));
    assert!(inspector.inspect_fqn("Acme.Logger").unwrap().is_some());
}
