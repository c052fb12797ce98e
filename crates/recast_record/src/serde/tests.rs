use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use serde_json::json;

use super::{BuildMode, DeserializeDriver, Deserialized, SerializeDriver};
use crate::info::{
    AddType, EnumInfo, FieldInfo, FieldOptions, FieldType, RecordInfo, TypeName,
};
use crate::ops::{Arguments, Record, Value};
use crate::registry::{CollectionIndex, ScalarKey, TypeRegistry};
use crate::tree::Tree;
use crate::{ConfigError, ConstructError, ErrorKind, from_tree, to_tree};

// -----------------------------------------------------------------------------
// Fixtures

fn child_info() -> Arc<RecordInfo> {
    Arc::new(RecordInfo::new(
        "Child",
        [
            FieldInfo::new("age", FieldType::Primitive),
            FieldInfo::new("name", FieldType::Primitive),
        ],
    ))
}

fn child(info: &Arc<RecordInfo>, age: f64, name: &str) -> Record {
    info.construct(Arguments::new().with("age", age).with("name", name))
        .unwrap()
}

fn parent_info(childs: FieldInfo) -> Arc<RecordInfo> {
    Arc::new(RecordInfo::new(
        "Parent",
        [childs, FieldInfo::new("name", FieldType::Primitive)],
    ))
}

fn to_json(tree: &Tree) -> serde_json::Value {
    serde_json::to_value(tree).unwrap()
}

fn keys(tree: &Tree) -> Vec<&str> {
    tree.as_map().unwrap().keys().collect()
}

/// Two record types `A { x }` and `B { y }`, and their subtype table.
fn variants() -> (Arc<RecordInfo>, Arc<RecordInfo>, Arc<TypeRegistry>) {
    let a = Arc::new(RecordInfo::new(
        "A",
        [FieldInfo::new("x", FieldType::Primitive)],
    ));
    let b = Arc::new(RecordInfo::new(
        "B",
        [FieldInfo::new("y", FieldType::Primitive)],
    ));
    let table = Arc::new(TypeRegistry::new().with(&a).with(&b));
    (a, b, table)
}

fn holder_info(item: FieldInfo) -> Arc<RecordInfo> {
    Arc::new(RecordInfo::new(
        "Holder",
        [FieldInfo::new("id", FieldType::Primitive), item],
    ))
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn flat_record_round_trip() {
    let info = child_info();
    let leon = child(&info, 7.5, "leon");

    let tree = to_tree(&leon).unwrap();
    assert_eq!(to_json(&tree), json!({ "age": 7.5, "name": "leon" }));
    assert_eq!(keys(&tree), ["age", "name"]);

    assert_eq!(from_tree(&tree, &info).unwrap(), leon);
}

#[test]
fn nested_list_keeps_order() {
    let child_info = child_info();
    let info = parent_info(FieldInfo::new(
        "childs",
        FieldType::list(FieldType::record(&child_info)),
    ));
    let childs = vec![
        child(&child_info, 1.0, "leon"),
        child(&child_info, 2.0, "nathan"),
        child(&child_info, 3.0, "alice"),
    ];
    let parent = info
        .construct(
            Arguments::new()
                .with("childs", childs)
                .with("name", "bob"),
        )
        .unwrap();

    let tree = to_tree(&parent).unwrap();
    assert_eq!(
        to_json(&tree),
        json!({
            "childs": [
                { "age": 1.0, "name": "leon" },
                { "age": 2.0, "name": "nathan" },
                { "age": 3.0, "name": "alice" },
            ],
            "name": "bob",
        })
    );

    let back = from_tree(&tree, &info).unwrap();
    assert_eq!(back, parent);
    let names: Vec<&str> = back
        .field("childs")
        .and_then(Value::as_list)
        .unwrap()
        .iter()
        .map(|child| child.as_record().unwrap().field("name").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(names, ["leon", "nathan", "alice"]);
}

#[test]
fn tuple_and_map_containers() {
    let child_info = child_info();
    let info = Arc::new(RecordInfo::new(
        "Family",
        [
            FieldInfo::new("pair", FieldType::tuple(FieldType::record(&child_info))),
            FieldInfo::new("by_name", FieldType::map(FieldType::record(&child_info))),
        ],
    ));
    let leon = child(&child_info, 1.0, "leon");
    let nathan = child(&child_info, 2.0, "nathan");
    let by_name = [("nathan", Value::from(nathan.clone())), ("leon", Value::from(leon.clone()))]
        .into_iter()
        .collect();
    let family = info
        .construct(
            Arguments::new()
                .with("pair", Value::Tuple(vec![leon.into(), nathan.into()]))
                .with("by_name", Value::Map(by_name)),
        )
        .unwrap();

    let tree = to_tree(&family).unwrap();
    assert_eq!(tree.get("pair").and_then(Tree::as_seq).map(<[Tree]>::len), Some(2));
    let map_keys: Vec<&str> = tree.get("by_name").unwrap().as_map().unwrap().keys().collect();
    assert_eq!(map_keys.len(), 2);
    assert!(map_keys.contains(&"leon") && map_keys.contains(&"nathan"));

    let back = from_tree(&tree, &info).unwrap();
    assert!(matches!(back.field("pair"), Some(Value::Tuple(items)) if items.len() == 2));
    assert_eq!(back, family);
}

#[test]
fn untyped_primitive_data_is_copied() {
    let info = Arc::new(RecordInfo::new(
        "Bag",
        [FieldInfo::new("data", FieldType::Primitive)],
    ));
    let tree: Tree = serde_json::from_str(r#"{ "data": { "a": [1, 2.5, "x", true] } }"#).unwrap();

    let bag = from_tree(&tree, &info).unwrap();
    assert_eq!(to_tree(&bag).unwrap(), tree);
}

// -----------------------------------------------------------------------------
// Flatten

#[test]
fn flatten_splices_nested_keys() {
    let child_info = child_info();
    let info = Arc::new(RecordInfo::new(
        "Parent",
        [
            FieldInfo::new("id", FieldType::Primitive),
            FieldInfo::new("child", FieldType::record(&child_info))
                .with_options(FieldOptions::new().with_flatten(true)),
            FieldInfo::new("note", FieldType::Primitive),
        ],
    ));
    let parent = info
        .construct(
            Arguments::new()
                .with("id", 1)
                .with("child", child(&child_info, 7.0, "leon"))
                .with("note", "hi"),
        )
        .unwrap();

    let tree = to_tree(&parent).unwrap();
    assert_eq!(keys(&tree), ["id", "age", "name", "note"]);
    assert!(tree.get("child").is_none());

    assert_eq!(from_tree(&tree, &info).unwrap(), parent);
}

#[test]
fn flatten_collision_last_write_wins() {
    let child_info = child_info();
    let info = parent_info(
        FieldInfo::new("child", FieldType::record(&child_info))
            .with_options(FieldOptions::new().with_flatten(true)),
    );
    let parent = info
        .construct(
            Arguments::new()
                .with("child", child(&child_info, 7.0, "leon"))
                .with("name", "bob"),
        )
        .unwrap();

    let tree = to_tree(&parent).unwrap();
    assert_eq!(keys(&tree), ["age", "name"]);
    assert_eq!(tree.get("name").and_then(Tree::as_str), Some("bob"));
}

#[test]
fn flattened_none_splices_nothing() {
    let child_info = child_info();
    let info = Arc::new(RecordInfo::new(
        "Parent",
        [
            FieldInfo::new("id", FieldType::Primitive),
            FieldInfo::new("child", FieldType::record(&child_info))
                .with_default(Value::None)
                .with_options(FieldOptions::new().with_flatten(true)),
        ],
    ));
    let parent = info.construct(Arguments::new().with("id", 1)).unwrap();

    let tree = to_tree(&parent).unwrap();
    assert_eq!(to_json(&tree), json!({ "id": 1 }));
    assert_eq!(from_tree(&tree, &info).unwrap(), parent);

    // Any spliced key brings the record back.
    let present: Tree = serde_json::from_str(r#"{ "id": 1, "age": 3, "name": "leon" }"#).unwrap();
    let back = from_tree(&present, &info).unwrap();
    assert_eq!(back.field("child"), Some(&Value::Record(child(&child_info, 3.0, "leon"))));

    let partial: Tree = serde_json::from_str(r#"{ "id": 1, "name": "leon" }"#).unwrap();
    let error = from_tree(&partial, &info).unwrap_err();
    assert_eq!(error.path().to_string(), "Parent.child.age");
}

#[test]
fn flattened_tagged_none_round_trip() {
    let (a, b, table) = variants();
    let info = holder_info(
        FieldInfo::new("item", FieldType::union([&a, &b]))
            .with_default(Value::None)
            .with_options(
                FieldOptions::new()
                    .with_flatten(true)
                    .with_add_type(true)
                    .with_subtype_table(table),
            ),
    );
    let holder = info.construct(Arguments::new().with("id", 1)).unwrap();

    let tree = to_tree(&holder).unwrap();
    assert_eq!(to_json(&tree), json!({ "id": 1 }));
    assert_eq!(from_tree(&tree, &info).unwrap(), holder);
}

// -----------------------------------------------------------------------------
// Type tags

#[test]
fn type_tag_round_trip() {
    let (a, b, table) = variants();
    let info = holder_info(
        FieldInfo::new("item", FieldType::union([&a, &b])).with_options(
            FieldOptions::new()
                .with_add_type(true)
                .with_subtype_table(table),
        ),
    );
    let item = b.construct(Arguments::new().with("y", 2)).unwrap();
    let holder = info
        .construct(Arguments::new().with("id", 1).with("item", item))
        .unwrap();

    let tree = to_tree(&holder).unwrap();
    assert_eq!(
        to_json(&tree),
        json!({ "id": 1, "item": { "typ": "B", "y": 2 } })
    );
    assert_eq!(keys(tree.get("item").unwrap()), ["typ", "y"]);

    let back = from_tree(&tree, &info).unwrap();
    let item = back.field("item").and_then(Value::as_record).unwrap();
    assert_eq!(item.name(), "B");
    assert_eq!(back, holder);
}

#[test]
fn flattened_type_tag_uses_field_key() {
    let (a, b, table) = variants();
    let info = holder_info(
        FieldInfo::new("item", FieldType::union([&a, &b])).with_options(
            FieldOptions::new()
                .with_flatten(true)
                .with_add_type(true)
                .with_subtype_table(table),
        ),
    );
    let item = a.construct(Arguments::new().with("x", "ex")).unwrap();
    let holder = info
        .construct(Arguments::new().with("id", 1).with("item", item))
        .unwrap();

    let tree = to_tree(&holder).unwrap();
    assert_eq!(keys(&tree), ["id", "item", "x"]);
    assert_eq!(to_json(&tree), json!({ "id": 1, "item": "A", "x": "ex" }));

    assert_eq!(from_tree(&tree, &info).unwrap(), holder);
}

#[test]
fn tagged_list_items() {
    let (a, b, table) = variants();
    let info = holder_info(
        FieldInfo::new("item", FieldType::list(FieldType::union([&a, &b]))).with_options(
            FieldOptions::new()
                .with_add_type(AddType::Key("kind".into()))
                .with_subtype_table(table),
        ),
    );
    let items = vec![
        b.construct(Arguments::new().with("y", 1)).unwrap(),
        a.construct(Arguments::new().with("x", 2)).unwrap(),
    ];
    let holder = info
        .construct(Arguments::new().with("id", 1).with("item", items))
        .unwrap();

    let tree = to_tree(&holder).unwrap();
    assert_eq!(
        to_json(&tree),
        json!({ "id": 1, "item": [{ "kind": "B", "y": 1 }, { "kind": "A", "x": 2 }] })
    );
    assert_eq!(from_tree(&tree, &info).unwrap(), holder);
}

#[test]
fn custom_type_names_and_labels() {
    let (a, b, _) = variants();
    let table = Arc::new(TypeRegistry::new().with_as("a", &a).with_as("b", &b));
    let info = holder_info(
        FieldInfo::new("item", FieldType::union([&a, &b])).with_options(
            FieldOptions::new()
                .with_add_type(true)
                .with_type_label_key("type")
                .with_type_name(TypeName::With(|info| info.name().to_lowercase()))
                .with_subtype_table(table),
        ),
    );
    let item = a.construct(Arguments::new().with("x", 0)).unwrap();
    let holder = info
        .construct(Arguments::new().with("id", 1).with("item", item))
        .unwrap();

    let tree = to_tree(&holder).unwrap();
    assert_eq!(
        to_json(&tree),
        json!({ "id": 1, "item": { "type": "a", "x": 0 } })
    );
    assert_eq!(from_tree(&tree, &info).unwrap(), holder);

    let fixed = holder_info(
        FieldInfo::new("item", FieldType::record(&a)).with_options(
            FieldOptions::new()
                .with_add_type(true)
                .with_type_name(TypeName::Fixed("thing".into())),
        ),
    );
    let holder = fixed
        .construct(
            Arguments::new()
                .with("id", 1)
                .with("item", a.construct(Arguments::new().with("x", 0)).unwrap()),
        )
        .unwrap();
    let tree = to_tree(&holder).unwrap();
    assert_eq!(tree.get("item").and_then(|item| item.get("typ")), Some(&Tree::from("thing")));
}

#[test]
fn field_table_wins_over_driver_registry() {
    let (a, b, _) = variants();
    // The field table maps both labels to `A`, the driver registry is correct.
    let field_table = Arc::new(TypeRegistry::new().with_as("B", &a));
    let registry = TypeRegistry::new().with(&a).with(&b);

    let untabled = holder_info(
        FieldInfo::new("item", FieldType::union([&a, &b]))
            .with_options(FieldOptions::new().with_add_type(true)),
    );
    let tabled = holder_info(
        FieldInfo::new("item", FieldType::union([&a, &b])).with_options(
            FieldOptions::new()
                .with_add_type(true)
                .with_subtype_table(field_table),
        ),
    );
    let tree: Tree =
        serde_json::from_str(r#"{ "id": 1, "item": { "typ": "B", "x": 5, "y": 6 } }"#).unwrap();

    let driver = DeserializeDriver::new()
        .with_mode(BuildMode::Instance)
        .with_registry(&registry);

    let from_registry = driver.deserialize(&tree, &untabled).unwrap().into_instance().unwrap();
    assert_eq!(
        from_registry.field("item").and_then(Value::as_record).map(Record::name),
        Some("B")
    );

    let from_field = driver.deserialize(&tree, &tabled).unwrap().into_instance().unwrap();
    assert_eq!(
        from_field.field("item").and_then(Value::as_record).map(Record::name),
        Some("A")
    );
}

// -----------------------------------------------------------------------------
// Substitution

fn substituted_parent(child_info: &Arc<RecordInfo>, options: FieldOptions) -> Arc<RecordInfo> {
    parent_info(
        FieldInfo::new("childs", FieldType::list(FieldType::record(child_info)))
            .with_options(options),
    )
}

#[test]
fn substitution_round_trip() {
    let child_info = child_info();
    let info = substituted_parent(
        &child_info,
        FieldOptions::new().with_substitute_by_attribute("name"),
    );
    let leon = child(&child_info, 1.0, "leon");
    let nathan = child(&child_info, 2.0, "nathan");
    let parent = info
        .construct(
            Arguments::new()
                .with("childs", vec![leon.clone(), nathan.clone()])
                .with("name", "bob"),
        )
        .unwrap();

    let tree = to_tree(&parent).unwrap();
    assert_eq!(
        to_json(&tree),
        json!({ "childs": ["leon", "nathan"], "name": "bob" })
    );

    let mut index = CollectionIndex::new();
    index
        .insert_by_attribute("childs", "name", [nathan.clone(), leon.clone()])
        .unwrap();

    let back = DeserializeDriver::new()
        .with_mode(BuildMode::Instance)
        .with_index(&index)
        .deserialize(&tree, &info)
        .unwrap();
    assert_eq!(back, Deserialized::Instance(parent));

    let arguments = DeserializeDriver::new()
        .deserialize(&tree, &info)
        .unwrap()
        .into_arguments()
        .unwrap();
    assert_eq!(
        arguments.get("childs"),
        Some(&Value::List(vec![Value::from("leon"), Value::from("nathan")]))
    );
}

#[test]
fn substitution_uses_collection_name() {
    let child_info = child_info();
    let info = substituted_parent(
        &child_info,
        FieldOptions::new()
            .with_substitute_by_attribute("age")
            .with_collection_name("kids"),
    );
    let leon = child(&child_info, 1.0, "leon");

    let mut index = CollectionIndex::new();
    index.insert("kids", 1.0, leon.clone());

    let tree: Tree = serde_json::from_str(r#"{ "childs": [1.0], "name": "bob" }"#).unwrap();
    let parent = DeserializeDriver::new()
        .with_mode(BuildMode::Instance)
        .with_index(&index)
        .deserialize(&tree, &info)
        .unwrap()
        .into_instance()
        .unwrap();
    assert_eq!(
        parent.field("childs"),
        Some(&Value::List(vec![Value::Record(leon)]))
    );
}

#[test]
fn missing_reference_reports_path() {
    let child_info = child_info();
    let info = substituted_parent(
        &child_info,
        FieldOptions::new().with_substitute_by_attribute("name"),
    );
    let mut index = CollectionIndex::new();
    index.insert("childs", "leon", child(&child_info, 1.0, "leon"));

    let tree: Tree =
        serde_json::from_str(r#"{ "childs": ["leon", "nathan"], "name": "bob" }"#).unwrap();
    let error = DeserializeDriver::new()
        .with_mode(BuildMode::Instance)
        .with_index(&index)
        .deserialize(&tree, &info)
        .unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorKind::ReferenceLookup {
            bucket: String::from("childs"),
            key: ScalarKey::from("nathan"),
        }
    );
    assert_eq!(error.path().to_string(), "Parent.childs[1]");
}

#[test]
fn substitution_key_types() {
    let tagged = Arc::new(RecordInfo::new(
        "Tagged",
        [FieldInfo::new("tags", FieldType::list(FieldType::Primitive))],
    ));
    let info = parent_info(
        FieldInfo::new("childs", FieldType::record(&tagged))
            .with_options(FieldOptions::new().with_substitute_by_attribute("tags")),
    );
    let parent = info
        .construct(
            Arguments::new()
                .with(
                    "childs",
                    tagged
                        .construct(Arguments::new().with("tags", vec!["a"]))
                        .unwrap(),
                )
                .with("name", "bob"),
        )
        .unwrap();

    let error = to_tree(&parent).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::KeyType { found: "list", .. }
    ));
    assert_eq!(error.path().to_string(), "Parent.childs");

    let color = Arc::new(EnumInfo::new("Color", ["Red", "Blue"]));
    let painted = Arc::new(RecordInfo::new(
        "Painted",
        [FieldInfo::new("color", FieldType::enumeration(&color))],
    ));
    let info = parent_info(
        FieldInfo::new("childs", FieldType::record(&painted))
            .with_options(FieldOptions::new().with_substitute_by_attribute("color")),
    );
    let parent = info
        .construct(
            Arguments::new()
                .with(
                    "childs",
                    painted
                        .construct(Arguments::new().with("color", color.value("Blue").unwrap()))
                        .unwrap(),
                )
                .with("name", "bob"),
        )
        .unwrap();
    assert_eq!(
        to_json(&to_tree(&parent).unwrap()),
        json!({ "childs": "Blue", "name": "bob" })
    );
}

// -----------------------------------------------------------------------------
// Keys and defaults

#[test]
fn overwrite_key_round_trip() {
    let info = Arc::new(RecordInfo::new(
        "Child",
        [
            FieldInfo::new("age", FieldType::Primitive),
            FieldInfo::new("name", FieldType::Primitive)
                .with_options(FieldOptions::new().with_overwrite_key("no_name")),
        ],
    ));
    let leon = child(&info, 3.0, "leon");

    let tree = to_tree(&leon).unwrap();
    assert_eq!(keys(&tree), ["age", "no_name"]);
    assert!(tree.get("name").is_none());

    let arguments = DeserializeDriver::new()
        .deserialize(&tree, &info)
        .unwrap()
        .into_arguments()
        .unwrap();
    assert_eq!(arguments.get("name").and_then(Value::as_str), Some("leon"));
    assert_eq!(from_tree(&tree, &info).unwrap(), leon);
}

#[test]
fn absent_and_null_fall_back_to_defaults() {
    let info = Arc::new(RecordInfo::new(
        "Child",
        [
            FieldInfo::new("age", FieldType::Primitive).with_default(0),
            FieldInfo::new("name", FieldType::Primitive),
        ],
    ));

    let tree: Tree = serde_json::from_str(r#"{ "age": null, "name": "leon" }"#).unwrap();
    let arguments = DeserializeDriver::new()
        .deserialize(&tree, &info)
        .unwrap()
        .into_arguments()
        .unwrap();
    assert!(!arguments.contains("age"));

    let leon = from_tree(&tree, &info).unwrap();
    assert_eq!(leon.field("age"), Some(&Value::Int(0)));

    let tree: Tree = serde_json::from_str(r#"{ "age": 4 }"#).unwrap();
    let error = from_tree(&tree, &info).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorKind::MissingKey {
            key: String::from("name")
        }
    );
    assert_eq!(error.path().to_string(), "Child.name");
}

#[test]
fn arguments_mode_keeps_nested_mappings() {
    let child_info = child_info();
    let info = parent_info(FieldInfo::new(
        "childs",
        FieldType::list(FieldType::record(&child_info)),
    ));
    let tree: Tree = serde_json::from_str(
        r#"{ "childs": [{ "age": 1.0, "name": "leon" }], "name": "bob" }"#,
    )
    .unwrap();

    let arguments = DeserializeDriver::new()
        .deserialize(&tree, &info)
        .unwrap()
        .into_arguments()
        .unwrap();
    let childs = arguments.get("childs").and_then(Value::as_list).unwrap().to_vec();
    let first = childs[0].as_map().unwrap();
    assert_eq!(first.get("name").and_then(Value::as_str), Some("leon"));

    // Arguments can be edited before construction.
    let mut arguments = arguments;
    arguments.insert("name", "carl");
    let mut childs_args: Vec<Value> = Vec::new();
    for item in &childs {
        let item = Arguments::from_map(item.as_map().unwrap().clone());
        childs_args.push(child_info.construct(item).unwrap().into());
    }
    arguments.insert("childs", Value::List(childs_args));
    let parent = info.construct(arguments).unwrap();
    assert_eq!(parent.field("name").and_then(Value::as_str), Some("carl"));
}

// -----------------------------------------------------------------------------
// Enums

#[test]
fn enum_round_trip() {
    let color = Arc::new(EnumInfo::new("Color", ["Red", "Green"]));
    let info = Arc::new(RecordInfo::new(
        "Pixel",
        [FieldInfo::new("color", FieldType::enumeration(&color))],
    ));
    let pixel = info
        .construct(Arguments::new().with("color", color.value("Green").unwrap()))
        .unwrap();

    let tree = to_tree(&pixel).unwrap();
    assert_eq!(to_json(&tree), json!({ "color": "Green" }));
    assert_eq!(from_tree(&tree, &info).unwrap(), pixel);

    let tree: Tree = serde_json::from_str(r#"{ "color": "Blue" }"#).unwrap();
    assert_eq!(
        from_tree(&tree, &info).unwrap_err().into_kind(),
        ErrorKind::UnknownVariant {
            enum_name: String::from("Color"),
            variant: String::from("Blue"),
        }
    );
}

// -----------------------------------------------------------------------------
// Errors

#[test]
fn add_type_without_table_fails_on_deserialize() {
    let (a, _, _) = variants();
    let info = holder_info(
        FieldInfo::new("item", FieldType::record(&a))
            .with_options(FieldOptions::new().with_add_type(true)),
    );
    let holder = info
        .construct(
            Arguments::new()
                .with("id", 1)
                .with("item", a.construct(Arguments::new().with("x", 1)).unwrap()),
        )
        .unwrap();

    // Serialization needs no table.
    let tree = to_tree(&holder).unwrap();
    assert_eq!(to_json(&tree), json!({ "id": 1, "item": { "typ": "A", "x": 1 } }));

    let error = DeserializeDriver::new().deserialize(&tree, &info).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorKind::Configuration(ConfigError::AddTypeWithoutTable)
    );
    assert_eq!(error.path().to_string(), "Holder.item");
}

#[test]
fn invalid_flatten_fails() {
    let child_info = child_info();
    let info = parent_info(
        FieldInfo::new("childs", FieldType::list(FieldType::record(&child_info)))
            .with_options(FieldOptions::new().with_flatten(true)),
    );
    let parent = info
        .construct(
            Arguments::new()
                .with("childs", vec![child(&child_info, 1.0, "leon")])
                .with("name", "bob"),
        )
        .unwrap();
    assert_eq!(
        to_tree(&parent).unwrap_err().into_kind(),
        ErrorKind::Configuration(ConfigError::FlattenCollection)
    );

    let tree: Tree = serde_json::from_str(r#"{ "name": "bob" }"#).unwrap();
    assert_eq!(
        from_tree(&tree, &info).unwrap_err().into_kind(),
        ErrorKind::Configuration(ConfigError::FlattenCollection)
    );

    let info = Arc::new(RecordInfo::new(
        "Flat",
        [FieldInfo::new("age", FieldType::Primitive)
            .with_options(FieldOptions::new().with_flatten(true))],
    ));
    let flat = info.construct(Arguments::new().with("age", 1)).unwrap();
    assert!(matches!(
        to_tree(&flat).unwrap_err().kind(),
        ErrorKind::Configuration(ConfigError::FlattenNonRecord(_))
    ));
}

#[test]
fn conflicting_substitution_options_fail() {
    let child_info = child_info();
    let info = parent_info(
        FieldInfo::new("childs", FieldType::record(&child_info)).with_options(
            FieldOptions::new()
                .with_substitute_by_attribute("name")
                .with_flatten(true),
        ),
    );
    let parent = info
        .construct(
            Arguments::new()
                .with("childs", child(&child_info, 1.0, "leon"))
                .with("name", "bob"),
        )
        .unwrap();
    assert_eq!(
        to_tree(&parent).unwrap_err().into_kind(),
        ErrorKind::Configuration(ConfigError::FlattenWithSubstitute)
    );

    let info = parent_info(
        FieldInfo::new("childs", FieldType::record(&child_info)).with_options(
            FieldOptions::new()
                .with_substitute_by_attribute("name")
                .with_add_type(true),
        ),
    );
    let tree: Tree = serde_json::from_str(r#"{ "childs": "leon", "name": "bob" }"#).unwrap();
    assert_eq!(
        from_tree(&tree, &info).unwrap_err().into_kind(),
        ErrorKind::Configuration(ConfigError::SubstituteWithAddType)
    );
}

#[test]
fn type_tag_errors() {
    let (a, b, table) = variants();
    let info = holder_info(
        FieldInfo::new("item", FieldType::union([&a, &b])).with_options(
            FieldOptions::new()
                .with_add_type(true)
                .with_subtype_table(table),
        ),
    );

    let unknown: Tree = serde_json::from_str(r#"{ "id": 1, "item": { "typ": "C" } }"#).unwrap();
    assert_eq!(
        from_tree(&unknown, &info).unwrap_err().into_kind(),
        ErrorKind::UnknownType {
            tag: String::from("C")
        }
    );

    let missing: Tree = serde_json::from_str(r#"{ "id": 1, "item": { "x": 1 } }"#).unwrap();
    assert_eq!(
        from_tree(&missing, &info).unwrap_err().into_kind(),
        ErrorKind::MissingKey {
            key: String::from("typ")
        }
    );

    let numeric: Tree = serde_json::from_str(r#"{ "id": 1, "item": { "typ": 3 } }"#).unwrap();
    assert!(matches!(
        from_tree(&numeric, &info).unwrap_err().into_kind(),
        ErrorKind::TypeMismatch { .. }
    ));

    let untagged = holder_info(FieldInfo::new("item", FieldType::union([&a, &b])));
    let tree: Tree = serde_json::from_str(r#"{ "id": 1, "item": { "x": 1 } }"#).unwrap();
    assert_eq!(
        from_tree(&tree, &untagged).unwrap_err().into_kind(),
        ErrorKind::Configuration(ConfigError::UnionWithoutTypeTag)
    );
}

#[test]
fn field_named_like_the_type_tag() {
    let clash = Arc::new(RecordInfo::new(
        "Clash",
        [FieldInfo::new("typ", FieldType::Primitive)],
    ));
    let table = Arc::new(TypeRegistry::new().with(&clash));
    let info = holder_info(
        FieldInfo::new("item", FieldType::record(&clash)).with_options(
            FieldOptions::new()
                .with_add_type(true)
                .with_subtype_table(table),
        ),
    );
    let expected = ErrorKind::Configuration(ConfigError::TypeTagCollision {
        record: String::from("Clash"),
        key: String::from("typ"),
    });

    let item = clash.construct(Arguments::new().with("typ", "zzz")).unwrap();
    let holder = info
        .construct(Arguments::new().with("id", 1).with("item", item))
        .unwrap();
    let error = to_tree(&holder).unwrap_err();
    assert_eq!(error.path().to_string(), "Holder.item");
    assert_eq!(error.into_kind(), expected);

    let tree: Tree = serde_json::from_str(r#"{ "id": 1, "item": { "typ": "Clash" } }"#).unwrap();
    let error = from_tree(&tree, &info).unwrap_err();
    assert_eq!(error.path().to_string(), "Holder.item");
    assert_eq!(error.into_kind(), expected);

    // A different tag key avoids the clash.
    let relabeled = holder_info(
        FieldInfo::new("item", FieldType::record(&clash)).with_options(
            FieldOptions::new()
                .with_add_type(AddType::Key("kind".into()))
                .with_subtype_table(Arc::new(TypeRegistry::new().with(&clash))),
        ),
    );
    let holder = relabeled
        .construct(Arguments::new().with("id", 1).with("item", holder.field("item").unwrap().clone()))
        .unwrap();
    let tree = to_tree(&holder).unwrap();
    assert_eq!(
        to_json(&tree),
        json!({ "id": 1, "item": { "kind": "Clash", "typ": "zzz" } })
    );
    assert_eq!(from_tree(&tree, &relabeled).unwrap(), holder);
}

#[test]
fn top_level_type_mismatch() {
    let error = SerializeDriver::new().serialize(&Value::Int(3)).unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::TypeMismatch { .. }));
    assert_eq!(error.path().to_string(), "$");

    let info = child_info();
    let leon = child(&info, 1.0, "leon");
    assert_eq!(
        SerializeDriver::new().serialize(&Value::Record(leon.clone())).unwrap(),
        to_tree(&leon).unwrap()
    );

    let tree = to_tree(&leon).unwrap();
    let error = DeserializeDriver::new()
        .deserialize_as(&tree, &FieldType::Primitive)
        .unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::TypeMismatch { .. }));
    assert!(
        DeserializeDriver::new()
            .deserialize_as(&tree, &FieldType::record(&info))
            .is_ok()
    );

    let error = from_tree(&Tree::Seq(vec![]), &info).unwrap_err();
    assert_eq!(
        error.into_kind(),
        ErrorKind::TypeMismatch {
            expected: String::from("mapping"),
            found: String::from("sequence"),
        }
    );
}

#[test]
fn construction_errors_carry_path() {
    fn adult(info: &Arc<RecordInfo>, arguments: Arguments) -> Result<Record, ConstructError> {
        match arguments.get("age").and_then(Value::as_f64) {
            Some(age) if age >= 18.0 => info.construct_default(arguments),
            _ => Err(ConstructError::Rejected {
                record: info.name().to_string(),
                reason: String::from("too young"),
            }),
        }
    }

    let adult_info = Arc::new(
        RecordInfo::new(
            "Adult",
            [
                FieldInfo::new("age", FieldType::Primitive),
                FieldInfo::new("name", FieldType::Primitive),
            ],
        )
        .with_constructor(adult),
    );
    let info = parent_info(FieldInfo::new(
        "childs",
        FieldType::list(FieldType::record(&adult_info)),
    ));
    let tree: Tree = serde_json::from_str(
        r#"{ "childs": [{ "age": 30, "name": "ann" }, { "age": 3, "name": "leon" }], "name": "bob" }"#,
    )
    .unwrap();

    let error = from_tree(&tree, &info).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::Construct(ConstructError::Rejected { .. })
    ));
    assert_eq!(error.path().to_string(), "Parent.childs[1]");

    // Arguments mode never constructs.
    assert!(DeserializeDriver::new().deserialize(&tree, &info).is_ok());
}

// -----------------------------------------------------------------------------
// Hand-off to serde formats

#[test]
fn hand_off_to_serde_formats() {
    #[derive(::serde::Deserialize, Debug, PartialEq)]
    struct ChildRow {
        age: f64,
        name: String,
    }

    let info = child_info();
    let leon = child(&info, 7.5, "leon");
    let tree = to_tree(&leon).unwrap();

    let row: ChildRow = serde_json::from_value(to_json(&tree)).unwrap();
    assert_eq!(
        row,
        ChildRow {
            age: 7.5,
            name: String::from("leon"),
        }
    );

    let text = ron::to_string(&tree).unwrap();
    let back: Tree = ron::from_str(&text).unwrap();
    assert_eq!(from_tree(&back, &info).unwrap(), leon);
}
