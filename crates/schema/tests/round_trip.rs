//! SDL reconstructed from an introspection fixture must parse back into a
//! schema with the same structure the introspection described.

use gqlsh_introspect::{IntrospectionData, IntrospectionSchema, IntrospectionType};
use gqlsh_schema::{OperationType, SchemaCatalog, TypeKind};
use gqlsh_test_utils::fixtures::blog_introspection_data;

fn introspection() -> IntrospectionSchema {
    let data: IntrospectionData = serde_json::from_value(blog_introspection_data()).unwrap();
    data.schema
}

#[test]
fn test_root_type_names_survive() {
    let introspection = introspection();
    let catalog = SchemaCatalog::from_introspection(&introspection).unwrap();

    assert_eq!(
        catalog.root_type_name(OperationType::Query),
        introspection.query_type.as_ref().map(|t| t.name.as_str())
    );
    assert_eq!(
        catalog.root_type_name(OperationType::Mutation),
        introspection.mutation_type.as_ref().map(|t| t.name.as_str())
    );
    assert_eq!(catalog.root_type_name(OperationType::Subscription), None);
}

#[test]
fn test_field_names_and_argument_shapes_survive() {
    let introspection = introspection();
    let catalog = SchemaCatalog::from_introspection(&introspection).unwrap();

    for introspected in &introspection.types {
        let fields = match introspected {
            IntrospectionType::Object(object) => &object.fields,
            IntrospectionType::Interface(interface) => &interface.fields,
            _ => continue,
        };
        if introspected.is_meta() {
            continue;
        }

        let catalog_type = catalog
            .get_type(introspected.name())
            .unwrap_or_else(|| panic!("type {} missing", introspected.name()));

        let expected: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        let actual: Vec<&str> = catalog_type.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(actual, expected, "fields of {}", introspected.name());

        for field in fields {
            let parsed = catalog_type.field(&field.name).unwrap();
            assert_eq!(parsed.type_ref, field.type_ref, "{}.{}", introspected.name(), field.name);
            assert_eq!(parsed.is_deprecated, field.is_deprecated);

            let expected_args: Vec<(String, String, Option<String>)> = field
                .args
                .iter()
                .map(|a| (a.name.clone(), a.type_ref.to_string(), a.default_value.clone()))
                .collect();
            let actual_args: Vec<(String, String, Option<String>)> = parsed
                .arguments
                .iter()
                .map(|a| (a.name.clone(), a.type_ref.to_string(), a.default_value.clone()))
                .collect();
            assert_eq!(actual_args, expected_args, "{}.{}", introspected.name(), field.name);
        }
    }
}

#[test]
fn test_kinds_members_and_values_survive() {
    let catalog = SchemaCatalog::from_introspection(&introspection()).unwrap();

    let user = catalog.get_type("User").unwrap();
    assert_eq!(user.kind, TypeKind::Object);
    assert_eq!(user.interfaces, ["Node"]);
    assert_eq!(user.description.as_deref(), Some("A registered account"));

    let search = catalog.get_type("SearchResult").unwrap();
    assert_eq!(search.kind, TypeKind::Union);
    assert_eq!(search.members, ["User", "Post"]);

    let role = catalog.get_type("Role").unwrap();
    let values: Vec<&str> = role.enum_values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(values, ["ADMIN", "MEMBER", "GUEST"]);
    assert_eq!(role.enum_values[2].deprecation_reason.as_deref(), Some("Use MEMBER"));

    let input = catalog.get_type("CreateUserInput").unwrap();
    assert_eq!(input.kind, TypeKind::InputObject);
    assert_eq!(input.input_fields[2].default_value.as_deref(), Some("MEMBER"));

    assert_eq!(catalog.get_type("DateTime").unwrap().kind, TypeKind::Scalar);
    assert_eq!(catalog.custom_directives(), ["cacheControl"]);
}

#[test]
fn test_multi_line_description_text_survives() {
    let introspection = introspection();
    let catalog = SchemaCatalog::from_introspection(&introspection).unwrap();

    let expected = introspection
        .types
        .iter()
        .find_map(|t| match t {
            IntrospectionType::Object(o) if o.name == "User" => o
                .fields
                .iter()
                .find(|f| f.name == "email")
                .and_then(|f| f.description.clone()),
            _ => None,
        })
        .unwrap();
    assert!(expected.contains('\n'));

    // The block string keeps the field indent on its first body line.
    let email = catalog.field("User", "email").unwrap();
    assert_eq!(email.description.as_deref().map(str::trim), Some(expected.as_str()));
}

#[test]
fn test_multi_line_deprecation_reasons_survive() {
    let reason = "Use new.\nRemoved in v2.";
    let data: IntrospectionData = serde_json::from_value(serde_json::json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "mutationType": null,
            "subscriptionType": null,
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "description": "line one\rline two",
                    "fields": [
                        {
                            "name": "old",
                            "description": null,
                            "args": [],
                            "type": { "kind": "SCALAR", "name": "String", "ofType": null },
                            "isDeprecated": true,
                            "deprecationReason": reason
                        },
                        {
                            "name": "state",
                            "description": null,
                            "args": [],
                            "type": { "kind": "ENUM", "name": "State", "ofType": null },
                            "isDeprecated": false,
                            "deprecationReason": null
                        }
                    ],
                    "inputFields": null,
                    "interfaces": [],
                    "enumValues": null,
                    "possibleTypes": null
                },
                {
                    "kind": "ENUM",
                    "name": "State",
                    "description": null,
                    "fields": null,
                    "inputFields": null,
                    "interfaces": null,
                    "enumValues": [
                        {
                            "name": "CURRENT",
                            "description": null,
                            "isDeprecated": false,
                            "deprecationReason": null
                        },
                        {
                            "name": "LEGACY",
                            "description": null,
                            "isDeprecated": true,
                            "deprecationReason": reason
                        }
                    ],
                    "possibleTypes": null
                }
            ],
            "directives": []
        }
    }))
    .unwrap();

    let catalog = SchemaCatalog::from_introspection(&data.schema).unwrap();

    let old = catalog.field("Query", "old").unwrap();
    assert!(old.is_deprecated);
    assert_eq!(old.deprecation_reason.as_deref(), Some(reason));

    let state = catalog.get_type("State").unwrap();
    assert_eq!(state.enum_values[1].deprecation_reason.as_deref(), Some(reason));

    assert_eq!(
        catalog.get_type("Query").unwrap().description.as_deref(),
        Some("line one\rline two")
    );
}
