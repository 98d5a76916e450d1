//! Property-based tests using proptest
//!
//! These tests verify enum substitution, subtype resolution, round-tripping
//! and the equality/hash contract using randomized payloads.

use chrono::{DateTime, SecondsFormat, Utc};
use cloudhydrate::model::{
    hydrate, hydrate_polymorphic, resolve_subtype, Hydrator, Model, Polymorphic, SilentAdvisory, WireEnum,
};
use cloudhydrate::models::{
    Instance, Project, ProjectLifecycleState, TrafficNode, TrafficNodeKind, VnicAttachment,
};
use cloudhydrate::payload;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Lifecycle states, mostly known, sometimes something new
fn arb_lifecycle() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop_oneof!["CREATING", "ACTIVE", "DELETED"].prop_map(String::from),
        1 => "[A-Z_]{1,16}",
    ]
}

/// Generate arbitrary project payloads (wire keys)
fn arb_project() -> impl Strategy<Value = Value> {
    (
        "[a-z][a-z0-9-]{0,29}", // projectId
        "[A-Za-z0-9 ]{0,20}",   // name
        any::<i64>(),
        arb_lifecycle(),
        prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9-]{0,12}", 0..5),
        0i64..4_000_000_000,
        prop::option::of(("organization|folder", "[0-9]{1,12}")),
    )
        .prop_map(
            |(project_id, name, number, state, labels, created, parent)| {
                let mut payload = json!({
                    "projectId": project_id,
                    "name": name,
                    "projectNumber": number,
                    "lifecycleState": state,
                    "labels": labels,
                });
                if let Some(time) = DateTime::<Utc>::from_timestamp(created, 0) {
                    payload["createTime"] =
                        json!(time.to_rfc3339_opts(SecondsFormat::Secs, true));
                }
                if let Some((kind, id)) = parent {
                    payload["parent"] = json!({"type": kind, "id": id});
                }
                payload
            },
        )
}

/// Generate a traffic node payload with a known or unknown discriminator
fn arb_traffic_node() -> impl Strategy<Value = Value> {
    (
        prop_oneof![
            Just("VISIBLE".to_string()),
            Just("INVISIBLE".to_string()),
            Just("ACCESS_DENIED".to_string()),
            "[A-Z_]{1,12}",
        ],
        "ocid1\\.[a-z]{3,8}\\.[a-z0-9]{4,10}",
    )
        .prop_map(|(kind, entity)| json!({"type": kind, "entityId": entity}))
}

/// Generate an instance payload whose source details are an image, a boot
/// volume, or a source type this client does not know
fn arb_instance() -> impl Strategy<Value = Value> {
    let source = prop_oneof![
        ("ocid1\\.image\\.[a-z0-9]{4,10}", 50i64..32_768).prop_map(|(image, size)| {
            json!({"sourceType": "image", "imageId": image, "bootVolumeSizeInGBs": size})
        }),
        "ocid1\\.bootvolume\\.[a-z0-9]{4,10}".prop_map(|volume| {
            json!({"sourceType": "bootVolume", "bootVolumeId": volume})
        }),
        "[a-z]{3,10}".prop_map(|kind| json!({"sourceType": kind})),
    ];
    ("ocid1\\.instance\\.[a-z0-9]{4,10}", "[A-Za-z0-9-]{0,16}", source).prop_map(
        |(id, name, source)| json!({"id": id, "displayName": name, "sourceDetails": source}),
    )
}

/// Rename wire keys to their local names
fn to_local_keys<M: Model>(payload: &Value) -> Value {
    let Some(map) = payload.as_object() else {
        return payload.clone();
    };
    let renamed: Map<String, Value> = map
        .iter()
        .map(|(key, value)| {
            let local = M::attribute_by_wire(key).map_or(key.as_str(), |a| a.local);
            (local.to_string(), value.clone())
        })
        .collect();
    Value::Object(renamed)
}

proptest! {
    /// Unknown enum values become the sentinel, known values are kept
    #[test]
    fn enum_substitution(state in arb_lifecycle()) {
        let project: Project = hydrate(&json!({"lifecycleState": state})).unwrap();
        let value = project.lifecycle_state.get().copied().unwrap();

        if ProjectLifecycleState::ALLOWED.contains(&state.as_str()) {
            prop_assert_eq!(value.as_wire_str(), state.as_str());
            prop_assert!(!value.is_unknown());
        } else {
            prop_assert!(value.is_unknown());
        }
    }

    /// Plain rendering hydrates back to an equal model
    #[test]
    fn to_hash_round_trips(payload in arb_project()) {
        let project: Project = hydrate(&payload).unwrap();
        let again: Project = hydrate(&Value::Object(project.to_hash())).unwrap();
        prop_assert_eq!(&project, &again);

        let via_wire: Project = hydrate(&Value::Object(project.to_wire())).unwrap();
        prop_assert_eq!(&project, &via_wire);
    }

    /// Polymorphic attributes keep their subtype through plain rendering
    #[test]
    fn source_details_round_trip(payload in arb_instance()) {
        let instance: Instance = hydrate(&payload).unwrap();
        let again: Instance = hydrate(&Value::Object(instance.to_hash())).unwrap();
        prop_assert_eq!(&instance, &again);

        let via_wire: Instance = hydrate(&Value::Object(instance.to_wire())).unwrap();
        prop_assert_eq!(&instance, &via_wire);
    }

    /// Hydrating the same payload into the same instance twice changes nothing
    #[test]
    fn hydration_is_idempotent(payload in arb_project()) {
        let mut log = SilentAdvisory;
        let mut cx = Hydrator::new(&mut log);
        let mut project = Project::default();

        cx.hydrate_into(&mut project, &payload).unwrap();
        let once = project.clone();
        cx.hydrate_into(&mut project, &payload).unwrap();
        prop_assert_eq!(project, once);
    }

    /// Equal models hash equally, whichever key style they came from
    #[test]
    fn equality_is_consistent_with_hash(payload in arb_project()) {
        let by_wire: Project = hydrate(&payload).unwrap();
        let by_local: Project = hydrate(&to_local_keys::<Project>(&payload)).unwrap();

        prop_assert_eq!(&by_wire, &by_local);
        prop_assert_eq!(&by_local, &by_wire);
        prop_assert_eq!(hash_of(&by_wire), hash_of(&by_local));
    }

    /// Each declared discriminator maps to its subtype; anything else to the base
    #[test]
    fn subtype_resolution(payload in arb_traffic_node()) {
        let discriminator = payload["type"].as_str().unwrap_or_default().to_string();
        let kind = resolve_subtype::<TrafficNode>(&payload);
        let expected = TrafficNode::SUBTYPES
            .iter()
            .find(|(value, _)| *value == discriminator)
            .map_or(TrafficNodeKind::Base, |(_, kind)| *kind);
        prop_assert_eq!(kind, expected);

        let mut log = SilentAdvisory;
        let node: TrafficNode = hydrate_polymorphic(&payload, &mut Hydrator::new(&mut log)).unwrap();
        prop_assert_eq!(node.kind(), expected);
        prop_assert_eq!(node.node_type(), Some(discriminator.as_str()));
    }

    /// Numeric strings and numbers hydrate to the same integer
    #[test]
    fn integer_strings_are_coerced(n in any::<i64>()) {
        let from_number: VnicAttachment = hydrate(&json!({"nicIndex": n})).unwrap();
        let from_string: VnicAttachment = hydrate(&json!({"nicIndex": n.to_string()})).unwrap();
        prop_assert_eq!(from_number, from_string);
    }
}

/// Tests for response envelope selection
mod envelope_tests {
    use super::*;

    proptest! {
        /// Indexing into a selected list returns the same item as `items`
        #[test]
        fn select_index_matches_items(projects in prop::collection::vec(arb_project(), 1..10)) {
            let response = json!({"data": {"items": projects}});
            let listed = payload::items(payload::select(&response, "data.items"));
            prop_assert_eq!(listed.len(), projects.len());

            for (i, project) in projects.iter().enumerate() {
                let selected = payload::select(&response, &format!("data.items.{}", i));
                prop_assert_eq!(selected, project);
                prop_assert_eq!(listed[i], project);
            }
        }

        /// Missing paths select null
        #[test]
        fn missing_path_is_null(project in arb_project()) {
            prop_assert_eq!(payload::select(&project, "no.such.key"), &Value::Null);
        }
    }
}
