//! Project

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

crate::wire_enum! {
    /// Lifecycle state of a project
    pub enum ProjectLifecycleState {
        Creating = "CREATING",
        Active = "ACTIVE",
        Deleted = "DELETED",
    }
}

crate::wire_model! {
    /// Parent of a project (organization or folder)
    pub struct ResourceId {
        type_: String => "type" as "type",
        id: String => "id",
    }
}

crate::wire_model! {
    /// A project as returned by the resource manager API
    pub struct Project {
        project_id: String => "projectId",
        name: String => "name",
        project_number: i64 => "projectNumber",
        lifecycle_state: ProjectLifecycleState => "lifecycleState",
        labels: BTreeMap<String, String> => "labels",
        create_time: DateTime<Utc> => "createTime",
        parent: ResourceId => "parent",
    }
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.lifecycle_state.get() == Some(&ProjectLifecycleState::Active)
    }
}

/// Keep only projects in the `ACTIVE` state.
pub fn active_projects(projects: Vec<Project>) -> Vec<Project> {
    projects.into_iter().filter(Project::is_active).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HydrateError;
    use crate::model::{hydrate, Advisory, Field, Hydrator, Model};
    use serde_json::json;

    #[test]
    fn test_known_lifecycle_state() {
        let project: Project = hydrate(&json!({"lifecycleState": "ACTIVE"})).unwrap();
        assert_eq!(
            project.lifecycle_state,
            Field::Set(ProjectLifecycleState::Active)
        );
        assert!(project.is_active());
    }

    #[test]
    fn test_unknown_lifecycle_state_uses_sentinel() {
        let mut log: Vec<Advisory> = Vec::new();
        let project: Project = Hydrator::new(&mut log)
            .hydrate(&json!({"lifecycleState": "PAUSED"}))
            .unwrap();
        assert_eq!(
            project.to_hash()["lifecycle_state"],
            json!("UNKNOWN_ENUM_VALUE")
        );
        assert_eq!(log.len(), 1);
        assert!(!project.is_active());
    }

    #[test]
    fn test_wire_and_local_key_together_is_rejected() {
        let err = hydrate::<Project>(&json!({
            "lifecycleState": "ACTIVE",
            "lifecycle_state": "DELETED"
        }))
        .unwrap_err();
        assert_eq!(
            err,
            HydrateError::DuplicateAttribute {
                model: "Project",
                local: "lifecycle_state",
                wire: "lifecycleState",
            }
        );
    }

    #[test]
    fn test_local_keys_are_accepted() {
        let project: Project = hydrate(&json!({
            "project_id": "demo-123",
            "project_number": "415104041262"
        }))
        .unwrap();
        assert_eq!(project.project_id.get().map(String::as_str), Some("demo-123"));
        assert_eq!(project.project_number, Field::Set(415104041262));
    }

    #[test]
    fn test_nested_parent_keeps_type_attribute() {
        let project: Project = hydrate(&json!({
            "parent": {"type": "organization", "id": "1234"}
        }))
        .unwrap();
        let parent = project.parent.get().unwrap();
        assert_eq!(parent.type_.get().map(String::as_str), Some("organization"));
        assert_eq!(
            project.to_hash()["parent"],
            json!({"type": "organization", "id": "1234"})
        );
    }

    #[test]
    fn test_attribute_map_lookups() {
        assert_eq!(
            Project::attribute("create_time").map(|a| a.wire),
            Some("createTime")
        );
        assert_eq!(
            Project::attribute_by_wire("projectNumber").map(|a| a.local),
            Some("project_number")
        );
        assert!(Project::attribute("createTime").is_none());
    }

    #[test]
    fn test_active_projects_filter() {
        let projects = vec![
            hydrate::<Project>(&json!({"projectId": "a", "lifecycleState": "ACTIVE"})).unwrap(),
            hydrate::<Project>(&json!({"projectId": "b", "lifecycleState": "DELETED"})).unwrap(),
            hydrate::<Project>(&json!({"projectId": "c"})).unwrap(),
        ];
        let active = active_projects(projects);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].project_id, Field::Set("a".to_string()));
    }
}
