//! Application records as served by the controller.
//!
//! # Design
//! The public REST surface returns only `id`, `name` and `description`; the
//! RESTUI surface returns the full record including `applicationTypeInfo`.
//! Both decode into the same `Application`, so every field defaults when it is
//! absent or `null`. Fields whose shape the controller does not contract
//! (`runningSince`, `visualization`, `environmentProperties`) stay as raw
//! `serde_json::Value`. Unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A snapshot of a business application monitored by the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name_unique: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub built_in: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub created_by: String,
    /// Epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub created_on: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub modified_by: String,
    /// Epoch milliseconds.
    #[serde(deserialize_with = "null_as_default")]
    pub modified_on: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub template: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub running: bool,
    pub running_since: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub deploy_workflow_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub undeploy_workflow_id: i64,
    pub visualization: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub environment_properties: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub eum_app_name: String,
    /// Only populated by the RESTUI endpoint.
    #[serde(deserialize_with = "null_as_default")]
    pub application_type_info: ApplicationTypeInfo,
}

/// Which application types and end-user monitoring modes apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationTypeInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub application_types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub eum_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub eum_web_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub eum_mobile_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub eum_iot_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_eum_web_entities: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_mobile_apps: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_tiers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_mobile_apps: i64,
}

/// Response envelope of `getApplicationsAllTypes`. Only the APM list is kept;
/// a missing `apmApplications` field is a decode error.
#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationsAllTypes {
    #[serde(rename = "apmApplications", deserialize_with = "null_as_default")]
    pub(crate) applications: Vec<Application>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rest_shape_decodes_with_defaults() {
        let app: Application =
            serde_json::from_str(r#"{"id":7,"name":"ECommerce","description":""}"#).unwrap();
        assert_eq!(app.id, 7);
        assert_eq!(app.name, "ECommerce");
        assert_eq!(app.version, 0);
        assert!(app.running_since.is_null());
        assert!(app.environment_properties.is_empty());
        assert_eq!(app.application_type_info, ApplicationTypeInfo::default());
    }

    #[test]
    fn full_shape_decodes_every_field() {
        let raw = json!({
            "id": 12,
            "version": 4,
            "name": "Payments",
            "nameUnique": true,
            "builtIn": false,
            "createdBy": "admin",
            "createdOn": 1_577_836_800_000_i64,
            "modifiedBy": "ops",
            "modifiedOn": 1_609_459_200_000_i64,
            "description": "card processing",
            "template": false,
            "active": true,
            "running": true,
            "runningSince": 1_609_459_200_000_i64,
            "deployWorkflowId": 3,
            "undeployWorkflowId": 5,
            "visualization": {"layout": "grid"},
            "environmentProperties": [{"name": "region", "value": "eu"}],
            "eumAppName": "payments-web",
            "applicationTypeInfo": {
                "applicationTypes": ["APM", "EUM_WEB"],
                "eumEnabled": true,
                "eumWebEnabled": true,
                "eumMobileEnabled": false,
                "eumIotEnabled": false,
                "hasEumWebEntities": true,
                "hasMobileApps": false,
                "hasTiers": true,
                "numberOfMobileApps": 0
            }
        });
        let app: Application = serde_json::from_value(raw).unwrap();
        assert_eq!(app.version, 4);
        assert!(app.name_unique);
        assert_eq!(app.created_on, 1_577_836_800_000);
        assert_eq!(app.modified_by, "ops");
        assert_eq!(app.deploy_workflow_id, 3);
        assert_eq!(app.undeploy_workflow_id, 5);
        assert_eq!(app.visualization["layout"], "grid");
        assert_eq!(app.environment_properties.len(), 1);
        assert_eq!(app.eum_app_name, "payments-web");
        assert_eq!(app.application_type_info.application_types, vec!["APM", "EUM_WEB"]);
        assert!(app.application_type_info.has_tiers);
    }

    #[test]
    fn opaque_fields_accept_null_and_any_shape() {
        let app: Application = serde_json::from_value(json!({
            "id": 1,
            "runningSince": null,
            "visualization": null,
            "environmentProperties": null
        }))
        .unwrap();
        assert!(app.running_since.is_null());
        assert!(app.visualization.is_null());
        assert!(app.environment_properties.is_empty());

        let app: Application = serde_json::from_value(json!({
            "id": 1,
            "runningSince": "2021-01-01T00:00:00Z",
            "visualization": [1, 2, 3],
            "environmentProperties": ["a", 1, {"k": "v"}, null]
        }))
        .unwrap();
        assert_eq!(app.running_since, json!("2021-01-01T00:00:00Z"));
        assert_eq!(app.visualization, json!([1, 2, 3]));
        assert_eq!(app.environment_properties.len(), 4);
    }

    #[test]
    fn null_scalars_decode_as_defaults() {
        let app: Application = serde_json::from_value(json!({
            "id": 2,
            "name": null,
            "description": null,
            "eumAppName": null,
            "applicationTypeInfo": null
        }))
        .unwrap();
        assert_eq!(app.name, "");
        assert_eq!(app.eum_app_name, "");
        assert_eq!(app.application_type_info, ApplicationTypeInfo::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let app: Application = serde_json::from_value(json!({
            "id": 3,
            "name": "Legacy",
            "accountGuid": "abc",
            "futureField": {"nested": true}
        }))
        .unwrap();
        assert_eq!(app.id, 3);
    }

    #[test]
    fn all_types_envelope_keeps_only_apm_list() {
        let envelope: ApplicationsAllTypes = serde_json::from_value(json!({
            "apmApplications": [{"id": 1}, {"id": 2}],
            "eumWebApplications": [{"id": 99}],
            "mobileAppContainers": []
        }))
        .unwrap();
        let ids: Vec<i64> = envelope.applications.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn all_types_envelope_requires_apm_list() {
        let err = serde_json::from_value::<ApplicationsAllTypes>(json!({
            "eumWebApplications": []
        }))
        .unwrap_err();
        assert!(err.to_string().contains("apmApplications"));
    }

    #[test]
    fn serializes_with_wire_names() {
        let app = Application {
            id: 5,
            deploy_workflow_id: 8,
            ..Application::default()
        };
        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["deployWorkflowId"], 8);
        assert!(value.get("applicationTypeInfo").is_some());
    }
}
