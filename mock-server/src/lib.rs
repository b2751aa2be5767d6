use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Full application record, as the RESTUI surface returns it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockApplication {
    pub id: i64,
    pub version: i64,
    pub name: String,
    pub name_unique: bool,
    pub built_in: bool,
    pub created_by: String,
    pub created_on: i64,
    pub modified_by: String,
    pub modified_on: i64,
    pub description: String,
    pub template: bool,
    pub active: bool,
    pub running: bool,
    pub running_since: Value,
    pub deploy_workflow_id: i64,
    pub undeploy_workflow_id: i64,
    pub visualization: Value,
    pub environment_properties: Vec<Value>,
    pub eum_app_name: String,
    pub application_type_info: MockTypeInfo,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockTypeInfo {
    pub application_types: Vec<String>,
    pub eum_enabled: bool,
    pub eum_web_enabled: bool,
    pub eum_mobile_enabled: bool,
    pub eum_iot_enabled: bool,
    pub has_eum_web_entities: bool,
    pub has_mobile_apps: bool,
    pub has_tiers: bool,
    pub number_of_mobile_apps: i64,
}

/// The public REST surface only exposes these three fields.
#[derive(Serialize)]
struct RestApplication<'a> {
    id: i64,
    name: &'a str,
    description: &'a str,
}

impl<'a> From<&'a MockApplication> for RestApplication<'a> {
    fn from(app: &'a MockApplication) -> Self {
        Self {
            id: app.id,
            name: &app.name,
            description: &app.description,
        }
    }
}

#[derive(Deserialize)]
pub struct OutputParams {
    pub output: Option<String>,
}

pub type Db = Arc<Vec<MockApplication>>;

/// Router seeded with `seed()`.
pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(applications: Vec<MockApplication>) -> Router {
    let db: Db = Arc::new(applications);
    Router::new()
        .route("/controller/rest/applications", get(list_applications))
        .route(
            "/controller/rest/applications/{name_or_id}",
            get(get_application),
        )
        .route(
            "/controller/restui/applicationManagerUiBean/getApplicationsAllTypes",
            get(list_applications_all_types),
        )
        .layer(middleware::from_fn(require_basic_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, seed()).await
}

pub async fn run_with(
    listener: TcpListener,
    applications: Vec<MockApplication>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(applications)).await
}

/// Two APM applications, one with browser monitoring enabled.
pub fn seed() -> Vec<MockApplication> {
    vec![
        MockApplication {
            id: 5,
            version: 3,
            name: "ECommerce".to_string(),
            name_unique: true,
            created_by: "admin".to_string(),
            created_on: 1_577_836_800_000,
            modified_by: "admin".to_string(),
            modified_on: 1_609_459_200_000,
            description: "Storefront and checkout".to_string(),
            active: true,
            running: true,
            running_since: json!(1_609_459_200_000_i64),
            environment_properties: vec![json!({"name": "region", "value": "eu-west-1"})],
            eum_app_name: "ecommerce-web".to_string(),
            application_type_info: MockTypeInfo {
                application_types: vec!["APM".to_string(), "EUM_WEB".to_string()],
                eum_enabled: true,
                eum_web_enabled: true,
                has_eum_web_entities: true,
                has_tiers: true,
                ..MockTypeInfo::default()
            },
            ..MockApplication::default()
        },
        MockApplication {
            id: 8,
            version: 1,
            name: "Billing".to_string(),
            name_unique: true,
            created_by: "ops".to_string(),
            created_on: 1_590_969_600_000,
            modified_by: "ops".to_string(),
            modified_on: 1_590_969_600_000,
            active: true,
            application_type_info: MockTypeInfo {
                application_types: vec!["APM".to_string()],
                has_tiers: true,
                ..MockTypeInfo::default()
            },
            ..MockApplication::default()
        },
    ]
}

/// The controller rejects calls without basic auth.
async fn require_basic_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

/// Without `output=json` the REST surface answers in XML.
fn rest_response<T: Serialize>(params: &OutputParams, payload: T) -> Response {
    let wants_json = params
        .output
        .as_deref()
        .is_some_and(|o| o.eq_ignore_ascii_case("json"));
    if wants_json {
        Json(payload).into_response()
    } else {
        (
            [(header::CONTENT_TYPE, "application/xml")],
            "<applications></applications>",
        )
            .into_response()
    }
}

async fn list_applications(State(db): State<Db>, Query(params): Query<OutputParams>) -> Response {
    let applications: Vec<RestApplication> = db.iter().map(RestApplication::from).collect();
    rest_response(&params, applications)
}

/// Matches by numeric id or exact name. No match is an empty list, not a 404.
async fn get_application(
    State(db): State<Db>,
    Path(name_or_id): Path<String>,
    Query(params): Query<OutputParams>,
) -> Response {
    let id = name_or_id.parse::<i64>().ok();
    let applications: Vec<RestApplication> = db
        .iter()
        .filter(|app| Some(app.id) == id || app.name == name_or_id)
        .map(RestApplication::from)
        .collect();
    rest_response(&params, applications)
}

async fn list_applications_all_types(State(db): State<Db>) -> Json<Value> {
    Json(json!({
        "apmApplications": db.as_slice(),
        "eumWebApplications": [],
        "mobileAppContainers": [],
        "iotApplications": [],
    }))
}
