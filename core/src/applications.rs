//! Read-only accessor for business applications.
//!
//! # Design
//! Three queries, each a single stateless round trip. Every query has a
//! `build_*` / `parse_*` pair for callers that execute requests themselves,
//! and a method that runs the round trip through the client's transport.
//!
//! The public REST endpoints answer with a bare JSON array. The RESTUI
//! endpoint is undocumented, wraps the array in an object, and may change
//! between controller versions; it gets its own decoder and envelope type so
//! a shape change fails loudly there and nowhere else.

use crate::client::{decode_json, decode_restui, ControllerClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Application, ApplicationsAllTypes};

const APPLICATIONS_PATH: &str = "controller/rest/applications";
const ALL_TYPES_PATH: &str = "controller/restui/applicationManagerUiBean/getApplicationsAllTypes";

/// Application queries against one controller.
#[derive(Debug)]
pub struct ApplicationService<'a, T> {
    client: &'a ControllerClient<T>,
}

impl<'a, T: Transport> ApplicationService<'a, T> {
    pub fn new(client: &'a ControllerClient<T>) -> Self {
        Self { client }
    }

    /// All applications, in the order the controller returns them.
    pub fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        let request = self.build_list_applications()?;
        self.client.execute(&request)
    }

    /// One application by exact name or numeric id.
    ///
    /// The controller answers with a list even for a single entity; an empty
    /// list is reported as `ApiError::NotFound`.
    pub fn get_application(&self, name_or_id: &str) -> Result<Application, ApiError> {
        let request = self.build_get_application(name_or_id)?;
        let applications = self.client.execute(&request)?;
        first_or_not_found(applications, name_or_id)
    }

    /// All applications with `application_type_info` populated.
    ///
    /// Uses an internal RESTUI endpoint that may break on future controller
    /// versions.
    pub fn list_applications_all_types(&self) -> Result<Vec<Application>, ApiError> {
        let request = self.build_list_applications_all_types()?;
        let envelope: ApplicationsAllTypes = self.client.execute_restui(&request)?;
        Ok(envelope.applications)
    }

    pub fn build_list_applications(&self) -> Result<HttpRequest, ApiError> {
        self.client.build_request(
            HttpMethod::Get,
            &format!("{APPLICATIONS_PATH}?output=json"),
            None,
        )
    }

    /// `name_or_id` goes into the path as given.
    pub fn build_get_application(&self, name_or_id: &str) -> Result<HttpRequest, ApiError> {
        self.client.build_request(
            HttpMethod::Get,
            &format!("{APPLICATIONS_PATH}/{name_or_id}?output=json"),
            None,
        )
    }

    pub fn build_list_applications_all_types(&self) -> Result<HttpRequest, ApiError> {
        self.client.build_request(HttpMethod::Get, ALL_TYPES_PATH, None)
    }

    pub fn parse_list_applications(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Application>, ApiError> {
        decode_json(&response)
    }

    pub fn parse_get_application(
        &self,
        name_or_id: &str,
        response: HttpResponse,
    ) -> Result<Application, ApiError> {
        first_or_not_found(decode_json(&response)?, name_or_id)
    }

    pub fn parse_list_applications_all_types(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Application>, ApiError> {
        let envelope: ApplicationsAllTypes = decode_restui(&response)?;
        Ok(envelope.applications)
    }
}

fn first_or_not_found(
    applications: Vec<Application>,
    name_or_id: &str,
) -> Result<Application, ApiError> {
    applications
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound(name_or_id.to_string()))
}
