/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::time::Duration;

use api_model::{GuestPolicyAssignment, GuestPolicyAssignmentReport, InitiativeKey};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{ClientError, ClientResult, Config};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The read surface of the guest configuration service used by the
/// policy report tooling.
///
/// Every list operation reflects the wire contract of "a sequence or
/// null": an absent result set is `None`, a present one is `Some`, even
/// when it is empty. Callers decide what each case means for output.
pub trait GuestConfigApi {
    fn list_assignments(
        &self,
        resource_group: &str,
        vm_name: &str,
    ) -> impl std::future::Future<Output = ClientResult<Option<Vec<GuestPolicyAssignment>>>>;

    fn list_assignments_by_initiative(
        &self,
        resource_group: &str,
        vm_name: &str,
        initiative: &InitiativeKey,
    ) -> impl std::future::Future<Output = ClientResult<Option<Vec<GuestPolicyAssignment>>>>;

    fn list_reports(
        &self,
        resource_group: &str,
        vm_name: &str,
        latest_only: bool,
    ) -> impl std::future::Future<Output = ClientResult<Option<Vec<GuestPolicyAssignmentReport>>>>;

    fn list_reports_by_initiative(
        &self,
        resource_group: &str,
        vm_name: &str,
        initiative: &InitiativeKey,
        latest_only: bool,
    ) -> impl std::future::Future<Output = ClientResult<Option<Vec<GuestPolicyAssignmentReport>>>>;

    fn get_report_by_id(
        &self,
        report_id: &str,
    ) -> impl std::future::Future<Output = ClientResult<Option<GuestPolicyAssignmentReport>>>;
}

/// HTTPS/JSON client for the guest configuration service.
#[derive(Clone)]
pub struct GuestConfigClient {
    http: reqwest::Client,
    base_url: String,
}

impl GuestConfigClient {
    /// Builds a client from resolved [Config]: endpoint, optional bearer
    /// token, optional private root CA.
    pub fn connect(config: &Config) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);

        if let Some(path) = &config.root_ca_path {
            let pem = std::fs::read(path)
                .map_err(|e| ClientError::Config(format!("{path}: {e}")))?;
            let certificate = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| ClientError::Config(format!("{path}: {e}")))?;
            builder = builder.add_root_certificate(certificate);
        }

        if let Some(token) = &config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::Config(e.to_string()))?;
            value.set_sensitive(true);
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        Ok(GuestConfigClient {
            http: builder.build()?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn vm_scope_url(&self, resource_group: &str, vm_name: &str, leaf: &str) -> String {
        format!(
            "{}/resource-groups/{resource_group}/virtual-machines/{vm_name}/guest-policy/{leaf}",
            self.base_url
        )
    }

    /// One GET against the service. 404 and a JSON `null` body both come
    /// back as `None`; any other non-success status is an error.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> ClientResult<Option<T>> {
        tracing::debug!(%url, "querying guest configuration service");
        let response = self.http.get(&url).query(query).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Serde(e.to_string()))
    }
}

fn initiative_query(initiative: &InitiativeKey) -> (&'static str, String) {
    match initiative {
        InitiativeKey::Name(name) => ("initiative-name", name.clone()),
        InitiativeKey::DefinitionId(id) => ("initiative-id", id.clone()),
    }
}

impl GuestConfigApi for GuestConfigClient {
    async fn list_assignments(
        &self,
        resource_group: &str,
        vm_name: &str,
    ) -> ClientResult<Option<Vec<GuestPolicyAssignment>>> {
        self.get_json(self.vm_scope_url(resource_group, vm_name, "assignments"), &[])
            .await
    }

    async fn list_assignments_by_initiative(
        &self,
        resource_group: &str,
        vm_name: &str,
        initiative: &InitiativeKey,
    ) -> ClientResult<Option<Vec<GuestPolicyAssignment>>> {
        let (key, value) = initiative_query(initiative);
        self.get_json(
            self.vm_scope_url(resource_group, vm_name, "assignments"),
            &[(key, value)],
        )
        .await
    }

    async fn list_reports(
        &self,
        resource_group: &str,
        vm_name: &str,
        latest_only: bool,
    ) -> ClientResult<Option<Vec<GuestPolicyAssignmentReport>>> {
        self.get_json(
            self.vm_scope_url(resource_group, vm_name, "reports"),
            &[("latest", latest_only.to_string())],
        )
        .await
    }

    async fn list_reports_by_initiative(
        &self,
        resource_group: &str,
        vm_name: &str,
        initiative: &InitiativeKey,
        latest_only: bool,
    ) -> ClientResult<Option<Vec<GuestPolicyAssignmentReport>>> {
        let (key, value) = initiative_query(initiative);
        self.get_json(
            self.vm_scope_url(resource_group, vm_name, "reports"),
            &[("latest", latest_only.to_string()), (key, value)],
        )
        .await
    }

    async fn get_report_by_id(
        &self,
        report_id: &str,
    ) -> ClientResult<Option<GuestPolicyAssignmentReport>> {
        self.get_json(
            format!("{}/guest-policy/reports/{report_id}", self.base_url),
            &[],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base: &str) -> GuestConfigClient {
        GuestConfigClient::connect(&Config {
            api_url: base.to_string(),
            access_token: None,
            root_ca_path: None,
        })
        .expect("client should build")
    }

    #[test]
    fn vm_scope_urls_nest_under_the_virtual_machine() {
        let client = client_with_base("https://api.example:1083/");

        assert_eq!(
            client.vm_scope_url("rg1", "vm1", "assignments"),
            "https://api.example:1083/resource-groups/rg1/virtual-machines/vm1/guest-policy/assignments"
        );
        assert_eq!(
            client.vm_scope_url("rg1", "vm1", "reports"),
            "https://api.example:1083/resource-groups/rg1/virtual-machines/vm1/guest-policy/reports"
        );
    }

    #[test]
    fn initiative_query_picks_the_matching_parameter() {
        assert_eq!(
            initiative_query(&InitiativeKey::Name("init1".to_string())),
            ("initiative-name", "init1".to_string())
        );
        assert_eq!(
            initiative_query(&InitiativeKey::DefinitionId("/definitions/d1".to_string())),
            ("initiative-id", "/definitions/d1".to_string())
        );
    }

    #[test]
    fn a_null_body_deserializes_to_none_and_a_list_to_some() {
        let absent: Option<Vec<GuestPolicyAssignment>> = serde_json::from_str("null").unwrap();
        assert!(absent.is_none());

        let present: Option<Vec<GuestPolicyAssignment>> = serde_json::from_str("[]").unwrap();
        assert_eq!(present, Some(vec![]));
    }
}
