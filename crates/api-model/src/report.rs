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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assignment::ComplianceStatus;

/// Kind of evaluation run that produced a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    /// Scheduled re-evaluation of an already-configured machine.
    Consistency,
    /// First evaluation after the assignment was created.
    Initial,
}

/// The virtual machine a report was produced for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmInfo {
    pub name: String,
    #[serde(default)]
    pub uuid: Option<String>,
}

/// One reason the service recorded for a resource's compliance state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReason {
    pub phrase: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Compliance details for one in-guest resource evaluated by a report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceComplianceInfo {
    pub resource_id: String,
    pub compliance_status: ComplianceStatus,
    #[serde(default)]
    pub reasons: Vec<ComplianceReason>,
}

/// A point-in-time compliance report for a guest configuration
/// assignment. Richer than the bare assignment: carries the evaluated
/// resources and the reasons behind their state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPolicyAssignmentReport {
    /// Report id.
    pub id: String,
    pub assignment_name: String,
    pub vm: VmInfo,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub compliance_status: ComplianceStatus,
    #[serde(default)]
    pub operation_type: Option<OperationType>,
    #[serde(default)]
    pub resources: Vec<ResourceComplianceInfo>,
}

impl GuestPolicyAssignmentReport {
    /// Count of evaluated resources that are out of compliance.
    pub fn non_compliant_resource_count(&self) -> usize {
        self.resources
            .iter()
            .filter(|r| r.compliance_status == ComplianceStatus::NonCompliant)
            .count()
    }
}
