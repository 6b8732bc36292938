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

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Compliance state of an assignment or report, as evaluated by the
/// guest configuration service. The wire strings are fixed by the
/// service and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
    Pending,
}

impl ComplianceStatus {
    pub fn is_compliant(&self) -> bool {
        matches!(self, ComplianceStatus::Compliant)
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::NonCompliant => "NonCompliant",
            ComplianceStatus::Pending => "Pending",
        };
        f.write_str(s)
    }
}

/// A guest configuration assignment: the binding of one guest
/// configuration policy to a virtual machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPolicyAssignment {
    /// Guest configuration assignment name.
    pub name: String,
    /// Fully qualified resource id of the assignment.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the initiative this assignment belongs to, if any.
    #[serde(default)]
    pub initiative_name: Option<String>,
    /// Definition id of the owning initiative.
    #[serde(default)]
    pub initiative_id: Option<String>,
    pub compliance_status: ComplianceStatus,
    #[serde(default)]
    pub last_compliance_status_checked: Option<DateTime<Utc>>,
    /// Id of the most recent report produced for this assignment.
    #[serde(default)]
    pub latest_report_id: Option<String>,
}
