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

mod assignment;
mod report;

pub use assignment::{ComplianceStatus, GuestPolicyAssignment};
pub use report::{
    ComplianceReason, GuestPolicyAssignmentReport, OperationType, ResourceComplianceInfo, VmInfo,
};
use serde::{Deserialize, Serialize};

/// Identifies a policy initiative either by its display name or by its
/// fully qualified definition id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitiativeKey {
    Name(String),
    DefinitionId(String),
}

impl InitiativeKey {
    /// The raw identifying string, regardless of which form it takes.
    pub fn as_str(&self) -> &str {
        match self {
            InitiativeKey::Name(name) => name,
            InitiativeKey::DefinitionId(id) => id,
        }
    }
}
