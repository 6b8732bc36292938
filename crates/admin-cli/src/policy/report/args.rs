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

use clap::Parser;

use crate::policy::common::{QueryScope, ReportQuery};

#[derive(Parser, Debug)]
pub struct Args {
    #[clap(
        help = "Resource group of the virtual machine",
        required_unless_present = "report_id"
    )]
    pub resource_group: Option<String>,

    #[clap(
        help = "Name of the virtual machine",
        required_unless_present = "report_id"
    )]
    pub vm_name: Option<String>,

    #[clap(
        long,
        group = "query_scope",
        help = "Restrict results to the initiative with this display name"
    )]
    pub initiative_name: Option<String>,

    #[clap(
        long,
        group = "query_scope",
        help = "Restrict results to the initiative with this definition id"
    )]
    pub initiative_id: Option<String>,

    #[clap(
        long,
        group = "query_scope",
        help = "Fetch one report by its report id"
    )]
    pub report_id: Option<String>,

    #[clap(
        long,
        action,
        conflicts_with = "report_id",
        help = "Return detailed compliance reports instead of assignment summaries"
    )]
    pub detailed: bool,

    #[clap(
        long,
        action,
        conflicts_with = "report_id",
        help = "Only consider the latest report per assignment (with --detailed)"
    )]
    pub latest: bool,
}

impl Args {
    /// Builds the resolved query. The scope tag is decided here, in the
    /// argument layer; the clap group guarantees at most one identifying
    /// option was supplied.
    pub fn query(self) -> ReportQuery {
        let scope = if let Some(report_id) = self.report_id {
            QueryScope::ReportId(report_id)
        } else if let Some(name) = self.initiative_name {
            QueryScope::InitiativeName(name)
        } else if let Some(id) = self.initiative_id {
            QueryScope::InitiativeId(id)
        } else {
            QueryScope::Vm
        };

        ReportQuery {
            scope,
            // Empty in report-id scope, where the fetch ignores them.
            resource_group: self.resource_group.unwrap_or_default(),
            vm_name: self.vm_name.unwrap_or_default(),
            detailed: self.detailed,
            latest: self.latest,
        }
    }
}
