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

/// The resolved input mode of a policy report query.
///
/// Constructed by the argument layer, which also guarantees the three
/// identifying options are mutually exclusive. Dispatch branches on this
/// tag only and never re-derives the mode from raw optional fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum QueryScope {
    /// All assignments (or reports) for the VM.
    Vm,
    /// Restricted to the initiative with this display name.
    InitiativeName(String),
    /// Restricted to the initiative with this definition id.
    InitiativeId(String),
    /// One specific report, addressed by report id alone.
    ReportId(String),
}

/// A fully resolved report query: the scope tag plus the VM coordinates
/// and modifiers.
#[derive(Clone, Debug)]
pub(crate) struct ReportQuery {
    pub scope: QueryScope,
    pub resource_group: String,
    pub vm_name: String,
    pub detailed: bool,
    pub latest: bool,
}
