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

use api_client::{Config, GuestConfigClient};

use crate::cfg::cli_options::CliOptions;
use crate::errors::CliResult;

/// [`ApiClient`] is a thin wrapper around [`GuestConfigClient`].
#[derive(Clone)]
pub struct ApiClient(pub GuestConfigClient);

// Endpoint resolution, TLS and auth all live in the client crate; this
// wrapper only ties the connection to the parsed CLI options. Callers
// use `.0` to reach the service operations.
impl ApiClient {
    pub fn connect(options: &CliOptions) -> CliResult<Self> {
        let config = Config::resolve(
            options.api_url.clone(),
            options.access_token.clone(),
            options.root_ca_path.clone(),
        )?;
        Ok(ApiClient(GuestConfigClient::connect(&config)?))
    }
}
