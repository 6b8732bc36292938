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

use std::pin::Pin;

use crate::api::ApiClient;
use crate::cfg::cli_options::CliOptions;
use crate::errors::CliResult;

/// Everything a command needs at execution time: the parsed global
/// options, a connected API client, and the sink results are written to.
pub(crate) struct RuntimeContext {
    pub config: CliOptions,
    pub api_client: ApiClient,
    pub output_file: Pin<Box<dyn tokio::io::AsyncWrite>>,
}

impl RuntimeContext {
    pub async fn new(config: CliOptions) -> CliResult<Self> {
        let api_client = ApiClient::connect(&config)?;
        let output_file: Pin<Box<dyn tokio::io::AsyncWrite>> = match &config.output {
            Some(path) => {
                tracing::debug!(%path, "writing results to file");
                Box::pin(tokio::fs::File::create(path).await?)
            }
            None => Box::pin(tokio::io::stdout()),
        };

        Ok(RuntimeContext {
            config,
            api_client,
            output_file,
        })
    }
}
