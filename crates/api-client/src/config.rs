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

use std::path::PathBuf;

use serde::Deserialize;

use crate::{ClientError, ClientResult};

/// In-cluster service address used when nothing else is configured.
pub const DEFAULT_API_URL: &str =
    "https://guestconfig-api.policy-system.svc.cluster.local:1083";

const CONFIG_FILE_NAME: &str = "guestconfig_cli.json";

/// Resolved client configuration.
///
/// Each field falls back from the explicit value handed in by the caller
/// (CLI flag or environment variable, already merged by clap) to the
/// `$HOME/.config/guestconfig_cli.json` file; the url finally falls back
/// to [DEFAULT_API_URL].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub access_token: Option<String>,
    pub root_ca_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    root_ca_path: Option<String>,
}

impl Config {
    pub fn resolve(
        api_url: Option<String>,
        access_token: Option<String>,
        root_ca_path: Option<String>,
    ) -> ClientResult<Self> {
        let file = match config_file_path() {
            Some(path) if path.is_file() => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
                serde_json::from_str(&raw)
                    .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?
            }
            _ => ConfigFile::default(),
        };
        Ok(Self::merge(api_url, access_token, root_ca_path, file))
    }

    fn merge(
        api_url: Option<String>,
        access_token: Option<String>,
        root_ca_path: Option<String>,
        file: ConfigFile,
    ) -> Self {
        Config {
            api_url: api_url
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            access_token: access_token.or(file.access_token),
            root_ca_path: root_ca_path.or(file.root_ca_path),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config").join(CONFIG_FILE_NAME))
}
