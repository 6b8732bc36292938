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
use clap::{Parser, ValueEnum};

use crate::cfg::dispatch::Dispatch;
use crate::{generate_shell_complete, policy};

#[derive(Parser, Debug)]
#[clap(name = "guestconfig-admin-cli", version)]
#[clap(author = "Slack channel #guestconfig-dev")]
pub struct CliOptions {
    #[clap(short = 'u', long, env = "GUESTCONFIG_API_URL")]
    #[clap(
        help = "Default to GUESTCONFIG_API_URL environment variable or $HOME/.config/guestconfig_cli.json file or the in-cluster service address."
    )]
    pub api_url: Option<String>,

    #[clap(long, env = "GUESTCONFIG_ACCESS_TOKEN", hide_env_values = true)]
    #[clap(help = "Bearer token presented to the guest configuration service.")]
    pub access_token: Option<String>,

    #[clap(long, env = "GUESTCONFIG_ROOT_CA_PATH")]
    #[clap(
        help = "PEM bundle used to verify the service endpoint. Default to GUESTCONFIG_ROOT_CA_PATH environment variable or $HOME/.config/guestconfig_cli.json file."
    )]
    pub root_ca_path: Option<String>,

    #[clap(short, long, value_enum, default_value = "ascii-table")]
    pub format: OutputFormat,

    #[clap(short, long, help = "Write results to this file instead of stdout.")]
    pub output: Option<String>,

    #[clap(short, long, action = clap::ArgAction::Count)]
    #[clap(help = "Raise log verbosity. Repeat for more detail.")]
    pub debug: u8,

    #[clap(subcommand)]
    pub commands: Option<CliCommand>,
}

#[derive(PartialEq, Eq, ValueEnum, Clone, Debug)]
#[clap(rename_all = "kebab_case")]
pub enum OutputFormat {
    Json,
    AsciiTable,
    Csv,
    Yaml,
}

#[derive(Parser, Debug, Dispatch)]
pub enum CliCommand {
    #[clap(
        about = "Guest configuration policy handling",
        subcommand,
        visible_alias = "p"
    )]
    #[dispatch]
    Policy(policy::Cmd),
    #[clap(
        about = "Generate shell autocomplete. Source the output of this command: `source <(guestconfig-admin-cli generate-shell-complete bash)`"
    )]
    GenerateShellComplete(generate_shell_complete::Cmd),
}

impl CliOptions {
    pub fn load() -> Self {
        Self::parse()
    }
}
