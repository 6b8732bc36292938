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

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::cfg::cli_options::CliOptions;
use crate::cfg::run::Run;
use crate::cfg::runtime::RuntimeContext;
use crate::errors::CliResult;

#[derive(Parser, Debug)]
pub struct Cmd {
    #[clap(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

impl Run for Cmd {
    // Completions always go to stdout so they can be sourced directly,
    // regardless of --output.
    async fn run(self, _ctx: &mut RuntimeContext) -> CliResult<()> {
        let mut command = CliOptions::command();
        let name = command.get_name().to_string();
        clap_complete::generate(self.shell, &mut command, name, &mut std::io::stdout());
        Ok(())
    }
}
