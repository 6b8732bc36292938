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

// Write helpers for the command output sink. The sink is a
// Pin<Box<dyn AsyncWrite>>, so the std write!/writeln! macros do not
// apply; these expand to write_all calls and must be used inside an
// async context.

#[macro_export]
macro_rules! async_write {
    ($dst:expr, $($arg:tt)*) => {{
        use tokio::io::AsyncWriteExt as _;
        $dst.write_all(format!($($arg)*).as_bytes()).await
    }};
}

#[macro_export]
macro_rules! async_writeln {
    ($dst:expr) => {{
        use tokio::io::AsyncWriteExt as _;
        $dst.write_all(b"\n").await
    }};
    ($dst:expr, $($arg:tt)*) => {{
        use tokio::io::AsyncWriteExt as _;
        let mut line = format!($($arg)*);
        line.push('\n');
        $dst.write_all(line.as_bytes()).await
    }};
}

#[macro_export]
macro_rules! async_write_table_as_csv {
    ($dst:expr, $table:expr) => {{
        use tokio::io::AsyncWriteExt as _;
        match $table
            .to_csv(Vec::new())
            .map_err(|e| $crate::errors::CliError::GenericError(e.to_string()))
            .and_then(|writer| {
                writer
                    .into_inner()
                    .map_err(|e| $crate::errors::CliError::GenericError(e.to_string()))
            }) {
            Ok(bytes) => $dst
                .write_all(&bytes)
                .await
                .map_err($crate::errors::CliError::from),
            Err(e) => Err(e),
        }
    }};
}
