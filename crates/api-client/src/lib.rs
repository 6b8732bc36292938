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

// these are not visible outside of this crate
mod client;
mod config;

// re-exports
pub use client::{GuestConfigApi, GuestConfigClient};
pub use config::{Config, DEFAULT_API_URL};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("error talking to the guest configuration service: {0}")]
    Communication(String),
    #[error("guest configuration service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("error deserializing service response: {0}")]
    Serde(String),
    #[error("error resolving client configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> ClientError {
        ClientError::Communication(value.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
