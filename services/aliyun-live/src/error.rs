// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use http::StatusCode;
use thiserror::Error;

/// Result type returned by the live client.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by the live client.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the request with a structured error body.
    #[error("live api error (status {status}, code {code}, request {request_id}): {message}")]
    Business {
        /// HTTP status of the response.
        status: StatusCode,
        /// Error code, e.g. `InvalidAccessKeyId.NotFound`.
        code: String,
        /// Human readable message.
        message: String,
        /// Request id assigned by the API.
        request_id: String,
        /// Full response body.
        body: serde_json::Value,
    },
    /// The request never produced a structured response.
    ///
    /// Covers transport failures, invalid input caught before sending and
    /// responses that could not be decoded.
    #[error("live service error: {0}")]
    Service(#[from] livesign_core::Error),
}

impl Error {
    /// HTTP status of a business error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Business { status, .. } => Some(*status),
            Error::Service(_) => None,
        }
    }

    /// Whether the API itself rejected the request.
    pub fn is_business(&self) -> bool {
        matches!(self, Error::Business { .. })
    }
}
