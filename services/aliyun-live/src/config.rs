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

use super::constants::*;
use livesign_core::utils::Redact;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

/// Config carries all the configuration for the Aliyun live client.
///
/// Every field has a default, so only the credentials usually need to be set.
/// Once handed to a [`Client`](crate::Client) the config is never mutated.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the management API, default to `https://live.aliyuncs.com`.
    pub base_url: String,
    /// Timeout of a whole request, default to 3s.
    ///
    /// Applied by the transport, see `livesign::aliyun::default_client`.
    pub timeout: Duration,
    /// API version, default to `2016-11-01`.
    pub version: String,
    /// Signature method, default to `HMAC-SHA1`.
    pub signature_method: String,
    /// Signature version, default to `1.0`.
    pub signature_version: String,
    /// Response format, default to `json`.
    pub format: String,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `access_key_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_SECRET`]
    pub access_key_secret: Option<String>,
    /// `security_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_SECURITY_TOKEN`]
    pub security_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            version: DEFAULT_API_VERSION.to_string(),
            signature_method: DEFAULT_SIGNATURE_METHOD.to_string(),
            signature_version: DEFAULT_SIGNATURE_VERSION.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            access_key_id: None,
            access_key_secret: None,
            security_token: None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("version", &self.version)
            .field("signature_method", &self.signature_method)
            .field("signature_version", &self.signature_version)
            .field("format", &self.format)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .field("security_token", &Redact::from(&self.security_token))
            .finish()
    }
}
