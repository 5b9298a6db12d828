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

use std::time::Duration;

// Env values used in aliyun services.
pub const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
pub const ALIBABA_CLOUD_SECURITY_TOKEN: &str = "ALIBABA_CLOUD_SECURITY_TOKEN";

// Defaults of the live management API.
//
// https://www.alibabacloud.com/help/en/live/developer-reference/api-live-2016-11-01-overview
pub const DEFAULT_BASE_URL: &str = "https://live.aliyuncs.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_API_VERSION: &str = "2016-11-01";
pub const DEFAULT_SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const DEFAULT_SIGNATURE_VERSION: &str = "1.0";
pub const DEFAULT_FORMAT: &str = "json";

// Common parameters sent with every management API call.
pub const ACTION: &str = "Action";
pub const FORMAT: &str = "Format";
pub const VERSION: &str = "Version";
pub const SIGNATURE_METHOD: &str = "SignatureMethod";
pub const SIGNATURE_VERSION: &str = "SignatureVersion";
pub const ACCESS_KEY_ID: &str = "AccessKeyId";
pub const SIGNATURE_NONCE: &str = "SignatureNonce";
pub const TIMESTAMP: &str = "Timestamp";
pub const SECURITY_TOKEN: &str = "SecurityToken";
pub const SIGNATURE: &str = "Signature";

// Fields of a structured error body.
pub const REQUEST_ID: &str = "RequestId";
pub const CODE: &str = "Code";
pub const MESSAGE: &str = "Message";

/// Query parameter that carries the stream token.
pub const AUTH_KEY: &str = "auth_key";
/// The `rand` and `uid` fields of an auth_key token. Reserved, currently always zero.
pub const AUTH_KEY_RESERVED_FIELDS: &str = "-0-0-";
