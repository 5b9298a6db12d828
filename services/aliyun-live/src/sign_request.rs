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

use crate::constants::*;
use crate::{Config, Credential};
use async_trait::async_trait;
use livesign_core::hash::base64_hmac_sha1;
use livesign_core::time::{format_iso8601, now, DateTime};
use livesign_core::{Context, Error, Result, SignRequest, SigningRequest};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// RequestSigner that implements the RPC signature of the Aliyun live management API.
///
/// - [Signature](https://www.alibabacloud.com/help/en/live/developer-reference/request-signatures)
#[derive(Debug)]
pub struct RequestSigner {
    config: Arc<Config>,

    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer that fills common parameters from `config`.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            time: None,
            nonce: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the signature nonce.
    ///
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_nonce(&self) -> String {
        self.nonce
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        _: Option<Duration>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "access key id and secret are required to sign live api requests",
            ));
        };

        let mut ctx = SigningRequest::build(req)?;

        let mut params = BTreeMap::new();
        params.insert(FORMAT.to_string(), self.config.format.clone());
        params.insert(VERSION.to_string(), self.config.version.clone());
        params.insert(
            SIGNATURE_METHOD.to_string(),
            self.config.signature_method.clone(),
        );
        params.insert(
            SIGNATURE_VERSION.to_string(),
            self.config.signature_version.clone(),
        );
        params.insert(ACCESS_KEY_ID.to_string(), cred.access_key_id.clone());
        params.insert(SIGNATURE_NONCE.to_string(), self.get_nonce());
        params.insert(TIMESTAMP.to_string(), format_iso8601(self.get_time()));
        if let Some(token) = &cred.security_token {
            params.insert(SECURITY_TOKEN.to_string(), token.clone());
        }

        // Action parameters from the caller override the common ones.
        for (k, v) in ctx.query.drain(..) {
            if k == SIGNATURE {
                return Err(Error::request_invalid(
                    "Signature is computed by the signer and must not be supplied",
                ));
            }
            params.insert(k, v);
        }

        let signature = sign_parameters(
            params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ctx.method.as_str(),
            &cred.access_key_secret,
        );

        ctx.query = params
            .iter()
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        ctx.query_push(SIGNATURE, percent_encode(&signature));

        ctx.apply(req)
    }
}

/// Sign the given parameters and return the base64 encoded signature.
///
/// Only the `Timestamp` value is encoded before the `key=value` pairs are
/// built. Pairs are sorted by their full byte value, so `Key2=..` sorts
/// before `Key=..`.
pub fn sign_parameters<'a>(
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
    method: &str,
    access_key_secret: &str,
) -> String {
    let mut pairs: Vec<String> = params
        .into_iter()
        .map(|(k, v)| {
            if k == TIMESTAMP {
                format!("{k}={}", percent_encode(v))
            } else {
                format!("{k}={v}")
            }
        })
        .collect();
    pairs.sort_unstable();

    let string_to_sign = string_to_sign(method, &pairs.join("&"));
    log::debug!("calculated string to sign: {string_to_sign}");

    base64_hmac_sha1(
        format!("{access_key_secret}&").as_bytes(),
        string_to_sign.as_bytes(),
    )
}

fn string_to_sign(method: &str, canonicalized_query: &str) -> String {
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode("/"),
        percent_encode(canonicalized_query)
    )
}

/// Percent encode in the dialect the provider expects.
///
/// Form encoding leaves `*` alone, turns spaces into `+` and escapes `~`,
/// every occurrence is rewritten to the RFC 3986 form. `!`, `'`, `(` and `)`
/// stay escaped.
pub(crate) fn percent_encode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}
