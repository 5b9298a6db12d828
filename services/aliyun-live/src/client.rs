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
use crate::sign_request::percent_encode;
use crate::stream_url::{self, IngestUrlParams, StreamUrl, StreamingUrlParams};
use crate::{Config, Credential, DefaultCredentialProvider, Error, RequestSigner, Result};
use bytes::Bytes;
use http::StatusCode;
use livesign_core::time::now;
use livesign_core::{Context, ProvideCredential, Signer};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Client of the Aliyun live management API.
///
/// Every call computes its own nonce, timestamp and signature, so a client
/// can be cloned and shared freely.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    config: Arc<Config>,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a new client that loads credentials with [`DefaultCredentialProvider`].
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config);
        let provider = DefaultCredentialProvider::new(config.clone());
        Self::with_credential_provider(ctx, config, provider)
    }

    /// Create a new client with a custom credential provider.
    pub fn with_credential_provider(
        ctx: Context,
        config: Arc<Config>,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        let signer = Signer::new(ctx.clone(), provider, RequestSigner::new(config.clone()));

        Self {
            ctx,
            config,
            signer,
        }
    }

    /// Config used by this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a signed `GET` request carrying `params` and decode the JSON body as `T`.
    ///
    /// Common parameters like `Format` and `Timestamp` are added by the signer,
    /// callers only pass `Action` and the action specific parameters.
    pub async fn request<T, K, V>(&self, params: impl IntoIterator<Item = (K, V)>) -> Result<T>
    where
        T: DeserializeOwned,
        K: Into<String>,
        V: ToString,
    {
        let params: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.to_string()))
            .collect();
        let action = params
            .iter()
            .find(|(k, _)| k == ACTION)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default();

        log::info!("live api request: action={action}, params={params:?}");

        let req = self.build_request(&params).await.inspect_err(|e| {
            log::error!("live api request {action} is invalid: {e}");
        })?;

        let resp = match self.ctx.http_send(req).await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("live api request {action} failed: {e}");
                return Err(Error::Service(e));
            }
        };

        let (parts, body) = resp.into_parts();
        log::info!(
            "live api response: action={action}, status={}, body={}",
            parts.status,
            String::from_utf8_lossy(&body)
        );

        if !parts.status.is_success() {
            let err = parse_error_response(parts.status, &body);
            log::error!("live api request {action} failed: {err}");
            return Err(err);
        }

        serde_json::from_slice(&body).map_err(|e| {
            log::error!("live api response of {action} is undecodable: {e}");
            Error::Service(
                livesign_core::Error::unexpected("failed to decode live api response")
                    .with_source(e),
            )
        })
    }

    /// List the live domains of the current account.
    ///
    /// - [DescribeLiveUserDomains](https://www.alibabacloud.com/help/en/live/developer-reference/api-live-2016-11-01-describeliveuserdomains)
    pub async fn describe_live_user_domains(&self) -> Result<serde_json::Value> {
        self.request([(ACTION, "DescribeLiveUserDomains")]).await
    }

    /// Build an ingest URL that expires `params.expires_in` from now.
    pub fn ingest_url(&self, params: &IngestUrlParams) -> Result<StreamUrl> {
        stream_url::ingest_url(params, now()).map_err(Error::from)
    }

    /// Build a playback URL that expires `params.expires_in` from now.
    pub fn streaming_url(&self, params: &StreamingUrlParams) -> Result<StreamUrl> {
        stream_url::streaming_url(params, now()).map_err(Error::from)
    }

    async fn build_request(&self, params: &[(String, String)]) -> Result<http::Request<Bytes>> {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let mut url = format!("{}/", self.config.base_url.trim_end_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let req = http::Request::get(url).body(Bytes::new()).map_err(|e| {
            livesign_core::Error::config_invalid(format!(
                "base url {} is invalid",
                self.config.base_url
            ))
            .with_source(e)
        })?;

        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts, None).await?;

        Ok(http::Request::from_parts(parts, body))
    }
}

/// Map a non-success response into an error.
///
/// Bodies carrying a `RequestId` were produced by the API itself and become
/// [`Error::Business`], everything else is a service failure.
fn parse_error_response(status: StatusCode, body: &[u8]) -> Error {
    let value = serde_json::from_slice::<serde_json::Value>(body).ok();

    if let Some(request_id) = value
        .as_ref()
        .and_then(|v| v.get(REQUEST_ID))
        .and_then(|v| v.as_str())
    {
        let field = |name: &str| {
            value
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        return Error::Business {
            status,
            code: field(CODE),
            message: field(MESSAGE),
            request_id: request_id.to_string(),
            body: value.clone().unwrap_or_default(),
        };
    }

    Error::Service(livesign_core::Error::unexpected(format!(
        "live api responded {status}: {}",
        String::from_utf8_lossy(body)
    )))
}
