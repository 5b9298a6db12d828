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

//! Tests against the real live management API.
//!
//! Enabled with `LIVESIGN_ALIYUN_LIVE_TEST=on`, credentials are read from
//! `LIVESIGN_ALIYUN_LIVE_ACCESS_KEY_ID` and `LIVESIGN_ALIYUN_LIVE_ACCESS_KEY_SECRET`.

use livesign_aliyun_live::{Client, Config, Error};
use livesign_core::{Context, OsEnv};
use livesign_http_send_reqwest::ReqwestHttpSend;
use log::warn;
use std::env;

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("LIVESIGN_ALIYUN_LIVE_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let config = Config {
        access_key_id: Some(
            env::var("LIVESIGN_ALIYUN_LIVE_ACCESS_KEY_ID")
                .expect("env LIVESIGN_ALIYUN_LIVE_ACCESS_KEY_ID must set"),
        ),
        access_key_secret: Some(
            env::var("LIVESIGN_ALIYUN_LIVE_ACCESS_KEY_SECRET")
                .expect("env LIVESIGN_ALIYUN_LIVE_ACCESS_KEY_SECRET must set"),
        ),
        ..Default::default()
    };

    let http = ReqwestHttpSend::with_timeout(config.timeout).expect("reqwest client must build");
    let ctx = Context::new().with_http_send(http).with_env(OsEnv);

    Some(Client::new(ctx, config))
}

#[tokio::test]
async fn test_live_describe_user_domains() -> anyhow::Result<()> {
    let Some(client) = init_client() else {
        warn!("LIVESIGN_ALIYUN_LIVE_TEST is not set, skipped");
        return Ok(());
    };

    let domains = client.describe_live_user_domains().await?;
    assert!(domains.get("RequestId").is_some());

    Ok(())
}

#[tokio::test]
async fn test_live_wrong_secret_is_business_error() -> anyhow::Result<()> {
    let Some(client) = init_client() else {
        warn!("LIVESIGN_ALIYUN_LIVE_TEST is not set, skipped");
        return Ok(());
    };

    let config = Config {
        access_key_secret: Some("not-the-right-secret".to_string()),
        ..client.config().clone()
    };
    let http = ReqwestHttpSend::with_timeout(config.timeout)?;
    let client = Client::new(Context::new().with_http_send(http), config);

    let err = client.describe_live_user_domains().await.unwrap_err();
    assert!(matches!(err, Error::Business { .. }), "got {err:?}");

    Ok(())
}
