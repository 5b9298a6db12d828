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

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use livesign_aliyun_live::{sign_parameters, Client, Config, Error, StaticCredentialProvider};
use livesign_core::{Context, ErrorKind, HttpSend, StaticEnv};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

mod live;

const COMMON_PARAMS: [&str; 7] = [
    "Format",
    "Version",
    "SignatureMethod",
    "SignatureVersion",
    "AccessKeyId",
    "SignatureNonce",
    "Timestamp",
];

/// HttpSend that records every request and replies with a canned response.
#[derive(Debug, Clone)]
struct MockHttpSend {
    reply: Option<(StatusCode, &'static str)>,
    requests: Arc<Mutex<Vec<(http::Method, http::Uri)>>>,
}

impl MockHttpSend {
    fn reply(status: StatusCode, body: &'static str) -> Self {
        Self {
            reply: Some((status, body)),
            requests: Arc::default(),
        }
    }

    fn unreachable() -> Self {
        Self {
            reply: None,
            requests: Arc::default(),
        }
    }

    fn sent(&self) -> Vec<(http::Method, http::Uri)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(
        &self,
        req: http::Request<Bytes>,
    ) -> livesign_core::Result<http::Response<Bytes>> {
        self.requests
            .lock()
            .unwrap()
            .push((req.method().clone(), req.uri().clone()));

        let Some((status, body)) = self.reply else {
            return Err(livesign_core::Error::unexpected(
                "error sending request: connection refused",
            ));
        };
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))?)
    }
}

fn test_config() -> Config {
    Config {
        access_key_id: Some("test_access_key_id".to_string()),
        access_key_secret: Some("test_access_key_secret".to_string()),
        ..Default::default()
    }
}

fn test_client(http: MockHttpSend) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    Client::new(Context::new().with_http_send(http), test_config())
}

fn query_pairs((_, uri): &(http::Method, http::Uri)) -> Vec<(String, String)> {
    form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[tokio::test]
async fn test_describe_live_user_domains() -> anyhow::Result<()> {
    let http = MockHttpSend::reply(
        StatusCode::OK,
        r#"{"RequestId":"A1B2","TotalCount":1,"Domains":{"PageData":[{"DomainName":"play.example.com","LiveDomainType":"liveVideo"}]}}"#,
    );
    let client = test_client(http.clone());

    let domains = client.describe_live_user_domains().await?;
    assert_eq!(
        domains["Domains"]["PageData"][0]["DomainName"],
        "play.example.com"
    );

    let sent = http.sent();
    assert_eq!(sent.len(), 1);
    let req = &sent[0];
    assert_eq!(req.0, http::Method::GET);
    assert_eq!(req.1.host(), Some("live.aliyuncs.com"));
    assert_eq!(req.1.path(), "/");

    let pairs = query_pairs(req);
    for name in COMMON_PARAMS.iter().chain([&"Action", &"Signature"]) {
        assert_eq!(
            pairs.iter().filter(|(k, _)| k == name).count(),
            1,
            "{name} must be sent exactly once"
        );
    }
    assert_eq!(pairs.last().map(|(k, _)| k.as_str()), Some("Signature"));

    let params: HashMap<_, _> = pairs.iter().cloned().collect();
    assert_eq!(params["Action"], "DescribeLiveUserDomains");
    assert_eq!(params["Format"], "json");
    assert_eq!(params["Version"], "2016-11-01");
    assert_eq!(params["AccessKeyId"], "test_access_key_id");

    Ok(())
}

#[tokio::test]
async fn test_sent_signature_verifies() -> anyhow::Result<()> {
    let http = MockHttpSend::reply(StatusCode::OK, r#"{"RequestId":"A1B2"}"#);
    let client = test_client(http.clone());

    let _: serde_json::Value = client
        .request([
            ("Action", "DescribeLiveStreamsOnlineList"),
            ("DomainName", "play.example.com"),
            ("AppName", "live app*~"),
        ])
        .await?;

    let pairs = query_pairs(&http.sent()[0]);
    let (signature, rest) = pairs.split_last().unwrap();
    assert_eq!(signature.0, "Signature");

    let expected = sign_parameters(
        rest.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        "GET",
        "test_access_key_secret",
    );
    assert_eq!(signature.1, expected);

    let raw_query = http.sent()[0].1.query().unwrap().to_string();
    assert!(raw_query.contains("AppName=live%20app%2A~"));

    Ok(())
}

#[tokio::test]
async fn test_typed_response() -> anyhow::Result<()> {
    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct OnlineList {
        request_id: String,
        total_num: u32,
    }

    let http = MockHttpSend::reply(StatusCode::OK, r#"{"RequestId":"A1B2","TotalNum":3}"#);
    let client = test_client(http);

    let resp: OnlineList = client
        .request([("Action", "DescribeLiveStreamsOnlineList"), ("PageSize", "20")])
        .await?;
    assert_eq!(resp.request_id, "A1B2");
    assert_eq!(resp.total_num, 3);

    Ok(())
}

#[tokio::test]
async fn test_non_string_params_are_stringified() -> anyhow::Result<()> {
    let http = MockHttpSend::reply(StatusCode::OK, "{}");
    let client = test_client(http.clone());

    let _: serde_json::Value = client
        .request([("Action", "DescribeLiveUserDomains".to_string()), ("PageSize", 20.to_string())])
        .await?;
    let _: serde_json::Value = client.request([("PageNumber", 2), ("PageSize", 50)]).await?;

    let params: HashMap<_, _> = query_pairs(&http.sent()[1]).into_iter().collect();
    assert_eq!(params["PageNumber"], "2");
    assert_eq!(params["PageSize"], "50");

    Ok(())
}

#[tokio::test]
async fn test_business_error() {
    let http = MockHttpSend::reply(
        StatusCode::FORBIDDEN,
        r#"{"RequestId":"7C8D","HostId":"live.aliyuncs.com","Code":"InvalidAccessKeyId.NotFound","Message":"Specified access key is not found."}"#,
    );
    let client = test_client(http);

    let err = client.describe_live_user_domains().await.unwrap_err();
    assert!(err.is_business());
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    let Error::Business {
        code,
        message,
        request_id,
        ..
    } = err
    else {
        panic!("expected business error");
    };
    assert_eq!(code, "InvalidAccessKeyId.NotFound");
    assert_eq!(message, "Specified access key is not found.");
    assert_eq!(request_id, "7C8D");
}

#[tokio::test]
async fn test_transport_failure() {
    let client = test_client(MockHttpSend::unreachable());

    let err = client.describe_live_user_domains().await.unwrap_err();
    assert!(!err.is_business());
    assert_eq!(err.status(), None);
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_error_without_request_id() {
    let client = test_client(MockHttpSend::reply(
        StatusCode::BAD_GATEWAY,
        "<html>502 Bad Gateway</html>",
    ));

    let err = client.describe_live_user_domains().await.unwrap_err();
    assert!(matches!(err, Error::Service(_)));
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let client = test_client(MockHttpSend::reply(StatusCode::OK, "not json"));

    let err = client.describe_live_user_domains().await.unwrap_err();
    let Error::Service(source) = err else {
        panic!("expected service error");
    };
    assert_eq!(source.kind(), ErrorKind::Unexpected);
}

#[tokio::test]
async fn test_missing_credential_fails_before_sending() {
    let http = MockHttpSend::reply(StatusCode::OK, "{}");
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_env(StaticEnv {
            envs: HashMap::new(),
        });
    let client = Client::new(ctx, Config::default());

    let err = client.describe_live_user_domains().await.unwrap_err();
    let Error::Service(source) = err else {
        panic!("expected service error");
    };
    assert_eq!(source.kind(), ErrorKind::CredentialInvalid);
    assert!(http.sent().is_empty());
}

#[tokio::test]
async fn test_caller_signature_is_rejected() {
    let http = MockHttpSend::reply(StatusCode::OK, "{}");
    let client = test_client(http.clone());

    let err = client
        .request::<serde_json::Value, _, _>([("Action", "DescribeLiveUserDomains"), ("Signature", "forged")])
        .await
        .unwrap_err();
    let Error::Service(source) = err else {
        panic!("expected service error");
    };
    assert_eq!(source.kind(), ErrorKind::RequestInvalid);
    assert!(http.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_base_url() {
    let http = MockHttpSend::reply(StatusCode::OK, "{}");
    let config = Config {
        base_url: "https://live aliyuncs com".to_string(),
        ..test_config()
    };
    let client = Client::new(Context::new().with_http_send(http.clone()), config);

    let err = client.describe_live_user_domains().await.unwrap_err();
    let Error::Service(source) = err else {
        panic!("expected service error");
    };
    assert_eq!(source.kind(), ErrorKind::ConfigInvalid);
    assert!(http.sent().is_empty());
}

#[tokio::test]
async fn test_custom_credential_provider_with_security_token() -> anyhow::Result<()> {
    let http = MockHttpSend::reply(StatusCode::OK, "{}");
    let client = Client::with_credential_provider(
        Context::new().with_http_send(http.clone()),
        Arc::new(Config::default()),
        StaticCredentialProvider::new("sts_access_key_id", "sts_access_key_secret")
            .with_security_token("sts_token"),
    );

    let _: serde_json::Value = client.describe_live_user_domains().await?;

    let params: HashMap<_, _> = query_pairs(&http.sent()[0]).into_iter().collect();
    assert_eq!(params["AccessKeyId"], "sts_access_key_id");
    assert_eq!(params["SecurityToken"], "sts_token");

    Ok(())
}

#[tokio::test]
async fn test_each_call_uses_fresh_nonce() -> anyhow::Result<()> {
    let http = MockHttpSend::reply(StatusCode::OK, "{}");
    let client = test_client(http.clone());

    client.describe_live_user_domains().await?;
    client.describe_live_user_domains().await?;

    let nonces: Vec<String> = http
        .sent()
        .iter()
        .map(|req| {
            query_pairs(req)
                .into_iter()
                .find(|(k, _)| k == "SignatureNonce")
                .map(|(_, v)| v)
                .unwrap()
        })
        .collect();
    assert_ne!(nonces[0], nonces[1]);

    Ok(())
}
