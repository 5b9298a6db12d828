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

//! Aliyun ApsaraVideo Live support with convenience APIs.

pub use livesign_aliyun_live::*;

#[cfg(feature = "default-context")]
use crate::default_context_with_timeout;

/// Create a live client with the default context.
///
/// - Requests are sent by reqwest and time out after `config.timeout`.
/// - Credentials unset in `config` are loaded from `ALIBABA_CLOUD_*` env values.
#[cfg(feature = "default-context")]
pub fn default_client(config: Config) -> Result<Client> {
    let ctx = default_context_with_timeout(config.timeout)?;
    Ok(Client::new(ctx, config))
}

#[cfg(all(test, feature = "default-context"))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_client_keeps_config() {
        let config = Config {
            timeout: Duration::from_secs(10),
            access_key_id: Some("access_key_id".to_string()),
            access_key_secret: Some("access_key_secret".to_string()),
            ..Default::default()
        };

        let client = default_client(config).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(10));
        assert_eq!(client.config().base_url, "https://live.aliyuncs.com");
    }

    #[test]
    fn test_default_stream_url() {
        let client = default_client(Config::default()).unwrap();
        let url = client
            .streaming_url(&StreamingUrlParams {
                domain: "play.example.com".to_string(),
                app_name: "live".to_string(),
                stream_name: "room".to_string(),
                expires_in: Duration::from_secs(60),
                key: "url_signing_key".to_string(),
                format: "flv".parse().unwrap(),
                secure: true,
            })
            .unwrap();

        assert!(url.to_string().starts_with("https://play.example.com/live/room.flv?auth_key="));
    }
}
