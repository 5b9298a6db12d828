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

//! Aliyun ApsaraVideo Live support for livesign.
//!
//! This crate signs requests to the live management API and builds
//! time limited ingest and playback URLs.
//!
//! ## Example
//!
//! ```no_run
//! use livesign_aliyun_live::{Client, Config, StreamFormat, StreamingUrlParams};
//! use livesign_core::Context;
//! use std::time::Duration;
//!
//! # async fn example(ctx: Context) -> livesign_aliyun_live::Result<()> {
//! let config = Config {
//!     access_key_id: Some("access_key_id".to_string()),
//!     access_key_secret: Some("access_key_secret".to_string()),
//!     ..Default::default()
//! };
//! let client = Client::new(ctx, config);
//!
//! let domains = client.describe_live_user_domains().await?;
//! println!("{domains}");
//!
//! let url = client.streaming_url(&StreamingUrlParams {
//!     domain: "play.example.com".to_string(),
//!     app_name: "live".to_string(),
//!     stream_name: "room".to_string(),
//!     expires_in: Duration::from_secs(3600),
//!     key: "url_signing_key".to_string(),
//!     format: StreamFormat::M3u8,
//!     secure: true,
//! })?;
//! println!("{url}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod error;
pub use error::{Error, Result};

mod sign_request;
pub use sign_request::{sign_parameters, RequestSigner};

mod stream_url;
pub use stream_url::{
    generate_url, ingest_url, streaming_url, IngestUrlParams, StreamFormat, StreamUrl,
    StreamingUrlParams,
};

mod client;
pub use client::Client;

mod provide_credential;
pub use provide_credential::*;
