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

//! Sign live streaming API requests and stream URLs without effort.
//!
//! `livesign` bundles [`livesign_core`] with the service crates behind
//! cargo features:
//!
//! - `default-context`: [`default_context`] backed by reqwest and the process env.
//! - `aliyun`: Aliyun ApsaraVideo Live, see [`aliyun`].
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> livesign::aliyun::Result<()> {
//! let client = livesign::aliyun::default_client(livesign::aliyun::Config::default())?;
//! let domains = client.describe_live_user_domains().await?;
//! println!("{domains}");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use livesign_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, default_context_with_timeout};

#[cfg(feature = "aliyun")]
pub mod aliyun;
