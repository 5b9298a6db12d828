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

use crate::{Config, Credential};
use async_trait::async_trait;
use livesign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// Reads the credential set on [`Config`].
///
/// Yields nothing unless both the access key id and secret are present, so a
/// half filled config falls through to the next provider in the chain.
#[derive(Debug)]
pub struct ConfigCredentialProvider(Arc<Config>);

impl ConfigCredentialProvider {
    /// Create a provider reading from `config`.
    pub fn new(config: Arc<Config>) -> Self {
        Self(config)
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Credential>> {
        let config = &self.0;
        let cred = config
            .access_key_id
            .as_ref()
            .zip(config.access_key_secret.as_ref())
            .map(|(id, secret)| Credential {
                access_key_id: id.clone(),
                access_key_secret: secret.clone(),
                security_token: config.security_token.clone(),
            });

        Ok(cred)
    }
}
