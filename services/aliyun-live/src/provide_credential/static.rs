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

use crate::Credential;
use async_trait::async_trait;
use livesign_core::{Context, ProvideCredential, Result};

/// Provider that hands out a fixed credential, e.g. one fetched from a vault
/// or an STS token issued by the caller.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider(Credential);

impl StaticCredentialProvider {
    /// Create a provider holding a long term access key.
    pub fn new(access_key_id: &str, access_key_secret: &str) -> Self {
        Self(Credential {
            access_key_id: access_key_id.to_string(),
            access_key_secret: access_key_secret.to_string(),
            security_token: None,
        })
    }

    /// Attach an STS security token, signed as `SecurityToken`.
    pub fn with_security_token(mut self, token: &str) -> Self {
        self.0.security_token = Some(token.to_string());
        self
    }
}

impl From<Credential> for StaticCredentialProvider {
    fn from(cred: Credential) -> Self {
        Self(cred)
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Credential>> {
        Ok(Some(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_static_provider_returns_sts_credential() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::new("STS.NUk3", "sts_secret")
            .with_security_token("CAIS8gF1q6Ft5B2yfSjIr5bN");

        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("static provider always has a credential");
        assert_eq!(cred.access_key_id, "STS.NUk3");
        assert_eq!(cred.access_key_secret, "sts_secret");
        assert_eq!(
            cred.security_token.as_deref(),
            Some("CAIS8gF1q6Ft5B2yfSjIr5bN")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_static_provider_from_credential() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::from(Credential {
            access_key_id: "123".to_string(),
            access_key_secret: "321".to_string(),
            security_token: None,
        });

        let cred = provider.provide_credential(&Context::new()).await?;
        assert!(cred.is_some_and(|c| c.security_token.is_none()));
        Ok(())
    }
}
