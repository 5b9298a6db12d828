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

use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    ///
    /// Query pairs are written as is, so they must already be percent encoded.
    /// Every pair is written as `k=v`, an empty value keeps its `=`.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        let query_size = self.query_size();

        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = if query_size == 0 {
                    self.path
                } else {
                    let mut s = self.path;
                    s.reserve(query_size + self.query.len() * 2 + 1);

                    s.push('?');
                    for (i, (k, v)) in self.query.iter().enumerate() {
                        if i > 0 {
                            s.push('&');
                        }

                        s.push_str(k);
                        s.push('=');
                        s.push_str(v);
                    }

                    s
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get query size.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_decodes_query() {
        let mut parts = http::Request::get("https://live.aliyuncs.com/?Action=Describe&Name=a%20b")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let req = SigningRequest::build(&mut parts).unwrap();
        assert_eq!(req.authority.as_str(), "live.aliyuncs.com");
        assert_eq!(req.path, "/");
        assert_eq!(
            req.query,
            vec![
                ("Action".to_string(), "Describe".to_string()),
                ("Name".to_string(), "a b".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_without_authority() {
        let mut parts = http::Request::get("/relative")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let err = SigningRequest::build(&mut parts).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_apply_writes_query_back() {
        let mut parts = http::Request::get("https://live.aliyuncs.com/")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let mut req = SigningRequest::build(&mut parts).unwrap();
        req.query_push("Action", "Describe");
        req.query_push("Signature", "abc%3D");
        req.apply(&mut parts).unwrap();

        assert_eq!(
            parts.uri.to_string(),
            "https://live.aliyuncs.com/?Action=Describe&Signature=abc%3D"
        );
    }

    #[test]
    fn test_apply_keeps_empty_value() {
        let mut parts = http::Request::get("https://live.aliyuncs.com/?Action=Describe&DomainName=")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let req = SigningRequest::build(&mut parts).unwrap();
        assert_eq!(req.query[1], ("DomainName".to_string(), String::new()));
        req.apply(&mut parts).unwrap();

        assert_eq!(
            parts.uri.to_string(),
            "https://live.aliyuncs.com/?Action=Describe&DomainName="
        );
    }
}
