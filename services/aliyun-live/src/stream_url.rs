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

//! Signed ingest and playback URLs.
//!
//! - [URL signing](https://www.alibabacloud.com/help/en/live/user-guide/url-signing)

use crate::constants::{AUTH_KEY, AUTH_KEY_RESERVED_FIELDS};
use livesign_core::hash::hex_md5;
use livesign_core::time::DateTime;
use livesign_core::utils::Redact;
use livesign_core::{Error, Result};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// Scheme used by ingest URLs.
const INGEST_SCHEME: &str = "rtmp";

/// Output format of a live stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamFormat {
    /// Real-Time Messaging Protocol.
    Rtmp,
    /// Raw UDP.
    Udp,
    /// HTTP-FLV.
    Flv,
    /// HLS playlist with an explicit `.m3u8` extension.
    M3u8,
    /// HLS without extension.
    Hls,
}

struct FormatEntry {
    format: StreamFormat,
    tag: &'static str,
    /// `None` means the scheme follows the secure flag.
    scheme: Option<&'static str>,
    extension: &'static str,
}

const FORMATS: &[FormatEntry] = &[
    FormatEntry {
        format: StreamFormat::Rtmp,
        tag: "rtmp",
        scheme: Some("rtmp"),
        extension: "",
    },
    FormatEntry {
        format: StreamFormat::Udp,
        tag: "udp",
        scheme: Some("udp"),
        extension: "",
    },
    FormatEntry {
        format: StreamFormat::Flv,
        tag: "flv",
        scheme: None,
        extension: ".flv",
    },
    FormatEntry {
        format: StreamFormat::M3u8,
        tag: "m3u8",
        scheme: None,
        extension: ".m3u8",
    },
    FormatEntry {
        format: StreamFormat::Hls,
        tag: "hls",
        scheme: None,
        extension: "",
    },
];

impl StreamFormat {
    fn entry(self) -> &'static FormatEntry {
        // Entries follow the variant order.
        &FORMATS[self as usize]
    }

    /// Tag of this format, e.g. `m3u8`.
    pub fn as_str(self) -> &'static str {
        self.entry().tag
    }

    /// URL scheme used to play this format.
    pub fn scheme(self, secure: bool) -> &'static str {
        match self.entry().scheme {
            Some(scheme) => scheme,
            None if secure => "https",
            None => "http",
        }
    }

    /// File extension appended to the stream name, empty if none.
    pub fn extension(self) -> &'static str {
        self.entry().extension
    }
}

impl FromStr for StreamFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FORMATS
            .iter()
            .find(|v| v.tag.eq_ignore_ascii_case(s))
            .map(|v| v.format)
            .ok_or_else(|| Error::request_invalid(format!("unsupported stream format: {s}")))
    }
}

impl Display for StreamFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated stream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamUrl {
    /// Scheme without `://`, e.g. `rtmp`.
    pub scheme: String,
    /// Host of the streaming domain.
    pub host: String,
    /// Path starting with `/`.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
}

impl StreamUrl {
    /// Value of the `auth_key` query parameter.
    pub fn auth_key(&self) -> Option<&str> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == AUTH_KEY)
            .map(|(_, v)| v)
    }
}

impl Display for StreamUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

/// Parameters of an ingest URL.
#[derive(Clone)]
pub struct IngestUrlParams {
    /// Ingest domain.
    pub domain: String,
    /// Application name.
    pub app_name: String,
    /// Stream name.
    pub stream_name: String,
    /// How long the URL stays valid.
    pub expires_in: Duration,
    /// URL signing key configured on the domain.
    pub key: String,
}

impl Debug for IngestUrlParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestUrlParams")
            .field("domain", &self.domain)
            .field("app_name", &self.app_name)
            .field("stream_name", &self.stream_name)
            .field("expires_in", &self.expires_in)
            .field("key", &Redact::from(&self.key))
            .finish()
    }
}

/// Parameters of a playback URL.
#[derive(Clone)]
pub struct StreamingUrlParams {
    /// Playback domain.
    pub domain: String,
    /// Application name.
    pub app_name: String,
    /// Stream name.
    pub stream_name: String,
    /// How long the URL stays valid.
    pub expires_in: Duration,
    /// URL signing key configured on the domain.
    pub key: String,
    /// Output format.
    pub format: StreamFormat,
    /// Use `https` instead of `http` for HTTP based formats.
    pub secure: bool,
}

impl Debug for StreamingUrlParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingUrlParams")
            .field("domain", &self.domain)
            .field("app_name", &self.app_name)
            .field("stream_name", &self.stream_name)
            .field("expires_in", &self.expires_in)
            .field("key", &Redact::from(&self.key))
            .field("format", &self.format)
            .field("secure", &self.secure)
            .finish()
    }
}

/// Build the ingest URL, always `rtmp` without extension.
pub fn ingest_url(params: &IngestUrlParams, now: DateTime) -> Result<StreamUrl> {
    generate_url(
        INGEST_SCHEME,
        &params.domain,
        &params.app_name,
        &params.stream_name,
        "",
        params.expires_in,
        &params.key,
        now,
    )
}

/// Build the playback URL for the requested format.
pub fn streaming_url(params: &StreamingUrlParams, now: DateTime) -> Result<StreamUrl> {
    generate_url(
        params.format.scheme(params.secure),
        &params.domain,
        &params.app_name,
        &params.stream_name,
        params.format.extension(),
        params.expires_in,
        &params.key,
        now,
    )
}

/// Generate a URL carrying an `auth_key` token.
///
/// The token is `{expiry}-0-0-{md5}` where md5 is the hex digest of
/// `{app_name}/{stream_name}/{extension}-{expiry}-0-0-{key}` and expiry is
/// `now + expires_in` in unix seconds.
#[allow(clippy::too_many_arguments)]
pub fn generate_url(
    scheme: &str,
    domain: &str,
    app_name: &str,
    stream_name: &str,
    extension: &str,
    expires_in: Duration,
    key: &str,
    now: DateTime,
) -> Result<StreamUrl> {
    for (name, value) in [
        ("domain", domain),
        ("app_name", app_name),
        ("stream_name", stream_name),
    ] {
        if value.is_empty() {
            return Err(Error::request_invalid(format!(
                "{name} is required to generate stream url"
            )));
        }
    }

    let expires_in = chrono::TimeDelta::from_std(expires_in).map_err(|e| {
        Error::request_invalid(format!("invalid expiration duration: {expires_in:?}"))
            .with_source(e)
    })?;
    let expiry = now
        .checked_add_signed(expires_in)
        .ok_or_else(|| Error::request_invalid("stream url expiry is out of range"))?
        .timestamp();

    let payload =
        format!("{app_name}/{stream_name}/{extension}-{expiry}{AUTH_KEY_RESERVED_FIELDS}{key}");
    let auth_key = hex_md5(payload.as_bytes());

    Ok(StreamUrl {
        scheme: scheme.to_string(),
        host: domain.to_string(),
        path: format!("/{app_name}/{stream_name}{extension}"),
        query: format!("{AUTH_KEY}={expiry}{AUTH_KEY_RESERVED_FIELDS}{auth_key}"),
    })
}
