//! Response values and the overrides used to build them.

use crate::error::FetchError;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const TEXT_PLAIN_UTF8: &str = "text/plain;charset=UTF-8";

/// Response produced by a call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    status_text: String,
    headers: HeaderMap,
    body: Bytes,
    url: String,
    redirected: bool,
}

impl Response {
    /// 200 response with the given body and no reported URL.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            status_text: String::new(),
            headers: HeaderMap::new(),
            body: body.into(),
            url: String::new(),
            redirected: false,
        }
    }

    /// Build a response from an optional text body and overrides.
    ///
    /// A text body without an explicit content type is labelled
    /// `text/plain;charset=UTF-8`.
    pub fn from_init(body: Option<String>, init: &ResponseInit) -> Result<Self, FetchError> {
        let code = init.status.unwrap_or(200);
        if !(200..=599).contains(&code) {
            return Err(FetchError::InvalidResponse(format!(
                "status {code} is outside 200..=599"
            )));
        }
        let status = StatusCode::from_u16(code)
            .map_err(|e| FetchError::InvalidResponse(format!("status {code}: {e}")))?;

        let mut headers = HeaderMap::new();
        for (name, value) in init.headers.iter().flatten() {
            let header = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                FetchError::InvalidResponse(format!("invalid header name {name:?}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                FetchError::InvalidResponse(format!("invalid value for header {name}"))
            })?;
            headers.append(header, value);
        }
        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8));
        }

        Ok(Self {
            status,
            status_text: init.status_text.clone().unwrap_or_default(),
            headers,
            body: body.map(Bytes::from).unwrap_or_default(),
            url: init.url.clone().unwrap_or_default(),
            redirected: init.counter.unwrap_or(0) >= 1,
        })
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Force the reported URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_redirected(mut self, redirected: bool) -> Self {
        self.redirected = redirected;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Reported URL; empty for constructed responses unless forced.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn redirected(&self) -> bool {
        self.redirected
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Overrides applied when a response is synthesized.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "header_pairs")]
    pub headers: Option<Vec<(String, String)>>,
    /// Reported URL of the synthesized response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Values >= 1 mark the response as redirected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u32>,
}

impl ResponseInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Layer `this` underneath `top`: fields set in `top` win, field by field.
    ///
    /// Header lists are not merged; a header list in `top` replaces ours.
    pub fn under(&self, top: &ResponseInit) -> ResponseInit {
        ResponseInit {
            status: top.status.or(self.status),
            status_text: top.status_text.clone().or_else(|| self.status_text.clone()),
            headers: top.headers.clone().or_else(|| self.headers.clone()),
            url: top.url.clone().or_else(|| self.url.clone()),
            counter: top.counter.or(self.counter),
        }
    }
}

/// Response described field by field rather than pre-built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResponseDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub init: ResponseInit,
}

impl ResponseDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            init: ResponseInit::default(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.init = self.init.with_status(status);
        self
    }

    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.init = self.init.with_status_text(text);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.init = self.init.with_header(name, value);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.init = self.init.with_url(url);
        self
    }

    pub fn with_counter(mut self, counter: u32) -> Self {
        self.init = self.init.with_counter(counter);
        self
    }
}

/// Headers are written as a `name: value` map in config files.
mod header_pairs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(value: &Option<Vec<(String, String)>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let map: Option<BTreeMap<&str, &str>> = value
            .as_ref()
            .map(|pairs| pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect());
        map.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<(String, String)>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Option::<BTreeMap<String, String>>::deserialize(deserializer)?;
        Ok(map.map(|m| m.into_iter().collect()))
    }
}
