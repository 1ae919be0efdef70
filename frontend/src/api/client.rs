use std::{rc::Rc, time::Duration};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
    multipart, Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{
    envelope::ListEnvelope,
    retry::{self, RetryPolicy},
    types::{ApiError, DownloadedFile, UploadFile},
};
use crate::{
    config,
    state::{
        notifications::{LogNotifier, Notifier},
        session::Session,
    },
    utils::navigation::{default_navigator, redirect_to_login, Navigator},
};

/// Endpoints whose 401 means "bad credentials", not "session expired".
pub const AUTH_PATHS: &[&str] = &["/auth/login", "/auth/token"];

const REQUEST_ID_HEADER: &str = "x-request-id";

const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart { field: String, file: UploadFile },
}

#[derive(Debug, Clone)]
struct RequestSpec {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

#[derive(Debug)]
struct RawResponse {
    content_type: Option<String>,
    content_disposition: Option<String>,
    bytes: Vec<u8>,
}

/// Shared request pipeline. Cheap to clone; provided through context.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Option<String>,
    session: Session,
    navigator: Rc<dyn Navigator>,
    notifier: Rc<dyn Notifier>,
    retry: Option<RetryPolicy>,
    timeout: Option<Duration>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            base_url: None,
            session: Session::browser(),
            navigator: default_navigator(),
            notifier: Rc::new(LogNotifier),
            retry: None,
            timeout: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn with_navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> Rc<dyn Navigator> {
        Rc::clone(&self.navigator)
    }

    fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => config::current().api_base_url,
        }
    }

    fn resolved_timeout(&self) -> Duration {
        self.timeout
            .unwrap_or_else(|| Duration::from_millis(config::current().request_timeout_ms))
    }

    fn resolved_retry(&self) -> RetryPolicy {
        self.retry
            .unwrap_or_else(|| RetryPolicy::from_config(&config::current().retry))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_json_with_query(path, &()).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let raw = self
            .execute(Method::GET, path, query_pairs(query)?, RequestBody::Empty)
            .await?;
        decode_json(&raw.bytes)
    }

    /// GET that accepts any list response shape.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        self.get_list_with_query(path, &()).await
    }

    pub async fn get_list_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let envelope: ListEnvelope<T> = self.get_json_with_query(path, query).await?;
        Ok(envelope.into_items())
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self
            .execute(Method::POST, path, Vec::new(), json_body(body)?)
            .await?;
        decode_json(&raw.bytes)
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let raw = self
            .execute(Method::POST, path, Vec::new(), RequestBody::Empty)
            .await?;
        decode_json(&raw.bytes)
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self
            .execute(Method::PUT, path, Vec::new(), json_body(body)?)
            .await?;
        decode_json(&raw.bytes)
    }

    /// PATCH carrying its arguments in the query string; the body is ignored.
    pub async fn patch_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<(), ApiError> {
        self.execute(Method::PATCH, path, query_pairs(query)?, RequestBody::Empty)
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, Vec::new(), RequestBody::Empty)
            .await
            .map(|_| ())
    }

    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file: UploadFile,
    ) -> Result<T, ApiError> {
        let body = RequestBody::Multipart {
            field: field.to_string(),
            file,
        };
        let raw = self.execute(Method::POST, path, Vec::new(), body).await?;
        decode_json(&raw.bytes)
    }

    /// Binary GET; the payload is handed back untouched.
    pub async fn download<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<DownloadedFile, ApiError> {
        let raw = self
            .execute(Method::GET, path, query_pairs(query)?, RequestBody::Empty)
            .await?;
        Ok(DownloadedFile {
            filename: raw
                .content_disposition
                .as_deref()
                .and_then(filename_from_disposition),
            content_type: raw.content_type,
            bytes: raw.bytes,
        })
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> Result<RawResponse, ApiError> {
        let spec = RequestSpec {
            method,
            path: path.to_string(),
            query,
            body,
        };
        let policy = self.resolved_retry();
        let mut attempt = 0;
        loop {
            match self.send_once(&spec).await {
                Ok(raw) => return Ok(raw),
                Err(error) => {
                    attempt += 1;
                    if policy.should_retry(&spec.method, &error, attempt) {
                        log::warn!(
                            "{} {} failed ({}), retry {}/{}",
                            spec.method,
                            spec.path,
                            error.code,
                            attempt,
                            policy.max_retries
                        );
                        retry::sleep(policy.delay_for(attempt)).await;
                        continue;
                    }
                    self.handle_failure(&spec.path, &error);
                    return Err(error);
                }
            }
        }
    }

    async fn send_once(&self, spec: &RequestSpec) -> Result<RawResponse, ApiError> {
        let url = build_url(&self.resolved_base_url(), &spec.path, &spec.query);
        let request_id = Uuid::new_v4().to_string();
        let headers = request_headers(
            self.session.token().as_deref(),
            &spec.body,
            &request_id,
        )?;
        let mut builder = self.http.request(spec.method.clone(), &url).headers(headers);
        builder = match &spec.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(
                serde_json::to_vec(value).map_err(|e| ApiError::unknown(e.to_string()))?,
            ),
            RequestBody::Multipart { field, file } => builder.multipart(multipart_form(field, file)?),
        };

        let started = chrono::Utc::now();
        let exchange = async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let content_type = header_text(response.headers(), CONTENT_TYPE.as_str());
            let content_disposition =
                header_text(response.headers(), CONTENT_DISPOSITION.as_str());
            let bytes = response.bytes().await?.to_vec();
            Ok::<_, reqwest::Error>((status, content_type, content_disposition, bytes))
        };

        let outcome = retry::with_timeout(exchange, self.resolved_timeout()).await;
        let elapsed = (chrono::Utc::now() - started).num_milliseconds();
        match outcome {
            None => {
                log::warn!("{} {} [{}] timed out", spec.method, spec.path, request_id);
                Err(ApiError::timeout())
            }
            Some(Err(err)) if err.is_timeout() => Err(ApiError::timeout()),
            Some(Err(err)) => {
                log::warn!("{} {} [{}] failed: {}", spec.method, spec.path, request_id, err);
                Err(ApiError::network())
            }
            Some(Ok((status, content_type, content_disposition, bytes))) => {
                log::debug!(
                    "{} {} [{}] -> {} in {}ms",
                    spec.method,
                    spec.path,
                    request_id,
                    status,
                    elapsed
                );
                if (200..300).contains(&status) {
                    Ok(RawResponse {
                        content_type,
                        content_disposition,
                        bytes,
                    })
                } else {
                    Err(ApiError::from_status(status, &bytes))
                }
            }
        }
    }

    fn handle_failure(&self, path: &str, error: &ApiError) {
        if error.is_unauthorized() && !is_auth_path(path) {
            log::info!("session rejected by {}, signing out", path);
            self.session.end();
            redirect_to_login(self.navigator.as_ref());
        }
        if error.reported_by_client() {
            self.notifier.error(&error.error);
        }
    }
}

pub fn is_auth_path(path: &str) -> bool {
    let bare = path.split('?').next().unwrap_or(path).trim_end_matches('/');
    AUTH_PATHS.iter().any(|auth| bare.ends_with(auth))
}

/// Headers for one attempt. Multipart bodies never get a JSON content
/// type so the transport can add its own boundary.
pub fn request_headers(
    token: Option<&str>,
    body: &RequestBody,
    request_id: &str,
) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::validation("Invalid token format"))?,
        );
    }
    if matches!(body, RequestBody::Json(_)) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    if let Ok(value) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    Ok(headers)
}

pub fn build_url(base: &str, path: &str, query: &[(String, String)]) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if !query.is_empty() {
        let encoded: Vec<String> = query
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_SET),
                    utf8_percent_encode(value, QUERY_SET)
                )
            })
            .collect();
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&encoded.join("&"));
    }
    url
}

pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, QUERY_SET).to_string()
}

/// Flattens a serializable struct into query pairs, skipping `null`s.
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(query).map_err(|e| ApiError::unknown(e.to_string()))?;
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ApiError::unknown(format!(
                "query must be an object, got {}",
                other
            )))
        }
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::unknown(e.to_string()))
}

fn multipart_form(field: &str, file: &UploadFile) -> Result<multipart::Form, ApiError> {
    let mut part = multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
    if let Some(mime) = &file.mime {
        part = part
            .mime_str(mime)
            .map_err(|_| ApiError::validation(format!("不支持的文件类型: {}", mime)))?;
    }
    Ok(multipart::Form::new().part(field.to_string(), part))
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(payload).map_err(|e| {
        log::warn!("failed to decode response: {}", e);
        ApiError::decode(e.to_string())
    })
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Extracts `filename` (or RFC 5987 `filename*`) from Content-Disposition.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        if let Some(encoded) = part.strip_prefix("filename*=") {
            let value = encoded.rsplit("''").next().unwrap_or(encoded);
            if let Ok(decoded) = percent_encoding::percent_decode_str(value).decode_utf8() {
                return Some(decoded.trim_matches('"').to_string());
            }
        } else if let Some(value) = part.strip_prefix("filename=") {
            plain = Some(value.trim_matches('"').to_string());
        }
    }
    plain.filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn auth_paths_are_recognized() {
        assert!(is_auth_path("/auth/login"));
        assert!(is_auth_path("/auth/token?x=1"));
        assert!(!is_auth_path("/employees/me"));
    }

    #[test]
    fn json_body_gets_content_type_and_bearer() {
        let headers =
            request_headers(Some("abc"), &RequestBody::Json(Value::Null), "rid").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(REQUEST_ID_HEADER).unwrap(), "rid");
    }

    #[test]
    fn multipart_body_never_gets_json_content_type() {
        let body = RequestBody::Multipart {
            field: "file".into(),
            file: UploadFile {
                name: "a.xlsx".into(),
                mime: None,
                bytes: vec![1, 2, 3],
            },
        };
        let headers = request_headers(Some("abc"), &body, "rid").unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert!(headers.get(AUTHORIZATION).is_some());
    }

    #[test]
    fn no_token_means_no_authorization_header() {
        let headers = request_headers(None, &RequestBody::Empty, "rid").unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[derive(Serialize)]
    struct Filter {
        name: Option<String>,
        year: i32,
        #[serde(rename = "startDate")]
        start_date: Option<String>,
    }

    #[test]
    fn query_pairs_skip_nulls_and_encode_values() {
        let pairs = query_pairs(&Filter {
            name: Some("张 三".into()),
            year: 2024,
            start_date: None,
        })
        .unwrap();
        assert_eq!(pairs.len(), 2);
        let url = build_url("http://host/api/", "/attendance", &pairs);
        assert!(url.starts_with("http://host/api/attendance?"));
        assert!(url.contains("year=2024"));
        assert!(url.contains("name=%E5%BC%A0%20%E4%B8%89"));
        assert!(!url.contains("startDate"));
    }

    #[test]
    fn unit_query_produces_no_pairs() {
        assert!(query_pairs(&()).unwrap().is_empty());
        assert_eq!(build_url("http://h/api", "reports", &[]), "http://h/api/reports");
    }

    #[test]
    fn disposition_filename_prefers_extended_form() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"a.xlsx\"").as_deref(),
            Some("a.xlsx")
        );
        assert_eq!(
            filename_from_disposition(
                "attachment; filename=\"x.xlsx\"; filename*=UTF-8''%E8%80%83%E5%8B%A4.xlsx"
            )
            .as_deref(),
            Some("考勤.xlsx")
        );
        assert!(filename_from_disposition("inline").is_none());
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let value: Option<Value> = decode_json(b"").unwrap();
        assert!(value.is_none());
    }
}
