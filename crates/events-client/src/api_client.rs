//! HTTP client that re-validates every response envelope.
//!
//! A body is accepted as a success only when it is a success envelope and its
//! `data` passes the caller's DTO assertion. Otherwise it is tried as an error
//! envelope, and if that fails too the call resolves to a local failure with
//! no status. Nothing is raised past this boundary.

use std::sync::OnceLock;

use events_dto::{
    ApiErrorResponseDto, ApiSuccessResponseDto, AssertionFn, DtoAssertionError,
    api_error_response_dto_schema, api_success_response_dto_schema, create_assertion_fn,
};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::response::{ApiFailure, ApiResponse};

const ASSERTION_ERROR_NAME: &str = "DtoAssertionError";
const TIMEOUT_ERROR_NAME: &str = "TimeoutError";
const NETWORK_ERROR_NAME: &str = "NetworkError";

/// Failures while building the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL cannot have paths joined onto it.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        message: String,
    },
    /// The HTTP client could not be initialised.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

fn success_envelope() -> &'static AssertionFn {
    static ASSERTION: OnceLock<AssertionFn> = OnceLock::new();
    ASSERTION.get_or_init(|| {
        create_assertion_fn("ApiSuccessResponseDto", api_success_response_dto_schema())
    })
}

fn error_envelope() -> &'static AssertionFn {
    static ASSERTION: OnceLock<AssertionFn> = OnceLock::new();
    ASSERTION
        .get_or_init(|| create_assertion_fn("ApiErrorResponseDto", api_error_response_dto_schema()))
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |message: String| ClientError::InvalidBaseUrl {
        url: raw.to_owned(),
        message,
    };
    let mut url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_owned()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn assertion_failure(err: &DtoAssertionError) -> ApiFailure {
    ApiFailure::local(ASSERTION_ERROR_NAME, &err.to_string())
}

fn transport_failure(err: &reqwest::Error) -> ApiFailure {
    let name = if err.is_timeout() {
        TIMEOUT_ERROR_NAME
    } else {
        NETWORK_ERROR_NAME
    };
    ApiFailure::local(name, &err.to_string())
}

fn parse_success<T: DeserializeOwned>(
    body: Value,
    data: &AssertionFn,
) -> Result<ApiSuccessResponseDto<T>, DtoAssertionError> {
    success_envelope().assert(&body)?;
    data.assert(body.get("data").unwrap_or(&Value::Null))?;
    success_envelope().parse(body)
}

/// Classify a decoded body.
///
/// Successful transports try the success envelope first and report its
/// assertion failure if neither envelope matches. Failed transports go
/// straight to the error envelope.
fn interpret<T: DeserializeOwned>(
    transport_ok: bool,
    body: Value,
    data: &AssertionFn,
) -> ApiResponse<T> {
    let success_error = if transport_ok {
        match parse_success(body.clone(), data) {
            Ok(envelope) => return ApiResponse::Success(envelope),
            Err(err) => Some(err),
        }
    } else {
        None
    };

    match error_envelope().parse::<ApiErrorResponseDto>(body) {
        Ok(envelope) => ApiResponse::Error(envelope.into()),
        Err(err) => {
            let failure = success_error.as_ref().unwrap_or(&err);
            debug!(error = %failure, "response matched neither envelope");
            ApiResponse::Error(assertion_failure(failure))
        }
    }
}

/// Client for the events REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    /// Returns [`ClientError`] for an unusable base URL or when the HTTP
    /// client cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(config.base_url())?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Root every request path is joined onto.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request and validate the response `data` with `data`.
    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        data: &AssertionFn,
    ) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = match self.base_url.join(path.trim_start_matches('/')) {
            Ok(url) => url,
            Err(err) => {
                return ApiResponse::Error(ApiFailure::local("InvalidUrl", &err.to_string()));
            }
        };

        let mut request = self.http.request(method, url);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return ApiResponse::Error(transport_failure(&err)),
        };
        let transport_ok = response.status().is_success();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return ApiResponse::Error(transport_failure(&err)),
        };
        let decoded = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        interpret(transport_ok, decoded, data)
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, data: &AssertionFn) -> ApiResponse<T> {
        self.send::<(), T>(Method::GET, path, None, data).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B, data: &AssertionFn) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body), data).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch<B, T>(&self, path: &str, body: &B, data: &AssertionFn) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, Some(body), data).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        data: &AssertionFn,
    ) -> ApiResponse<T> {
        self.send::<(), T>(Method::DELETE, path, None, data).await
    }
}

#[cfg(test)]
#[path = "api_client_tests.rs"]
mod tests;
