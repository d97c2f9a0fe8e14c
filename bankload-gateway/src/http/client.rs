use crate::config::HttpClientConfig;
use crate::error::GatewayError;
use bankload::transaction_hook;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::time::Instant;
use tracing::debug;
use url::Url;

/// Raw answer of a gateway endpoint.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// `"{METHOD} {route}"`, the label the call was measured under.
    pub label: String,
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    /// Decodes a successful response, rejecting any non-2xx status.
    pub fn json<R: DeserializeOwned>(&self) -> Result<R, GatewayError> {
        if !self.status.is_success() {
            return Err(GatewayError::UnexpectedStatus {
                route: self.label.clone(),
                status: self.status,
                body: self.body.clone(),
            });
        }
        serde_json::from_str(&self.body).map_err(|source| GatewayError::Decode {
            route: self.label.clone(),
            source,
        })
    }
}

enum Failure {
    Status(HttpResponse),
    Transport(GatewayError),
}

/// HTTP client bound to the gateway's base url.
///
/// Every request is measured by the load engine under `"{METHOD} {route}"`,
/// where `route` is the path template, e.g. `/api/v1/users/{user_id}`, so calls
/// for different ids aggregate together. Non-2xx answers count as failed
/// transactions but are still returned to the caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Client)?;
        let mut base_url = config.url.clone();
        // Paths are joined relative to the base, which drops its last segment
        // unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get(&self, path: &str, route: &str) -> Result<HttpResponse, GatewayError> {
        self.execute(Method::GET, path, route, |request| request)
            .await
    }

    pub async fn get_with_query<Q>(
        &self,
        path: &str,
        route: &str,
        query: &Q,
    ) -> Result<HttpResponse, GatewayError>
    where
        Q: Serialize + ?Sized,
    {
        self.execute(Method::GET, path, route, |request| request.query(query))
            .await
    }

    pub async fn post<B>(&self, path: &str, route: &str, body: &B) -> Result<HttpResponse, GatewayError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, route, |request| request.json(body))
            .await
    }

    async fn execute<F>(
        &self,
        method: Method,
        path: &str,
        route: &str,
        build: F,
    ) -> Result<HttpResponse, GatewayError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        let label = format!("{method} {route}");
        let request = build(self.client.request(method.clone(), url.clone()));

        let outcome = transaction_hook(&label, send(request, &method, &url, &label)).await;

        match outcome {
            Ok(response) | Err(Failure::Status(response)) => Ok(response),
            Err(Failure::Transport(err)) => Err(err),
        }
    }
}

async fn send(
    request: RequestBuilder,
    method: &Method,
    url: &Url,
    label: &str,
) -> Result<HttpResponse, Failure> {
    let transport = |source: reqwest::Error| {
        Failure::Transport(GatewayError::Http {
            route: label.to_string(),
            source,
        })
    };

    let start = Instant::now();
    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    debug!("{method} {url} {status} {:?}", start.elapsed());

    let response = HttpResponse {
        label: label.to_string(),
        status,
        body,
    };
    if status.is_success() {
        Ok(response)
    } else {
        Err(Failure::Status(response))
    }
}
