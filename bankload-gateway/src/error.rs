use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single gateway call, over either transport.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {route} failed: {source}")]
    Http {
        route: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{route} answered {status}: {body}")]
    UnexpectedStatus {
        route: String,
        status: StatusCode,
        body: String,
    },

    #[error("Unable to decode response of {route}: {source}")]
    Decode {
        route: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid request url: {0}")]
    Url(#[from] url::ParseError),

    #[error("gRPC call failed: {0}")]
    Grpc(#[from] tonic::Status),

    #[error("Invalid gRPC endpoint: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Response of {method} has no `{field}`")]
    MissingField {
        method: &'static str,
        field: &'static str,
    },

    #[error("Response of {method} carries unknown {field} value {value}")]
    UnknownEnumValue {
        method: &'static str,
        field: &'static str,
        value: i32,
    },
}
