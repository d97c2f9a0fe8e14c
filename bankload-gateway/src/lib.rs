//! Clients, fixtures and load scenarios for the banking demo gateway.
//!
//! Both transports of the gateway are covered: [`http`] talks to the REST
//! facade and [`grpc`] to the protobuf services. Every call goes through
//! [`bankload::transaction_hook`], so running a client inside a
//! [`bankload::Scenario`] measures it without further wiring.
pub mod config;
pub mod error;
pub mod faker;
pub mod grpc;
pub mod http;
pub mod scenarios;
pub mod schema;
pub mod seeds;

pub use config::{ConfigError, GatewayConfig, GrpcClientConfig, HttpClientConfig};
pub use error::GatewayError;
pub use faker::{Faker, RandomFaker};
