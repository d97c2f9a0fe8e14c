//! Fixture seeding and the dumps that carry seeded ids between runs.
mod builder;
mod dumps;
mod plan;
mod result;

pub use builder::{OpenedAccount, SeedsBuilder, SeedsError, SeedsGateway};
pub use dumps::{DumpError, SeedsDumps};
pub use plan::{SeedAccountsPlan, SeedCardsPlan, SeedOperationsPlan, SeedUsersPlan, SeedsPlan};
pub use result::{
    SeedAccountResult, SeedCardResult, SeedOperationResult, SeedUserResult, SeedsResult,
};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::grpc::GrpcGateway;
use crate::http::HttpGateway;

pub fn build_http_seeds_builder(
    config: &GatewayConfig,
) -> Result<SeedsBuilder<HttpGateway>, GatewayError> {
    Ok(SeedsBuilder::new(HttpGateway::new(config)?))
}

pub fn build_grpc_seeds_builder(
    config: &GatewayConfig,
) -> Result<SeedsBuilder<GrpcGateway>, GatewayError> {
    Ok(SeedsBuilder::new(GrpcGateway::new(config)?))
}
