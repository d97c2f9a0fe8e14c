use crate::config::GrpcClientConfig;
use crate::error::GatewayError;
use bankload::transaction_hook;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

/// Unary gRPC client over a lazily connected channel.
///
/// Calls are measured by the load engine as `"grpc {Service}/{Method}"`.
#[derive(Clone, Debug)]
pub struct GrpcClient {
    inner: tonic::client::Grpc<Channel>,
}

impl GrpcClient {
    pub fn new(config: &GrpcClientConfig) -> Result<Self, GatewayError> {
        let channel = Endpoint::from_shared(config.url.to_string())?
            .timeout(config.timeout)
            .connect_lazy();
        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Calls `method`, a full path such as
    /// `/contracts.services.gateway.users.UsersGatewayService/GetUser`.
    pub async fn unary<Req, Resp>(&self, method: &'static str, request: Req) -> Result<Resp, GatewayError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        transaction_hook(&label(method), self.call(method, request)).await
    }

    async fn call<Req, Resp>(&self, method: &'static str, request: Req) -> Result<Resp, GatewayError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        debug!("Calling method: {method}");

        let mut grpc = self.inner.clone();
        grpc.ready().await.map_err(|e| {
            tonic::Status::new(
                tonic::Code::Unknown,
                format!("Service was not ready: {e}"),
            )
        })?;
        let codec = ProstCodec::default();
        let path = PathAndQuery::from_static(method);
        let response = grpc.unary(tonic::Request::new(request), path, codec).await?;
        Ok(response.into_inner())
    }
}

fn label(method: &str) -> String {
    let service_method = method.rsplit('.').next().unwrap_or(method);
    format!("grpc {service_method}")
}
