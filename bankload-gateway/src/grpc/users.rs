use super::client::GrpcClient;
use super::contracts as proto;
use super::convert;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::faker::{Faker, RandomFaker};
use crate::schema::users::{CreateUserRequest, CreateUserResponse, GetUserResponse};

const GET_USER: &str = "/contracts.services.gateway.users.UsersGatewayService/GetUser";
const CREATE_USER: &str = "/contracts.services.gateway.users.UsersGatewayService/CreateUser";

#[derive(Clone, Debug)]
pub struct UsersGatewayGrpcClient {
    client: GrpcClient,
}

impl UsersGatewayGrpcClient {
    pub fn new(client: GrpcClient) -> Self {
        Self { client }
    }

    pub async fn get_user_api(
        &self,
        request: proto::GetUserRequest,
    ) -> Result<proto::GetUserResponse, GatewayError> {
        self.client.unary(GET_USER, request).await
    }

    pub async fn create_user_api(
        &self,
        request: proto::CreateUserRequest,
    ) -> Result<proto::CreateUserResponse, GatewayError> {
        self.client.unary(CREATE_USER, request).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<GetUserResponse, GatewayError> {
        let request = proto::GetUserRequest {
            id: user_id.to_string(),
        };
        let response = self.get_user_api(request).await?;
        Ok(GetUserResponse {
            user: convert::user("GetUser", response.user)?,
        })
    }

    pub async fn create_user(&self) -> Result<CreateUserResponse, GatewayError> {
        self.create_user_with(&mut RandomFaker::new()).await
    }

    pub async fn create_user_with<F>(&self, faker: &mut F) -> Result<CreateUserResponse, GatewayError>
    where
        F: Faker + ?Sized,
    {
        let request = CreateUserRequest::fake(faker).into();
        let response = self.create_user_api(request).await?;
        Ok(CreateUserResponse {
            user: convert::user("CreateUser", response.user)?,
        })
    }
}

pub fn build_users_gateway_grpc_client(
    config: &GatewayConfig,
) -> Result<UsersGatewayGrpcClient, GatewayError> {
    Ok(UsersGatewayGrpcClient::new(GrpcClient::new(&config.grpc)?))
}
