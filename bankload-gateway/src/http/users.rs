use super::client::{HttpClient, HttpResponse};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::faker::{Faker, RandomFaker};
use crate::schema::users::{CreateUserRequest, CreateUserResponse, GetUserResponse};

#[derive(Clone, Debug)]
pub struct UsersGatewayHttpClient {
    client: HttpClient,
}

impl UsersGatewayHttpClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn get_user_api(&self, user_id: &str) -> Result<HttpResponse, GatewayError> {
        self.client
            .get(&format!("/api/v1/users/{user_id}"), "/api/v1/users/{user_id}")
            .await
    }

    pub async fn create_user_api(
        &self,
        request: &CreateUserRequest,
    ) -> Result<HttpResponse, GatewayError> {
        self.client.post("/api/v1/users", "/api/v1/users", request).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<GetUserResponse, GatewayError> {
        self.get_user_api(user_id).await?.json()
    }

    /// Creates a user with random personal data.
    pub async fn create_user(&self) -> Result<CreateUserResponse, GatewayError> {
        self.create_user_with(&mut RandomFaker::new()).await
    }

    pub async fn create_user_with<F>(&self, faker: &mut F) -> Result<CreateUserResponse, GatewayError>
    where
        F: Faker + ?Sized,
    {
        let request = CreateUserRequest::fake(faker);
        self.create_user_api(&request).await?.json()
    }
}

pub fn build_users_gateway_http_client(
    config: &GatewayConfig,
) -> Result<UsersGatewayHttpClient, GatewayError> {
    Ok(UsersGatewayHttpClient::new(HttpClient::new(&config.http)?))
}
