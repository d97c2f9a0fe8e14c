use super::client::{HttpClient, HttpResponse};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::accounts::{
    AccountType, GetAccountsQuery, GetAccountsResponse, OpenAccountRequest, OpenAccountResponse,
};

#[derive(Clone, Debug)]
pub struct AccountsGatewayHttpClient {
    client: HttpClient,
}

impl AccountsGatewayHttpClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn get_accounts_api(
        &self,
        query: &GetAccountsQuery,
    ) -> Result<HttpResponse, GatewayError> {
        self.client
            .get_with_query("/api/v1/accounts", "/api/v1/accounts", query)
            .await
    }

    pub async fn open_account_api(
        &self,
        kind: AccountType,
        request: &OpenAccountRequest,
    ) -> Result<HttpResponse, GatewayError> {
        let path = format!("/api/v1/accounts/open-{}-account", kind.slug());
        self.client.post(&path, &path, request).await
    }

    pub async fn get_accounts(&self, user_id: &str) -> Result<GetAccountsResponse, GatewayError> {
        let query = GetAccountsQuery {
            user_id: user_id.to_string(),
        };
        self.get_accounts_api(&query).await?.json()
    }

    pub async fn open_account(
        &self,
        kind: AccountType,
        user_id: &str,
    ) -> Result<OpenAccountResponse, GatewayError> {
        let request = OpenAccountRequest {
            user_id: user_id.to_string(),
        };
        self.open_account_api(kind, &request).await?.json()
    }

    pub async fn open_deposit_account(
        &self,
        user_id: &str,
    ) -> Result<OpenAccountResponse, GatewayError> {
        self.open_account(AccountType::Deposit, user_id).await
    }

    pub async fn open_savings_account(
        &self,
        user_id: &str,
    ) -> Result<OpenAccountResponse, GatewayError> {
        self.open_account(AccountType::Savings, user_id).await
    }

    pub async fn open_debit_card_account(
        &self,
        user_id: &str,
    ) -> Result<OpenAccountResponse, GatewayError> {
        self.open_account(AccountType::DebitCard, user_id).await
    }

    pub async fn open_credit_card_account(
        &self,
        user_id: &str,
    ) -> Result<OpenAccountResponse, GatewayError> {
        self.open_account(AccountType::CreditCard, user_id).await
    }
}

pub fn build_accounts_gateway_http_client(
    config: &GatewayConfig,
) -> Result<AccountsGatewayHttpClient, GatewayError> {
    Ok(AccountsGatewayHttpClient::new(HttpClient::new(&config.http)?))
}
