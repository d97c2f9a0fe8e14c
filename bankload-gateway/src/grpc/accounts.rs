use super::client::GrpcClient;
use super::contracts as proto;
use super::convert;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::accounts::{AccountType, GetAccountsResponse, OpenAccountResponse};

const GET_ACCOUNTS: &str = "/contracts.services.gateway.accounts.AccountsGatewayService/GetAccounts";

fn open_account_method(kind: AccountType) -> &'static str {
    match kind {
        AccountType::Deposit => {
            "/contracts.services.gateway.accounts.AccountsGatewayService/OpenDepositAccount"
        }
        AccountType::Savings => {
            "/contracts.services.gateway.accounts.AccountsGatewayService/OpenSavingsAccount"
        }
        AccountType::DebitCard => {
            "/contracts.services.gateway.accounts.AccountsGatewayService/OpenDebitCardAccount"
        }
        AccountType::CreditCard => {
            "/contracts.services.gateway.accounts.AccountsGatewayService/OpenCreditCardAccount"
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccountsGatewayGrpcClient {
    client: GrpcClient,
}

impl AccountsGatewayGrpcClient {
    pub fn new(client: GrpcClient) -> Self {
        Self { client }
    }

    pub async fn get_accounts_api(
        &self,
        request: proto::GetAccountsRequest,
    ) -> Result<proto::GetAccountsResponse, GatewayError> {
        self.client.unary(GET_ACCOUNTS, request).await
    }

    pub async fn open_account_api(
        &self,
        kind: AccountType,
        request: proto::OpenAccountRequest,
    ) -> Result<proto::OpenAccountResponse, GatewayError> {
        self.client.unary(open_account_method(kind), request).await
    }

    pub async fn get_accounts(&self, user_id: &str) -> Result<GetAccountsResponse, GatewayError> {
        let request = proto::GetAccountsRequest {
            user_id: user_id.to_string(),
        };
        let response = self.get_accounts_api(request).await?;
        let accounts = response
            .accounts
            .into_iter()
            .map(|account| convert::account("GetAccounts", account))
            .collect::<Result<_, _>>()?;
        Ok(GetAccountsResponse { accounts })
    }

    pub async fn open_account(
        &self,
        kind: AccountType,
        user_id: &str,
    ) -> Result<OpenAccountResponse, GatewayError> {
        let request = proto::OpenAccountRequest {
            user_id: user_id.to_string(),
        };
        let response = self.open_account_api(kind, request).await?;
        let account = convert::required("OpenAccount", "account", response.account)?;
        Ok(OpenAccountResponse {
            account: convert::account("OpenAccount", account)?,
        })
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

pub fn build_accounts_gateway_grpc_client(
    config: &GatewayConfig,
) -> Result<AccountsGatewayGrpcClient, GatewayError> {
    Ok(AccountsGatewayGrpcClient::new(GrpcClient::new(&config.grpc)?))
}
