//! Clients of the gateway's REST facade.
mod accounts;
mod cards;
mod client;
mod documents;
mod operations;
mod users;

pub use accounts::{build_accounts_gateway_http_client, AccountsGatewayHttpClient};
pub use cards::{build_cards_gateway_http_client, CardsGatewayHttpClient};
pub use client::{HttpClient, HttpResponse};
pub use documents::{build_documents_gateway_http_client, DocumentsGatewayHttpClient};
pub use operations::{build_operations_gateway_http_client, OperationsGatewayHttpClient};
pub use users::{build_users_gateway_http_client, UsersGatewayHttpClient};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::accounts::AccountType;
use crate::schema::cards::CardType;
use crate::schema::operations::OperationType;
use crate::seeds::{OpenedAccount, SeedsGateway};

/// Every HTTP domain client, sharing one connection pool.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    pub users: UsersGatewayHttpClient,
    pub accounts: AccountsGatewayHttpClient,
    pub cards: CardsGatewayHttpClient,
    pub operations: OperationsGatewayHttpClient,
    pub documents: DocumentsGatewayHttpClient,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self::from_client(HttpClient::new(&config.http)?))
    }

    pub fn from_client(client: HttpClient) -> Self {
        Self {
            users: UsersGatewayHttpClient::new(client.clone()),
            accounts: AccountsGatewayHttpClient::new(client.clone()),
            cards: CardsGatewayHttpClient::new(client.clone()),
            operations: OperationsGatewayHttpClient::new(client.clone()),
            documents: DocumentsGatewayHttpClient::new(client),
        }
    }
}

impl SeedsGateway for HttpGateway {
    async fn create_user(&self) -> Result<String, GatewayError> {
        Ok(self.users.create_user().await?.user.id)
    }

    async fn open_account(
        &self,
        kind: AccountType,
        user_id: &str,
    ) -> Result<OpenedAccount, GatewayError> {
        let account = self.accounts.open_account(kind, user_id).await?.account;
        Ok(OpenedAccount {
            account_id: account.id,
            card_ids: account.cards.into_iter().map(|card| card.id).collect(),
        })
    }

    async fn issue_card(
        &self,
        kind: CardType,
        user_id: &str,
        account_id: &str,
    ) -> Result<String, GatewayError> {
        Ok(self.cards.issue_card(kind, user_id, account_id).await?.card.id)
    }

    async fn make_operation(
        &self,
        kind: OperationType,
        account_id: &str,
        card_id: &str,
    ) -> Result<String, GatewayError> {
        let response = self
            .operations
            .make_operation(kind, account_id, card_id)
            .await?;
        Ok(response.operation.id)
    }
}
