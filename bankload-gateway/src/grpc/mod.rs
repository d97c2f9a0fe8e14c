//! Clients of the gateway's gRPC services.
mod accounts;
mod cards;
mod client;
pub mod contracts;
mod convert;
mod documents;
mod operations;
mod users;

pub use accounts::{build_accounts_gateway_grpc_client, AccountsGatewayGrpcClient};
pub use cards::{build_cards_gateway_grpc_client, CardsGatewayGrpcClient};
pub use client::GrpcClient;
pub use documents::{build_documents_gateway_grpc_client, DocumentsGatewayGrpcClient};
pub use operations::{build_operations_gateway_grpc_client, OperationsGatewayGrpcClient};
pub use users::{build_users_gateway_grpc_client, UsersGatewayGrpcClient};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::accounts::AccountType;
use crate::schema::cards::CardType;
use crate::schema::operations::OperationType;
use crate::seeds::{OpenedAccount, SeedsGateway};

/// Every gRPC domain client, sharing one channel.
#[derive(Clone, Debug)]
pub struct GrpcGateway {
    pub users: UsersGatewayGrpcClient,
    pub accounts: AccountsGatewayGrpcClient,
    pub cards: CardsGatewayGrpcClient,
    pub operations: OperationsGatewayGrpcClient,
    pub documents: DocumentsGatewayGrpcClient,
}

impl GrpcGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self::from_client(GrpcClient::new(&config.grpc)?))
    }

    pub fn from_client(client: GrpcClient) -> Self {
        Self {
            users: UsersGatewayGrpcClient::new(client.clone()),
            accounts: AccountsGatewayGrpcClient::new(client.clone()),
            cards: CardsGatewayGrpcClient::new(client.clone()),
            operations: OperationsGatewayGrpcClient::new(client.clone()),
            documents: DocumentsGatewayGrpcClient::new(client),
        }
    }
}

impl SeedsGateway for GrpcGateway {
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
