use super::client::GrpcClient;
use super::contracts as proto;
use super::convert;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::cards::{CardType, IssueCardResponse};

const ISSUE_VIRTUAL_CARD: &str =
    "/contracts.services.gateway.cards.CardsGatewayService/IssueVirtualCard";
const ISSUE_PHYSICAL_CARD: &str =
    "/contracts.services.gateway.cards.CardsGatewayService/IssuePhysicalCard";

#[derive(Clone, Debug)]
pub struct CardsGatewayGrpcClient {
    client: GrpcClient,
}

impl CardsGatewayGrpcClient {
    pub fn new(client: GrpcClient) -> Self {
        Self { client }
    }

    pub async fn issue_card_api(
        &self,
        kind: CardType,
        request: proto::IssueCardRequest,
    ) -> Result<proto::IssueCardResponse, GatewayError> {
        let method = match kind {
            CardType::Virtual => ISSUE_VIRTUAL_CARD,
            CardType::Physical => ISSUE_PHYSICAL_CARD,
        };
        self.client.unary(method, request).await
    }

    pub async fn issue_card(
        &self,
        kind: CardType,
        user_id: &str,
        account_id: &str,
    ) -> Result<IssueCardResponse, GatewayError> {
        let request = proto::IssueCardRequest {
            user_id: user_id.to_string(),
            account_id: account_id.to_string(),
        };
        let response = self.issue_card_api(kind, request).await?;
        let card = convert::required("IssueCard", "card", response.card)?;
        Ok(IssueCardResponse {
            card: convert::card("IssueCard", card)?,
        })
    }

    pub async fn issue_virtual_card(
        &self,
        user_id: &str,
        account_id: &str,
    ) -> Result<IssueCardResponse, GatewayError> {
        self.issue_card(CardType::Virtual, user_id, account_id).await
    }

    pub async fn issue_physical_card(
        &self,
        user_id: &str,
        account_id: &str,
    ) -> Result<IssueCardResponse, GatewayError> {
        self.issue_card(CardType::Physical, user_id, account_id).await
    }
}

pub fn build_cards_gateway_grpc_client(
    config: &GatewayConfig,
) -> Result<CardsGatewayGrpcClient, GatewayError> {
    Ok(CardsGatewayGrpcClient::new(GrpcClient::new(&config.grpc)?))
}
