use super::client::{HttpClient, HttpResponse};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::cards::{CardType, IssueCardRequest, IssueCardResponse};

#[derive(Clone, Debug)]
pub struct CardsGatewayHttpClient {
    client: HttpClient,
}

impl CardsGatewayHttpClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn issue_card_api(
        &self,
        kind: CardType,
        request: &IssueCardRequest,
    ) -> Result<HttpResponse, GatewayError> {
        let path = match kind {
            CardType::Virtual => "/api/v1/cards/issue-virtual-card",
            CardType::Physical => "/api/v1/cards/issue-physical-card",
        };
        self.client.post(path, path, request).await
    }

    pub async fn issue_card(
        &self,
        kind: CardType,
        user_id: &str,
        account_id: &str,
    ) -> Result<IssueCardResponse, GatewayError> {
        let request = IssueCardRequest {
            user_id: user_id.to_string(),
            account_id: account_id.to_string(),
        };
        self.issue_card_api(kind, &request).await?.json()
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

pub fn build_cards_gateway_http_client(
    config: &GatewayConfig,
) -> Result<CardsGatewayHttpClient, GatewayError> {
    Ok(CardsGatewayHttpClient::new(HttpClient::new(&config.http)?))
}
