use super::client::{HttpClient, HttpResponse};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::documents::{GetContractDocumentResponse, GetTariffDocumentResponse};

#[derive(Clone, Debug)]
pub struct DocumentsGatewayHttpClient {
    client: HttpClient,
}

impl DocumentsGatewayHttpClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn get_tariff_document_api(
        &self,
        account_id: &str,
    ) -> Result<HttpResponse, GatewayError> {
        self.client
            .get(
                &format!("/api/v1/documents/tariff-document/{account_id}"),
                "/api/v1/documents/tariff-document/{account_id}",
            )
            .await
    }

    pub async fn get_contract_document_api(
        &self,
        account_id: &str,
    ) -> Result<HttpResponse, GatewayError> {
        self.client
            .get(
                &format!("/api/v1/documents/contract-document/{account_id}"),
                "/api/v1/documents/contract-document/{account_id}",
            )
            .await
    }

    pub async fn get_tariff_document(
        &self,
        account_id: &str,
    ) -> Result<GetTariffDocumentResponse, GatewayError> {
        self.get_tariff_document_api(account_id).await?.json()
    }

    pub async fn get_contract_document(
        &self,
        account_id: &str,
    ) -> Result<GetContractDocumentResponse, GatewayError> {
        self.get_contract_document_api(account_id).await?.json()
    }
}

pub fn build_documents_gateway_http_client(
    config: &GatewayConfig,
) -> Result<DocumentsGatewayHttpClient, GatewayError> {
    Ok(DocumentsGatewayHttpClient::new(HttpClient::new(&config.http)?))
}
