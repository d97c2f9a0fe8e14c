use super::client::GrpcClient;
use super::contracts as proto;
use super::convert;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::schema::documents::{GetContractDocumentResponse, GetTariffDocumentResponse};

const GET_TARIFF_DOCUMENT: &str =
    "/contracts.services.gateway.documents.DocumentsGatewayService/GetTariffDocument";
const GET_CONTRACT_DOCUMENT: &str =
    "/contracts.services.gateway.documents.DocumentsGatewayService/GetContractDocument";

#[derive(Clone, Debug)]
pub struct DocumentsGatewayGrpcClient {
    client: GrpcClient,
}

impl DocumentsGatewayGrpcClient {
    pub fn new(client: GrpcClient) -> Self {
        Self { client }
    }

    pub async fn get_tariff_document_api(
        &self,
        request: proto::GetTariffDocumentRequest,
    ) -> Result<proto::GetTariffDocumentResponse, GatewayError> {
        self.client.unary(GET_TARIFF_DOCUMENT, request).await
    }

    pub async fn get_contract_document_api(
        &self,
        request: proto::GetContractDocumentRequest,
    ) -> Result<proto::GetContractDocumentResponse, GatewayError> {
        self.client.unary(GET_CONTRACT_DOCUMENT, request).await
    }

    pub async fn get_tariff_document(
        &self,
        account_id: &str,
    ) -> Result<GetTariffDocumentResponse, GatewayError> {
        let request = proto::GetTariffDocumentRequest {
            account_id: account_id.to_string(),
        };
        let response = self.get_tariff_document_api(request).await?;
        let tariff = convert::required("GetTariffDocument", "tariff", response.tariff)?;
        Ok(GetTariffDocumentResponse {
            tariff: convert::document(tariff)?,
        })
    }

    pub async fn get_contract_document(
        &self,
        account_id: &str,
    ) -> Result<GetContractDocumentResponse, GatewayError> {
        let request = proto::GetContractDocumentRequest {
            account_id: account_id.to_string(),
        };
        let response = self.get_contract_document_api(request).await?;
        let contract = convert::required("GetContractDocument", "contract", response.contract)?;
        Ok(GetContractDocumentResponse {
            contract: convert::document(contract)?,
        })
    }
}

pub fn build_documents_gateway_grpc_client(
    config: &GatewayConfig,
) -> Result<DocumentsGatewayGrpcClient, GatewayError> {
    Ok(DocumentsGatewayGrpcClient::new(GrpcClient::new(&config.grpc)?))
}
