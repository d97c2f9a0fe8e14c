use super::client::{HttpClient, HttpResponse};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::faker::{Faker, RandomFaker};
use crate::schema::operations::{
    GetOperationReceiptResponse, GetOperationResponse, GetOperationsQuery, GetOperationsResponse,
    GetOperationsSummaryResponse, MakeOperationRequest, MakeOperationResponse,
    MakePurchaseOperationRequest, OperationType,
};
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct OperationsGatewayHttpClient {
    client: HttpClient,
}

impl OperationsGatewayHttpClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn get_operation_api(&self, operation_id: &str) -> Result<HttpResponse, GatewayError> {
        self.client
            .get(
                &format!("/api/v1/operations/{operation_id}"),
                "/api/v1/operations/{operation_id}",
            )
            .await
    }

    pub async fn get_operation_receipt_api(
        &self,
        operation_id: &str,
    ) -> Result<HttpResponse, GatewayError> {
        self.client
            .get(
                &format!("/api/v1/operations/operation-receipt/{operation_id}"),
                "/api/v1/operations/operation-receipt/{operation_id}",
            )
            .await
    }

    pub async fn get_operations_api(
        &self,
        query: &GetOperationsQuery,
    ) -> Result<HttpResponse, GatewayError> {
        self.client
            .get_with_query("/api/v1/operations", "/api/v1/operations", query)
            .await
    }

    pub async fn get_operations_summary_api(
        &self,
        query: &GetOperationsQuery,
    ) -> Result<HttpResponse, GatewayError> {
        self.client
            .get_with_query(
                "/api/v1/operations/operations-summary",
                "/api/v1/operations/operations-summary",
                query,
            )
            .await
    }

    /// Posts `request` to the `make-*-operation` endpoint of `kind`.
    ///
    /// Purchases expect a [`MakePurchaseOperationRequest`], every other kind a
    /// [`MakeOperationRequest`].
    pub async fn make_operation_api<B>(
        &self,
        kind: OperationType,
        request: &B,
    ) -> Result<HttpResponse, GatewayError>
    where
        B: Serialize + ?Sized,
    {
        let path = format!("/api/v1/operations/make-{}-operation", kind.slug());
        self.client.post(&path, &path, request).await
    }

    pub async fn get_operation(
        &self,
        operation_id: &str,
    ) -> Result<GetOperationResponse, GatewayError> {
        self.get_operation_api(operation_id).await?.json()
    }

    pub async fn get_operation_receipt(
        &self,
        operation_id: &str,
    ) -> Result<GetOperationReceiptResponse, GatewayError> {
        self.get_operation_receipt_api(operation_id).await?.json()
    }

    pub async fn get_operations(
        &self,
        account_id: &str,
    ) -> Result<GetOperationsResponse, GatewayError> {
        let query = GetOperationsQuery {
            account_id: account_id.to_string(),
        };
        self.get_operations_api(&query).await?.json()
    }

    pub async fn get_operations_summary(
        &self,
        account_id: &str,
    ) -> Result<GetOperationsSummaryResponse, GatewayError> {
        let query = GetOperationsQuery {
            account_id: account_id.to_string(),
        };
        self.get_operations_summary_api(&query).await?.json()
    }

    pub async fn make_operation(
        &self,
        kind: OperationType,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation_with(kind, account_id, card_id, &mut RandomFaker::new())
            .await
    }

    /// Makes an operation of `kind` with status, amount and category taken
    /// from `faker`.
    pub async fn make_operation_with<F>(
        &self,
        kind: OperationType,
        account_id: &str,
        card_id: &str,
        faker: &mut F,
    ) -> Result<MakeOperationResponse, GatewayError>
    where
        F: Faker + ?Sized,
    {
        let response = match kind {
            OperationType::Purchase => {
                let request = MakePurchaseOperationRequest::fake(faker, account_id, card_id);
                self.make_operation_api(kind, &request).await?
            }
            _ => {
                let request = MakeOperationRequest::fake(faker, account_id, card_id);
                self.make_operation_api(kind, &request).await?
            }
        };
        response.json()
    }

    pub async fn make_fee_operation(
        &self,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation(OperationType::Fee, account_id, card_id).await
    }

    pub async fn make_top_up_operation(
        &self,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation(OperationType::TopUp, account_id, card_id).await
    }

    pub async fn make_cashback_operation(
        &self,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation(OperationType::Cashback, account_id, card_id).await
    }

    pub async fn make_transfer_operation(
        &self,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation(OperationType::Transfer, account_id, card_id).await
    }

    pub async fn make_purchase_operation(
        &self,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation(OperationType::Purchase, account_id, card_id).await
    }

    pub async fn make_bill_payment_operation(
        &self,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation(OperationType::BillPayment, account_id, card_id).await
    }

    pub async fn make_cash_withdrawal_operation(
        &self,
        account_id: &str,
        card_id: &str,
    ) -> Result<MakeOperationResponse, GatewayError> {
        self.make_operation(OperationType::CashWithdrawal, account_id, card_id)
            .await
    }
}

pub fn build_operations_gateway_http_client(
    config: &GatewayConfig,
) -> Result<OperationsGatewayHttpClient, GatewayError> {
    Ok(OperationsGatewayHttpClient::new(HttpClient::new(&config.http)?))
}
