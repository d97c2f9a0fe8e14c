use super::client::GrpcClient;
use super::contracts as proto;
use super::convert;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::faker::{Faker, RandomFaker};
use crate::schema::operations::{
    GetOperationReceiptResponse, GetOperationResponse, GetOperationsResponse,
    GetOperationsSummaryResponse, MakeOperationRequest, MakeOperationResponse,
    MakePurchaseOperationRequest, OperationType,
};

const GET_OPERATION: &str =
    "/contracts.services.gateway.operations.OperationsGatewayService/GetOperation";
const GET_OPERATION_RECEIPT: &str =
    "/contracts.services.gateway.operations.OperationsGatewayService/GetOperationReceipt";
const GET_OPERATIONS: &str =
    "/contracts.services.gateway.operations.OperationsGatewayService/GetOperations";
const GET_OPERATIONS_SUMMARY: &str =
    "/contracts.services.gateway.operations.OperationsGatewayService/GetOperationsSummary";

fn make_operation_method(kind: OperationType) -> &'static str {
    match kind {
        OperationType::Fee => {
            "/contracts.services.gateway.operations.OperationsGatewayService/MakeFeeOperation"
        }
        OperationType::TopUp => {
            "/contracts.services.gateway.operations.OperationsGatewayService/MakeTopUpOperation"
        }
        OperationType::Purchase => {
            "/contracts.services.gateway.operations.OperationsGatewayService/MakePurchaseOperation"
        }
        OperationType::Cashback => {
            "/contracts.services.gateway.operations.OperationsGatewayService/MakeCashbackOperation"
        }
        OperationType::Transfer => {
            "/contracts.services.gateway.operations.OperationsGatewayService/MakeTransferOperation"
        }
        OperationType::BillPayment => {
            "/contracts.services.gateway.operations.OperationsGatewayService/MakeBillPaymentOperation"
        }
        OperationType::CashWithdrawal => {
            "/contracts.services.gateway.operations.OperationsGatewayService/MakeCashWithdrawalOperation"
        }
    }
}

#[derive(Clone, Debug)]
pub struct OperationsGatewayGrpcClient {
    client: GrpcClient,
}

impl OperationsGatewayGrpcClient {
    pub fn new(client: GrpcClient) -> Self {
        Self { client }
    }

    pub async fn get_operation_api(
        &self,
        request: proto::GetOperationRequest,
    ) -> Result<proto::GetOperationResponse, GatewayError> {
        self.client.unary(GET_OPERATION, request).await
    }

    pub async fn get_operation_receipt_api(
        &self,
        request: proto::GetOperationReceiptRequest,
    ) -> Result<proto::GetOperationReceiptResponse, GatewayError> {
        self.client.unary(GET_OPERATION_RECEIPT, request).await
    }

    pub async fn get_operations_api(
        &self,
        request: proto::GetOperationsRequest,
    ) -> Result<proto::GetOperationsResponse, GatewayError> {
        self.client.unary(GET_OPERATIONS, request).await
    }

    pub async fn get_operations_summary_api(
        &self,
        request: proto::GetOperationsSummaryRequest,
    ) -> Result<proto::GetOperationsSummaryResponse, GatewayError> {
        self.client.unary(GET_OPERATIONS_SUMMARY, request).await
    }

    /// Calls the `Make*Operation` method of `kind`.
    ///
    /// Purchases expect a [`proto::MakePurchaseOperationRequest`], every other
    /// kind a [`proto::MakeOperationRequest`].
    pub async fn make_operation_api<Req>(
        &self,
        kind: OperationType,
        request: Req,
    ) -> Result<proto::MakeOperationResponse, GatewayError>
    where
        Req: prost::Message + Send + Sync + 'static,
    {
        self.client.unary(make_operation_method(kind), request).await
    }

    pub async fn get_operation(
        &self,
        operation_id: &str,
    ) -> Result<GetOperationResponse, GatewayError> {
        let request = proto::GetOperationRequest {
            id: operation_id.to_string(),
        };
        let response = self.get_operation_api(request).await?;
        let operation = convert::required("GetOperation", "operation", response.operation)?;
        Ok(GetOperationResponse {
            operation: convert::operation("GetOperation", operation)?,
        })
    }

    pub async fn get_operation_receipt(
        &self,
        operation_id: &str,
    ) -> Result<GetOperationReceiptResponse, GatewayError> {
        let request = proto::GetOperationReceiptRequest {
            operation_id: operation_id.to_string(),
        };
        let response = self.get_operation_receipt_api(request).await?;
        let receipt = convert::required("GetOperationReceipt", "receipt", response.receipt)?;
        Ok(GetOperationReceiptResponse {
            receipt: convert::receipt(receipt)?,
        })
    }

    pub async fn get_operations(
        &self,
        account_id: &str,
    ) -> Result<GetOperationsResponse, GatewayError> {
        let request = proto::GetOperationsRequest {
            account_id: account_id.to_string(),
        };
        let response = self.get_operations_api(request).await?;
        let operations = response
            .operations
            .into_iter()
            .map(|operation| convert::operation("GetOperations", operation))
            .collect::<Result<_, _>>()?;
        Ok(GetOperationsResponse { operations })
    }

    pub async fn get_operations_summary(
        &self,
        account_id: &str,
    ) -> Result<GetOperationsSummaryResponse, GatewayError> {
        let request = proto::GetOperationsSummaryRequest {
            account_id: account_id.to_string(),
        };
        let response = self.get_operations_summary_api(request).await?;
        let summary = convert::required("GetOperationsSummary", "summary", response.summary)?;
        Ok(GetOperationsSummaryResponse {
            summary: convert::summary(summary),
        })
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
                let request: proto::MakePurchaseOperationRequest =
                    MakePurchaseOperationRequest::fake(faker, account_id, card_id).into();
                self.make_operation_api(kind, request).await?
            }
            _ => {
                let request: proto::MakeOperationRequest =
                    MakeOperationRequest::fake(faker, account_id, card_id).into();
                self.make_operation_api(kind, request).await?
            }
        };
        let operation = convert::required("MakeOperation", "operation", response.operation)?;
        Ok(MakeOperationResponse {
            operation: convert::operation("MakeOperation", operation)?,
        })
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

pub fn build_operations_gateway_grpc_client(
    config: &GatewayConfig,
) -> Result<OperationsGatewayGrpcClient, GatewayError> {
    Ok(OperationsGatewayGrpcClient::new(GrpcClient::new(&config.grpc)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_method() {
        let methods: std::collections::HashSet<_> = OperationType::ALL
            .into_iter()
            .map(make_operation_method)
            .collect();
        assert_eq!(methods.len(), OperationType::ALL.len());
        assert!(methods.iter().all(|method| {
            method.starts_with("/contracts.services.gateway.operations.OperationsGatewayService/Make")
        }));
    }
}
