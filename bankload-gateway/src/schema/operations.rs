use crate::faker::Faker;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Fee,
    TopUp,
    Purchase,
    Cashback,
    Transfer,
    BillPayment,
    CashWithdrawal,
}

impl OperationType {
    pub const ALL: [OperationType; 7] = [
        OperationType::Fee,
        OperationType::TopUp,
        OperationType::Purchase,
        OperationType::Cashback,
        OperationType::Transfer,
        OperationType::BillPayment,
        OperationType::CashWithdrawal,
    ];

    /// Path segment of the matching `make-*-operation` endpoint.
    pub fn slug(&self) -> &'static str {
        match self {
            OperationType::Fee => "fee",
            OperationType::TopUp => "top-up",
            OperationType::Purchase => "purchase",
            OperationType::Cashback => "cashback",
            OperationType::Transfer => "transfer",
            OperationType::BillPayment => "bill-payment",
            OperationType::CashWithdrawal => "cash-withdrawal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Failed,
    Completed,
    InProgress,
    Unspecified,
}

impl OperationStatus {
    pub const ALL: [OperationStatus; 4] = [
        OperationStatus::Failed,
        OperationStatus::Completed,
        OperationStatus::InProgress,
        OperationStatus::Unspecified,
    ];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOperationsQuery {
    pub account_id: String,
}

/// Body shared by every `make-*-operation` endpoint except purchases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeOperationRequest {
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub account_id: String,
}

impl MakeOperationRequest {
    pub fn fake<F: Faker + ?Sized>(faker: &mut F, account_id: &str, card_id: &str) -> Self {
        Self {
            status: faker.operation_status(),
            amount: faker.amount(),
            card_id: card_id.to_string(),
            account_id: account_id.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MakePurchaseOperationRequest {
    #[serde(flatten)]
    pub operation: MakeOperationRequest,
    pub category: String,
}

impl MakePurchaseOperationRequest {
    pub fn fake<F: Faker + ?Sized>(faker: &mut F, account_id: &str, card_id: &str) -> Self {
        Self {
            operation: MakeOperationRequest::fake(faker, account_id, card_id),
            category: faker.category(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    #[serde(rename = "type")]
    pub operation_type: OperationType,
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub category: String,
    pub created_at: String,
    pub account_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationReceipt {
    pub url: Url,
    pub document: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsSummary {
    pub spent_amount: f64,
    pub received_amount: f64,
    pub cashback_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetOperationResponse {
    pub operation: Operation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetOperationsResponse {
    pub operations: Vec<Operation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetOperationReceiptResponse {
    pub receipt: OperationReceipt,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetOperationsSummaryResponse {
    pub summary: OperationsSummary,
}

/// Response of every `make-*-operation` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MakeOperationResponse {
    pub operation: Operation,
}
