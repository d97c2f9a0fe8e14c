// @generated
// Generated from: contracts/services/gateway/**/*.proto
// Manual check-in for offline builds.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::prost::Enumeration)]
#[repr(i32)]
pub enum AccountType {
    Unspecified = 0,
    Deposit = 1,
    Savings = 2,
    DebitCard = 3,
    CreditCard = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::prost::Enumeration)]
#[repr(i32)]
pub enum AccountStatus {
    Unspecified = 0,
    Active = 1,
    PendingClosure = 2,
    Closed = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::prost::Enumeration)]
#[repr(i32)]
pub enum CardType {
    Unspecified = 0,
    Virtual = 1,
    Physical = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::prost::Enumeration)]
#[repr(i32)]
pub enum CardStatus {
    Unspecified = 0,
    Active = 1,
    Frozen = 2,
    Closed = 3,
    Blocked = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::prost::Enumeration)]
#[repr(i32)]
pub enum CardPaymentSystem {
    Unspecified = 0,
    Visa = 1,
    Mastercard = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::prost::Enumeration)]
#[repr(i32)]
pub enum OperationType {
    Unspecified = 0,
    Fee = 1,
    TopUp = 2,
    Purchase = 3,
    Cashback = 4,
    Transfer = 5,
    BillPayment = 6,
    CashWithdrawal = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::prost::Enumeration)]
#[repr(i32)]
pub enum OperationStatus {
    Unspecified = 0,
    Failed = 1,
    Completed = 2,
    InProgress = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub email: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub last_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub first_name: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub middle_name: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub phone_number: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetUserRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: ::core::option::Option<User>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUserRequest {
    #[prost(string, tag = "1")]
    pub email: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub last_name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub first_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub middle_name: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub phone_number: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: ::core::option::Option<User>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Card {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub pin: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub cvv: ::prost::alloc::string::String,
    #[prost(enumeration = "CardType", tag = "4")]
    pub r#type: i32,
    #[prost(enumeration = "CardStatus", tag = "5")]
    pub status: i32,
    #[prost(string, tag = "6")]
    pub account_id: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub card_number: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub card_holder: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub expiry_date: ::prost::alloc::string::String,
    #[prost(enumeration = "CardPaymentSystem", tag = "10")]
    pub payment_system: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IssueCardRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub account_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IssueCardResponse {
    #[prost(message, optional, tag = "1")]
    pub card: ::core::option::Option<Card>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Account {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(enumeration = "AccountType", tag = "2")]
    pub r#type: i32,
    #[prost(message, repeated, tag = "3")]
    pub cards: ::prost::alloc::vec::Vec<Card>,
    #[prost(enumeration = "AccountStatus", tag = "4")]
    pub status: i32,
    #[prost(double, tag = "5")]
    pub balance: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAccountsRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAccountsResponse {
    #[prost(message, repeated, tag = "1")]
    pub accounts: ::prost::alloc::vec::Vec<Account>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OpenAccountRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OpenAccountResponse {
    #[prost(message, optional, tag = "1")]
    pub account: ::core::option::Option<Account>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operation {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(enumeration = "OperationType", tag = "2")]
    pub r#type: i32,
    #[prost(enumeration = "OperationStatus", tag = "3")]
    pub status: i32,
    #[prost(double, tag = "4")]
    pub amount: f64,
    #[prost(string, tag = "5")]
    pub card_id: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub category: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub created_at: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub account_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationReceipt {
    #[prost(string, tag = "1")]
    pub url: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub document: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationsSummary {
    #[prost(double, tag = "1")]
    pub spent_amount: f64,
    #[prost(double, tag = "2")]
    pub received_amount: f64,
    #[prost(double, tag = "3")]
    pub cashback_amount: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationResponse {
    #[prost(message, optional, tag = "1")]
    pub operation: ::core::option::Option<Operation>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationReceiptRequest {
    #[prost(string, tag = "1")]
    pub operation_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationReceiptResponse {
    #[prost(message, optional, tag = "1")]
    pub receipt: ::core::option::Option<OperationReceipt>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationsRequest {
    #[prost(string, tag = "1")]
    pub account_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationsResponse {
    #[prost(message, repeated, tag = "1")]
    pub operations: ::prost::alloc::vec::Vec<Operation>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationsSummaryRequest {
    #[prost(string, tag = "1")]
    pub account_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOperationsSummaryResponse {
    #[prost(message, optional, tag = "1")]
    pub summary: ::core::option::Option<OperationsSummary>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MakeOperationRequest {
    #[prost(enumeration = "OperationStatus", tag = "1")]
    pub status: i32,
    #[prost(double, tag = "2")]
    pub amount: f64,
    #[prost(string, tag = "3")]
    pub card_id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub account_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MakePurchaseOperationRequest {
    #[prost(enumeration = "OperationStatus", tag = "1")]
    pub status: i32,
    #[prost(double, tag = "2")]
    pub amount: f64,
    #[prost(string, tag = "3")]
    pub card_id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub account_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub category: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MakeOperationResponse {
    #[prost(message, optional, tag = "1")]
    pub operation: ::core::option::Option<Operation>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Document {
    #[prost(string, tag = "1")]
    pub url: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub document: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTariffDocumentRequest {
    #[prost(string, tag = "1")]
    pub account_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTariffDocumentResponse {
    #[prost(message, optional, tag = "1")]
    pub tariff: ::core::option::Option<Document>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetContractDocumentRequest {
    #[prost(string, tag = "1")]
    pub account_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetContractDocumentResponse {
    #[prost(message, optional, tag = "1")]
    pub contract: ::core::option::Option<Document>,
}
