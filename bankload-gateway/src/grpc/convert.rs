//! Mapping between protobuf contracts and the shared schema types.
//!
//! Proto3 has no required fields, so every sub-message is checked here and
//! enumeration values outside the schema (including `UNSPECIFIED` where the
//! schema has no such variant) are rejected.
use super::contracts as proto;
use crate::error::GatewayError;
use crate::schema::accounts::{Account, AccountStatus, AccountType};
use crate::schema::cards::{Card, CardPaymentSystem, CardStatus, CardType};
use crate::schema::documents::Document;
use crate::schema::operations::{
    MakeOperationRequest, MakePurchaseOperationRequest, Operation, OperationReceipt,
    OperationStatus, OperationType, OperationsSummary,
};
use crate::schema::users::{CreateUserRequest, User};
use url::Url;

pub(crate) fn required<T>(
    method: &'static str,
    field: &'static str,
    value: Option<T>,
) -> Result<T, GatewayError> {
    value.ok_or(GatewayError::MissingField { method, field })
}

fn unknown(method: &'static str, field: &'static str, value: i32) -> GatewayError {
    GatewayError::UnknownEnumValue {
        method,
        field,
        value,
    }
}

pub(crate) fn account_type(method: &'static str, value: i32) -> Result<AccountType, GatewayError> {
    match proto::AccountType::try_from(value) {
        Ok(proto::AccountType::Deposit) => Ok(AccountType::Deposit),
        Ok(proto::AccountType::Savings) => Ok(AccountType::Savings),
        Ok(proto::AccountType::DebitCard) => Ok(AccountType::DebitCard),
        Ok(proto::AccountType::CreditCard) => Ok(AccountType::CreditCard),
        _ => Err(unknown(method, "type", value)),
    }
}

fn account_status(method: &'static str, value: i32) -> Result<AccountStatus, GatewayError> {
    match proto::AccountStatus::try_from(value) {
        Ok(proto::AccountStatus::Active) => Ok(AccountStatus::Active),
        Ok(proto::AccountStatus::PendingClosure) => Ok(AccountStatus::PendingClosure),
        Ok(proto::AccountStatus::Closed) => Ok(AccountStatus::Closed),
        _ => Err(unknown(method, "status", value)),
    }
}

fn card_type(method: &'static str, value: i32) -> Result<CardType, GatewayError> {
    match proto::CardType::try_from(value) {
        Ok(proto::CardType::Virtual) => Ok(CardType::Virtual),
        Ok(proto::CardType::Physical) => Ok(CardType::Physical),
        _ => Err(unknown(method, "type", value)),
    }
}

fn card_status(method: &'static str, value: i32) -> Result<CardStatus, GatewayError> {
    match proto::CardStatus::try_from(value) {
        Ok(proto::CardStatus::Active) => Ok(CardStatus::Active),
        Ok(proto::CardStatus::Frozen) => Ok(CardStatus::Frozen),
        Ok(proto::CardStatus::Closed) => Ok(CardStatus::Closed),
        Ok(proto::CardStatus::Blocked) => Ok(CardStatus::Blocked),
        _ => Err(unknown(method, "status", value)),
    }
}

fn card_payment_system(method: &'static str, value: i32) -> Result<CardPaymentSystem, GatewayError> {
    match proto::CardPaymentSystem::try_from(value) {
        Ok(proto::CardPaymentSystem::Visa) => Ok(CardPaymentSystem::Visa),
        Ok(proto::CardPaymentSystem::Mastercard) => Ok(CardPaymentSystem::Mastercard),
        _ => Err(unknown(method, "payment_system", value)),
    }
}

fn operation_type(method: &'static str, value: i32) -> Result<OperationType, GatewayError> {
    match proto::OperationType::try_from(value) {
        Ok(proto::OperationType::Fee) => Ok(OperationType::Fee),
        Ok(proto::OperationType::TopUp) => Ok(OperationType::TopUp),
        Ok(proto::OperationType::Purchase) => Ok(OperationType::Purchase),
        Ok(proto::OperationType::Cashback) => Ok(OperationType::Cashback),
        Ok(proto::OperationType::Transfer) => Ok(OperationType::Transfer),
        Ok(proto::OperationType::BillPayment) => Ok(OperationType::BillPayment),
        Ok(proto::OperationType::CashWithdrawal) => Ok(OperationType::CashWithdrawal),
        _ => Err(unknown(method, "type", value)),
    }
}

fn operation_status(method: &'static str, value: i32) -> Result<OperationStatus, GatewayError> {
    match proto::OperationStatus::try_from(value) {
        Ok(proto::OperationStatus::Unspecified) => Ok(OperationStatus::Unspecified),
        Ok(proto::OperationStatus::Failed) => Ok(OperationStatus::Failed),
        Ok(proto::OperationStatus::Completed) => Ok(OperationStatus::Completed),
        Ok(proto::OperationStatus::InProgress) => Ok(OperationStatus::InProgress),
        Err(_) => Err(unknown(method, "status", value)),
    }
}

impl From<OperationStatus> for proto::OperationStatus {
    fn from(status: OperationStatus) -> Self {
        match status {
            OperationStatus::Unspecified => proto::OperationStatus::Unspecified,
            OperationStatus::Failed => proto::OperationStatus::Failed,
            OperationStatus::Completed => proto::OperationStatus::Completed,
            OperationStatus::InProgress => proto::OperationStatus::InProgress,
        }
    }
}

impl From<CreateUserRequest> for proto::CreateUserRequest {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            email: request.email,
            last_name: request.last_name,
            first_name: request.first_name,
            middle_name: request.middle_name,
            phone_number: request.phone_number,
        }
    }
}

impl From<MakeOperationRequest> for proto::MakeOperationRequest {
    fn from(request: MakeOperationRequest) -> Self {
        Self {
            status: proto::OperationStatus::from(request.status) as i32,
            amount: request.amount,
            card_id: request.card_id,
            account_id: request.account_id,
        }
    }
}

impl From<MakePurchaseOperationRequest> for proto::MakePurchaseOperationRequest {
    fn from(request: MakePurchaseOperationRequest) -> Self {
        let operation = request.operation;
        Self {
            status: proto::OperationStatus::from(operation.status) as i32,
            amount: operation.amount,
            card_id: operation.card_id,
            account_id: operation.account_id,
            category: request.category,
        }
    }
}

pub(crate) fn user(method: &'static str, user: Option<proto::User>) -> Result<User, GatewayError> {
    let user = required(method, "user", user)?;
    Ok(User {
        id: user.id,
        email: user.email,
        last_name: user.last_name,
        first_name: user.first_name,
        middle_name: user.middle_name,
        phone_number: user.phone_number,
    })
}

pub(crate) fn card(method: &'static str, card: proto::Card) -> Result<Card, GatewayError> {
    Ok(Card {
        card_type: card_type(method, card.r#type)?,
        status: card_status(method, card.status)?,
        payment_system: card_payment_system(method, card.payment_system)?,
        id: card.id,
        pin: card.pin,
        cvv: card.cvv,
        account_id: card.account_id,
        card_number: card.card_number,
        card_holder: card.card_holder,
        expiry_date: card.expiry_date,
    })
}

pub(crate) fn account(method: &'static str, account: proto::Account) -> Result<Account, GatewayError> {
    Ok(Account {
        account_type: account_type(method, account.r#type)?,
        status: account_status(method, account.status)?,
        cards: account
            .cards
            .into_iter()
            .map(|c| card(method, c))
            .collect::<Result<_, _>>()?,
        id: account.id,
        balance: account.balance,
    })
}

pub(crate) fn operation(
    method: &'static str,
    operation: proto::Operation,
) -> Result<Operation, GatewayError> {
    Ok(Operation {
        operation_type: operation_type(method, operation.r#type)?,
        status: operation_status(method, operation.status)?,
        id: operation.id,
        amount: operation.amount,
        card_id: operation.card_id,
        category: operation.category,
        created_at: operation.created_at,
        account_id: operation.account_id,
    })
}

pub(crate) fn receipt(receipt: proto::OperationReceipt) -> Result<OperationReceipt, GatewayError> {
    Ok(OperationReceipt {
        url: Url::parse(&receipt.url)?,
        document: receipt.document,
    })
}

pub(crate) fn summary(summary: proto::OperationsSummary) -> OperationsSummary {
    OperationsSummary {
        spent_amount: summary.spent_amount,
        received_amount: summary.received_amount,
        cashback_amount: summary.cashback_amount,
    }
}

pub(crate) fn document(document: proto::Document) -> Result<Document, GatewayError> {
    Ok(Document {
        url: Url::parse(&document.url)?,
        document: document.document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faker::RandomFaker;

    fn proto_card() -> proto::Card {
        proto::Card {
            id: "card".to_string(),
            pin: "1234".to_string(),
            cvv: "123".to_string(),
            r#type: proto::CardType::Virtual as i32,
            status: proto::CardStatus::Active as i32,
            account_id: "account".to_string(),
            card_number: "4000000000000002".to_string(),
            card_holder: "IVAN IVANOV".to_string(),
            expiry_date: "2030-01-01".to_string(),
            payment_system: proto::CardPaymentSystem::Visa as i32,
        }
    }

    #[test]
    fn converts_account_with_cards() {
        let account = account(
            "OpenCreditCardAccount",
            proto::Account {
                id: "account".to_string(),
                r#type: proto::AccountType::CreditCard as i32,
                cards: vec![proto_card()],
                status: proto::AccountStatus::Active as i32,
                balance: 25.5,
            },
        )
        .unwrap();

        assert_eq!(account.account_type, AccountType::CreditCard);
        assert_eq!(account.cards[0].card_type, CardType::Virtual);
        assert_eq!(account.cards[0].payment_system, CardPaymentSystem::Visa);
        assert_eq!(account.balance, 25.5);
    }

    #[test]
    fn rejects_unspecified_card_type() {
        let mut unspecified = proto_card();
        unspecified.r#type = proto::CardType::Unspecified as i32;
        let err = card("IssueVirtualCard", unspecified).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UnknownEnumValue { field: "type", value: 0, .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_status() {
        let err = operation(
            "GetOperation",
            proto::Operation {
                status: 42,
                r#type: proto::OperationType::Fee as i32,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::UnknownEnumValue { field: "status", value: 42, .. }
        ));
    }

    #[test]
    fn missing_user_is_reported() {
        let err = user("CreateUser", None).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::MissingField { method: "CreateUser", field: "user" }
        ));
    }

    #[test]
    fn purchase_request_keeps_category() {
        let request = MakePurchaseOperationRequest::fake(&mut RandomFaker::seeded(3), "acc", "card");
        let category = request.category.clone();
        let status = request.operation.status;

        let proto_request = proto::MakePurchaseOperationRequest::from(request);
        assert_eq!(proto_request.category, category);
        assert_eq!(proto_request.account_id, "acc");
        assert_eq!(
            proto_request.status,
            proto::OperationStatus::from(status) as i32
        );
    }

    #[test]
    fn document_url_must_parse() {
        let err = document(proto::Document {
            url: "not a url".to_string(),
            document: String::new(),
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::Url(_)));
    }
}
