use bankload_gateway::schema::accounts::{Account, AccountStatus, AccountType};
use bankload_gateway::schema::cards::{Card, CardPaymentSystem, CardStatus, CardType};
use bankload_gateway::schema::operations::{
    MakeOperationRequest, Operation, OperationType, OperationsSummary,
};
use bankload_gateway::schema::users::{CreateUserRequest, User};
use rand::Rng;
use std::collections::HashMap;
use std::time::SystemTime;
use uuid::Uuid;

/// Why a lookup failed; the handlers turn it into a status code.
#[derive(Debug, PartialEq, Eq)]
pub enum NotFound {
    User,
    Account,
    Card,
    Operation,
}

struct StoredAccount {
    user_id: String,
    account: Account,
}

/// In-memory state of the mock gateway.
#[derive(Default)]
pub struct Store {
    users: HashMap<String, User>,
    accounts: HashMap<String, StoredAccount>,
    operations: HashMap<String, Operation>,
}

impl Store {
    pub fn create_user(&mut self, request: CreateUserRequest) -> User {
        let user = User {
            id: new_id(),
            email: request.email,
            last_name: request.last_name,
            first_name: request.first_name,
            middle_name: request.middle_name,
            phone_number: request.phone_number,
        };
        self.users.insert(user.id.clone(), user.clone());
        user
    }

    pub fn user(&self, user_id: &str) -> Result<&User, NotFound> {
        self.users.get(user_id).ok_or(NotFound::User)
    }

    /// Card accounts come with a virtual card already issued.
    pub fn open_account(&mut self, kind: AccountType, user_id: &str) -> Result<Account, NotFound> {
        let user = self.user(user_id)?;
        let id = new_id();
        let cards = match kind {
            AccountType::DebitCard | AccountType::CreditCard => {
                vec![new_card(user, &id, CardType::Virtual)]
            }
            AccountType::Deposit | AccountType::Savings => vec![],
        };
        let account = Account {
            id: id.clone(),
            account_type: kind,
            cards,
            status: AccountStatus::Active,
            balance: 0.,
        };

        self.accounts.insert(
            id,
            StoredAccount {
                user_id: user_id.to_string(),
                account: account.clone(),
            },
        );
        Ok(account)
    }

    pub fn accounts(&self, user_id: &str) -> Vec<Account> {
        let mut accounts: Vec<_> = self
            .accounts
            .values()
            .filter(|stored| stored.user_id == user_id)
            .map(|stored| stored.account.clone())
            .collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    pub fn account(&self, account_id: &str) -> Result<&Account, NotFound> {
        self.accounts
            .get(account_id)
            .map(|stored| &stored.account)
            .ok_or(NotFound::Account)
    }

    pub fn issue_card(
        &mut self,
        kind: CardType,
        user_id: &str,
        account_id: &str,
    ) -> Result<Card, NotFound> {
        let user = self.users.get(user_id).ok_or(NotFound::User)?;
        let stored = self
            .accounts
            .get_mut(account_id)
            .filter(|stored| stored.user_id == user_id)
            .ok_or(NotFound::Account)?;

        let card = new_card(user, account_id, kind);
        stored.account.cards.push(card.clone());
        Ok(card)
    }

    pub fn make_operation(
        &mut self,
        kind: OperationType,
        request: MakeOperationRequest,
        category: String,
    ) -> Result<Operation, NotFound> {
        let stored = self
            .accounts
            .get_mut(&request.account_id)
            .ok_or(NotFound::Account)?;
        if !stored.account.cards.iter().any(|card| card.id == request.card_id) {
            return Err(NotFound::Card);
        }

        match kind {
            OperationType::TopUp | OperationType::Cashback => {
                stored.account.balance += request.amount
            }
            _ => stored.account.balance -= request.amount,
        }

        let operation = Operation {
            id: new_id(),
            operation_type: kind,
            status: request.status,
            amount: request.amount,
            card_id: request.card_id,
            category,
            created_at: humantime::format_rfc3339_seconds(SystemTime::now()).to_string(),
            account_id: request.account_id,
        };
        self.operations
            .insert(operation.id.clone(), operation.clone());
        Ok(operation)
    }

    pub fn operation(&self, operation_id: &str) -> Result<&Operation, NotFound> {
        self.operations.get(operation_id).ok_or(NotFound::Operation)
    }

    pub fn operations(&self, account_id: &str) -> Vec<Operation> {
        let mut operations: Vec<_> = self
            .operations
            .values()
            .filter(|operation| operation.account_id == account_id)
            .cloned()
            .collect();
        operations.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        operations
    }

    pub fn summary(&self, account_id: &str) -> OperationsSummary {
        let mut summary = OperationsSummary {
            spent_amount: 0.,
            received_amount: 0.,
            cashback_amount: 0.,
        };
        for operation in self.operations.values() {
            if operation.account_id != account_id {
                continue;
            }
            match operation.operation_type {
                OperationType::TopUp => summary.received_amount += operation.amount,
                OperationType::Cashback => summary.cashback_amount += operation.amount,
                _ => summary.spent_amount += operation.amount,
            }
        }
        summary
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn new_card(user: &User, account_id: &str, kind: CardType) -> Card {
    let mut rng = rand::thread_rng();
    let card_number: String = (0..16)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    let payment_system = if rng.gen_bool(0.5) {
        CardPaymentSystem::Visa
    } else {
        CardPaymentSystem::Mastercard
    };

    Card {
        id: new_id(),
        pin: format!("{:04}", rng.gen_range(0..10_000)),
        cvv: format!("{:03}", rng.gen_range(0..1_000)),
        card_type: kind,
        status: CardStatus::Active,
        account_id: account_id.to_string(),
        card_number,
        card_holder: format!("{} {}", user.first_name, user.last_name).to_uppercase(),
        expiry_date: expiry_date(),
        payment_system,
    }
}

/// Five years from today, `YYYY-MM-DD`.
fn expiry_date() -> String {
    let today = humantime::format_rfc3339_seconds(SystemTime::now()).to_string();
    let year = today
        .get(..4)
        .and_then(|year| year.parse::<u32>().ok())
        .unwrap_or(2025);
    format!("{}{}", year + 5, today.get(4..10).unwrap_or("-12-31"))
}
