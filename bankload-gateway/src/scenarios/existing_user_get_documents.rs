use super::{Seeded, UserSetupError};
use crate::http::HttpGateway;
use crate::seeds::{SeedAccountsPlan, SeedUserResult, SeedsPlan};
use bankload::TaskSet;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

pub(super) fn seeds_plan() -> SeedsPlan {
    SeedsPlan::users(300)
        .with_deposit_accounts(SeedAccountsPlan::accounts(1))
        .with_savings_accounts(SeedAccountsPlan::accounts(1))
        .with_debit_card_accounts(SeedAccountsPlan::accounts(1))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    GetAccounts,
    GetTariffDocument,
    GetContractDocument,
}

/// Seeded users browse their accounts and download the documents of one of
/// them.
pub struct ExistingUserGetDocuments {
    gateway: HttpGateway,
    user: SeedUserResult,
    account_ids: Vec<String>,
    rng: SmallRng,
}

impl TaskSet for ExistingUserGetDocuments {
    type Context = Seeded<HttpGateway>;
    type Task = Task;
    type Error = UserSetupError;

    const TASKS: &'static [(Task, u32)] = &[
        (Task::GetAccounts, 1),
        (Task::GetTariffDocument, 2),
        (Task::GetContractDocument, 2),
    ];

    async fn on_start(context: &Seeded<HttpGateway>) -> Result<Self, UserSetupError> {
        let user = context
            .seeds
            .next_user()
            .cloned()
            .ok_or(UserSetupError::NoSeededUsers)?;
        let account_ids: Vec<_> = user
            .accounts()
            .map(|account| account.account_id.clone())
            .collect();
        if account_ids.is_empty() {
            return Err(UserSetupError::MissingFixture {
                user_id: user.user_id,
                what: "account",
            });
        }

        Ok(Self {
            gateway: context.gateway.clone(),
            user,
            account_ids,
            rng: SmallRng::from_entropy(),
        })
    }

    async fn run(&mut self, task: Task) {
        let gateway = &self.gateway;
        let result = match task {
            Task::GetAccounts => gateway
                .accounts
                .get_accounts(&self.user.user_id)
                .await
                .map(drop),
            Task::GetTariffDocument => {
                let Some(account_id) = self.account_ids.choose(&mut self.rng) else {
                    return;
                };
                gateway
                    .documents
                    .get_tariff_document(account_id)
                    .await
                    .map(drop)
            }
            Task::GetContractDocument => {
                let Some(account_id) = self.account_ids.choose(&mut self.rng) else {
                    return;
                };
                gateway
                    .documents
                    .get_contract_document(account_id)
                    .await
                    .map(drop)
            }
        };
        if let Err(err) = result {
            debug!(?task, "Task failed: {err}");
        }
    }
}
