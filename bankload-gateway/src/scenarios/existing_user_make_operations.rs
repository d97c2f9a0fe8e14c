use super::{Seeded, UserSetupError};
use crate::grpc::GrpcGateway;
use crate::seeds::{SeedAccountsPlan, SeedsPlan};
use bankload::TaskSet;
use tracing::debug;

pub(super) fn seeds_plan() -> SeedsPlan {
    SeedsPlan::users(300).with_credit_card_accounts(
        SeedAccountsPlan::accounts(1)
            .with_physical_cards(1)
            .with_top_up_operations(5)
            .with_purchase_operations(5),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    MakeTopUpOperation,
    MakePurchaseOperation,
    GetOperations,
}

/// Seeded users top up and spend from their credit card account over gRPC.
pub struct ExistingUserMakeOperations {
    gateway: GrpcGateway,
    account_id: String,
    card_id: String,
}

impl TaskSet for ExistingUserMakeOperations {
    type Context = Seeded<GrpcGateway>;
    type Task = Task;
    type Error = UserSetupError;

    const TASKS: &'static [(Task, u32)] = &[
        (Task::MakeTopUpOperation, 3),
        (Task::MakePurchaseOperation, 3),
        (Task::GetOperations, 4),
    ];

    async fn on_start(context: &Seeded<GrpcGateway>) -> Result<Self, UserSetupError> {
        let user = context
            .seeds
            .next_user()
            .ok_or(UserSetupError::NoSeededUsers)?;
        let (account_id, card_id) = user
            .credit_card_accounts
            .iter()
            .find_map(|account| Some((account.account_id.clone(), account.card_id()?.to_string())))
            .ok_or_else(|| UserSetupError::MissingFixture {
                user_id: user.user_id.clone(),
                what: "credit card account with a card",
            })?;

        Ok(Self {
            gateway: context.gateway.clone(),
            account_id,
            card_id,
        })
    }

    async fn run(&mut self, task: Task) {
        let operations = &self.gateway.operations;
        let result = match task {
            Task::MakeTopUpOperation => operations
                .make_top_up_operation(&self.account_id, &self.card_id)
                .await
                .map(drop),
            Task::MakePurchaseOperation => operations
                .make_purchase_operation(&self.account_id, &self.card_id)
                .await
                .map(drop),
            Task::GetOperations => operations.get_operations(&self.account_id).await.map(drop),
        };
        if let Err(err) = result {
            debug!(?task, "Task failed: {err}");
        }
    }
}
