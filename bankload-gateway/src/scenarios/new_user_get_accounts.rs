use crate::http::HttpGateway;
use crate::schema::users::User;
use bankload::TaskSet;
use std::convert::Infallible;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    CreateUser,
    OpenDepositAccount,
    GetAccounts,
}

/// Creates users over HTTP, opens deposit accounts for them and reads their
/// accounts back. Account steps wait until a user has been created.
pub struct NewUserGetAccounts {
    gateway: HttpGateway,
    user: Option<User>,
}

impl TaskSet for NewUserGetAccounts {
    type Context = HttpGateway;
    type Task = Task;
    type Error = Infallible;

    const TASKS: &'static [(Task, u32)] = &[
        (Task::CreateUser, 2),
        (Task::OpenDepositAccount, 2),
        (Task::GetAccounts, 6),
    ];

    async fn on_start(gateway: &HttpGateway) -> Result<Self, Infallible> {
        Ok(Self {
            gateway: gateway.clone(),
            user: None,
        })
    }

    async fn run(&mut self, task: Task) {
        if task == Task::CreateUser {
            match self.gateway.users.create_user().await {
                Ok(response) => self.user = Some(response.user),
                Err(err) => debug!("Create user failed: {err}"),
            }
            return;
        }

        let Some(user) = &self.user else {
            warn!(?task, "No user created yet, skipping");
            return;
        };
        let result = match task {
            Task::OpenDepositAccount => self
                .gateway
                .accounts
                .open_deposit_account(&user.id)
                .await
                .map(drop),
            _ => self.gateway.accounts.get_accounts(&user.id).await.map(drop),
        };
        if let Err(err) = result {
            debug!(?task, "Task failed: {err}");
        }
    }
}
