use crate::grpc::GrpcGateway;
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

/// gRPC twin of [`NewUserGetAccounts`](super::NewUserGetAccounts).
pub struct GrpcNewUserGetAccounts {
    gateway: GrpcGateway,
    user: Option<User>,
}

impl TaskSet for GrpcNewUserGetAccounts {
    type Context = GrpcGateway;
    type Task = Task;
    type Error = Infallible;

    const TASKS: &'static [(Task, u32)] = &[
        (Task::CreateUser, 2),
        (Task::OpenDepositAccount, 2),
        (Task::GetAccounts, 6),
    ];

    async fn on_start(gateway: &GrpcGateway) -> Result<Self, Infallible> {
        Ok(Self {
            gateway: gateway.clone(),
            user: None,
        })
    }

    async fn run(&mut self, task: Task) {
        match task {
            Task::CreateUser => match self.gateway.users.create_user().await {
                Ok(response) => self.user = Some(response.user),
                Err(err) => debug!("CreateUser failed: {err}"),
            },
            Task::OpenDepositAccount => {
                let Some(user) = &self.user else {
                    warn!(?task, "No user created yet, skipping");
                    return;
                };
                if let Err(err) = self.gateway.accounts.open_deposit_account(&user.id).await {
                    debug!("OpenDepositAccount failed: {err}");
                }
            }
            Task::GetAccounts => {
                let Some(user) = &self.user else {
                    warn!(?task, "No user created yet, skipping");
                    return;
                };
                if let Err(err) = self.gateway.accounts.get_accounts(&user.id).await {
                    debug!("GetAccounts failed: {err}");
                }
            }
        }
    }
}
