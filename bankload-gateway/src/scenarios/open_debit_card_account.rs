use crate::error::GatewayError;
use crate::http::HttpGateway;
use crate::schema::users::User;
use bankload::TaskSet;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    OpenDebitCardAccount,
}

/// Every virtual user registers once, then keeps opening debit card accounts.
pub struct OpenDebitCardAccount {
    gateway: HttpGateway,
    user: User,
}

impl TaskSet for OpenDebitCardAccount {
    type Context = HttpGateway;
    type Task = Task;
    type Error = GatewayError;

    const TASKS: &'static [(Task, u32)] = &[(Task::OpenDebitCardAccount, 1)];

    async fn on_start(gateway: &HttpGateway) -> Result<Self, GatewayError> {
        let user = gateway.users.create_user().await?.user;
        Ok(Self {
            gateway: gateway.clone(),
            user,
        })
    }

    async fn run(&mut self, _: Task) {
        let result = self
            .gateway
            .accounts
            .open_debit_card_account(&self.user.id)
            .await;
        if let Err(err) = result {
            debug!("Open debit card account failed: {err}");
        }
    }
}
