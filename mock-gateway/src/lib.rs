//! In-memory stand-in for the banking demo's HTTP gateway.
//!
//! Serves the same REST routes as the real gateway so clients, seeding and
//! scenarios can be exercised without the backing services.
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use bankload_gateway::schema::accounts::{
    AccountType, GetAccountsQuery, GetAccountsResponse, OpenAccountRequest, OpenAccountResponse,
};
use bankload_gateway::schema::cards::{CardType, IssueCardRequest, IssueCardResponse};
use bankload_gateway::schema::documents::{
    Document, GetContractDocumentResponse, GetTariffDocumentResponse,
};
use bankload_gateway::schema::operations::{
    GetOperationReceiptResponse, GetOperationResponse, GetOperationsQuery, GetOperationsResponse,
    GetOperationsSummaryResponse, MakeOperationRequest, MakeOperationResponse,
    MakePurchaseOperationRequest, OperationReceipt, OperationType,
};
use bankload_gateway::schema::users::{CreateUserRequest, CreateUserResponse, GetUserResponse};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use metrics::counter;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use url::Url;

mod store;

pub use store::{NotFound, Store};

const DOCUMENTS_HOST: &str = "http://mock-gateway.local";

#[derive(Clone, Debug, Default)]
pub struct MockConfig {
    /// Requests above this rate are answered with `503 Service Unavailable`.
    pub max_tps: Option<NonZeroU32>,
    /// Added to every request before it is handled.
    pub delay: Duration,
}

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
    delay: Duration,
}

impl AppState {
    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, StatusCode> {
        self.store.read().map_err(|_| {
            error!("Store lock poisoned");
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, StatusCode> {
        self.store.write().map_err(|_| {
            error!("Store lock poisoned");
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }
}

impl From<NotFound> for StatusCode {
    fn from(_: NotFound) -> Self {
        StatusCode::NOT_FOUND
    }
}

pub fn router(config: MockConfig) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store::default())),
        limiter: config.max_tps.map(|tps| Arc::new(rate_limiter(tps))),
        delay: config.delay,
    };

    Router::new()
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/accounts", get(get_accounts))
        .route("/api/v1/accounts/open-deposit-account", post(open_deposit_account))
        .route("/api/v1/accounts/open-savings-account", post(open_savings_account))
        .route("/api/v1/accounts/open-debit-card-account", post(open_debit_card_account))
        .route("/api/v1/accounts/open-credit-card-account", post(open_credit_card_account))
        .route("/api/v1/cards/issue-virtual-card", post(issue_virtual_card))
        .route("/api/v1/cards/issue-physical-card", post(issue_physical_card))
        .route("/api/v1/operations", get(get_operations))
        .route("/api/v1/operations/:operation_id", get(get_operation))
        .route(
            "/api/v1/operations/operation-receipt/:operation_id",
            get(get_operation_receipt),
        )
        .route("/api/v1/operations/operations-summary", get(get_operations_summary))
        .route("/api/v1/operations/make-fee-operation", post(make_fee_operation))
        .route("/api/v1/operations/make-top-up-operation", post(make_top_up_operation))
        .route("/api/v1/operations/make-cashback-operation", post(make_cashback_operation))
        .route("/api/v1/operations/make-transfer-operation", post(make_transfer_operation))
        .route("/api/v1/operations/make-purchase-operation", post(make_purchase_operation))
        .route(
            "/api/v1/operations/make-bill-payment-operation",
            post(make_bill_payment_operation),
        )
        .route(
            "/api/v1/operations/make-cash-withdrawal-operation",
            post(make_cash_withdrawal_operation),
        )
        .route(
            "/api/v1/documents/tariff-document/:account_id",
            get(get_tariff_document),
        )
        .route(
            "/api/v1/documents/contract-document/:account_id",
            get(get_contract_document),
        )
        .layer(middleware::from_fn_with_state(state.clone(), admission))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(addr: SocketAddr, config: MockConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Mock gateway listening on {}", listener.local_addr()?);
    axum::serve(listener, router(config)).await
}

/// Serves a fresh mock on an ephemeral local port and returns its address.
pub async fn spawn(config: MockConfig) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router(config)).await {
            error!("Mock gateway stopped: {err}");
        }
    });
    Ok(addr)
}

pub fn rate_limiter(tps: NonZeroU32) -> DefaultDirectRateLimiter {
    RateLimiter::direct(Quota::per_second(tps))
}

async fn admission(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    counter!("mock_gateway_requests_total").increment(1);
    TPS_MEASURE.fetch_add(1, Ordering::Relaxed);

    if let Some(limiter) = &state.limiter {
        if limiter.check().is_err() {
            debug!("Rate limited {}", request.uri());
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    }
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    Ok(next.run(request).await)
}

/** Users **/

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, StatusCode> {
    let user = state.write()?.create_user(request);
    Ok(Json(CreateUserResponse { user }))
}

async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<GetUserResponse>, StatusCode> {
    let user = state.read()?.user(&user_id)?.clone();
    Ok(Json(GetUserResponse { user }))
}

/** Accounts **/

async fn get_accounts(
    State(state): State<AppState>,
    Query(query): Query<GetAccountsQuery>,
) -> Result<Json<GetAccountsResponse>, StatusCode> {
    let accounts = state.read()?.accounts(&query.user_id);
    Ok(Json(GetAccountsResponse { accounts }))
}

fn open_account(
    state: &AppState,
    kind: AccountType,
    request: OpenAccountRequest,
) -> Result<Json<OpenAccountResponse>, StatusCode> {
    let account = state.write()?.open_account(kind, &request.user_id)?;
    Ok(Json(OpenAccountResponse { account }))
}

async fn open_deposit_account(
    State(state): State<AppState>,
    Json(request): Json<OpenAccountRequest>,
) -> Result<Json<OpenAccountResponse>, StatusCode> {
    open_account(&state, AccountType::Deposit, request)
}

async fn open_savings_account(
    State(state): State<AppState>,
    Json(request): Json<OpenAccountRequest>,
) -> Result<Json<OpenAccountResponse>, StatusCode> {
    open_account(&state, AccountType::Savings, request)
}

async fn open_debit_card_account(
    State(state): State<AppState>,
    Json(request): Json<OpenAccountRequest>,
) -> Result<Json<OpenAccountResponse>, StatusCode> {
    open_account(&state, AccountType::DebitCard, request)
}

async fn open_credit_card_account(
    State(state): State<AppState>,
    Json(request): Json<OpenAccountRequest>,
) -> Result<Json<OpenAccountResponse>, StatusCode> {
    open_account(&state, AccountType::CreditCard, request)
}

/** Cards **/

fn issue_card(
    state: &AppState,
    kind: CardType,
    request: IssueCardRequest,
) -> Result<Json<IssueCardResponse>, StatusCode> {
    let card = state
        .write()?
        .issue_card(kind, &request.user_id, &request.account_id)?;
    Ok(Json(IssueCardResponse { card }))
}

async fn issue_virtual_card(
    State(state): State<AppState>,
    Json(request): Json<IssueCardRequest>,
) -> Result<Json<IssueCardResponse>, StatusCode> {
    issue_card(&state, CardType::Virtual, request)
}

async fn issue_physical_card(
    State(state): State<AppState>,
    Json(request): Json<IssueCardRequest>,
) -> Result<Json<IssueCardResponse>, StatusCode> {
    issue_card(&state, CardType::Physical, request)
}

/** Operations **/

async fn get_operation(
    State(state): State<AppState>,
    Path(operation_id): Path<String>,
) -> Result<Json<GetOperationResponse>, StatusCode> {
    let operation = state.read()?.operation(&operation_id)?.clone();
    Ok(Json(GetOperationResponse { operation }))
}

async fn get_operation_receipt(
    State(state): State<AppState>,
    Path(operation_id): Path<String>,
) -> Result<Json<GetOperationReceiptResponse>, StatusCode> {
    let operation = state.read()?.operation(&operation_id)?.clone();
    let receipt = OperationReceipt {
        url: document_url("receipts", &operation.id)?,
        document: format!(
            "{:?} {:.2} on card {} at {}",
            operation.operation_type, operation.amount, operation.card_id, operation.created_at
        ),
    };
    Ok(Json(GetOperationReceiptResponse { receipt }))
}

async fn get_operations(
    State(state): State<AppState>,
    Query(query): Query<GetOperationsQuery>,
) -> Result<Json<GetOperationsResponse>, StatusCode> {
    let operations = state.read()?.operations(&query.account_id);
    Ok(Json(GetOperationsResponse { operations }))
}

async fn get_operations_summary(
    State(state): State<AppState>,
    Query(query): Query<GetOperationsQuery>,
) -> Result<Json<GetOperationsSummaryResponse>, StatusCode> {
    let store = state.read()?;
    store.account(&query.account_id)?;
    let summary = store.summary(&query.account_id);
    Ok(Json(GetOperationsSummaryResponse { summary }))
}

fn make_operation(
    state: &AppState,
    kind: OperationType,
    request: MakeOperationRequest,
    category: String,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    let operation = state.write()?.make_operation(kind, request, category)?;
    Ok(Json(MakeOperationResponse { operation }))
}

async fn make_fee_operation(
    State(state): State<AppState>,
    Json(request): Json<MakeOperationRequest>,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    make_operation(&state, OperationType::Fee, request, String::new())
}

async fn make_top_up_operation(
    State(state): State<AppState>,
    Json(request): Json<MakeOperationRequest>,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    make_operation(&state, OperationType::TopUp, request, String::new())
}

async fn make_cashback_operation(
    State(state): State<AppState>,
    Json(request): Json<MakeOperationRequest>,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    make_operation(&state, OperationType::Cashback, request, String::new())
}

async fn make_transfer_operation(
    State(state): State<AppState>,
    Json(request): Json<MakeOperationRequest>,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    make_operation(&state, OperationType::Transfer, request, String::new())
}

async fn make_purchase_operation(
    State(state): State<AppState>,
    Json(request): Json<MakePurchaseOperationRequest>,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    make_operation(
        &state,
        OperationType::Purchase,
        request.operation,
        request.category,
    )
}

async fn make_bill_payment_operation(
    State(state): State<AppState>,
    Json(request): Json<MakeOperationRequest>,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    make_operation(&state, OperationType::BillPayment, request, String::new())
}

async fn make_cash_withdrawal_operation(
    State(state): State<AppState>,
    Json(request): Json<MakeOperationRequest>,
) -> Result<Json<MakeOperationResponse>, StatusCode> {
    make_operation(&state, OperationType::CashWithdrawal, request, String::new())
}

/** Documents **/

fn account_document(state: &AppState, kind: &str, account_id: &str) -> Result<Document, StatusCode> {
    let account_type = state.read()?.account(account_id)?.account_type;
    Ok(Document {
        url: document_url(kind, account_id)?,
        document: format!("{kind} for {account_type:?} account {account_id}"),
    })
}

async fn get_tariff_document(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<GetTariffDocumentResponse>, StatusCode> {
    let tariff = account_document(&state, "tariff", &account_id)?;
    Ok(Json(GetTariffDocumentResponse { tariff }))
}

async fn get_contract_document(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<GetContractDocumentResponse>, StatusCode> {
    let contract = account_document(&state, "contract", &account_id)?;
    Ok(Json(GetContractDocumentResponse { contract }))
}

fn document_url(kind: &str, id: &str) -> Result<Url, StatusCode> {
    Url::parse(&format!("{DOCUMENTS_HOST}/{kind}/{id}.pdf")).map_err(|err| {
        error!("Invalid document url: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/** TPS Printer **/

static TPS_MEASURE: AtomicU64 = AtomicU64::new(0);

pub async fn tps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let requests = TPS_MEASURE.swap(0, Ordering::Relaxed);
        if requests > 0 {
            info!("{requests} TPS");
        }
    }
}
