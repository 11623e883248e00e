use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::backend::{ApprovalRequest, LeaseBackend, PaymentRequest, RenewalRequest};
use super::domain::{DepositPolicy, PaymentMethod, TenantId, TenantRecord, TransitionError};
use super::service::LeaseLifecycleService;

/// Router builder exposing the lease lifecycle transitions over HTTP.
pub fn lease_router<B>(service: Arc<LeaseLifecycleService<B>>) -> Router
where
    B: LeaseBackend + 'static,
{
    Router::new()
        .route(
            "/api/v1/leases/:tenant_id",
            get(tenant_handler::<B>),
        )
        .route(
            "/api/v1/leases/:tenant_id/approve",
            post(approve_handler::<B>),
        )
        .route(
            "/api/v1/leases/:tenant_id/reject",
            post(reject_handler::<B>),
        )
        .route(
            "/api/v1/leases/:tenant_id/payments",
            post(payment_handler::<B>),
        )
        .route(
            "/api/v1/leases/:tenant_id/verify-bank",
            post(verify_bank_handler::<B>),
        )
        .route("/api/v1/leases/:tenant_id/renew", post(renew_handler::<B>))
        .route(
            "/api/v1/leases/:tenant_id/refund",
            post(refund_handler::<B>),
        )
        .route(
            "/api/v1/leases/:tenant_id/deactivate",
            post(deactivate_handler::<B>),
        )
        .route(
            "/api/v1/leases/:tenant_id/rent-status",
            get(rent_status_handler::<B>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApproveBody {
    pub(crate) lease_start_date: Option<NaiveDate>,
    pub(crate) lease_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) security_deposit_fee: Option<u32>,
    #[serde(default)]
    pub(crate) is_same_as_rent: bool,
}

impl ApproveBody {
    fn into_request(self, tenant_id: TenantId) -> Result<ApprovalRequest, TransitionError> {
        let lease_start_date = self
            .lease_start_date
            .ok_or_else(|| TransitionError::field("leaseStartDate", "missing leaseStartDate"))?;
        let lease_end_date = self
            .lease_end_date
            .ok_or_else(|| TransitionError::field("leaseEndDate", "missing leaseEndDate"))?;

        let deposit_policy = match (self.security_deposit_fee, self.is_same_as_rent) {
            (Some(_), true) => {
                return Err(TransitionError::field(
                    "securityDepositFee",
                    "securityDepositFee and isSameAsRent are mutually exclusive",
                ))
            }
            (Some(fee), false) => DepositPolicy::Flat(fee),
            (None, true) => DepositPolicy::SameAsRent,
            (None, false) => DepositPolicy::None,
        };

        Ok(ApprovalRequest {
            tenant_id,
            lease_start_date,
            lease_end_date,
            deposit_policy,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentBody {
    pub(crate) method: PaymentMethod,
    #[serde(default)]
    pub(crate) paid_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenewBody {
    pub(crate) lease_start_date: Option<NaiveDate>,
    pub(crate) lease_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) rent: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RentStatusQuery {
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

fn success(record: TenantRecord) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "tenant": record })),
    )
        .into_response()
}

fn failure(error: TransitionError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": error })),
    )
        .into_response()
}

pub(crate) async fn tenant_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    let id = TenantId(tenant_id);
    match service.get(&id) {
        Some((collection, record)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "collection": collection, "tenant": record })),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": TransitionError::general(format!("tenant {id} is not known locally")),
            })),
        )
            .into_response(),
    }
}

pub(crate) async fn approve_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
    Json(body): Json<ApproveBody>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    let request = match body.into_request(TenantId(tenant_id)) {
        Ok(request) => request,
        Err(error) => return failure(error),
    };
    match service.approve(request).await {
        Ok(record) => success(record),
        Err(error) => failure(error),
    }
}

pub(crate) async fn reject_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    match service.reject(&TenantId(tenant_id)).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn payment_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
    Json(body): Json<PaymentBody>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    let request = PaymentRequest {
        tenant_id: TenantId(tenant_id),
        method: body.method,
        paid_on: body.paid_on.unwrap_or_else(|| Local::now().date_naive()),
    };
    match service.record_payment(request).await {
        Ok(record) => success(record),
        Err(error) => failure(error),
    }
}

pub(crate) async fn verify_bank_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    match service
        .confirm_bank_verification(&TenantId(tenant_id))
        .await
    {
        Ok(record) => success(record),
        Err(error) => failure(error),
    }
}

pub(crate) async fn renew_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
    Json(body): Json<RenewBody>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    let lease_start_date = match body.lease_start_date {
        Some(date) => date,
        None => return failure(TransitionError::field("leaseStartDate", "missing leaseStartDate")),
    };
    let lease_end_date = match body.lease_end_date {
        Some(date) => date,
        None => return failure(TransitionError::field("leaseEndDate", "missing leaseEndDate")),
    };

    let request = RenewalRequest {
        tenant_id: TenantId(tenant_id),
        lease_start_date,
        lease_end_date,
        rent: body.rent,
    };
    match service.renew(request).await {
        Ok(record) => success(record),
        Err(error) => failure(error),
    }
}

pub(crate) async fn refund_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    match service.refund(&TenantId(tenant_id)).await {
        Ok(record) => success(record),
        Err(error) => failure(error),
    }
}

pub(crate) async fn deactivate_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    match service.deactivate(&TenantId(tenant_id)).await {
        Ok(record) => success(record),
        Err(error) => failure(error),
    }
}

pub(crate) async fn rent_status_handler<B>(
    State(service): State<Arc<LeaseLifecycleService<B>>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<RentStatusQuery>,
) -> Response
where
    B: LeaseBackend + 'static,
{
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    match service.rent_paid(&TenantId(tenant_id), today) {
        Ok(paid) => (
            StatusCode::OK,
            Json(json!({ "success": true, "rentPaid": paid, "today": today })),
        )
            .into_response(),
        Err(error) => failure(error),
    }
}
