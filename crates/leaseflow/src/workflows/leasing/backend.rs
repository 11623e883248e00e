use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{DepositPolicy, PaymentMethod, TenantId, TransitionError};

/// Approval terms submitted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub tenant_id: TenantId,
    pub lease_start_date: NaiveDate,
    pub lease_end_date: NaiveDate,
    pub deposit_policy: DepositPolicy,
}

/// First-payment submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub tenant_id: TenantId,
    pub method: PaymentMethod,
    pub paid_on: NaiveDate,
}

/// Renewal terms; rent carries over when `rent` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalRequest {
    pub tenant_id: TenantId,
    pub lease_start_date: NaiveDate,
    pub lease_end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<u32>,
}

/// How the backend settled a payment submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Funds confirmed; the lease is funded immediately (card rails).
    Settled,
    /// ACH micro-deposits issued; funding waits on bank verification.
    PendingVerification,
}

/// The remote service that arbitrates every lifecycle transition.
///
/// Implementations translate their own failures into [`TransitionError`]; no
/// other error shape crosses this boundary. The local projection is patched
/// only after a method returns `Ok`.
#[async_trait]
pub trait LeaseBackend: Send + Sync {
    async fn approve(&self, request: &ApprovalRequest) -> Result<(), TransitionError>;
    async fn reject(&self, tenant_id: &TenantId) -> Result<(), TransitionError>;
    async fn record_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentOutcome, TransitionError>;
    async fn confirm_bank_verification(&self, tenant_id: &TenantId)
        -> Result<(), TransitionError>;
    async fn renew(&self, request: &RenewalRequest) -> Result<(), TransitionError>;
    async fn refund(&self, tenant_id: &TenantId) -> Result<(), TransitionError>;
    async fn deactivate(&self, tenant_id: &TenantId) -> Result<(), TransitionError>;
}
