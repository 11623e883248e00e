use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use leaseflow::workflows::leasing::{
    ApprovalRequest, LeaseBackend, PaymentMethod, PaymentOutcome, PaymentRequest, RenewalRequest,
    TenantId, TransitionError,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stage the backend believes each tenant is in. Tenants it has never seen
/// are treated as fresh applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoteStage {
    Prospect,
    AwaitingRent,
    AwaitingVerification,
    Active,
    Rejected,
}

/// In-memory consistency arbiter standing in for the remote lease service.
///
/// Enforces the same transition graph the real backend does, so stale local
/// actions (reject after approve, double refunds) come back as field-keyed
/// or general errors instead of silently succeeding.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeaseBackend {
    stages: Arc<Mutex<HashMap<TenantId, RemoteStage>>>,
    refunded: Arc<Mutex<HashMap<TenantId, bool>>>,
}

impl InMemoryLeaseBackend {
    fn stage_of(&self, tenant_id: &TenantId) -> RemoteStage {
        self.stages
            .lock()
            .expect("stage mutex poisoned")
            .get(tenant_id)
            .copied()
            .unwrap_or(RemoteStage::Prospect)
    }

    fn set_stage(&self, tenant_id: &TenantId, stage: RemoteStage) {
        self.stages
            .lock()
            .expect("stage mutex poisoned")
            .insert(tenant_id.clone(), stage);
    }
}

#[async_trait]
impl LeaseBackend for InMemoryLeaseBackend {
    async fn approve(&self, request: &ApprovalRequest) -> Result<(), TransitionError> {
        if self.stage_of(&request.tenant_id) != RemoteStage::Prospect {
            return Err(TransitionError::general(
                "tenant is no longer a pending applicant",
            ));
        }
        self.set_stage(&request.tenant_id, RemoteStage::AwaitingRent);
        Ok(())
    }

    async fn reject(&self, tenant_id: &TenantId) -> Result<(), TransitionError> {
        if self.stage_of(tenant_id) != RemoteStage::Prospect {
            return Err(TransitionError::general(
                "tenant is no longer a pending applicant",
            ));
        }
        self.set_stage(tenant_id, RemoteStage::Rejected);
        Ok(())
    }

    async fn record_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentOutcome, TransitionError> {
        if self.stage_of(&request.tenant_id) != RemoteStage::AwaitingRent {
            return Err(TransitionError::general("tenant is not awaiting rent"));
        }
        Ok(match request.method {
            PaymentMethod::Card => {
                self.set_stage(&request.tenant_id, RemoteStage::Active);
                PaymentOutcome::Settled
            }
            PaymentMethod::Ach => {
                self.set_stage(&request.tenant_id, RemoteStage::AwaitingVerification);
                PaymentOutcome::PendingVerification
            }
        })
    }

    async fn confirm_bank_verification(
        &self,
        tenant_id: &TenantId,
    ) -> Result<(), TransitionError> {
        if self.stage_of(tenant_id) != RemoteStage::AwaitingVerification {
            return Err(TransitionError::general(
                "no bank verification is outstanding for this tenant",
            ));
        }
        self.set_stage(tenant_id, RemoteStage::Active);
        Ok(())
    }

    async fn renew(&self, request: &RenewalRequest) -> Result<(), TransitionError> {
        if self.stage_of(&request.tenant_id) != RemoteStage::Active {
            return Err(TransitionError::general("tenant has no active lease"));
        }
        Ok(())
    }

    async fn refund(&self, tenant_id: &TenantId) -> Result<(), TransitionError> {
        let mut refunded = self.refunded.lock().expect("refund mutex poisoned");
        if refunded.get(tenant_id).copied().unwrap_or(false) {
            return Err(TransitionError::general(
                "security deposit was already refunded",
            ));
        }
        refunded.insert(tenant_id.clone(), true);
        Ok(())
    }

    async fn deactivate(&self, _tenant_id: &TenantId) -> Result<(), TransitionError> {
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
