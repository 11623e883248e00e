use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::workflows::leasing::backend::{
    ApprovalRequest, LeaseBackend, PaymentOutcome, PaymentRequest, RenewalRequest,
};
use crate::workflows::leasing::domain::{
    DepositPolicy, TenantId, TenantRecord, TransitionError,
};
use crate::workflows::leasing::service::LeaseLifecycleService;

/// Backend double that approves everything unless told to fail the next call.
/// Card payments settle immediately; ACH parks on verification, matching the
/// rails the real arbiter uses.
#[derive(Default)]
pub(super) struct ScriptedBackend {
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<Option<TransitionError>>,
}

impl ScriptedBackend {
    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(super) fn fail_next(&self, error: TransitionError) {
        *self.fail_next.lock().expect("fail mutex poisoned") = Some(error);
    }

    fn observe(&self, call: &str) -> Result<(), TransitionError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(call.to_string());
        match self.fail_next.lock().expect("fail mutex poisoned").take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LeaseBackend for ScriptedBackend {
    async fn approve(&self, _request: &ApprovalRequest) -> Result<(), TransitionError> {
        self.observe("approve")
    }

    async fn reject(&self, _tenant_id: &TenantId) -> Result<(), TransitionError> {
        self.observe("reject")
    }

    async fn record_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentOutcome, TransitionError> {
        self.observe("record_payment")?;
        Ok(match request.method {
            crate::workflows::leasing::domain::PaymentMethod::Card => PaymentOutcome::Settled,
            crate::workflows::leasing::domain::PaymentMethod::Ach => {
                PaymentOutcome::PendingVerification
            }
        })
    }

    async fn confirm_bank_verification(
        &self,
        _tenant_id: &TenantId,
    ) -> Result<(), TransitionError> {
        self.observe("confirm_bank_verification")
    }

    async fn renew(&self, _request: &RenewalRequest) -> Result<(), TransitionError> {
        self.observe("renew")
    }

    async fn refund(&self, _tenant_id: &TenantId) -> Result<(), TransitionError> {
        self.observe("refund")
    }

    async fn deactivate(&self, _tenant_id: &TenantId) -> Result<(), TransitionError> {
        self.observe("deactivate")
    }
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn tenant(id: &str) -> TenantId {
    TenantId(id.to_string())
}

pub(super) fn service_with_prospect(
    id: &str,
) -> (Arc<ScriptedBackend>, LeaseLifecycleService<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::default());
    let service = LeaseLifecycleService::new(backend.clone());
    service.register_prospect(TenantRecord::prospect(tenant(id), "ws-alder", 1180));
    (backend, service)
}

pub(super) fn approval(id: &str, policy: DepositPolicy) -> ApprovalRequest {
    ApprovalRequest {
        tenant_id: tenant(id),
        lease_start_date: date(2025, 6, 1),
        lease_end_date: date(2026, 5, 31),
        deposit_policy: policy,
    }
}
