use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use leaseflow::workflows::leasing::{
    ApprovalRequest, Collection, DepositPolicy, LeaseBackend, LeaseLifecycleService, LeaseStage,
    PaymentMethod, PaymentOutcome, PaymentRequest, RenewalRequest, TenantId, TenantRecord,
    TenantStatus, TransitionError,
};

/// Backend that accepts every transition; ACH settles only after verification.
#[derive(Default)]
struct PermissiveBackend;

#[async_trait]
impl LeaseBackend for PermissiveBackend {
    async fn approve(&self, _request: &ApprovalRequest) -> Result<(), TransitionError> {
        Ok(())
    }

    async fn reject(&self, _tenant_id: &TenantId) -> Result<(), TransitionError> {
        Ok(())
    }

    async fn record_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentOutcome, TransitionError> {
        Ok(match request.method {
            PaymentMethod::Card => PaymentOutcome::Settled,
            PaymentMethod::Ach => PaymentOutcome::PendingVerification,
        })
    }

    async fn confirm_bank_verification(
        &self,
        _tenant_id: &TenantId,
    ) -> Result<(), TransitionError> {
        Ok(())
    }

    async fn renew(&self, _request: &RenewalRequest) -> Result<(), TransitionError> {
        Ok(())
    }

    async fn refund(&self, _tenant_id: &TenantId) -> Result<(), TransitionError> {
        Ok(())
    }

    async fn deactivate(&self, _tenant_id: &TenantId) -> Result<(), TransitionError> {
        Ok(())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn full_tenancy_walkthrough() {
    let service = LeaseLifecycleService::new(Arc::new(PermissiveBackend));
    let id = TenantId("t-100".to_string());
    service.register_prospect(TenantRecord::prospect(id.clone(), "ws-birch", 1450));

    // Host approves with a deposit equal to rent.
    let record = service
        .approve(ApprovalRequest {
            tenant_id: id.clone(),
            lease_start_date: date(2025, 7, 1),
            lease_end_date: date(2026, 6, 30),
            deposit_policy: DepositPolicy::SameAsRent,
        })
        .await
        .expect("approval succeeds");
    assert_eq!(record.stage, LeaseStage::AwaitingFirstPayment);

    // Tenant pays by ACH; funding waits on micro-deposit verification.
    let record = service
        .record_payment(PaymentRequest {
            tenant_id: id.clone(),
            method: PaymentMethod::Ach,
            paid_on: date(2025, 7, 1),
        })
        .await
        .expect("payment accepted");
    assert_eq!(record.stage, LeaseStage::AwaitingBankVerification);
    assert_eq!(
        record.agreement.as_ref().expect("agreement").security_deposit_fee,
        Some(1450)
    );

    let record = service
        .confirm_bank_verification(&id)
        .await
        .expect("verification succeeds");
    assert_eq!(record.stage, LeaseStage::Active);

    // Mid-term the rent is covered; after the term it is not.
    assert_eq!(service.rent_paid(&id, date(2025, 12, 1)), Ok(true));
    assert_eq!(service.rent_paid(&id, date(2026, 7, 15)), Ok(false));

    // A year later the host renews at higher rent.
    let record = service
        .renew(RenewalRequest {
            tenant_id: id.clone(),
            lease_start_date: date(2026, 7, 1),
            lease_end_date: date(2027, 6, 30),
            rent: Some(1520),
        })
        .await
        .expect("renewal succeeds");
    assert_eq!(record.agreement.as_ref().expect("agreement").rent, 1520);

    // Move-out: refund the deposit, then free the unit.
    let record = service.refund(&id).await.expect("refund succeeds");
    assert!(record.agreement.as_ref().expect("agreement").is_refunded);
    assert_eq!(record.status, TenantStatus::Active);

    let record = service.deactivate(&id).await.expect("deactivation succeeds");
    assert_eq!(record.status, TenantStatus::Inactive);

    let (collection, _) = service.get(&id).expect("tenant retained");
    assert_eq!(collection, Collection::Tenants);
}

#[tokio::test]
async fn hydration_replaces_a_cached_collection() {
    let service = LeaseLifecycleService::new(Arc::new(PermissiveBackend));
    service.register_prospect(TenantRecord::prospect(
        TenantId("stale".to_string()),
        "ws-birch",
        1450,
    ));

    service.hydrate(
        Collection::Prospects,
        vec![
            TenantRecord::prospect(TenantId("t-1".to_string()), "ws-birch", 1450),
            TenantRecord::prospect(TenantId("t-2".to_string()), "ws-cedar", 990),
        ],
    );

    assert!(service.get(&TenantId("stale".to_string())).is_none());
    assert_eq!(service.list(Collection::Prospects).len(), 2);
}
