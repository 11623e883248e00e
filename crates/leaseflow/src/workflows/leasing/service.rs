use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::info;

use super::backend::{ApprovalRequest, LeaseBackend, PaymentOutcome, PaymentRequest, RenewalRequest};
use super::directory::{Collection, TenantDirectory};
use super::domain::{
    Acceptance, DepositPolicy, LeaseAgreement, LeaseStage, TenantId, TenantRecord, TenantStatus,
    TransitionError,
};
use super::rent::is_rent_paid_dates;

/// Drives lease lifecycle transitions against the remote backend and keeps
/// the local projection consistent with whichever transitions succeeded.
///
/// Preconditions are checked against the cached collections before the remote
/// call so an obviously stale action fails fast, but the backend remains the
/// sole arbiter: the projection is patched only on a successful response, and
/// the last successful response wins when two tabs race on one tenant.
pub struct LeaseLifecycleService<B> {
    backend: Arc<B>,
    directory: Mutex<TenantDirectory>,
}

impl<B> LeaseLifecycleService<B>
where
    B: LeaseBackend + 'static,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            directory: Mutex::new(TenantDirectory::default()),
        }
    }

    /// Seeds the prospect cache with a newly submitted application.
    pub fn register_prospect(&self, record: TenantRecord) -> TenantRecord {
        let mut directory = self.lock();
        directory.insert(Collection::Prospects, record.clone());
        record
    }

    /// Replaces one cached collection with a fresh server snapshot.
    pub fn hydrate(&self, collection: Collection, records: Vec<TenantRecord>) {
        self.lock().hydrate(collection, records);
    }

    pub fn get(&self, tenant_id: &TenantId) -> Option<(Collection, TenantRecord)> {
        self.lock()
            .locate(tenant_id)
            .map(|(collection, record)| (collection, record.clone()))
    }

    pub fn list(&self, collection: Collection) -> Vec<TenantRecord> {
        self.lock()
            .list(collection)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Approve a pending application, fixing the lease term and deposit policy.
    pub async fn approve(
        &self,
        request: ApprovalRequest,
    ) -> Result<TenantRecord, TransitionError> {
        if request.lease_end_date < request.lease_start_date {
            return Err(TransitionError::field(
                "leaseEndDate",
                "leaseEndDate must not precede leaseStartDate",
            ));
        }
        if let DepositPolicy::Flat(0) = request.deposit_policy {
            return Err(TransitionError::field(
                "securityDepositFee",
                "securityDepositFee must be a positive amount",
            ));
        }

        let quoted_rent = {
            let directory = self.lock();
            let record = self.expect_stage(
                &directory,
                &request.tenant_id,
                Collection::Prospects,
                LeaseStage::PendingApplication,
            )?;
            record.quoted_rent
        };

        self.backend.approve(&request).await?;

        let agreement = LeaseAgreement {
            lease_start_date: request.lease_start_date,
            lease_end_date: request.lease_end_date,
            rent: quoted_rent,
            security_deposit_fee: match request.deposit_policy {
                DepositPolicy::Flat(fee) => Some(fee),
                // Same-as-rent resolves when the first payment settles.
                DepositPolicy::SameAsRent | DepositPolicy::None => None,
            },
            is_refunded: false,
            last_payment_date: None,
        };

        let mut directory = self.lock();
        let record = directory
            .relocate(
                &request.tenant_id,
                Collection::Prospects,
                Collection::AwaitingRent,
                |record| {
                    record.acceptance = Acceptance::Approved;
                    record.stage = LeaseStage::AwaitingFirstPayment;
                    record.deposit_policy = Some(request.deposit_policy);
                    record.agreement = Some(agreement.clone());
                },
            )
            .cloned()
            .ok_or_else(|| stale_projection(&request.tenant_id))?;

        info!(tenant = %request.tenant_id, "application approved, awaiting first payment");
        Ok(record)
    }

    /// Reject a pending application. Terminal; the tenant must reapply.
    pub async fn reject(&self, tenant_id: &TenantId) -> Result<(), TransitionError> {
        {
            let directory = self.lock();
            self.expect_stage(
                &directory,
                tenant_id,
                Collection::Prospects,
                LeaseStage::PendingApplication,
            )?;
        }

        self.backend.reject(tenant_id).await?;

        let mut directory = self.lock();
        let still_prospect = matches!(
            directory.locate(tenant_id),
            Some((Collection::Prospects, _))
        );
        if !still_prospect {
            return Err(stale_projection(tenant_id));
        }
        directory.remove(tenant_id);

        info!(tenant = %tenant_id, "application rejected");
        Ok(())
    }

    /// Record the first rent payment. Card settles immediately; ACH parks the
    /// tenancy until micro-deposit verification confirms funding.
    pub async fn record_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<TenantRecord, TransitionError> {
        {
            let directory = self.lock();
            self.expect_stage(
                &directory,
                &request.tenant_id,
                Collection::AwaitingRent,
                LeaseStage::AwaitingFirstPayment,
            )?;
        }

        let outcome = self.backend.record_payment(&request).await?;

        let mut directory = self.lock();
        let settle = |record: &mut TenantRecord| {
            if let Some(agreement) = record.agreement.as_mut() {
                agreement.last_payment_date = Some(request.paid_on);
                if let Some(policy) = record.deposit_policy {
                    agreement.security_deposit_fee = policy.resolve(agreement.rent);
                }
            }
        };

        let record = match outcome {
            PaymentOutcome::Settled => directory.relocate(
                &request.tenant_id,
                Collection::AwaitingRent,
                Collection::Tenants,
                |record| {
                    settle(record);
                    record.stage = LeaseStage::Active;
                    record.status = TenantStatus::Active;
                },
            ),
            PaymentOutcome::PendingVerification => directory.patch(
                &request.tenant_id,
                Collection::AwaitingRent,
                |record| {
                    settle(record);
                    record.stage = LeaseStage::AwaitingBankVerification;
                },
            ),
        }
        .cloned()
        .ok_or_else(|| stale_projection(&request.tenant_id))?;

        info!(tenant = %request.tenant_id, outcome = ?outcome, "first payment recorded");
        Ok(record)
    }

    /// Complete ACH funding after the micro-deposit round trip.
    pub async fn confirm_bank_verification(
        &self,
        tenant_id: &TenantId,
    ) -> Result<TenantRecord, TransitionError> {
        {
            let directory = self.lock();
            self.expect_stage(
                &directory,
                tenant_id,
                Collection::AwaitingRent,
                LeaseStage::AwaitingBankVerification,
            )?;
        }

        self.backend.confirm_bank_verification(tenant_id).await?;

        let mut directory = self.lock();
        let record = directory
            .relocate(
                tenant_id,
                Collection::AwaitingRent,
                Collection::Tenants,
                |record| {
                    record.stage = LeaseStage::Active;
                    record.status = TenantStatus::Active;
                },
            )
            .cloned()
            .ok_or_else(|| stale_projection(tenant_id))?;

        info!(tenant = %tenant_id, "bank verification confirmed, lease active");
        Ok(record)
    }

    /// Renew an active (or lapsed-active) lease with new dates and optionally
    /// new rent. The deposit is already paid and is left untouched.
    pub async fn renew(&self, request: RenewalRequest) -> Result<TenantRecord, TransitionError> {
        if request.lease_end_date < request.lease_start_date {
            return Err(TransitionError::field(
                "leaseEndDate",
                "leaseEndDate must not precede leaseStartDate",
            ));
        }

        {
            let directory = self.lock();
            self.expect_stage(
                &directory,
                &request.tenant_id,
                Collection::Tenants,
                LeaseStage::Active,
            )?;
        }

        self.backend.renew(&request).await?;

        let mut directory = self.lock();
        let record = directory
            .patch(&request.tenant_id, Collection::Tenants, |record| {
                if let Some(agreement) = record.agreement.as_mut() {
                    agreement.lease_start_date = request.lease_start_date;
                    agreement.lease_end_date = request.lease_end_date;
                    if let Some(rent) = request.rent {
                        agreement.rent = rent;
                    }
                }
            })
            .cloned()
            .ok_or_else(|| stale_projection(&request.tenant_id))?;

        info!(tenant = %request.tenant_id, "lease renewed");
        Ok(record)
    }

    /// Flag the security deposit as refunded. Irreversible; leaves `status`
    /// untouched so the host can deactivate separately.
    pub async fn refund(&self, tenant_id: &TenantId) -> Result<TenantRecord, TransitionError> {
        let source = {
            let directory = self.lock();
            let (collection, record) = directory
                .locate(tenant_id)
                .ok_or_else(|| unknown_tenant(tenant_id))?;
            let agreement = record
                .agreement
                .as_ref()
                .ok_or_else(|| TransitionError::general("tenant has no lease agreement"))?;
            if agreement.is_refunded {
                return Err(TransitionError::general(
                    "security deposit was already refunded",
                ));
            }
            collection
        };

        self.backend.refund(tenant_id).await?;

        let mut directory = self.lock();
        let record = directory
            .relocate(tenant_id, source, Collection::Tenants, |record| {
                if let Some(agreement) = record.agreement.as_mut() {
                    agreement.is_refunded = true;
                }
                record.stage = LeaseStage::Refunded;
            })
            .cloned()
            .ok_or_else(|| stale_projection(tenant_id))?;

        info!(tenant = %tenant_id, "security deposit refunded");
        Ok(record)
    }

    /// Mark the tenant inactive. Independent of acceptance and refund state;
    /// typically follows a refund to free the unit for re-listing.
    pub async fn deactivate(&self, tenant_id: &TenantId) -> Result<TenantRecord, TransitionError> {
        let collection = {
            let directory = self.lock();
            directory
                .locate(tenant_id)
                .map(|(collection, _)| collection)
                .ok_or_else(|| unknown_tenant(tenant_id))?
        };

        self.backend.deactivate(tenant_id).await?;

        let mut directory = self.lock();
        let record = directory
            .patch(tenant_id, collection, |record| {
                record.status = TenantStatus::Inactive;
                record.stage = LeaseStage::Inactive;
            })
            .cloned()
            .ok_or_else(|| stale_projection(tenant_id))?;

        info!(tenant = %tenant_id, "tenant deactivated");
        Ok(record)
    }

    /// Whether the tenant's active term is currently covered by a payment.
    pub fn rent_paid(&self, tenant_id: &TenantId, today: NaiveDate) -> Result<bool, TransitionError> {
        let directory = self.lock();
        let (_, record) = directory
            .locate(tenant_id)
            .ok_or_else(|| unknown_tenant(tenant_id))?;

        let agreement = record.agreement.as_ref();
        Ok(is_rent_paid_dates(
            agreement.map(|a| a.lease_end_date),
            agreement.and_then(|a| a.last_payment_date),
            today,
        ))
    }

    fn expect_stage<'d>(
        &self,
        directory: &'d TenantDirectory,
        tenant_id: &TenantId,
        collection: Collection,
        stage: LeaseStage,
    ) -> Result<&'d TenantRecord, TransitionError> {
        let (found_in, record) = directory
            .locate(tenant_id)
            .ok_or_else(|| unknown_tenant(tenant_id))?;
        if found_in != collection || record.stage != stage {
            return Err(TransitionError::general(format!(
                "tenant {tenant_id} is {}, not {}",
                record.stage.label(),
                stage.label()
            )));
        }
        Ok(record)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TenantDirectory> {
        self.directory.lock().expect("directory mutex poisoned")
    }
}

fn unknown_tenant(tenant_id: &TenantId) -> TransitionError {
    TransitionError::general(format!("tenant {tenant_id} is not known locally"))
}

fn stale_projection(tenant_id: &TenantId) -> TransitionError {
    TransitionError::general(format!(
        "local projection lost tenant {tenant_id} mid-transition"
    ))
}
