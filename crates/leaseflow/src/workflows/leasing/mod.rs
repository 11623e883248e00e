//! Lease lifecycle state machine, rent-due evaluation, and the local
//! projection of the backend's tenant collections.

pub mod backend;
pub mod directory;
pub mod domain;
pub mod rent;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use backend::{
    ApprovalRequest, LeaseBackend, PaymentOutcome, PaymentRequest, RenewalRequest,
};
pub use directory::{Collection, TenantDirectory};
pub use domain::{
    Acceptance, DepositPolicy, LeaseAgreement, LeaseStage, PaymentMethod, TenantId, TenantRecord,
    TenantStatus, TransitionError,
};
pub use rent::{is_rent_paid, is_rent_paid_dates};
pub use router::lease_router;
pub use service::LeaseLifecycleService;
