use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for tenants across all lifecycle collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host decision on an application. Set once; rejection is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    Pending,
    Approved,
    Rejected,
}

/// Occupancy status, tracked independently of acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Inactive,
}

/// Where a tenancy sits in the approval-to-move-out pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStage {
    PendingApplication,
    AwaitingFirstPayment,
    AwaitingBankVerification,
    Active,
    Refunded,
    Rejected,
    Inactive,
}

impl LeaseStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingApplication => "pending_application",
            Self::AwaitingFirstPayment => "awaiting_first_payment",
            Self::AwaitingBankVerification => "awaiting_bank_verification",
            Self::Active => "active",
            Self::Refunded => "refunded",
            Self::Rejected => "rejected",
            Self::Inactive => "inactive",
        }
    }
}

/// Security deposit terms fixed at approval time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    /// Flat fee in minor currency units; must be positive.
    Flat(u32),
    /// Deposit equals the rent in force when the first payment settles.
    SameAsRent,
    None,
}

impl DepositPolicy {
    /// Deposit owed given the rent at payment time.
    pub fn resolve(self, rent: u32) -> Option<u32> {
        match self {
            Self::Flat(fee) => Some(fee),
            Self::SameAsRent => Some(rent),
            Self::None => None,
        }
    }
}

/// How the first rent payment is funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Ach,
}

/// The lease terms attached to an approved tenancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseAgreement {
    pub lease_start_date: NaiveDate,
    pub lease_end_date: NaiveDate,
    /// Monthly rent in minor currency units.
    pub rent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_deposit_fee: Option<u32>,
    #[serde(default)]
    pub is_refunded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<NaiveDate>,
}

/// Snapshot of one tenant as last confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub id: TenantId,
    pub workspace_id: String,
    /// Rent quoted on the listing the tenant applied to, minor units.
    pub quoted_rent: u32,
    pub acceptance: Acceptance,
    pub status: TenantStatus,
    pub stage: LeaseStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<LeaseAgreement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_policy: Option<DepositPolicy>,
}

impl TenantRecord {
    /// A freshly submitted application, not yet reviewed by the host.
    pub fn prospect(id: TenantId, workspace_id: impl Into<String>, quoted_rent: u32) -> Self {
        Self {
            id,
            workspace_id: workspace_id.into(),
            quoted_rent,
            acceptance: Acceptance::Pending,
            status: TenantStatus::Active,
            stage: LeaseStage::PendingApplication,
            agreement: None,
            deposit_policy: None,
        }
    }
}

/// Remote transition failure, keyed to the form field it belongs to.
///
/// An empty `key` is a general failure rendered as a banner rather than next
/// to an input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct TransitionError {
    pub key: String,
    pub message: String,
}

impl TransitionError {
    pub fn field(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn general(message: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            message: message.into(),
        }
    }

    pub fn is_general(&self) -> bool {
        self.key.is_empty()
    }
}
