use chrono::{NaiveDate, ParseError};

/// Whether the active lease term is currently covered by a recorded payment.
///
/// True exactly when the lease has not yet ended and the last payment, if
/// any, is dated before the lease end. Both comparisons are strict `<`: a
/// payment dated on or after the lease end means a new term is in force and
/// the tenant owes again, and a lease ending today is no longer active. The
/// boundary is load-bearing for the pay-rent flow; do not relax it to `<=`.
pub fn is_rent_paid_dates(
    lease_end_date: Option<NaiveDate>,
    last_payment_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    let Some(lease_end) = lease_end_date else {
        return false;
    };

    let is_lease_active = today < lease_end;
    let is_payment_pending = match last_payment_date {
        None => true,
        Some(paid_on) => paid_on < lease_end,
    };

    is_lease_active && is_payment_pending
}

/// String-input form taking ISO dates as they arrive off the wire.
///
/// A missing lease end short-circuits to `Ok(false)` before any parsing;
/// malformed dates otherwise propagate to the caller, which is expected to
/// have validated them upstream.
pub fn is_rent_paid(
    lease_end_date: Option<&str>,
    last_payment_date: Option<&str>,
    today: NaiveDate,
) -> Result<bool, ParseError> {
    let Some(lease_end) = lease_end_date else {
        return Ok(false);
    };

    let lease_end = lease_end.trim().parse::<NaiveDate>()?;
    let last_payment = last_payment_date
        .map(|raw| raw.trim().parse::<NaiveDate>())
        .transpose()?;

    Ok(is_rent_paid_dates(Some(lease_end), last_payment, today))
}
