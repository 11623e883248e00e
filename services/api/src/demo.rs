use crate::infra::{parse_date, InMemoryLeaseBackend};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use leaseflow::error::AppError;
use leaseflow::workflows::booking::{
    is_range_covered, resolve_display_window, DateRange, DayHours, DayOfWeek, WeeklySchedule,
};
use leaseflow::workflows::leasing::{
    ApprovalRequest, DepositPolicy, LeaseLifecycleService, PaymentMethod, PaymentRequest,
    RenewalRequest, TenantId, TenantRecord,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AvailabilityArgs {
    /// First day of the stay (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: NaiveDate,
    /// Last day of the stay, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) to: NaiveDate,
    /// Time zone label appended to the billing window
    #[arg(long, default_value = "CST")]
    pub(crate) time_zone: String,
    /// Weekly schedule as JSON; defaults to Monday-Friday 9 to 5
    #[arg(long)]
    pub(crate) schedule: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Lease start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) lease_start: Option<NaiveDate>,
    /// Lease end date (YYYY-MM-DD). Defaults to lease_start + 365 days.
    #[arg(long, value_parser = parse_date)]
    pub(crate) lease_end: Option<NaiveDate>,
    /// Monthly rent in minor currency units
    #[arg(long, default_value_t = 1180)]
    pub(crate) rent: u32,
    /// Pay by ACH (micro-deposit verification) instead of card
    #[arg(long)]
    pub(crate) ach: bool,
}

fn business_week() -> WeeklySchedule {
    let mut schedule = WeeklySchedule::default();
    for day in [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ] {
        schedule.set(day, DayHours::window("09:00 AM", "05:00 PM"));
    }
    schedule
}

pub(crate) fn run_availability(args: AvailabilityArgs) -> Result<(), AppError> {
    let schedule = match args.schedule {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str::<WeeklySchedule>(&raw)?
        }
        None => business_week(),
    };
    schedule.check_menu_times()?;

    let range = DateRange::new(args.from, args.to)?;
    let covered = is_range_covered(&range, &schedule);
    let window = resolve_display_window(&range, &schedule, &args.time_zone);

    println!(
        "stay {} -> {} ({} days)",
        range.from,
        range.to,
        range.len_days()
    );
    println!("covered: {}", if covered { "yes" } else { "no" });
    match window {
        Some(window) => println!("billing window: {window}"),
        None => println!("billing window: unavailable (boundary day has no hours)"),
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let lease_start = args.lease_start.unwrap_or_else(|| Local::now().date_naive());
    let lease_end = args
        .lease_end
        .unwrap_or_else(|| lease_start + Duration::days(365));

    let backend = Arc::new(InMemoryLeaseBackend::default());
    let service = LeaseLifecycleService::new(backend);
    let id = TenantId("demo-tenant".to_string());

    println!("== application submitted ==");
    let record = service.register_prospect(TenantRecord::prospect(
        id.clone(),
        "ws-demo",
        args.rent,
    ));
    println!("stage: {}", record.stage.label());

    println!("== host approves (deposit same as rent) ==");
    let record = service
        .approve(ApprovalRequest {
            tenant_id: id.clone(),
            lease_start_date: lease_start,
            lease_end_date: lease_end,
            deposit_policy: DepositPolicy::SameAsRent,
        })
        .await?;
    println!("stage: {}", record.stage.label());

    let method = if args.ach {
        PaymentMethod::Ach
    } else {
        PaymentMethod::Card
    };
    println!("== first payment ({method:?}) ==");
    let mut record = service
        .record_payment(PaymentRequest {
            tenant_id: id.clone(),
            method,
            paid_on: lease_start,
        })
        .await?;
    println!("stage: {}", record.stage.label());

    if args.ach {
        println!("== micro-deposit verification ==");
        record = service.confirm_bank_verification(&id).await?;
        println!("stage: {}", record.stage.label());
    }

    if let Some(agreement) = record.agreement.as_ref() {
        println!(
            "deposit held: {:?}, rent: {}",
            agreement.security_deposit_fee, agreement.rent
        );
    }

    println!("== renewal for a second year ==");
    let record = service
        .renew(RenewalRequest {
            tenant_id: id.clone(),
            lease_start_date: lease_end + Duration::days(1),
            lease_end_date: lease_end + Duration::days(366),
            rent: Some(args.rent + 60),
        })
        .await?;
    println!(
        "new term ends {}",
        record.agreement.as_ref().map(|a| a.lease_end_date).unwrap_or(lease_end)
    );

    println!("== move-out: refund deposit, deactivate ==");
    service.refund(&id).await?;
    let record = service.deactivate(&id).await?;
    println!("stage: {}, status: {:?}", record.stage.label(), record.status);

    Ok(())
}
