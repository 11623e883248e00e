//! Core domain logic for a workspace rental marketplace: recurring weekly
//! availability checks, billing display windows, rent-due evaluation, and the
//! lease lifecycle state machine projected locally from a remote backend.

pub mod config;
pub mod error;
pub mod nav;
pub mod telemetry;
pub mod workflows;
