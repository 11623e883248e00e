pub mod booking;
pub mod leasing;
