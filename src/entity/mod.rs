pub mod measurements;
pub mod outages;
