pub mod checkin;
pub mod export;
