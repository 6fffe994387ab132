pub mod health;
pub mod insights;
pub mod intake;
pub mod records;
