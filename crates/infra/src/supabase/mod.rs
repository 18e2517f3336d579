pub mod client;
pub mod ledger;
pub mod repositories;
