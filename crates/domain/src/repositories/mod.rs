pub mod earnings;
pub mod follows;
pub mod ledger;
pub mod livestreams;
pub mod notifications;
pub mod posts;
pub mod subscriptions;
pub mod transactions;
