pub mod balances;
pub mod earnings;
pub mod livestreams;
pub mod notifications;
pub mod posts;
pub mod subscriptions;
pub mod transactions;
