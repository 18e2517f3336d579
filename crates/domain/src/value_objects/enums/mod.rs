pub mod content_visibility;
pub mod earning_sources;
pub mod notification_kinds;
pub mod payment_rails;
pub mod transaction_types;
