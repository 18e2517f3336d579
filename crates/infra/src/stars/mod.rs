pub mod invoice_client;
pub mod polling_bridge;
