pub mod gateways;
pub mod usecases;
