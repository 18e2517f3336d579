pub mod host;
pub mod stars;
