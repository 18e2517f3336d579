pub mod access;
pub mod enums;
pub mod fees;
pub mod stars;
