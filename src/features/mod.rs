pub mod toggle;
pub mod transcript;
