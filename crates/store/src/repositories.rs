pub mod booking;
pub mod settings;
pub mod slot_version;
