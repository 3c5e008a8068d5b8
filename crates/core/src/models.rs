pub mod availability;
pub mod booking;
pub mod page;
pub mod settings;
pub mod slot;
