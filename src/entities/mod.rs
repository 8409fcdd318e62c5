pub mod booking;
pub mod package;
pub mod package_organizer;
pub mod user;
