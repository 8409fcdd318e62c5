pub mod auth;
pub mod bookings;
pub mod contact;
pub mod customers;
pub mod extract;
pub mod packages;
pub mod stages;
