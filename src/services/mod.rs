//! Domain operations. Each function takes the connection explicitly and
//! returns entity models; response shaping happens in `handlers`.

pub mod auth;
pub mod bookings;
pub mod customers;
pub mod mail;
pub mod packages;
