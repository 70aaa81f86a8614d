//! SeaORM entities

pub mod booking;
pub mod booking_service;
pub mod customer;
pub mod payment;
pub mod room;
pub mod service;
pub mod staff;
