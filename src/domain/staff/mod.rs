pub mod model;
pub mod repository;

pub use model::{Capability, Staff, StaffRole, StaffStatus};
pub use repository::StaffRepository;
