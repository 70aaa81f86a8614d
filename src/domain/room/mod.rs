pub mod model;
pub mod repository;

pub use model::{Room, RoomStatus, RoomType};
pub use repository::RoomRepository;
