//! Equipment queries (read operations)

pub mod export;
pub mod get;
pub mod list;

pub use export::{ExportEquipmentError, ExportEquipmentQuery};
pub use get::{GetEquipmentError, GetEquipmentQuery};
pub use list::{ListEquipmentError, ListEquipmentQuery, ListEquipmentResponse};
