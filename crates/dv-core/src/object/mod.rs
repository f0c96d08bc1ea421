//! Objects: floor items, worn equipment and the item catalog

mod catalog;
mod equipment;
mod obj;

pub use catalog::{ItemCatalog, ItemKind};
pub use equipment::{EquipSlot, Equipment};
pub use obj::{ItemClass, Object, ObjectId};
