//! Entity module - `SeaORM` entity definitions for the database.
//! The tracker only needs a single key-value table; goal records themselves are
//! stored as one serialized blob inside it.

pub mod storage_slot;

pub use storage_slot::{
    Column as StorageSlotColumn, Entity as StorageSlot, Model as StorageSlotModel,
};
