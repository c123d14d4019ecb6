//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Event tables are only read through an aggregate query, so they have no
//! entity of their own.

pub mod user;

#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
