//! `SeaORM` entity definitions.

pub mod ads;
pub mod categories;
pub mod transactions;
pub mod users;
