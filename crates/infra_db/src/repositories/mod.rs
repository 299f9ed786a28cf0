//! Repository implementations
//!
//! Each repository owns the SQL for one group of tables and works in terms
//! of plain row structs.

pub mod accounting;

pub use accounting::AccountingRepository;
