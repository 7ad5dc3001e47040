//! Persistent state fragments.
//!
//! [`PersistentList`] and [`PersistentRecord`] never change after
//! construction. A transition can keep a reference to "the old list" for
//! comparison or rollback while building the new one.

mod list;
mod record;

pub use list::PersistentList;
pub use record::PersistentRecord;
