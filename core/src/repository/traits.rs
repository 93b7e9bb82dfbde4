use crate::error::Result;
use crate::model::task::TaskList;

/// Full-collection persistence boundary.
///
/// Every mutation is a complete read-modify-write of the whole list; there is
/// no incremental update.
pub trait TaskStore {
    /// Returns the stored collection, or an empty one if nothing was saved yet.
    fn load(&self) -> Result<TaskList>;

    /// Replaces the stored collection in full.
    fn save(&self, tasks: &TaskList) -> Result<()>;

    /// Runs one load -> mutate -> save cycle with exclusive access held for
    /// the whole cycle. Nothing is saved when `f` returns an error.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut TaskList) -> Result<T>;
}
