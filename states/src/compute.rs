use std::any::Any;

/// A command-updated cache stored in [`crate::StateCtx`].
///
/// Computes are never written by UI code directly: a [`crate::Command`]
/// publishes a whole new value through its [`crate::LatestOnlyUpdater`], and
/// [`crate::StateCtx::sync_computes`] assigns it via [`Compute::assign_box`].
/// UI code reads them with `ctx.cached::<T>()`.
pub trait Compute: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone this compute for a command snapshot.
    ///
    /// Override when a command needs to read the previous cached value (for
    /// example to keep showing stale data while a refresh fails).
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared [`Compute::assign_box`] implementation.
pub fn assign_impl<T: Compute>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(new_self) => *this = *new_self,
        Err(_) => log::error!(
            "assign_impl: refusing to assign a foreign value over {}",
            std::any::type_name::<T>()
        ),
    }
}
