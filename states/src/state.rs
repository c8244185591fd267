use std::any::Any;

/// A unit of application state stored in [`crate::StateCtx`].
///
/// States are owned and mutated on the UI thread. A state that commands need
/// to read must also override [`State::snapshot`] so a clone can be carried
/// into the command's future.
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone this state for a command snapshot.
    ///
    /// The default returns `None`, which means commands cannot see this state.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}

/// Shared implementation for assigning a boxed value over a concrete state.
///
/// A type mismatch is a programming error; it is logged rather than panicking
/// because it can only be hit from the background channel.
pub fn state_assign_impl<T: State>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(new_self) => *this = *new_self,
        Err(_) => log::error!(
            "state_assign_impl: refusing to assign a foreign value over {}",
            std::any::type_name::<T>()
        ),
    }
}
