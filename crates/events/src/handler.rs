use std::sync::Arc;

use crate::Event;

/// Reacts to a single event, synchronously, inside the caller's thread.
///
/// The triggering workflow owns the call: it decides an event happened and
/// invokes the handler explicitly. There is no subscription registry.
///
/// `handle` is infallible by signature. A handler whose side effect can fail
/// (e.g. submitting a job) reports that failure through its `Output` and its
/// own logging; it must not fail the workflow that raised the event.
pub trait EventHandler<E: Event> {
    type Output;

    fn handle(&self, event: &E) -> Self::Output;
}

impl<E, H> EventHandler<E> for &H
where
    E: Event,
    H: EventHandler<E> + ?Sized,
{
    type Output = H::Output;

    fn handle(&self, event: &E) -> Self::Output {
        (**self).handle(event)
    }
}

impl<E, H> EventHandler<E> for Arc<H>
where
    E: Event,
    H: EventHandler<E> + ?Sized,
{
    type Output = H::Output;

    fn handle(&self, event: &E) -> Self::Output {
        (**self).handle(event)
    }
}
