//! Listener registration for picker events.

use std::fmt;

type Listener<E> = Box<dyn FnMut(&E)>;

/// Ordered set of listeners for events of type `E`.
///
/// Listeners run synchronously, in subscription order, before `emit` returns.
pub struct Emitter<E> {
    listeners: Vec<Listener<E>>,
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: &E) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::new();

        let first = Rc::clone(&log);
        emitter.subscribe(move |n: &u32| first.borrow_mut().push(("first", *n)));
        let second = Rc::clone(&log);
        emitter.subscribe(move |n: &u32| second.borrow_mut().push(("second", *n)));

        emitter.emit(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
        assert_eq!(emitter.len(), 2);
    }

    #[test]
    fn test_emit_without_listeners() {
        let mut emitter: Emitter<u32> = Emitter::default();
        emitter.emit(&1);
        assert!(emitter.is_empty());
    }
}
