/// Synchronous observer list. `emit` runs every handler to completion before
/// returning.
pub struct Signal<T> {
    handlers: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, handler: impl FnMut(&T) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Replaces every existing handler with `handler`.
    pub fn connect_only(&mut self, handler: impl FnMut(&T) + 'static) {
        self.handlers.clear();
        self.connect(handler);
    }

    pub fn disconnect_all(&mut self) {
        self.handlers.clear();
    }

    pub fn emit(&mut self, payload: &T) {
        for handler in &mut self.handlers {
            handler(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::Signal;

    #[test]
    fn connect_only_replaces_handlers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::<i32>::new();

        let first = seen.clone();
        signal.connect(move |v| first.borrow_mut().push(("first", *v)));
        let second = seen.clone();
        signal.connect_only(move |v| second.borrow_mut().push(("second", *v)));

        signal.emit(&3);
        assert_eq!(signal.len(), 1);
        assert_eq!(*seen.borrow(), [("second", 3)]);
    }
}
