/// Holds at most one item under inspection (the detail overlay)
#[derive(Debug, Clone)]
pub struct Selection<T> {
    current: Option<T>,
}

impl<T> Selection<T> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Replace whatever is selected
    pub fn select(&mut self, item: T) {
        self.current = Some(item);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::new()
    }
}
