/// Begin/end bracket that suppresses intermediate refreshes. Brackets nest;
/// only the outermost pair produces a refresh.
#[derive(Debug, Default)]
pub struct UpdateBatch {
    active: bool,
    refreshes: u64,
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when this call opened the outermost bracket; pass the
    /// result back to [`UpdateBatch::end`].
    pub fn begin(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    pub fn end(&mut self, outermost: bool) {
        if !outermost {
            return;
        }
        self.active = false;
        self.refreshes += 1;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of completed outermost brackets.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateBatch;

    #[test]
    fn nested_brackets_refresh_once() {
        let mut batch = UpdateBatch::new();
        let outer = batch.begin();
        let inner = batch.begin();
        assert!(outer);
        assert!(!inner);
        batch.end(inner);
        assert!(batch.is_active());
        assert_eq!(batch.refreshes(), 0);
        batch.end(outer);
        assert!(!batch.is_active());
        assert_eq!(batch.refreshes(), 1);
    }
}
