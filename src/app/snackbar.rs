use parking_lot::Mutex;
use std::collections::VecDeque;

/// Transient one-line notifications.
pub trait Snackbar: Send + Sync {
    fn show(&self, message: String);
}

#[derive(Debug, Default)]
pub struct SnackbarQueue {
    messages: Mutex<VecDeque<String>>,
}

impl SnackbarQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<String> {
        self.messages.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl Snackbar for SnackbarQueue {
    fn show(&self, message: String) {
        self.messages.lock().push_back(message);
    }
}
