use parking_lot::Mutex;

/// Shows and hides the menu's overlay panels.
pub trait Balloon: Send + Sync {
    fn open(&self, id: &str);
    fn close(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalloonEvent {
    Open(String),
    Close,
}

/// Balloon that only remembers what was asked of it.
#[derive(Debug, Default)]
pub struct BalloonState {
    inner: Mutex<BalloonInner>,
}

#[derive(Debug, Default)]
struct BalloonInner {
    open_id: Option<String>,
    history: Vec<BalloonEvent>,
}

impl BalloonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_id(&self) -> Option<String> {
        self.inner.lock().open_id.clone()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.inner.lock().open_id.as_deref() == Some(id)
    }

    pub fn history(&self) -> Vec<BalloonEvent> {
        self.inner.lock().history.clone()
    }
}

impl Balloon for BalloonState {
    fn open(&self, id: &str) {
        let mut inner = self.inner.lock();
        inner.open_id = Some(id.to_string());
        inner.history.push(BalloonEvent::Open(id.to_string()));
    }

    fn close(&self) {
        let mut inner = self.inner.lock();
        inner.open_id = None;
        inner.history.push(BalloonEvent::Close);
    }
}
