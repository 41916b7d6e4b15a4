use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// Stack of transient notifications. Each one disappears on its own after
/// the TTL; any number may be visible at once.
#[derive(Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    ttl: Duration,
    next_id: u64,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
            next_id: 1,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.clear_stale();

        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        tracing::debug!("Toast {} ({:?}): {}", id, kind, message);
        self.items.push(Toast {
            id,
            message,
            kind,
            expires_at: Instant::now() + self.ttl,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastKind::Error)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Toasts that have not expired yet, oldest first.
    pub fn active(&mut self) -> Vec<Toast> {
        self.clear_stale();
        self.items.clone()
    }

    fn clear_stale(&mut self) {
        let now = Instant::now();
        self.items.retain(|t| now < t.expires_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_stack() {
        let mut toasts = Toasts::new(Duration::from_secs(3));
        toasts.success("Login successful!");
        toasts.error("Failed to claim food");

        let active = toasts.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "Login successful!");
        assert_eq!(active[0].kind, ToastKind::Success);
        assert_eq!(active[1].kind.css_class(), "error");
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let mut toasts = Toasts::new(Duration::from_millis(20));
        toasts.success("gone soon");
        assert_eq!(toasts.active().len(), 1);

        std::thread::sleep(Duration::from_millis(40));
        assert!(toasts.active().is_empty());
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::new(Duration::from_secs(3));
        let first = toasts.success("one");
        toasts.success("two");

        assert!(toasts.dismiss(first));
        assert!(!toasts.dismiss(first));
        let active = toasts.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "two");
    }

    #[test]
    fn ids_are_unique() {
        let mut toasts = Toasts::new(Duration::from_secs(3));
        let a = toasts.success("a");
        let b = toasts.success("b");
        assert_ne!(a, b);
    }
}
