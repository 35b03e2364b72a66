//! Toast notification types
//!
//! Transient messages shown in the corner of the page. The queue lives in
//! the app store; see [`crate::store::store_push_toast`].

/// How long a toast stays on screen
pub const TOAST_TIMEOUT_MS: u32 = 4_000;

/// Oldest toasts are dropped beyond this many
pub const MAX_TOASTS: usize = 4;

/// Severity level for toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl ToastLevel {
    pub fn class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast toast-info",
            ToastLevel::Warning => "toast toast-warning",
            ToastLevel::Error => "toast toast-error",
            ToastLevel::Success => "toast toast-success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn new(id: u64, message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            id,
            message: message.into(),
            level,
        }
    }
}

/// Queue a toast. An identical message already on screen is moved to the
/// end instead of being shown twice.
pub fn enqueue(toasts: &mut Vec<Toast>, toast: Toast) {
    toasts.retain(|t| !(t.level == toast.level && t.message == toast.message));
    toasts.push(toast);
    if toasts.len() > MAX_TOASTS {
        let excess = toasts.len() - MAX_TOASTS;
        toasts.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_drops_oldest() {
        let mut toasts = Vec::new();
        for id in 0..6 {
            enqueue(&mut toasts, Toast::new(id, format!("message {}", id), ToastLevel::Info));
        }
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts.first().map(|t| t.id), Some(2));
    }

    #[test]
    fn test_enqueue_collapses_duplicates() {
        let mut toasts = Vec::new();
        enqueue(&mut toasts, Toast::new(1, "Network error", ToastLevel::Error));
        enqueue(&mut toasts, Toast::new(2, "Saved", ToastLevel::Success));
        enqueue(&mut toasts, Toast::new(3, "Network error", ToastLevel::Error));
        let ids: Vec<_> = toasts.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
