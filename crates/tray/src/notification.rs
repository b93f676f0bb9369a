//! Update notifications and their click binding.

/// A notification announcing a new update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotification {
    /// Monotonic ID, used to match clicks to the notification they came from.
    pub id: u64,
    pub title: String,
    pub body: String,
    /// Icon name or path, backend-interpreted.
    pub icon: Option<String>,
}

/// Formats the notification body: the first page's title and the length of
/// the update.
pub fn format_notification_body(first_page_title: &str, page_count: usize) -> String {
    format!("{first_page_title}\n({page_count} pages long.)")
}

/// Binds the most recent notification to the URL its click opens.
///
/// A binding is consumed by the first matching click and replaced by every
/// new notification, so clicks on older notifications do nothing.
#[derive(Debug, Default)]
pub struct ClickBinding {
    current: Option<(u64, String)>,
}

impl ClickBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds notification `id` to `url`, dropping any previous binding.
    pub fn bind(&mut self, id: u64, url: impl Into<String>) {
        self.current = Some((id, url.into()));
    }

    /// Consumes the binding if it belongs to notification `id`.
    pub fn take(&mut self, id: u64) -> Option<String> {
        match &self.current {
            Some((bound, _)) if *bound == id => self.current.take().map(|(_, url)| url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_format_is_exact() {
        assert_eq!(
            format_notification_body("A new beginning", 2),
            "A new beginning\n(2 pages long.)"
        );
    }

    #[test]
    fn body_format_single_page() {
        assert_eq!(format_notification_body("X", 1), "X\n(1 pages long.)");
    }

    #[test]
    fn click_consumes_binding() {
        let mut binding = ClickBinding::new();
        binding.bind(1, "https://example.com/1");

        assert_eq!(binding.take(1).as_deref(), Some("https://example.com/1"));
        assert!(binding.take(1).is_none());
    }

    #[test]
    fn new_notification_rebinds() {
        let mut binding = ClickBinding::new();
        binding.bind(1, "https://example.com/1");
        binding.bind(2, "https://example.com/2");

        assert!(binding.take(1).is_none());
        assert_eq!(binding.take(2).as_deref(), Some("https://example.com/2"));
    }

    #[test]
    fn unbound_click_is_ignored() {
        let mut binding = ClickBinding::new();
        assert!(binding.take(0).is_none());
    }
}
