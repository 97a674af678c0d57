use waypoint_core::{Notification, Notifier, Severity};

/// Writes submission progress to stderr so stdout carries only results.
pub struct StderrNotifier {
    color: bool,
}

impl StderrNotifier {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn line(&self, notification: &Notification) -> String {
        let text = notification.to_string();
        let text = text.trim_end();
        match (self.color, notification.severity) {
            (true, Severity::Destructive) => format!("\x1b[31m{text}\x1b[0m"),
            (true, Severity::Default) => format!("\x1b[2m{text}\x1b[0m"),
            (false, _) => text.to_string(),
        }
    }
}

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", self.line(&notification));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_have_no_escapes() {
        let notifier = StderrNotifier::new(false);
        let line = notifier.line(&Notification::error("Trip could not be created"));
        assert!(line.contains("Trip could not be created"));
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn test_destructive_lines_are_red() {
        let notifier = StderrNotifier::new(true);
        let line = notifier.line(&Notification::error("boom"));
        assert!(line.starts_with("\x1b[31m"));
    }
}
