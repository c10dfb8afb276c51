use pantrycam_engine::OutputSurface;
use std::sync::atomic::{AtomicBool, Ordering};

/// Terminal stand-in for the page. Keeps the latest markup for the caller to
/// print or write out once the run is over.
#[derive(Debug)]
pub struct TerminalSurface {
    last: std::sync::Mutex<String>,
    submit_enabled: AtomicBool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            last: std::sync::Mutex::new(String::new()),
            submit_enabled: AtomicBool::new(true),
        }
    }

    pub fn last_markup(&self) -> String {
        self.last
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.load(Ordering::SeqCst)
    }
}

impl OutputSurface for TerminalSurface {
    fn show(&self, markup: &str) {
        if let Ok(mut last) = self.last.lock() {
            *last = markup.to_string();
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.store(enabled, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_latest_markup_and_submit_state() {
        let s = TerminalSurface::new();
        assert!(s.submit_enabled());

        s.set_submit_enabled(false);
        s.show("<p>one</p>");
        s.show("<p>two</p>");
        assert_eq!(s.last_markup(), "<p>two</p>");
        assert!(!s.submit_enabled());

        s.set_submit_enabled(true);
        assert!(s.submit_enabled());
    }
}
