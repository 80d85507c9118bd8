use chrono::Local;
use std::sync::Mutex;
use tracing::info;

/// Persistent, append-only status log shown to the user.
///
/// Entries are never removed; the buffer only grows for the lifetime of the
/// session.
pub struct StatusLog {
    buffer: Mutex<String>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn log(&self, message: &str) {
        let line = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        info!("{}", message);

        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.push('\n');
        buffer.push_str(&line);
    }

    /// The whole buffer as it would be rendered.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }

    /// Messages without their timestamp prefix.
    pub fn messages(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|l| match l.split_once("] ") {
                Some((_, msg)) => msg.to_string(),
                None => l,
            })
            .collect()
    }
}

impl Default for StatusLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_appends_with_leading_newline() {
        let log = StatusLog::new();
        log.log("Loaded 3 voices.");
        log.log("No matches.");

        let contents = log.contents();
        assert!(contents.starts_with('\n'));
        assert_eq!(contents.matches('\n').count(), 2);
        assert_eq!(log.messages(), vec!["Loaded 3 voices.", "No matches."]);
    }

    #[test]
    fn test_entries_are_timestamped() {
        let log = StatusLog::new();
        log.log("Recipe audio ready!");

        let line = &log.lines()[0];
        // [HH:MM:SS] message
        assert_eq!(&line[0..1], "[");
        assert_eq!(&line[9..11], "] ");
        assert!(line.ends_with("Recipe audio ready!"));
    }
}
