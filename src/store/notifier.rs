/// Sink for the lines a store reports to the outside world.
pub trait Notifier: Send + Sync {
    fn notify(&self, line: &str);
}

/// Writes every line to stdout. `println!` holds the stdout lock for the
/// whole line, so concurrent notifications never interleave mid-line.
#[derive(Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, line: &str) {
        println!("{line}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;

    use super::Notifier;

    #[derive(Default)]
    pub struct RecordingNotifier {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, line: &str) {
            self.lines.lock().push(line.to_string());
        }
    }
}
