//! Output sinks for the pipeline transcript and progress milestones.

/// Receives the pipeline transcript, one line per call.
pub trait LogSink {
    fn log(&mut self, line: &str);
}

/// Receives progress milestones in `0..=100`.
/// Values usually grow but nothing enforces it.
pub trait ProgressSink {
    fn progress(&mut self, value: u8);
}

impl<F: FnMut(&str)> LogSink for F {
    fn log(&mut self, line: &str) {
        self(line)
    }
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn progress(&mut self, value: u8) {
        self(value)
    }
}

/// Prints the transcript to stdout.
/// Progress is only echoed when `show_progress` is set, otherwise it goes to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    pub show_progress: bool,
}
impl LogSink for ConsoleSink {
    fn log(&mut self, line: &str) {
        println!("{}", line);
    }
}
impl ProgressSink for ConsoleSink {
    fn progress(&mut self, value: u8) {
        if self.show_progress {
            println!("[{:>3}%]", value);
        }
        tracing::info!(progress = value);
    }
}
