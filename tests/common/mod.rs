//! Test doubles for driving `SpectrogramPlugin` without real processes

#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use download_spectrogram::{
    ExecutableSearch, Launched, Launcher, LogSink, SpectrogramCommand, SpectrogramPlugin,
};
use download_spectrogram::Config;
use tracing::Level;

/// Records every command instead of starting it.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    launched: Arc<Mutex<Vec<SpectrogramCommand>>>,
    fail_with: Option<io::ErrorKind>,
}

impl RecordingLauncher {
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            fail_with: Some(kind),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<SpectrogramCommand> {
        self.launched.lock().unwrap().clone()
    }

    pub fn argv(&self) -> Vec<Vec<String>> {
        self.commands()
            .iter()
            .map(|c| {
                c.argv()
                    .into_iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect()
            })
            .collect()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, command: &SpectrogramCommand) -> io::Result<Launched> {
        self.launched.lock().unwrap().push(command.clone());
        match self.fail_with {
            Some(kind) => Err(io::Error::new(kind, "permission denied by test")),
            None => Ok(Launched::detached(4242)),
        }
    }
}

/// Collects log lines with their level.
#[derive(Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, line)| *l == level && line.contains(needle))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(needle))
    }
}

impl LogSink for RecordingSink {
    fn log(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

/// Plugin with a configured binary, so nothing depends on the host `PATH`.
pub fn plugin(config: Config) -> (SpectrogramPlugin, RecordingLauncher, RecordingSink) {
    let config = Config {
        binary_path: config.binary_path.or_else(|| Some("/usr/bin/sox".to_string())),
        ..config
    };
    plugin_with_search(config, ExecutableSearch::default())
}

pub fn plugin_with_search(
    config: Config,
    search: ExecutableSearch,
) -> (SpectrogramPlugin, RecordingLauncher, RecordingSink) {
    let launcher = RecordingLauncher::default();
    let sink = RecordingSink::default();
    let plugin = SpectrogramPlugin::new(config)
        .with_search(search)
        .with_launcher(launcher.clone())
        .with_log_sink(sink.clone());
    (plugin, launcher, sink)
}

/// Create an empty file at `dir/name` and return its path as a string.
pub fn touch(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, b"").unwrap();
    path.to_string_lossy().into_owned()
}
