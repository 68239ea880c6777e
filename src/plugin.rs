//! Download-finished handling and spectrogram jobs
//!
//! A finished download whose file looks like audio becomes one job: derive the
//! output path, resolve SoX, build the argument list, start the renderer and
//! move on. Nothing a job does is reported back to the caller as an error;
//! failures end up in the log sink and in the returned [`RenderOutcome`].

use std::path::{Path, PathBuf};

use tracing::Level;

use crate::command::{SpectrogramCommand, output_path_for};
use crate::config::Config;
use crate::launcher::{Launched, Launcher, SystemLauncher};
use crate::locate::{ExecutableSearch, resolve_program};
use crate::log::{LogSink, TracingSink};
use crate::Error;

/// Extensions (lowercase) of files that get a spectrogram.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["aiff", "flac", "mp3", "ogg", "wav"];

/// Whether `path` has one of [`SUPPORTED_EXTENSIONS`], ignoring case.
pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// How a single event or job ended.
#[derive(Debug)]
pub enum RenderOutcome {
    /// Not an audio file; nothing was attempted.
    Skipped,
    /// Stopped before a process was started.
    Aborted(Error),
    /// The renderer was started. Whether it succeeds is not tracked.
    Spawned {
        output_path: PathBuf,
        process: Launched,
    },
}

impl RenderOutcome {
    pub fn is_spawned(&self) -> bool {
        matches!(self, RenderOutcome::Spawned { .. })
    }
}

/// Turns download-finished events into SoX spectrogram renders.
pub struct SpectrogramPlugin {
    config: Config,
    search: ExecutableSearch,
    launcher: Box<dyn Launcher>,
    sink: Box<dyn LogSink>,
    verbose: bool,
}

impl SpectrogramPlugin {
    /// Plugin using `PATH`, real processes and `tracing` output, verbose on.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            search: ExecutableSearch::from_env(),
            launcher: Box::new(SystemLauncher),
            sink: Box::new(TracingSink),
            verbose: true,
        }
    }

    pub fn with_search(mut self, search: ExecutableSearch) -> Self {
        self.search = search;
        self
    }

    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn with_log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Toggle informational lines. Errors and warnings are always logged.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn log(&self, level: Level, message: &str) {
        self.sink.log(level, message);
    }

    fn log_verbose(&self, message: &str) {
        if self.verbose {
            self.sink.log(Level::INFO, message);
        }
    }

    /// Host callback for a completed download.
    pub fn download_finished_notification(
        &self,
        user: &str,
        virtual_path: &str,
        real_path: &str,
    ) -> RenderOutcome {
        self.log_verbose(&format!(
            "Finished downloading {} from user {}. Saved at {}",
            virtual_path, user, real_path
        ));

        let path = Path::new(real_path);
        if !is_supported_audio(path) {
            return RenderOutcome::Skipped;
        }
        self.generate_spectrogram(path)
    }

    /// Build the SoX command for `input` with the current options.
    pub fn build_command(&self, input: &Path) -> crate::Result<SpectrogramCommand> {
        let program = resolve_program(&self.config, &self.search)?;
        Ok(SpectrogramCommand::build(program, input, &self.config))
    }

    /// Start rendering `audio_file` to a sibling `.png`.
    pub fn generate_spectrogram(&self, audio_file: &Path) -> RenderOutcome {
        let output_path = output_path_for(audio_file);

        // Reported only; SoX gets the path regardless.
        if !audio_file.exists() {
            self.log(Level::WARN, &format!("File not found: {}", audio_file.display()));
        }

        let command = match self.build_command(audio_file) {
            Ok(command) => command,
            Err(e) => {
                self.log(Level::ERROR, &e.to_string());
                return RenderOutcome::Aborted(e);
            }
        };

        let stem = audio_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.log_verbose(&format!("Generating spectrogram for '{}...'", stem));
        self.log_verbose(&format!("Running command: {}", command));

        match self.launcher.launch(&command) {
            Ok(process) => {
                self.log(Level::INFO, &format!("Spectrogram saved at {}", output_path.display()));
                RenderOutcome::Spawned {
                    output_path,
                    process,
                }
            }
            Err(e) => {
                let error = Error::Spawn(e);
                self.log(Level::ERROR, &error.to_string());
                RenderOutcome::Aborted(error)
            }
        }
    }
}
