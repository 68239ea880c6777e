//! Render a SoX spectrogram image for every audio file a download client
//! finishes fetching.

pub mod command;
pub mod config;
pub mod error;
pub mod launcher;
pub mod locate;
pub mod log;
pub mod plugin;
pub mod settings;

pub use command::{SpectrogramCommand, output_path_for};
pub use config::{ChannelMode, Config, TitleMode, WindowFunction};
pub use error::{Error, Result};
pub use launcher::{Launched, Launcher, SystemLauncher};
pub use locate::ExecutableSearch;
pub use log::{LogSink, TracingSink};
pub use plugin::{RenderOutcome, SpectrogramPlugin, is_supported_audio};
