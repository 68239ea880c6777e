//! Renderer options: channel, size, title, window, colours, etc.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const WIDTH_RANGE: RangeInclusive<i64> = 100..=200_000;
pub const HEIGHT_RANGE: RangeInclusive<i64> = 64..=513;
pub const BRIGHTNESS_RANGE: RangeInclusive<i64> = 20..=180;
pub const CONTRAST_RANGE: RangeInclusive<i64> = -100..=100;
pub const COLOR_COUNT_RANGE: RangeInclusive<i64> = 1..=249;

const DEFAULT_COMMENT: &str = "Created by SoX";

/// Which channel(s) of the input are analysed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelMode {
    #[default]
    #[serde(alias = "Left and right (default)")]
    Both,
    #[serde(alias = "Left")]
    Left,
    #[serde(alias = "Right")]
    Right,
}

impl ChannelMode {
    /// Argument for SoX `remix`, `None` when both channels are kept.
    pub fn remix_channel(self) -> Option<&'static str> {
        match self {
            ChannelMode::Both => None,
            ChannelMode::Left => Some("1"),
            ChannelMode::Right => Some("2"),
        }
    }
}

/// Text printed at the top of the image.
///
/// Deserialization never fails: unknown values select [`TitleMode::FullName`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TitleMode {
    #[default]
    Hidden,
    StemName,
    FullName,
    FullPath,
}

impl TitleMode {
    pub fn from_label(label: &str) -> Self {
        match label {
            "hidden" | "Hide title (default)" => TitleMode::Hidden,
            "stem_name" | "Filename without extension" => TitleMode::StemName,
            "full_path" | "Full path, filename and extension" => TitleMode::FullPath,
            _ => TitleMode::FullName,
        }
    }

    /// Title text for `input`, `None` when the title is hidden.
    pub fn title_for(self, input: &Path) -> Option<String> {
        let name = || {
            input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        match self {
            TitleMode::Hidden => None,
            TitleMode::StemName => Some(
                input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ),
            TitleMode::FullName => Some(name()),
            TitleMode::FullPath => Some(input.to_string_lossy().into_owned()),
        }
    }
}

impl From<String> for TitleMode {
    fn from(label: String) -> Self {
        TitleMode::from_label(&label)
    }
}

/// Window function for the spectral analysis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFunction {
    #[default]
    #[serde(alias = "Hann (default)", alias = "Hann")]
    Hann,
    #[serde(alias = "Hamming")]
    Hamming,
    #[serde(alias = "Bartlett")]
    Bartlett,
    #[serde(alias = "Rectangular")]
    Rectangular,
    #[serde(alias = "Kaiser")]
    Kaiser,
    #[serde(alias = "Dolph")]
    Dolph,
}

impl WindowFunction {
    /// Name understood by `sox spectrogram -w`.
    pub fn name(self) -> &'static str {
        match self {
            WindowFunction::Hann => "Hann",
            WindowFunction::Hamming => "Hamming",
            WindowFunction::Bartlett => "Bartlett",
            WindowFunction::Rectangular => "Rectangular",
            WindowFunction::Kaiser => "Kaiser",
            WindowFunction::Dolph => "Dolph",
        }
    }
}

/// Spectrogram options.
///
/// Integer options keep whatever value they were given and are clamped when
/// read through the accessor methods; out-of-range values are never rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SoX binary. Empty or unset means search `PATH`.
    pub binary_path: Option<String>,
    /// Channel(s) fed to the analysis.
    pub channel_mode: ChannelMode,
    /// Width of one channel's spectrogram (pixels).
    pub width: i64,
    /// Height of one channel's spectrogram (pixels).
    pub height: i64,
    /// Title printed above the spectrogram.
    pub title_mode: TitleMode,
    /// Comment at the bottom left of the image. Empty disables it.
    pub comment: String,
    /// Starting position (seconds). Zero means the start of the file.
    pub start_position_seconds: i64,
    /// Duration (seconds). Zero means until the end of the file.
    pub duration_seconds: i64,
    /// Window function for the spectral analysis.
    pub window_function: WindowFunction,
    /// Monochrome instead of the colour palette.
    pub monochrome: bool,
    /// Hide axes and labels.
    pub raw: bool,
    /// High-intensity colour palette.
    pub high_color_mode: bool,
    /// White background.
    pub light_mode: bool,
    /// Brightness adjustment (20 to 180).
    pub brightness: i64,
    /// Contrast adjustment (-100 to 100).
    pub contrast: i64,
    /// Number of colours in the palette (1 to 249).
    pub color_count: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary_path: None,
            channel_mode: ChannelMode::Both,
            width: 800,
            height: 257,
            title_mode: TitleMode::Hidden,
            comment: DEFAULT_COMMENT.to_string(),
            start_position_seconds: 0,
            duration_seconds: 0,
            window_function: WindowFunction::Hann,
            monochrome: false,
            raw: false,
            high_color_mode: false,
            light_mode: false,
            brightness: 120,
            contrast: 0,
            color_count: 249,
        }
    }
}

fn clamp(value: i64, range: RangeInclusive<i64>) -> i64 {
    value.clamp(*range.start(), *range.end())
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Configured binary, ignoring an empty string.
    pub fn configured_binary(&self) -> Option<&str> {
        self.binary_path.as_deref().filter(|p| !p.is_empty())
    }

    pub fn clamped_width(&self) -> i64 {
        clamp(self.width, WIDTH_RANGE)
    }

    /// SoX wants an odd height (2^n + 1). Even values are bumped by one
    /// before clamping.
    pub fn odd_height(&self) -> i64 {
        let mut height = self.height;
        if height.rem_euclid(2) == 0 {
            height += 1;
        }
        clamp(height, HEIGHT_RANGE)
    }

    pub fn start_position(&self) -> i64 {
        self.start_position_seconds.max(0)
    }

    pub fn duration(&self) -> i64 {
        self.duration_seconds.max(0)
    }

    pub fn clamped_brightness(&self) -> i64 {
        clamp(self.brightness, BRIGHTNESS_RANGE)
    }

    pub fn clamped_contrast(&self) -> i64 {
        clamp(self.contrast, CONTRAST_RANGE)
    }

    /// Value passed to `-q`.
    ///
    /// The bounds are applied in swapped order (`min` with the lower bound,
    /// then `max` with the upper one), which pins the result to 249. Kept as is
    /// to match the deployed plugin; see DESIGN.md.
    pub fn quantized_colors(&self) -> i64 {
        self.color_count
            .min(*COLOR_COUNT_RANGE.start())
            .max(*COLOR_COUNT_RANGE.end())
    }
}
