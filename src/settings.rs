//! Settings metadata consumed by a host settings UI.
//!
//! The schema describes each option of [`crate::Config`]: a human-readable
//! description, its value type, numeric bounds and step, and dropdown choices.
//! Nothing here is enforced; values are clamped when a job is built.

use serde::Serialize;

use crate::config::{
    BRIGHTNESS_RANGE, COLOR_COUNT_RANGE, CONTRAST_RANGE, HEIGHT_RANGE, WIDTH_RANGE,
};

/// Value type of one option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingKind {
    String,
    Bool,
    Dropdown {
        options: Vec<&'static str>,
    },
    Integer {
        minimum: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<i64>,
        stepsize: i64,
    },
}

/// Metadata for one option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettingMeta {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(flatten)]
    pub kind: SettingKind,
}

fn integer(
    name: &'static str,
    description: &'static str,
    minimum: i64,
    maximum: Option<i64>,
    stepsize: i64,
) -> SettingMeta {
    SettingMeta {
        name,
        description,
        kind: SettingKind::Integer {
            minimum,
            maximum,
            stepsize,
        },
    }
}

fn plain(name: &'static str, description: &'static str, kind: SettingKind) -> SettingMeta {
    SettingMeta {
        name,
        description,
        kind,
    }
}

/// Schema for every option, in display order.
pub fn metasettings() -> Vec<SettingMeta> {
    vec![
        plain(
            "binary_path",
            "Path to the SoX binary (leave empty to use the system PATH)",
            SettingKind::String,
        ),
        plain(
            "channel_mode",
            "Audio channel to generate the spectrogram from",
            SettingKind::Dropdown {
                options: vec!["Left and right (default)", "Left", "Right"],
            },
        ),
        integer(
            "width",
            "Width of a channel spectrogram (default 800px)",
            *WIDTH_RANGE.start(),
            Some(*WIDTH_RANGE.end()),
            20,
        ),
        integer(
            "height",
            "Height of a channel spectrogram (default 257px)",
            *HEIGHT_RANGE.start(),
            Some(*HEIGHT_RANGE.end()),
            1,
        ),
        plain(
            "title_mode",
            "Title to display at the top of the generated image",
            SettingKind::Dropdown {
                options: vec![
                    "Hide title (default)",
                    "Filename without extension",
                    "Filename with extension",
                    "Full path, filename and extension",
                ],
            },
        ),
        plain(
            "comment",
            "Comment to display at the bottom left of the image",
            SettingKind::String,
        ),
        integer("start_position_seconds", "Starting position in seconds", 0, None, 1),
        integer("duration_seconds", "Duration in seconds", 0, None, 1),
        plain(
            "window_function",
            "Window function to use",
            SettingKind::Dropdown {
                options: vec![
                    "Hann (default)",
                    "Hamming",
                    "Bartlett",
                    "Rectangular",
                    "Kaiser",
                    "Dolph",
                ],
            },
        ),
        plain(
            "monochrome",
            "Generate a monochromatic spectrogram",
            SettingKind::Bool,
        ),
        plain("raw", "Hide axes and labels", SettingKind::Bool),
        plain(
            "high_color_mode",
            "Use the high-intensity color mode",
            SettingKind::Bool,
        ),
        plain("light_mode", "Use a white background", SettingKind::Bool),
        integer(
            "brightness",
            "Brightness adjustment (20 to 180, default 120)",
            *BRIGHTNESS_RANGE.start(),
            Some(*BRIGHTNESS_RANGE.end()),
            10,
        ),
        integer(
            "contrast",
            "Contrast adjustment (-100 to 100, default 0)",
            *CONTRAST_RANGE.start(),
            Some(*CONTRAST_RANGE.end()),
            10,
        ),
        integer(
            "color_count",
            "Number of colors (default 249)",
            *COLOR_COUNT_RANGE.start(),
            Some(*COLOR_COUNT_RANGE.end()),
            2,
        ),
    ]
}
