//! SoX argument list construction

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Image written next to the input: same directory, same stem, `.png`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut file_name = stem.to_os_string();
    file_name.push(".png");
    input
        .parent()
        .map(|dir| dir.join(&file_name))
        .unwrap_or_else(|| PathBuf::from(&file_name))
}

/// A fully resolved `sox ... spectrogram ...` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpectrogramCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub output_path: PathBuf,
}

impl SpectrogramCommand {
    /// Build the invocation rendering `input` with `config`.
    ///
    /// SoX parses its arguments positionally, so the order below is fixed:
    /// input, `-n`, optional `remix`, the `spectrogram` effect and its options,
    /// and finally `-o`. With `raw` set, `-r` is emitted twice.
    pub fn build(program: impl Into<OsString>, input: &Path, config: &Config) -> Self {
        let output_path = output_path_for(input);
        let mut args: Vec<OsString> = Vec::with_capacity(40);
        let mut push = |arg: &dyn AsRef<OsStr>| args.push(arg.as_ref().to_os_string());

        push(&input);
        // Null output: analyse only
        push(&"-n");

        if let Some(channel) = config.channel_mode.remix_channel() {
            push(&"remix");
            push(&channel);
        }

        push(&"spectrogram");

        if config.raw {
            push(&"-r");
        }

        push(&"-x");
        push(&config.clamped_width().to_string());
        push(&"-y");
        push(&config.odd_height().to_string());

        if let Some(title) = config.title_mode.title_for(input) {
            push(&"-t");
            push(&title);
        }

        if !config.comment.is_empty() {
            push(&"-c");
            push(&config.comment);
        }

        let start = config.start_position();
        if start != 0 {
            push(&"-S");
            push(&start.to_string());
        }

        let duration = config.duration();
        if duration != 0 {
            push(&"-d");
            push(&duration.to_string());
        }

        push(&"-w");
        push(&config.window_function.name());

        if config.monochrome {
            push(&"-m");
        }
        if config.raw {
            push(&"-r");
        }
        if config.high_color_mode {
            push(&"-h");
        }
        if config.light_mode {
            push(&"-l");
        }

        push(&"-z");
        push(&config.clamped_brightness().to_string());
        push(&"-Z");
        push(&config.clamped_contrast().to_string());
        push(&"-q");
        push(&config.quantized_colors().to_string());

        push(&"-o");
        push(&output_path);

        Self {
            program: program.into(),
            args,
            output_path,
        }
    }

    /// Full argument vector, program first.
    pub fn argv(&self) -> Vec<&OsStr> {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .collect()
    }
}

impl fmt::Display for SpectrogramCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .argv()
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChannelMode, TitleMode, WindowFunction};

    fn argv(command: &SpectrogramCommand) -> Vec<String> {
        command
            .argv()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn position(args: &[String], flag: &str) -> usize {
        args.iter()
            .position(|a| a == flag)
            .unwrap_or_else(|| panic!("{} missing from {:?}", flag, args))
    }

    #[test]
    fn test_output_path_is_sibling_png() {
        assert_eq!(
            output_path_for(Path::new("/a/b/track.flac")),
            PathBuf::from("/a/b/track.png")
        );
        assert_eq!(
            output_path_for(Path::new("/a/b/live.set.1.wav")),
            PathBuf::from("/a/b/live.set.1.png")
        );
        assert_eq!(output_path_for(Path::new("song.mp3")), PathBuf::from("song.png"));
    }

    #[test]
    fn test_default_arguments() {
        let command =
            SpectrogramCommand::build("sox", Path::new("/music/song.mp3"), &Config::default());
        assert_eq!(
            argv(&command),
            vec![
                "sox", "/music/song.mp3", "-n", "spectrogram", "-x", "800", "-y", "257", "-c",
                "Created by SoX", "-w", "Hann", "-z", "120", "-Z", "0", "-q", "249", "-o",
                "/music/song.png",
            ]
        );
        assert_eq!(command.output_path, PathBuf::from("/music/song.png"));
    }

    #[test]
    fn test_every_option_set_keeps_fixed_order() {
        let config = Config {
            binary_path: Some("/usr/local/bin/sox".to_string()),
            channel_mode: ChannelMode::Left,
            width: 1200,
            height: 300,
            title_mode: TitleMode::FullPath,
            comment: "tagged".to_string(),
            start_position_seconds: 30,
            duration_seconds: 15,
            window_function: WindowFunction::Kaiser,
            monochrome: true,
            raw: true,
            high_color_mode: true,
            light_mode: true,
            brightness: 90,
            contrast: -20,
            color_count: 10,
        };
        let command =
            SpectrogramCommand::build("/usr/local/bin/sox", Path::new("/a/b/track.flac"), &config);
        assert_eq!(
            argv(&command),
            vec![
                "/usr/local/bin/sox",
                "/a/b/track.flac",
                "-n",
                "remix",
                "1",
                "spectrogram",
                "-r",
                "-x",
                "1200",
                "-y",
                "301",
                "-t",
                "/a/b/track.flac",
                "-c",
                "tagged",
                "-S",
                "30",
                "-d",
                "15",
                "-w",
                "Kaiser",
                "-m",
                "-r",
                "-h",
                "-l",
                "-z",
                "90",
                "-Z",
                "-20",
                "-q",
                "249",
                "-o",
                "/a/b/track.png",
            ]
        );
    }

    #[test]
    fn test_width_clamped_in_arguments() {
        let narrow = Config {
            width: 50,
            ..Config::default()
        };
        let args = argv(&SpectrogramCommand::build("sox", Path::new("x.wav"), &narrow));
        assert_eq!(args[position(&args, "-x") + 1], "100");

        let wide = Config {
            width: 500_000,
            ..Config::default()
        };
        let args = argv(&SpectrogramCommand::build("sox", Path::new("x.wav"), &wide));
        assert_eq!(args[position(&args, "-x") + 1], "200000");
    }

    #[test]
    fn test_height_made_odd_in_arguments() {
        let even = Config {
            height: 256,
            ..Config::default()
        };
        let args = argv(&SpectrogramCommand::build("sox", Path::new("x.wav"), &even));
        assert_eq!(args[position(&args, "-y") + 1], "257");

        let tall = Config {
            height: 600,
            ..Config::default()
        };
        let args = argv(&SpectrogramCommand::build("sox", Path::new("x.wav"), &tall));
        assert_eq!(args[position(&args, "-y") + 1], "513");
    }

    #[test]
    fn test_right_channel_remix_precedes_effect() {
        let config = Config {
            channel_mode: ChannelMode::Right,
            ..Config::default()
        };
        let args = argv(&SpectrogramCommand::build("sox", Path::new("x.ogg"), &config));
        let effect = position(&args, "spectrogram");
        assert_eq!(&args[effect - 2..effect], ["remix", "2"]);
    }

    #[test]
    fn test_title_modes() {
        let input = Path::new("/music/song.mp3");
        let cases = [
            (TitleMode::StemName, "song"),
            (TitleMode::FullName, "song.mp3"),
            (TitleMode::FullPath, "/music/song.mp3"),
        ];
        for (mode, expected) in cases {
            let config = Config {
                title_mode: mode,
                ..Config::default()
            };
            let args = argv(&SpectrogramCommand::build("sox", input, &config));
            assert_eq!(args[position(&args, "-t") + 1], expected);
        }

        let hidden = argv(&SpectrogramCommand::build("sox", input, &Config::default()));
        assert!(!hidden.iter().any(|a| a == "-t"));
    }

    #[test]
    fn test_raw_flag_emitted_twice() {
        let config = Config {
            raw: true,
            ..Config::default()
        };
        let args = argv(&SpectrogramCommand::build("sox", Path::new("x.aiff"), &config));
        let positions: Vec<usize> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-r")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions.len(), 2);
        assert_eq!(args[positions[0] - 1], "spectrogram");
        assert_eq!(args[positions[1] - 1], "Hann");
    }

    #[test]
    fn test_empty_comment_and_zero_offsets_are_omitted() {
        let config = Config {
            comment: String::new(),
            start_position_seconds: -10,
            ..Config::default()
        };
        let args = argv(&SpectrogramCommand::build("sox", Path::new("x.wav"), &config));
        for flag in ["-c", "-S", "-d"] {
            assert!(!args.iter().any(|a| a == flag), "{} should be omitted", flag);
        }
    }

    #[test]
    fn test_display_joins_arguments() {
        let config = Config {
            comment: String::new(),
            ..Config::default()
        };
        let command = SpectrogramCommand::build("sox", Path::new("/m/a.wav"), &config);
        assert_eq!(
            command.to_string(),
            "sox /m/a.wav -n spectrogram -x 800 -y 257 -w Hann -z 120 -Z 0 -q 249 -o /m/a.png"
        );
    }
}
