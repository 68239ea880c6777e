use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use download_spectrogram::settings::metasettings;
use download_spectrogram::{Config, RenderOutcome, SpectrogramPlugin};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "download-spectrogram")]
#[command(about = "Render SoX spectrograms for finished audio downloads")]
#[command(version)]
struct Args {
    /// TOML file with spectrogram options
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SoX binary, overriding `binary_path` from the config file
    #[arg(long, global = true, env = "SPECTROGRAM_SOX_PATH")]
    sox_path: Option<String>,

    /// Only log warnings, errors and saved images
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Handle a download-finished event
    Notify {
        /// Local path of the downloaded file
        real_path: String,

        /// User the file was downloaded from
        #[arg(long, default_value = "unknown")]
        user: String,

        /// Path of the file as shared by the remote user (defaults to the local path)
        #[arg(long)]
        virtual_path: Option<String>,
    },
    /// Render a spectrogram for one audio file
    Render {
        input: PathBuf,

        /// Wait for SoX to finish and report its exit status
        #[arg(long)]
        wait: bool,
    },
    /// Print the SoX command for a file without running it
    Print { input: PathBuf },
    /// Print the settings schema as JSON
    Settings,
}

fn load_config(
    path: Option<&Path>,
    sox_path: Option<String>,
) -> download_spectrogram::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if sox_path.is_some() {
        config.binary_path = sox_path;
    }
    Ok(config)
}

fn wait_for(outcome: RenderOutcome) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (output_path, process) = match outcome {
        RenderOutcome::Spawned {
            output_path,
            process,
        } => (output_path, process),
        RenderOutcome::Aborted(e) => return Err(e.into()),
        RenderOutcome::Skipped => return Ok(()),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(format!("Rendering {}", output_path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let status = process.wait()?;
    spinner.finish_and_clear();

    match status {
        Some(status) if !status.success() => {
            Err(format!("sox exited with {} ({})", status, output_path.display()).into())
        }
        _ => {
            println!("Done: {:?}", output_path);
            Ok(())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "download_spectrogram=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let quiet = args.quiet;
    let plugin = || -> download_spectrogram::Result<SpectrogramPlugin> {
        let config = load_config(args.config.as_deref(), args.sox_path.clone())?;
        Ok(SpectrogramPlugin::new(config).with_verbose(!quiet))
    };

    match args.command {
        Cmd::Notify {
            real_path,
            user,
            virtual_path,
        } => {
            let virtual_path = virtual_path.unwrap_or_else(|| real_path.clone());
            plugin()?.download_finished_notification(&user, &virtual_path, &real_path);
        }
        Cmd::Render { input, wait } => {
            let outcome = plugin()?.generate_spectrogram(&input);
            if wait {
                wait_for(outcome)?;
            } else if let RenderOutcome::Aborted(e) = outcome {
                return Err(e.into());
            }
        }
        Cmd::Print { input } => {
            println!("{}", plugin()?.build_command(&input)?);
        }
        Cmd::Settings => {
            println!("{}", serde_json::to_string_pretty(&metasettings())?);
        }
    }

    Ok(())
}
