//! Starting the renderer process

use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::command::SpectrogramCommand;

/// Starts a [`SpectrogramCommand`] without waiting for it.
pub trait Launcher: Send + Sync {
    fn launch(&self, command: &SpectrogramCommand) -> io::Result<Launched>;
}

/// A started renderer.
///
/// Dropping it leaves the process running and hands the child to a
/// background thread that reaps it on exit. The exit status is only observed
/// through [`Launched::wait`].
#[derive(Debug)]
pub struct Launched {
    pid: u32,
    child: Option<Child>,
}

impl Launched {
    /// A launch with no process handle attached.
    pub fn detached(pid: u32) -> Self {
        Self { pid, child: None }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Block until the renderer exits. `None` when no handle is attached.
    pub fn wait(mut self) -> io::Result<Option<ExitStatus>> {
        match self.child.take() {
            Some(mut child) => child.wait().map(Some),
            None => Ok(None),
        }
    }
}

impl Drop for Launched {
    fn drop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Ok(Some(_)) = child.try_wait() {
            return;
        }
        std::thread::spawn(move || {
            let _ = child.wait();
        });
    }
}

/// Spawns SoX as a background OS process.
///
/// The child gets no stdin, its output is discarded, and on Unix it is moved
/// into its own process group so it outlives a host that is shutting down.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, command: &SpectrogramCommand) -> io::Result<Launched> {
        let mut process = Command::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            process.process_group(0);
        }

        let child = process.spawn()?;
        Ok(Launched {
            pid: child.id(),
            child: Some(child),
        })
    }
}
