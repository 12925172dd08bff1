//! ngrok subprocess lifecycle.

use crate::error::NgrokError;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, error};

/// Handle to a running ngrok subprocess.
///
/// Both output streams are forwarded line by line into tracing. Tunnel state
/// is only ever read from the control API, never inferred from log text.
pub struct NgrokProcess {
    child: Child,
}

impl NgrokProcess {
    /// Spawn `<binary> http <local_url> --log stdout` with piped output.
    pub fn spawn(binary: &str, local_url: &str) -> Result<Self, NgrokError> {
        let mut child = Command::new(binary)
            .arg("http")
            .arg(local_url)
            .arg("--log")
            .arg("stdout")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(NgrokError::Spawn)?;

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stdout).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "ngrok", "{}", line);
                }
            });
        }

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    error!(target: "ngrok", "{}", line);
                }
            });
        }

        Ok(Self { child })
    }

    /// Wait for the subprocess to exit on its own.
    pub async fn wait(&mut self) -> Result<ExitStatus, NgrokError> {
        Ok(self.child.wait().await?)
    }

    /// Kill the subprocess and reap it.
    pub async fn terminate(&mut self) -> Result<(), NgrokError> {
        self.child.kill().await?;
        Ok(())
    }
}
