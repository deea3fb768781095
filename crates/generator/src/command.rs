use crate::{GenerationReport, SiteGenerator};
use anyhow::{Context, Result, anyhow, bail};
use blog_kit_core::SiteConfig;
use log::{debug, info, warn};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Runs an external generator program, piping the config JSON to its stdin.
///
/// The program's stdout is passed through; stderr is captured and
/// included in the error when it exits unsuccessfully.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SiteGenerator for CommandGenerator {
    fn name(&self) -> &str {
        &self.program
    }

    fn generate(&self, config: &SiteConfig) -> Result<GenerationReport> {
        let json = config
            .to_json_string()
            .context("Failed to serialize site config")?;

        debug!("spawning {} {:?}", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start generator '{}'", self.program))?;

        // Written from a thread; the exit status is checked even when the
        // program closes stdin without reading it.
        let mut stdin = child.stdin.take().context("Generator stdin unavailable")?;
        let writer = thread::spawn(move || stdin.write_all(json.as_bytes()));

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for '{}'", self.program))?;
        let written = writer
            .join()
            .map_err(|_| anyhow!("Config writer for '{}' panicked", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Generator '{}' failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        match written {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                warn!("'{}' exited without reading the config", self.program);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to send config to '{}'", self.program));
            }
        }
        info!("generator '{}' finished", self.program);

        Ok(GenerationReport {
            generator: self.name().to_string(),
            target: config.target_path.clone(),
            written: vec![],
        })
    }
}
