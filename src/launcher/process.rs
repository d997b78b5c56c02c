//! Wizard running as a separate program.
//!
//! The module is looked up on a search path (launcher directory first), then
//! spawned, optionally through an interpreter. Waiting on the child is the
//! event loop.

use anyhow::{anyhow, bail, Context, Result};
use std::{
    path::{Path, PathBuf},
    process::{Child, Command},
    time::Duration,
};

use super::Wizard;
use crate::config::LaunchConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Directories searched for the wizard module, in order: the launcher's own
/// directory, the configured extras, then the working directory.
pub fn search_path(launcher_dir: Option<&Path>, config: &LaunchConfig) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut push = |dir: PathBuf| {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    };

    if let Some(dir) = launcher_dir {
        push(dir.to_path_buf());
    }
    for dir in &config.search_path {
        push(dir.clone());
    }
    push(PathBuf::from("."));

    dirs
}

/// Find `module` on `search_path`.
///
/// Each directory is tried with the bare name first, then with every
/// extension in order.
pub fn resolve_module(module: &str, search_path: &[PathBuf], extensions: &[String]) -> Result<PathBuf> {
    if module.is_empty() {
        bail!("Wizard module name is empty");
    }

    for dir in search_path {
        let bare = dir.join(module);
        if bare.is_file() {
            return Ok(bare);
        }
        for ext in extensions {
            let candidate = dir.join(format!("{module}.{}", ext.trim_start_matches('.')));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    let searched = search_path
        .iter()
        .map(|dir| format!("    {}", dir.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(anyhow!("Import failed: no module named '{module}'\nSearched:\n{searched}"))
}

pub struct ProcessWizard {
    module: PathBuf,
    child: Child,
    interrupt: Option<flume::Receiver<()>>,
}

impl ProcessWizard {
    /// Resolve and start the wizard.
    ///
    /// A message on `interrupt` stops the wizard and ends `mainloop` cleanly.
    pub fn construct(
        config: &LaunchConfig,
        launcher_dir: Option<&Path>,
        interrupt: Option<flume::Receiver<()>>,
    ) -> Result<Self> {
        let dirs = search_path(launcher_dir, config);
        let module = resolve_module(&config.module, &dirs, &config.extensions)?;
        log::info!("Resolved wizard module {} to {}", config.module, module.display());

        let mut command = match &config.interpreter {
            Some(interpreter) => {
                let mut cmd = Command::new(interpreter);
                cmd.arg(&module);
                cmd
            }
            None => Command::new(&module),
        };

        let child = command
            .spawn()
            .with_context(|| format!("Failed to start wizard {}", module.display()))?;
        log::info!("Wizard started with pid {}", child.id());

        Ok(Self {
            module,
            child,
            interrupt,
        })
    }

    pub fn module(&self) -> &Path {
        &self.module
    }

    fn stop(&mut self) -> Result<()> {
        log::info!("Interrupt received, stopping wizard");
        if let Err(err) = self.child.kill() {
            log::warn!("Failed to kill wizard process: {err}");
        }
        self.child.wait().context("Failed to reap wizard process")?;
        Ok(())
    }
}

impl Wizard for ProcessWizard {
    fn mainloop(&mut self) -> Result<()> {
        loop {
            if let Some(status) = self
                .child
                .try_wait()
                .context("Failed to poll wizard process")?
            {
                if status.success() {
                    log::info!("Wizard exited cleanly");
                    return Ok(());
                }
                bail!("Wizard {} exited with {status}", self.module.display());
            }

            match &self.interrupt {
                Some(rx) => match rx.recv_timeout(POLL_INTERVAL) {
                    Ok(()) => return self.stop(),
                    Err(flume::RecvTimeoutError::Timeout) => {}
                    Err(flume::RecvTimeoutError::Disconnected) => {
                        self.interrupt = None;
                    }
                },
                None => std::thread::sleep(POLL_INTERVAL),
            }
        }
    }
}

impl Drop for ProcessWizard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config(module: &str) -> LaunchConfig {
        LaunchConfig {
            module: module.to_string(),
            ..LaunchConfig::default()
        }
    }

    #[test]
    fn test_search_path_order() {
        let config = LaunchConfig {
            search_path: vec![PathBuf::from("/opt/app"), PathBuf::from("/opt/app")],
            ..LaunchConfig::default()
        };
        let dirs = search_path(Some(Path::new("/usr/local/bin")), &config);
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/opt/app"),
                PathBuf::from(".")
            ]
        );
    }

    #[test]
    fn test_resolve_prefers_earlier_directory() -> Result<()> {
        let first = tempfile::tempdir()?;
        let second = tempfile::tempdir()?;
        fs::write(first.path().join("wizard.py"), "")?;
        fs::write(second.path().join("wizard.py"), "")?;

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = resolve_module("wizard", &dirs, &["py".to_string()])?;
        assert_eq!(found, first.path().join("wizard.py"));
        Ok(())
    }

    #[test]
    fn test_resolve_bare_name_before_extension() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("wizard"), "")?;
        fs::write(dir.path().join("wizard.py"), "")?;

        let found = resolve_module("wizard", &[dir.path().to_path_buf()], &[".py".to_string()])?;
        assert_eq!(found, dir.path().join("wizard"));
        Ok(())
    }

    #[test]
    fn test_resolve_ignores_directories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("wizard"))?;
        assert!(resolve_module("wizard", &[dir.path().to_path_buf()], &[]).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_module_is_import_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ProcessWizard::construct(
            &config("nextcloud_restore_and_backup_v9"),
            Some(dir.path()),
            None,
        )
        .err()
        .expect("construct should fail");

        let message = format!("{err:#}");
        assert!(message.contains("no module named 'nextcloud_restore_and_backup_v9'"));
        assert!(message.contains(&dir.path().display().to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_wizard_runs_to_completion() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("fake_wizard.sh"), "exit 0\n")?;
        let config = LaunchConfig {
            module: "fake_wizard".to_string(),
            interpreter: Some("sh".to_string()),
            extensions: vec!["sh".to_string()],
            ..LaunchConfig::default()
        };

        let mut wizard = ProcessWizard::construct(&config, Some(dir.path()), None)?;
        assert_eq!(wizard.module(), dir.path().join("fake_wizard.sh"));
        wizard.mainloop()
    }

    #[cfg(unix)]
    #[test]
    fn test_process_wizard_failure_status() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("fake_wizard.sh"), "exit 3\n")?;
        let config = LaunchConfig {
            module: "fake_wizard".to_string(),
            interpreter: Some("sh".to_string()),
            extensions: vec!["sh".to_string()],
            ..LaunchConfig::default()
        };

        let mut wizard = ProcessWizard::construct(&config, Some(dir.path()), None)?;
        let err = wizard.mainloop().err().expect("non-zero exit must fail");
        assert!(err.to_string().contains("exited with"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_interrupt_stops_wizard() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("slow_wizard.sh"), "sleep 30\n")?;
        let config = LaunchConfig {
            module: "slow_wizard".to_string(),
            interpreter: Some("sh".to_string()),
            extensions: vec!["sh".to_string()],
            ..LaunchConfig::default()
        };

        let (tx, rx) = flume::bounded(1);
        let mut wizard = ProcessWizard::construct(&config, Some(dir.path()), Some(rx))?;
        tx.send(())?;

        let started = std::time::Instant::now();
        wizard.mainloop()?;
        assert!(started.elapsed() < Duration::from_secs(10));
        Ok(())
    }
}
