//! Publishes a built site by running the configured hosting CLI (by default
//! `vercel --prod`) from the project root.

use crate::config::DeployConfig;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::info;

/// Runs the deploy command in `directory` and waits for it to exit.
pub fn deploy_site(config: &DeployConfig, directory: &Path) -> Result<()> {
    let (program, args) = config.command.split_first().ok_or(Error::EmptyCommand)?;

    info!("Deploying with `{}`", config.command.join(" "));
    let status = Command::new(program)
        .args(args)
        .current_dir(directory)
        .status()
        .map_err(|err| Error::Spawn {
            program: program.clone(),
            err,
        })?;

    match status.success() {
        true => Ok(()),
        false => Err(Error::Failed {
            program: program.clone(),
            status,
        }),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error running the deploy command.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the configured command is empty.
    #[error("no deploy command configured")]
    EmptyCommand,

    /// Returned when the command can't be started.
    #[error("running `{program}`: {err}")]
    Spawn {
        program: String,
        #[source]
        err: io::Error,
    },

    /// Returned when the command exits unsuccessfully.
    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

#[cfg(test)]
mod test {
    use super::*;

    fn command(args: &[&str]) -> DeployConfig {
        DeployConfig {
            command: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_command() {
        assert!(matches!(
            deploy_site(&command(&[]), Path::new(".")),
            Err(Error::EmptyCommand)
        ));
    }

    #[test]
    fn test_missing_program() {
        assert!(matches!(
            deploy_site(&command(&["scribble-no-such-program"]), Path::new(".")),
            Err(Error::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status() {
        assert!(deploy_site(&command(&["true"]), Path::new(".")).is_ok());
        assert!(matches!(
            deploy_site(&command(&["sh", "-c", "exit 3"]), Path::new(".")),
            Err(Error::Failed { .. })
        ));
    }
}
