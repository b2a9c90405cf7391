//! Sources describing the operating system

use crate::pcs::C_LOCALE;
use crate::runner::CommandRunner;
use tracing::warn;

// stdout of a successful command, `None` otherwise
async fn stdout_if_success<R: CommandRunner>(runner: &R, args: &[&str]) -> Option<String> {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    match runner.run(&args, C_LOCALE).await {
        Ok(output) if output.success() => Some(output.stdout),
        Ok(output) => {
            warn!(command = %args.join(" "), rc = output.rc, "command failed");
            None
        }
        Err(error) => {
            warn!(%error, "command could not be run");
            None
        }
    }
}

/// Text output of `dnf repolist`, `None` when dnf fails
pub async fn get_dnf_repolist<R: CommandRunner>(runner: &R) -> Option<String> {
    stdout_if_success(runner, &["dnf", "repolist"]).await
}

/// Names of installed packages, `None` when rpm fails
pub async fn get_rpm_installed_packages<R: CommandRunner>(runner: &R) -> Option<Vec<String>> {
    let stdout = stdout_if_success(
        runner,
        &["rpm", "--query", "--all", "--queryformat", "%{NAME}\\n"],
    )
    .await?;
    Some(
        stdout
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .collect(),
    )
}
