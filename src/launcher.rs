//! External collaborators: the ssh process and the config editor.
//!
//! Both block the calling thread for their whole lifetime and expect the
//! terminal to themselves, so the TUI is suspended around every call.

use std::path::Path;
use std::process::Command;

use crate::config::manager::ConnectionProfile;
use crate::error::{AppError, Result};

/// Arguments for the ssh invocation: `[-p <port>] [<username>@]<server>`
fn ssh_args(profile: &ConnectionProfile) -> Vec<String> {
    let mut args = Vec::new();
    if !profile.port.is_empty() {
        args.push("-p".to_string());
        args.push(profile.port.clone());
    }
    args.push(profile.target());
    args
}

/// Run `ssh` against the profile with stdio wired to the controlling
/// terminal. Returns once the session ends; a launch failure or non-zero
/// exit is an `ExternalProcess` error.
pub fn connect(profile: &ConnectionProfile) -> Result<()> {
    let status = Command::new("ssh")
        .args(ssh_args(profile))
        .status()
        .map_err(|e| AppError::ExternalProcess(format!("failed to launch ssh: {}", e)))?;

    if !status.success() {
        return Err(AppError::ExternalProcess(format!(
            "ssh exited with {}",
            status
        )));
    }
    Ok(())
}

/// Open the config document in the user's preferred editor (blocking)
pub fn edit_config(path: &Path) -> Result<()> {
    tracing::info!("Opening config in editor: {}", path.display());
    edit::edit_file(path)
        .map_err(|e| AppError::ExternalProcess(format!("editor failed: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(server: &str, port: &str, username: &str) -> ConnectionProfile {
        ConnectionProfile::new(server.into(), "c".into(), port.into(), username.into())
    }

    #[test]
    fn args_for_bare_server() {
        assert_eq!(ssh_args(&profile("host1", "", "")), ["host1"]);
    }

    #[test]
    fn args_include_port_flag_when_set() {
        assert_eq!(
            ssh_args(&profile("host1", "2222", "")),
            ["-p", "2222", "host1"]
        );
    }

    #[test]
    fn args_include_username_in_target() {
        assert_eq!(
            ssh_args(&profile("host1", "2222", "deploy")),
            ["-p", "2222", "deploy@host1"]
        );
    }
}
