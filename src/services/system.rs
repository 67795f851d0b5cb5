//! Desktop tool availability

use tokio::process::Command;
use tracing::info;

/// Check if an external program can be executed
pub async fn check_command_available(program: &str) -> Result<(), String> {
    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|_| format!("{} is not available; related desktop features are disabled.", program))?;

    info!("{} is available", program);
    Ok(())
}
