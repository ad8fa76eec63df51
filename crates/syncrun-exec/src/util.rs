#[cfg(target_family = "unix")]
use std::time::Duration;

use tokio::process::Child;

/// Ask the child to stop, then make sure it did.
///
/// On unix this sends SIGTERM first and gives the process a short grace
/// window before the hard kill, so the external program can flush its
/// own state. Elsewhere it goes straight to kill.
#[cfg(target_family = "unix")]
pub async fn kill_graceful(child: &mut Child) -> std::io::Result<()> {
    if let Some(id) = child.id() {
        unsafe {
            let _ = libc::kill(id as libc::pid_t, libc::SIGTERM);
        }
        let grace = tokio::time::timeout(Duration::from_secs(5), child.wait()).await;
        if grace.is_ok() {
            return Ok(());
        }
    }
    child.kill().await
}

#[cfg(target_family = "windows")]
pub async fn kill_graceful(child: &mut Child) -> std::io::Result<()> {
    child.kill().await
}
