//! Hand a saved chart to the platform image viewer.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open `path` in the platform viewer. The file is already on disk, so a
/// missing or failing viewer is only a warning.
pub fn show_in_viewer(path: &Path) {
    launch(viewer_command(path), path);
}

/// Run the launcher to completion and reap it. `open`, `xdg-open` and
/// `start` exit once the viewer has the file.
fn launch(mut cmd: Command, path: &Path) -> bool {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match cmd.status() {
        Ok(status) if status.success() => {
            debug!("Viewer opened {}", path.display());
            true
        }
        Ok(status) => {
            warn!("Viewer for {} exited with {}", path.display(), status);
            false
        }
        Err(e) => {
            warn!("Could not open {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_command_targets_path() {
        let path = Path::new("output/plots/top_10_regions.png");
        let cmd = viewer_command(path);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.last().copied(), Some(path.as_os_str()));
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_waits_for_exit_status() {
        let path = Path::new("chart.png");
        assert!(launch(Command::new("true"), path));
        assert!(!launch(Command::new("false"), path));
    }

    #[test]
    fn test_launch_missing_program_is_not_fatal() {
        let path = Path::new("chart.png");
        assert!(!launch(Command::new("noc-report-no-such-viewer"), path));
    }
}
