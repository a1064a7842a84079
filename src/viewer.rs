use std::io;
use std::path::Path;
use std::process::Command;

/// Builds the command launching the platform's default viewer, if one is known.
fn viewer_command() -> Option<Command> {
    if cfg!(target_os = "macos") {
        Some(Command::new("open"))
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        // The empty argument is the window title `start` expects before the path.
        command.args(["/C", "start", ""]);
        Some(command)
    } else if cfg!(unix) {
        Some(Command::new("xdg-open"))
    } else {
        None
    }
}

/// Opens `path` in the default viewer and waits for the launcher to exit.
pub fn open_in_viewer(path: &Path) -> io::Result<()> {
    let Some(mut command) = viewer_command() else {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "No default viewer is known for this platform",
        ));
    };

    let status = command.arg(path).status()?;
    if !status.success() {
        return Err(io::Error::other(format!(
            "Viewer exited with status {}",
            status
        )));
    }

    Ok(())
}
