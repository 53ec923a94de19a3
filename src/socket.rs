use std::{
    fs,
    io::Read,
    os::unix::net::{UnixListener, UnixStream},
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread::{self, JoinHandle},
};

use xdg::BaseDirectories;

const SOCKET_DIR: &str = "pixelfill";
const SOCKET_NAME: &str = "control.socket";

/// Commands a running preview loop accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    Toggle,
    Snapshot,
}

impl Command {
    pub fn parse<S>(s: S) -> Option<Self>
    where
        S: AsRef<str>,
    {
        match s.as_ref().trim().to_lowercase().as_str() {
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "toggle" => Some(Command::Toggle),
            "snapshot" => Some(Command::Snapshot),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Toggle => "toggle",
            Command::Snapshot => "snapshot",
        }
    }
}

/// Get the socket path using the XDG runtime directory
pub fn get_socket_path() -> Option<PathBuf> {
    let xdg = BaseDirectories::with_prefix(SOCKET_DIR).ok()?;
    xdg.place_runtime_file(SOCKET_NAME).ok()
}

/// Find the socket of a running preview, if any
pub fn find_socket() -> Option<PathBuf> {
    let xdg = BaseDirectories::with_prefix(SOCKET_DIR).ok()?;

    xdg.list_runtime_files(".")
        .into_iter()
        .find(|path| path.file_name().map(|n| n == SOCKET_NAME).unwrap_or(false))
}

/// Send a command to a running preview
pub fn send_command<S>(command: S) -> std::io::Result<()>
where
    S: AsRef<str>,
{
    let socket_path = find_socket().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No running pixelfill preview found",
        )
    })?;

    let mut stream = UnixStream::connect(&socket_path)?;
    std::io::Write::write_all(&mut stream, command.as_ref().as_bytes())?;
    Ok(())
}

/// Socket listener that receives commands and forwards them through a
/// channel drained by the animation driver.
pub struct SocketListener {
    socket_path: PathBuf,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SocketListener {
    pub fn new(command_tx: Sender<Command>) -> std::io::Result<Self> {
        let socket_path = get_socket_path()
            .ok_or_else(|| std::io::Error::other("Failed to determine XDG runtime directory"))?;

        // An existing socket either belongs to a live preview or is stale
        if socket_path.exists() {
            if UnixStream::connect(&socket_path).is_ok() {
                return Err(std::io::Error::other(
                    "Another pixelfill preview is already running",
                ));
            }
            fs::remove_file(&socket_path)?;
        }

        let listener = UnixListener::bind(&socket_path)?;
        listener.set_nonblocking(true)?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);
        let socket_path_clone = socket_path.clone();

        let handle = thread::spawn(move || {
            Self::listen_loop(listener, command_tx, shutdown_clone, &socket_path_clone);
        });

        tracing::info!(path = %socket_path.display(), "control socket listening");

        Ok(SocketListener {
            socket_path,
            shutdown,
            handle: Some(handle),
        })
    }

    fn listen_loop(
        listener: UnixListener,
        tx: Sender<Command>,
        shutdown: Arc<AtomicBool>,
        socket_path: &Path,
    ) {
        while !shutdown.load(Ordering::Relaxed) {
            match listener.accept() {
                Ok((mut stream, _)) => {
                    let mut message = String::new();
                    if let Err(e) = stream.read_to_string(&mut message) {
                        tracing::warn!(error = %e, "Failed to read from control socket");
                        continue;
                    }

                    tracing::debug!(message = %message.trim(), "Received command");

                    if let Some(command) = Command::parse(&message) {
                        if tx.send(command).is_err() {
                            tracing::warn!("Command channel closed");
                            break;
                        }
                    } else {
                        tracing::warn!(message = %message.trim(), "Unknown command");
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(std::time::Duration::from_millis(100));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Control socket accept error");
                    thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }

        if socket_path.exists() {
            let _ = fs::remove_file(socket_path);
        }
        tracing::info!("control socket stopped");
    }

    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        if self.socket_path.exists() {
            let _ = fs::remove_file(&self.socket_path);
        }
    }
}

impl Drop for SocketListener {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Create a command channel
pub fn command_channel() -> (Sender<Command>, Receiver<Command>) {
    mpsc::channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() -> crate::error::Result<()> {
        assert_eq!(Command::parse("pause"), Some(Command::Pause));
        assert_eq!(Command::parse("PAUSE"), Some(Command::Pause));
        assert_eq!(Command::parse("  resume  "), Some(Command::Resume));
        assert_eq!(Command::parse("toggle"), Some(Command::Toggle));
        assert_eq!(Command::parse("snapshot"), Some(Command::Snapshot));
        assert_eq!(Command::parse("unknown"), None);
        Ok(())
    }

    #[test]
    fn test_command_round_trips_through_wire_form() -> crate::error::Result<()> {
        for command in [
            Command::Pause,
            Command::Resume,
            Command::Toggle,
            Command::Snapshot,
        ] {
            assert_eq!(Command::parse(command.as_str()), Some(command));
        }
        Ok(())
    }
}
