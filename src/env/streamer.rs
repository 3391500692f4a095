use serde::Serialize;
use std::io::{BufWriter, Write};
use std::sync::mpsc::SyncSender;
use std::thread::JoinHandle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("cannot serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("output stream is closed")]
    Closed,

    #[error("output stream failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes serializable records as JSON lines from a background thread.
pub struct Streamer {
    handle: JoinHandle<std::io::Result<()>>,
    sender: SyncSender<String>,
}

impl Streamer {
    pub fn new<W: Write + Send + 'static>(output: W) -> Self {
        let mut output = BufWriter::new(output);
        let (sender, recv) =
            std::sync::mpsc::sync_channel::<String>(2 * rayon::current_num_threads());
        let handle = std::thread::spawn(move || {
            for data in recv.into_iter() {
                writeln!(output, "{}", data)?;
            }
            output.flush()
        });
        Self { handle, sender }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn send<T: Serialize>(&self, value: &T) -> Result<(), StreamError> {
        let serialized_value: String = serde_json::to_string(value)?;
        self.sender
            .send(serialized_value)
            .map_err(|_| StreamError::Closed)
    }

    pub fn join(self) -> Result<(), StreamError> {
        drop(self.sender);
        match self.handle.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(StreamError::Closed),
        }
    }
}
