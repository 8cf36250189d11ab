//! Cancellation by stream wrapping.
//!
//! The decoder never polls a stop token itself. [`StopReader`] checks the
//! token before each read of the wrapped stream and fails that read instead,
//! which the decoder surfaces as [`crate::PnmError::Cancelled`].

use std::io::{self, Read};

use enough::{Stop, StopReason};

/// Payload of the `io::Error` returned by a stopped [`StopReader`].
#[derive(Debug, thiserror::Error)]
#[error("read stopped: {0:?}")]
pub(crate) struct StopRequested(pub(crate) StopReason);

/// A reader that refuses to read once its stop token fires.
pub struct StopReader<'s, R> {
    inner: R,
    stop: &'s dyn Stop,
}

impl<'s, R: Read> StopReader<'s, R> {
    pub fn new(inner: R, stop: &'s dyn Stop) -> Self {
        Self { inner, stop }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for StopReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stop
            .check()
            .map_err(|reason| io::Error::other(StopRequested(reason)))?;
        self.inner.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    struct Stopped;

    impl Stop for Stopped {
        fn check(&self) -> Result<(), StopReason> {
            Err(StopReason::Cancelled)
        }
    }

    #[test]
    fn passes_reads_through() {
        let mut reader = StopReader::new(&b"P5"[..], &Unstoppable);
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"P5");
    }

    #[test]
    fn fails_reads_once_stopped() {
        let mut reader = StopReader::new(&b"P5"[..], &Stopped);
        let mut buf = [0u8; 2];
        let err = reader.read(&mut buf).unwrap_err();
        assert!(err.get_ref().is_some_and(|e| e.is::<StopRequested>()));
    }
}
