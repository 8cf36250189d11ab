//! Byte-level scanning over a buffered stream: whitespace, comments,
//! decimal tokens and bounded raw fills.

use std::io::{self, BufRead};

/// How much whitespace a comment skip may consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// Any run of whitespace and comments, as allowed between header tokens.
    Run,
    /// At most one whitespace byte, then comment lines. Used after the last
    /// header token so whitespace-valued raster bytes are left alone.
    Single,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ScanError {
    #[error("unexpected end of stream")]
    Eof,
    #[error("expected a decimal number, found byte 0x{0:02x}")]
    NotANumber(u8),
    #[error("number is too large")]
    Overflow,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Netpbm whitespace: blank, tab, CR, LF, vertical tab, form feed.
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_eol(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

pub(crate) trait PnmRead: BufRead {
    /// Look at the next byte without consuming it. `None` at end of stream.
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let b = self.peek_byte()?;
        if b.is_some() {
            self.consume(1);
        }
        Ok(b)
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(b) = self.peek_byte()? {
            if !is_whitespace(b) {
                break;
            }
            self.consume(1);
        }
        Ok(())
    }

    /// Consume a `#` comment through its terminating `\n` or `\r`.
    ///
    /// Returns `false` if the stream ended inside the comment.
    fn skip_comment_line(&mut self) -> io::Result<bool> {
        while let Some(b) = self.next_byte()? {
            if is_eol(b) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Skip whitespace and comments up to the next token.
    ///
    /// In [`Delimiter::Run`] mode end of stream is an error. In
    /// [`Delimiter::Single`] mode it is tolerated: the caller learns about
    /// missing data when it tries to read it.
    fn skip_comments(&mut self, mode: Delimiter) -> Result<(), ScanError> {
        match mode {
            Delimiter::Run => loop {
                self.skip_whitespace()?;
                match self.peek_byte()? {
                    None => return Err(ScanError::Eof),
                    Some(b'#') => {
                        self.consume(1);
                        log::trace!("skipping header comment");
                        if !self.skip_comment_line()? {
                            return Err(ScanError::Eof);
                        }
                    }
                    Some(_) => return Ok(()),
                }
            },
            Delimiter::Single => {
                if self.peek_byte()?.is_some_and(is_whitespace) {
                    self.consume(1);
                }
                while self.peek_byte()? == Some(b'#') {
                    self.consume(1);
                    log::trace!("skipping comment before raster data");
                    if !self.skip_comment_line()? {
                        break;
                    }
                }
                Ok(())
            }
        }
    }

    /// Skip leading whitespace and collect bytes up to whitespace, `#` or end
    /// of stream. At most `max` bytes are kept; longer tokens are consumed but
    /// reported with `truncated = true`.
    fn read_word(&mut self, max: usize) -> Result<(Vec<u8>, bool), ScanError> {
        self.skip_whitespace()?;
        let mut word = Vec::new();
        let mut truncated = false;
        while let Some(b) = self.peek_byte()? {
            if is_whitespace(b) || b == b'#' {
                break;
            }
            self.consume(1);
            if word.len() < max {
                word.push(b);
            } else {
                truncated = true;
            }
        }
        if word.is_empty() {
            return Err(ScanError::Eof);
        }
        Ok((word, truncated))
    }

    /// Skip leading whitespace and read an unsigned decimal number.
    ///
    /// Stops at the first non-digit without consuming it.
    fn read_decimal(&mut self) -> Result<u64, ScanError> {
        self.skip_whitespace()?;
        let first = self.peek_byte()?.ok_or(ScanError::Eof)?;
        if !first.is_ascii_digit() {
            return Err(ScanError::NotANumber(first));
        }
        let mut value: u64 = 0;
        let mut overflow = false;
        while let Some(b) = self.peek_byte()? {
            if !b.is_ascii_digit() {
                break;
            }
            self.consume(1);
            match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
            {
                Some(v) => value = v,
                None => overflow = true,
            }
        }
        if overflow {
            return Err(ScanError::Overflow);
        }
        Ok(value)
    }

    /// Fill `buf` from the stream, returning how many bytes were read.
    ///
    /// A result shorter than `buf.len()` means the stream ended.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: BufRead + ?Sized> PnmRead for R {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_mode_skips_interleaved_comments() {
        let mut src: &[u8] = b"  # one\n\t# two\r\n 42";
        src.skip_comments(Delimiter::Run).unwrap();
        assert_eq!(src, b"42");
    }

    #[test]
    fn run_mode_rejects_eof() {
        let mut src: &[u8] = b"  \n";
        assert!(matches!(src.skip_comments(Delimiter::Run), Err(ScanError::Eof)));
        let mut src: &[u8] = b" # unterminated";
        assert!(matches!(src.skip_comments(Delimiter::Run), Err(ScanError::Eof)));
    }

    #[test]
    fn single_mode_consumes_one_whitespace() {
        let mut src: &[u8] = b"\n\n\x20\x09";
        src.skip_comments(Delimiter::Single).unwrap();
        assert_eq!(src, b"\n\x20\x09");
    }

    #[test]
    fn single_mode_skips_comment_but_not_following_whitespace() {
        let mut src: &[u8] = b"\n# note\n\x0a\x20";
        src.skip_comments(Delimiter::Single).unwrap();
        assert_eq!(src, b"\x0a\x20");
    }

    #[test]
    fn single_mode_tolerates_eof() {
        let mut src: &[u8] = b"";
        src.skip_comments(Delimiter::Single).unwrap();
        let mut src: &[u8] = b"\n";
        src.skip_comments(Delimiter::Single).unwrap();
        assert!(src.is_empty());
    }

    #[test]
    fn decimal_stops_at_non_digit() {
        let mut src: &[u8] = b"  123abc";
        assert_eq!(src.read_decimal().unwrap(), 123);
        assert_eq!(src, b"abc");
        assert!(matches!(src.read_decimal(), Err(ScanError::NotANumber(b'a'))));
    }

    #[test]
    fn decimal_overflow_and_eof() {
        let mut src: &[u8] = b"99999999999999999999999";
        assert!(matches!(src.read_decimal(), Err(ScanError::Overflow)));
        let mut src: &[u8] = b"   ";
        assert!(matches!(src.read_decimal(), Err(ScanError::Eof)));
    }

    #[test]
    fn word_stops_at_comment() {
        let mut src: &[u8] = b"\nP6#x\n";
        let (word, truncated) = src.read_word(4).unwrap();
        assert_eq!(word, b"P6");
        assert!(!truncated);
        assert_eq!(src, b"#x\n");
    }

    #[test]
    fn fill_reports_short_reads() {
        let mut src: &[u8] = &[1, 2, 3];
        let mut buf = [0u8; 5];
        assert_eq!(src.fill(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }
}
