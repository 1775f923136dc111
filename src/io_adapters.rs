use std::cell::RefCell;
use std::io::{Result as IoResult, Write};
use std::rc::Rc;

/// In-memory writer whose contents stay readable after it was handed away.
///
/// Useful to capture everything a dispatcher prints, e.g. when driving it
/// with scripted keys.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    /// Drops everything written so far.
    pub fn clear(&self) {
        self.buf.borrow_mut().clear();
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let writer = MemWriter::new();
        let mut handed_out = writer.clone();
        write!(handed_out, "hello {}", 42).unwrap();
        assert_eq!(writer.contents(), "hello 42");

        writer.clear();
        assert_eq!(writer.contents(), "");

        handed_out.write_all("é".as_bytes()).unwrap();
        handed_out.write_all(&[0xff]).unwrap();
        assert_eq!(writer.contents(), "é\u{fffd}");
    }
}
