//! Serial console sink.
//!
//! The rendering code writes through `ufmt::uWrite`; HAL serial ports
//! implement `core::fmt::Write`. `FmtConsole` bridges the two and turns every
//! `\n` into the `\r\n` a serial terminal expects.

use core::fmt;

use ufmt::uWrite;

pub struct FmtConsole<W> {
    inner: W,
}

impl<W: fmt::Write> FmtConsole<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: fmt::Write> uWrite for FmtConsole<W> {
    type Error = fmt::Error;

    fn write_str(&mut self, s: &str) -> Result<(), fmt::Error> {
        let mut lines = s.split('\n');
        if let Some(first) = lines.next() {
            self.inner.write_str(first)?;
        }
        for line in lines {
            self.inner.write_str("\r\n")?;
            self.inner.write_str(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;
    use crate::rendering::render_reading;

    #[test]
    fn expands_line_feeds() {
        let mut console = FmtConsole::new(heapless::String::<64>::new());
        console.write_str("one\ntwo\n").unwrap();
        console.write_str("three").unwrap();
        assert_eq!(console.inner().as_str(), "one\r\ntwo\r\nthree");
    }

    #[test]
    fn carries_a_full_report() {
        let mut console = FmtConsole::new(heapless::String::<256>::new());
        render_reading(&Reading::new(23.45, 60.2).unwrap(), &mut console).unwrap();
        let text = console.into_inner();
        assert!(text.contains("Temperature : 23.4 °C\r\n"));
        assert!(text.ends_with("------------------------------------\r\n"));
    }

    #[test]
    fn reports_a_full_sink() {
        let mut console = FmtConsole::new(heapless::String::<4>::new());
        assert_eq!(console.write_str("too long"), Err(fmt::Error));
    }
}
