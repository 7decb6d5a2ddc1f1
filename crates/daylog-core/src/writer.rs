//! `tracing-subscriber` integration: back a subscriber with the sink.
//!
//! The formatting layer renders each event to one framed buffer, which
//! arrives here as a single record. Failures stay inside the sink: the
//! logging pipeline never sees an error from its own sink.

use std::io;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::MakeWriter;

use crate::sink::FileSink;

/// Cheap clonable handle that lets a `fmt` layer write through a shared
/// [`FileSink`].
#[derive(Clone)]
pub struct SinkMakeWriter {
    sink: Arc<FileSink>,
}

impl SinkMakeWriter {
    pub fn new(sink: Arc<FileSink>) -> Self {
        Self { sink }
    }
}

impl<'a> MakeWriter<'a> for SinkMakeWriter {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter {
            sink: Arc::clone(&self.sink),
        }
    }
}

/// Forwards each formatted event to the sink as one record.
pub struct SinkWriter {
    sink: Arc<FileSink>,
}

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
