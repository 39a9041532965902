use std::io;

/// The interpreter's side channel to the outside world: an output stream
/// and nothing else.
pub trait Context {
    fn output(&mut self) -> &mut dyn io::Write;
}

/// Context over any writer; the driver wires this to stdout.
pub struct StreamContext<'a> {
    output: &'a mut dyn io::Write,
}

impl<'a> StreamContext<'a> {
    pub fn new(output: &'a mut dyn io::Write) -> Self {
        Self { output }
    }
}

impl Context for StreamContext<'_> {
    fn output(&mut self) -> &mut dyn io::Write {
        self.output
    }
}

/// Context that captures program output in memory, for tests.
#[derive(Default)]
pub struct CaptureContext {
    buffer: Vec<u8>,
}

impl CaptureContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }
}

impl Context for CaptureContext {
    fn output(&mut self) -> &mut dyn io::Write {
        &mut self.buffer
    }
}
