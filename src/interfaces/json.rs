use crate::domain::payment::PaymentResponse;
use crate::error::Result;
use std::io::Write;

/// Writes one JSON document per response, newline separated.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(&mut self, response: &PaymentResponse) -> Result<()> {
        serde_json::to_writer(&mut self.writer, response).map_err(std::io::Error::from)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
