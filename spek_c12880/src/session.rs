use crate::{
    codec::SpekCodec,
    command::Command,
    error::Result,
    types::{Spectrum, PAYLOAD_SIZE},
};
use bytes::BytesMut;
use std::io::{Read, Write};
use tokio_util::codec::Decoder;

const READ_CHUNK_SIZE: usize = 256;

/// Blocking session over one serial connection.
///
/// Owns the transport along with all partial-line and partial-payload state,
/// construct one per connection and drop it on disconnect. Dropping mid-frame
/// is safe at any point, the accumulated bytes are plain memory.
pub struct Spectrometer<IO>
where
    IO: Read + Write,
{
    io: IO,
    codec: SpekCodec,
    buf: BytesMut,
}

impl<IO> Spectrometer<IO>
where
    IO: Read + Write,
{
    pub fn new(io: IO) -> Self {
        Spectrometer {
            io,
            codec: SpekCodec::new(),
            buf: BytesMut::with_capacity(PAYLOAD_SIZE * 2),
        }
    }

    fn fill_buffer(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let read_bytes = self.io.read(&mut chunk)?;
        self.buf.extend_from_slice(&chunk[..read_bytes]);
        Ok(())
    }

    /// Blocks until the device announces and delivers one full spectrum.
    /// The protocol has no timeouts, so a device that goes quiet mid-payload
    /// only surfaces through the transport's own read timeout.
    pub fn read_spectrum(&mut self) -> Result<Spectrum> {
        loop {
            if let Some(spectrum) = self.codec.decode(&mut self.buf)? {
                return Ok(spectrum);
            }
            self.fill_buffer()?;
        }
    }

    /// Fills the whole slice with consecutive spectra, in arrival order
    pub fn read_spectra(&mut self, buf: &mut [Spectrum]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_spectrum()?;
        }
        Ok(())
    }

    /// Requests a new integration time. Fire-and-forget, the protocol has no
    /// acknowledgment for commands.
    pub fn set_integration_time(&mut self, integration_time: i32) -> Result<()> {
        let frame = Command::SetIntegrationTime(integration_time).encode();
        log::debug!("Sending integration time package: {:02X?}", frame);
        self.io.write_all(&frame)?;
        Ok(())
    }
}
