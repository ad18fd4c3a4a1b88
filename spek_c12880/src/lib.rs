//! Protocol implementation for 288 pixel spectrometers running the SpekView
//! serial firmware. Inbound, the device announces each reading with a
//! `"!spek!"` marker line and follows it with 576 bytes of big-endian
//! samples. Outbound, the only package is a 6 byte integration time command.
//!
//! [`SpekCodec`] plugs into `tokio_util`'s `Framed` for async transports,
//! [`Spectrometer`] wraps any blocking `Read + Write` serial handle.

pub mod codec;
pub mod command;
pub mod error;
pub mod session;
pub mod types;

pub use codec::SpekCodec;
pub use command::Command;
pub use error::{Error, Result};
pub use session::Spectrometer;
pub use types::{Spectrum, MARKER_LINE, PAYLOAD_SIZE, SPECTRUM_PIXEL_COUNT};
