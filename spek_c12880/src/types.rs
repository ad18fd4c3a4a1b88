/// Amount of effective pixels in a single spectrum
pub const SPECTRUM_PIXEL_COUNT: usize = 288;

/// Each pixel arrives as two bytes, high byte first
pub const PAYLOAD_SIZE: usize = SPECTRUM_PIXEL_COUNT * 2;

/// ASCII line announcing that a payload follows, terminator included.
/// Anything else on the line channel is telemetry and gets dropped.
pub const MARKER_LINE: &[u8] = b"!spek!\n";

/// Decoded intensity readings, index = pixel position
pub type Spectrum = [u16; SPECTRUM_PIXEL_COUNT];
