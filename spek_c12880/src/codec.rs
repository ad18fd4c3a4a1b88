use crate::{
    command::Command,
    error::Error,
    types::{Spectrum, MARKER_LINE, PAYLOAD_SIZE},
};
use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Codec for the SpekView serial stream.
///
/// The inbound stream mixes two framing disciplines: newline-terminated
/// telemetry lines, and a fixed 576 byte binary payload announced by the
/// `"!spek!"` marker line. The codec tracks which discipline currently
/// applies, so payload bytes are never consumed before all of them arrived
/// and line scanning never eats into a payload.
#[derive(Debug, Default)]
pub struct SpekCodec {
    state: DecodeState,
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
enum DecodeState {
    #[default]
    AwaitingMarker,
    AwaitingPayload,
}

impl SpekCodec {
    pub fn new() -> Self {
        SpekCodec::default()
    }
}

fn pair_u8_to_u16(upper: u8, lower: u8) -> u16 {
    ((upper as u16) << 8) | (lower as u16)
}

impl Decoder for SpekCodec {
    type Item = Spectrum;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while self.state == DecodeState::AwaitingMarker {
            // A line only counts once its terminator arrived, a partial line
            // stays in the buffer for the next call
            let Some(idx) = src.iter().position(|b| *b == b'\n') else {
                return Ok(None);
            };
            let is_marker = src[..=idx] == *MARKER_LINE;
            src.advance(idx + 1);
            if is_marker {
                self.state = DecodeState::AwaitingPayload;
            } else {
                log::trace!("Discarded a non-marker line of {} bytes", idx + 1);
            }
        }

        if src.len() < PAYLOAD_SIZE {
            if src.capacity() < PAYLOAD_SIZE {
                // Preallocate space for the rest of the payload
                src.reserve(PAYLOAD_SIZE - src.len());
            }
            return Ok(None);
        }

        // Wire bytes are unsigned, widen them as such so a set high bit in
        // the low byte cannot sign-extend into the sample
        let spectrum: Spectrum = src[..PAYLOAD_SIZE]
            .chunks_exact(2)
            .map(|b| pair_u8_to_u16(b[0], b[1]))
            .collect::<Vec<u16>>()
            .try_into()
            .unwrap();
        src.advance(PAYLOAD_SIZE);
        self.state = DecodeState::AwaitingMarker;
        Ok(Some(spectrum))
    }
}

impl Encoder<Command> for SpekCodec {
    type Error = Error;

    fn encode(&mut self, cmd: Command, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.extend_from_slice(&cmd.encode());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SPECTRUM_PIXEL_COUNT;

    fn payload_for(spectrum: &Spectrum) -> Vec<u8> {
        spectrum.iter().flat_map(|s| s.to_be_bytes()).collect()
    }

    #[test]
    fn marker_after_noise_line() {
        let mut codec = SpekCodec::new();
        let mut src = BytesMut::new();
        src.extend_from_slice(b"junk\n!spek!\n");
        src.extend_from_slice(&[0x01, 0x02]);
        src.extend_from_slice(&[0u8; PAYLOAD_SIZE - 2]);

        let spectrum = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(spectrum[0], 258);
        assert_eq!(spectrum[1..], [0u16; SPECTRUM_PIXEL_COUNT - 1]);
        assert!(src.is_empty());
    }

    #[test]
    fn near_miss_lines_never_arm_payload() {
        for line in [&b"!spek\n"[..], b"!spek!!\n", b"\n", b"!SPEK!\n"] {
            let mut codec = SpekCodec::new();
            let mut src = BytesMut::new();
            src.extend_from_slice(line);
            // No newline in here, so in marker mode this all just sits
            src.extend_from_slice(&[0xAAu8; PAYLOAD_SIZE]);

            assert_eq!(codec.decode(&mut src).unwrap(), None);
            assert_eq!(src.len(), PAYLOAD_SIZE);
        }
    }

    #[test]
    fn partial_payload_is_held_back() {
        let mut expected = [0u16; SPECTRUM_PIXEL_COUNT];
        for (i, sample) in expected.iter_mut().enumerate() {
            *sample = (i * 227) as u16;
        }
        let payload = payload_for(&expected);

        let mut codec = SpekCodec::new();
        let mut src = BytesMut::new();
        src.extend_from_slice(MARKER_LINE);
        src.extend_from_slice(&payload[..300]);
        assert_eq!(codec.decode(&mut src).unwrap(), None);
        // Nothing of the payload may be consumed yet
        assert_eq!(src.len(), 300);

        src.extend_from_slice(&payload[300..]);
        let spectrum = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(spectrum, expected);
    }

    #[test]
    fn byte_at_a_time_matches_bulk_feed() {
        let mut expected = [0u16; SPECTRUM_PIXEL_COUNT];
        for (i, sample) in expected.iter_mut().enumerate() {
            *sample = (i * 131 + 7) as u16;
        }

        let mut stream = Vec::new();
        stream.extend_from_slice(b"booting\n");
        stream.extend_from_slice(MARKER_LINE);
        stream.extend_from_slice(&payload_for(&expected));

        let mut codec = SpekCodec::new();
        let mut src = BytesMut::new();
        let mut decoded = Vec::new();
        for byte in &stream {
            src.extend_from_slice(&[*byte]);
            if let Some(spectrum) = codec.decode(&mut src).unwrap() {
                decoded.push(spectrum);
            }
        }

        assert_eq!(decoded, vec![expected]);
    }

    #[test]
    fn back_to_back_sequences_in_one_buffer() {
        let first = [0x0102u16; SPECTRUM_PIXEL_COUNT];
        let second = [0xFFEEu16; SPECTRUM_PIXEL_COUNT];

        let mut src = BytesMut::new();
        for spectrum in [&first, &second] {
            src.extend_from_slice(MARKER_LINE);
            src.extend_from_slice(&payload_for(spectrum));
        }

        let mut codec = SpekCodec::new();
        assert_eq!(codec.decode(&mut src).unwrap(), Some(first));
        assert_eq!(codec.decode(&mut src).unwrap(), Some(second));
        assert_eq!(codec.decode(&mut src).unwrap(), None);
    }

    #[test]
    fn high_bits_do_not_sign_extend() {
        let mut codec = SpekCodec::new();
        let mut src = BytesMut::new();
        src.extend_from_slice(MARKER_LINE);
        // High bit set in both halves of every sample
        src.extend_from_slice(&[0x80u8; PAYLOAD_SIZE]);

        let spectrum = codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(spectrum, [0x8080u16; SPECTRUM_PIXEL_COUNT]);
    }

    #[test]
    fn encoder_writes_command_frame() {
        let mut codec = SpekCodec::new();
        let mut dst = BytesMut::new();

        codec
            .encode(Command::SetIntegrationTime(225), &mut dst)
            .unwrap();

        assert_eq!(&dst[..], &[0x1F, 0x00, 0x00, 0x03, 0xE8, 0x0D]);
    }
}
