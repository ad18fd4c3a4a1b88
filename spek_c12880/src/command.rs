/// Package that can be sent to the spectrometer
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Command {
    SetIntegrationTime(i32),
}

/// Control byte opening every outbound package
const CONTROL_BYTE: u8 = 0x1F;
/// Carriage return tail, firmware ignores packages without it
const TAIL_BYTE: u8 = 0x0D;

/// Timer calibration: requested time minus a fixed setup offset, divided by
/// the length of one internal timer period
const INTEGRATION_TIME_OFFSET: f64 = 192.0;
const TIMER_PERIOD: f64 = 0.033;

impl Command {
    /// Convert requested integration time into a count of device timer
    /// periods. No range validation happens here, the device itself is the
    /// only authority on which values it tolerates.
    fn timer_periods(&self) -> i32 {
        use Command::*;
        match *self {
            SetIntegrationTime(t) => {
                ((t as f64 - INTEGRATION_TIME_OFFSET) / TIMER_PERIOD).round() as i32
            }
        }
    }

    pub fn encode(&self) -> [u8; 6] {
        let [b3, b2, b1, b0] = self.timer_periods().to_be_bytes();
        [CONTROL_BYTE, b3, b2, b1, b0, TAIL_BYTE]
    }
}
