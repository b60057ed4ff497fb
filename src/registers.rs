//! Register map of the DACx0501 family
//!
//! Every register is 16 bits wide and is transferred MSB first after a single
//! command byte. The typed views below are plain integers with mask-and-shift
//! accessors, converted to and from `u16` with `From`.
use bitfield_struct::bitfield;

/// Lowest I2C address selectable through the ADDR pin
pub const MIN_ADDRESS: u8 = 0x48;
/// Highest I2C address selectable through the ADDR pin
pub const MAX_ADDRESS: u8 = 0x4B;

/// Value of the TRIGGER soft reset field that resets the device
pub const SOFT_RESET_CODE: u8 = 0b1010;

/// Command byte selecting the register addressed by a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// No operation
    Noop = 0x00,
    /// Device identification, read only
    DeviceId = 0x01,
    /// Synchronous update enable
    Sync = 0x02,
    /// Power down control
    Config = 0x03,
    /// Buffer gain and reference divider
    Gain = 0x04,
    /// Soft reset and LDAC trigger
    Trigger = 0x05,
    /// Reference alarm status, read only
    Status = 0x07,
    /// DAC output code
    Dac = 0x08,
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd as u8
    }
}

/// I2C address of the device, selected by strapping the ADDR pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    /// ADDR tied to AGND
    Agnd = 0x48,
    /// ADDR tied to VDD
    Vdd = 0x49,
    /// ADDR tied to SDA
    Sda = 0x4A,
    /// ADDR tied to SCL
    Scl = 0x4B,
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        addr as u8
    }
}

impl TryFrom<u8> for Address {
    /// The rejected address
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x48 => Ok(Self::Agnd),
            0x49 => Ok(Self::Vdd),
            0x4A => Ok(Self::Sda),
            0x4B => Ok(Self::Scl),
            other => Err(other),
        }
    }
}

/// Member of the DACx0501 family as reported by the DEVICE-ID register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Variant {
    /// 16 bit DAC80501
    Dac80501,
    /// 14 bit DAC70501
    Dac70501,
    /// 12 bit DAC60501
    Dac60501,
    /// Unrecognised device id
    Unknown(u8),
}

impl Variant {
    /// Native resolution of the variant, `None` for unknown parts.
    ///
    /// Narrower parts left-align their code in the 16 bit data register, so a
    /// driver running at 16 bits still produces the correct output.
    pub fn resolution_bits(&self) -> Option<u8> {
        match self {
            Variant::Dac80501 => Some(16),
            Variant::Dac70501 => Some(14),
            Variant::Dac60501 => Some(12),
            Variant::Unknown(_) => None,
        }
    }
}

impl From<u8> for Variant {
    fn from(devid: u8) -> Self {
        match devid {
            0 => Self::Dac80501,
            1 => Self::Dac70501,
            2 => Self::Dac60501,
            other => Self::Unknown(other),
        }
    }
}

/// DEVICE-ID register
#[bitfield(u16)]
pub struct DeviceId {
    #[bits(12)]
    _reserved: u16,
    /// Resolution identifier: 0 for 16 bit, 1 for 14 bit, 2 for 12 bit
    #[bits(3)]
    pub devid: u8,
    #[bits(1)]
    _reserved: bool,
}

impl DeviceId {
    /// Decoded family member
    pub fn variant(&self) -> Variant {
        Variant::from(self.devid())
    }
}

/// SYNC register
#[bitfield(u16)]
pub struct SyncMode {
    /// When set the DAC output only updates on an LDAC trigger
    #[bits(1)]
    pub dac_sync_en: bool,
    #[bits(15)]
    _reserved: u16,
}

/// CONFIG register
#[bitfield(u16)]
pub struct Config {
    /// Power down the DAC, the output is pulled to GND through 1 kΩ
    #[bits(1)]
    pub dac_pwdwn: bool,
    #[bits(7)]
    _reserved: u8,
    /// Disable the internal reference
    #[bits(1)]
    pub ref_pwdwn: bool,
    #[bits(7)]
    _reserved: u8,
}

/// GAIN register
#[bitfield(u16)]
pub struct Gain {
    /// Output buffer gain of 2 when set, 1 when cleared
    #[bits(1, default = true)]
    pub buff_gain: bool,
    #[bits(7)]
    _reserved: u8,
    /// Divide the reference by 2 when set
    #[bits(1, default = false)]
    pub ref_div: bool,
    #[bits(7)]
    _reserved: u8,
}

/// TRIGGER register
#[bitfield(u16)]
pub struct Trigger {
    /// Writing [`SOFT_RESET_CODE`] resets the device
    #[bits(4)]
    pub soft_reset: u8,
    /// Load the pending DAC code into the output
    #[bits(1)]
    pub ldac: bool,
    #[bits(11)]
    _reserved: u16,
}

/// STATUS register
#[bitfield(u16)]
pub struct Status {
    /// Set while the reference headroom to VDD is too small
    #[bits(1)]
    pub ref_alarm: bool,
    #[bits(15)]
    _reserved: u16,
}

/// Build the three byte write frame for `cmd`
pub(crate) fn frame(cmd: Command, value: u16) -> [u8; 3] {
    let [hi, lo] = value.to_be_bytes();
    [u8::from(cmd), hi, lo]
}

/// Reassemble a register value received MSB first
pub(crate) fn decode(rx: [u8; 2]) -> u16 {
    u16::from_be_bytes(rx)
}
