//! Voltage to code conversion
//!
//! The output of the DAC follows
//!
//! ```text
//! VOUT = CODE / 2^N * VREF / DIV * GAIN
//! ```
//!
//! where `N` is the resolution, `DIV` the reference divider and `GAIN` the
//! output buffer gain. [`DeviceState`] tracks these parameters for one chip and
//! maps between volts and codes in both directions.

/// Reference voltage assumed until the application sets the real one
pub const DEFAULT_REFERENCE_VOLTAGE: f32 = 2.5;

/// Output buffer gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum BufferGain {
    /// Gain of 1
    X1,
    /// Gain of 2 (reset default)
    #[default]
    X2,
}

impl BufferGain {
    /// Multiplication factor applied by the buffer
    pub fn factor(&self) -> u8 {
        match self {
            BufferGain::X1 => 1,
            BufferGain::X2 => 2,
        }
    }
}

impl TryFrom<u8> for BufferGain {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            other => Err(other),
        }
    }
}

/// Reference divider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ReferenceDivider {
    /// Reference used as is (reset default)
    #[default]
    Div1,
    /// Reference halved
    Div2,
}

impl ReferenceDivider {
    /// Division factor applied to the reference
    pub fn factor(&self) -> u8 {
        match self {
            ReferenceDivider::Div1 => 1,
            ReferenceDivider::Div2 => 2,
        }
    }
}

impl TryFrom<u8> for ReferenceDivider {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Div1),
            2 => Ok(Self::Div2),
            other => Err(other),
        }
    }
}

/// Configuration of a single chip as far as the driver knows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceState {
    reference_voltage: f32,
    buffer_gain: BufferGain,
    reference_divider: ReferenceDivider,
    using_internal_reference: bool,
    resolution_bits: u8,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    /// State of a freshly powered 16 bit device with a 2.5V reference
    pub const fn new() -> Self {
        Self {
            reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
            buffer_gain: BufferGain::X2,
            reference_divider: ReferenceDivider::Div1,
            using_internal_reference: true,
            resolution_bits: 16,
        }
    }

    /// State for a narrower code path. `bits` is limited to `1..=16`, codes
    /// are left-aligned in the 16 bit data register.
    pub fn with_resolution(bits: u8) -> Self {
        Self {
            resolution_bits: bits.clamp(1, 16),
            ..Self::new()
        }
    }

    /// Voltage at the reference input
    pub fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    /// Current output buffer gain
    pub fn buffer_gain(&self) -> BufferGain {
        self.buffer_gain
    }

    /// Current reference divider
    pub fn reference_divider(&self) -> ReferenceDivider {
        self.reference_divider
    }

    /// Whether the on-chip reference is powered
    pub fn using_internal_reference(&self) -> bool {
        self.using_internal_reference
    }

    /// Number of significant code bits
    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    /// Set the reference voltage used for conversions.
    ///
    /// A non-positive reference is not rejected; conversions with it follow
    /// IEEE-754 arithmetic and produce meaningless codes.
    pub fn set_reference_voltage(&mut self, volts: f32) {
        self.reference_voltage = volts;
    }

    pub(crate) fn set_buffer_gain(&mut self, gain: BufferGain) {
        self.buffer_gain = gain;
    }

    pub(crate) fn set_reference_divider(&mut self, div: ReferenceDivider) {
        self.reference_divider = div;
    }

    pub(crate) fn set_using_internal_reference(&mut self, internal: bool) {
        self.using_internal_reference = internal;
    }

    /// Restore gain and divider to their reset values
    pub(crate) fn reset_gain(&mut self) {
        self.buffer_gain = BufferGain::default();
        self.reference_divider = ReferenceDivider::default();
    }

    /// Highest output voltage, `VREF * GAIN / DIV`
    pub fn full_scale(&self) -> f32 {
        self.reference_voltage * f32::from(self.buffer_gain.factor())
            / f32::from(self.reference_divider.factor())
    }

    fn steps(&self) -> f32 {
        (1u32 << self.resolution_bits) as f32
    }

    fn max_code(&self) -> u32 {
        (1u32 << self.resolution_bits) - 1
    }

    fn alignment(&self) -> u8 {
        16 - self.resolution_bits
    }

    /// Convert a voltage to the code for the DAC data register.
    ///
    /// The voltage is clamped to `[0, full_scale]` and rounded half-up. The
    /// result is limited to `2^N - 1` and left-aligned in 16 bits.
    pub fn voltage_to_code(&self, volts: f32) -> u16 {
        let full_scale = self.full_scale();
        let volts = if volts <= 0.0 {
            0.0
        } else if volts >= full_scale {
            full_scale
        } else {
            volts
        };

        let gain = f32::from(self.buffer_gain.factor());
        let div = f32::from(self.reference_divider.factor());
        // float to int casts saturate, NaN ends up as 0
        let code = (volts * self.steps() * div / self.reference_voltage / gain + 0.5) as u32;
        let code = code.min(self.max_code());

        (code as u16) << self.alignment()
    }

    /// Convert a code read from the DAC data register back to volts
    pub fn code_to_voltage(&self, code: u16) -> f32 {
        let code = code >> self.alignment();
        f32::from(code) / self.steps() * self.reference_voltage
            / f32::from(self.reference_divider.factor())
            * f32::from(self.buffer_gain.factor())
    }
}
