//! DACx0501 driver, generated as blocking [`Dacx0501`](crate::Dacx0501) and
//! async [`Dacx0501Async`](crate::Dacx0501Async) from one implementation
#[cfg(feature = "sync")]
use embedded_hal::i2c::I2c;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::I2c as AsyncI2c;

use crate::registers::{
    self, Address, Command, Config, DeviceId, Gain, Status, SyncMode, Trigger, Variant,
    SOFT_RESET_CODE,
};
use crate::{BufferGain, DeviceState, Error, ReferenceDivider};

/// DACx0501 on the I2C bus `I2C`
#[maybe_async_cfg::maybe(
    sync(feature = "sync", self = "Dacx0501"),
    async(feature = "async", keep_self)
)]
#[derive(Debug)]
pub struct Dacx0501Async<I2C> {
    i2c: I2C,
    address: u8,
    state: DeviceState,
}

#[maybe_async_cfg::maybe(
    sync(feature = "sync", self = "Dacx0501", idents(AsyncI2c(sync = "I2c"))),
    async(feature = "async", keep_self)
)]
impl<I2C, E> Dacx0501Async<I2C>
where
    I2C: AsyncI2c<Error = E>,
{
    /// Create a driver for the DAC at `address`, assuming power-on defaults.
    /// No bus traffic happens until `init` or another command.
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self::with_state(i2c, address, DeviceState::new())
    }

    /// Create a driver with a custom initial state, e.g. a known external
    /// reference or a narrower resolution
    pub fn with_state(i2c: I2C, address: Address, state: DeviceState) -> Self {
        Self {
            i2c,
            address: address.into(),
            state,
        }
    }

    /// Switch to the external reference and soft reset the device
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        self.shut_down_ref(true).await?;
        self.reset().await
    }

    /// Soft reset the device.
    ///
    /// Gain and divider return to their defaults. When running on the external
    /// reference the internal one is powered down again afterwards.
    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        let trig = Trigger::new().with_soft_reset(SOFT_RESET_CODE);
        self.write_register(Command::Trigger, trig.into()).await?;
        self.state.reset_gain();
        debug!("soft reset");

        if !self.state.using_internal_reference() {
            self.shut_down_ref(true).await?;
        }
        Ok(())
    }

    /// Set the output buffer gain to 1 or 2.
    ///
    /// Any other value is ignored without touching the bus and without
    /// reporting an error. Read back [`Command::Gain`] to verify.
    pub async fn set_buffer_gain(&mut self, gain: u8) -> Result<(), Error<E>> {
        let gain = match BufferGain::try_from(gain) {
            Ok(gain) => gain,
            Err(ignored) => {
                debug!("ignoring buffer gain {}", ignored);
                return Ok(());
            }
        };
        let reg = Gain::from(self.read_register(Command::Gain).await?)
            .with_buff_gain(gain == BufferGain::X2);
        self.write_register(Command::Gain, reg.into()).await?;
        self.state.set_buffer_gain(gain);
        Ok(())
    }

    /// Set the reference divider to 1 or 2.
    ///
    /// Any other value is ignored without touching the bus and without
    /// reporting an error. Read back [`Command::Gain`] to verify.
    pub async fn set_reference_divider(&mut self, div: u8) -> Result<(), Error<E>> {
        let div = match ReferenceDivider::try_from(div) {
            Ok(div) => div,
            Err(ignored) => {
                debug!("ignoring reference divider {}", ignored);
                return Ok(());
            }
        };
        let reg = Gain::from(self.read_register(Command::Gain).await?)
            .with_ref_div(div == ReferenceDivider::Div2);
        self.write_register(Command::Gain, reg.into()).await?;
        self.state.set_reference_divider(div);
        Ok(())
    }

    /// Set the actual voltage present at the reference input. This only
    /// affects the conversion, nothing is sent to the device.
    pub fn set_reference_voltage(&mut self, volts: f32) {
        self.state.set_reference_voltage(volts);
    }

    /// Load a pending DAC code into the output (LDAC)
    pub async fn trigger_update(&mut self) -> Result<(), Error<E>> {
        let trig = Trigger::new().with_ldac(true);
        self.write_register(Command::Trigger, trig.into()).await
    }

    /// When enabled, written codes only reach the output after
    /// `trigger_update`
    pub async fn set_synchronous_update(&mut self, enabled: bool) -> Result<(), Error<E>> {
        let sync = SyncMode::new().with_dac_sync_en(enabled);
        self.write_register(Command::Sync, sync.into()).await
    }

    /// Set the output voltage, clamped to `0..=full_scale`
    pub async fn set_voltage(&mut self, volts: f32) -> Result<(), Error<E>> {
        let code = self.state.voltage_to_code(volts);
        self.set_dac_code(code).await
    }

    /// Write a raw left-aligned code to the DAC data register
    pub async fn set_dac_code(&mut self, code: u16) -> Result<(), Error<E>> {
        self.write_register(Command::Dac, code).await
    }

    /// Read the code in the DAC data register
    pub async fn dac_code(&mut self) -> Result<u16, Error<E>> {
        self.read_register(Command::Dac).await
    }

    /// Output voltage derived from the DAC data register
    pub async fn voltage(&mut self) -> Result<f32, Error<E>> {
        let code = self.dac_code().await?;
        Ok(self.state.code_to_voltage(code))
    }

    /// Power the DAC down (`true`) or up (`false`)
    pub async fn shut_down_dac(&mut self, power_down: bool) -> Result<(), Error<E>> {
        let cfg = Config::from(self.read_register(Command::Config).await?)
            .with_dac_pwdwn(power_down);
        self.write_register(Command::Config, cfg.into()).await
    }

    /// Power the internal reference down (`true`) or up (`false`)
    pub async fn shut_down_ref(&mut self, power_down: bool) -> Result<(), Error<E>> {
        let cfg = Config::from(self.read_register(Command::Config).await?)
            .with_ref_pwdwn(power_down);
        self.write_register(Command::Config, cfg.into()).await?;
        self.state.set_using_internal_reference(!power_down);
        debug!("internal reference enabled: {}", !power_down);
        Ok(())
    }

    /// Power down both the DAC and the internal reference.
    ///
    /// The tracked reference source is left as it was, so a later `reset`
    /// still restores the reference configuration in use before.
    pub async fn shut_down_all(&mut self) -> Result<(), Error<E>> {
        let cfg = Config::new().with_dac_pwdwn(true).with_ref_pwdwn(true);
        self.write_register(Command::Config, cfg.into()).await
    }

    /// Raw content of the DEVICE-ID register
    pub async fn device_id(&mut self) -> Result<u16, Error<E>> {
        self.read_register(Command::DeviceId).await
    }

    /// Family member reported by the device
    pub async fn variant(&mut self) -> Result<Variant, Error<E>> {
        Ok(DeviceId::from(self.device_id().await?).variant())
    }

    /// True when the reference headroom to VDD is insufficient and the
    /// output has been forced to 0V
    pub async fn reference_alarm(&mut self) -> Result<bool, Error<E>> {
        Ok(Status::from(self.read_register(Command::Status).await?).ref_alarm())
    }

    /// Configuration tracked by the driver
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Write the full 16 bit `value` to the register selected by `cmd`
    pub async fn write_register(&mut self, cmd: Command, value: u16) -> Result<(), Error<E>> {
        trace!("W {:#x} = {:#x}", u8::from(cmd), value);
        self.i2c
            .write(self.address, &registers::frame(cmd, value))
            .await
            .map_err(Error::I2c)
    }

    /// Read the register selected by `cmd` using a repeated start
    pub async fn read_register(&mut self, cmd: Command) -> Result<u16, Error<E>> {
        let mut rx = [0x00; 2];
        self.i2c
            .write_read(self.address, &[u8::from(cmd)], &mut rx)
            .await
            .map_err(Error::I2c)?;
        let value = registers::decode(rx);
        trace!("R {:#x} = {:#x}", u8::from(cmd), value);
        Ok(value)
    }

    /// Destroy the driver and return the I2C bus
    pub fn destroy(self) -> I2C {
        self.i2c
    }
}
