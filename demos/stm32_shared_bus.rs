#![no_main]
#![no_std]

// Setting up entry vector/panic handler and logging
use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_probe as _;
// Imports for the shared bus
use core::cell::RefCell;
use embedded_hal_bus::i2c::RefCellDevice;
// Hal imports
use hal::i2c::I2c;
use hal::prelude::*;
use stm32f4xx_hal as hal;

use dacx0501::{Address, Dacx0501};

#[entry]
fn main() -> ! {
    // Take peripherals and set up the clocks.
    let p = hal::pac::Peripherals::take().unwrap();
    let pc = cortex_m::Peripherals::take().unwrap();
    let rcc = p.RCC.constrain();
    let ccdr = rcc.cfgr.freeze();
    // Create a SysTick based delay
    let mut delay = cortex_m::delay::Delay::new(pc.SYST, ccdr.sysclk().raw());
    // Two DACs share I2C1, one with ADDR tied to AGND and one tied to VDD
    let gpiob = p.GPIOB.split();
    let i2c1 = I2c::new(p.I2C1, (gpiob.pb8, gpiob.pb9), 400.kHz(), &ccdr);
    // I2C Bus creation using embedded-hal-bus
    let i2c_bus = RefCell::new(i2c1);

    let mut dac_a = Dacx0501::new(RefCellDevice::new(&i2c_bus), Address::Agnd);
    let mut dac_b = Dacx0501::new(RefCellDevice::new(&i2c_bus), Address::Vdd);

    // Both boards use an external 2.048V reference
    for dac in [&mut dac_a, &mut dac_b] {
        dac.init().unwrap();
        dac.set_reference_voltage(2.048);
        dac.set_synchronous_update(true).unwrap();
    }
    defmt::info!("DAC A is a {}", dac_a.variant().unwrap());

    let mut volts: f32 = 0.0;
    loop {
        // Output a stepped voltage, B mirrors A
        delay.delay_ms(250);
        dac_a.set_voltage(volts).unwrap();
        dac_b.set_voltage(dac_a.state().full_scale() - volts).unwrap();
        dac_a.trigger_update().unwrap();
        dac_b.trigger_update().unwrap();
        volts += 0.25;
        if volts > dac_a.state().full_scale() {
            volts = 0.0;
        }
    }
}
