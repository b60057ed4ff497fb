use dacx0501::{Address, BufferGain, Dacx0501, DeviceState, Error, ReferenceDivider, Variant};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as MockI2c, Transaction as MockTransaction};

const ADDR: u8 = 0x48;

#[test]
fn write_dac_code() {
    let trans = [MockTransaction::write(ADDR, vec![0x08, 0x12, 0x34])];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.set_dac_code(0x1234).unwrap();
    dac.destroy().done();
}

#[test]
fn set_voltage_scenario() {
    let trans = [
        MockTransaction::write(0x4B, vec![0x08, 0x80, 0x00]),
        MockTransaction::write(0x4B, vec![0x08, 0xFF, 0xFF]),
        MockTransaction::write(0x4B, vec![0x08, 0x00, 0x00]),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Scl);
    dac.set_voltage(2.5).unwrap();
    dac.set_voltage(5.0).unwrap();
    dac.set_voltage(-1.0).unwrap();
    dac.destroy().done();
}

#[test]
fn read_back_voltage() {
    let trans = [MockTransaction::write_read(
        ADDR,
        vec![0x08],
        vec![0x40, 0x00],
    )];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    assert_eq!(dac.voltage().unwrap(), 1.25);
    dac.destroy().done();
}

#[test]
fn init_sequence() {
    let trans = [
        // shut_down_ref(true): read-modify-write of CONFIG
        MockTransaction::write_read(ADDR, vec![0x03], vec![0x00, 0x00]),
        MockTransaction::write(ADDR, vec![0x03, 0x01, 0x00]),
        // soft reset
        MockTransaction::write(ADDR, vec![0x05, 0x00, 0x0A]),
        // reset brings the internal reference back, power it down again
        MockTransaction::write_read(ADDR, vec![0x03], vec![0x00, 0x00]),
        MockTransaction::write(ADDR, vec![0x03, 0x01, 0x00]),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.init().unwrap();
    assert!(!dac.state().using_internal_reference());
    dac.destroy().done();
}

#[test]
fn reset_restores_gain_defaults() {
    let trans = [
        MockTransaction::write_read(ADDR, vec![0x04], vec![0x00, 0x01]),
        MockTransaction::write(ADDR, vec![0x04, 0x00, 0x00]),
        MockTransaction::write_read(ADDR, vec![0x04], vec![0x00, 0x00]),
        MockTransaction::write(ADDR, vec![0x04, 0x01, 0x00]),
        MockTransaction::write(ADDR, vec![0x05, 0x00, 0x0A]),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.set_buffer_gain(1).unwrap();
    dac.set_reference_divider(2).unwrap();
    assert_eq!(dac.state().buffer_gain(), BufferGain::X1);
    assert_eq!(dac.state().reference_divider(), ReferenceDivider::Div2);

    // internal reference still in use, no CONFIG traffic after the reset
    dac.reset().unwrap();
    assert_eq!(dac.state().buffer_gain(), BufferGain::X2);
    assert_eq!(dac.state().reference_divider(), ReferenceDivider::Div1);
    dac.destroy().done();
}

#[test]
fn invalid_gain_and_divider_are_ignored() {
    let i2c = MockI2c::new(&[]);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.set_buffer_gain(0).unwrap();
    dac.set_buffer_gain(3).unwrap();
    dac.set_reference_divider(4).unwrap();
    assert_eq!(dac.state().buffer_gain(), BufferGain::X2);
    assert_eq!(dac.state().reference_divider(), ReferenceDivider::Div1);
    dac.destroy().done();
}

#[test]
fn gain_write_preserves_other_fields() {
    let trans = [
        MockTransaction::write_read(ADDR, vec![0x04], vec![0x01, 0x01]),
        MockTransaction::write(ADDR, vec![0x04, 0x01, 0x00]),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.set_buffer_gain(1).unwrap();
    assert_eq!(dac.state().full_scale(), 2.5);
    dac.destroy().done();
}

#[test]
fn power_control() {
    let trans = [
        MockTransaction::write_read(ADDR, vec![0x03], vec![0x01, 0x00]),
        MockTransaction::write(ADDR, vec![0x03, 0x01, 0x01]),
        MockTransaction::write_read(ADDR, vec![0x03], vec![0x01, 0x01]),
        MockTransaction::write(ADDR, vec![0x03, 0x00, 0x01]),
        MockTransaction::write(ADDR, vec![0x03, 0x01, 0x01]),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.shut_down_dac(true).unwrap();
    dac.shut_down_ref(false).unwrap();
    assert!(dac.state().using_internal_reference());
    // single write, no read-modify-write
    dac.shut_down_all().unwrap();
    // the tracked reference source survives a full shut down
    assert!(dac.state().using_internal_reference());
    dac.destroy().done();
}

#[test]
fn synchronous_update_and_trigger() {
    let trans = [
        MockTransaction::write(ADDR, vec![0x02, 0x00, 0x01]),
        MockTransaction::write(ADDR, vec![0x08, 0xFF, 0xFF]),
        MockTransaction::write(ADDR, vec![0x05, 0x00, 0x10]),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.set_synchronous_update(true).unwrap();
    dac.set_voltage(6.0).unwrap();
    dac.trigger_update().unwrap();
    dac.destroy().done();
}

#[test]
fn identification_and_status() {
    let trans = [
        MockTransaction::write_read(0x49, vec![0x01], vec![0x11, 0x15]),
        MockTransaction::write_read(0x49, vec![0x01], vec![0x21, 0x15]),
        MockTransaction::write_read(0x49, vec![0x07], vec![0x00, 0x01]),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Vdd);
    assert_eq!(dac.device_id().unwrap(), 0x1115);
    assert_eq!(dac.variant().unwrap(), Variant::Dac60501);
    assert!(dac.reference_alarm().unwrap());
    dac.destroy().done();
}

#[test]
fn narrow_resolution_state() {
    let trans = [MockTransaction::write(ADDR, vec![0x08, 0xFF, 0xF0])];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::with_state(i2c, Address::Agnd, DeviceState::with_resolution(12));
    dac.set_voltage(5.0).unwrap();
    dac.destroy().done();
}

#[test]
fn reference_voltage_is_local() {
    let trans = [MockTransaction::write(ADDR, vec![0x08, 0x80, 0x00])];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    dac.set_reference_voltage(1.25);
    dac.set_voltage(1.25).unwrap();
    dac.destroy().done();
}

#[test]
fn bus_errors_propagate() {
    let trans = [
        MockTransaction::write(ADDR, vec![0x08, 0x80, 0x00]).with_error(ErrorKind::Other),
        MockTransaction::write_read(ADDR, vec![0x04], vec![0x00, 0x00])
            .with_error(ErrorKind::Other),
    ];
    let i2c = MockI2c::new(&trans);

    let mut dac = Dacx0501::new(i2c, Address::Agnd);
    assert_eq!(dac.set_voltage(2.5), Err(Error::I2c(ErrorKind::Other)));
    // a failed read leaves the tracked gain alone
    assert_eq!(dac.set_buffer_gain(1), Err(Error::I2c(ErrorKind::Other)));
    assert_eq!(dac.state().buffer_gain(), BufferGain::X2);
    dac.destroy().done();
}
