//! Integration tests: DeviceService → HardwareAdapter → simulated GPIO/ADC.
//!
//! The host build of hw_init records every pin write on the calling
//! thread, so these tests observe the exact electrical commands.

use smartdevice::adapters::hardware::HardwareAdapter;
use smartdevice::adapters::nvs::NvsAdapter;
use smartdevice::app::ports::{ConfigPort, DeviceControl};
use smartdevice::app::service::DeviceService;
use smartdevice::config::DeviceConfig;
use smartdevice::drivers::hw_init::{sim_set_adc, sim_take_gpio_writes};
use smartdevice::drivers::relay::toggle_relay;
use smartdevice::pins::RELAY_PIN;
use smartdevice::protocol::message::{DeviceCommand, ResponseCode};

use crate::mock_hw::RecordingSink;

fn service(config: DeviceConfig) -> DeviceService<HardwareAdapter, RecordingSink> {
    let hw = HardwareAdapter::from_config(&config);
    DeviceService::new(hw, RecordingSink::default(), config)
}

fn relay(action: &str) -> DeviceCommand {
    DeviceCommand::build(1, "relay", action, None)
}

#[test]
fn toggle_helper_writes_level_for_each_input() {
    sim_take_gpio_writes();
    toggle_relay(true);
    toggle_relay(false);
    assert_eq!(
        sim_take_gpio_writes(),
        vec![(RELAY_PIN, true), (RELAY_PIN, false)]
    );
}

#[test]
fn boot_state_is_written_on_start() {
    sim_take_gpio_writes();
    let mut svc = service(DeviceConfig::default());
    svc.start().unwrap();
    assert_eq!(sim_take_gpio_writes(), vec![(RELAY_PIN, false)]);

    let mut svc = service(DeviceConfig {
        relay_on_at_boot: true,
        ..DeviceConfig::default()
    });
    svc.start().unwrap();
    assert_eq!(sim_take_gpio_writes(), vec![(RELAY_PIN, true)]);
}

#[test]
fn relay_commands_drive_the_pin() {
    let mut svc = service(DeviceConfig::default());
    sim_take_gpio_writes();

    assert_eq!(svc.control_device(&relay("turn_on")).code, ResponseCode::Ok);
    assert_eq!(svc.control_device(&relay("toggle")).code, ResponseCode::Ok);
    assert_eq!(
        sim_take_gpio_writes(),
        vec![(RELAY_PIN, true), (RELAY_PIN, false)]
    );
}

#[test]
fn active_low_board_inverts_pin_levels() {
    let mut svc = service(DeviceConfig {
        relay_active_high: false,
        ..DeviceConfig::default()
    });
    sim_take_gpio_writes();

    svc.control_device(&relay("turn_on"));
    assert_eq!(sim_take_gpio_writes(), vec![(RELAY_PIN, false)]);
    assert_eq!(svc.device_states()["relay"], "on");
}

#[test]
fn sensor_read_goes_through_adc() {
    let mut svc = service(DeviceConfig::default());
    sim_set_adc(Some(1024));
    let r = svc.sample_sensor().unwrap();
    assert_eq!(r.raw, 1024);
    assert_eq!(r.millivolts, 825);

    sim_set_adc(None);
    let resp = svc.control_device(&DeviceCommand::build(2, "sensor", "read", None));
    assert_eq!(resp.code, ResponseCode::Failed);
    // Failed read keeps the last good sample.
    assert_eq!(svc.device_states()["sensor"], "1024");
}

#[test]
fn persisted_config_drives_boot_state() {
    let nvs = NvsAdapter::new().unwrap();
    nvs.save(&DeviceConfig {
        relay_on_at_boot: true,
        relay_active_high: false,
        ..DeviceConfig::default()
    })
    .unwrap();

    sim_take_gpio_writes();
    let mut svc = service(nvs.load().unwrap());
    svc.start().unwrap();
    assert_eq!(sim_take_gpio_writes(), vec![(RELAY_PIN, false)]);
    assert_eq!(svc.device_states()["relay"], "on");
}
