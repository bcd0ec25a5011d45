//! Integration tests: the serial endpoint in front of the device simulator.

use serde_json::Value;
use smartdevice::app::ports::DeviceControl;
use smartdevice::protocol::endpoint::SerialEndpoint;
use smartdevice::protocol::message::{ActionError, DeviceResponse, ResponseCode};
use smartdevice::simulator::DeviceSimulator;

use crate::mock_hw::{drain, PipeTransport};

#[test]
fn simulator_answers_over_the_link() {
    let mut sim = DeviceSimulator::default();
    let mut ep = SerialEndpoint::new();
    let mut pipe = PipeTransport::new();
    pipe.send(b"{\"id\": 1, \"device_id\": \"bedroom_light\", \"action\": \"turn_on\"}\n");
    pipe.send(b"{\"id\": 2, \"device_id\": \"bedroom_light\", \"action\": \"set_brightness\", \"args\": {\"level\": 30}}\n");

    assert_eq!(drain(&mut ep, &mut pipe, &mut sim), 2);
    assert_eq!(
        pipe.responses(),
        vec![
            DeviceResponse::ok(1, "Bedroom light turned on"),
            DeviceResponse::ok(2, "Brightness set to 30%"),
        ]
    );
    assert_eq!(sim.device_states()["bedroom_light"], "on 30%");
}

#[test]
fn legacy_relay_write_against_simulator_is_unknown_device() {
    let mut sim = DeviceSimulator::default();
    let mut ep = SerialEndpoint::new();
    let mut pipe = PipeTransport::new();
    pipe.send(b"8:1\n");

    drain(&mut ep, &mut pipe, &mut sim);
    assert_eq!(
        pipe.responses(),
        vec![DeviceResponse::rejected(Value::Null, "Unknown device_id: relay")]
    );
}

#[test]
fn custom_device_table_with_counter_state() {
    let mut counter = 0u32;
    let mut sim = DeviceSimulator::empty()
        .with_device("doorbell", "quiet")
        .with_action("doorbell", "ring", move |_, state| {
            counter += 1;
            *state = format!("rang {counter}x");
            if counter > 2 {
                return Err(ActionError::Failed("Error: bell jammed".into()));
            }
            Ok("Ding".into())
        });

    for _ in 0..2 {
        assert!(sim.serial_write(r#"{"id": 1, "device_id": "doorbell", "action": "ring"}"#).is_ok());
    }
    let r = sim.serial_write(r#"{"id": 3, "device_id": "doorbell", "action": "ring"}"#);
    assert_eq!(r.code, ResponseCode::Failed);
    assert_eq!(sim.device_states()["doorbell"], "rang 3x");
}
