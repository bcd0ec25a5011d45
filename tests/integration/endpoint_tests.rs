//! Integration tests: UART bytes → SerialEndpoint → DeviceService → relay.

use smartdevice::app::events::AppEvent;
use smartdevice::app::ports::DeviceControl;
use smartdevice::app::service::DeviceService;
use smartdevice::config::DeviceConfig;
use smartdevice::pins::RELAY_PIN;
use smartdevice::protocol::endpoint::SerialEndpoint;
use smartdevice::protocol::line::MAX_LINE_LEN;
use serde_json::Value;
use smartdevice::protocol::message::{DeviceResponse, ResponseCode};

use crate::mock_hw::{drain, MockHardware, PipeTransport, RecordingSink};

type Service = DeviceService<MockHardware, RecordingSink>;

fn setup() -> (SerialEndpoint, PipeTransport, Service) {
    let svc = DeviceService::new(
        MockHardware::new(),
        RecordingSink::default(),
        DeviceConfig::default(),
    );
    (SerialEndpoint::new(), PipeTransport::new(), svc)
}

#[test]
fn json_turn_on_switches_relay_and_replies() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(b"{\"id\": 1, \"device_id\": \"relay\", \"action\": \"turn_on\"}\n");

    assert_eq!(drain(&mut ep, &mut pipe, &mut svc), 1);
    assert_eq!(pipe.responses(), vec![DeviceResponse::ok(1, "Relay turned on")]);
    assert_eq!(svc.hw().relay_calls, vec![true]);
    assert_eq!(svc.sink().events, vec![AppEvent::RelaySwitched { on: true }]);
    assert!(pipe.flushes >= 1);
}

#[test]
fn legacy_write_to_relay_pin_is_routed_to_relay() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(format!("{RELAY_PIN}:1\r\n{RELAY_PIN}:0\r\n").as_bytes());

    assert_eq!(drain(&mut ep, &mut pipe, &mut svc), 2);
    let responses = pipe.responses();
    assert_eq!(responses[0], DeviceResponse::ok(Value::Null, "Relay turned on"));
    assert_eq!(responses[1], DeviceResponse::ok(Value::Null, "Relay turned off"));
    assert_eq!(svc.hw().relay_calls, vec![true, false]);
}

#[test]
fn legacy_write_to_other_pin_is_rejected() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(b"10:1\n300:1\n");

    drain(&mut ep, &mut pipe, &mut svc);
    assert_eq!(
        pipe.responses(),
        vec![
            DeviceResponse::rejected(Value::Null, "Unknown pin: 10"),
            DeviceResponse::rejected(Value::Null, "Unknown pin: 300"),
        ]
    );
    assert!(svc.hw().relay_calls.is_empty());
}

#[test]
fn garbage_lines_get_code_two() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(b"hello\n{broken\n8:7\n");

    assert_eq!(drain(&mut ep, &mut pipe, &mut svc), 3);
    for r in pipe.responses() {
        assert_eq!(r.code, ResponseCode::Failed);
        assert_eq!(r.id, Value::Null);
        assert!(r.msg.starts_with("Invalid input:"), "{}", r.msg);
    }
}

#[test]
fn requests_split_across_reads_are_reassembled() {
    let (mut ep, _, mut svc) = setup();
    let mut pipe = PipeTransport::with_max_read(3);
    pipe.send(b"{\"id\": 4, \"device_id\": \"relay\", \"action\": \"toggle\"}\n");
    pipe.send(b"{\"id\": 5, \"device_id\": \"relay\", \"action\": \"status\"}\n");

    assert_eq!(drain(&mut ep, &mut pipe, &mut svc), 2);
    let responses = pipe.responses();
    assert_eq!(responses[0], DeviceResponse::ok(4, "Relay turned on"));
    assert_eq!(responses[1], DeviceResponse::ok(5, "Relay is on"));
}

#[test]
fn overlong_line_is_answered_once_and_link_recovers() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(&vec![b'a'; MAX_LINE_LEN * 2]);
    pipe.send(b"\n8:1\n");

    assert_eq!(drain(&mut ep, &mut pipe, &mut svc), 2);
    let responses = pipe.responses();
    assert_eq!(responses[0].code, ResponseCode::Failed);
    assert!(responses[0].msg.contains("exceeds"));
    assert_eq!(responses[1], DeviceResponse::ok(Value::Null, "Relay turned on"));
}

#[test]
fn sensor_read_and_states_over_the_link() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(b"{\"id\": 9, \"device_id\": \"sensor\", \"action\": \"read\"}\n");

    drain(&mut ep, &mut pipe, &mut svc);
    assert_eq!(pipe.responses()[0].msg, "Sensor raw=2048 mv=1650");
    let states = svc.device_states();
    assert_eq!(states["sensor"], "2048");
    assert_eq!(states["relay"], "off");
}

#[test]
fn unknown_device_emits_rejection_event() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(b"{\"id\": 2, \"device_id\": \"tv\", \"action\": \"turn_on\"}\n");

    drain(&mut ep, &mut pipe, &mut svc);
    assert_eq!(
        svc.sink().events,
        vec![AppEvent::CommandRejected {
            id: Value::from(2),
            code: ResponseCode::Rejected,
            msg: "Unknown device_id: tv".into(),
        }]
    );
}

#[test]
fn read_error_is_propagated_without_output() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(b"8:1\n");
    pipe.fail_reads = true;

    assert_eq!(ep.poll(&mut pipe, &mut svc), Err(()));
    assert!(pipe.tx.is_empty());
    assert!(svc.hw().relay_calls.is_empty());
}

#[test]
fn write_error_still_dispatches_rest_of_chunk() {
    let (mut ep, mut pipe, mut svc) = setup();
    pipe.send(b"8:1\n8:0\n8:");
    pipe.fail_writes = true;

    assert_eq!(ep.poll(&mut pipe, &mut svc), Err(()));
    assert_eq!(svc.hw().relay_calls, vec![true, false]);
    assert_eq!(pipe.flushes, 0);

    // The trailing partial line survives the error.
    pipe.fail_writes = false;
    pipe.send(b"1\n");
    assert_eq!(drain(&mut ep, &mut pipe, &mut svc), 1);
    assert_eq!(pipe.responses(), vec![DeviceResponse::ok(Value::Null, "Relay turned on")]);
    assert_eq!(svc.hw().relay_calls, vec![true, false, true]);
}
