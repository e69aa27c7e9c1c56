#[path = "../common/mod.rs"]
mod common;

use rfidwriter::device::PollOutcome;
use rfidwriter::test_support::{ack, byte_command, text_command};
use rfidwriter::transport::mock::PcdCall;
use rfidwriter::{EncodingMode, KeySelector, MifareKey, SessionState};

use common::fixtures::{new_trailer_payload, patterned_card, UID};

#[test]
fn reset_is_reported_to_the_caller() {
    let mut w = common::connected_writer(patterned_card());
    w.serial_mut().push_input(&byte_command(b'X', &[]));
    assert_eq!(w.poll().unwrap(), PollOutcome::Idle);
    w.serial_mut().push_input(&ack());
    assert_eq!(w.poll().unwrap(), PollOutcome::ResetRequested);

    // no verdict is sent for a reset
    assert_eq!(w.serial_mut().take_lines(), vec![b"EX".to_vec()]);
}

#[test]
fn soft_reset_restores_start_up_state() {
    let mut w = common::connected_writer(patterned_card());
    common::exchange(&mut w, &byte_command(b'T', &new_trailer_payload(b'B')));
    common::to_text_mode(&mut w);
    assert_eq!(w.mode(), EncodingMode::Text);

    w.serial_mut().push_input(&text_command(b'X', &[]));
    w.serial_mut().push_input(&ack());
    let outcomes = rfidwriter::test_support::poll_until_idle(&mut w, 4).unwrap();
    assert!(outcomes.contains(&PollOutcome::ResetRequested));
    w.serial_mut().take_output();
    w.transceiver_mut().take_calls();

    w.soft_reset().unwrap();
    assert_eq!(w.mode(), EncodingMode::Byte);
    assert_eq!(
        w.session().keys().active(),
        (KeySelector::A, &MifareKey::FACTORY)
    );
    assert_eq!(w.session().state(), SessionState::NoCard);
    assert_eq!(
        common::text_lines(&w.serial_mut().take_lines()),
        vec!["##RFID Initialization##", "#RFID writer v1.0", "I"]
    );
    assert_eq!(w.transceiver_mut().take_calls(), vec![PcdCall::Reset]);

    // the card in the field is announced again
    w.poll().unwrap();
    assert_eq!(
        w.serial_mut().take_lines(),
        vec![[&b"C"[..], &UID[..]].concat()]
    );
}

#[test]
fn pending_command_is_dropped_by_reset() {
    let mut w = common::connected_writer(patterned_card());
    w.serial_mut().push_input(&byte_command(b'R', &[0, 1, 1]));
    w.poll().unwrap();
    w.soft_reset().unwrap();
    w.serial_mut().take_output();

    // a late ACK is now an unknown command line
    w.serial_mut().push_input(&ack());
    w.poll().unwrap();
    assert!(!w
        .transceiver_mut()
        .take_calls()
        .contains(&PcdCall::Read(1)));
}
