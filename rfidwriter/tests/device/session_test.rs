#[path = "../common/mod.rs"]
mod common;

use rfidwriter::device::PollOutcome;
use rfidwriter::test_support::{ack, byte_command, mock_writer, text_command};
use rfidwriter::{ConfirmationState, Opcode, SessionState};

use common::fixtures::{block_fill, hex_upper, patterned_card, UID};

#[test]
fn text_mode_session_from_card_to_removal() {
    common::init_logging();
    let mut w = mock_writer(None).unwrap();
    common::to_text_mode(&mut w);

    // nothing happens without a card
    assert_eq!(w.poll().unwrap(), PollOutcome::Idle);
    assert!(w.serial_mut().take_output().is_empty());

    w.transceiver_mut().insert(patterned_card());
    w.poll().unwrap();
    assert_eq!(
        common::text_lines(&w.serial_mut().take_lines()),
        vec![
            "#New card connected:".to_string(),
            "#Type: MIFARE 1KB".to_string(),
            format!("C{}", hex_upper(&UID)),
        ]
    );
    assert_eq!(w.session().state(), SessionState::CardPresent);

    let lines = common::exchange(&mut w, &text_command(b'R', &[1, 1, 2]));
    let mut expected = Vec::new();
    for block in [5u8, 6] {
        expected.push([b"P".to_vec(), hex_upper(&block_fill(block)).into_bytes()].concat());
        expected.push([&b"#Equals: "[..], &block_fill(block)[..]].concat());
    }
    expected.push(b"A".to_vec());
    assert_eq!(lines, expected);

    w.transceiver_mut().remove();
    w.poll().unwrap();
    assert_eq!(
        common::text_lines(&w.serial_mut().take_lines()),
        vec!["#Card disconnected", "C"]
    );
    assert_eq!(w.session().state(), SessionState::NoCard);
}

#[test]
fn byte_mode_card_change_is_raw_uid() {
    let mut w = mock_writer(Some(patterned_card())).unwrap();
    w.poll().unwrap();
    assert_eq!(
        w.serial_mut().take_lines(),
        vec![[&b"C"[..], &UID[..]].concat()]
    );
}

#[test]
fn commands_without_a_card_fail_at_the_reader() {
    let mut w = mock_writer(None).unwrap();
    let mut params = vec![1, 1];
    params.extend_from_slice(&[0; 16]);
    let lines = common::exchange(&mut w, &byte_command(b'W', &params));
    assert_eq!(
        common::text_lines(&lines),
        vec![
            "x",
            "#auth error for block 5: Timeout in communication.",
            "N"
        ]
    );
    assert_eq!(w.confirmation_state(), ConfirmationState::Idle);
}

#[test]
fn self_test_verdicts() {
    let mut w = mock_writer(None).unwrap();
    let lines = common::exchange(&mut w, &byte_command(b'S', &[]));
    assert_eq!(lines, vec![b"A".to_vec()]);

    w.transceiver_mut().self_test_passes = false;
    let lines = common::exchange(&mut w, &byte_command(b'S', &[]));
    assert_eq!(lines, vec![b"N".to_vec()]);
}

#[test]
fn self_test_on_unknown_chip() {
    let mut w = mock_writer(None).unwrap();
    w.transceiver_mut().version = 0x12;
    let lines = common::exchange(&mut w, &byte_command(b'S', &[]));
    assert_eq!(
        common::text_lines(&lines),
        vec!["#Selftest is not supported for this card (version: 12)", "X"]
    );
}

#[test]
fn card_sleeps_after_each_command() {
    use rfidwriter::transport::mock::PcdCall;

    let mut w = common::connected_writer(patterned_card());
    w.serial_mut().push_input(&byte_command(b'R', &[0, 0, 1]));
    w.serial_mut().push_input(&ack());
    assert_eq!(w.poll().unwrap(), PollOutcome::Executed(Opcode::Read));
    let calls = w.transceiver_mut().take_calls();
    let tail = &calls[calls.len() - 2..];
    assert_eq!(tail, &[PcdCall::StopCrypto, PcdCall::Halt]);
    assert!(w.transceiver().is_halted());

    // the next pass wakes the card without announcing it again
    assert_eq!(w.poll().unwrap(), PollOutcome::Idle);
    assert!(w.serial_mut().take_output().is_empty());
    assert!(!w.transceiver().is_halted());
}
