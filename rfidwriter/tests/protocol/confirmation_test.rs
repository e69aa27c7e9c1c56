#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use rfidwriter::device::PollOutcome;
use rfidwriter::protocol::ConfirmationState;
use rfidwriter::test_support::{ack, byte_command, mock_writer, nack};
use rfidwriter::transport::mock::PcdCall;

#[test]
fn malformed_reply_discards_command() {
    let mut w = common::connected_writer(common::fixtures::patterned_card());
    w.serial_mut().push_input(&byte_command(b'R', &[1, 0, 1]));
    w.serial_mut().push_input(b"a\r\n");
    assert_eq!(w.poll().unwrap(), PollOutcome::Idle);

    let lines = w.serial_mut().take_lines();
    assert_eq!(lines, vec![b"ER\x01\x00\x01".to_vec(), b"X".to_vec()]);
    assert_eq!(w.confirmation_state(), ConfirmationState::Idle);
    assert!(!w.transceiver_mut().take_calls().contains(&PcdCall::Read(4)));
}

#[test]
fn reply_with_wrong_line_end_is_malformed() {
    let mut w = mock_writer(None).unwrap();
    w.serial_mut().push_input(&byte_command(b'S', &[]));
    w.serial_mut().push_input(b"A\n\rS\r\n");
    w.poll().unwrap();
    assert_eq!(
        w.serial_mut().take_lines(),
        vec![b"ES".to_vec(), b"X".to_vec()]
    );
    // everything pending after the bad reply is dropped
    assert!(w.serial().input.is_empty());
}

#[test]
fn commands_after_nack_are_accepted() {
    let mut w = mock_writer(None).unwrap();
    w.serial_mut().push_input(&byte_command(b'S', &[]));
    w.serial_mut().push_input(&nack());
    w.serial_mut().push_input(&byte_command(b'S', &[]));
    w.serial_mut().push_input(&ack());
    assert_eq!(w.poll().unwrap(), PollOutcome::Executed(rfidwriter::Opcode::SelfTest));
    assert_eq!(
        w.serial_mut().take_lines(),
        vec![b"ES".to_vec(), b"ES".to_vec(), b"A".to_vec()]
    );
}

#[test]
fn echo_waits_for_full_reply() {
    let mut w = mock_writer(None).unwrap();
    w.serial_mut().push_input(&byte_command(b'S', &[]));
    w.serial_mut().push_input(b"A");
    assert_eq!(w.poll().unwrap(), PollOutcome::Idle);
    assert_eq!(w.confirmation_state(), ConfirmationState::AwaitingAck);
    w.serial_mut().push_input(b"\r\n");
    assert_eq!(
        w.poll().unwrap(),
        PollOutcome::Executed(rfidwriter::Opcode::SelfTest)
    );
}

proptest! {
    #[test]
    fn nack_never_reaches_the_card(
        opcode in prop::sample::select(b"RWTtCS".to_vec()),
        params in prop::collection::vec(any::<u8>().prop_filter("no CR", |b| *b != b'\r'), 0..=18),
    ) {
        let mut w = mock_writer(None).unwrap();
        w.serial_mut().push_input(&byte_command(opcode, &params));
        w.serial_mut().push_input(&nack());
        prop_assert_eq!(w.poll().unwrap(), PollOutcome::Idle);

        let lines = w.serial_mut().take_lines();
        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(lines[0][0], b'E');
        prop_assert_eq!(&lines[0][1..], &byte_command(opcode, &params)[..params.len() + 1]);
        prop_assert!(
            w.transceiver_mut()
                .take_calls()
                .iter()
                .all(|c| *c == PcdCall::DetectNewCard)
        );
    }
}
