#[path = "../common/mod.rs"]
mod common;

use rfidwriter::test_support::{byte_command, mock_writer};
use rfidwriter::transport::mock::PcdCall;

use common::fixtures::{block_fill, patterned_card};

fn partial(block: u8) -> Vec<u8> {
    [&b"P"[..], &block_fill(block)[..]].concat()
}

#[test]
fn read_whole_sector() {
    let mut w = common::connected_writer(patterned_card());
    let lines = common::exchange(&mut w, &byte_command(b'R', &[2, 0, 3]));
    assert_eq!(
        lines,
        vec![partial(8), partial(9), partial(10), b"A".to_vec()]
    );
}

#[test]
fn read_across_sectors_authenticates_each_sector() {
    let mut w = common::connected_writer(patterned_card());
    let lines = common::exchange(&mut w, &byte_command(b'R', &[1, 2, 4]));
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2][0], b'P');
    let auths: Vec<u8> = w
        .transceiver_mut()
        .take_calls()
        .into_iter()
        .filter_map(|c| match c {
            PcdCall::Authenticate { block, .. } => Some(block),
            _ => None,
        })
        .collect();
    assert_eq!(auths, vec![6, 8]);
}

#[test]
fn card_sleeps_after_each_command() {
    let mut w = common::connected_writer(patterned_card());
    common::exchange(&mut w, &byte_command(b'R', &[3, 0, 1]));
    let calls = w.transceiver_mut().take_calls();
    let stop = calls
        .iter()
        .position(|c| *c == PcdCall::StopCrypto)
        .unwrap();
    assert_eq!(calls[stop + 1], PcdCall::Halt);
    assert!(calls.iter().position(|c| *c == PcdCall::Read(12)).unwrap() < stop);
    // the next presence check wakes it again
    assert_eq!(calls.last(), Some(&PcdCall::WakeupAndSelect));
    assert!(!w.transceiver().is_halted());
}

#[test]
fn invalid_ranges_are_rejected_before_any_card_access() {
    let mut w = common::connected_writer(patterned_card());
    for params in [[0u8, 0, 0], [16, 0, 1], [0, 4, 1], [15, 3, 2], [14, 0, 9]] {
        let lines = common::exchange(&mut w, &byte_command(b'R', &params));
        assert_eq!(lines, vec![b"X".to_vec()], "params {:?}", params);
        assert!(
            !w.transceiver_mut()
                .take_calls()
                .iter()
                .any(|c| matches!(c, PcdCall::Authenticate { .. } | PcdCall::Read(_))),
            "card touched for {:?}",
            params
        );
    }
}

#[test]
fn read_with_wrong_payload_size_is_rejected() {
    let mut w = common::connected_writer(patterned_card());
    let lines = common::exchange(&mut w, &byte_command(b'R', &[1, 0]));
    assert_eq!(lines, vec![b"X".to_vec()]);
}

#[test]
fn auth_failure_aborts_remaining_blocks() {
    let mut w = common::connected_writer(patterned_card());
    w.transceiver_mut().fail_auth.push(12);
    let lines = common::exchange(&mut w, &byte_command(b'R', &[2, 2, 4]));
    // key A always reads back as zeros
    let trailer_line = [&b"P"[..], &[0u8; 6][..], &[0xFF, 0x07, 0x80, 0x69][..], &[0xFF; 6][..]].concat();
    assert_eq!(
        lines,
        vec![
            partial(10),
            trailer_line,
            b"x".to_vec(),
            b"#auth error for block 12: Timeout in communication.".to_vec(),
            b"N".to_vec(),
        ]
    );
    assert!(!w.transceiver_mut().take_calls().contains(&PcdCall::Read(12)));
}

#[test]
fn read_error_reports_block_and_status() {
    let mut w = common::connected_writer(patterned_card());
    w.transceiver_mut().fail_read.push(5);
    let lines = common::exchange(&mut w, &byte_command(b'R', &[1, 0, 3]));
    assert_eq!(
        common::text_lines(&lines),
        vec![
            "P4444444444444444",
            "#read error for block 5: The CRC_A does not match.",
            "N"
        ]
    );
}

#[test]
fn read_without_card_fails_at_authentication() {
    let mut w = mock_writer(None).unwrap();
    let lines = common::exchange(&mut w, &byte_command(b'R', &[1, 0, 1]));
    assert_eq!(
        common::text_lines(&lines),
        vec![
            "x",
            "#auth error for block 4: Timeout in communication.",
            "N"
        ]
    );
}
