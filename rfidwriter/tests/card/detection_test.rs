#[path = "../common/mod.rs"]
mod common;

use rfidwriter::card::SessionState;
use rfidwriter::test_support::mock_writer;
use rfidwriter::transport::mock::SimCard;

use common::fixtures::{patterned_card, UID};

#[test]
fn new_card_is_announced_with_raw_uid() {
    common::init_logging();
    let mut w = mock_writer(Some(patterned_card())).unwrap();
    w.poll().unwrap();
    assert_eq!(
        w.serial_mut().take_lines(),
        vec![[&b"C"[..], &UID[..]].concat()]
    );
    assert_eq!(w.session().state(), SessionState::CardPresent);
}

#[test]
fn new_card_in_text_mode() {
    let mut w = mock_writer(None).unwrap();
    common::to_text_mode(&mut w);
    w.transceiver_mut().insert(patterned_card());
    w.poll().unwrap();
    assert_eq!(
        common::text_lines(&w.serial_mut().take_lines()),
        vec!["#New card connected:", "#Type: MIFARE 1KB", "C01020304"]
    );
}

#[test]
fn seven_byte_uid() {
    let card = SimCard::mifare_1k(&[0x04, 0x5A, 0x11, 0x22, 0x33, 0x44, 0x80]).unwrap();
    let mut w = mock_writer(None).unwrap();
    common::to_text_mode(&mut w);
    w.transceiver_mut().insert(card);
    w.poll().unwrap();
    let lines = common::text_lines(&w.serial_mut().take_lines());
    assert_eq!(lines.last().unwrap(), "C045A1122334480");
}

#[test]
fn failed_connect_auth_is_flagged_after_the_uid() {
    let mut w = mock_writer(None).unwrap();
    w.transceiver_mut().fail_auth.push(3);
    w.transceiver_mut().insert(patterned_card());
    w.poll().unwrap();
    assert_eq!(
        w.serial_mut().take_lines(),
        vec![[&b"C"[..], &UID[..]].concat(), b"x".to_vec()]
    );
    assert_eq!(w.session().state(), SessionState::CardPresent);
}

#[test]
fn failed_connect_auth_in_text_mode_names_the_status() {
    let mut w = mock_writer(None).unwrap();
    common::to_text_mode(&mut w);
    w.transceiver_mut().fail_auth.push(3);
    w.transceiver_mut().insert(patterned_card());
    w.poll().unwrap();
    let lines = common::text_lines(&w.serial_mut().take_lines());
    assert_eq!(
        &lines[2..],
        &["C01020304", "#auth error: Timeout in communication.", "x"]
    );
}

#[test]
fn unsupported_card_is_not_announced() {
    let card = patterned_card().with_sak(0x00);
    let mut w = mock_writer(Some(card.clone())).unwrap();
    w.poll().unwrap();
    assert!(w.serial_mut().take_lines().is_empty());
    assert_eq!(w.session().state(), SessionState::NoCard);

    let mut w = mock_writer(None).unwrap();
    common::to_text_mode(&mut w);
    w.transceiver_mut().insert(card);
    w.poll().unwrap();
    assert_eq!(
        common::text_lines(&w.serial_mut().take_lines()),
        vec![
            "#New card connected:",
            "#Type: MIFARE Ultralight or Ultralight C"
        ]
    );
}

#[test]
fn removal_and_reinsertion() {
    let mut w = common::connected_writer(patterned_card());
    w.poll().unwrap();
    assert!(w.serial_mut().take_lines().is_empty());

    let card = w.transceiver_mut().remove().unwrap();
    w.poll().unwrap();
    assert_eq!(w.serial_mut().take_lines(), vec![b"C".to_vec()]);
    assert_eq!(w.session().state(), SessionState::NoCard);

    w.poll().unwrap();
    assert!(w.serial_mut().take_lines().is_empty());

    w.transceiver_mut().insert(card);
    w.poll().unwrap();
    assert_eq!(
        w.serial_mut().take_lines(),
        vec![[&b"C"[..], &UID[..]].concat()]
    );
}

#[test]
fn removal_in_text_mode() {
    let mut w = common::connected_writer(patterned_card());
    common::to_text_mode(&mut w);
    w.transceiver_mut().remove();
    w.poll().unwrap();
    assert_eq!(
        common::text_lines(&w.serial_mut().take_lines()),
        vec!["#Card disconnected", "C"]
    );
}
