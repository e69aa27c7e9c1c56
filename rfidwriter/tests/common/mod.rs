// Shared helpers for the integration test crates. Each aggregator pulls
// this in with a `#[path]` attribute, so not every helper is used by every
// crate.
#![allow(dead_code)]


use rfidwriter::device::{Initialized, PollOutcome, Writer};
use rfidwriter::test_support::{ack, poll_until_idle};
use rfidwriter::transport::mock::{MockSerial, MockTransceiver, SimCard};
use rfidwriter::EncodingMode;

pub type MockWriter = Writer<MockSerial, MockTransceiver, Initialized>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writer whose card has already been announced; output and call log are
/// empty.
pub fn connected_writer(card: SimCard) -> MockWriter {
    init_logging();
    let mut w = rfidwriter::test_support::mock_writer(Some(card)).unwrap();
    w.poll().unwrap();
    w.serial_mut().take_output();
    w.transceiver_mut().take_calls();
    w
}

/// Send `command`, confirm it and return the lines that follow the echo.
pub fn exchange(w: &mut MockWriter, command: &[u8]) -> Vec<Vec<u8>> {
    let echo_lines = match w.mode() {
        EncodingMode::Byte => 1,
        EncodingMode::Text => 3,
    };
    w.serial_mut().push_input(command);
    w.serial_mut().push_input(&ack());
    let outcomes = poll_until_idle(w, 8).unwrap();
    assert!(
        outcomes
            .iter()
            .any(|o| matches!(o, PollOutcome::Executed(_) | PollOutcome::ResetRequested)),
        "command was not executed: {:?}",
        outcomes
    );
    let lines = w.serial_mut().take_lines();
    assert_eq!(lines[0][0], b'E', "first line is not an echo: {:?}", lines);
    lines[echo_lines..].to_vec()
}

/// Lines as text, for comparisons against ASCII output.
pub fn text_lines(lines: &[Vec<u8>]) -> Vec<String> {
    lines
        .iter()
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .collect()
}

/// Switch a writer to text mode and drop the notice.
pub fn to_text_mode(w: &mut MockWriter) {
    w.serial_mut().push_input(b"b\r\n");
    w.poll().unwrap();
    assert_eq!(w.mode(), EncodingMode::Text);
    w.serial_mut().take_output();
}
