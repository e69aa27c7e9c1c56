//! Scripted host session against a simulated reader and card.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p rfidwriter --example simulate

use rfidwriter::device::{PollOutcome, WriterBuilder};
use rfidwriter::test_support::{ack, byte_command, nack, text_command};
use rfidwriter::transport::mock::{MockSerial, MockTransceiver, SimCard};

fn print_output(serial: &mut MockSerial) {
    for line in serial.take_lines() {
        let printable: String = line
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        println!("  <- {}", printable);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let card = SimCard::mifare_1k(&[0xDE, 0xAD, 0xBE, 0xEF])?;
    let mut writer = WriterBuilder::new()
        .with_serial(MockSerial::new())
        .with_transceiver(MockTransceiver::with_card(card))
        .build()?
        .initialize()?;
    print_output(writer.serial_mut());

    let mut content = vec![1u8, 0];
    content.extend_from_slice(b"simulated block!");

    let script: Vec<(&str, Vec<u8>)> = vec![
        ("write sector 1 block 0", [byte_command(b'W', &content), ack()].concat()),
        ("read it back", [byte_command(b'R', &[1, 0, 1]), ack()].concat()),
        ("refuse a read", [byte_command(b'R', &[2, 0, 4]), nack()].concat()),
        ("switch to text mode", b"b\r\n".to_vec()),
        ("read in text mode", [text_command(b'R', &[1, 0, 2]), ack()].concat()),
        ("check trailers", [text_command(b'C', &[]), ack()].concat()),
        ("self-test", [text_command(b'S', &[]), ack()].concat()),
        ("reset", [text_command(b'X', &[]), ack()].concat()),
    ];

    for (step, input) in script {
        println!("{}:", step);
        writer.serial_mut().push_input(&input);
        loop {
            let outcome = writer.poll()?;
            print_output(writer.serial_mut());
            match outcome {
                PollOutcome::ResetRequested => {
                    writer.soft_reset()?;
                    print_output(writer.serial_mut());
                }
                PollOutcome::Idle if writer.serial().input.is_empty() => break,
                _ => {}
            }
        }
    }

    Ok(())
}
