use radiowall::{
    config::active_config,
    serial::{parse_serial_command, LineReadEvent, SerialLineReader, SERIAL_LINE_MAX},
};

use super::{config::SERIAL_COMMANDS, types::SerialUart};

#[embassy_executor::task]
pub(crate) async fn serial_task(mut uart: SerialUart) {
    let touch_config = &active_config().touch;
    let mut reader = SerialLineReader::new();
    let mut rx = [0u8; 1];

    loop {
        match uart.read_async(&mut rx).await {
            Ok(1) => {}
            Ok(_) => continue,
            Err(err) => {
                esp_println::println!("serial: rx error err={:?}", err);
                continue;
            }
        }

        match reader.push_byte(rx[0]) {
            LineReadEvent::None => {}
            LineReadEvent::Overflow => {
                esp_println::println!("serial: line dropped max_len={}", SERIAL_LINE_MAX);
            }
            LineReadEvent::Complete(line) => match parse_serial_command(touch_config, line) {
                Some(tap) => {
                    esp_println::println!(
                        "serial: simulated tap server_x={} server_y={}",
                        tap.server_x,
                        tap.server_y
                    );
                    SERIAL_COMMANDS.send(tap).await;
                }
                None => esp_println::println!("serial: unknown command, expected T:<x>,<y>"),
            },
        }
    }
}
