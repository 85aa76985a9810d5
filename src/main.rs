//! Rotary Encoder Demo Application
//!
//! Entry point for the STM32G474 encoder firmware.
//! Services the encoder from a 1 ms ticker task and polls it from the
//! main loop, applying rotation to a bounded tuning offset.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Pull};
use {defmt_rtt as _, panic_probe as _};

use encoder_firmware::prelude::*;

/// Encoder configuration: detented encoder, one full Gray cycle per notch
const CONFIG: EncoderConfig = EncoderConfig::new().with_steps_per_notch(4);

/// State shared between the service task and the main loop
static SHARED: EncoderShared = EncoderShared::new(&CONFIG);

type Sampler = EncoderSampler<'static, Input<'static>, Input<'static>, Input<'static>, EmbassyTicks>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Encoder Firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());
    info!("Peripherals initialized");

    // Contacts close to ground, internal pull-ups
    let encoder_pins = EncoderPins::new(
        Input::new(p.PA0, Pull::Up), // A
        Input::new(p.PA1, Pull::Up), // B
        Input::new(p.PA2, Pull::Up), // SW
    );
    info!(
        "Encoder on {}/{}/{}: {}",
        pins::ENCODER_A,
        pins::ENCODER_B,
        pins::ENCODER_SW,
        CONFIG
    );

    let sampler = EncoderSampler::new(&SHARED, encoder_pins, EmbassyTicks::new(), &CONFIG);
    let mut reader = EncoderReader::new(&SHARED, &CONFIG);

    defmt::unwrap!(spawner.spawn(service_task(sampler)));
    info!("Service task spawned, entering poll loop");

    let mut offset = BoundedValue::new(0, -10_000, 10_000);
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(POLL_INTERVAL_MS)));

    loop {
        ticker.next().await;

        let state = reader.read();
        if state.is_idle() {
            continue;
        }
        debug!("{}", state);

        match state.button_state {
            ButtonState::Open => {
                if offset.apply(state) {
                    info!("Offset {}", offset.get());
                }
            }
            ButtonState::DoubleClicked => {
                let enabled = !reader.acceleration_enabled();
                reader.set_acceleration_enabled(enabled);
                info!("Acceleration {}", enabled);
            }
            ButtonState::Released => {
                offset.set(0);
                info!("Offset reset");
            }
            _ => {}
        }
    }
}

/// Service task - samples the encoder every millisecond
#[embassy_executor::task]
async fn service_task(mut sampler: Sampler) {
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(SERVICE_INTERVAL_MS)));
    loop {
        sampler.service();
        ticker.next().await;
    }
}
