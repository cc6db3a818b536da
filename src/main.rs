#![no_std]
#![no_main]

use bsp::entry;
use defmt::*;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;

use bsp::hal::{
    clocks::{init_clocks_and_plls, Clock},
    fugit::RateExtU32,
    gpio::{FunctionUart, InOutPin, PullUp},
    pac,
    uart::{DataBits, StopBits, UartConfig, UartPeripheral},
    watchdog::Watchdog,
    Sio, Timer,
};
use dht_monitor::config::{DHT_PIN, SENSOR_MODEL, SERIAL_BAUD};
use dht_monitor::console::FmtConsole;
use dht_monitor::cycle::CycleOutcome;
use dht_monitor::dht::Dht;
use dht_monitor::monitor::Monitor;
use dht_monitor::rendering::{render_banner, render_ready};
use dht_monitor::timer::{Duration, Instant, Monotonic, READ_INTERVAL_MS, TICK_MS};

/// The RP2040 timer counts microseconds since boot
struct BoardClock(Timer);

impl Monotonic for BoardClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.0.get_counter().ticks() / 1_000)
    }
}

#[entry]
fn main() -> ! {
    info!("DHT monitor starting");
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Set up the console on UART0
    let uart_pins = (
        pins.gpio0.into_function::<FunctionUart>(),
        pins.gpio1.into_function::<FunctionUart>(),
    );
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(SERIAL_BAUD.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();
    let mut console = FmtConsole::new(uart);

    render_banner(SENSOR_MODEL, &mut console).unwrap();

    // Set up the sensor; the internal pull-up helps the module's own resistor
    let dht_pin = InOutPin::new(pins.gpio2.into_pull_type::<PullUp>());
    let dht = Dht::new(dht_pin, timer, SENSOR_MODEL).unwrap();
    info!("{} on GPIO{}", SENSOR_MODEL, DHT_PIN);

    render_ready(&mut console).unwrap();

    let clock = BoardClock(timer);
    let mut monitor = Monitor::new(
        dht,
        console,
        clock.now(),
        Duration::from_ticks(READ_INTERVAL_MS),
    );

    info!("DHT monitor ready");

    loop {
        match monitor.tick(&clock) {
            Ok(Some(CycleOutcome::Reported(reading))) => debug!("reading: {}", reading),
            Ok(Some(CycleOutcome::Failed(invalid))) => warn!("sensor read failed: {}", invalid),
            Ok(None) => {}
            Err(_) => error!("console write failed"),
        }
        timer.delay_ms(TICK_MS);
    }
}
