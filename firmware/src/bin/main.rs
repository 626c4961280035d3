#![no_std]
#![no_main]

use defmt::{debug, error, info, warn};
use defmt_rtt as _;
use efis_display::config::{
    self, REFRESH_PERIOD, SPI_FREQUENCY, STALE_AFTER, STATS_EVERY, UART_BAUD,
};
use efis_display::{
    Canvas, DecodeError, FlightState, Framebuffer, LinkError, Panel, St7789, Telemetry,
    TelemetryLink, UartByteSource, FRAME_PIXELS,
};
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{SPI0, UART1};
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Ticker};
use embedded_graphics::prelude::*;
use gauge_core::color::BLACK;
use static_cell::{ConstStaticCell, StaticCell};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

type DisplaySpi = SpiDevice<'static, NoopRawMutex, Spi<'static, SPI0, spi::Async>, Output<'static>>;
type Display = St7789<DisplaySpi, Output<'static>, Output<'static>>;

/// A decoded state and the time its frame completed.
#[derive(Clone, Copy)]
struct Sample {
    state: FlightState,
    at: Instant,
}

/// Latest-value handoff from the input task to the display task.
/// A slow redraw never backs up the link; intermediate frames are dropped.
static SAMPLE_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, Sample>> = StaticCell::new();

static SPI_BUS: StaticCell<Mutex<NoopRawMutex, Spi<'static, SPI0, spi::Async>>> = StaticCell::new();

/// Frame storage, placed in .bss rather than built on the stack.
static FRAME: ConstStaticCell<[u16; FRAME_PIXELS]> = ConstStaticCell::new([0; FRAME_PIXELS]);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("EFIS display starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let signal = SAMPLE_SIGNAL.init(Signal::new());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUD;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (_tx, rx) = uart.split();
    let telemetry = Telemetry::new(config::decoder_config(), config::processing_config());
    let link = TelemetryLink::new(UartByteSource::new(rx), telemetry);

    // --- Display Setup ---
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY;

    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH2, spi_config);
    let spi_bus = SPI_BUS.init(Mutex::new(spi));
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let rst = Output::new(p.PIN_20, Level::High);
    let backlight = Output::new(p.PIN_21, Level::High);

    let mut display = St7789::new(SpiDevice::new(spi_bus, cs), dc, rst);
    if let Err(e) = display.init().await {
        error!("Display init failed: {:?}", e);
    }

    let panel = match Panel::new() {
        Ok(panel) => panel,
        Err(e) => {
            error!("Panel setup failed: {:?}", e);
            return;
        }
    };
    let frame = Framebuffer::new(FRAME.take());

    // Link error indicator (on-board LED on Pico)
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(input_task(link, signal, led).unwrap());
    spawner.spawn(display_task(display, frame, panel, signal, backlight).unwrap());

    info!("EFIS display initialized, waiting for telemetry...");
}

/// Input task - decodes UART frames and signals the latest state.
#[embassy_executor::task]
async fn input_task(
    mut link: TelemetryLink<UartByteSource<'static>>,
    signal: &'static Signal<CriticalSectionRawMutex, Sample>,
    mut led: Output<'static>,
) {
    loop {
        match link.next_frame().await {
            Ok(state) => {
                let rec = state.record();
                debug!(
                    "Frame: IAS {} pitch {} roll {} AOA {} G {}",
                    rec.ias,
                    rec.pitch,
                    rec.roll,
                    state.smoothed_aoa(),
                    rec.vertical_g
                );

                let stats = link.telemetry().stats();
                if stats.frames % STATS_EVERY == 0 {
                    info!("Link stats: {:?}", stats);
                }

                signal.signal(Sample {
                    state,
                    at: Instant::now(),
                });
            }
            Err(LinkError::Decode(DecodeError::Overflow)) => {
                warn!("Telemetry buffer overflow");
                led.toggle();
            }
            Err(LinkError::Decode(DecodeError::Checksum)) => {
                warn!("Telemetry checksum failed");
                led.toggle();
            }
            Err(e) => {
                error!("Link error: {:?}", e);
                led.toggle();
            }
        }
    }
}

/// Display task - redraws on each new state and on every refresh tick.
#[embassy_executor::task]
async fn display_task(
    mut display: Display,
    frame: Framebuffer,
    mut panel: Panel,
    signal: &'static Signal<CriticalSectionRawMutex, Sample>,
    // Held so the backlight pin stays driven
    _backlight: Output<'static>,
) {
    let mut canvas = Canvas::new(frame);
    let mut ticker = Ticker::every(REFRESH_PERIOD);
    let mut last_frame: Option<Instant> = None;
    let mut was_stale = true;

    loop {
        match select(signal.wait(), ticker.next()).await {
            Either::First(sample) => {
                if let Err(e) = panel.update(&sample.state) {
                    error!("Panel update failed: {:?}", e);
                }
                last_frame = Some(sample.at);
            }
            Either::Second(()) => {
                let stale = last_frame.map_or(true, |at| at.elapsed() > STALE_AFTER);
                if stale {
                    if !was_stale {
                        warn!("Telemetry stale");
                    }
                    panel.mark_stale();
                }
                was_stale = stale;
            }
        }

        let Ok(()) = canvas.target_mut().clear(BLACK);
        let Ok(()) = panel.render(&mut canvas);
        if let Err(e) = display.flush(canvas.target()).await {
            error!("Display flush failed: {:?}", e);
        }
    }
}
