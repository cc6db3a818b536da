//! Single-wire driver for the DHT11 and DHT22 (AM2302) sensors.
//!
//! The data line is open-drain with a pull-up. The host pulls it low to
//! request a measurement, then the sensor answers with an 80us low / 80us
//! high preamble followed by 40 bits. Every bit is a ~50us low period and a
//! high period of ~27us (0) or ~70us (1), so a bit is decoded by comparing
//! its high time against its low time instead of against absolute timings.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::sensors::{HumiditySensor, SensorError};

/// Longest level the driver waits for before giving up
const MAX_PULSE_US: u32 = 1000;
/// Released line settle time before the sensor answers
const RELEASE_US: u32 = 55;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum SensorModel {
    Dht11,
    Dht22,
}

impl SensorModel {
    pub const fn name(&self) -> &'static str {
        match self {
            SensorModel::Dht11 => "DHT11",
            SensorModel::Dht22 => "DHT22",
        }
    }

    /// How long the host holds the line low to start a transfer
    const fn start_pulse_us(&self) -> u32 {
        match self {
            SensorModel::Dht11 => 20_000,
            SensorModel::Dht22 => 1_100,
        }
    }

    /// Relative humidity in percent
    pub fn humidity(&self, frame: &Frame) -> f64 {
        let [hi, lo, ..] = frame.0;
        match self {
            SensorModel::Dht11 => f64::from(hi) + f64::from(lo) * 0.1,
            SensorModel::Dht22 => f64::from((u16::from(hi) << 8) | u16::from(lo)) * 0.1,
        }
    }

    /// Temperature in degrees Celsius
    pub fn temperature(&self, frame: &Frame) -> f64 {
        let [_, _, hi, lo, _] = frame.0;
        match self {
            SensorModel::Dht11 => {
                let magnitude = f64::from(hi) + f64::from(lo & 0x0f) * 0.1;
                if lo & 0x80 != 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
            SensorModel::Dht22 => {
                let magnitude = f64::from((u16::from(hi & 0x7f) << 8) | u16::from(lo)) * 0.1;
                if hi & 0x80 != 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
        }
    }
}

/// Raw 40-bit answer: humidity hi/lo, temperature hi/lo, checksum
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Frame(pub [u8; 5]);

impl Frame {
    /// The last byte is the low 8 bits of the sum of the first four
    pub fn checksum_ok(&self) -> bool {
        let [a, b, c, d, checksum] = self.0;
        a.wrapping_add(b).wrapping_add(c).wrapping_add(d) == checksum
    }
}

#[derive(Clone, Copy)]
enum Channel {
    Temperature,
    Humidity,
}

/// DHT sensor on a single GPIO.
///
/// One bus transaction serves one temperature and one humidity request, so
/// both channels of a poll cycle come from the same frame. Asking again for a
/// channel that was already served starts a new transaction.
pub struct Dht<P, D> {
    pin: P,
    delay: D,
    model: SensorModel,
    last: Option<Result<Frame, SensorError>>,
    temperature_served: bool,
    humidity_served: bool,
}

impl<P, D> Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Releases the data line so the pull-up keeps the sensor idle
    pub fn new(mut pin: P, delay: D, model: SensorModel) -> Result<Self, SensorError> {
        pin.set_high().map_err(|_| SensorError::Pin)?;
        Ok(Self {
            pin,
            delay,
            model,
            last: None,
            temperature_served: false,
            humidity_served: false,
        })
    }

    /// Gives back the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Runs one full bus transaction and checks the frame
    pub fn read_frame(&mut self) -> Result<Frame, SensorError> {
        self.pin.set_high().map_err(|_| SensorError::Pin)?;
        self.delay.delay_ms(1);

        self.pin.set_low().map_err(|_| SensorError::Pin)?;
        self.delay.delay_us(self.model.start_pulse_us());

        self.pin.set_high().map_err(|_| SensorError::Pin)?;
        self.delay.delay_us(RELEASE_US);

        // Preamble
        self.expect_pulse(false)?;
        self.expect_pulse(true)?;

        let mut bytes = [0u8; 5];
        for bit in 0..40 {
            let low = self.expect_pulse(false)?;
            let high = self.expect_pulse(true)?;
            let byte = &mut bytes[bit / 8];
            *byte <<= 1;
            if high > low {
                *byte |= 1;
            }
        }

        let frame = Frame(bytes);
        if frame.checksum_ok() {
            Ok(frame)
        } else {
            Err(SensorError::ChecksumMismatch)
        }
    }

    /// Counts how long (in ~1us steps) the line stays at `high`
    fn expect_pulse(&mut self, high: bool) -> Result<u32, SensorError> {
        let mut count = 0;
        while self.pin.is_high().map_err(|_| SensorError::Pin)? == high {
            count += 1;
            if count > MAX_PULSE_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
        }
        Ok(count)
    }

    fn frame_for(&mut self, channel: Channel) -> Result<Frame, SensorError> {
        let served = match channel {
            Channel::Temperature => self.temperature_served,
            Channel::Humidity => self.humidity_served,
        };
        let frame = match self.last {
            Some(last) if !served => last,
            _ => {
                let fresh = self.read_frame();
                self.last = Some(fresh);
                self.temperature_served = false;
                self.humidity_served = false;
                fresh
            }
        };
        match channel {
            Channel::Temperature => self.temperature_served = true,
            Channel::Humidity => self.humidity_served = true,
        }
        frame
    }
}

impl<P, D> HumiditySensor for Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        let frame = self.frame_for(Channel::Temperature)?;
        Ok(self.model.temperature(&frame))
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        let frame = self.frame_for(Channel::Humidity)?;
        Ok(self.model.humidity(&frame))
    }
}
