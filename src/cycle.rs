//! One poll cycle: acquire both channels, validate, report.

use ufmt::uWrite;

use crate::reading::Reading;
use crate::rendering::{render_read_error, render_reading};
use crate::sensors::{HumiditySensor, SensorError};

/// Either channel failed or returned something that is not a finite number.
///
/// The console only ever sees one generic notice; the per-channel sensor
/// errors are kept for the debug log. `None` means the channel returned a
/// value, which may still have been NaN.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct InvalidReading {
    pub temperature: Option<SensorError>,
    pub humidity: Option<SensorError>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum CycleOutcome {
    Reported(Reading),
    Failed(InvalidReading),
}

/// Reads both channels and validates them together.
/// Both channels are always requested, even when the first one fails
pub fn acquire<S: HumiditySensor>(sensor: &mut S) -> Result<Reading, InvalidReading> {
    let humidity = sensor.read_humidity();
    let temperature = sensor.read_temperature();

    match (temperature, humidity) {
        (Ok(temperature), Ok(humidity)) => {
            Reading::new(temperature, humidity).ok_or(InvalidReading {
                temperature: None,
                humidity: None,
            })
        }
        (temperature, humidity) => Err(InvalidReading {
            temperature: temperature.err(),
            humidity: humidity.err(),
        }),
    }
}

/// Runs one cycle and writes exactly one report or one error notice.
/// Only a console failure is returned as `Err`; a bad reading is a normal outcome
pub fn run_cycle<S: HumiditySensor, W: uWrite>(
    sensor: &mut S,
    console: &mut W,
) -> Result<CycleOutcome, W::Error> {
    match acquire(sensor) {
        Ok(reading) => {
            render_reading(&reading, console)?;
            Ok(CycleOutcome::Reported(reading))
        }
        Err(invalid) => {
            render_read_error(console)?;
            Ok(CycleOutcome::Failed(invalid))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rendering::{READ_ERROR, SEPARATOR};

    /// Returns the same pair of channel results on every read
    pub(crate) struct FixedSensor {
        pub temperature: Result<f64, SensorError>,
        pub humidity: Result<f64, SensorError>,
        pub reads: usize,
    }

    impl FixedSensor {
        pub(crate) fn new(temperature: f64, humidity: f64) -> Self {
            Self {
                temperature: Ok(temperature),
                humidity: Ok(humidity),
                reads: 0,
            }
        }
    }

    impl HumiditySensor for FixedSensor {
        fn read_temperature(&mut self) -> Result<f64, SensorError> {
            self.reads += 1;
            self.temperature
        }

        fn read_humidity(&mut self) -> Result<f64, SensorError> {
            self.reads += 1;
            self.humidity
        }
    }

    fn cycle(sensor: &mut FixedSensor) -> (CycleOutcome, heapless::String<256>) {
        let mut out = heapless::String::new();
        let outcome = run_cycle(sensor, &mut out).unwrap();
        (outcome, out)
    }

    fn assert_error_only(out: &str) {
        assert_eq!(out.lines().collect::<Vec<_>>(), [READ_ERROR]);
        assert!(!out.contains("Temperature"));
        assert!(!out.contains("Humidity"));
    }

    #[test]
    fn reports_a_valid_reading() {
        let (outcome, out) = cycle(&mut FixedSensor::new(23.45, 60.2));
        assert_eq!(
            outcome,
            CycleOutcome::Reported(Reading::new(23.45, 60.2).unwrap())
        );
        assert!(out.contains("Temperature : 23.4 °C"));
        assert!(out.contains("Humidity    : 60.2 %"));
        assert!(!out.contains(READ_ERROR));
    }

    #[test]
    fn nan_temperature_is_rejected() {
        let (outcome, out) = cycle(&mut FixedSensor::new(f64::NAN, 60.0));
        assert!(matches!(outcome, CycleOutcome::Failed(_)));
        assert_error_only(&out);
    }

    #[test]
    fn nan_humidity_is_rejected() {
        let (outcome, out) = cycle(&mut FixedSensor::new(21.0, f64::NAN));
        assert!(matches!(outcome, CycleOutcome::Failed(_)));
        assert_error_only(&out);
    }

    #[test]
    fn nan_on_both_channels_is_rejected() {
        let (outcome, out) = cycle(&mut FixedSensor::new(f64::NAN, f64::NAN));
        assert!(matches!(outcome, CycleOutcome::Failed(_)));
        assert_error_only(&out);
    }

    #[test]
    fn sensor_errors_are_kept_per_channel() {
        let mut sensor = FixedSensor::new(21.0, 50.0);
        sensor.humidity = Err(SensorError::ChecksumMismatch);
        let (outcome, out) = cycle(&mut sensor);
        assert_eq!(
            outcome,
            CycleOutcome::Failed(InvalidReading {
                temperature: None,
                humidity: Some(SensorError::ChecksumMismatch),
            })
        );
        assert_error_only(&out);
    }

    #[test]
    fn both_channels_are_requested_after_a_failure() {
        let mut sensor = FixedSensor::new(21.0, 50.0);
        sensor.humidity = Err(SensorError::Timeout);
        sensor.temperature = Err(SensorError::Timeout);
        let (outcome, _) = cycle(&mut sensor);
        assert_eq!(sensor.reads, 2);
        assert_eq!(
            outcome,
            CycleOutcome::Failed(InvalidReading {
                temperature: Some(SensorError::Timeout),
                humidity: Some(SensorError::Timeout),
            })
        );
    }

    #[test]
    fn identical_input_gives_identical_reports() {
        let mut sensor = FixedSensor::new(19.96, 41.04);
        let (_, first) = cycle(&mut sensor);
        for _ in 0..4 {
            let (_, next) = cycle(&mut sensor);
            assert_eq!(next, first);
        }
        assert_eq!(first.matches(SEPARATOR).count(), 2);
    }
}
