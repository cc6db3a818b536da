/// Why a sensor channel could not produce a value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum SensorError {
    /// The data line did not change level in time (disconnected, unpowered or busy sensor)
    Timeout,
    /// The received frame failed its checksum
    ChecksumMismatch,
    /// The GPIO driver reported an error
    Pin,
}

/// A combined temperature and relative humidity sensor.
///
/// Both channels may fail independently. A value returned as `Ok` is not
/// guaranteed to be finite; callers still validate it.
pub trait HumiditySensor {
    /// Gets the temperature in degrees Celsius
    fn read_temperature(&mut self) -> Result<f64, SensorError>;

    /// Gets the relative humidity in percent
    fn read_humidity(&mut self) -> Result<f64, SensorError>;
}
