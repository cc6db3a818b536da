use crate::dht::SensorModel;

/// GPIO wired to the sensor's DATA line.
/// Only used for logging; it must match the `pins.gpio2` taken in `main.rs`
pub const DHT_PIN: u8 = 2;

#[cfg(not(feature = "dht22"))]
pub const SENSOR_MODEL: SensorModel = SensorModel::Dht11;
#[cfg(feature = "dht22")]
pub const SENSOR_MODEL: SensorModel = SensorModel::Dht22;

/// Console UART (GPIO0 TX, GPIO1 RX), 8N1
pub const SERIAL_BAUD: u32 = 9600;
