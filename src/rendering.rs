use core::fmt::{self, Write};

use ufmt::{uDisplay, uWrite, uwriteln, Formatter};

use crate::dht::SensorModel;
use crate::reading::Reading;

pub const SEPARATOR: &str = "------------------------------------";
pub const BANNER_RULE: &str = "====================================";
pub const READ_ERROR: &str =
    "Error: Failed to read from DHT sensor! Check wiring and sensor condition.";

/// Displays a value with exactly one decimal place.
/// ufmt has no float support, so the digits come from `core::fmt`
pub struct OneDecimal(pub f64);

/// Feeds `core::fmt` output into a ufmt formatter, keeping the sink's error
struct Digits<'a, 'w, W: uWrite + ?Sized> {
    f: &'a mut Formatter<'w, W>,
    error: Option<W::Error>,
}

impl<W: uWrite + ?Sized> fmt::Write for Digits<'_, '_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.f.write_str(s).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

impl uDisplay for OneDecimal {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let mut digits = Digits { f, error: None };
        // float formatting only fails when the sink does
        let _ = write!(digits, "{:.1}", self.0);
        match digits.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Renders one successful poll between two separator lines
/// param reading: validated reading
/// param out: console
pub fn render_reading<W: uWrite>(reading: &Reading, out: &mut W) -> Result<(), W::Error> {
    uwriteln!(out, "{}", SEPARATOR)?;
    uwriteln!(
        out,
        "Temperature : {} °C",
        OneDecimal(reading.temperature_celsius())
    )?;
    uwriteln!(
        out,
        "Humidity    : {} %",
        OneDecimal(reading.humidity_percent())
    )?;
    uwriteln!(out, "{}", SEPARATOR)
}

/// Renders the notice for a failed poll
pub fn render_read_error<W: uWrite>(out: &mut W) -> Result<(), W::Error> {
    uwriteln!(out, "{}", READ_ERROR)
}

/// Renders the boot banner, before the sensor is set up
pub fn render_banner<W: uWrite>(model: SensorModel, out: &mut W) -> Result<(), W::Error> {
    uwriteln!(out, "{}", BANNER_RULE)?;
    uwriteln!(out, "  {} Temperature & Humidity Monitor", model.name())?;
    uwriteln!(out, "  System Initializing...")?;
    uwriteln!(out, "{}", BANNER_RULE)
}

/// Renders the lines that follow a successful sensor setup
pub fn render_ready<W: uWrite>(out: &mut W) -> Result<(), W::Error> {
    uwriteln!(out, "Sensor initialization complete.")?;
    uwriteln!(out, "Reading environmental data...")?;
    out.write_str("\n")
}
