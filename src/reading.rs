/// One validated sample of both sensor channels.
///
/// A `Reading` only exists when both values are finite numbers; a cycle
/// with any invalid channel produces no `Reading` at all.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Reading {
    temperature_celsius: f64,
    humidity_percent: f64,
}

impl Reading {
    /// Returns `None` if either value is NaN or infinite
    pub fn new(temperature_celsius: f64, humidity_percent: f64) -> Option<Reading> {
        if temperature_celsius.is_finite() && humidity_percent.is_finite() {
            Some(Self {
                temperature_celsius,
                humidity_percent,
            })
        } else {
            None
        }
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    pub fn humidity_percent(&self) -> f64 {
        self.humidity_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_finite_values() {
        let reading = Reading::new(21.0, 55.5).unwrap();
        assert_eq!(reading.temperature_celsius(), 21.0);
        assert_eq!(reading.humidity_percent(), 55.5);
    }

    #[test]
    fn rejects_any_non_finite_channel() {
        assert!(Reading::new(f64::NAN, 60.0).is_none());
        assert!(Reading::new(21.0, f64::NAN).is_none());
        assert!(Reading::new(f64::NAN, f64::NAN).is_none());
        assert!(Reading::new(f64::INFINITY, 60.0).is_none());
        assert!(Reading::new(21.0, f64::NEG_INFINITY).is_none());
    }
}
