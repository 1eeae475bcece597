//! Unit conversions for presenting compensated values.

const FAHRENHEIT_PER_CELSIUS: f64 = 1.8;
const FAHRENHEIT_OFFSET: f64 = 32.0;
const PASCAL_PER_HECTOPASCAL: f64 = 100.0;
const FEET_PER_METER: f64 = 3.28084;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * FAHRENHEIT_PER_CELSIUS + FAHRENHEIT_OFFSET
}

pub fn pascal_to_hectopascal(pascal: f64) -> f64 {
    pascal / PASCAL_PER_HECTOPASCAL
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}
