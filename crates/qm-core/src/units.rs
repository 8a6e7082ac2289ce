// qm-core/src/units.rs

use uom::si::f64::ThermodynamicTemperature as UomThermodynamicTemperature;

// Public canonical unit type (SI, f64)
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn degf(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

/// Temperature value in kelvin.
#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Temperature value in degrees Celsius.
#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

/// Absolute temperature for a Celsius reading.
#[inline]
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    to_kelvin(degc(t_c))
}

#[inline]
pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    to_celsius(k(t_k))
}

#[inline]
pub fn fahrenheit_to_celsius(t_f: f64) -> f64 {
    to_celsius(degf(t_f))
}

pub mod constants {
    /// Molar gas constant [J/(mol K)]
    pub const R_J_PER_MOL_K: f64 = 8.314_462_618;
    /// Molar gas constant [cal/(mol K)], the unit the kinetics regressions use
    pub const R_CAL_PER_MOL_K: f64 = 1.987_2;
}
