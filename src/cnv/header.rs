// ctdproc/src/cnv/header.rs

use super::errors::CnvReadError;
use crate::cast::Position;
use log::trace;

/// Metadata collected from the `*`/`#` header of a `.cnv` file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CnvHeader {
    /// Short column names in declaration order (`prDM`, `t090C`, ...).
    pub names: Vec<String>,
    /// Long descriptions, e.g. `Pressure, Digiquartz [db]`.
    pub(crate) long_names: Vec<String>,
    pub bad_flag: Option<f64>,
    nmea_latitude: Option<f64>,
    nmea_longitude: Option<f64>,
    user_latitude: Option<f64>,
    user_longitude: Option<f64>,
}

impl CnvHeader {
    /// NMEA position if the header has one, otherwise the user-entered position.
    pub fn position(&self) -> Option<Position> {
        let latitude = self.nmea_latitude.or(self.user_latitude)?;
        let longitude = self.nmea_longitude.or(self.user_longitude)?;
        Some(Position::new(latitude, longitude))
    }

    pub(crate) fn parse_line(&mut self, line: &str) -> Result<(), CnvReadError> {
        if let Some(declaration) = line.strip_prefix("# name ") {
            return self.parse_name(declaration);
        }
        if let Some(flag) = line.strip_prefix("# bad_flag") {
            let value = flag.trim_start_matches([' ', '=']).trim();
            self.bad_flag = value.parse().ok();
            return Ok(());
        }
        if let Some(nmea) = line.strip_prefix("* NMEA ") {
            if let Some((key, value)) = nmea.split_once('=') {
                match key.trim() {
                    "Latitude" => self.nmea_latitude = Some(parse_coordinate(value)?),
                    "Longitude" => self.nmea_longitude = Some(parse_coordinate(value)?),
                    _ => (),
                }
            }
            return Ok(());
        }
        if let Some(user) = line.strip_prefix("**") {
            if let Some((key, value)) = user.split_once([':', '=']) {
                let key = key.trim().to_ascii_lowercase();
                if key == "latitude" || key == "lat" {
                    self.user_latitude = Some(parse_coordinate(value)?);
                } else if key == "longitude" || key == "lon" {
                    self.user_longitude = Some(parse_coordinate(value)?);
                }
            }
        }
        Ok(())
    }

    // `0 = prDM: Pressure, Digiquartz [db]`
    fn parse_name(&mut self, declaration: &str) -> Result<(), CnvReadError> {
        let invalid = || CnvReadError::InvalidColumnDeclaration(declaration.to_string());
        let (_, definition) = declaration.split_once('=').ok_or_else(invalid)?;
        let (short, long) = match definition.split_once(':') {
            Some((short, long)) => (short.trim(), long.trim()),
            None => (definition.trim(), ""),
        };
        if short.is_empty() {
            return Err(invalid());
        }
        trace!("Column {}: {} ({})", self.names.len(), short, long);
        self.names.push(short.to_string());
        self.long_names.push(long.to_string());
        Ok(())
    }
}

/// Parses a latitude or longitude in decimal degrees.
///
/// Accepts decimal degrees (`-30.5`), degrees and decimal minutes
/// (`30 30.00 S`) or degrees, minutes and seconds, with an optional trailing
/// hemisphere letter. `S` and `W` make the result negative.
pub fn parse_coordinate(text: &str) -> Result<f64, CnvReadError> {
    let invalid = || CnvReadError::InvalidPosition(text.trim().to_string());
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    let mut sign = 1.0;
    let hemisphere = tokens.last().map(|token| token.to_ascii_uppercase());
    match hemisphere.as_deref() {
        Some("S") | Some("W") => {
            sign = -1.0;
            tokens.pop();
        }
        Some("N") | Some("E") => {
            tokens.pop();
        }
        _ => (),
    }
    let numbers = tokens
        .iter()
        .map(|token| token.parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>, _>>()?;
    let (degrees, rest) = numbers.split_first().ok_or_else(invalid)?;
    if rest.len() > 2 {
        return Err(invalid());
    }
    let fraction = rest
        .iter()
        .zip([60.0, 3600.0])
        .map(|(value, divisor)| value / divisor)
        .sum::<f64>();
    let magnitude = degrees.abs() + fraction;
    if degrees.is_sign_negative() {
        sign = -sign;
    }
    Ok(sign * magnitude)
}
