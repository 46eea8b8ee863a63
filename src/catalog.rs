//! Catalog, site and horizon-sample input readers.
//!
//! The core pipeline only ever consumes the parsed shapes ([`Source`],
//! [`Site`](crate::site::Site), [`HorizonSample`](crate::horizon::HorizonSample));
//! the CSV storage format lives entirely in this module. Expected layouts:
//!
//! ```text
//! catalog:  name,ra,dec          (degrees)
//! site:     latitude,longitude,height   (degrees, degrees, meters; one record)
//! horizon:  azimuth,altitude     (degrees)
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::constants::Degree;
use crate::errors::NightwatchError;
use crate::horizon::HorizonSample;
use crate::site::Site;

/// One candidate observation target.
///
/// `name` is the unique key used throughout reports; `ra`/`dec` are ICRS
/// equatorial coordinates in degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Source {
    pub name: String,
    pub ra: Degree,
    pub dec: Degree,
}

#[derive(Debug, Deserialize)]
struct SiteRecord {
    latitude: Degree,
    longitude: Degree,
    height: f64,
}

/// Read the source catalog from a headered CSV file.
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Source>, NightwatchError> {
    parse_catalog(std::fs::File::open(path)?)
}

/// Parse a source catalog from any reader (see module docs for the layout).
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<Source>, NightwatchError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize()
        .map(|record| record.map_err(NightwatchError::from))
        .collect()
}

/// Read the observing site coordinates from a single-record CSV file.
pub fn read_site<P: AsRef<Path>>(path: P) -> Result<Site, NightwatchError> {
    parse_site(std::fs::File::open(path)?)
}

/// Parse the observing site from any reader; exactly one record is expected.
pub fn parse_site<R: Read>(reader: R) -> Result<Site, NightwatchError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = csv_reader.deserialize();
    let record: SiteRecord = match records.next() {
        Some(record) => record?,
        None => {
            return Err(NightwatchError::InvalidSite(
                "site file contains no record".to_string(),
            ))
        }
    };
    if records.next().is_some() {
        return Err(NightwatchError::InvalidSite(
            "site file contains more than one record".to_string(),
        ));
    }
    Site::new(record.latitude, record.longitude, record.height)
}

/// Read the horizon obstruction samples from a headered CSV file.
pub fn read_horizon_samples<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<HorizonSample>, NightwatchError> {
    parse_horizon_samples(std::fs::File::open(path)?)
}

/// Parse horizon obstruction samples from any reader.
pub fn parse_horizon_samples<R: Read>(reader: R) -> Result<Vec<HorizonSample>, NightwatchError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize()
        .map(|record| record.map_err(NightwatchError::from))
        .collect()
}
