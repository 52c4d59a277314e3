//! Station reference data.

use super::StationId;

/// A place where a bus stops. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Station id
    pub id: StationId,
    /// Display name
    pub name: String,
    /// City the station serves, if recorded
    pub city: Option<String>,
}

impl Station {
    /// Creates a station with no city recorded.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: None,
        }
    }

    /// Sets the city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let station = Station::new(StationId(1), "Cairo").with_city("Cairo");
        assert_eq!(station.name, "Cairo");
        assert_eq!(station.city.as_deref(), Some("Cairo"));

        let bare = Station::new(StationId(2), "Giza");
        assert!(bare.city.is_none());
    }
}
