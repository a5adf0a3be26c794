use serde::Serialize;

/// One city's mean AQI before and during the event window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityAqiChange {
    #[serde(rename = "City")]
    pub city: String,
    pub aqi_pre: f64,
    pub aqi_covid: f64,
    pub aqi_drop: f64,
}

impl CityAqiChange {
    pub fn new(city: String, aqi_pre: f64, aqi_covid: f64) -> Self {
        Self {
            city,
            aqi_pre,
            aqi_covid,
            aqi_drop: aqi_pre - aqi_covid,
        }
    }
}
