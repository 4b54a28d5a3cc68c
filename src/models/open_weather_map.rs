use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct WeatherCondition {
    pub main: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize, Debug)]
pub struct MainValues {
    #[serde(default)]
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Deserialize, Debug)]
pub struct ForecastEntry {
    pub dt_txt: String,
    pub main: MainValues,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Deserialize, Debug)]
pub struct City {
    #[serde(default)]
    pub name: String,
    pub timezone: i32,
}

/// Document returned by the 5 day / 3 hour forecast endpoint
#[derive(Deserialize, Debug)]
pub struct ForecastResponse {
    pub cod: Value,
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    pub city: Option<City>,
}

/// Document returned by the current weather endpoint
#[derive(Deserialize, Debug)]
pub struct WeatherResponse {
    pub cod: Value,
    #[serde(default)]
    pub message: Value,
    pub main: Option<MainValues>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub timezone: i32,
}

/// Returns the numeric status code carried in a document's `cod` field.
/// The forecast endpoint reports it as a string while the weather endpoint uses a number.
///
/// # Arguments
///
/// * 'cod' - the raw `cod` value
pub fn status_code(cod: &Value) -> Option<u16> {
    match cod {
        Value::Number(n) => n.as_u64().and_then(|c| u16::try_from(c).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_number_and_string() {
        assert_eq!(status_code(&Value::from(200)), Some(200));
        assert_eq!(status_code(&Value::from("404")), Some(404));
        assert_eq!(status_code(&Value::Null), None);
        assert_eq!(status_code(&Value::from("abc")), None);
    }

    #[test]
    fn test_parse_forecast_document() {
        let json = r#"{
            "cod": "200",
            "message": 0,
            "cnt": 1,
            "list": [
                {
                    "dt": 1700000000,
                    "main": { "temp": 4.2, "temp_min": 3.1, "temp_max": 5.6 },
                    "weather": [ { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" } ],
                    "dt_txt": "2023-11-14 21:00:00"
                }
            ],
            "city": { "name": "Toronto", "timezone": -18000 }
        }"#;
        let doc: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status_code(&doc.cod), Some(200));
        assert_eq!(doc.list.len(), 1);
        assert_eq!(doc.list[0].weather[0].icon, "10d");
        assert_eq!(doc.city.unwrap().timezone, -18000);
    }

    #[test]
    fn test_parse_error_document() {
        let json = r#"{ "cod": "404", "message": "city not found" }"#;
        let doc: WeatherResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status_code(&doc.cod), Some(404));
        assert!(doc.main.is_none());
        assert!(doc.weather.is_empty());
    }
}
