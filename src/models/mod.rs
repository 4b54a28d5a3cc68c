pub mod forecast;
pub mod open_weather_map;
