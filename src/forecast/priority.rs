use std::collections::HashMap;
use std::sync::LazyLock;
use crate::errors::ForecastError;

/// Icon family (icon code without its day/night tag) mapped to display priority.
/// Lower rank means the condition is more dominant.
static PRIORITY_TABLE: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    HashMap::from([
        ("11", 1), // Thunderstorm
        ("10", 2), // Rain
        ("09", 3), // Drizzle
        ("13", 4), // Snow
        ("04", 5), // Clouds
        ("03", 6), // Clouds
        ("02", 7), // Clouds
        ("50", 8), // Atmosphere
        ("01", 9), // Clear
    ])
});

/// Splits an icon code of the form `NNx` into its 2-digit family and variant,
/// dropping the trailing day/night character.
///
/// # Arguments
///
/// * 'icon' - icon code, e.g. `10d`
pub fn icon_stem(icon: &str) -> Result<&str, ForecastError> {
    if icon.len() < 3 || !icon.is_ascii() {
        return Err(ForecastError::MalformedIcon(icon.to_string()));
    }

    Ok(&icon[..icon.len() - 1])
}

/// Returns the severity rank for the family of the given icon code
///
/// # Arguments
///
/// * 'icon' - icon code, e.g. `10d`
pub fn rank(icon: &str) -> Result<u8, ForecastError> {
    let family = &icon_stem(icon)?[..2];

    PRIORITY_TABLE
        .get(family)
        .copied()
        .ok_or_else(|| ForecastError::UnknownConditionFamily(family.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_extremes() {
        assert_eq!(rank("11d").unwrap(), 1);
        assert_eq!(rank("01n").unwrap(), 9);
        assert_eq!(rank("50d").unwrap(), 8);
    }

    #[test]
    fn test_unknown_family() {
        assert_eq!(rank("77d"), Err(ForecastError::UnknownConditionFamily("77".to_string())));
    }

    #[test]
    fn test_malformed_icon() {
        assert_eq!(rank("1d"), Err(ForecastError::MalformedIcon("1d".to_string())));
        assert!(matches!(icon_stem(""), Err(ForecastError::MalformedIcon(_))));
    }

    #[test]
    fn test_icon_stem() {
        assert_eq!(icon_stem("04n").unwrap(), "04");
    }
}
