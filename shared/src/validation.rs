//! Input validation functions
//!
//! Range checks for the stateless calculator's single values, the clock
//! time format shared with onboarding, and display labels for field keys.
//! Range checks on the onboarding record itself use the `validator` derive.

use once_cell::sync::Lazy;
use regex_lite::Regex;

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;
pub const MIN_HEIGHT_CM: f64 = 50.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;

static CLOCK_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid clock regex"));

/// Validate age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age < MIN_AGE {
        return Err(format!("Age must be at least {} year", MIN_AGE));
    }
    if age > MAX_AGE {
        return Err(format!("Age must be at most {} years", MAX_AGE));
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < MIN_HEIGHT_CM {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < MIN_WEIGHT_KG {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate a 24h clock time in HH:MM form
pub fn validate_clock_time(time: &str) -> Result<(), String> {
    if CLOCK_TIME.is_match(time) {
        Ok(())
    } else {
        Err("Time must be in HH:MM format".to_string())
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "sex" => "Biological Sex",
        "age" => "Age",
        "height" | "height_cm" | "height_feet" | "height_inches" => "Height",
        "weight" | "weight_kg" | "weight_lbs" => "Current Weight",
        "body_fat_percentage" => "Body Fat",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        "training_days_per_week" => "Training Days",
        "dietary_preference" => "Diet",
        "allergies" => "Allergies",
        "budget" => "Budget",
        "cooking_skill" => "Cooking Skill",
        "meals_per_day" => "Meals Per Day",
        "wake_up_time" => "Wake-up Time",
        "bed_time" => "Bedtime",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_age() {
        assert!(validate_age(30).is_ok());
        assert!(validate_age(1).is_ok());
        assert!(validate_age(120).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(121).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(170.0).is_ok());
        assert!(validate_height_cm(50.0).is_ok());
        assert!(validate_height_cm(300.0).is_ok());
        assert!(validate_height_cm(49.9).is_err());
        assert!(validate_height_cm(300.1).is_err());
        assert!(validate_height_cm(-10.0).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(70.0).is_ok());
        assert!(validate_weight(10.0).is_err());
        assert!(validate_weight(600.0).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_clock_time() {
        assert!(validate_clock_time("07:00").is_ok());
        assert!(validate_clock_time("23:59").is_ok());
        assert!(validate_clock_time("24:00").is_err());
        assert!(validate_clock_time("7:00").is_err());
        assert!(validate_clock_time("").is_err());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("sex"), "Biological Sex");
        assert_eq!(get_field_display_label("height_cm"), "Height");
        assert_eq!(get_field_display_label("meals_per_day"), "Meals Per Day");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
        assert_eq!(
            get_missing_fields_labels(&["goal".to_string(), "age".to_string()]),
            vec!["Goal", "Age"]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_height_range(height in 50.0f64..=300.0) {
            prop_assert!(validate_height_cm(height).is_ok());
        }

        #[test]
        fn prop_valid_weight_range(weight in 20.0f64..=500.0) {
            prop_assert!(validate_weight(weight).is_ok());
        }

        #[test]
        fn prop_any_clock_time_accepted(hour in 0u32..24, minute in 0u32..60) {
            let time = format!("{:02}:{:02}", hour, minute);
            prop_assert!(validate_clock_time(&time).is_ok());
        }
    }
}
