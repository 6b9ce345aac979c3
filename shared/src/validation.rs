//! Input validation functions
//!
//! Field-level checks return `Result<(), String>` with a user-facing message.
//! Request structs additionally use the `validator` crate derive macros.

/// Longest accepted menu name, in characters
pub const MAX_MENU_NAME_CHARS: usize = 100;

/// Largest single-meal nutrient amount accepted
pub const MAX_NUTRIENT_AMOUNT: f64 = 50_000.0;

/// Largest photo accepted for analysis (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Serving size bounds in grams
pub const MIN_SERVING_G: f64 = 10.0;
pub const MAX_SERVING_G: f64 = 500.0;

/// Validate a meal's menu name
pub fn validate_menu_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Menu name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_MENU_NAME_CHARS {
        return Err(format!(
            "Menu name must be at most {MAX_MENU_NAME_CHARS} characters"
        ));
    }
    Ok(())
}

/// Validate a single nutrient amount
pub fn validate_nutrient_amount(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Amount must be a valid number".to_string());
    }
    if value < 0.0 {
        return Err("Amount cannot be negative".to_string());
    }
    if value > MAX_NUTRIENT_AMOUNT {
        return Err("Amount unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a serving size in grams
pub fn validate_serving_size(grams: f64) -> Result<(), String> {
    if grams.is_nan() || grams.is_infinite() {
        return Err("Serving size must be a valid number".to_string());
    }
    if !(MIN_SERVING_G..=MAX_SERVING_G).contains(&grams) {
        return Err(format!(
            "Serving size must be between {MIN_SERVING_G} and {MAX_SERVING_G} g"
        ));
    }
    Ok(())
}

/// Validate the MIME type of an uploaded photo
pub fn validate_image_mime(mime_type: &str) -> Result<(), String> {
    match mime_type.split_once('/') {
        Some((kind, subtype)) if kind.eq_ignore_ascii_case("image") && !subtype.is_empty() => Ok(()),
        _ => Err(format!("Expected an image upload, got '{mime_type}'")),
    }
}

/// Validate the size of an uploaded photo
pub fn validate_image_size(len: usize) -> Result<(), String> {
    if len == 0 {
        return Err("Image is empty".to_string());
    }
    if len > MAX_IMAGE_BYTES {
        return Err(format!(
            "Image must be at most {} MiB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        ));
    }
    Ok(())
}

/// Valid meal type values
pub const VALID_MEAL_TYPES: &[&str] = &["breakfast", "lunch", "dinner", "snack"];

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "gender" => "Gender",
        "height" => "Height",
        "weight" => "Weight",
        "birthYear" | "birth_year" => "Birth Year",
        "activityLevel" | "activity_level" => "Activity Level",
        "goal" => "Goal",
        "menuName" | "menu_name" => "Menu Name",
        "mealType" | "meal_type" => "Meal Type",
        "serving" | "servingSize" | "serving_size" => "Serving Size",
        "image" => "Photo",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_menu_name() {
        assert!(validate_menu_name("Bibimbap").is_ok());
        assert!(validate_menu_name("  Salad  ").is_ok());
        assert!(validate_menu_name("").is_err());
        assert!(validate_menu_name("   ").is_err());
        assert!(validate_menu_name(&"a".repeat(100)).is_ok());
        assert!(validate_menu_name(&"a".repeat(101)).is_err());
        // counted in characters, not bytes
        assert!(validate_menu_name(&"김".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_nutrient_amount() {
        assert!(validate_nutrient_amount(0.0).is_ok());
        assert!(validate_nutrient_amount(650.5).is_ok());
        assert!(validate_nutrient_amount(-1.0).is_err());
        assert!(validate_nutrient_amount(f64::NAN).is_err());
        assert!(validate_nutrient_amount(f64::INFINITY).is_err());
        assert!(validate_nutrient_amount(100_000.0).is_err());
    }

    #[test]
    fn test_validate_serving_size() {
        assert!(validate_serving_size(10.0).is_ok());
        assert!(validate_serving_size(100.0).is_ok());
        assert!(validate_serving_size(500.0).is_ok());
        assert!(validate_serving_size(9.9).is_err());
        assert!(validate_serving_size(500.1).is_err());
        assert!(validate_serving_size(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image_mime("image/jpeg").is_ok());
        assert!(validate_image_mime("IMAGE/png").is_ok());
        assert!(validate_image_mime("application/pdf").is_err());
        assert!(validate_image_mime("image/").is_err());
        assert!(validate_image_mime("").is_err());

        assert!(validate_image_size(1).is_ok());
        assert!(validate_image_size(MAX_IMAGE_BYTES).is_ok());
        assert!(validate_image_size(0).is_err());
        assert!(validate_image_size(MAX_IMAGE_BYTES + 1).is_err());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("birthYear"), "Birth Year");
        assert_eq!(get_field_display_label("activity_level"), "Activity Level");
        assert_eq!(get_field_display_label("menuName"), "Menu Name");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    #[test]
    fn test_validation_error() {
        let err = ValidationError::new("menuName", "cannot be empty");
        assert_eq!(err.field, "menuName");
        assert_eq!(err.display_label, "Menu Name");
        assert_eq!(err.user_message(), "Menu Name: cannot be empty");
        assert_eq!(err.to_string(), err.user_message());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_serving_range(grams in 10.0f64..=500.0) {
            prop_assert!(validate_serving_size(grams).is_ok());
        }

        #[test]
        fn prop_invalid_serving_below_min(grams in 0.0f64..10.0) {
            prop_assert!(validate_serving_size(grams).is_err());
        }

        #[test]
        fn prop_negative_amounts_rejected(value in -10000.0f64..-0.001) {
            prop_assert!(validate_nutrient_amount(value).is_err());
        }

        #[test]
        fn prop_menu_name_length(len in 1usize..=100) {
            let name: String = (0..len).map(|_| 'x').collect();
            prop_assert!(validate_menu_name(&name).is_ok());
        }
    }
}
