//! Stateless calculator and unit conversions
//!
//! Same pipeline as a stored profile, for callers that only want the
//! numbers. Inputs get the per-field checks the onboarding gate applies
//! before they reach the core.

use crate::error::ApiError;
use macromasters_shared::types::{
    CalculateMacrosRequest, HeightConversionQuery, HeightConversionResponse, WeightConversionQuery,
    WeightConversionResponse,
};
use macromasters_shared::validation::{validate_age, validate_height_cm, validate_weight};
use macromasters_shared::{
    calculate_full_macros, cm_to_feet_inches, feet_inches_to_cm, kg_to_lbs, lbs_to_kg,
    MacroCalculation,
};

pub struct CalculatorService;

impl CalculatorService {
    pub fn calculate(req: &CalculateMacrosRequest) -> Result<MacroCalculation, ApiError> {
        field_check("weight_kg", validate_weight(req.weight_kg))?;
        field_check("height_cm", validate_height_cm(req.height_cm))?;
        field_check("age", validate_age(req.age))?;

        Ok(calculate_full_macros(
            req.weight_kg,
            req.height_cm,
            req.age,
            req.sex,
            req.activity_level,
            req.goal,
            req.meals_per_day,
        ))
    }

    /// Convert a height given in either unit system
    pub fn convert_height(query: &HeightConversionQuery) -> Result<HeightConversionResponse, ApiError> {
        let cm = match (query.cm, query.feet, query.inches) {
            (Some(cm), _, _) => cm,
            (None, Some(feet), inches) => feet_inches_to_cm(feet, inches.unwrap_or(0.0)),
            (None, None, _) => {
                return Err(ApiError::BadRequest(
                    "Provide either cm or feet (with optional inches)".to_string(),
                ))
            }
        };
        if !cm.is_finite() {
            return Err(ApiError::Validation("Height must be a valid number".to_string()));
        }

        let imperial = cm_to_feet_inches(cm);
        Ok(HeightConversionResponse {
            cm,
            display: imperial.to_string(),
            imperial,
        })
    }

    /// Convert a weight given in either unit
    pub fn convert_weight(query: &WeightConversionQuery) -> Result<WeightConversionResponse, ApiError> {
        let (kg, lbs) = match (query.kg, query.lbs) {
            (Some(kg), _) => (kg, kg_to_lbs(kg)),
            (None, Some(lbs)) => (lbs_to_kg(lbs), lbs),
            (None, None) => return Err(ApiError::BadRequest("Provide either kg or lbs".to_string())),
        };
        if !kg.is_finite() || !lbs.is_finite() {
            return Err(ApiError::Validation("Weight must be a valid number".to_string()));
        }
        Ok(WeightConversionResponse { kg, lbs })
    }
}

fn field_check(field: &str, result: Result<(), String>) -> Result<(), ApiError> {
    result.map_err(|message| ApiError::FieldValidation {
        field: field.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use macromasters_shared::{ActivityLevel, BiologicalSex, Goal, MealsPerDay};
    use proptest::prelude::*;
    use rstest::rstest;

    fn request(weight_kg: f64, height_cm: f64, age: u32) -> CalculateMacrosRequest {
        CalculateMacrosRequest {
            weight_kg,
            height_cm,
            age,
            sex: BiologicalSex::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Recomp,
            meals_per_day: MealsPerDay::default(),
        }
    }

    #[test]
    fn test_calculate_scenario() {
        let macros = CalculatorService::calculate(&request(80.0, 180.0, 30)).unwrap();
        assert_eq!(macros.bmr, 1780);
        assert_eq!(macros.daily_calories, 2759);
        assert_eq!(macros.protein, 144);
        assert_eq!(macros.fats, 77);
        assert_eq!(macros.carbs, 373);
    }

    #[rstest]
    #[case(0.0, 180.0, 30, "weight_kg")]
    #[case(80.0, 0.0, 30, "height_cm")]
    #[case(80.0, 180.0, 0, "age")]
    fn test_calculate_rejects_non_positive(
        #[case] weight: f64,
        #[case] height: f64,
        #[case] age: u32,
        #[case] expected_field: &str,
    ) {
        match CalculatorService::calculate(&request(weight, height, age)) {
            Err(ApiError::FieldValidation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected field validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_height() {
        let resp = CalculatorService::convert_height(&HeightConversionQuery {
            feet: Some(5.0),
            inches: Some(10.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(resp.cm, 178.0);
        assert_eq!(resp.display, "5'10\"");

        let resp = CalculatorService::convert_height(&HeightConversionQuery {
            cm: Some(180.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(resp.imperial.feet, 5);
        assert_eq!(resp.imperial.inches, 11);

        assert!(CalculatorService::convert_height(&HeightConversionQuery::default()).is_err());
    }

    #[test]
    fn test_convert_weight() {
        let resp = CalculatorService::convert_weight(&WeightConversionQuery {
            lbs: Some(160.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(resp.kg, 72.6);

        let resp = CalculatorService::convert_weight(&WeightConversionQuery {
            kg: Some(80.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(resp.lbs, 176.0);

        assert!(CalculatorService::convert_weight(&WeightConversionQuery::default()).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: every in-range request is accepted and matches the core
        #[test]
        fn prop_valid_requests_match_core(
            weight in 20.0f64..=500.0,
            height in 50.0f64..=300.0,
            age in 1u32..=120
        ) {
            let req = request(weight, height, age);
            let macros = CalculatorService::calculate(&req).unwrap();
            let expected = calculate_full_macros(
                weight,
                height,
                age,
                req.sex,
                req.activity_level,
                req.goal,
                req.meals_per_day,
            );
            prop_assert_eq!(macros, expected);
        }
    }
}
