//! Estimation Prompt Builder
//!
//! Builds the natural-language request sent to the generative service. Two
//! modes exist, selected by whether the vehicle key hit the verified store:
//!
//! - **Constrained**: the verified values are embedded as fixed context and
//!   the service is asked to infer only the remaining engine fields.
//! - **Unconstrained**: no verified data exists, so the full attribute set is
//!   requested with a conventional petrol baseline.
//!
//! Both modes instruct the service to reply with a single JSON object and
//! nothing else; every field must carry its own confidence in [0, 1].

use std::collections::BTreeMap;

use crate::specs::record::SpecValue;
use crate::specs::store::VehicleKey;

/// Response schema for the fields the verified store never carries
const ENGINE_FIELDS_SCHEMA: &str = r#"  "bhp":          { "value": number, "confidence": 0.0-1.0 },
  "torque_nm":    { "value": number, "confidence": 0.0-1.0 },
  "cylinders":    { "value": number, "confidence": 0.0-1.0 },
  "aspiration":   { "value": string, "confidence": 0.0-1.0 },
  "gearbox":      { "value": string, "confidence": 0.0-1.0 },
  "fuel":         { "value": string, "confidence": 0.0-1.0 },
  "acceleration": { "value": number, "confidence": 0.0-1.0, "unit": "s (0-100)" },
  "drive_type":   { "value": string, "confidence": 0.0-1.0, "options": ["FWD", "RWD", "AWD"] }"#;

/// Additional schema lines for the fields the store would otherwise provide
const BASE_FIELDS_SCHEMA: &str = r#"  "displacement": { "value": number, "confidence": 0.0-1.0 },
  "max_speed":    { "value": number, "confidence": 0.0-1.0 },
  "doors":        { "value": number, "confidence": 0.0-1.0 },
  "seats":        { "value": number, "confidence": 0.0-1.0 },"#;

/// Build the estimation request for a vehicle key.
///
/// `verified` selects the mode: `Some` yields a constrained request with the
/// trusted values as fixed context, `None` an unconstrained full estimate.
pub fn build_prompt(key: &VehicleKey, verified: Option<&BTreeMap<String, SpecValue>>) -> String {
    // Underscores in identity labels are display noise in prose
    let car = key.model.replace('_', " ");
    let year = &key.year;

    match verified {
        Some(fields) => {
            let mut context = String::new();
            for (name, value) in fields {
                context.push_str(&format!("{} = {}\n", name, value));
            }

            format!(
                "You are an automotive engine specification database.\n\
                 \n\
                 Car: {car}\n\
                 Year: {year}\n\
                 \n\
                 Verified data:\n\
                 {context}\
                 \n\
                 Using ONLY the verified values above and real engine physics,\n\
                 infer the remaining engine fields.\n\
                 \n\
                 Return ONLY valid JSON in this exact format:\n\
                 \n\
                 {{\n{ENGINE_FIELDS_SCHEMA}\n}}\n\
                 \n\
                 Confidence rules:\n\
                 - If strongly constrained by displacement or physics -> confidence > 0.80\n\
                 - If estimated but plausible -> confidence 0.60-0.80\n\
                 - If uncertain -> confidence < 0.60\n\
                 \n\
                 Return JSON only. No text. No explanation.\n"
            )
        }
        None => format!(
            "You are an automotive engine specification database.\n\
             \n\
             Car: {car}\n\
             Year: {year}\n\
             \n\
             No verified data exists.\n\
             Estimate realistic PETROL engine specs.\n\
             \n\
             Return ONLY valid JSON in this exact format:\n\
             \n\
             {{\n{BASE_FIELDS_SCHEMA}\n{ENGINE_FIELDS_SCHEMA}\n}}\n\
             \n\
             Confidence rules:\n\
             - If based on typical petrol engines -> confidence 0.60-0.75\n\
             - If weakly supported -> confidence < 0.60\n\
             \n\
             Return JSON only. No text. No explanation.\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verified_fields() -> BTreeMap<String, SpecValue> {
        BTreeMap::from([
            ("displacement".to_string(), SpecValue::Number(2.0)),
            ("max_speed".to_string(), SpecValue::Number(210.0)),
            ("doors".to_string(), SpecValue::Number(4.0)),
            ("seats".to_string(), SpecValue::Number(5.0)),
        ])
    }

    #[test]
    fn test_constrained_prompt_embeds_verified_values() {
        let key = VehicleKey::new("Audi_A4", "2014");
        let fields = verified_fields();
        let prompt = build_prompt(&key, Some(&fields));

        assert!(prompt.contains("Car: Audi A4"));
        assert!(prompt.contains("Year: 2014"));
        assert!(prompt.contains("Verified data:"));
        assert!(prompt.contains("displacement = 2"));
        assert!(prompt.contains("max_speed = 210"));
        // Constrained mode asks only for the unknowns
        assert!(prompt.contains(r#""bhp""#));
        assert!(!prompt.contains(r#""displacement": {"#));
    }

    #[test]
    fn test_unconstrained_prompt_requests_full_set() {
        let key = VehicleKey::new("Mystery_Roadster", "1987");
        let prompt = build_prompt(&key, None);

        assert!(prompt.contains("No verified data exists."));
        assert!(prompt.contains("PETROL"));
        assert!(prompt.contains(r#""displacement""#));
        assert!(prompt.contains(r#""seats""#));
        assert!(prompt.contains(r#""drive_type""#));
        assert!(!prompt.contains("Verified data:"));
    }

    #[test]
    fn test_both_modes_demand_json_only() {
        let key = VehicleKey::new("Audi_A4", "2014");
        let fields = verified_fields();
        for prompt in [
            build_prompt(&key, Some(&fields)),
            build_prompt(&key, None),
        ] {
            assert!(prompt.contains("Return JSON only. No text. No explanation."));
            assert!(prompt.contains(r#"["FWD", "RWD", "AWD"]"#));
        }
    }
}
