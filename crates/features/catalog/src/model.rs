//! Catalog records as they travel over the wire.

use crate::error::CatalogError;
use trek_derive::api_model;

/// A catalog record. Wire names are camelCase and unknown fields are ignored.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct Destination {
    /// Store-assigned identifier.
    pub id: String,
    pub name: String,
    pub country: String,
    /// Typical trip cost. Numeric strings are accepted on input.
    #[serde(deserialize_with = "budget::deserialize")]
    pub budget: f64,
    /// Primary image URL.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_image1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_image2: Option<String>,
    pub description: String,
}

/// A record without an identifier, as produced by the admin form.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Default)]
pub struct DestinationDraft {
    pub name: String,
    pub country: String,
    #[serde(deserialize_with = "budget::deserialize")]
    pub budget: f64,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_image1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_image2: Option<String>,
    pub description: String,
}

impl DestinationDraft {
    /// Checks that every required field is present. Values are never rewritten.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Validation`] naming the first missing field.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let required = [
            ("name", &self.name),
            ("image", &self.image),
            ("description", &self.description),
            ("country", &self.country),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CatalogError::required(*field));
        }

        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(CatalogError::Validation {
                message: format!("budget must be a non-negative number, got {}", self.budget)
                    .into(),
                context: None,
            });
        }

        Ok(())
    }

    /// Attaches a store-assigned identifier.
    #[must_use]
    pub fn into_destination(self, id: impl Into<String>) -> Destination {
        Destination {
            id: id.into(),
            name: self.name,
            country: self.country,
            budget: self.budget,
            image: self.image,
            additional_image1: self.additional_image1,
            additional_image2: self.additional_image2,
            description: self.description,
        }
    }
}

impl Destination {
    /// Secondary images that are present and non-blank.
    pub fn additional_images(&self) -> impl Iterator<Item = &str> {
        [&self.additional_image1, &self.additional_image2]
            .into_iter()
            .filter_map(|image| image.as_deref())
            .filter(|image| !image.trim().is_empty())
    }
}

mod budget {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    /// Accepts JSON numbers and numeric strings, since form inputs submit text.
    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        struct BudgetVisitor;

        impl Visitor<'_> for BudgetVisitor {
            type Value = f64;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
                Ok(v)
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
                Ok(v as f64)
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
                Ok(v as f64)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
                v.trim().parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(BudgetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> DestinationDraft {
        DestinationDraft {
            name: "Paris Getaway".to_owned(),
            country: "France".to_owned(),
            budget: 450.0,
            image: "https://img.example/paris.jpg".to_owned(),
            description: "Museums and cafés".to_owned(),
            ..DestinationDraft::default()
        }
    }

    #[test]
    fn well_formed_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn each_required_field_is_checked() {
        for field in ["name", "image", "description", "country"] {
            let mut d = draft();
            match field {
                "name" => d.name = "  ".to_owned(),
                "image" => d.image.clear(),
                "description" => d.description.clear(),
                _ => d.country = "\t".to_owned(),
            }
            let err = d.validate().unwrap_err();
            assert!(err.to_string().contains(field), "{err} should name {field}");
        }
    }

    #[test]
    fn negative_or_nan_budget_is_rejected() {
        let negative = DestinationDraft { budget: -1.0, ..draft() };
        let nan = DestinationDraft { budget: f64::NAN, ..draft() };
        assert!(matches!(negative.validate(), Err(CatalogError::Validation { .. })));
        assert!(matches!(nan.validate(), Err(CatalogError::Validation { .. })));
    }

    #[test]
    fn wire_format_is_camel_case_and_lenient() {
        let raw = json!({
            "id": "abc",
            "name": "Kyoto",
            "country": "Japan",
            "budget": "800",
            "image": "kyoto.jpg",
            "additionalImage1": "temple.jpg",
            "description": "Temples",
            "rating": 5
        });

        let dest: Destination = serde_json::from_value(raw).unwrap();
        assert!((dest.budget - 800.0).abs() < f64::EPSILON);
        assert_eq!(dest.additional_image1.as_deref(), Some("temple.jpg"));
        assert!(dest.additional_image2.is_none());

        let back = serde_json::to_value(&dest).unwrap();
        assert_eq!(back["additionalImage1"], "temple.jpg");
        assert!(back.get("additionalImage2").is_none());
    }

    #[test]
    fn blank_additional_images_are_hidden() {
        let dest = DestinationDraft { additional_image1: Some(String::new()), ..draft() }
            .into_destination("x");
        assert_eq!(dest.additional_images().count(), 0);
    }
}
