//! The structured request describing one warranty card.
//!
//! Every field is optional. Decoding goes through a single routine,
//! [`scalar_text`], which accepts any JSON value and turns it into the text
//! printed on the card. Accessors substitute the documented default whenever a
//! field is absent, so callers never repeat the lookup-or-default dance.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Default printed when `product_name` is missing.
pub const DEFAULT_PRODUCT_NAME: &str = "Unknown Product";
/// Default printed when `purchase_date` is missing.
pub const DEFAULT_PURCHASE_DATE: &str = "Unknown Date";
/// Default printed when `warranty_duration` is missing.
pub const DEFAULT_WARRANTY_DURATION: &str = "Unknown Duration";
/// Default printed when `customer_name` is missing.
pub const DEFAULT_CUSTOMER_NAME: &str = "Unknown Customer";
/// Default printed when `serial_number` is missing.
pub const DEFAULT_SERIAL_NUMBER: &str = "N/A";
/// Default printed when `additional_terms` is missing.
pub const DEFAULT_ADDITIONAL_TERMS: &str = "None";
/// Default file name prefix when `from` is missing.
pub const DEFAULT_SENDER: &str = "None";
/// Text printed for a field that is present but `null`.
pub const NULL_TEXT: &str = "None";

/// Warranty details submitted by a caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WarrantyRecord {
    #[serde(deserialize_with = "scalar_text")]
    product_name: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    purchase_date: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    warranty_duration: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    customer_name: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    serial_number: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    additional_terms: Option<String>,
    #[serde(rename = "from", deserialize_with = "scalar_text")]
    sender: Option<String>,
}

/// Turns any JSON value present in the body into printable text.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Some(NULL_TEXT.to_owned()),
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

impl WarrantyRecord {
    /// Creates an empty record where every field resolves to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a record from a raw JSON body.
    pub fn from_json(bytes: impl AsRef<[u8]>) -> Result<Self> {
        Ok(serde_json::from_slice(bytes.as_ref())?)
    }

    /// Decodes a record from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Sets the product name and returns the updated record.
    pub fn with_product_name(mut self, value: impl Into<String>) -> Self {
        self.product_name = Some(value.into());
        self
    }

    /// Sets the purchase date and returns the updated record.
    pub fn with_purchase_date(mut self, value: impl Into<String>) -> Self {
        self.purchase_date = Some(value.into());
        self
    }

    /// Sets the warranty duration and returns the updated record.
    pub fn with_warranty_duration(mut self, value: impl Into<String>) -> Self {
        self.warranty_duration = Some(value.into());
        self
    }

    /// Sets the customer name and returns the updated record.
    pub fn with_customer_name(mut self, value: impl Into<String>) -> Self {
        self.customer_name = Some(value.into());
        self
    }

    /// Sets the serial number and returns the updated record.
    pub fn with_serial_number(mut self, value: impl Into<String>) -> Self {
        self.serial_number = Some(value.into());
        self
    }

    /// Sets the additional terms and returns the updated record.
    pub fn with_additional_terms(mut self, value: impl Into<String>) -> Self {
        self.additional_terms = Some(value.into());
        self
    }

    /// Sets the sender used to prefix the generated file name.
    pub fn with_sender(mut self, value: impl Into<String>) -> Self {
        self.sender = Some(value.into());
        self
    }

    pub fn product_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or(DEFAULT_PRODUCT_NAME)
    }

    pub fn purchase_date(&self) -> &str {
        self.purchase_date.as_deref().unwrap_or(DEFAULT_PURCHASE_DATE)
    }

    pub fn warranty_duration(&self) -> &str {
        self.warranty_duration
            .as_deref()
            .unwrap_or(DEFAULT_WARRANTY_DURATION)
    }

    pub fn customer_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(DEFAULT_CUSTOMER_NAME)
    }

    pub fn serial_number(&self) -> &str {
        self.serial_number.as_deref().unwrap_or(DEFAULT_SERIAL_NUMBER)
    }

    pub fn additional_terms(&self) -> &str {
        self.additional_terms
            .as_deref()
            .unwrap_or(DEFAULT_ADDITIONAL_TERMS)
    }

    /// Returns the `from` value, which only namespaces the output file.
    pub fn sender(&self) -> &str {
        self.sender.as_deref().unwrap_or(DEFAULT_SENDER)
    }

    /// Returns the six labelled detail lines in the order they are printed.
    pub fn detail_lines(&self) -> [String; 6] {
        [
            format!("Product Name: {}", self.product_name()),
            format!("Purchase Date: {}", self.purchase_date()),
            format!("Warranty Duration: {}", self.warranty_duration()),
            format!("Customer Name: {}", self.customer_name()),
            format!("Serial Number: {}", self.serial_number()),
            format!("Additional Terms: {}", self.additional_terms()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_uses_every_default() {
        let record = WarrantyRecord::from_json(b"{}").expect("decode");

        assert_eq!(record, WarrantyRecord::new());
        assert_eq!(
            record.detail_lines(),
            [
                "Product Name: Unknown Product",
                "Purchase Date: Unknown Date",
                "Warranty Duration: Unknown Duration",
                "Customer Name: Unknown Customer",
                "Serial Number: N/A",
                "Additional Terms: None",
            ]
        );
        assert_eq!(record.sender(), "None");
    }

    #[test]
    fn non_string_scalars_are_stringified() {
        let record = WarrantyRecord::from_value(json!({
            "product_name": 42,
            "serial_number": true,
            "warranty_duration": 1.5,
            "additional_terms": ["a", 1],
        }))
        .expect("decode");

        assert_eq!(record.product_name(), "42");
        assert_eq!(record.serial_number(), "true");
        assert_eq!(record.warranty_duration(), "1.5");
        assert_eq!(record.additional_terms(), r#"["a",1]"#);
    }

    #[test]
    fn present_null_is_printed_as_none() {
        let record = WarrantyRecord::from_value(json!({"product_name": null})).expect("decode");
        assert_eq!(record.product_name(), "None");
        assert_eq!(record.detail_lines()[0], "Product Name: None");
        assert_eq!(record.customer_name(), DEFAULT_CUSTOMER_NAME);
    }

    #[test]
    fn from_key_maps_to_sender_and_unknown_keys_are_ignored() {
        let record =
            WarrantyRecord::from_value(json!({"from": "alice", "colour": "red"})).expect("decode");
        assert_eq!(record.sender(), "alice");
        assert_eq!(record.product_name(), DEFAULT_PRODUCT_NAME);
    }

    #[test]
    fn empty_string_is_kept_verbatim() {
        let record = WarrantyRecord::from_value(json!({"purchase_date": ""})).expect("decode");
        assert_eq!(record.purchase_date(), "");
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = WarrantyRecord::from_json(b"not json").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));

        let err = WarrantyRecord::from_json(b"[1, 2]").unwrap_err();
        assert!(matches!(err, crate::Error::Decode(_)));
    }
}
