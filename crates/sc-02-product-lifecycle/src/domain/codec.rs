//! # Record Codec
//!
//! The ledger byte format of a [`ProductRecord`].
//!
//! A record is a JSON object whose eleven members appear in this fixed order:
//!
//! ```text
//! ID, Name, Description, Price, Status, Manufacturer, Consumer,
//! CreatedDate, ModifiedDate, DeliveredDate, OwnerType
//! ```
//!
//! Output is compact and escapes `<`, `>`, `&`, U+2028 and U+2029 as `\uXXXX`,
//! so every node that encodes the same record commits identical bytes.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::domain::entities::{ProductRecord, ProductStatus};
use crate::errors::CodecError;

/// Member names in encoding order.
pub const FIELD_ORDER: [&str; 11] = [
    "ID",
    "Name",
    "Description",
    "Price",
    "Status",
    "Manufacturer",
    "Consumer",
    "CreatedDate",
    "ModifiedDate",
    "DeliveredDate",
    "OwnerType",
];

impl Serialize for ProductStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for ProductRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Product", FIELD_ORDER.len())?;
        state.serialize_field("ID", &self.id)?;
        state.serialize_field("Name", &self.name)?;
        state.serialize_field("Description", &self.description)?;
        state.serialize_field("Price", &self.price)?;
        state.serialize_field("Status", &self.status)?;
        state.serialize_field("Manufacturer", &self.manufacturer)?;
        state.serialize_field("Consumer", &self.consumer)?;
        state.serialize_field("CreatedDate", &self.created_date)?;
        state.serialize_field("ModifiedDate", &self.modified_date)?;
        state.serialize_field("DeliveredDate", &self.delivered_date)?;
        state.serialize_field("OwnerType", &self.owner_type)?;
        state.end()
    }
}

/// Encode a record into its ledger bytes.
pub fn encode_record(record: &ProductRecord) -> Result<Vec<u8>, CodecError> {
    let json = serde_json::to_string(record)?;
    Ok(escape_html(&json).into_bytes())
}

/// Decode ledger bytes into a record.
///
/// Missing members decode as empty strings, except `Status` which must hold
/// one of the known status texts. Unknown members are ignored.
pub fn decode_record(bytes: &[u8]) -> Result<ProductRecord, CodecError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let object = value
        .as_object()
        .ok_or_else(|| CodecError::Malformed("expected a JSON object".to_string()))?;

    let text = |name: &str| -> Result<String, CodecError> {
        match object.get(name) {
            None | Some(serde_json::Value::Null) => Ok(String::new()),
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(CodecError::Malformed(format!(
                "member {} must be a string, found {}",
                name, other
            ))),
        }
    };

    Ok(ProductRecord {
        id: text("ID")?,
        name: text("Name")?,
        description: text("Description")?,
        price: text("Price")?,
        status: text("Status")?.parse()?,
        manufacturer: text("Manufacturer")?,
        consumer: text("Consumer")?,
        created_date: text("CreatedDate")?,
        modified_date: text("ModifiedDate")?,
        delivered_date: text("DeliveredDate")?,
        owner_type: text("OwnerType")?,
    })
}

/// Replace HTML-significant characters and the JS line separators with
/// `\uXXXX` escapes. Member names never contain them, so only string values
/// are affected.
fn escape_html(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}
