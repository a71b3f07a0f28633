use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Domain fields every new guitar must carry, in storage order.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "neck", "neckLength", "body", "pickups"];

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields. Required: name, neck, neckLength, body, pickups";

pub const NON_OBJECT_BODY_MESSAGE: &str = "Request body must be a JSON object";

/// A guitar as served over HTTP: store-assigned `id` followed by its attributes.
///
/// `attributes` holds the five domain fields plus anything else the backing
/// document carried, in document order. It never contains `id`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Guitar {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Guitar {
    /// Build a record from a stored object; a stale `id` key in the object is dropped.
    pub fn from_stored(id: u64, stored: Map<String, Value>) -> Self {
        let attributes = stored.into_iter().filter(|(k, _)| k != "id").collect();
        Self { id, attributes }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Body of a create or update request.
///
/// A field is `Some` whenever the key is present, including an explicit `null`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuitarInput {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub neck: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub neck_length: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub body: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub pickups: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JSON truthiness: `null`, `false`, zero and the empty string count as missing.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl GuitarInput {
    /// Read a parsed request body. Only object keys name fields: an array carries
    /// none, and a bare scalar is not a usable body at all.
    pub fn from_body(body: Value) -> Result<Self, ServiceError> {
        match body {
            Value::Object(map) => serde_json::from_value(Value::Object(map))
                .map_err(|e| ServiceError::Validation(e.to_string())),
            Value::Array(_) => Ok(Self::default()),
            _ => Err(ServiceError::Validation(NON_OBJECT_BODY_MESSAGE.into())),
        }
    }

    fn into_fields(self) -> [(&'static str, Option<Value>); 5] {
        let [name, neck, neck_length, body, pickups] = REQUIRED_FIELDS;
        [
            (name, self.name),
            (neck, self.neck),
            (neck_length, self.neck_length),
            (body, self.body),
            (pickups, self.pickups),
        ]
    }

    /// Every domain field must be present and truthy; nothing else is checked.
    pub fn validate_complete(&self) -> Result<(), ServiceError> {
        let all_present = [&self.name, &self.neck, &self.neck_length, &self.body, &self.pickups]
            .into_iter()
            .all(|f| f.as_ref().is_some_and(is_truthy));
        if all_present {
            Ok(())
        } else {
            Err(ServiceError::Validation(MISSING_FIELDS_MESSAGE.into()))
        }
    }

    /// Attributes for a brand-new record, in domain field order.
    pub fn into_attributes(self) -> Map<String, Value> {
        self.into_fields()
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
            .collect()
    }

    /// Overwrite each field present in the input; absent fields are left alone.
    pub fn apply_to(self, attributes: &mut Map<String, Value>) {
        for (key, value) in self.into_fields() {
            if let Some(value) = value {
                attributes.insert(key.to_string(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(v: Value) -> GuitarInput {
        serde_json::from_value(v).unwrap()
    }

    fn duo_sonic() -> GuitarInput {
        input(json!({
            "name": "Duo-Sonic",
            "neck": "Maple",
            "neckLength": "25.5\"",
            "body": "Alder",
            "pickups": "Test Pickups"
        }))
    }

    #[test]
    fn absent_and_null_are_distinguished() {
        let parsed = input(json!({"pickups": null, "colour": "red"}));
        assert_eq!(parsed.pickups, Some(Value::Null));
        assert_eq!(parsed.name, None);
    }

    #[test]
    fn body_must_be_an_object_to_carry_fields() {
        let from_array = GuitarInput::from_body(json!(["a", "b", "c", "d", "e"])).unwrap();
        assert_eq!(from_array, GuitarInput::default());
        assert!(from_array.validate_complete().is_err());

        for scalar in [json!("name"), json!(5), json!(true), Value::Null] {
            let err = GuitarInput::from_body(scalar).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(ref m) if m == NON_OBJECT_BODY_MESSAGE));
        }

        let from_object = GuitarInput::from_body(json!({"pickups": "Wide Range"})).unwrap();
        assert_eq!(from_object.pickups, Some(json!("Wide Range")));
    }

    #[test]
    fn truthiness_follows_json_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!(7)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn complete_input_validates_and_orders_fields() {
        let i = duo_sonic();
        assert!(i.validate_complete().is_ok());
        let keys: Vec<String> = i.into_attributes().keys().cloned().collect();
        assert_eq!(keys, REQUIRED_FIELDS);
    }

    #[test]
    fn missing_or_empty_field_fails_validation() {
        let err = input(json!({"name": "Incomplete Guitar"})).validate_complete().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == MISSING_FIELDS_MESSAGE));

        let mut empty_body = duo_sonic();
        empty_body.body = Some(json!(""));
        assert!(empty_body.validate_complete().is_err());
    }

    #[test]
    fn non_string_values_are_accepted() {
        let mut i = duo_sonic();
        i.neck_length = Some(json!(25.5));
        assert!(i.validate_complete().is_ok());
    }

    #[test]
    fn apply_overwrites_only_present_fields_in_place() {
        let mut attrs = duo_sonic().into_attributes();
        attrs.insert("finish".into(), json!("Sunburst"));
        input(json!({"pickups": "Updated", "neckLength": null})).apply_to(&mut attrs);

        assert_eq!(attrs["name"], json!("Duo-Sonic"));
        assert_eq!(attrs["pickups"], json!("Updated"));
        assert_eq!(attrs["neckLength"], Value::Null);
        assert_eq!(attrs["finish"], json!("Sunburst"));
        let keys: Vec<&str> = attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "neck", "neckLength", "body", "pickups", "finish"]);
    }

    #[test]
    fn stored_id_is_replaced_by_position() {
        let stored = json!({"id": 42, "name": "Telecaster"}).as_object().cloned().unwrap();
        let g = Guitar::from_stored(3, stored);
        assert_eq!(g.id, 3);
        assert!(g.field("id").is_none());
        assert_eq!(serde_json::to_value(&g).unwrap(), json!({"id": 3, "name": "Telecaster"}));
    }
}
