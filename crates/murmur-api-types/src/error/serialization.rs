use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::{Error, ErrorCategory};

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("code", self.code())?;

        if let Some(subcode) = self.subcode() {
            map.serialize_entry("subcode", subcode)?;
        }

        if let Some(message) = self.message.as_deref() {
            map.serialize_entry("message", message)?;
        }

        if let ErrorCategory::InvalidForm(errors) = &self.category {
            // field order does not matter on the wire, a sorted map keeps
            // the serialized output stable
            let mut fields = BTreeMap::<&str, Vec<&str>>::new();
            for entry in errors.entries() {
                fields
                    .entry(entry.field)
                    .or_default()
                    .push(entry.message.as_str());
            }
            map.serialize_entry("errors", &fields)?;
        }

        map.end()
    }
}
