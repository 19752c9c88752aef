//! Structured command output for the orchestration platform

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Structured output of a command: data published under a context path,
/// optionally deduplicated by a key field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredOutput {
    /// Context path the data is published under (e.g. `AWS.SecurityHub.Findings`)
    pub prefix: String,

    /// Field used to merge entries with existing context (e.g. `Id`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_field: Option<String>,

    /// The published data
    pub outputs: Value,
}

impl StructuredOutput {
    /// Build an output envelope by serializing `data`.
    pub fn new<T: Serialize + ?Sized>(
        prefix: &str,
        key_field: Option<&str>,
        data: &T,
    ) -> Result<Self> {
        Ok(Self {
            prefix: prefix.to_string(),
            key_field: key_field.map(str::to_string),
            outputs: serde_json::to_value(data)?,
        })
    }

    /// The context key, e.g. `AWS.SecurityHub.Findings(val.Id === obj.Id)`.
    pub fn context_key(&self) -> String {
        match self.key_field {
            Some(ref key) => format!("{}(val.{} === obj.{})", self.prefix, key, key),
            None => self.prefix.clone(),
        }
    }

    /// The entry context object: `{ <context key>: <outputs> }`.
    pub fn to_context(&self) -> Value {
        let mut context = Map::new();
        context.insert(self.context_key(), self.outputs.clone());
        Value::Object(context)
    }
}
