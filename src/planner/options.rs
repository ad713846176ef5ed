//! Named call arguments and the decoded query options

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{OptionError, PlannerResult};

/// Named arguments of one host call, as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallArguments(Map<String, Value>);

impl CallArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value; anything but an object is rejected
    pub fn from_value(value: Value) -> PlannerResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(OptionError::InvalidArgument {
                name: "arguments",
                reason: format!("expected an object, got {}", other),
            }),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Reads an optional argument. JSON `null` counts as absent.
    pub fn argument<T: DeserializeOwned>(&self, name: &'static str) -> PlannerResult<Option<T>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|e| OptionError::InvalidArgument {
                    name,
                    reason: e.to_string(),
                }),
        }
    }

    /// Reads a required argument
    pub fn required<T: DeserializeOwned>(&self, name: &'static str) -> PlannerResult<T> {
        self.argument(name)?
            .ok_or(OptionError::MissingArgument(name))
    }
}

/// Options of an audio query, before validation of the enumerated codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub sort_type: Option<i64>,
    pub order_type: i64,
    pub ignore_case: bool,
    pub uri: i64,
    pub path: Option<String>,
}

impl QueryOptions {
    /// Decodes `sortType`, `orderType`, `ignoreCase`, `uri` and `path`
    pub fn from_arguments(args: &CallArguments) -> PlannerResult<Self> {
        Ok(Self {
            sort_type: args.argument("sortType")?,
            order_type: args.required("orderType")?,
            ignore_case: args.required("ignoreCase")?,
            uri: args.required("uri")?,
            path: args.argument("path")?,
        })
    }
}
