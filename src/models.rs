// src/models.rs

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

// --- CONFIGURATION MODELS (what is read from `.monica.yml`) ---

/// The decoded configuration document: an ordered list of actions plus optional settings.
/// Unknown keys are ignored at every level.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Every action declared in the document, in declaration order.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Shell used to run command lines, e.g. `"bash -c"`. Defaults to the platform shell.
    #[serde(default)]
    pub shell: Option<String>,
}

impl Config {
    /// Finds an action by exact name match.
    pub fn find_action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }
}

/// A named, user-invokable unit of work composed of ordered steps.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Action {
    pub name: String,
    #[serde(default, alias = "description")]
    pub desc: String,
    #[serde(default, alias = "steps")]
    pub content: Vec<Step>,
    /// Default values as written in the document: a list of mappings merged in order.
    #[serde(default, alias = "defaults")]
    pub default: Vec<HashMap<String, DefaultValue>>,
    /// When set, each flag of this action also gets a one-letter short form.
    #[serde(default)]
    pub short: bool,
}

impl Action {
    /// Flattens the `default` list into a single mapping.
    /// Later entries in the list override earlier ones.
    pub fn declared_defaults(&self) -> HashMap<String, String> {
        let mut defaults = HashMap::new();
        for entry in &self.default {
            for (key, value) in entry {
                defaults.insert(key.clone(), value.to_string());
            }
        }
        defaults
    }
}

/// A default value, kept as the text written in the document.
///
/// YAML scalars are taken verbatim, so `3.10` stays `"3.10"` and an empty value is `""`.
/// TOML hands over typed values: integers and booleans are accepted, floats must be quoted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultValue(String);

impl DefaultValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Asking for a string makes self-describing formats like YAML hand over the raw scalar.
        deserializer.deserialize_str(DefaultValueVisitor)
    }
}

struct DefaultValueVisitor;

impl Visitor<'_> for DefaultValueVisitor {
    type Value = DefaultValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, integer or boolean default value")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(DefaultValue(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(DefaultValue(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(DefaultValue(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(DefaultValue(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(DefaultValue(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Err(E::custom(format!(
            "float default {} would lose its written form; quote it as a string",
            value
        )))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DefaultValue::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DefaultValue::default())
    }
}

/// One element of an action's content. A step may reference another action,
/// carry a command template, or both; the reference always runs first.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "RawStep")]
pub struct Step {
    pub action: Option<String>,
    pub command: Option<String>,
}

/// Accepted document forms for a step: a bare command string or a mapping.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum RawStep {
    Command(String),
    Detailed(DetailedStep),
}

#[derive(Deserialize, Debug, Clone)]
struct DetailedStep {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    command: Option<String>,
}

impl From<RawStep> for Step {
    fn from(raw: RawStep) -> Self {
        match raw {
            RawStep::Command(command) => Self {
                action: None,
                command: Some(command),
            },
            RawStep::Detailed(detailed) => Self {
                action: detailed.action,
                command: detailed.command,
            },
        }
    }
}

impl Step {
    /// A step that only runs a command template.
    pub fn command(template: impl Into<String>) -> Self {
        Self {
            action: None,
            command: Some(template.into()),
        }
    }

    /// A step that only invokes another action.
    pub fn sub_action(name: impl Into<String>) -> Self {
        Self {
            action: Some(name.into()),
            command: None,
        }
    }

    /// The operations carried by this step, sub-action first.
    pub fn operations(&self) -> impl Iterator<Item = StepOperation<'_>> {
        self.action
            .as_deref()
            .map(StepOperation::SubAction)
            .into_iter()
            .chain(self.command.as_deref().map(StepOperation::Command))
    }
}

/// A single unit of work inside a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOperation<'a> {
    /// Invoke the action with this name.
    SubAction(&'a str),
    /// Substitute and run this command template.
    Command(&'a str),
}

// --- ARGUMENT MODELS (derived at startup, consumed by the CLI layer) ---

/// One variable an action needs, either required or carrying a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub default_value: Option<String>,
}

impl ArgumentSpec {
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }
}

/// The argument schema of one action, in canonical placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    pub action: String,
    pub description: String,
    pub short_flags: bool,
    pub arguments: Vec<ArgumentSpec>,
}

/// Immutable mapping from variable name to the value collected by the CLI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedArgs {
    values: HashMap<String, String>,
}

impl ResolvedArgs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
