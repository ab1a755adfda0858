// src/cli/flags.rs

use crate::{
    constants::{DEBUG_FLAG, RESERVED_SHORT_FLAGS},
    models::ActionSchema,
};
use clap::Arg;
use std::collections::HashSet;
use thiserror::Error;

/// Long names clap or the global arguments already own.
const RESERVED_LONG_FLAGS: &[&str] = &["help", DEBUG_FLAG];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("Variable '{variable}' of action '{action}' clashes with the built-in '--{variable}' flag.")]
    ReservedName { action: String, variable: String },
    #[error("Variable name '{variable}' of action '{action}' cannot be used as a flag.")]
    InvalidName { action: String, variable: String },
}

/// Everything needed to register one command-line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub long: String,
    pub short: Option<char>,
    pub default_value: Option<String>,
    pub required: bool,
}

impl FlagSpec {
    /// Turns the spec into a clap argument whose id is the variable name.
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.long.clone())
            .long(self.long.clone())
            .value_name(self.long.to_uppercase())
            .help(format!(t!("cli.flag.help"), name = self.long))
            .required(self.required);
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if let Some(default) = &self.default_value {
            arg = arg.default_value(default.clone());
        }
        arg
    }
}

/// Maps an action schema to its flag specifications. Pure: no CLI registry is touched.
///
/// When the action asks for short flags, each flag gets the first character of its
/// name unless that character is reserved or already taken by an earlier flag.
pub fn flag_specs(schema: &ActionSchema) -> Result<Vec<FlagSpec>, FlagError> {
    let mut taken_shorts: HashSet<char> = RESERVED_SHORT_FLAGS.iter().copied().collect();

    schema
        .arguments
        .iter()
        .map(|argument| {
            if RESERVED_LONG_FLAGS.contains(&argument.name.as_str()) {
                return Err(FlagError::ReservedName {
                    action: schema.action.clone(),
                    variable: argument.name.clone(),
                });
            }
            if argument.name.starts_with('-') || argument.name.contains(char::is_whitespace) {
                return Err(FlagError::InvalidName {
                    action: schema.action.clone(),
                    variable: argument.name.clone(),
                });
            }

            let short = if schema.short_flags {
                argument
                    .name
                    .chars()
                    .next()
                    .filter(|c| c.is_alphanumeric() && taken_shorts.insert(*c))
            } else {
                None
            };

            Ok(FlagSpec {
                long: argument.name.clone(),
                short,
                default_value: argument.default_value.clone(),
                required: !argument.has_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArgumentSpec;

    fn schema(short_flags: bool, args: &[(&str, Option<&str>)]) -> ActionSchema {
        ActionSchema {
            action: "act".into(),
            description: String::new(),
            short_flags,
            arguments: args
                .iter()
                .map(|(name, default)| ArgumentSpec {
                    name: name.to_string(),
                    default_value: default.map(str::to_string),
                })
                .collect(),
        }
    }

    #[test]
    fn test_required_and_defaulted_flags() {
        let specs = flag_specs(&schema(false, &[("env", None), ("region", Some("eu"))])).unwrap();
        assert_eq!(
            specs,
            vec![
                FlagSpec {
                    long: "env".into(),
                    short: None,
                    default_value: None,
                    required: true
                },
                FlagSpec {
                    long: "region".into(),
                    short: None,
                    default_value: Some("eu".into()),
                    required: false
                },
            ]
        );
    }

    #[test]
    fn test_short_flags_skip_taken_and_reserved_letters() {
        let specs = flag_specs(&schema(
            true,
            &[("target", None), ("tag", None), ("host", None), ("jobs", Some("4"))],
        ))
        .unwrap();
        let shorts: Vec<_> = specs.iter().map(|s| s.short).collect();
        assert_eq!(shorts, vec![Some('t'), None, None, Some('j')]);
    }

    #[test]
    fn test_reserved_names_are_rejected() {
        let err = flag_specs(&schema(false, &[("debug", None)])).unwrap_err();
        assert_eq!(
            err,
            FlagError::ReservedName {
                action: "act".into(),
                variable: "debug".into()
            }
        );
        assert!(flag_specs(&schema(false, &[("two words", None)])).is_err());
    }

    #[test]
    fn test_to_arg_carries_default_and_requiredness() {
        let spec = FlagSpec {
            long: "region".into(),
            short: Some('r'),
            default_value: Some("eu".into()),
            required: false,
        };
        let arg = spec.to_arg();
        assert_eq!(arg.get_id().as_str(), "region");
        assert_eq!(arg.get_long(), Some("region"));
        assert_eq!(arg.get_short(), Some('r'));
        assert!(!arg.is_required_set());
        assert_eq!(arg.get_default_values().len(), 1);
    }
}
