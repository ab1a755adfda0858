// src/core/interpolator.rs

use crate::{core::placeholders::PLACEHOLDER_RE, models::ResolvedArgs};
use regex::Captures;

/// Replaces every `${name}` token in `template` with its resolved value.
///
/// Matching is on the whole token, so `${name}` never touches `${name2}`. Values are
/// inserted literally and are not scanned again. Tokens without a value are left as written.
pub fn substitute(template: &str, args: &ResolvedArgs) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let token = caps.get(0).map_or("", |m| m.as_str());
            match caps.get(1).and_then(|name| args.get(name.as_str())) {
                Some(value) => value.to_string(),
                None => {
                    log::trace!("No value for placeholder {}, leaving it untouched", token);
                    token.to_string()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> ResolvedArgs {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_prefix_names_are_not_cross_substituted() {
        let resolved = args(&[("name", "a"), ("name2", "b")]);
        assert_eq!(substitute("echo ${name}-${name2}", &resolved), "echo a-b");
        assert_eq!(substitute("echo ${name2}-${name}", &resolved), "echo b-a");
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let resolved = args(&[("x", "1")]);
        assert_eq!(substitute("${x}+${x}=${x}${x}", &resolved), "1+1=11");
    }

    #[test]
    fn test_values_are_literal() {
        let resolved = args(&[("a", "${b}"), ("b", "oops"), ("re", "$1 \\d")]);
        assert_eq!(substitute("${a}", &resolved), "${b}");
        assert_eq!(substitute("[${re}]", &resolved), "[$1 \\d]");
    }

    #[test]
    fn test_unknown_and_malformed_tokens_are_kept() {
        let resolved = args(&[("known", "k")]);
        assert_eq!(
            substitute("${known} ${unknown} $known ${", &resolved),
            "k ${unknown} $known ${"
        );
    }

    #[test]
    fn test_template_without_placeholders() {
        assert_eq!(substitute("ls -la | wc -l", &ResolvedArgs::default()), "ls -la | wc -l");
    }
}
