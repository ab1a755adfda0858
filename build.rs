// build.rs
//
// Generates the `t!` message macro from `locales/<lang>.toml`.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

type Catalogue = BTreeMap<String, String>;

const BASE_LANG: &str = "en";

fn main() {
    println!("cargo:rerun-if-env-changed=MONICA_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    let lang = selected_lang();
    println!("cargo:rustc-env=MONICA_LANG_EFFECTIVE={}", lang);

    let catalogue = catalogue_for(&lang);
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("translations.rs"), render(&catalogue))
        .expect("writing translations.rs");
}

/// A `lang_*` feature wins over `MONICA_LANG`; English otherwise.
fn selected_lang() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(str::to_lowercase)
        })
        .collect();
    features.sort();

    match features.as_slice() {
        [] => env::var("MONICA_LANG").unwrap_or_else(|_| BASE_LANG.to_string()),
        [only] => only.clone(),
        [first, ..] => {
            println!(
                "cargo:warning=monica: several message languages requested ({}); building with '{}'",
                features.join(", "),
                first
            );
            first.clone()
        }
    }
}

fn read_catalogue(path: &str) -> Option<Catalogue> {
    let content = fs::read_to_string(path).ok()?;
    let catalogue = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("{} is not a flat table of messages: {}", path, e));
    Some(catalogue)
}

/// English messages, overlaid with the selected language where it has them.
fn catalogue_for(lang: &str) -> Catalogue {
    let base_path = format!("locales/{}.toml", BASE_LANG);
    let mut catalogue =
        read_catalogue(&base_path).unwrap_or_else(|| panic!("{} is required", base_path));

    if lang != BASE_LANG {
        let path = format!("locales/{}.toml", lang);
        match read_catalogue(&path) {
            Some(overlay) => catalogue.extend(overlay),
            None => println!(
                "cargo:warning=monica: no messages for '{}' at {}; using English",
                lang, path
            ),
        }
    }
    catalogue
}

fn render(catalogue: &Catalogue) -> String {
    let mut code = String::from("#[macro_export]\nmacro_rules! t {\n");
    for (key, message) in catalogue {
        let literal = message.replace('\\', "\\\\").replace('"', "\\\"");
        code.push_str(&format!("    (\"{}\") => {{ \"{}\" }};\n", key, literal));
    }
    // Unknown keys fail the build.
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"unknown message key: \", $key)) }};\n}\n",
    );
    code
}
