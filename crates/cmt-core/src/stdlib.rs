//! The stdlib/internal module classification from the glossary:
//! a name is stdlib/internal if its case-insensitive form matches one
//! of a fixed list, or starts with one of a fixed set of prefixes.

const STDLIB_NAMES: &[&str] = &[
    "Js",
    "Belt",
    "Array",
    "List",
    "String",
    "Bytes",
    "Printexc",
    "Printf",
    "Stdlib",
    "Pervasives",
    "PervasivesU",
    "Arg",
    "ArrayLabels",
    "Buffer",
    "BytesLabels",
    "Callback",
    "Char",
    "Complex",
    "Digest",
    "Dom",
    "Dom_storage",
    "Dom_storage2",
    "Filename",
    "Format",
    "Genlex",
    "Hashtbl",
    "HashtblLabels",
    "Int32",
    "Int64",
    "Lazy",
    "Lexing",
    "ListLabels",
    "Map",
    "MapLabels",
    "MoreLabels",
    "Obj",
    "Parsing",
    "Queue",
    "Random",
    "Set",
    "SetLabels",
    "Sort",
    "Stack",
    "StdLabels",
    "Stream",
    "StringLabels",
    "Sys",
    "Uchar",
    "CamlinternalLazy",
    "CamlinternalFormat",
    "CamlinternalOO",
    "CamlinternalMod",
];

const STDLIB_PREFIXES: &[&str] = &["Caml", "Js_", "Belt_", "Jsx"];

pub fn is_stdlib_name(name: &str) -> bool {
    STDLIB_NAMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
        || STDLIB_PREFIXES.iter().any(|prefix| {
            name.len() >= prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_match() {
        assert!(is_stdlib_name("Belt"));
        assert!(is_stdlib_name("belt"));
        assert!(is_stdlib_name("CamlinternalOO"));
    }

    #[test]
    fn prefixes_match() {
        assert!(is_stdlib_name("Js_array"));
        assert!(is_stdlib_name("Belt_Map"));
        assert!(is_stdlib_name("JsxPPXReact"));
        assert!(is_stdlib_name("Camldecimal"));
    }

    #[test]
    fn project_modules_are_not_stdlib() {
        assert!(!is_stdlib_name("Utils"));
        assert!(!is_stdlib_name("App"));
        assert!(!is_stdlib_name("Jsonette"));
    }
}
