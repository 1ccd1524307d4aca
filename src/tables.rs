//! Static lookup tables: language codes, POS abbreviations, genders and the
//! character normalization map.
//!
//! The defaults live in `schema/tables.yaml` and are compiled into the
//! binary. A replacement file can be installed once at startup with
//! [`init_tables`]; after that the tables are read-only.

use crate::error::{EtymError, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUILTIN_TABLES: &str = include_str!("../schema/tables.yaml");

// === YAML structures ===

#[derive(Debug, Deserialize)]
struct TablesSchema {
    native_origin: String,
    modern_marker: String,
    intermediate_marker: String,
    infinitive_markers: Vec<String>,
    languages: HashMap<String, String>,
    pos_classes: Vec<PosClass>,
    #[serde(default)]
    genders: HashMap<String, String>,
    #[serde(default)]
    normalization: BTreeMap<String, String>,
}

/// One part of speech and every abbreviation that spells it.
#[derive(Debug, Clone, Deserialize)]
pub struct PosClass {
    /// Short form used in history file names (`v`, `n`, `adj`).
    pub code: String,
    /// Full name written to output records (`verb`, `noun`).
    pub name: String,
    pub variants: Vec<String>,
}

#[derive(Debug)]
pub struct Tables {
    pub native_origin: String,
    pub modern_marker: String,
    pub intermediate_marker: String,
    pub infinitive_markers: Vec<String>,
    pub normalization: BTreeMap<String, String>,
    languages: HashMap<String, String>,
    pos_classes: Vec<PosClass>,
    // variant abbreviation -> index into pos_classes
    pos_variants: HashMap<String, usize>,
    genders: HashMap<String, String>,
}

impl Tables {
    fn from_schema(schema: TablesSchema) -> Self {
        let mut pos_variants = HashMap::new();
        for (idx, class) in schema.pos_classes.iter().enumerate() {
            for variant in &class.variants {
                pos_variants.insert(normalize_abbreviation(variant), idx);
            }
        }

        Tables {
            native_origin: schema.native_origin,
            modern_marker: schema.modern_marker,
            intermediate_marker: schema.intermediate_marker,
            infinitive_markers: schema.infinitive_markers,
            normalization: schema.normalization,
            languages: schema.languages,
            pos_classes: schema.pos_classes,
            pos_variants,
            genders: schema.genders,
        }
    }

    fn parse(contents: &str, origin: &Path) -> Result<Self> {
        let schema: TablesSchema =
            serde_yaml::from_str(contents).map_err(|e| EtymError::Tables {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_schema(schema))
    }

    /// The tables compiled into the binary.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_TABLES, Path::new("schema/tables.yaml"))
            .expect("built-in schema/tables.yaml must parse")
    }

    /// Human-readable language name for a bracket code.
    pub fn language_name(&self, code: &str) -> Option<&str> {
        self.languages.get(code).map(String::as_str)
    }

    /// POS class for one abbreviation, tolerant of extra inner whitespace.
    pub fn pos_class(&self, abbreviation: &str) -> Option<&PosClass> {
        self.pos_variants
            .get(&normalize_abbreviation(abbreviation))
            .map(|&idx| &self.pos_classes[idx])
    }

    /// Short code for a full POS name (`verb` -> `v`).
    pub fn pos_code(&self, name: &str) -> Option<&str> {
        self.pos_classes
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.code.as_str())
    }

    pub fn gender_name(&self, token: &str) -> Option<&str> {
        self.genders.get(token).map(String::as_str)
    }
}

fn normalize_abbreviation(abbreviation: &str) -> String {
    abbreviation
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

static TABLES: OnceCell<Tables> = OnceCell::new();

pub fn load_tables(path: &Path) -> Result<Tables> {
    let mut file = File::open(path).map_err(|e| EtymError::io(path, e))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| EtymError::io(path, e))?;
    Tables::parse(&contents, path)
}

/// Install the tables for this process. `None` keeps the built-in defaults.
pub fn init_tables(path: Option<&Path>) -> Result<()> {
    let tables = match path {
        Some(p) => load_tables(p)?,
        None => Tables::builtin(),
    };
    TABLES
        .set(tables)
        .map_err(|_| EtymError::TablesAlreadyInitialized)
}

/// Active tables; falls back to the built-in defaults when
/// [`init_tables`] was never called.
pub fn tables() -> &'static Tables {
    TABLES.get_or_init(Tables::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_tables_parse() {
        let t = Tables::builtin();
        assert_eq!(t.native_origin, "Inglish");
        assert_eq!(t.modern_marker, "ME");
        assert_eq!(t.intermediate_marker, "MI");
        assert_eq!(t.infinitive_markers, vec!["to", "ta"]);
    }

    #[test]
    fn language_lookup() {
        let t = Tables::builtin();
        assert_eq!(t.language_name("L"), Some("Latin"));
        assert_eq!(t.language_name("OF"), Some("Old French"));
        assert_eq!(t.language_name("XYZ"), None);
    }

    #[test]
    fn pos_variants_map_to_full_names() {
        let t = Tables::builtin();
        assert_eq!(t.pos_class("m n").map(|c| c.name.as_str()), Some("noun"));
        assert_eq!(t.pos_class("m  n").map(|c| c.name.as_str()), Some("noun"));
        assert_eq!(t.pos_class("v").map(|c| c.name.as_str()), Some("verb"));
        assert_eq!(t.pos_class("adj").map(|c| c.code.as_str()), Some("adj"));
        assert!(t.pos_class("see below").is_none());
    }

    #[test]
    fn pos_code_from_name() {
        let t = Tables::builtin();
        assert_eq!(t.pos_code("verb"), Some("v"));
        assert_eq!(t.pos_code("noun"), Some("n"));
        assert_eq!(t.pos_code("gerund"), None);
    }

    #[test]
    fn genders() {
        let t = Tables::builtin();
        assert_eq!(t.gender_name("m"), Some("masculine"));
        assert_eq!(t.gender_name("f"), Some("feminine"));
        assert_eq!(t.gender_name("n"), None);
    }

    #[test]
    fn load_tables_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "native_origin: Inglish\n\
             modern_marker: ME\n\
             intermediate_marker: MI\n\
             infinitive_markers: [to]\n\
             languages:\n  XX: Example\n\
             pos_classes:\n  - code: v\n    name: verb\n    variants: [v]\n"
        )
        .unwrap();

        let t = load_tables(file.path()).unwrap();
        assert_eq!(t.language_name("XX"), Some("Example"));
        assert_eq!(t.language_name("L"), None);
        assert!(t.normalization.is_empty());
    }

    #[test]
    fn malformed_tables_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "languages: [not, a, map").unwrap();
        let err = load_tables(file.path()).unwrap_err();
        assert!(matches!(err, EtymError::Tables { .. }));
    }

    #[test]
    fn missing_tables_file_is_io_error() {
        let err = load_tables(Path::new("/nonexistent/tables.yaml")).unwrap_err();
        assert!(matches!(err, EtymError::Io { .. }));
    }
}
