//! Blog metadata: paths, settings, language strings and vocabularies.
//!
//! Everything here is loaded once per build from the metadata directory
//! and stays read-only afterwards, with one exception: the tag and stack
//! vocabularies are re-sorted by usage exactly once, after the page walk.
//!
//! # Metadata directory layout
//!
//! | File            | Purpose                                  |
//! |-----------------|------------------------------------------|
//! | `settings.yaml` | Site settings (`url`, `title`, …)        |
//! | `language.yaml` | Localized UI strings                     |
//! | `tags.yaml`     | Note tag vocabulary (key → label)        |
//! | `stacks.yaml`   | Project stack vocabulary (key → label)   |

mod error;

pub use error::ConfigError;

use crate::cli::InputArgs;
use crate::render::TemplateEngine;
use anyhow::Result;
use serde::{Deserialize, Serialize, Serializer, de::DeserializeOwned, ser::SerializeMap};
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Paths
// ============================================================================

/// Input and output directories resolved from CLI arguments.
#[derive(Debug, Clone)]
pub struct BlogPaths {
    /// Pages root (markdown page folders)
    pub pages: PathBuf,
    /// Metadata directory (settings, language, vocabularies)
    pub metadata: PathBuf,
    /// Skin directory (templates & assets)
    pub skin: PathBuf,
    /// Static assets directory (defaults to `<skin>/assets`)
    pub assets: PathBuf,
    /// Output directory owned by the build
    pub output: PathBuf,
}

impl BlogPaths {
    pub fn new(input: &InputArgs, output: &Path) -> Self {
        let assets = input
            .assets
            .clone()
            .unwrap_or_else(|| input.skin.join("assets"));

        Self {
            pages: input.pages.clone(),
            metadata: input.metadata.clone(),
            skin: input.skin.clone(),
            assets,
            output: output.to_path_buf(),
        }
    }

    /// Skin template directory handed to the template engine.
    pub fn templates(&self) -> PathBuf {
        self.skin.join("templates")
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Site settings loaded from `settings.yaml`.
///
/// Unknown keys are kept in `extra` so skins can reference custom
/// settings without code changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// External site URL; may be overridden by `--url`
    #[serde(default)]
    pub url: String,

    /// Site title (used as the RSS channel title)
    #[serde(default)]
    pub title: String,

    /// Site description (used as the RSS channel description)
    #[serde(default)]
    pub description: String,

    /// Site author
    #[serde(default)]
    pub author: Option<String>,

    /// `owner/repo` reference used to build "edit this page" links
    #[serde(default)]
    pub github_repository: Option<String>,

    /// Skin-defined custom settings; ordered so skins that iterate
    /// settings render identically across rebuilds
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

// ============================================================================
// Vocabularies
// ============================================================================

/// One `key: label` vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub key: String,
    pub label: String,
}

/// An ordered key → label mapping, curated by hand in a YAML file.
///
/// Declaration order matters: it is the tie-break for the usage re-sort,
/// so unchanged ties stay where the vocabulary file put them.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
}

impl Vocabulary {
    pub fn from_entries(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    /// Parse a vocabulary from a YAML mapping, preserving declaration order.
    pub fn from_yaml(path: &Path) -> Result<Self, ConfigError> {
        let mapping: serde_yaml::Mapping = read_yaml(path)?;

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, label) in &mapping {
            let (Some(key), Some(label)) = (key.as_str(), label.as_str()) else {
                return Err(ConfigError::Validation(format!(
                    "vocabulary `{}` must map string keys to string labels",
                    path.display()
                )));
            };
            entries.push(VocabEntry {
                key: key.to_owned(),
                label: label.to_owned(),
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.label.as_str())
    }

    /// Re-order entries descending by usage count across the given pages.
    ///
    /// Each page contributes at most 1 to a key's count, even if its list
    /// repeats the key. Ties keep the original declaration order; keys
    /// with zero usage stay in the mapping.
    pub fn sort_by_usage<'a>(&mut self, pages: impl IntoIterator<Item = &'a [String]>) {
        let counts = count_usage(pages);

        let mut indexed: Vec<(usize, VocabEntry)> = self.entries.drain(..).enumerate().collect();
        indexed.sort_by_key(|(index, entry)| {
            (
                Reverse(counts.get(entry.key.as_str()).copied().unwrap_or(0)),
                *index,
            )
        });

        self.entries = indexed.into_iter().map(|(_, entry)| entry).collect();
    }
}

impl Serialize for Vocabulary {
    /// Serialize as an ordered map so templates can iterate `key: label`
    /// pairs in vocabulary order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.label)?;
        }
        map.end()
    }
}

/// Count how many distinct pages use each key.
pub fn count_usage<'a>(pages: impl IntoIterator<Item = &'a [String]>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    for keys in pages {
        let distinct: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
        for key in distinct {
            *counts.entry(key.to_owned()).or_insert(0) += 1;
        }
    }

    counts
}

// ============================================================================
// BlogMetadata
// ============================================================================

/// Everything a writer needs besides the pages themselves.
pub struct BlogMetadata {
    pub paths: BlogPaths,
    pub settings: Settings,
    pub language: BTreeMap<String, String>,
    pub tags: Vocabulary,
    pub stacks: Vocabulary,
    pub templates: TemplateEngine,
}

impl BlogMetadata {
    /// Load all metadata documents and bind the template engine to the
    /// skin's template directory.
    pub fn load(input: &InputArgs, output: &Path, url_override: Option<&str>) -> Result<Self> {
        let paths = BlogPaths::new(input, output);

        let mut settings: Settings = read_yaml(&paths.metadata.join("settings.yaml"))?;
        if let Some(url) = url_override {
            settings.url = url.to_owned();
        }
        settings.url = settings.url.trim_end_matches('/').to_owned();
        if settings.url.is_empty() {
            return Err(ConfigError::Validation(
                "the `url` setting is empty; set it in settings.yaml or pass --url".to_owned(),
            )
            .into());
        }

        let language: BTreeMap<String, String> = read_yaml(&paths.metadata.join("language.yaml"))?;
        let tags = Vocabulary::from_yaml(&paths.metadata.join("tags.yaml"))?;
        let stacks = Vocabulary::from_yaml(&paths.metadata.join("stacks.yaml"))?;

        let templates = TemplateEngine::from_dir(&paths.templates());

        Ok(Self {
            paths,
            settings,
            language,
            tags,
            stacks,
            templates,
        })
    }

    /// Look up a localized UI string; missing keys are fatal.
    pub fn language_value(&self, key: &str) -> Result<&str> {
        self.language
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| anyhow::anyhow!("Missing language string: {key}"))
    }
}

/// Read and deserialize one YAML document.
fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    serde_yaml::from_str(text).map_err(|e| ConfigError::Yaml(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(pairs: &[(&str, &str)]) -> Vocabulary {
        Vocabulary::from_entries(
            pairs
                .iter()
                .map(|(k, l)| VocabEntry {
                    key: (*k).to_owned(),
                    label: (*l).to_owned(),
                })
                .collect(),
        )
    }

    fn keys(vocab: &Vocabulary) -> Vec<&str> {
        vocab.keys().collect()
    }

    #[test]
    fn test_sort_by_usage_descending() {
        let mut tags = vocab(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")]);
        let notes: Vec<Vec<String>> = vec![
            vec!["a".to_owned()],
            vec!["a".to_owned(), "b".to_owned()],
        ];

        tags.sort_by_usage(notes.iter().map(Vec::as_slice));
        assert_eq!(keys(&tags), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_usage_is_stable_on_ties() {
        let mut tags = vocab(&[("x", "X"), ("y", "Y"), ("z", "Z")]);
        let notes: Vec<Vec<String>> = vec![vec!["z".to_owned()]];

        tags.sort_by_usage(notes.iter().map(Vec::as_slice));
        // z wins, x and y tie at zero and keep declaration order
        assert_eq!(keys(&tags), ["z", "x", "y"]);
    }

    #[test]
    fn test_sort_by_usage_is_idempotent() {
        let mut tags = vocab(&[("a", "A"), ("b", "B"), ("c", "C")]);
        let notes: Vec<Vec<String>> =
            vec![vec!["b".to_owned()], vec!["b".to_owned(), "c".to_owned()]];

        tags.sort_by_usage(notes.iter().map(Vec::as_slice));
        let first: Vec<String> = tags.keys().map(str::to_owned).collect();

        tags.sort_by_usage(notes.iter().map(Vec::as_slice));
        assert_eq!(keys(&tags), first);
    }

    #[test]
    fn test_duplicate_keys_count_once_per_page() {
        let mut tags = vocab(&[("a", "A"), ("b", "B")]);
        // one malformed page lists "b" twice; "a" is used by two pages
        let notes: Vec<Vec<String>> = vec![
            vec!["b".to_owned(), "b".to_owned()],
            vec!["a".to_owned()],
            vec!["a".to_owned()],
        ];

        tags.sort_by_usage(notes.iter().map(Vec::as_slice));
        assert_eq!(keys(&tags), ["a", "b"]);
    }

    #[test]
    fn test_count_usage_set_semantics() {
        let pages: Vec<Vec<String>> = vec![
            vec!["a".to_owned(), "a".to_owned(), "b".to_owned()],
            vec!["a".to_owned()],
        ];
        let counts = count_usage(pages.iter().map(Vec::as_slice));

        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(counts.get("c"), None);
    }

    #[test]
    fn test_extra_settings_serialize_in_key_order() {
        let settings: Settings = serde_yaml::from_str(
            "url: https://example.com\ntitle: T\ndescription: D\nzebra: z\napple: a\n",
        )
        .unwrap();

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.find(r#""apple""#).unwrap() < json.find(r#""zebra""#).unwrap());
    }

    #[test]
    fn test_vocabulary_serializes_in_order() {
        let tags = vocab(&[("b", "Beta"), ("a", "Alpha")]);
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"{"b":"Beta","a":"Alpha"}"#);
    }
}
