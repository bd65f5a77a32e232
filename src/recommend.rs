use crate::error::ExplorerError;
use crate::taxonomy::Topic;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Curation data: the languages and topics an instance should surface under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub domain: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// Read-only lookup from language/topic to recommended domains.
#[derive(Debug, Clone, Default)]
pub struct RecommendationIndex {
    entries: Vec<RecommendationEntry>,
}

// (domain, languages, topics)
const BUILTIN: &[(&str, &[&str], &[Topic])] = &[
    ("lemmy.ml", &["en", "es", "fr", "de"], &[Topic::General, Topic::Tech]),
    ("lemmy.world", &["en"], &[Topic::General]),
    ("beehaw.org", &["en"], &[Topic::General]),
    ("sh.itjust.works", &["en"], &[Topic::General]),
    ("lemmy.ca", &["en", "fr"], &[Topic::General, Topic::Regional]),
    ("programming.dev", &["en"], &[Topic::Tech]),
    ("discuss.tchncs.de", &["en", "de"], &[Topic::General, Topic::Tech]),
    ("feddit.de", &["de"], &[Topic::General, Topic::Regional]),
    ("feddit.nl", &["nl"], &[Topic::General, Topic::Regional]),
    ("feddit.it", &["it"], &[Topic::General, Topic::Regional]),
    ("lemmy.eco.br", &["pt", "pt_BR"], &[Topic::General, Topic::Regional]),
    ("lemmy.pt", &["pt"], &[Topic::General, Topic::Regional]),
    ("sopuli.xyz", &["en", "fi"], &[Topic::General]),
    ("slrpnk.net", &["en"], &[Topic::Science, Topic::LeftistPolitics]),
    ("mander.xyz", &["en"], &[Topic::Science]),
    ("lemmy.blahaj.zone", &["en"], &[Topic::General]),
    ("yiffit.net", &["en"], &[Topic::Furry]),
    ("lemmygrad.ml", &["en"], &[Topic::LeftistPolitics]),
    ("hexbear.net", &["en"], &[Topic::LeftistPolitics]),
    ("lemmy.dbzer0.com", &["en"], &[Topic::General, Topic::Art]),
    ("ttrpg.network", &["en"], &[Topic::Gaming]),
    ("lemmy.zip", &["en"], &[Topic::General, Topic::Gaming]),
    ("szmer.info", &["pl"], &[Topic::General, Topic::Regional]),
    ("lemmy.sdf.org", &["en"], &[Topic::Tech]),
];

impl RecommendationIndex {
    pub fn new(entries: Vec<RecommendationEntry>) -> Self {
        Self { entries }
    }

    /// The curated table shipped with the binary.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(domain, languages, topics)| RecommendationEntry {
                domain: domain.to_string(),
                languages: languages.iter().map(|l| l.to_string()).collect(),
                topics: topics.to_vec(),
            })
            .collect();
        Self { entries }
    }

    /// Load an index from a JSON array of entries.
    pub fn load(path: &Path) -> Result<Self, ExplorerError> {
        let data = std::fs::read_to_string(path)?;
        let entries: Vec<RecommendationEntry> = serde_json::from_str(&data)?;
        tracing::info!(path = %path.display(), entries = entries.len(), "loaded recommendations");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RecommendationEntry] {
        &self.entries
    }

    /// Domains recommended for the given language code.
    pub fn domains_for_language(&self, language: &str) -> HashSet<&str> {
        self.entries
            .iter()
            .filter(|e| e.languages.iter().any(|l| l == language))
            .map(|e| e.domain.as_str())
            .collect()
    }

    /// Domains recommended for the given topic.
    pub fn domains_for_topic(&self, topic: Topic) -> HashSet<&str> {
        self.entries
            .iter()
            .filter(|e| e.topics.contains(&topic))
            .map(|e| e.domain.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_index_lookups() {
        let index = RecommendationIndex::builtin();
        assert!(!index.entries().is_empty());

        let german = index.domains_for_language("de");
        assert!(german.contains("feddit.de"));
        assert!(!german.contains("lemmy.world"));

        let tech = index.domains_for_topic(Topic::Tech);
        assert!(tech.contains("programming.dev"));
        assert!(!tech.contains("yiffit.net"));
    }

    #[test]
    fn test_builtin_domains_are_unique() {
        let index = RecommendationIndex::builtin();
        let unique: HashSet<&str> = index.entries().iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(unique.len(), index.entries().len());
    }

    #[test]
    fn test_unknown_language_matches_nothing() {
        let index = RecommendationIndex::builtin();
        assert!(index.domains_for_language("tlh").is_empty());
        // No entry is tagged with the sentinel itself
        assert!(index.domains_for_topic(Topic::All).is_empty());
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"domain": "a.com", "languages": ["en"], "topics": ["tech", "gaming"]}},
               {{"domain": "b.com"}}]"#
        )
        .unwrap();

        let index = RecommendationIndex::load(file.path()).unwrap();
        assert_eq!(index.entries().len(), 2);
        assert_eq!(index.domains_for_topic(Topic::Gaming), HashSet::from(["a.com"]));
        assert!(index.entries()[1].languages.is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_topic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"domain": "a.com", "topics": ["knitting"]}}]"#).unwrap();
        assert!(matches!(
            RecommendationIndex::load(file.path()),
            Err(ExplorerError::Json(_))
        ));
    }
}
