use serde::{Deserialize, Serialize};

/// Language value meaning "no language filter".
pub const ALL_LANGUAGES: &str = "all";

/// Ordering applied to the filtered instance list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// No defined order; shuffled on every recompute.
    #[default]
    Random,
    MostActive,
    LeastActive,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [Self::Random, Self::MostActive, Self::LeastActive];

    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::MostActive => "most_active",
            Self::LeastActive => "least_active",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::MostActive => "Most Active",
            Self::LeastActive => "Least Active",
        }
    }

    /// Look up a sort by its query name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Curated instance category. `Topic::All` is the "no topic filter" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    #[default]
    #[serde(rename = "all_topics")]
    All,
    General,
    Tech,
    Gaming,
    Science,
    Art,
    Regional,
    Furry,
    LeftistPolitics,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Self::All,
        Self::General,
        Self::Tech,
        Self::Gaming,
        Self::Science,
        Self::Art,
        Self::Regional,
        Self::Furry,
        Self::LeftistPolitics,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all_topics",
            Self::General => "general",
            Self::Tech => "tech",
            Self::Gaming => "gaming",
            Self::Science => "science",
            Self::Art => "art",
            Self::Regional => "regional",
            Self::Furry => "furry",
            Self::LeftistPolitics => "leftist_politics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Topics",
            Self::General => "General",
            Self::Tech => "Technology",
            Self::Gaming => "Gaming",
            Self::Science => "Science",
            Self::Art => "Art",
            Self::Regional => "Regional",
            Self::Furry => "Furry",
            Self::LeftistPolitics => "Leftist Politics",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// A selectable interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Languages offered in the language selector. Any other code is still
/// accepted as a filter value; it just isn't listed.
pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "de", name: "Deutsch" },
    Language { code: "es", name: "Español" },
    Language { code: "fr", name: "Français" },
    Language { code: "it", name: "Italiano" },
    Language { code: "nl", name: "Nederlands" },
    Language { code: "pl", name: "Polski" },
    Language { code: "pt", name: "Português" },
    Language { code: "pt_BR", name: "Português (Brasil)" },
    Language { code: "fi", name: "Suomi" },
    Language { code: "sv", name: "Svenska" },
    Language { code: "da", name: "Dansk" },
    Language { code: "ru", name: "Русский" },
    Language { code: "uk", name: "Українська" },
    Language { code: "ja", name: "日本語" },
    Language { code: "ko", name: "한국어" },
    Language { code: "zh", name: "中文" },
    Language { code: "eo", name: "Esperanto" },
];

/// Display name for a language code, falling back to the code itself.
pub fn language_label(code: &str) -> &str {
    if code == ALL_LANGUAGES {
        return "All Languages";
    }
    LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name)
        .unwrap_or(code)
}

/// External site that compares instances in more depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceHelper {
    pub name: &'static str,
    pub link: &'static str,
}

pub const INSTANCE_HELPERS: &[InstanceHelper] = &[
    InstanceHelper { name: "Lemmy Explorer", link: "https://lemmyverse.net" },
    InstanceHelper { name: "FediDB", link: "https://fedidb.org/software/lemmy" },
    InstanceHelper { name: "Fediverse Observer", link: "https://lemmy.fediverse.observer/list" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_lookup_by_name() {
        assert_eq!(SortMode::from_name("random"), Some(SortMode::Random));
        assert_eq!(SortMode::from_name("most_active"), Some(SortMode::MostActive));
        assert_eq!(SortMode::from_name("least_active"), Some(SortMode::LeastActive));
        assert_eq!(SortMode::from_name("Most_Active"), None);
        assert_eq!(SortMode::from_name(""), None);
    }

    #[test]
    fn test_topic_lookup_by_name() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_name(topic.name()), Some(topic));
        }
        assert_eq!(Topic::from_name("all"), None);
        assert_eq!(Topic::default(), Topic::All);
    }

    #[test]
    fn test_topic_serde_uses_query_names() {
        let json = serde_json::to_string(&Topic::LeftistPolitics).unwrap();
        assert_eq!(json, "\"leftist_politics\"");
        let all: Topic = serde_json::from_str("\"all_topics\"").unwrap();
        assert_eq!(all, Topic::All);
    }

    #[test]
    fn test_language_label_falls_back_to_code() {
        assert_eq!(language_label("de"), "Deutsch");
        assert_eq!(language_label("all"), "All Languages");
        assert_eq!(language_label("tlh"), "tlh");
    }
}
