use crate::taxonomy::{ALL_LANGUAGES, SortMode, Topic};

/// What the visitor has chosen to look at. The displayed list is derived
/// from this and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub topic: Topic,
    pub language: String,
    pub sort: SortMode,
    /// Jump straight to the filter controls on mount.
    pub scroll: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            topic: Topic::All,
            language: ALL_LANGUAGES.to_string(),
            sort: SortMode::Random,
            scroll: false,
        }
    }
}

impl Selection {
    pub fn filters_language(&self) -> bool {
        self.language != ALL_LANGUAGES
    }

    pub fn filters_topic(&self) -> bool {
        self.topic != Topic::All
    }
}

/// A user-driven change to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ChangeSort(String),
    ChangeTopic(String),
    /// Taken verbatim; unknown codes simply match nothing.
    ChangeLanguage(String),
    /// Back to random / all topics / all languages.
    ResetAll,
}

/// Apply an action. Unknown sort and topic names fall back to their
/// sentinels.
pub fn update(selection: &Selection, action: Action) -> Selection {
    let mut next = selection.clone();
    match action {
        Action::ChangeSort(name) => {
            next.sort = SortMode::from_name(&name).unwrap_or_default();
        }
        Action::ChangeTopic(name) => {
            next.topic = Topic::from_name(&name).unwrap_or_default();
        }
        Action::ChangeLanguage(code) => {
            next.language = code;
        }
        Action::ResetAll => {
            next.sort = SortMode::Random;
            next.topic = Topic::All;
            next.language = ALL_LANGUAGES.to_string();
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_sort() {
        let s = update(&Selection::default(), Action::ChangeSort("most_active".into()));
        assert_eq!(s.sort, SortMode::MostActive);
        let s = update(&s, Action::ChangeSort("bogus".into()));
        assert_eq!(s.sort, SortMode::Random);
    }

    #[test]
    fn test_change_topic_falls_back_to_all() {
        let s = update(&Selection::default(), Action::ChangeTopic("tech".into()));
        assert_eq!(s.topic, Topic::Tech);
        let s = update(&s, Action::ChangeTopic("knitting".into()));
        assert_eq!(s.topic, Topic::All);
    }

    #[test]
    fn test_change_language_is_verbatim() {
        let s = update(&Selection::default(), Action::ChangeLanguage("xx-YY".into()));
        assert_eq!(s.language, "xx-YY");
        assert!(s.filters_language());
    }

    #[test]
    fn test_reset_all_keeps_scroll() {
        let start = Selection {
            topic: Topic::Gaming,
            language: "de".into(),
            sort: SortMode::LeastActive,
            scroll: true,
        };
        let s = update(&start, Action::ResetAll);
        assert_eq!(s.topic, Topic::All);
        assert_eq!(s.language, ALL_LANGUAGES);
        assert_eq!(s.sort, SortMode::Random);
        assert!(s.scroll);
        assert!(!s.filters_language());
        assert!(!s.filters_topic());
    }
}
