use crate::selection::Selection;
use crate::taxonomy::{ALL_LANGUAGES, LANGUAGES, SortMode, Topic, language_label};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

/// The three closed-choice controls in the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Topic,
    Language,
    Sort,
}

impl Selector {
    pub const ALL: [Selector; 3] = [Self::Topic, Self::Language, Self::Sort];

    pub fn next(self) -> Self {
        match self {
            Self::Topic => Self::Language,
            Self::Language => Self::Sort,
            Self::Sort => Self::Topic,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Topic => Self::Sort,
            Self::Language => Self::Topic,
            Self::Sort => Self::Language,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Topic => "Topic",
            Self::Language => "Language",
            Self::Sort => "Sort",
        }
    }

    /// Label of the value this selector currently holds.
    pub fn current_label(self, selection: &Selection) -> String {
        match self {
            Self::Topic => selection.topic.label().to_string(),
            Self::Language => language_label(&selection.language).to_string(),
            Self::Sort => selection.sort.label().to_string(),
        }
    }
}

/// Outcome of a key press inside the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuResult {
    Chosen { selector: Selector, value: String },
    Cancel,
}

/// One entry: query value and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub value: String,
    pub label: String,
}

/// Popup list of choices for one selector.
#[derive(Debug, Clone)]
pub struct ChoiceMenu {
    selector: Selector,
    options: Vec<MenuOption>,
    cursor: usize,
}

fn option(value: &str, label: &str) -> MenuOption {
    MenuOption {
        value: value.to_string(),
        label: label.to_string(),
    }
}

impl ChoiceMenu {
    /// Open a menu with the cursor on the current value.
    pub fn new(selector: Selector, selection: &Selection) -> Self {
        let (options, current): (Vec<MenuOption>, &str) = match selector {
            Selector::Topic => (
                Topic::ALL.iter().map(|t| option(t.name(), t.label())).collect(),
                selection.topic.name(),
            ),
            Selector::Language => {
                let mut options = vec![option(ALL_LANGUAGES, language_label(ALL_LANGUAGES))];
                options.extend(LANGUAGES.iter().map(|l| option(l.code, l.name)));
                // Keep an unlisted code from the query choosable
                if !options.iter().any(|o| o.value == selection.language) {
                    options.push(option(&selection.language, &selection.language));
                }
                (options, selection.language.as_str())
            }
            Selector::Sort => (
                SortMode::ALL.iter().map(|s| option(s.name(), s.label())).collect(),
                selection.sort.name(),
            ),
        };
        let cursor = options.iter().position(|o| o.value == current).unwrap_or(0);
        Self {
            selector,
            options,
            cursor,
        }
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Option<MenuResult> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.options.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = self.options.len().saturating_sub(1);
                None
            }
            KeyCode::Enter => {
                let value = self.options.get(self.cursor)?.value.clone();
                Some(MenuResult::Chosen {
                    selector: self.selector,
                    value,
                })
            }
            KeyCode::Esc | KeyCode::Char('q') => Some(MenuResult::Cancel),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = (self.options.len() as u16 + 2).min(area.height);
        let width = 32.min(area.width);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|o| ListItem::new(o.label.as_str()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", self.selector.label()))
                    .title_bottom(Line::from(" Enter select · Esc cancel ").style(Style::default().fg(Color::DarkGray))),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, popup, &mut state);
    }
}
