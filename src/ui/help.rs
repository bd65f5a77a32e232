use crate::ui::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, what: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<10}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(what),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("Esc", "Back / cancel"),
        Line::from(""),
        section("Server List"),
        binding("↑/k ↓/j", "Navigate up/down"),
        binding("g/G", "Jump to first/last page"),
        binding("Enter", "Show server details"),
        binding("o", "Open the join link in a browser"),
        binding("y", "Copy the join link to clipboard"),
        binding("a", "See all servers when none match"),
        Line::from(""),
        section("Filters"),
        binding("t", "Choose topic"),
        binding("l", "Choose language"),
        binding("s", "Choose sort order"),
        binding("Tab", "Focus the filter bar"),
        binding("←/→", "Move between filters (when focused)"),
        binding("Enter", "Open the focused filter"),
        Line::from(""),
        section("Details"),
        binding("↑/↓", "Scroll sidebar"),
        binding("PgUp/PgDn", "Scroll page up/down"),
        binding("o / y", "Open / copy join link"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help · Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
