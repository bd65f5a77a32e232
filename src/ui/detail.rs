use crate::app::App;
use crate::format::with_separators;
use crate::stats::InstanceRecord;
use crate::ui::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Modal overlay with the full details of one instance.
pub fn render(app: &App, frame: &mut Frame) {
    let instance = match app.details_instance() {
        Some(i) => i,
        None => return,
    };

    let area = centered_rect(84, 84, frame.area());
    let [header_area, body_area, footer_area] = sections(instance, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", instance.domain))
        .title_bottom(
            Line::from(format!(" scroll: {} ", app.detail_scroll)).alignment(Alignment::Right),
        );
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::DarkGray);
    let mut header = Vec::new();
    if let Some(ref banner) = instance.banner {
        header.push(Line::from(vec![
            Span::styled(" Banner: ", label),
            Span::styled(banner.as_str(), Style::default().fg(Color::Blue)),
        ]));
    }
    header.push(Line::from(vec![
        Span::styled(" Icon: ", label),
        Span::styled(instance.icon_or_default(), Style::default().fg(Color::Blue)),
    ]));
    header.push(Line::from(vec![
        Span::styled(" Users: ", label),
        Span::styled(
            with_separators(instance.counts.users),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Comments: ", label),
        Span::styled(
            with_separators(instance.counts.comments),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Active: ", label),
        Span::styled(
            format!("{} per month", with_separators(instance.counts.users_active_month)),
            Style::default().fg(Color::Yellow),
        ),
    ]));
    header.push(Line::from(vec![
        Span::styled(" Join: ", label),
        Span::styled(
            instance.join_url(),
            Style::default().fg(Color::Green).add_modifier(Modifier::UNDERLINED),
        ),
    ]));
    frame.render_widget(Paragraph::new(header), header_area);

    let body = sidebar(instance).scroll((app.detail_scroll, 0));
    frame.render_widget(body, body_area);

    let keys = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let footer = Line::from(vec![
        Span::styled(" ↑↓/PgUp/PgDn", keys),
        Span::raw(" Scroll  "),
        Span::styled("o", keys),
        Span::raw(" Join  "),
        Span::styled("y", keys),
        Span::raw(" Copy Link  "),
        Span::styled("Esc", keys),
        Span::raw(" Close"),
    ]);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

/// Header, sidebar and footer areas of the modal on a `screen`-sized terminal.
fn sections(instance: &InstanceRecord, screen: Rect) -> [Rect; 3] {
    let inner = centered_rect(84, 84, screen).inner(Margin::new(1, 1));
    // header rows: [banner] + icon + stats + join
    let header_rows = if instance.banner.is_some() { 4 } else { 3 };
    Layout::vertical([
        Constraint::Length(header_rows),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(inner)
}

fn sidebar(instance: &InstanceRecord) -> Paragraph<'_> {
    Paragraph::new(tui_markdown::from_str(instance.sidebar_or_description()))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
}

/// Largest scroll offset that still leaves sidebar text on screen.
pub fn max_scroll(instance: &InstanceRecord, screen: Rect) -> u16 {
    let [_, body, _] = sections(instance, screen);
    let total = sidebar(instance).line_count(body.width);
    u16::try_from(total.saturating_sub(body.height as usize)).unwrap_or(u16::MAX)
}
