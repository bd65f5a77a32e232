use crate::app::{App, Focus};
use crate::format::{first_line, fit_str, num_to_si, truncate_str, with_separators};
use crate::stats::InstanceRecord;
use crate::taxonomy::INSTANCE_HELPERS;
use crate::ui::menu::Selector;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + comparison(1) + filters(3) + list(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(app, frame, chunks[0]);
    render_comparison(frame, chunks[1]);
    render_filter_bar(app, frame, chunks[2]);

    if app.displayed.is_empty() {
        render_none_found(frame, chunks[3]);
    } else {
        render_instances(app, frame, chunks[3]);
    }

    render_status(app, frame, chunks[4]);
}

fn render_title(app: &App, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " Lemmy Servers",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                " {} instances with {} monthly active users",
                num_to_si(app.stats.crawled_instances),
                num_to_si(app.stats.users_active_month),
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_comparison(frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " Compare instances: ",
        Style::default().fg(Color::DarkGray),
    )];
    for (i, helper) in INSTANCE_HELPERS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(helper.name, Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!(" <{}>", helper.link),
            Style::default().fg(Color::Blue),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Filters;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::raw(" ")];
    for selector in Selector::ALL {
        let active = focused && selector == app.active_selector;
        let value_style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("{}: ", selector.label()),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            format!(" {} ▾ ", selector.current_label(&app.selection)),
            value_style,
        ));
        spans.push(Span::raw("   "));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Join a Server "),
    );
    frame.render_widget(bar, area);
}

fn render_none_found(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            " No servers found for these filters.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::raw(" Press "),
            Span::styled("a", key_style()),
            Span::raw(" to see all servers."),
        ]),
    ];
    let empty = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Servers "),
    );
    frame.render_widget(empty, area);
}

const DOMAIN_WIDTH: usize = 24;
/// List borders plus the highlight symbol.
const ROW_CHROME: usize = 4;

/// One list row sized to `width` columns: domain, description, count badges.
fn instance_row(instance: &InstanceRecord, width: usize) -> Line<'static> {
    let stats = format!(
        "  👤 {}  💬 {}  ✔ {}/mo",
        with_separators(instance.counts.users),
        with_separators(instance.counts.comments),
        with_separators(instance.counts.users_active_month),
    );
    let inner = width.saturating_sub(ROW_CHROME);
    let domain_width = DOMAIN_WIDTH.min(inner.saturating_sub(stats.width() + 1));
    let room = inner.saturating_sub(domain_width + 1 + stats.width());
    Line::from(vec![
        Span::styled(
            fit_str(&instance.domain, domain_width),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(truncate_str(first_line(&instance.description), room)),
        Span::styled(stats, Style::default().fg(Color::Yellow)),
    ])
}

fn render_instances(app: &App, frame: &mut Frame, area: Rect) {
    let width = area.width as usize;
    let items: Vec<ListItem> = app
        .visible_page()
        .map(|instance| ListItem::new(instance_row(instance, width)))
        .collect();

    let page_info = format!(
        " {}-{} of {} ",
        app.list_offset + 1,
        app.list_offset + app.visible_page().count(),
        app.displayed.len()
    );

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Servers ")
                .title_bottom(Line::from(page_info).alignment(Alignment::Right)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if app.focus == Focus::List {
        list_state.select(Some(app.list_selected));
    }
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key_style()),
        Span::raw(" Navigate  "),
        Span::styled("Enter", key_style()),
        Span::raw(" Details  "),
        Span::styled("t/l/s", key_style()),
        Span::raw(" Filter  "),
        Span::styled("o", key_style()),
        Span::raw(" Join  "),
        Span::styled("?", key_style()),
        Span::raw(" Help  "),
        Span::styled("q", key_style()),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Counts;

    fn record(domain: &str, description: &str) -> InstanceRecord {
        InstanceRecord {
            domain: domain.to_string(),
            description: description.to_string(),
            counts: Counts {
                users: 1_234_567,
                comments: 98_765_432,
                users_active_month: 45_678,
            },
            ..Default::default()
        }
    }

    fn row_width(line: &Line) -> usize {
        line.spans.iter().map(|span| span.content.width()).sum()
    }

    #[test]
    fn test_row_fits_with_wide_badges() {
        let instance = record("lemmy.example", &"a long description ".repeat(10));
        for width in [60, 80, 120] {
            let line = instance_row(&instance, width);
            assert!(row_width(&line) <= width - ROW_CHROME, "width {width}");
        }
    }

    #[test]
    fn test_long_domain_is_truncated() {
        let instance = record("a-really-long-subdomain.of.some-server.example", "Hi");
        let line = instance_row(&instance, 100);
        assert_eq!(line.spans[0].content.width(), DOMAIN_WIDTH);
        assert!(line.spans[0].content.ends_with('…'));
        assert!(row_width(&line) <= 100 - ROW_CHROME);
    }

    #[test]
    fn test_short_domain_is_padded() {
        let line = instance_row(&record("a.example", "Hi"), 100);
        assert_eq!(line.spans[0].content, format!("{:<24}", "a.example"));
        assert_eq!(line.spans[2].content, "Hi");
    }
}
