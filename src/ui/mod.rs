pub mod detail;
mod help;
mod list;
pub mod menu;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Top-level render dispatch. Overlays stack: details, then menu, then help.
pub fn render(app: &App, frame: &mut Frame) {
    list::render(app, frame);

    if app.details.is_some() {
        detail::render(app, frame);
    }

    if let Some(ref menu) = app.menu {
        menu.render(frame);
    }

    if app.show_help {
        help::render(frame);
    }
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{sample_recommendations, sample_stats};
    use crate::query::QueryParams;
    use crate::ui::menu::Selector;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn mounted(query: &str) -> App {
        let mut app = App::seeded(sample_stats(4), sample_recommendations(), 5);
        app.update_page_size(30);
        app.mount(&QueryParams::parse(query));
        app
    }

    #[test]
    fn test_list_shows_totals_filters_and_rows() {
        let screen = draw(&mounted("sort=most_active"));
        assert!(screen.contains("Lemmy Servers"));
        assert!(screen.contains("4 instances with 60 monthly active users"));
        assert!(screen.contains("Most Active"));
        assert!(screen.contains("All Topics"));
        assert!(screen.contains("server3.example"));
        assert!(screen.contains("1-4 of 4"));
    }

    #[test]
    fn test_empty_result_offers_see_all() {
        let screen = draw(&mounted("topic=furry"));
        assert!(screen.contains("No servers found"));
        assert!(screen.contains("to see all servers"));
    }

    #[test]
    fn test_details_modal() {
        let mut app = mounted("sort=most_active");
        app.open_details();
        let screen = draw(&app);
        assert!(screen.contains("https://server3.example"));
        assert!(screen.contains("/static/assets/images/lemmy.svg"));
        assert!(screen.contains("Server number 3"));
    }

    #[test]
    fn test_menu_overlay() {
        let mut app = mounted("");
        app.open_menu(Selector::Sort);
        let screen = draw(&app);
        assert!(screen.contains("Least Active"));
        assert!(screen.contains("Enter select"));
    }
}
