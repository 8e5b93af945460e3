use crate::app::App;
use crate::domain::{Column, Command};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(outer[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main[0]);

    // Rows inside the list borders; the navigator scrolls against this.
    let list_rows = columns[0].height.saturating_sub(2).max(1) as usize;
    app.sync_viewport(list_rows);

    draw_column(frame, app, Column::Unmanaged, columns[0]);
    draw_column(frame, app, Column::Managed, columns[1]);
    draw_logs(frame, app, main[1]);
    draw_status_bar(frame, app, outer[1]);

    if app.show_help {
        draw_help(frame);
    }
}

fn draw_column(frame: &mut Frame, app: &App, column: Column, area: Rect) {
    let active = app.active_column() == column;
    let labels = app.column_items(column);
    let len = labels.len();
    let items: Vec<ListItem> = labels.into_iter().map(ListItem::new).collect();

    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let highlight_style = if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ({len}) ", column.title()))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(highlight_style)
        .highlight_symbol("▶ ");

    let nav = app.nav_state(column);
    let mut state = ListState::default().with_offset(nav.scroll_offset);
    if len > 0 {
        state.select(Some(nav.cursor));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let rows = area.height.saturating_sub(2).max(1) as usize;
    let lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take(rows)
        .rev()
        .map(|line| Line::from(line.as_str()))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Plan / Log ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let busy = if app.busy { "BUSY" } else { "IDLE" };
    let text = Line::from(vec![
        Span::styled(
            format!(" {busy} "),
            if app.busy {
                Style::default().bg(Color::Yellow).fg(Color::Black)
            } else {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            },
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} file(s) | target: {}",
                app.store().len(),
                app.target_dir().display()
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            "tab column | j/k move | space/enter toggle | x plan | r rescan | ? help | q quit",
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph = Paragraph::new(text).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = Command::ALL
        .iter()
        .map(|command| {
            Line::from(vec![
                Span::styled(
                    format!("{:<16}", command.key_hint()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:<16}", command.label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(command.description()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
