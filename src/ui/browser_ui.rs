use super::types::{Button, Theme};
use crate::catalog::{Catalog, Entry};
use crate::core::state::{NavigationState, Notice};
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

const TITLE: &str = "GAMEZILLA MEGA COLLECTION VOL. 4";
const HINTS: &str =
    " Mouse: Click to select • Keyboard: ↑↓ Navigate, N/P Page, ENTER Launch, Q Quit ";
const BUTTON_WIDTH: u16 = 12;
const LOADING_STEPS: [&str; 5] = [
    "Loading executable...",
    "Decompressing data files...",
    "Checking system resources...",
    "Initializing graphics engine...",
    "Loading assets...",
];

/// Where everything sits on screen, shared by drawing and mouse hit-testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub window: Rect,
    pub header: Rect,
    pub page_info: Rect,
    /// One row per entry of the page
    pub list: Rect,
    pub info: Rect,
    pub buttons: [(Button, Rect); 4],
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, page_size: usize) -> Self {
        let [window, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let inner = Block::bordered().inner(window);
        let rows = u16::try_from(page_size).unwrap_or(u16::MAX);

        let [_, header, _, page_info, _, list, _, info, _, button_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(rows),
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let [_, launch, _, prev, _, next, _, quit, _] = Layout::horizontal([
            Constraint::Length(2),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(2),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(2),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(2),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(0),
        ])
        .areas(button_row);

        Self {
            window,
            header,
            page_info,
            list,
            info,
            buttons: {
                let areas = [launch, prev, next, quit];
                std::array::from_fn(|i| (Button::ALL[i], areas[i]))
            },
            status,
        }
    }

    /// Row of the page under the pointer
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        self.list
            .contains(Position::new(column, row))
            .then(|| usize::from(row - self.list.y))
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<Button> {
        self.buttons
            .iter()
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|(button, _)| *button)
    }
}

/// Browser screen (Stateless Renderer)
pub struct UI;

impl UI {
    /// Render the catalog page, info panel, buttons and status bar
    pub fn render(
        f: &mut Frame,
        layout: &ScreenLayout,
        state: &NavigationState,
        catalog: &Catalog,
        theme: &Theme,
        status: Option<&str>,
    ) {
        f.render_widget(window_block(TITLE, theme), layout.window);

        let header = Paragraph::new(vec![
            Line::styled(
                format!("{} Programs - Your Entertainment Solution!", catalog.len()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Games • Utilities • Demos • Shareware - All In One Package!",
                Style::default().fg(Color::Cyan),
            ),
        ])
        .alignment(Alignment::Center);
        f.render_widget(header, layout.header);

        let visible = state.visible();
        let page_info = Paragraph::new(Line::styled(
            page_indicator(state),
            Style::default().fg(Color::Yellow),
        ));
        f.render_widget(page_info, layout.page_info);

        let width = usize::from(layout.list.width);
        let rows: Vec<Line> = catalog.all()[visible]
            .iter()
            .map(|entry| {
                let selected = entry.number == state.selected_number();
                let (marker, style) = if selected {
                    (
                        "►",
                        Style::default()
                            .fg(Color::White)
                            .bg(theme.highlight)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if entry.real {
                    ("●", Style::default().fg(theme.real))
                } else {
                    (" ", Style::default().fg(theme.filler))
                };
                let text = format!("{} {:3}. {}", marker, entry.number, entry.name);
                Line::styled(fit(&text, width), style)
            })
            .collect();
        f.render_widget(Paragraph::new(rows), layout.list);

        if let Ok(entry) = catalog.get(state.selected_number()) {
            f.render_widget(info_panel(entry, theme), layout.info);
        }

        for (button, area) in &layout.buttons {
            let label = Paragraph::new(format!("[{:^10}]", button.label()))
                .style(Style::default().fg(Color::Black).bg(Color::White));
            f.render_widget(label, *area);
        }

        let status = Paragraph::new(status.unwrap_or(HINTS))
            .style(Style::default().fg(Color::Black).bg(theme.status));
        f.render_widget(status, layout.status);
    }

    /// Modal shown until the next key press or click
    pub fn render_notice(f: &mut Frame, notice: &Notice, theme: &Theme) {
        let plain = Style::default();
        let alert = Style::default()
            .fg(Color::Red)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD);

        let (title, mut lines) = match notice {
            Notice::NotInstalled { file, .. } => (
                "ERROR - Program Not Found",
                vec![
                    Line::styled("FILE NOT FOUND", alert),
                    Line::default(),
                    Line::styled(format!("File: {}", file), plain),
                    Line::default(),
                    Line::styled("This program is listed in the catalog but", plain),
                    Line::styled("is not installed.", plain),
                    Line::default(),
                    Line::styled("Installation Disk 1 of 3 required.", plain),
                ],
            ),
            Notice::LaunchNotFound { name, searched } => {
                let mut lines = vec![
                    Line::styled("PROGRAM MISSING", alert),
                    Line::default(),
                    Line::styled(format!("{} is installed but its", name), plain),
                    Line::styled("files could not be found. Looked in:", plain),
                ];
                lines.extend(
                    searched
                        .iter()
                        .map(|path| Line::styled(format!("  {}", path), plain)),
                );
                ("ERROR - Program Missing", lines)
            }
            Notice::LaunchFailed { name, reason } => (
                "ERROR - Program Crashed",
                vec![
                    Line::styled("GENERAL PROTECTION FAULT", alert),
                    Line::default(),
                    Line::styled(format!("{} did not exit cleanly:", name), plain),
                    Line::styled(reason.clone(), plain),
                ],
            ),
        };
        lines.push(Line::default());
        lines.push(Line::styled(
            "Press any key to return...",
            Style::default().fg(Color::Black).bg(theme.status),
        ));

        let height = u16::try_from(lines.len() + 4).unwrap_or(u16::MAX);
        let area = centered(f.area(), 56, height);
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines).block(window_block(title, theme).padding(
                ratatui::widgets::Padding::horizontal(2),
            )),
            area,
        );
    }

    /// Splash shown before the terminal is handed to a program
    pub fn render_loading(f: &mut Frame, entry: &Entry, theme: &Theme) {
        let mut lines = vec![
            Line::styled(
                format!("Program: {}", entry.name),
                Style::default().fg(Color::Yellow),
            ),
            Line::default(),
        ];
        lines.extend(LOADING_STEPS.iter().map(|step| {
            Line::styled(format!("✓ {}", step), Style::default().fg(theme.real))
        }));

        let area = centered(f.area(), 56, 10);
        f.render_widget(Clear, f.area());
        f.render_widget(
            Paragraph::new(lines).block(
                window_block("LOADING", theme).padding(ratatui::widgets::Padding::horizontal(2)),
            ),
            area,
        );
    }
}

fn window_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ))
        .border_type(if theme.rounded_borders {
            BorderType::Rounded
        } else {
            BorderType::Plain
        })
        .border_style(Style::default().fg(theme.border))
}

fn info_panel<'a>(entry: &'a Entry, theme: &Theme) -> Paragraph<'a> {
    let status = if entry.real {
        Line::styled(
            "Status: ● INSTALLED - Ready to launch!",
            Style::default()
                .fg(theme.real)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Line::styled(
            "Status: Not installed (requires Disk 1 of 3)",
            Style::default().fg(Color::Yellow),
        )
    };

    Paragraph::new(vec![
        Line::from(vec![Span::raw("Selected: "), Span::raw(entry.name.as_str())]),
        Line::from(format!("Type: {}", entry.category.to_uppercase())),
        status,
    ])
    .style(Style::default().fg(Color::Cyan))
    .block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Cyan)),
    )
}

fn page_indicator(state: &NavigationState) -> String {
    let visible = state.visible();
    format!(
        "Programs {}-{} of {} (Page {})",
        visible.start + 1,
        visible.end,
        state.len,
        state.page + 1
    )
}

/// Pad or cut `text` to exactly `width` terminal columns
fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_rows_follow_page_size() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 30), 10);
        assert_eq!(layout.list.height, 10);
        assert_eq!(layout.status.y, 29);
        assert_eq!(layout.status.height, 1);
        assert!(layout.list.bottom() <= layout.info.y);
        assert!(layout.info.bottom() < layout.buttons[0].1.y + 1);
    }

    #[test]
    fn test_row_at() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 30), 10);
        let x = layout.list.x + 3;
        assert_eq!(layout.row_at(x, layout.list.y), Some(0));
        assert_eq!(layout.row_at(x, layout.list.y + 5), Some(5));
        assert_eq!(layout.row_at(x, layout.list.y + 9), Some(9));
        assert_eq!(layout.row_at(x, layout.list.y + 10), None);
        assert_eq!(layout.row_at(x, layout.list.y - 1), None);
        assert_eq!(layout.row_at(0, layout.list.y), None);
    }

    #[test]
    fn test_button_at() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 30), 10);
        for (button, area) in &layout.buttons {
            assert_eq!(area.width, BUTTON_WIDTH);
            assert_eq!(layout.button_at(area.x, area.y), Some(*button));
            assert_eq!(layout.button_at(area.right() - 1, area.y), Some(*button));
        }
        let (_, launch) = layout.buttons[0];
        assert_eq!(layout.button_at(launch.x - 1, launch.y), None);
        assert_eq!(layout.button_at(launch.x, launch.y - 1), None);
    }

    #[test]
    fn test_page_indicator() {
        let state = NavigationState::new(500, 10, 386);
        assert_eq!(page_indicator(&state), "Programs 381-390 of 500 (Page 39)");

        let last = NavigationState::new(25, 10, 24);
        assert_eq!(page_indicator(&last), "Programs 21-25 of 25 (Page 3)");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("►  1. X", 7), "►  1. X");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 56, 10), Rect::new(22, 15, 56, 10));
        assert_eq!(centered(Rect::new(0, 0, 20, 5), 56, 10), Rect::new(0, 0, 20, 5));
    }
}
