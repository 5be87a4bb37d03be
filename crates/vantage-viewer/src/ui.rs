//! Screen rendering.
//!
//! One draw function per screen; everything renders from the [`UiModel`]
//! snapshot assembled by the app shell.

use crate::app::{InputFocus, UiModel};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use vantage_core::session::Screen;

const ACCENT_COLOR: Color = Color::Cyan;
const ALERT_COLOR: Color = Color::LightRed;
const DIM_COLOR: Color = Color::DarkGray;
const SELECTED_COLOR: Color = Color::LightGreen;

pub fn draw(frame: &mut Frame, model: &UiModel) {
    match model.screen {
        Screen::SigningIn => draw_signing_in(frame, model),
        Screen::Unauthenticated => draw_sign_in_prompt(frame, model),
        Screen::NoModelOpen => draw_open_form(frame, model),
        Screen::ModelOpen => draw_viewport(frame, model),
    }
}

fn draw_sign_in_prompt(frame: &mut Frame, model: &UiModel) {
    let area = centered_rect(frame.size(), 44, 7);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Vantage ")
        .title_alignment(Alignment::Center);

    let mut lines = vec![
        Line::from("Not signed in."),
        Line::from(vec![
            Span::from("Press "),
            Span::styled("s", key_style()),
            Span::from(" to sign in, "),
            Span::styled("q", key_style()),
            Span::from(" to quit."),
        ]),
    ];
    if let Some(alert) = &model.alert {
        lines.push(Line::from(Span::styled(
            alert.clone(),
            Style::default().fg(ALERT_COLOR),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_signing_in(frame: &mut Frame, model: &UiModel) {
    let area = centered_rect(frame.size(), 44, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Vantage ")
        .title_alignment(Alignment::Center);

    let line = Line::from(vec![
        Span::styled(model.spinner.to_string(), key_style()),
        Span::from(" Signing in…"),
    ]);
    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_open_form(frame: &mut Frame, model: &UiModel) {
    let area = centered_rect(frame.size(), 56, 11);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Open model ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    frame.render_widget(
        input_field("Project", &model.project_input, model.focus == InputFocus::Project),
        rows[0],
    );
    frame.render_widget(
        input_field("Model", &model.model_input, model.focus == InputFocus::Model),
        rows[1],
    );

    let hint = if model.busy_open {
        Line::from(vec![
            Span::styled(model.spinner.to_string(), key_style()),
            Span::from(" Opening…"),
        ])
    } else {
        Line::from(vec![
            Span::styled("tab", key_style()),
            Span::from(" switch  "),
            Span::styled("enter", key_style()),
            Span::from(" open  "),
            Span::styled("ctrl-c", key_style()),
            Span::from(" quit"),
        ])
    };
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rows[2]);

    if let Some(alert) = &model.alert {
        let paragraph = Paragraph::new(Span::styled(
            alert.clone(),
            Style::default().fg(ALERT_COLOR),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rows[3]);
    }
}

fn draw_viewport(frame: &mut Frame, model: &UiModel) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(toolbar(), rows[0]);
    draw_view_body(frame, model, rows[1]);
    frame.render_widget(status_line(model), rows[2]);
}

fn toolbar() -> Paragraph<'static> {
    let entries: [(&str, &str); 8] = [
        ("↑↓", "navigate"),
        ("enter", "select"),
        ("a", "all"),
        ("esc", "clear"),
        ("f", "fit"),
        ("e", "emphasis off"),
        ("c", "close"),
        ("x", "sign out"),
    ];
    let mut spans = Vec::new();
    for (key, label) in entries {
        spans.push(Span::styled(format!(" {key} "), key_style()));
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(DIM_COLOR),
        ));
    }
    Paragraph::new(Line::from(spans))
}

fn draw_view_body(frame: &mut Frame, model: &UiModel, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(area);

    let view_title = match &model.display.mounted_view {
        Some(view) => format!(" View {view} "),
        None => " View ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(view_title);

    let navigable = model.display.navigable().to_vec();
    let items: Vec<ListItem> = if navigable.is_empty() {
        vec![ListItem::new(Span::styled(
            "no elements in focus — press f to fit the view",
            Style::default().fg(DIM_COLOR),
        ))]
    } else {
        navigable
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let cursor = if index == model.display.cursor { "▸" } else { " " };
                let selected = model.display.selection.contains(id);
                let marker = if selected { "●" } else { "○" };
                let style = if selected {
                    Style::default().fg(SELECTED_COLOR)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{cursor} {marker} {id}"),
                    style,
                )))
            })
            .collect()
    };
    frame.render_widget(List::new(items).block(block), columns[0]);

    let display = &model.display;
    let mut info = vec![
        Line::from(format!("framed     {}", display.framed.len())),
        Line::from(format!("emphasized {}", display.emphasized.len())),
    ];
    match display.transparency {
        Some(transparency) => info.push(Line::from(format!("fade       {transparency:.2}"))),
        None => info.push(Line::from(Span::styled(
            "fade       off",
            Style::default().fg(DIM_COLOR),
        ))),
    }
    info.push(Line::from(format!("selected   {}", display.selection.len())));

    let side = Paragraph::new(info)
        .block(Block::default().borders(Borders::ALL).title(" Display "));
    frame.render_widget(side, columns[1]);
}

fn status_line(model: &UiModel) -> Paragraph<'_> {
    let line = if let Some(alert) = &model.alert {
        Line::from(Span::styled(
            alert.as_str(),
            Style::default().fg(ALERT_COLOR),
        ))
    } else {
        match model.display.selection.as_slice() {
            [] => Line::from(Span::styled("nothing selected", Style::default().fg(DIM_COLOR))),
            [only] => Line::from(format!("selected element {only}")),
            many => Line::from(format!("{} elements selected", many.len())),
        }
    };
    Paragraph::new(line)
}

fn input_field<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let border_style = if focused {
        Style::default().fg(ACCENT_COLOR)
    } else {
        Style::default().fg(DIM_COLOR)
    };
    let content = if focused {
        format!("{value}▏")
    } else {
        value.to_string()
    };
    Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {label} ")),
    )
}

fn key_style() -> Style {
    Style::default()
        .fg(ACCENT_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
