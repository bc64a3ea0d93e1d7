use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::THEME;

// ============================================================================
// Key Handling
// ============================================================================

pub enum DialogResult {
    Accept,
    Reject,
    Pending,
}

/// Yes/no bindings for confirmations.
/// Only an explicit y/Y accepts; n/N/Esc reject, anything else waits.
pub fn handle_yes_no_keys(key: KeyCode) -> DialogResult {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => DialogResult::Accept,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => DialogResult::Reject,
        _ => DialogResult::Pending,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TextInput {
    Submit,
    Cancel,
    Editing,
}

/// Line editing for single-line prompts
pub fn handle_text_input(key: KeyCode, input: &mut String) -> TextInput {
    match key {
        KeyCode::Enter => TextInput::Submit,
        KeyCode::Esc => TextInput::Cancel,
        KeyCode::Backspace => {
            input.pop();
            TextInput::Editing
        }
        KeyCode::Char(c) => {
            input.push(c);
            TextInput::Editing
        }
        _ => TextInput::Editing,
    }
}

// ============================================================================
// Dialog Frame Rendering
// ============================================================================

/// Renders the common dialog frame: shadow, clear, bordered block with title.
/// Returns the inner area for content rendering.
pub fn render_dialog_frame(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> Rect {
    let shadow_area = Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        ..area
    }
    .intersection(frame.area());
    frame.render_widget(Block::default().style(Style::default().bg(THEME.dialog_shadow)), shadow_area);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(THEME.dialog_bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Prompt with a label, an editable line and a key hint
pub fn render_input_dialog(frame: &mut Frame, title: &str, label: &str, input: &str) {
    let area = fixed_centered_rect(50, 8, frame.area());
    let inner = render_dialog_frame(frame, area, title, THEME.dialog_border);

    let [label_area, input_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .areas(inner);

    frame.render_widget(Paragraph::new(label), label_area);

    // Keep the tail visible when the text is wider than the box
    let width = input_area.width.saturating_sub(1) as usize;
    let visible: String = {
        let count = input.chars().count();
        input.chars().skip(count.saturating_sub(width)).collect()
    };
    let line = Line::from(vec![Span::raw(visible), Span::raw("_")]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(THEME.dialog_input_fg).bg(THEME.dialog_input_bg)),
        input_area,
    );

    frame.render_widget(
        Paragraph::new("Enter: confirm  Esc: cancel")
            .style(Style::default().fg(THEME.dialog_hint))
            .alignment(Alignment::Center),
        hint_area,
    );
}

// ============================================================================
// Common Button Layouts
// ============================================================================

/// Renders a centered Yes/No button row.
pub fn render_yes_no_buttons(frame: &mut Frame, area: Rect) {
    let [_, yes_area, _, no_area, _] = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(10),
        Constraint::Percentage(20),
        Constraint::Percentage(25),
    ])
    .areas(area);

    let button = Style::default().fg(THEME.dialog_button_fg).bg(THEME.dialog_button_bg);
    frame.render_widget(Paragraph::new(" [Y]es ").style(button).alignment(Alignment::Center), yes_area);
    frame.render_widget(Paragraph::new(" [N]o ").style(button).alignment(Alignment::Center), no_area);
}

// ============================================================================
// Centered Rect Helpers
// ============================================================================

/// Creates a centered rectangle sized as a percentage of an area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

/// Centered rectangle with a percentage width and a fixed height in rows
pub fn fixed_centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height - height) / 2;
    let row = Rect { y, height, ..area };
    centered_rect(percent_x, 100, row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(matches!(handle_yes_no_keys(KeyCode::Char('y')), DialogResult::Accept));
        assert!(matches!(handle_yes_no_keys(KeyCode::Char('Y')), DialogResult::Accept));
        assert!(matches!(handle_yes_no_keys(KeyCode::Enter), DialogResult::Pending));
        assert!(matches!(handle_yes_no_keys(KeyCode::Char('n')), DialogResult::Reject));
        assert!(matches!(handle_yes_no_keys(KeyCode::Esc), DialogResult::Reject));
        assert!(matches!(handle_yes_no_keys(KeyCode::Char('q')), DialogResult::Pending));
    }

    #[test]
    fn text_input_edits_in_place() {
        let mut input = String::from("ab");
        assert_eq!(handle_text_input(KeyCode::Char('c'), &mut input), TextInput::Editing);
        assert_eq!(input, "abc");
        assert_eq!(handle_text_input(KeyCode::Backspace, &mut input), TextInput::Editing);
        assert_eq!(input, "ab");
        assert_eq!(handle_text_input(KeyCode::Left, &mut input), TextInput::Editing);
        assert_eq!(handle_text_input(KeyCode::Enter, &mut input), TextInput::Submit);
        assert_eq!(handle_text_input(KeyCode::Esc, &mut input), TextInput::Cancel);
        assert_eq!(input, "ab");
    }

    #[test]
    fn fixed_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = fixed_centered_rect(50, 8, area);
        assert_eq!(rect.height, 8);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 16);
    }
}
