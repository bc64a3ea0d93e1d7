//! Rendering for the file manager
//!
//! Draws the two panes, the status line, the key hint bar and whichever
//! dialog the current mode calls for.

use std::time::SystemTime;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    App, UIMode,
    clipboard::ClipboardMode,
    dialog::{centered_rect, fixed_centered_rect, render_dialog_frame, render_input_dialog, render_yes_no_buttons},
    input::KEY_HELP,
    ops::PendingDelete,
    pane::{EntryKind, Pane, PaneSnapshot},
    theme::THEME,
    util::{format_age, format_size, truncate_name},
};

/// Width of the right-aligned size column
const SIZE_COLUMN: usize = 8;

/// Keys shown in the bottom bar; the rest live in the help overlay
const HELP_BAR_KEYS: &[(&str, &str)] = &[
    ("F1", "Help"),
    ("F3", "View"),
    ("F4", "Edit"),
    ("F5", "Copy"),
    ("x", "Cut"),
    ("F6", "Rename"),
    ("F7", "Mkdir"),
    ("F8", "Delete"),
    ("F12", "Paste"),
    ("F10", "Quit"),
];

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let [panes_area, status_area, help_area] = Layout::vertical([
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help bar
        ])
        .areas(frame.area());

        // Rows inside the pane borders
        self.session
            .set_viewport(panes_area.height.saturating_sub(2).max(1) as usize);

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(panes_area);

        let now = SystemTime::now();
        let show_hidden = self.session.show_hidden;
        for (side, area) in [(Pane::Left, left_area), (Pane::Right, right_area)] {
            let is_active = self.session.active == side;
            render_pane(frame, area, self.session.pane(side).snapshot(), is_active, show_hidden, now);
        }

        self.render_status_line(frame, status_area);
        render_help_bar(frame, help_area);

        // Overlays
        match &self.ui_mode {
            UIMode::Normal => {}
            UIMode::Help => render_help_overlay(frame),
            UIMode::MkdirInput { input } => {
                render_input_dialog(frame, "Create Directory", "Enter directory name:", input)
            }
            UIMode::RenameInput { original, input } => {
                let label = format!("Rename \"{}\" to:", truncate_name(original, 40));
                render_input_dialog(frame, "Rename", &label, input)
            }
            UIMode::ConfirmDelete { pending } => render_delete_dialog(frame, pending),
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let base = Style::default().bg(THEME.status_bg);

        let line = if let Some((msg, _)) = &self.status {
            if msg.is_error {
                Line::from(Span::styled(format!(" [Error] {}", msg.text), base.fg(THEME.status_error_fg)))
            } else {
                Line::from(Span::styled(format!(" {}", msg.text), base.fg(THEME.status_info_fg)))
            }
        } else {
            let clipboard = &self.session.clipboard;
            let label = match clipboard.mode() {
                ClipboardMode::Empty => None,
                ClipboardMode::Copy => Some("copy"),
                ClipboardMode::Cut => Some("move"),
            };
            match (label, clipboard.source()) {
                (Some(label), Some(path)) => Line::from(Span::styled(
                    format!(" Clipboard ({}): {}", label, path.display()),
                    base.fg(THEME.clipboard_fg),
                )),
                _ => Line::default(),
            }
        };

        frame.render_widget(Paragraph::new(line).style(base), area);
    }
}

fn render_pane(
    frame: &mut Frame,
    area: Rect,
    pane: PaneSnapshot<'_>,
    is_active: bool,
    show_hidden: bool,
    now: SystemTime,
) {
    let border_style = if is_active {
        Style::default().fg(THEME.pane_active_border)
    } else {
        Style::default().fg(THEME.pane_inactive_border)
    };

    let mut title = format!(" {} ", pane.path.display());
    if show_hidden {
        title.push_str("[hidden] ");
    }

    let footer = match pane.entries.get(pane.selected) {
        Some(entry) => {
            let size = match entry.kind {
                EntryKind::Directory => "dir".to_string(),
                EntryKind::File => format_size(entry.size),
            };
            format!(
                " {}/{}  {}  {} ",
                pane.selected + 1,
                pane.entries.len(),
                size,
                format_age(entry.modified, now)
            )
        }
        None => " empty ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(THEME.pane_title))
        .title_bottom(Line::from(footer).right_aligned())
        .borders(Borders::ALL)
        .border_style(border_style);

    // -2 for borders, -2 for the highlight symbol
    let inner_width = area.width.saturating_sub(4) as usize;
    let name_width = inner_width.saturating_sub(SIZE_COLUMN);

    let items: Vec<ListItem> = pane
        .entries
        .iter()
        .map(|entry| {
            let (name, size, style) = match entry.kind {
                EntryKind::Directory => (
                    format!("{}/", entry.name),
                    String::new(),
                    Style::default().fg(THEME.directory_fg).add_modifier(Modifier::BOLD),
                ),
                EntryKind::File => (
                    entry.name.clone(),
                    format_size(entry.size),
                    Style::default().fg(THEME.file_fg),
                ),
            };
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<width$}", truncate_name(&name, name_width), width = name_width),
                    style,
                ),
                Span::styled(format!("{:>width$}", size, width = SIZE_COLUMN), Style::default().fg(THEME.size_fg)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let highlight_style = if is_active {
        Style::default()
            .bg(THEME.cursor_active_bg)
            .fg(THEME.cursor_active_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(THEME.cursor_inactive_bg).fg(THEME.cursor_inactive_fg)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("▶ ");

    let selected = (!pane.entries.is_empty()).then_some(pane.selected);
    let mut state = ListState::default()
        .with_offset(pane.scroll_top)
        .with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(THEME.help_key_fg).bg(THEME.help_key_bg);
    let desc_style = Style::default().fg(THEME.help_desc_fg).bg(THEME.help_desc_bg);
    let sep_style = Style::default().bg(THEME.help_desc_bg);

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in HELP_BAR_KEYS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", sep_style));
        }
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!("{} ", desc), desc_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(THEME.help_desc_bg));
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(50, 80, frame.area());
    let inner = render_dialog_frame(frame, area, "Keys", THEME.dialog_border);

    let key_style = Style::default().fg(THEME.pane_title).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = KEY_HELP
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {:<12}", key), key_style),
                Span::raw(*desc),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::styled(" Press any key to close", Style::default().fg(THEME.dialog_hint)));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_delete_dialog(frame: &mut Frame, pending: &PendingDelete) {
    let area = fixed_centered_rect(50, 8, frame.area());
    let inner = render_dialog_frame(frame, area, "Confirm Delete", THEME.dialog_delete_border);

    let [_, message_area, note_area, _, buttons_area] = Layout::vertical([
        Constraint::Length(1), // spacer
        Constraint::Length(1), // message
        Constraint::Length(1), // note
        Constraint::Length(1), // spacer
        Constraint::Length(1), // buttons
    ])
    .areas(inner);

    let what = match pending.kind() {
        EntryKind::Directory => "directory",
        EntryKind::File => "file",
    };
    let message = format!("Delete {} \"{}\"?", what, truncate_name(pending.name(), 30));
    frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), message_area);

    if pending.kind() == EntryKind::Directory {
        let note = Paragraph::new("Only empty directories can be removed")
            .style(Style::default().fg(THEME.dialog_warning_text))
            .alignment(Alignment::Center);
        frame.render_widget(note, note_area);
    }

    render_yes_no_buttons(frame, buttons_area);
}
