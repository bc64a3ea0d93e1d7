use ratatui::style::Color;

pub struct Theme {
    // Pane borders
    pub pane_active_border: Color,
    pub pane_inactive_border: Color,
    pub pane_title: Color,
    pub pane_footer: Color,

    // File list
    pub directory_fg: Color,
    pub file_fg: Color,
    pub size_fg: Color,

    // Cursor
    pub cursor_active_fg: Color,
    pub cursor_active_bg: Color,
    pub cursor_inactive_fg: Color,
    pub cursor_inactive_bg: Color,

    // Status bar
    pub status_error_fg: Color,
    pub status_info_fg: Color,
    pub status_bg: Color,
    pub clipboard_fg: Color,

    // Help bar
    pub help_key_fg: Color,
    pub help_key_bg: Color,
    pub help_desc_fg: Color,
    pub help_desc_bg: Color,

    // Dialogs
    pub dialog_bg: Color,
    pub dialog_border: Color,
    pub dialog_delete_border: Color,
    pub dialog_warning_text: Color,
    pub dialog_input_fg: Color,
    pub dialog_input_bg: Color,
    pub dialog_hint: Color,
    pub dialog_shadow: Color,
    pub dialog_button_fg: Color,
    pub dialog_button_bg: Color,
}

// Dark palette, blue accents
pub const THEME: Theme = Theme {
    pane_active_border: Color::Rgb(122, 162, 247),   // #7aa2f7
    pane_inactive_border: Color::Rgb(86, 95, 137),   // #565f89
    pane_title: Color::Rgb(224, 175, 104),           // #e0af68
    pane_footer: Color::Rgb(115, 122, 162),          // #737aa2

    directory_fg: Color::Rgb(122, 162, 247),         // #7aa2f7
    file_fg: Color::Rgb(169, 177, 214),              // #a9b1d6
    size_fg: Color::Rgb(115, 122, 162),              // #737aa2

    cursor_active_fg: Color::Rgb(26, 27, 38),        // #1a1b26
    cursor_active_bg: Color::Rgb(122, 162, 247),     // #7aa2f7
    cursor_inactive_fg: Color::Rgb(169, 177, 214),   // #a9b1d6
    cursor_inactive_bg: Color::Rgb(41, 46, 66),      // #292e42

    status_error_fg: Color::Rgb(247, 118, 142),      // #f7768e
    status_info_fg: Color::Rgb(158, 206, 106),       // #9ece6a
    status_bg: Color::Rgb(26, 27, 38),               // #1a1b26
    clipboard_fg: Color::Rgb(187, 154, 247),         // #bb9af7

    help_key_fg: Color::Rgb(26, 27, 38),             // #1a1b26
    help_key_bg: Color::Rgb(140, 160, 210),          // #8ca0d2
    help_desc_fg: Color::Rgb(169, 177, 214),         // #a9b1d6
    help_desc_bg: Color::Rgb(36, 40, 59),            // #24283b

    dialog_bg: Color::Rgb(26, 27, 38),               // #1a1b26
    dialog_border: Color::Rgb(122, 162, 247),        // #7aa2f7
    dialog_delete_border: Color::Rgb(247, 118, 142), // #f7768e
    dialog_warning_text: Color::Rgb(224, 175, 104),  // #e0af68
    dialog_input_fg: Color::Rgb(169, 177, 214),      // #a9b1d6
    dialog_input_bg: Color::Rgb(41, 46, 66),         // #292e42
    dialog_hint: Color::Rgb(86, 95, 137),            // #565f89
    dialog_shadow: Color::Rgb(15, 15, 20),           // #0f0f14
    dialog_button_fg: Color::Rgb(169, 177, 214),     // #a9b1d6
    dialog_button_bg: Color::Rgb(56, 62, 87),        // #383e57
};
