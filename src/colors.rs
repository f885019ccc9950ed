use ratatui::style::Color;

// Color Theme Constants
pub const COLOR_BODY_BG: Color = Color::Black;
pub const COLOR_MAIN_BG: Color = Color::Blue;                     // Header and menu frame
pub const COLOR_MAIN_FG: Color = Color::Gray;
pub const COLOR_TITLE: Color = Color::White;
pub const COLOR_COLUMNS_BG: Color = Color::Green;                 // Column titles bar
pub const COLOR_FILE: Color = Color::Gray;
pub const COLOR_FILE_SEL: Color = Color::White;
pub const COLOR_DIRECTORY: Color = Color::LightBlue;
pub const COLOR_DIRECTORY_SEL: Color = Color::LightCyan;
pub const COLOR_BROKEN_LINK_BG: Color = Color::LightRed;
pub const COLOR_BROKEN_LINK: Color = Color::White;
pub const COLOR_BROKEN_LINK_SEL: Color = Color::Blue;
pub const COLOR_FOCUS_BG: Color = Color::Red;                     // Focused row
pub const COLOR_KEY_BG: Color = Color::White;                     // Menu hotkeys
pub const COLOR_KEY_FG: Color = Color::Black;
pub const COLOR_HELP_TITLE: Color = Color::Cyan;
pub const COLOR_HELP_HEADER: Color = Color::Yellow;
pub const COLOR_HELP_HINT: Color = Color::DarkGray;
