use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(16, 18, 24);
pub const BG_BAR: Color = Color::Rgb(22, 25, 33);
pub const BG_SURFACE: Color = Color::Rgb(28, 32, 42);

// Primary accent
pub const AMBER: Color = Color::Rgb(245, 177, 66);

// Text
pub const TEXT: Color = Color::Rgb(222, 224, 230);
pub const TEXT_DIM: Color = Color::Rgb(140, 146, 160);
pub const TEXT_MUTED: Color = Color::Rgb(88, 94, 110);

// Semantic
pub const GREEN: Color = Color::Rgb(74, 222, 128);
pub const RED: Color = Color::Rgb(248, 113, 113);
pub const CYAN: Color = Color::Rgb(103, 232, 249);
