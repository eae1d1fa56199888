//! Renderable output of special modes (animations and games).

use std::fmt;

/// The eight special modes that can take over the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Burger,
    Matrix,
    Glitch,
    Credits,
    Hack,
    Snake,
    Tetris,
    Timer,
}

impl ModeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Burger => "burger",
            Self::Matrix => "matrix",
            Self::Glitch => "glitch",
            Self::Credits => "credits",
            Self::Hack => "hack",
            Self::Snake => "snake",
            Self::Tetris => "tetris",
            Self::Timer => "timer",
        }
    }

    /// Games start paused and take arrow keys; animations only listen for Ctrl+C.
    pub fn is_game(self) -> bool {
        matches!(self, Self::Snake | Self::Tetris)
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one activation of a special mode.
///
/// The component history entry created when a mode starts carries this id, so
/// the view can tell the live run apart from frozen earlier runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

// =============================================================================
// Frames
// =============================================================================

/// Color role of a frame line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Normal,
    /// Highlighted text (headings, snake head, rain heads).
    Bright,
    /// Secondary text (footers, hints).
    Dim,
    /// Pink accent used by the burger animation.
    Accent,
    /// Warnings and in-progress banners.
    Alert,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLine {
    pub text: String,
    pub tone: Tone,
}

impl FrameLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One rendered screen of a special mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<FrameLine>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single line.
    pub fn line(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.lines.push(FrameLine::new(text, tone));
        self
    }

    /// Append every line of a multi-line block with the same tone.
    pub fn block(mut self, text: &str, tone: Tone) -> Self {
        self.lines
            .extend(text.lines().map(|line| FrameLine::new(line, tone)));
        self
    }

    pub fn blank(self) -> Self {
        self.line("", Tone::Normal)
    }

    /// Plain text of the frame, one line per row.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Visual Effects
// =============================================================================

/// A translucent block drawn over the terminal while glitching.
#[derive(Clone, Debug, PartialEq)]
pub struct CorruptionBlock {
    pub left_pct: f32,
    pub top_pct: f32,
    pub size_px: f32,
    pub rotate_deg: f32,
    pub opacity: f32,
    /// Red when true, cyan otherwise.
    pub red: bool,
}

/// Distortion applied to the terminal container by the glitch mode.
///
/// Rendered as inline styles on the terminal element owned by the view,
/// never on the document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualEffect {
    pub hue_rotate_deg: Option<f32>,
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
    /// Horizontal offsets of the red and cyan text-shadow copies.
    pub shadow_offsets_px: Option<(f32, f32)>,
    pub scanlines: bool,
    pub corruption: Vec<CorruptionBlock>,
}

impl VisualEffect {
    pub fn is_none(&self) -> bool {
        *self == Self::default()
    }

    /// Value for the CSS `filter` property.
    pub fn filter_css(&self) -> String {
        let mut parts = Vec::new();
        if let Some(deg) = self.hue_rotate_deg {
            parts.push(format!("hue-rotate({:.0}deg)", deg));
        }
        if let Some(b) = self.brightness {
            parts.push(format!("brightness({:.2})", b));
        }
        if let Some(c) = self.contrast {
            parts.push(format!("contrast({:.2})", c));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Value for the CSS `text-shadow` property.
    pub fn text_shadow_css(&self) -> String {
        match self.shadow_offsets_px {
            Some((red, cyan)) => format!(
                "{:.1}px 0 rgba(255,0,0,0.5), {:.1}px 0 rgba(0,255,255,0.5)",
                red, cyan
            ),
            None => "none".to_string(),
        }
    }
}
