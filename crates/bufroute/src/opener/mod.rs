//! Window attachment policy.
//!
//! The opener turns a requested attachment style into the ordered host
//! operations that present a resource: either focus a view that already shows
//! the resource, or open a split (or tab) and attach the resource to it. The
//! policy itself is pure; the [`Router`](crate::router::Router) executes the
//! resulting plan against a [`Host`](crate::host::Host).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;
use crate::host::ViewId;

/// Placement of the view that presents a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStyle {
    /// Reuse the current window.
    #[default]
    None,
    /// Full-width split at the top of the screen.
    Top,
    /// Split above the current window.
    Above,
    /// Split below the current window.
    Below,
    /// Full-width split at the bottom of the screen.
    Bottom,
    /// Full-height split at the far left.
    Leftmost,
    /// Split left of the current window.
    Left,
    /// Split right of the current window.
    Right,
    /// Full-height split at the far right.
    Rightmost,
    /// A new tab page.
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    TopLeft,
    AboveLeft,
    BelowRight,
    BotRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

impl SplitStyle {
    /// Every style, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::None,
        Self::Top,
        Self::Above,
        Self::Below,
        Self::Bottom,
        Self::Leftmost,
        Self::Left,
        Self::Right,
        Self::Rightmost,
        Self::Tab,
    ];

    /// Returns the lowercase name of the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Top => "top",
            Self::Above => "above",
            Self::Below => "below",
            Self::Bottom => "bottom",
            Self::Leftmost => "leftmost",
            Self::Left => "left",
            Self::Right => "right",
            Self::Rightmost => "rightmost",
            Self::Tab => "tab",
        }
    }

    /// Returns the host's native command that opens this placement.
    ///
    /// `None` opens nothing and yields `None`.
    #[must_use]
    pub const fn host_command(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Top => Some("topleft split"),
            Self::Above => Some("aboveleft split"),
            Self::Below => Some("belowright split"),
            Self::Bottom => Some("botright split"),
            Self::Leftmost => Some("topleft vsplit"),
            Self::Left => Some("aboveleft vsplit"),
            Self::Right => Some("belowright vsplit"),
            Self::Rightmost => Some("botright vsplit"),
            Self::Tab => Some("tabnew"),
        }
    }

    /// Classifies the host's modifier keywords into a split style.
    ///
    /// Keywords are whitespace separated and may be abbreviated the way the
    /// host accepts them (`vert`, `bo`, `abo`, ...). `tab` wins over every
    /// direction and orientation. A direction combined with `vertical` selects
    /// the left/right family; otherwise the above/below family. An
    /// orientation without a direction uses the host's default placement.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidModifier`] for unknown keywords, two
    /// different directions, or conflicting orientations.
    ///
    /// # Example
    ///
    /// ```
    /// use bufroute::opener::SplitStyle;
    ///
    /// assert_eq!(SplitStyle::classify("vertical botright").unwrap(), SplitStyle::Rightmost);
    /// assert_eq!(SplitStyle::classify("aboveleft").unwrap(), SplitStyle::Above);
    /// assert_eq!(SplitStyle::classify("tab topleft").unwrap(), SplitStyle::Tab);
    /// assert_eq!(SplitStyle::classify("").unwrap(), SplitStyle::None);
    /// ```
    pub fn classify(modifiers: &str) -> Result<Self, RouterError> {
        let mut tab = false;
        let mut direction: Option<Direction> = None;
        let mut orientation: Option<Orientation> = None;

        for keyword in modifiers.split_whitespace() {
            match parse_keyword(keyword) {
                Some(Keyword::Tab) => tab = true,
                Some(Keyword::Direction(next)) => match direction {
                    Some(current) if current != next => {
                        return Err(RouterError::invalid_modifier(
                            modifiers,
                            "conflicting split directions",
                        ));
                    }
                    _ => direction = Some(next),
                },
                Some(Keyword::Orientation(next)) => match orientation {
                    Some(current) if current != next => {
                        return Err(RouterError::invalid_modifier(
                            modifiers,
                            "cannot split both vertically and horizontally",
                        ));
                    }
                    _ => orientation = Some(next),
                },
                None => {
                    return Err(RouterError::invalid_modifier(
                        modifiers,
                        format!("unrecognised keyword '{keyword}'"),
                    ));
                }
            }
        }

        if tab {
            return Ok(Self::Tab);
        }
        let vertical = orientation == Some(Orientation::Vertical);
        let style = match (direction, vertical) {
            (None, _) if orientation.is_none() => Self::None,
            (None, true) => Self::Left,
            (None, false) => Self::Above,
            (Some(Direction::TopLeft), false) => Self::Top,
            (Some(Direction::AboveLeft), false) => Self::Above,
            (Some(Direction::BelowRight), false) => Self::Below,
            (Some(Direction::BotRight), false) => Self::Bottom,
            (Some(Direction::TopLeft), true) => Self::Leftmost,
            (Some(Direction::AboveLeft), true) => Self::Left,
            (Some(Direction::BelowRight), true) => Self::Right,
            (Some(Direction::BotRight), true) => Self::Rightmost,
        };
        Ok(style)
    }
}

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Tab,
    Direction(Direction),
    Orientation(Orientation),
}

/// Matches a keyword against the host's abbreviation rules: every prefix of
/// the full keyword at least as long as the minimal abbreviation.
fn parse_keyword(keyword: &str) -> Option<Keyword> {
    const KEYWORDS: &[(&str, usize, Keyword)] = &[
        ("tab", 3, Keyword::Tab),
        ("vertical", 4, Keyword::Orientation(Orientation::Vertical)),
        ("horizontal", 3, Keyword::Orientation(Orientation::Horizontal)),
        ("topleft", 2, Keyword::Direction(Direction::TopLeft)),
        ("botright", 2, Keyword::Direction(Direction::BotRight)),
        ("aboveleft", 3, Keyword::Direction(Direction::AboveLeft)),
        ("leftabove", 5, Keyword::Direction(Direction::AboveLeft)),
        ("belowright", 3, Keyword::Direction(Direction::BelowRight)),
        ("rightbelow", 6, Keyword::Direction(Direction::BelowRight)),
    ];

    let lower = keyword.to_ascii_lowercase();
    KEYWORDS
        .iter()
        .find(|(full, min, _)| lower.len() >= *min && full.starts_with(lower.as_str()))
        .map(|(_, _, keyword)| *keyword)
}

impl fmt::Display for SplitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SplitStyle {
    type Err = RouterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| RouterError::invalid_modifier(value, "unknown split style"))
    }
}

/// Options controlling how a resource is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenerOptions {
    /// Focus an existing view of the resource instead of opening a new one.
    pub reuse: bool,
    /// Placement of a newly opened view.
    pub split: SplitStyle,
}

impl OpenerOptions {
    /// Options that reuse an existing view when one exists.
    #[must_use]
    pub fn reusing() -> Self {
        Self {
            reuse: true,
            split: SplitStyle::None,
        }
    }

    /// Options that open a fresh view with the given placement.
    #[must_use]
    pub fn split(split: SplitStyle) -> Self {
        Self {
            reuse: false,
            split,
        }
    }
}

/// A single host view-management step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    /// Focus an existing view.
    FocusView(ViewId),
    /// Open a split window with the given placement.
    OpenSplit(SplitStyle),
    /// Open a new tab page.
    OpenTab,
    /// Attach the named resource to the current window.
    Attach(String),
}

/// Plans the host operations that present `name`.
///
/// `existing` is the view currently displaying `name`, if any; it is only
/// honoured when `options.reuse` is set.
#[must_use]
pub fn plan(name: &str, options: OpenerOptions, existing: Option<ViewId>) -> Vec<HostOp> {
    if options.reuse {
        if let Some(view) = existing {
            return vec![HostOp::FocusView(view)];
        }
    }

    let mut ops = Vec::with_capacity(2);
    match options.split {
        SplitStyle::None => {}
        SplitStyle::Tab => ops.push(HostOp::OpenTab),
        split => ops.push(HostOp::OpenSplit(split)),
    }
    ops.push(HostOp::Attach(name.to_owned()));
    ops
}
