//! Visual token tables for the presentation layer.
//!
//! The original UI carried one near-duplicate icon branch per theme and
//! status; here the whole mapping lives in a single table keyed by
//! (lead status, theme). Rendering itself is out of scope.

use crate::models::LeadStatus;

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Marker color tokens: one row per (status, theme) pair. `unqualified`
/// shares the cold token, matching the original fallback branch.
const MARKER_TOKENS: [(LeadStatus, Theme, &str); 8] = [
    (LeadStatus::Hot, Theme::Light, "#ef4444"),
    (LeadStatus::Warm, Theme::Light, "#f59e0b"),
    (LeadStatus::Cold, Theme::Light, "#6b7280"),
    (LeadStatus::Unqualified, Theme::Light, "#6b7280"),
    (LeadStatus::Hot, Theme::Dark, "#f87171"),
    (LeadStatus::Warm, Theme::Dark, "#fbbf24"),
    (LeadStatus::Cold, Theme::Dark, "#d1d5db"),
    (LeadStatus::Unqualified, Theme::Dark, "#d1d5db"),
];

/// Marker color token for a lead status under a theme.
pub fn marker_color(status: LeadStatus, theme: Theme) -> &'static str {
    MARKER_TOKENS
        .iter()
        .find(|(s, t, _)| *s == status && *t == theme)
        .map(|(_, _, color)| *color)
        // The table covers every (status, theme) pair; this arm is for the
        // type system only.
        .unwrap_or("#6b7280")
}

/// Score band token for displaying a quality score.
pub fn quality_color(score: u8) -> &'static str {
    if score >= 80 {
        "text-red-500"
    } else if score >= 60 {
        "text-amber-500"
    } else if score >= 40 {
        "text-gray-500"
    } else {
        "text-gray-400"
    }
}
