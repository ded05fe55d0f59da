//! Narrative templates per channel role.

use std::fmt;

use mixplan_core::constants::{LEAD_SHARE_THRESHOLD, SUPPORT_SHARE_THRESHOLD};

/// How prominent a channel is in the mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    Lead,
    Support,
    Test,
}

impl ChannelRole {
    /// Classify a channel by its share (0–1) of the budget.
    pub fn from_share(share: f64) -> Self {
        if share >= LEAD_SHARE_THRESHOLD {
            Self::Lead
        } else if share >= SUPPORT_SHARE_THRESHOLD {
            Self::Support
        } else {
            Self::Test
        }
    }
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(section_header(*self))
    }
}

/// Get the narrative template for a role.
/// Templates use `{channel}`, `{percent}` and `{amount}` as placeholders.
pub fn template_for(role: ChannelRole) -> &'static str {
    match role {
        ChannelRole::Lead => {
            "{channel} anchors the plan at {percent} ({amount}), carrying the bulk of delivery."
        }
        ChannelRole::Support => {
            "{channel} supports the lead channels with {percent} ({amount}) to extend frequency and coverage."
        }
        ChannelRole::Test => {
            "{channel} holds a test budget of {percent} ({amount}); scale it if early results hold."
        }
    }
}

/// Render a template with a channel's figures.
pub fn render(role: ChannelRole, channel: &str, share: f64, amount: f64) -> String {
    template_for(role)
        .replace("{channel}", channel)
        .replace("{percent}", &format_percent(share))
        .replace("{amount}", &format_currency(amount))
}

/// Section header for a role.
pub fn section_header(role: ChannelRole) -> &'static str {
    match role {
        ChannelRole::Lead => "Lead channels",
        ChannelRole::Support => "Support channels",
        ChannelRole::Test => "Test channels",
    }
}

/// `0.253` → `25.3%`.
pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// Whole-dollar amount with thousands separators: `12345.6` → `$12,346`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}
