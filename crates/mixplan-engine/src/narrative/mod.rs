//! Narrative generation: template-based rationale for a channel mix.

pub mod templates;

use mixplan_core::traits::NarrativeGenerator;
use mixplan_core::types::Allocation;

pub use templates::ChannelRole;

/// A complete narrative for an allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MixNarrative {
    pub summary: String,
    /// Non-empty sections only, in Lead, Support, Test order.
    pub sections: Vec<NarrativeSection>,
}

/// A section of the narrative (Lead, Support or Test channels).
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeSection {
    pub role: ChannelRole,
    pub entries: Vec<String>,
}

impl MixNarrative {
    /// Markdown rendering: summary paragraph, then a bulleted list per section.
    pub fn to_markdown(&self) -> String {
        let mut out = self.summary.clone();
        for section in &self.sections {
            out.push_str("\n\n**");
            out.push_str(templates::section_header(section.role));
            out.push_str("**\n");
            for entry in &section.entries {
                out.push_str("\n- ");
                out.push_str(entry);
            }
        }
        out
    }
}

/// Build a narrative for an allocation. Channels are ranked by amount;
/// ties keep allocation order.
pub fn build_narrative(allocation: &Allocation) -> MixNarrative {
    let total = allocation.total();
    if allocation.is_empty() || total <= 0.0 {
        return MixNarrative {
            summary: "No spend was allocated, so there is no channel mix to describe.".to_string(),
            sections: Vec::new(),
        };
    }

    let mut ranked: Vec<_> = allocation.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut lead = Vec::new();
    let mut support = Vec::new();
    let mut test = Vec::new();
    for (channel, amount) in &ranked {
        let share = amount / total;
        let role = ChannelRole::from_share(share);
        let text = templates::render(role, channel.as_str(), share, *amount);
        match role {
            ChannelRole::Lead => lead.push(text),
            ChannelRole::Support => support.push(text),
            ChannelRole::Test => test.push(text),
        }
    }

    let (top_channel, top_amount) = ranked[0];
    let summary = format!(
        "The recommended mix spreads {} across {} channel{}. {} leads with {} of spend.",
        templates::format_currency(total),
        ranked.len(),
        if ranked.len() == 1 { "" } else { "s" },
        top_channel,
        templates::format_percent(top_amount / total),
    );

    let sections = [
        (ChannelRole::Lead, lead),
        (ChannelRole::Support, support),
        (ChannelRole::Test, test),
    ]
    .into_iter()
    .filter(|(_, entries)| !entries.is_empty())
    .map(|(role, entries)| NarrativeSection { role, entries })
    .collect();

    MixNarrative { summary, sections }
}

/// Default narrative generator backed by the role templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrativeGenerator;

impl NarrativeGenerator for TemplateNarrativeGenerator {
    fn generate(&self, allocation: &Allocation) -> String {
        build_narrative(allocation).to_markdown()
    }
}
