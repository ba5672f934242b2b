use crate::domain::document::DocumentEngine;
use crate::domain::models::Format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Format(Format),
    /// Needs a path from the user before anything is inserted.
    PickImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    Applied,
    NeedsImage,
}

impl Effect {
    pub fn apply(self, doc: &mut dyn DocumentEngine) -> EffectOutcome {
        match self {
            Effect::Format(format) => {
                doc.apply_format(format);
                EffectOutcome::Applied
            }
            Effect::PickImage => EffectOutcome::NeedsImage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashCommand {
    pub trigger: &'static str,
    pub description: &'static str,
    pub effect: Effect,
}

static CATALOG: [SlashCommand; 8] = [
    SlashCommand {
        trigger: "/h1",
        description: "Large heading",
        effect: Effect::Format(Format::Heading(1)),
    },
    SlashCommand {
        trigger: "/h2",
        description: "Medium heading",
        effect: Effect::Format(Format::Heading(2)),
    },
    SlashCommand {
        trigger: "/h3",
        description: "Small heading",
        effect: Effect::Format(Format::Heading(3)),
    },
    SlashCommand {
        trigger: "/img",
        description: "Insert image",
        effect: Effect::PickImage,
    },
    SlashCommand {
        trigger: "/bold",
        description: "Bold text",
        effect: Effect::Format(Format::Bold),
    },
    SlashCommand {
        trigger: "/italic",
        description: "Italic text",
        effect: Effect::Format(Format::Italic),
    },
    SlashCommand {
        trigger: "/code",
        description: "Code block",
        effect: Effect::Format(Format::CodeBlock),
    },
    SlashCommand {
        trigger: "/quote",
        description: "Block quote",
        effect: Effect::Format(Format::Blockquote),
    },
];

#[must_use]
pub fn catalog() -> &'static [SlashCommand] {
    &CATALOG
}

/// Indices into `catalog` whose trigger contains `/query`, case-insensitively,
/// in catalog order.
#[must_use]
pub fn filter_commands(query: &str, catalog: &[SlashCommand]) -> Vec<usize> {
    let needle = format!("/{}", query.to_lowercase());
    catalog
        .iter()
        .enumerate()
        .filter(|(_, cmd)| cmd.trigger.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
