//! The static hook library: shown to the model as candidates for the hooks
//! task and returned as-is when the model's answer cannot be parsed.

use crate::generation::models::Hook;

/// A library entry. `description` explains why the hook works.
#[derive(Debug, Clone, Copy)]
pub struct LibraryHook {
    pub id: &'static str,
    pub text: &'static str,
    pub description: &'static str,
}

pub const HOOK_LIBRARY: [LibraryHook; 5] = [
    LibraryHook {
        id: "1",
        text: "POV: You're about to see the jewelry piece that changes everything",
        description: "Creates anticipation and positions the product as transformative",
    },
    LibraryHook {
        id: "2",
        text: "This is why everyone's obsessed with [product type]",
        description: "Leverages social proof and trending appeal",
    },
    LibraryHook {
        id: "3",
        text: "I wasn't going to buy it, but then I saw this detail...",
        description: "Creates curiosity and highlights unique features",
    },
    LibraryHook {
        id: "4",
        text: "The jewelry piece that made me feel like main character",
        description: "Appeals to self-empowerment and confidence",
    },
    LibraryHook {
        id: "5",
        text: "When you find jewelry that matches your energy",
        description: "Focuses on personal connection and vibe matching",
    },
];

impl LibraryHook {
    pub fn to_hook(self) -> Hook {
        Hook {
            id: self.id.to_string(),
            text: self.text.to_string(),
            description: self.description.to_string(),
        }
    }
}

/// Renders the library as a bullet list for prompt context.
pub fn render_for_prompt() -> String {
    HOOK_LIBRARY
        .iter()
        .map(|hook| format!("- \"{}\" ({})", hook.text, hook.description))
        .collect::<Vec<_>>()
        .join("\n")
}
