//! Turns the form fields into the text prompt.

use crate::choices::Choice;
use crate::form::GenerationRequest;

/// The fixed design directives every prompt ends with.
pub const DESIGN_DIRECTIVES: [&str; 4] = [
    "Perfect radial symmetry from the center",
    "Highly detailed patterns and ornate designs",
    "Sacred geometry elements incorporated into the design",
    "The entire image should be the mandala with no text or border",
];

/// The text fields substituted into the template.
#[derive(Clone, Copy, Debug)]
pub struct PromptFields<'a> {
    /// Central theme
    pub theme: &'a str,
    /// Color scheme text
    pub colors: &'a str,
    /// Style label
    pub style: &'a str,
    /// Elements text, `None` when empty
    pub elements: &'a str,
    /// Complexity label
    pub complexity: &'a str,
}

/// Renders the prompt. The wording and order are fixed.
pub fn build_prompt(fields: &PromptFields<'_>) -> String {
    let mut prompt = String::from(
        "Create a beautiful and intricate mandala art design with the following characteristics:",
    );
    for (label, value) in [
        ("Central theme", fields.theme),
        ("Color scheme", fields.colors),
        ("Art style", fields.style),
        ("Special elements to incorporate", fields.elements),
        ("Complexity level", fields.complexity),
    ] {
        prompt.push_str(&format!("\n- {label}: {value}"));
    }
    for directive in DESIGN_DIRECTIVES {
        prompt.push_str("\n- ");
        prompt.push_str(directive);
    }
    prompt
}

impl GenerationRequest {
    /// Renders this request's prompt.
    pub fn prompt(&self) -> String {
        let elements = self.elements_text();
        build_prompt(&PromptFields {
            theme: &self.theme,
            colors: self.color_scheme.text(),
            style: self.style.label(),
            elements: &elements,
            complexity: self.complexity.label(),
        })
    }
}
