//! Collects and validates what the user typed into the form.

use serde::{Deserialize, Serialize};

use crate::choices::{ArtStyle, Choice, ColorScheme, Complexity, SpecialElement, elements_text};
use crate::error::GenerationError;

/// Message when the theme is missing
pub const THEME_REQUIRED: &str = "Please enter a main theme or inspiration for your mandala.";
/// Message when the API key is missing
pub const CREDENTIAL_REQUIRED: &str = "Please enter your OpenAI API key.";
/// Message when "Custom color scheme" is picked without any colors
pub const CUSTOM_COLORS_REQUIRED: &str = "Please enter your custom color scheme.";

/// The provider API key, only ever held in memory for one submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a key, trimming surrounding whitespace.
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// The raw key, for the Authorization header and redaction only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when nothing was entered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A preset scheme, or the user's own words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorChoice {
    /// One of the fixed schemes
    Preset(ColorScheme),
    /// Free text entered after picking "Custom color scheme"
    Custom(String),
}

impl ColorChoice {
    /// Text that goes into the prompt and the details list.
    pub fn text(&self) -> &str {
        match self {
            Self::Preset(scheme) => scheme.label(),
            Self::Custom(text) => text.as_str(),
        }
    }
}

/// The form fields as submitted, minus the credential.
///
/// This is what the session keeps so the form comes back prefilled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    /// Main theme/inspiration
    pub theme: String,
    /// Selected color scheme label
    pub color_scheme: String,
    /// Free text used with the custom scheme
    pub custom_colors: String,
    /// Selected style label
    pub style: String,
    /// Selected element labels
    pub elements: Vec<String>,
    /// Selected complexity label
    pub complexity: String,
}

/// A full form submission.
#[derive(Clone, Debug, Default)]
pub struct Submission {
    /// Everything but the key
    pub values: FormValues,
    /// The key, as typed
    pub credential: String,
    /// CSRF token echoed by the form
    pub csrf_token: String,
}

impl Submission {
    /// Builds a submission from url-encoded pairs. Repeated `elements` keys
    /// collect into the multi-select, unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut submission = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "theme" => submission.values.theme = value,
                "color_scheme" => submission.values.color_scheme = value,
                "custom_colors" => submission.values.custom_colors = value,
                "style" => submission.values.style = value,
                "elements" => submission.values.elements.push(value),
                "complexity" => submission.values.complexity = value,
                "api_key" => submission.credential = value,
                "csrf_token" => submission.csrf_token = value,
                _ => {}
            }
        }
        submission
    }

    /// Turns the submission into a request, or says what's wrong with it.
    ///
    /// The outer error is for values the rendered form can't produce (a style
    /// that isn't in the catalog, say); the inner one is what the user sees.
    pub fn validate(
        &self,
    ) -> Result<Result<GenerationRequest, GenerationError>, UnknownChoice> {
        let values = &self.values;
        let scheme = parse_choice::<ColorScheme>("color_scheme", &values.color_scheme)?;
        let style = parse_choice::<ArtStyle>("style", &values.style)?;
        let complexity = parse_choice::<Complexity>("complexity", &values.complexity)?;
        let mut elements = Vec::with_capacity(values.elements.len());
        for label in values.elements.iter().filter(|label| !label.trim().is_empty()) {
            let element = SpecialElement::from_label(label).ok_or_else(|| UnknownChoice {
                field: "elements",
                value: label.clone(),
            })?;
            elements.push(element);
        }
        // keep catalog order and drop repeats
        let elements = SpecialElement::ALL
            .iter()
            .copied()
            .filter(|element| elements.contains(element))
            .collect();

        let theme = values.theme.trim();
        if theme.is_empty() {
            return Ok(Err(GenerationError::Validation {
                field: "theme",
                message: THEME_REQUIRED,
            }));
        }
        let credential = Credential::new(&self.credential);
        if credential.is_empty() {
            return Ok(Err(GenerationError::Validation {
                field: "credential",
                message: CREDENTIAL_REQUIRED,
            }));
        }
        let color_scheme = match scheme {
            ColorScheme::Custom => {
                let custom = values.custom_colors.trim();
                if custom.is_empty() {
                    return Ok(Err(GenerationError::Validation {
                        field: "custom_colors",
                        message: CUSTOM_COLORS_REQUIRED,
                    }));
                }
                ColorChoice::Custom(custom.to_string())
            }
            preset => ColorChoice::Preset(preset),
        };

        Ok(Ok(GenerationRequest {
            theme: theme.to_string(),
            color_scheme,
            style,
            elements,
            complexity,
            credential,
        }))
    }
}

/// A form value that isn't in its catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownChoice {
    /// Field name
    pub field: &'static str,
    /// What was sent
    pub value: String,
}

impl std::fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown value for {}: {:?}", self.field, self.value)
    }
}

impl std::error::Error for UnknownChoice {}

fn parse_choice<T: Choice + Default>(
    field: &'static str,
    value: &str,
) -> Result<T, UnknownChoice> {
    // an untouched select posts nothing, treat it as the first option
    if value.trim().is_empty() {
        return Ok(T::default());
    }
    T::from_label(value).ok_or_else(|| UnknownChoice {
        field,
        value: value.to_string(),
    })
}

/// A validated submission, ready for the pipeline.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    /// Main theme, never empty
    pub theme: String,
    /// Colors to ask for
    pub color_scheme: ColorChoice,
    /// Art style
    pub style: ArtStyle,
    /// Extra elements, in catalog order
    pub elements: Vec<SpecialElement>,
    /// Level of detail
    pub complexity: Complexity,
    /// Provider key, never empty
    pub credential: Credential,
}

impl GenerationRequest {
    /// Elements as shown to the user and the provider, `None` when empty.
    pub fn elements_text(&self) -> String {
        elements_text(&self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn valid() -> Vec<(String, String)> {
        pairs(&[
            ("theme", "lotus flower"),
            ("color_scheme", "Pastel colors"),
            ("style", "Floral and organic"),
            ("complexity", "Simple and elegant"),
            ("api_key", "sk-test"),
            ("csrf_token", "token"),
        ])
    }

    #[test]
    fn valid_submission_becomes_request() {
        let submission = Submission::from_pairs(valid());
        assert_eq!(submission.csrf_token, "token");
        let request = submission
            .validate()
            .expect("known choices")
            .expect("valid request");
        assert_eq!(request.theme, "lotus flower");
        assert_eq!(request.color_scheme, ColorChoice::Preset(ColorScheme::Pastel));
        assert_eq!(request.style, ArtStyle::FloralOrganic);
        assert_eq!(request.complexity, Complexity::Simple);
        assert_eq!(request.elements_text(), "None");
        assert_eq!(request.credential.expose(), "sk-test");
    }

    #[test]
    fn empty_theme_fails_first() {
        let mut items = valid();
        items[0].1 = "   ".to_string();
        items[4].1 = String::new();
        let err = Submission::from_pairs(items)
            .validate()
            .expect("known choices")
            .expect_err("theme missing");
        assert_eq!(
            err,
            GenerationError::Validation {
                field: "theme",
                message: THEME_REQUIRED
            }
        );
    }

    #[test]
    fn empty_credential_fails() {
        let mut items = valid();
        items[4].1 = " ".to_string();
        let err = Submission::from_pairs(items)
            .validate()
            .expect("known choices")
            .expect_err("key missing");
        assert_eq!(
            err,
            GenerationError::Validation {
                field: "credential",
                message: CREDENTIAL_REQUIRED
            }
        );
    }

    #[test]
    fn custom_scheme_uses_free_text() {
        let mut items = valid();
        items[1].1 = "Custom color scheme".to_string();
        items.push(("custom_colors".to_string(), " teal, gold, and purple ".to_string()));
        let request = Submission::from_pairs(items)
            .validate()
            .expect("known choices")
            .expect("valid request");
        assert_eq!(request.color_scheme.text(), "teal, gold, and purple");
    }

    #[test]
    fn custom_scheme_needs_text() {
        let mut items = valid();
        items[1].1 = "Custom color scheme".to_string();
        let err = Submission::from_pairs(items)
            .validate()
            .expect("known choices")
            .expect_err("no custom colors");
        assert_eq!(err.user_message(), CUSTOM_COLORS_REQUIRED);
    }

    #[test]
    fn elements_collect_in_catalog_order() {
        let mut items = valid();
        items.push(("elements".to_string(), "Fire elements".to_string()));
        items.push(("elements".to_string(), "Animals or creatures".to_string()));
        items.push(("elements".to_string(), "Fire elements".to_string()));
        let request = Submission::from_pairs(items)
            .validate()
            .expect("known choices")
            .expect("valid request");
        assert_eq!(
            request.elements,
            vec![SpecialElement::Animals, SpecialElement::Fire]
        );
        assert_eq!(request.elements_text(), "Animals or creatures, Fire elements");
    }

    #[test]
    fn unknown_style_is_rejected() {
        let mut items = valid();
        items[2].1 = "Baroque".to_string();
        let err = Submission::from_pairs(items)
            .validate()
            .expect_err("unknown style");
        assert_eq!(err.field, "style");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("sk-very-secret");
        assert_eq!(format!("{credential:?}"), "Credential(***)");
    }
}
