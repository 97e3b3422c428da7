use super::csrf::{csrf_token, validate_csrf};
use super::prelude::*;
use super::session::{self, MandalaSession};
use crate::choices::{ArtStyle, Choice, ColorScheme, Complexity, SpecialElement};
use crate::download::{build_download_link, download_filename};
use crate::form::{GenerationRequest, Submission};
use crate::pipeline::{self, GenerationResult};

#[derive(Clone, Debug)]
pub(crate) struct ChoiceOption {
    pub(crate) label: &'static str,
    pub(crate) selected: bool,
}

/// A finished mandala. Only ever rendered into the response of the POST that
/// produced it.
#[derive(Clone, Debug)]
pub(crate) struct ResultPanel {
    pub(crate) theme: String,
    pub(crate) color_scheme: String,
    pub(crate) style: String,
    pub(crate) elements: String,
    pub(crate) complexity: String,
    pub(crate) source_reference: String,
    pub(crate) image_uri: String,
    pub(crate) download_markup: String,
}

impl ResultPanel {
    fn build(
        request: &GenerationRequest,
        result: &GenerationResult,
    ) -> Result<Self, GenerationError> {
        let filename = download_filename(&result.generated_at);
        let link = build_download_link(&result.image, &filename)?;
        Ok(Self {
            download_markup: link.markup(),
            image_uri: link.data_uri,
            theme: request.theme.clone(),
            color_scheme: request.color_scheme.text().to_string(),
            style: request.style.label().to_string(),
            elements: request.elements_text(),
            complexity: request.complexity.label().to_string(),
            source_reference: result.source_reference.clone(),
        })
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    csrf_token: String,
    theme: String,
    custom_colors: String,
    custom_selected: bool,
    color_options: Vec<ChoiceOption>,
    style_options: Vec<ChoiceOption>,
    element_options: Vec<ChoiceOption>,
    complexity_options: Vec<ChoiceOption>,
    has_error: bool,
    error_message: String,
    result: Option<ResultPanel>,
}

impl IndexTemplate {
    fn new(csrf_token: String, state: MandalaSession, result: Option<ResultPanel>) -> Self {
        let values = state.values;
        let (has_error, error_message) = match state.error {
            Some(message) => (true, message),
            None => (false, String::new()),
        };
        let custom_selected = values.color_scheme == ColorScheme::Custom.label();
        Self {
            csrf_token,
            color_options: single_options::<ColorScheme>(&values.color_scheme),
            style_options: single_options::<ArtStyle>(&values.style),
            element_options: SpecialElement::ALL
                .iter()
                .map(|element| ChoiceOption {
                    label: element.label(),
                    selected: values.elements.iter().any(|picked| picked == element.label()),
                })
                .collect(),
            complexity_options: single_options::<Complexity>(&values.complexity),
            theme: values.theme,
            custom_colors: values.custom_colors,
            custom_selected,
            has_error,
            error_message,
            result,
        }
    }
}

/// Options for a single-choice control, first one selected when nothing matches.
fn single_options<T: Choice>(selected: &str) -> Vec<ChoiceOption> {
    let matched = T::from_label(selected);
    T::ALL
        .iter()
        .enumerate()
        .map(|(idx, choice)| ChoiceOption {
            label: choice.label(),
            selected: match matched {
                Some(picked) => picked == *choice,
                None => idx == 0,
            },
        })
        .collect()
}

/// handles the / GET
pub(crate) async fn index_handler(session: Session) -> Result<IndexTemplate, MandalaError> {
    let token = csrf_token(&session).await?;
    let state = session::load(&session).await?;
    Ok(IndexTemplate::new(token, state, None))
}

/// handles the form POST, one generation per call
pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<IndexTemplate, MandalaError> {
    let submission = Submission::from_pairs(pairs);
    validate_csrf(&session, &submission.csrf_token).await?;
    let checked = submission.validate().map_err(|err| {
        debug!("Rejecting submission: {}", err);
        MandalaError::BadRequest
    })?;

    let current = session::begin_submission(&session, submission.values).await?;
    let outcome = match checked {
        Err(err) => {
            info!(field = ?validation_field(&err), "Submission failed validation");
            Err(err)
        }
        Ok(request) => pipeline::generate(state.backend.as_ref(), &request)
            .await
            .and_then(|result| ResultPanel::build(&request, &result)),
    };
    let (current, result) = match outcome {
        Ok(panel) => (current, Some(panel)),
        Err(err) => (
            session::record_failure(&session, current, err.user_message()).await?,
            None,
        ),
    };

    let token = csrf_token(&session).await?;
    Ok(IndexTemplate::new(token, current, result))
}

fn validation_field(err: &GenerationError) -> Option<&'static str> {
    match err {
        GenerationError::Validation { field, .. } => Some(*field),
        _ => None,
    }
}
