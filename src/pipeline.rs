//! Prompt in, image out.

use chrono::{DateTime, Local};
use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::GenerationError;
use crate::form::GenerationRequest;
use crate::provider::ImageBackend;

/// A generated mandala and where it came from.
#[derive(Clone, Debug)]
pub struct GenerationResult {
    /// Decoded bitmap
    pub image: DynamicImage,
    /// Provider-hosted original, only valid for the provider's retention window
    pub source_reference: String,
    /// When the image arrived, drives the download filename
    pub generated_at: DateTime<Local>,
}

/// Runs one generation: render the prompt, ask the provider once, download
/// and decode what it points at. Nothing is retried.
pub async fn generate(
    backend: &dyn ImageBackend,
    request: &GenerationRequest,
) -> Result<GenerationResult, GenerationError> {
    let prompt = request.prompt();
    info!(theme = %request.theme, "Generating mandala");
    debug!("Prompt: {prompt}");

    let result = run(backend, request, &prompt).await;
    if let Err(err) = &result {
        warn!(kind = err.kind(), "Mandala generation failed: {err}");
    }
    result
}

async fn run(
    backend: &dyn ImageBackend,
    request: &GenerationRequest,
    prompt: &str,
) -> Result<GenerationResult, GenerationError> {
    let source_reference = backend.request_image(&request.credential, prompt).await?;
    let bytes = backend.download(&source_reference).await?;
    let image = decode_image(&bytes)?;
    Ok(GenerationResult {
        image,
        source_reference,
        generated_at: Local::now(),
    })
}

/// Decodes PNG or JPEG bytes, guessing the format from the content.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, GenerationError> {
    if bytes.is_empty() {
        return Err(GenerationError::Decode("Empty image body".to_string()));
    }
    Ok(image::load_from_memory(bytes)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::choices::{ArtStyle, ColorScheme, Complexity};
    use crate::download::encode_png;
    use crate::form::{ColorChoice, Credential};
    use crate::prompt::DESIGN_DIRECTIVES;
    use crate::provider::BackendFuture;

    pub(crate) const FAKE_URL: &str = "https://images.example.org/mandala.png";

    /// Backend that records calls and answers from canned values.
    pub(crate) struct FakeBackend {
        pub(crate) generation: Result<String, GenerationError>,
        pub(crate) bytes: Vec<u8>,
        pub(crate) requests: AtomicUsize,
        pub(crate) downloads: AtomicUsize,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        pub(crate) fn succeeding() -> Self {
            let image = DynamicImage::ImageRgba8(image::RgbaImage::from_fn(4, 4, |x, y| {
                image::Rgba([x as u8 * 40, y as u8 * 40, 200, 255])
            }));
            Self::with(
                Ok(FAKE_URL.to_string()),
                encode_png(&image).expect("encode test image"),
            )
        }

        pub(crate) fn failing(err: GenerationError) -> Self {
            Self::with(Err(err), Vec::new())
        }

        pub(crate) fn with(generation: Result<String, GenerationError>, bytes: Vec<u8>) -> Self {
            Self {
                generation,
                bytes,
                requests: AtomicUsize::new(0),
                downloads: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl ImageBackend for FakeBackend {
        fn request_image<'a>(
            &'a self,
            _credential: &'a Credential,
            prompt: &'a str,
        ) -> BackendFuture<'a, String> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            self.prompts
                .lock()
                .expect("prompts lock")
                .push(prompt.to_string());
            let generation = self.generation.clone();
            Box::pin(async move { generation })
        }

        fn download<'a>(&'a self, _source_reference: &'a str) -> BackendFuture<'a, Vec<u8>> {
            self.downloads.fetch_add(1, Ordering::SeqCst);
            let bytes = self.bytes.clone();
            Box::pin(async move { Ok(bytes) })
        }
    }

    fn lotus_request() -> GenerationRequest {
        GenerationRequest {
            theme: "lotus flower".to_string(),
            color_scheme: ColorChoice::Preset(ColorScheme::Pastel),
            style: ArtStyle::FloralOrganic,
            elements: vec![],
            complexity: Complexity::Simple,
            credential: Credential::new("sk-test"),
        }
    }

    #[tokio::test]
    async fn lotus_scenario_makes_one_request() {
        let backend = FakeBackend::succeeding();
        let result = generate(&backend, &lotus_request())
            .await
            .expect("generation succeeds");

        assert_eq!(backend.request_count(), 1);
        assert_eq!(backend.downloads.load(Ordering::SeqCst), 1);
        let prompts = backend.prompts.lock().expect("prompts lock");
        let prompt = &prompts[0];
        for needle in [
            "lotus flower",
            "Pastel colors",
            "Floral and organic",
            "None",
            "Simple and elegant",
        ] {
            assert!(prompt.contains(needle), "{needle} missing");
        }
        for directive in DESIGN_DIRECTIVES {
            assert!(prompt.contains(directive));
        }
        assert_eq!(result.source_reference, FAKE_URL);
        assert_eq!(result.image.width(), 4);
    }

    #[tokio::test]
    async fn auth_failure_produces_no_image() {
        let backend = FakeBackend::failing(GenerationError::Authentication(
            "Incorrect API key provided".to_string(),
        ));
        let err = generate(&backend, &lotus_request())
            .await
            .expect_err("auth fails");
        assert_eq!(err.kind(), "authentication");
        assert_eq!(backend.request_count(), 1);
        assert_eq!(backend.downloads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn garbage_bytes_are_a_decode_error() {
        let backend = FakeBackend::with(Ok(FAKE_URL.to_string()), b"<html>nope</html>".to_vec());
        let err = generate(&backend, &lotus_request())
            .await
            .expect_err("decode fails");
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn empty_body_is_a_decode_error() {
        assert!(matches!(decode_image(&[]), Err(GenerationError::Decode(_))));
    }
}
