pub(crate) use crate::error::{GenerationError, MandalaError};
pub(crate) use crate::web::AppState;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::{Form, State};
pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use tower_sessions::Session;
pub(crate) use tracing::{debug, info};
