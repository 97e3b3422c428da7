//! Per-visitor state.
//!
//! A [`MandalaSession`] only remembers what was typed and the last error
//! banner. Generated images go out in the POST response and are never kept
//! here. It never holds the API key.

use super::prelude::*;
use crate::form::FormValues;

const SESSION_KEY: &str = "mandala";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MandalaSession {
    pub(crate) values: FormValues,
    pub(crate) error: Option<String>,
}

pub(crate) async fn load(session: &Session) -> Result<MandalaSession, MandalaError> {
    Ok(session
        .get::<MandalaSession>(SESSION_KEY)
        .await?
        .unwrap_or_default())
}

/// Drops whatever the previous submission left behind and remembers the new
/// form values.
pub(crate) async fn begin_submission(
    session: &Session,
    values: FormValues,
) -> Result<MandalaSession, MandalaError> {
    let state = MandalaSession {
        values,
        error: None,
    };
    session.insert(SESSION_KEY, state.clone()).await?;
    Ok(state)
}

pub(crate) async fn record_failure(
    session: &Session,
    mut state: MandalaSession,
    message: String,
) -> Result<MandalaSession, MandalaError> {
    state.error = Some(message);
    session.insert(SESSION_KEY, state.clone()).await?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn fresh_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn first_load_is_empty() {
        let session = fresh_session();
        assert_eq!(load(&session).await.expect("load"), MandalaSession::default());
    }

    #[tokio::test]
    async fn submission_clears_old_error() {
        let session = fresh_session();
        let values = FormValues {
            theme: "cosmos".to_string(),
            ..FormValues::default()
        };
        let state = begin_submission(&session, values.clone())
            .await
            .expect("begin");
        record_failure(&session, state, "boom".to_string())
            .await
            .expect("record");
        assert_eq!(
            load(&session).await.expect("load").error.as_deref(),
            Some("boom")
        );

        begin_submission(&session, values).await.expect("begin again");
        let state = load(&session).await.expect("load");
        assert_eq!(state.values.theme, "cosmos");
        assert_eq!(state.error, None);
    }
}
