//! Export orchestration.
//!
//! Runs the pipeline for one request: resolve the subject, aggregate,
//! filter, then render. The PDF serializer runs on a blocking thread
//! and writes through a bounded channel; the response body streams the
//! chunks as they arrive, so a slow consumer suspends rendering instead
//! of growing a buffer, and a disconnect aborts it.

use crate::resolver::{ResolveError, SubjectResolver};
use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use eval_model::Visibility;
use export_engine::{aggregate, filter_tree};
use pdf_export::{write_profile, ExportOptions};
use serde::Serialize;
use std::io;
use std::sync::Arc;
use store::{EvalStore, StoreError};
use tokio::sync::mpsc;

/// Filename advertised in the Content-Disposition header
const EXPORT_FILENAME: &str = "profile_export.pdf";

/// Chunks buffered between the serializer and the response body
const STREAM_BUFFER_CHUNKS: usize = 8;

/// Generic user-facing message for any pre-render fault
const EXPORT_FAILED_MESSAGE: &str =
    "An error occurred, the profile export could not be generated";

/// A failure before any response byte is produced.
///
/// Resolution and persistence faults are treated identically at this
/// boundary: one generic envelope, no technical detail leaked.
#[derive(Debug, thiserror::Error)]
pub enum ExportFault {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// JSON error envelope returned for pre-render faults
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    message: String,
}

impl IntoResponse for ExportFault {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Export failed");
        let envelope = axum::Json(ErrorEnvelope {
            message: EXPORT_FAILED_MESSAGE.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, envelope).into_response()
    }
}

/// Run one export request end to end.
pub async fn run_export(
    store: Arc<dyn EvalStore>,
    resolver: Arc<dyn SubjectResolver>,
    visibility: Visibility,
    subject: Option<String>,
    token: Option<String>,
) -> Result<Response, ExportFault> {
    let user = resolver
        .resolve(subject.as_deref(), token.as_deref())
        .await?;
    tracing::debug!(subject = %user.id, mode = %visibility, "Export subject resolved");

    let tree = aggregate(store.as_ref(), user.id, visibility).await?;
    let tree = filter_tree(tree, visibility);
    tracing::debug!(
        phases = tree.phases.len(),
        categories = tree.category_count(),
        "Export tree ready"
    );

    Ok(stream_pdf(user.display_name(), tree))
}

/// Serialize the document on a blocking thread and stream it out.
fn stream_pdf(display_name: String, tree: eval_model::ExportTree) -> Response {
    let (tx, rx) = mpsc::channel::<Bytes>(STREAM_BUFFER_CHUNKS);

    tokio::task::spawn_blocking(move || {
        let options = ExportOptions::new()
            .with_title("Skills Profile")
            .with_author(&display_name);
        let sink = ChannelWriter { tx };
        // A failed write means the consumer went away; there is nothing
        // to recover, headers are already on the wire
        if let Err(err) = write_profile(&display_name, &tree, &options, sink) {
            tracing::warn!(error = %err, "PDF rendering aborted");
        }
    });

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (Ok::<_, io::Error>(chunk), rx))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", EXPORT_FILENAME),
        )
        .body(Body::from_stream(stream))
        .expect("static response headers are valid")
}

/// `io::Write` adapter over the chunk channel.
///
/// `blocking_send` provides the backpressure: when the consumer stalls,
/// the serializer thread parks here. A closed channel (consumer
/// disconnected) surfaces as `BrokenPipe`, which aborts serialization.
struct ChannelWriter {
    tx: mpsc::Sender<Bytes>,
}

impl io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx
            .blocking_send(Bytes::copy_from_slice(buf))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response consumer closed"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
