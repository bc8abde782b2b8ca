use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use chrono::Utc;
use serde_json::Value;
use tokio::net::TcpListener;

use vidscribe::application::ports::{CallbackNotifier, NotificationError};
use vidscribe::domain::{Job, JobUpdate};
use vidscribe::infrastructure::notification::WebhookNotifier;

type Received = Arc<Mutex<Vec<Value>>>;

async fn start_capture_server(status: StatusCode) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/hook",
            post(
                move |State(received): State<Received>, Json(body): Json<Value>| async move {
                    received.lock().unwrap().push(body);
                    (status, "ack")
                },
            ),
        )
        .with_state(Arc::clone(&received));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/hook", addr), received)
}

fn finished_job(update: JobUpdate) -> Job {
    let mut job = Job::new(
        "https://example.com/v".to_string(),
        Some("http://unused".to_string()),
    );
    job.apply(JobUpdate::Processing, Utc::now()).unwrap();
    job.apply(update, Utc::now()).unwrap();
    job
}

fn notifier() -> WebhookNotifier {
    WebhookNotifier::new(Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn given_completed_job_when_notifying_then_posts_transcript_payload() {
    let (url, received) = start_capture_server(StatusCode::OK).await;
    let job = finished_job(JobUpdate::Completed {
        transcript: "the words".to_string(),
    });

    notifier().notify(&url, &job).await.unwrap();

    let bodies = received.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["jobId"], job.id.to_string());
    assert_eq!(bodies[0]["url"], "https://example.com/v");
    assert_eq!(bodies[0]["transcript"], "the words");
    assert_eq!(bodies[0]["status"], "completed");
    assert!(bodies[0]["completedAt"].is_string());
}

#[tokio::test]
async fn given_failed_job_when_notifying_then_posts_error_payload() {
    let (url, received) = start_capture_server(StatusCode::NO_CONTENT).await;
    let job = finished_job(JobUpdate::Failed {
        error: "transcription failed: boom".to_string(),
    });

    notifier().notify(&url, &job).await.unwrap();

    let bodies = received.lock().unwrap().clone();
    assert_eq!(bodies[0]["status"], "failed");
    assert_eq!(bodies[0]["error"], "transcription failed: boom");
    assert!(bodies[0]["failedAt"].is_string());
}

#[tokio::test]
async fn given_server_error_when_notifying_then_returns_rejected_without_retry() {
    let (url, received) = start_capture_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let job = finished_job(JobUpdate::Completed {
        transcript: "t".to_string(),
    });

    let err = notifier().notify(&url, &job).await.unwrap_err();

    match err {
        NotificationError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "ack");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn given_unreachable_endpoint_when_notifying_then_returns_request_failed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let job = finished_job(JobUpdate::Completed {
        transcript: "t".to_string(),
    });

    let err = notifier()
        .notify(&format!("http://{}/hook", addr), &job)
        .await
        .unwrap_err();

    assert!(matches!(err, NotificationError::RequestFailed(_)));
}

#[tokio::test]
async fn given_non_terminal_job_when_notifying_then_nothing_is_sent() {
    let (url, received) = start_capture_server(StatusCode::OK).await;
    let job = Job::new("https://example.com/v".to_string(), None);

    let err = notifier().notify(&url, &job).await.unwrap_err();

    assert!(matches!(err, NotificationError::NotTerminal(_)));
    assert!(received.lock().unwrap().is_empty());
}
