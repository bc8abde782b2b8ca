mod callback_payload;
mod webhook_notifier;

pub use callback_payload::{CallbackPayload, CompletedPayload, FailedPayload};
pub use webhook_notifier::WebhookNotifier;
