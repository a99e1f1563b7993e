use std::any::Any;

/// Extracts the message from a panic payload, if it carries a string.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		return Some((*msg).to_string());
	}
	payload.downcast_ref::<String>().cloned()
}

/// Panic message for logging, with a placeholder for opaque payloads.
pub(crate) fn describe_panic(payload: &(dyn Any + Send)) -> String {
	panic_message(payload).unwrap_or_else(|| "<non-string panic payload>".to_string())
}
