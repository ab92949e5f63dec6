use std::any::Any;

/// Extracts the message from a panic payload returned by a failed thread join.
///
/// Returns `None` when the payload is neither a `&str` nor a `String`.
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
	if let Some(message) = payload.downcast_ref::<&'static str>() {
		Some((*message).to_string())
	} else {
		payload.downcast_ref::<String>().cloned()
	}
}
