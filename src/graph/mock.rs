//! Scripted [`GraphClient`] for tests and demos.

// std
use std::{
	collections::VecDeque,
	task::{Context, Poll},
};
// self
use crate::{
	_prelude::*,
	error::GraphError,
	graph::{BatchRequest, BatchResponse, GraphClient, GraphFuture},
};

#[derive(Clone, Debug)]
enum Reply {
	Response(BatchResponse),
	Status { status: u16, message: String },
}

/// In-process Graph client that replays queued replies in order and records every request.
///
/// Each call suspends once before answering so concurrent callers genuinely interleave. An empty
/// queue answers with HTTP 503.
#[derive(Clone, Debug, Default)]
pub struct MockGraphClient {
	replies: Arc<Mutex<VecDeque<Reply>>>,
	requests: Arc<Mutex<Vec<BatchRequest>>>,
}
impl MockGraphClient {
	/// Queues a successful batch response.
	pub fn push_response(&self, response: BatchResponse) {
		self.replies.lock().push_back(Reply::Response(response));
	}

	/// Queues a failed batch call.
	pub fn push_status(&self, status: u16, message: impl Into<String>) {
		self.replies.lock().push_back(Reply::Status { status, message: message.into() });
	}

	/// Requests received so far.
	pub fn requests(&self) -> Vec<BatchRequest> {
		self.requests.lock().clone()
	}

	/// Number of batch calls received so far.
	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}
}
impl GraphClient for MockGraphClient {
	fn batch(&self, request: BatchRequest) -> GraphFuture<'_, BatchResponse> {
		Box::pin(async move {
			self.requests.lock().push(request);

			yield_now().await;

			let reply = self.replies.lock().pop_front();

			match reply {
				Some(Reply::Response(response)) => Ok(response),
				Some(Reply::Status { status, message }) =>
					Err(GraphError::BatchStatus { status, message }.into()),
				None => Err(GraphError::BatchStatus {
					status: 503,
					message: "no scripted reply".into(),
				}
				.into()),
			}
		})
	}
}

/// Future that returns `Pending` exactly once, handing control back to the executor.
pub(crate) fn yield_now() -> YieldNow {
	YieldNow(false)
}

pub(crate) struct YieldNow(bool);
impl Future for YieldNow {
	type Output = ();

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
		if self.0 {
			return Poll::Ready(());
		}

		self.0 = true;
		cx.waker().wake_by_ref();

		Poll::Pending
	}
}
