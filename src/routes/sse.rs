use crate::state::SimsState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseEvent {
    CrudStudent,
}

impl SseEvent {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CrudStudent => "crud_student",
        }
    }
}

pub async fn sse_feed(
    State(state): State<SimsState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe_to_sse_feed()).map(|evt| {
        let evt = evt.unwrap_or_else(|e| {
            warn!(?e, "SSE subscriber lagged, sending a catch-all refresh");
            SseEvent::CrudStudent
        });
        Ok(Event::default().event(evt.name()).data(""))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
