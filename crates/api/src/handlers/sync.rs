//! Cross-client change propagation: a server-sent event stream of store
//! changes, and an explicit resync for clients regaining focus.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use serde_json::json;
use std::{convert::Infallible, sync::Arc};
use studio_db::{ChangeOrigin, StoreChange};
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tracing::{debug, info};

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

fn change_event(change: StoreChange) -> Event {
    let origin = match change.origin {
        ChangeOrigin::Local => "local",
        ChangeOrigin::Remote => "remote",
    };
    let payload = json!({ "key": change.key.as_str(), "origin": origin });
    Event::default().event("change").data(payload.to_string())
}

type ChangeItem = (Result<Event, Infallible>, Receiver<StoreChange>);

async fn next_change(mut rx: Receiver<StoreChange>) -> Option<ChangeItem> {
    loop {
        match rx.recv().await {
            Ok(change) => return Some((Ok(change_event(change)), rx)),
            Err(RecvError::Lagged(skipped)) => {
                debug!("Change stream lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

pub async fn change_events(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(user_id = %current.user.id, "Change stream opened");
    let rx = state.store.changes();
    Sse::new(stream::unfold(rx, next_change)).keep_alive(KeepAlive::default())
}

#[axum::debug_handler]
pub async fn resync(
    State(state): State<Arc<ApiState>>,
    _current: CurrentUser,
) -> Result<Json<Vec<String>>, AppError> {
    let changed = state.store.resync().await?;
    Ok(Json(
        changed.iter().map(|key| key.as_str().to_string()).collect(),
    ))
}
