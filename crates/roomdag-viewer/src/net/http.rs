use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use roomdag_core::EventRow;
use tokio::sync::mpsc;

use crate::net::{Command, Incoming};

/// Spawn the fetch worker: a dedicated thread owning a tokio runtime
/// and an HTTP client. Commands go in over the returned sender, results
/// come back over `tx`. One request in flight at a time, no retries.
pub fn spawn_client(base_url: String, tx: Sender<Incoming>) -> mpsc::UnboundedSender<Command> {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        rt.block_on(run(base_url, cmd_rx, tx));
    });
    cmd_tx
}

async fn run(
    base_url: String,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    tx: Sender<Incoming>,
) {
    let client = reqwest::Client::new();

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            Command::FetchRoom {
                room_id,
                max_stream,
            } => {
                let url = room_url(&base_url, &room_id, max_stream);
                tracing::info!(%room_id, %url, "fetching room events");
                let inc = match fetch_rows(&client, &url).await {
                    Ok(rows) => {
                        tracing::info!(%room_id, rows = rows.len(), "room events loaded");
                        Incoming::Room { room_id, rows }
                    }
                    Err(e) => {
                        tracing::warn!(%room_id, error = %format!("{e:#}"), "room fetch failed");
                        Incoming::RoomError {
                            room_id,
                            error: format!("{e:#}"),
                        }
                    }
                };
                let _ = tx.send(inc);
            }
            Command::FetchState { event_id } => {
                let url = state_url(&base_url, &event_id.0);
                tracing::info!(event_id = %event_id.0, %url, "fetching resolved state");
                let inc = match fetch_value(&client, &url).await {
                    Ok(state) => Incoming::State { event_id, state },
                    Err(e) => {
                        tracing::warn!(
                            event_id = %event_id.0,
                            error = %format!("{e:#}"),
                            "state fetch failed"
                        );
                        Incoming::StateError {
                            event_id,
                            error: format!("{e:#}"),
                        }
                    }
                };
                let _ = tx.send(inc);
            }
        }
    }
}

// Room ids are used verbatim in the path, matching the upstream
// endpoint's expectations; they never contain '/'.
fn room_url(base: &str, room_id: &str, max_stream: Option<u64>) -> String {
    let mut url = format!("{}/room/{room_id}", base.trim_end_matches('/'));
    if let Some(max) = max_stream {
        url.push_str(&format!("?max_stream={max}"));
    }
    url
}

fn state_url(base: &str, event_id: &str) -> String {
    format!("{}/state/{event_id}", base.trim_end_matches('/'))
}

async fn fetch_rows(client: &reqwest::Client, url: &str) -> Result<Vec<EventRow>> {
    let resp = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("GET {url}"))?;
    resp.json().await.context("decode room response")
}

async fn fetch_value(client: &reqwest::Client, url: &str) -> Result<serde_json::Value> {
    let resp = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("GET {url}"))?;
    resp.json().await.context("decode state response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_url_appends_max_stream_only_when_set() {
        assert_eq!(
            room_url("http://localhost:12345", "!abc:example.org", None),
            "http://localhost:12345/room/!abc:example.org"
        );
        assert_eq!(
            room_url("http://localhost:12345/", "!abc:example.org", Some(500)),
            "http://localhost:12345/room/!abc:example.org?max_stream=500"
        );
    }

    #[test]
    fn state_url_targets_event() {
        assert_eq!(
            state_url("http://localhost:12345", "$ev:example.org"),
            "http://localhost:12345/state/$ev:example.org"
        );
    }
}
