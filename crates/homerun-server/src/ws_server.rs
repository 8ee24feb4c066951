// WebSocket server for the dashboard front-end.

use std::fmt::Display;
use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{info, warn};

use crate::handler::QueryHandler;

/// Bind the query listener on `127.0.0.1:{port}`. Port 0 picks a free port.
pub async fn bind(port: u16) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    Ok(listener)
}

/// Accept connections forever, serving each one on its own task.
///
/// Every text frame is treated as one request and answered with exactly one
/// text frame. Connections share the handler (and through it the dataset
/// snapshot) read-only.
pub async fn run(listener: TcpListener, handler: Arc<QueryHandler>) -> anyhow::Result<()> {
    let local_addr = listener.local_addr()?;
    info!("Query server listening on {local_addr}");

    loop {
        let (stream, addr) = listener.accept().await?;
        let addr_str = addr.to_string();
        info!("Accepted TCP connection from {addr_str}");

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let ws_stream = match tokio_tungstenite::accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    warn!("WebSocket handshake failed for {addr_str}: {e}");
                    return;
                }
            };

            let (mut write, read) = ws_stream.split();
            if let Err(e) = process_message_stream(read, &mut write, &handler, &addr_str).await {
                warn!("Failed to reply to {addr_str}: {e}");
            }
            info!("Client {addr_str} disconnected");
        });
    }
}

/// Answer each text message from `stream` through `sink`.
///
/// Generic over both halves so it can be driven by in-memory streams in
/// tests. Stops on a close frame or a read error; returns `Err` only when
/// writing a reply fails.
pub async fn process_message_stream<St, Si>(
    mut stream: St,
    sink: &mut Si,
    handler: &QueryHandler,
    addr: &str,
) -> Result<(), Si::Error>
where
    St: Stream<Item = Result<Message, WsError>> + Unpin,
    Si: Sink<Message> + Unpin,
    Si::Error: Display,
{
    while let Some(msg_result) = stream.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                let reply = handler.handle_text(text.as_str()).await;
                sink.send(Message::text(reply)).await?;
            }
            Ok(Message::Close(_)) => {
                info!("Client {addr} sent close frame");
                break;
            }
            Err(e) => {
                warn!("WebSocket error from {addr}: {e}");
                break;
            }
            _ => {
                // Ignore Binary, Ping, Pong, Frame variants.
            }
        }
    }
    Ok(())
}
