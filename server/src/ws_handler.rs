use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use prost::Message as ProstMessage;
use tokio::sync::mpsc;

use common::id_generator::generate_connection_id;
use common::{log, ClientMessage, ServerMessage};

use crate::dispatcher::Intent;
use crate::web_server::WebServerState;

pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let connection = generate_connection_id();
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(state.client_channel_capacity);

    if state
        .intents
        .send(Intent::Connected {
            connection: connection.clone(),
            sender: tx,
        })
        .await
        .is_err()
    {
        log!("[conn:{}] Dispatcher unavailable, closing", connection);
        return;
    }

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let buf = msg.encode_to_vec();
            if ws_sender.send(Message::Binary(buf.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        let data = match result {
            Ok(Message::Binary(data)) => data,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                log!("[conn:{}] WebSocket error: {}", connection, e);
                break;
            }
        };

        let message = match decode_client_message(&data) {
            Ok(m) => m,
            Err(e) => {
                log!("[conn:{}] {}", connection, e);
                continue;
            }
        };

        let intent = Intent::Message {
            connection: connection.clone(),
            message,
        };
        if state.intents.send(intent).await.is_err() {
            log!("[conn:{}] Dispatcher unavailable, closing", connection);
            break;
        }
    }

    log!("[conn:{}] WebSocket connection ended", connection);
    let _ = state
        .intents
        .send(Intent::Disconnected {
            connection: connection.clone(),
        })
        .await;

    send_task.abort();
}

fn decode_client_message(data: &[u8]) -> Result<ClientMessage, String> {
    let message = ClientMessage::decode(data)
        .map_err(|e| format!("Failed to decode ClientMessage: {}", e))?;
    if message.message.is_none() {
        return Err("ClientMessage carries no event".to_string());
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::client_message;
    use common::SessionId;

    #[test]
    fn test_decodes_play_again() {
        let session_id = SessionId::new("Wise-Owl-0000000000000001");
        let bytes = ClientMessage::play_again(&session_id).encode_to_vec();

        let decoded = decode_client_message(&bytes).unwrap();
        match decoded.message {
            Some(client_message::Message::PlayAgain(request)) => {
                assert_eq!(request.session_id, session_id.as_str());
            }
            other => panic!("expected playAgain, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode_client_message(&[0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn test_empty_frame_is_rejected() {
        assert!(decode_client_message(&[]).is_err());
    }
}
