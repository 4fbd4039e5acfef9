use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use common::{log, ClientMessage, ConnectionId};

use crate::broadcaster::{Broadcaster, ClientSender};
use crate::coordinator::SessionCoordinator;
use crate::game_service::GameService;

/// Everything the connection layer can tell the game core.
pub enum Intent {
    Connected {
        connection: ConnectionId,
        sender: ClientSender,
    },
    Message {
        connection: ConnectionId,
        message: ClientMessage,
    },
    Disconnected {
        connection: ConnectionId,
    },
}

pub type IntentSender = mpsc::Sender<Intent>;

pub fn spawn_dispatcher(
    coordinator: SessionCoordinator,
    capacity: usize,
) -> (IntentSender, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(capacity);
    let service = GameService::new(Broadcaster::new(), coordinator);
    let handle = tokio::spawn(run_dispatcher(rx, service));
    (tx, handle)
}

/// Handles one intent to completion before taking the next; this is the
/// only place game state is touched. Returns once every sender is gone.
pub async fn run_dispatcher(
    mut intents: mpsc::Receiver<Intent>,
    mut service: GameService<Broadcaster>,
) {
    while let Some(intent) = intents.recv().await {
        match intent {
            Intent::Connected { connection, sender } => {
                service.transport_mut().register(connection.clone(), sender);
                log!(
                    "[conn:{}] Connected ({} online)",
                    connection,
                    service.transport_mut().client_count()
                );
            }
            Intent::Message { connection, message } => {
                service.handle_message(&connection, message);
            }
            Intent::Disconnected { connection } => {
                service.handle_disconnect(&connection);
                service.transport_mut().unregister(&connection);
                log!(
                    "[conn:{}] Disconnected ({} online, {} sessions)",
                    connection,
                    service.transport_mut().client_count(),
                    service.registry().len()
                );
            }
        }
    }
    log!("Dispatcher stopped");
}
