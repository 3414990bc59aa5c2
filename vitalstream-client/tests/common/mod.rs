//! Common test utilities for vitalstream-client integration tests
//!
//! Provides a mock WebSocket stream server so client behavior can be tested
//! without the real analytics service. The server can push frames to
//! connected clients, record frames sent by them, refuse a scripted number
//! of handshakes and drop live connections to exercise the retry path.

#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Mock WebSocket server for stream client testing
pub struct MockWsServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    message_rx: mpsc::Receiver<String>,
    push_tx: broadcast::Sender<String>,
    drop_tx: broadcast::Sender<()>,
    handshakes: Arc<AtomicUsize>,
    tcp_accepts: Arc<AtomicUsize>,
}

impl MockWsServer {
    /// Start a server that accepts every handshake
    pub async fn start() -> Self {
        Self::start_with_refusals(0).await
    }

    /// Start a server that drops the first `refusals` connection attempts
    /// before completing the WebSocket handshake
    pub async fn start_with_refusals(refusals: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (msg_tx, message_rx) = mpsc::channel::<String>(100);
        let (push_tx, _) = broadcast::channel::<String>(100);
        let (drop_tx, _) = broadcast::channel::<()>(8);

        let handshakes = Arc::new(AtomicUsize::new(0));
        let tcp_accepts = Arc::new(AtomicUsize::new(0));
        let remaining_refusals = Arc::new(AtomicUsize::new(refusals));

        let push_tx_srv = push_tx.clone();
        let drop_tx_srv = drop_tx.clone();
        let handshakes_srv = Arc::clone(&handshakes);
        let tcp_accepts_srv = Arc::clone(&tcp_accepts);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    accept_result = listener.accept() => {
                        let Ok((stream, _)) = accept_result else { break };
                        tcp_accepts_srv.fetch_add(1, Ordering::SeqCst);

                        // Scripted refusal: drop the socket before the
                        // handshake so the client sees an open failure
                        if remaining_refusals
                            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                            .is_ok()
                        {
                            drop(stream);
                            continue;
                        }

                        let msg_tx = msg_tx.clone();
                        let mut push_rx = push_tx_srv.subscribe();
                        let mut drop_rx = drop_tx_srv.subscribe();
                        let handshakes = Arc::clone(&handshakes_srv);

                        tokio::spawn(async move {
                            let Ok(ws_stream) = accept_async(stream).await else {
                                return;
                            };
                            handshakes.fetch_add(1, Ordering::SeqCst);
                            let (mut write, mut read) = ws_stream.split();

                            loop {
                                tokio::select! {
                                    inbound = read.next() => {
                                        match inbound {
                                            Some(Ok(Message::Text(text))) => {
                                                let _ = msg_tx.send(text).await;
                                            }
                                            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                                            Some(Ok(_)) => {}
                                        }
                                    }
                                    frame = push_rx.recv() => {
                                        if let Ok(frame) = frame {
                                            if write.send(Message::Text(frame)).await.is_err() {
                                                break;
                                            }
                                        }
                                    }
                                    _ = drop_rx.recv() => break,
                                }
                            }
                        });
                    }
                }
            }
        });

        // Let the listener settle
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            shutdown_tx,
            message_rx,
            push_tx,
            drop_tx,
            handshakes,
            tcp_accepts,
        }
    }

    /// Base WebSocket URL of this server (no path)
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Push a text frame to every connected client
    pub fn push(&self, frame: impl Into<String>) {
        let _ = self.push_tx.send(frame.into());
    }

    /// Drop all live connections without shutting the listener down
    pub fn drop_connections(&self) {
        let _ = self.drop_tx.send(());
    }

    /// Number of completed WebSocket handshakes
    pub fn handshake_count(&self) -> usize {
        self.handshakes.load(Ordering::SeqCst)
    }

    /// Number of TCP connection attempts, including refused ones
    pub fn attempt_count(&self) -> usize {
        self.tcp_accepts.load(Ordering::SeqCst)
    }

    /// Wait for the next frame a client sent to the server
    pub async fn wait_for_message(&mut self) -> Option<String> {
        tokio::time::timeout(Duration::from_secs(5), self.message_rx.recv())
            .await
            .ok()
            .flatten()
    }

    /// Shutdown the mock server
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

/// Poll an async condition until it holds or the timeout expires
pub async fn wait_until<F, Fut>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
