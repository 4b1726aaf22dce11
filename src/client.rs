//! Session run loop.
//!
//! Two producer tasks — the console reader and the server reader — push
//! raw units onto one shared mpsc queue. A single consumer drains the
//! queue strictly in arrival order and performs all [`Session`] mutation
//! and all socket writes; this serialization is the sole concurrency
//! safety mechanism. An optional timer injects a synthetic `/quit`
//! through the same queue rather than mutating anything directly, and
//! DCC transfers run fully independently, reporting back only as queued
//! events. A watch channel supervises the tasks at shutdown.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncBufReadExt;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::Config;
use crate::dcc::{self, TransferResult};
use crate::dispatch::{Action, Dispatcher};
use crate::error::ProtocolError;
use crate::logfile::LogSink;
use crate::state::Session;
use crate::transport::{Transport, TransportSink, TransportStream};

/// How long the loop keeps draining server traffic after QUIT before
/// tearing the session down.
const QUIT_GRACE: Duration = Duration::from_secs(2);

/// Queue depth of the shared event channel.
const QUEUE_DEPTH: usize = 64;

/// Units pushed onto the shared queue by the producer tasks.
#[derive(Debug)]
pub enum Event {
    /// One console input line.
    Console(String),
    /// One framed server line.
    Server(String),
    /// The main transport closed or failed; implicit quit.
    ConnectionLost,
    /// A DCC transfer finished.
    Transfer(TransferResult),
    /// The scripted quit timer fired.
    TimerQuit,
}

/// Connect, register, and run the session until quit or transport loss.
///
/// Failure to open the log sink or to establish the TCP connection is a
/// startup error surfaced to the caller (non-zero exit); everything
/// after that is handled inside the loop.
pub async fn run(config: Config) -> Result<()> {
    let log = LogSink::open(&config.log)
        .with_context(|| format!("cannot open log file {:?}", config.log))?;

    let transport = Transport::connect(&config.host, config.port)
        .await
        .with_context(|| format!("cannot connect to {}:{}", config.host, config.port))?;

    let session = Session::new(&config.nick, &config.user, &config.realname, &config.host);
    let dispatcher = Dispatcher::new(session, config.pass.clone(), config.script);

    run_session(config, transport, dispatcher, log).await
}

async fn run_session(
    config: Config,
    transport: Transport,
    mut dispatcher: Dispatcher,
    log: LogSink,
) -> Result<()> {
    let (events_tx, mut events_rx) = mpsc::channel::<Event>(QUEUE_DEPTH);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (sink, stream) = transport.split();
    let server_task = tokio::spawn(read_server(stream, events_tx.clone(), shutdown_rx.clone()));
    let console_task = tokio::spawn(read_console(events_tx.clone(), shutdown_rx));

    if let Some(secs) = config.quit_after {
        let events_tx = events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            let _ = events_tx.send(Event::TimerQuit).await;
        });
    }

    let mut executor = Executor {
        sink,
        log,
        events_tx,
        download_dir: config.download_dir.clone(),
        transfers: Vec::new(),
    };

    let actions = dispatcher.start();
    executor.run(actions).await;

    let mut connection_up = true;
    while let Some(event) = events_rx.recv().await {
        if matches!(event, Event::ConnectionLost) {
            connection_up = false;
        }
        let actions = dispatch_event(&mut dispatcher, event);
        if executor.run(actions).await {
            break;
        }
    }

    // Grace period: pick up the server's goodbye before teardown.
    if connection_up {
        drain_until_close(&mut dispatcher, &mut executor, &mut events_rx).await;
    }

    let _ = shutdown_tx.send(true);
    let _ = executor.sink.close().await;
    console_task.abort();
    server_task.abort();
    for transfer in &executor.transfers {
        transfer.abort();
    }
    dispatcher.closed();

    Ok(())
}

fn dispatch_event(dispatcher: &mut Dispatcher, event: Event) -> Vec<Action> {
    match event {
        Event::Console(line) => dispatcher.console_line(&line),
        Event::Server(line) => dispatcher.server_line(&line),
        Event::ConnectionLost => dispatcher.connection_lost(),
        Event::Transfer(result) => dispatcher.transfer_result(result),
        Event::TimerQuit => dispatcher.console_line("/quit"),
    }
}

async fn drain_until_close(
    dispatcher: &mut Dispatcher,
    executor: &mut Executor,
    events_rx: &mut mpsc::Receiver<Event>,
) {
    let deadline = tokio::time::Instant::now() + QUIT_GRACE;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            break;
        }
        match timeout(remaining, events_rx.recv()).await {
            Ok(Some(Event::Server(line))) => {
                let actions = dispatcher.server_line(&line);
                executor.run(actions).await;
            }
            Ok(Some(Event::ConnectionLost)) | Ok(None) | Err(_) => break,
            Ok(Some(_)) => {}
        }
    }
}

/// Executes dispatcher actions. Owns the transport sink and the log
/// sink, so nothing else can write to either.
struct Executor {
    sink: TransportSink,
    log: LogSink,
    events_tx: mpsc::Sender<Event>,
    download_dir: PathBuf,
    transfers: Vec<JoinHandle<()>>,
}

impl Executor {
    /// Execute actions in order. Returns `true` when a quit was requested.
    async fn run(&mut self, actions: Vec<Action>) -> bool {
        let mut quit = false;
        for action in actions {
            match action {
                Action::Print(line) => println!("{}", line),
                Action::Log(direction, line) => {
                    if let Err(e) = self.log.append(direction, &line) {
                        warn!("log write failed: {}", e);
                    }
                }
                Action::Send(cmd) => {
                    // A failed send is reported but not fatal for a
                    // single command; connection loss surfaces through
                    // the reader task.
                    if let Err(e) = self.sink.send(cmd).await {
                        println!("send failed: {}", e);
                    }
                }
                Action::Dcc(offer) => {
                    let events_tx = self.events_tx.clone();
                    let dir = self.download_dir.clone();
                    self.transfers.push(tokio::spawn(async move {
                        let result = dcc::receive_into(offer, &dir).await;
                        let _ = events_tx.send(Event::Transfer(result)).await;
                    }));
                }
                Action::Quit => quit = true,
            }
        }
        quit
    }
}

/// Server reader task: framed lines onto the shared queue.
async fn read_server(
    mut stream: TransportStream,
    events_tx: mpsc::Sender<Event>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            next = stream.next() => match next {
                Some(Ok(line)) => {
                    if events_tx.send(Event::Server(line)).await.is_err() {
                        break;
                    }
                }
                Some(Err(ProtocolError::Io(e))) => {
                    debug!("transport read failed: {}", e);
                    let _ = events_tx.send(Event::ConnectionLost).await;
                    break;
                }
                Some(Err(e)) => {
                    // Oversize or undecodable line: framing recovers on
                    // the next one.
                    warn!("dropped server line: {}", e);
                }
                None => {
                    let _ = events_tx.send(Event::ConnectionLost).await;
                    break;
                }
            }
        }
    }
}

/// Console reader task: one event per input line.
async fn read_console(events_tx: mpsc::Sender<Event>, mut shutdown: watch::Receiver<bool>) {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if events_tx.send(Event::Console(line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break, // stdin closed
                Err(e) => {
                    warn!("console read failed: {}", e);
                    break;
                }
            }
        }
    }
}
