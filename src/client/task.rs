//! Background connection task and the handle used to drive it.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::connection::{line_failure, Connection, Frame};
use crate::command::OutboundCommand;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::event::{Event, EventError};

#[derive(Debug)]
enum ClientCommand {
    Send(OutboundCommand),
    Nick(String),
    Quit(Option<String>),
}

/// Cloneable sender for commands to a running [`Client`].
///
/// Every method fails with [`ClientError::Closed`] once the connection task
/// has exited.
#[derive(Clone, Debug)]
pub struct ClientHandle {
    tx: mpsc::UnboundedSender<ClientCommand>,
}

impl ClientHandle {
    fn submit(&self, cmd: ClientCommand) -> Result<(), ClientError> {
        self.tx.send(cmd).map_err(|_| ClientError::Closed)
    }

    /// Join a channel.
    pub fn join(&self, channel: impl Into<String>) -> Result<(), ClientError> {
        self.send(OutboundCommand::join(channel))
    }

    /// Join a channel protected by a key.
    pub fn join_with_password(
        &self,
        channel: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.send(OutboundCommand::join_with_password(channel, password))
    }

    /// Send a PRIVMSG to a nick or channel.
    pub fn privmsg(
        &self,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.send(OutboundCommand::privmsg(target, text))
    }

    /// Change nick. Self-detection switches to the new nick immediately.
    pub fn nick(&self, nick: impl Into<String>) -> Result<(), ClientError> {
        self.submit(ClientCommand::Nick(nick.into()))
    }

    /// Write a raw line.
    pub fn send_raw(&self, line: impl Into<String>) -> Result<(), ClientError> {
        self.send(OutboundCommand::raw(line))
    }

    /// Write any command.
    pub fn send(&self, cmd: OutboundCommand) -> Result<(), ClientError> {
        self.submit(ClientCommand::Send(cmd))
    }

    /// Send QUIT and shut the connection down.
    pub fn quit(&self, reason: Option<String>) -> Result<(), ClientError> {
        self.submit(ClientCommand::Quit(reason))
    }
}

/// A connection running on its own tokio task.
///
/// ```no_run
/// use slirc_client::{Client, ClientConfig, Event};
///
/// # async fn run() -> Result<(), slirc_client::ClientError> {
/// let config = ClientConfig::new("irc.libera.chat", "slircbot").with_channel("#slirc");
/// let mut client = Client::spawn(config)?;
///
/// while let Some(event) = client.next_event().await {
///     if let Event::PrivMsg { nick, message } = event {
///         client.handle().privmsg(nick, message)?;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client {
    handle: ClientHandle,
    events: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<()>,
}

impl Client {
    /// Validate `config`, then connect and register in the background.
    ///
    /// The first events are `Connect` and `AfterConnect`, or `Error` then
    /// `Close` if the server could not be reached.
    pub fn spawn(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, events) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(config, cmd_rx, event_tx));

        Ok(Self {
            handle: ClientHandle { tx: cmd_tx },
            events,
            task,
        })
    }

    /// A handle for sending commands; may be cloned freely.
    pub fn handle(&self) -> ClientHandle {
        self.handle.clone()
    }

    /// The next event, or `None` after `Close` has been delivered.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Whether the connection task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

enum Step {
    Inbound(Result<Option<Frame>, ClientError>),
    Command(Option<ClientCommand>),
}

/// Event sink. Unbounded: emitting never waits on the reader.
struct Events {
    tx: mpsc::UnboundedSender<Event>,
}

impl Events {
    /// Deliver one event. Returns `false` once the receiver is gone.
    fn emit(&self, event: Event) -> bool {
        debug!(event = event.name(), "emit");
        self.tx.send(event).is_ok()
    }

    fn error(&self, err: &ClientError) -> bool {
        self.emit(Event::Error(EventError::from(err)))
    }

    /// Report a failed write. Per-line failures become an `Error` event;
    /// anything else is returned.
    fn sent(&self, result: Result<(), ClientError>) -> Result<bool, ClientError> {
        match result {
            Ok(()) => Ok(true),
            Err(e) => Ok(self.emit(line_failure(e)?)),
        }
    }
}

async fn run(
    config: ClientConfig,
    cmd_rx: mpsc::UnboundedReceiver<ClientCommand>,
    event_tx: mpsc::UnboundedSender<Event>,
) {
    let events = Events { tx: event_tx };

    match Connection::connect(&config).await {
        Ok(conn) => {
            if let Err(e) = drive(conn, &config, cmd_rx, &events).await {
                warn!(error = %e, "connection ended with error");
                events.error(&e);
            }
        }
        Err(e) => {
            warn!(error = %e, "connect failed");
            events.error(&e);
        }
    }

    events.emit(Event::Close);
    info!("connection closed");
}

async fn drive(
    mut conn: Connection<tokio::net::TcpStream>,
    config: &ClientConfig,
    mut cmd_rx: mpsc::UnboundedReceiver<ClientCommand>,
    events: &Events,
) -> Result<(), ClientError> {
    if !events.emit(Event::Connect) {
        return Ok(());
    }
    conn.register().await?;
    if !events.emit(Event::AfterConnect) {
        return Ok(());
    }

    loop {
        let step = tokio::select! {
            inbound = conn.next_frame() => Step::Inbound(inbound),
            cmd = cmd_rx.recv() => Step::Command(cmd),
        };

        let open = match step {
            Step::Inbound(Ok(Some(frame))) => {
                let mut open = true;
                for event in conn.process(frame).await? {
                    let welcome = matches!(event, Event::Welcome);
                    if !events.emit(event) {
                        open = false;
                        break;
                    }
                    if welcome {
                        for channel in &config.channels {
                            open &= events.sent(conn.join(channel.clone(), None).await)?;
                        }
                    }
                }
                open
            }
            Step::Inbound(Ok(None)) => {
                info!("server closed the connection");
                return Ok(());
            }
            Step::Inbound(Err(ClientError::IdleTimeout(secs))) => {
                warn!(idle_secs = secs, "no data from server");
                events.error(&ClientError::IdleTimeout(secs))
            }
            Step::Inbound(Err(e)) => return Err(e),
            Step::Command(Some(ClientCommand::Send(cmd))) => events.sent(conn.send(cmd).await)?,
            Step::Command(Some(ClientCommand::Nick(nick))) => events.sent(conn.nick(nick).await)?,
            Step::Command(Some(ClientCommand::Quit(reason))) => {
                events.sent(conn.quit(reason).await)?;
                return Ok(());
            }
            Step::Command(None) => {
                debug!("all handles dropped");
                return Ok(());
            }
        };

        if !open {
            debug!("event receiver dropped");
            return Ok(());
        }
    }
}
