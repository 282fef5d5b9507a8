//! A single framed connection to an IRC server.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_util::codec::Framed;
use tracing::{debug, info, trace, warn};

use crate::command::OutboundCommand;
use crate::config::ClientConfig;
use crate::dispatch::{dispatch, Action, DispatchContext};
use crate::error::{ClientError, ProtocolError};
use crate::event::{Event, EventError};
use crate::irc::IrcCodec;
use crate::message::ParsedMessage;

/// One decoded inbound line: a message, or the reason it failed to parse.
pub type Frame = Result<ParsedMessage, ProtocolError>;

/// Owns the transport and the nickname this client currently holds.
///
/// Works over any `AsyncRead + AsyncWrite` stream, so tests can drive it
/// with an in-memory duplex.
pub struct Connection<T> {
    framed: Framed<T, IrcCodec>,
    nick: String,
    username: String,
    realname: String,
    idle_timeout: Option<Duration>,
    last_received: Instant,
}

impl Connection<TcpStream> {
    /// Open a TCP connection to the configured server.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let addr = config.addr();
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| ClientError::Connect {
                addr: addr.clone(),
                source,
            })?;

        if let Err(e) = enable_keepalive(&stream) {
            warn!(error = %e, "failed to enable TCP keepalive");
        }

        info!(%addr, "connected");
        Self::new(stream, config)
    }
}

fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
    use socket2::{SockRef, TcpKeepalive};

    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(120))
        .with_interval(Duration::from_secs(30));

    sock.set_tcp_keepalive(&keepalive)
}

/// Turn a failure that concerns a single line into an error event.
///
/// Anything else is returned unchanged and ends the session.
pub(crate) fn line_failure(err: ClientError) -> Result<Event, ClientError> {
    if err.is_line_error() {
        warn!(error = %err, "line dropped");
        Ok(Event::Error(err.into()))
    } else {
        Err(err)
    }
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an established stream using the codec settings from `config`.
    pub fn new(stream: T, config: &ClientConfig) -> Result<Self, ClientError> {
        let codec = IrcCodec::with_max_len(&config.encoding, config.max_line_len)?;
        Ok(Self {
            framed: Framed::new(stream, codec),
            nick: config.nickname.clone(),
            username: config.username().to_owned(),
            realname: config.realname().to_owned(),
            idle_timeout: config.idle_timeout(),
            last_received: Instant::now(),
        })
    }

    /// The nickname used for self-detection in dispatch.
    pub fn current_nick(&self) -> &str {
        &self.nick
    }

    /// Send NICK then USER.
    pub async fn register(&mut self) -> Result<(), ClientError> {
        let nick = OutboundCommand::nick(self.nick.clone());
        let user = OutboundCommand::user(self.username.clone(), self.realname.clone());
        self.send(nick).await?;
        self.send(user).await
    }

    /// Write one command, CRLF-terminated.
    pub async fn send(&mut self, cmd: OutboundCommand) -> Result<(), ClientError> {
        trace!(line = %cmd, "send");
        self.framed.send(cmd).await?;
        Ok(())
    }

    /// Write a line verbatim.
    pub async fn send_raw(&mut self, line: impl Into<String>) -> Result<(), ClientError> {
        self.send(OutboundCommand::raw(line)).await
    }

    /// Join a channel, optionally with its key.
    pub async fn join(
        &mut self,
        channel: impl Into<String>,
        password: Option<String>,
    ) -> Result<(), ClientError> {
        let cmd = match password {
            Some(password) => OutboundCommand::join_with_password(channel, password),
            None => OutboundCommand::join(channel),
        };
        self.send(cmd).await
    }

    /// Send a PRIVMSG.
    pub async fn privmsg(
        &mut self,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), ClientError> {
        self.send(OutboundCommand::privmsg(target, text)).await
    }

    /// Request a nick change and adopt the new nick locally.
    ///
    /// The local nick changes as soon as the NICK line is written, not when
    /// the server confirms it.
    pub async fn nick(&mut self, new_nick: impl Into<String>) -> Result<(), ClientError> {
        let new_nick = new_nick.into();
        self.send(OutboundCommand::nick(new_nick.clone())).await?;
        debug!(old = %self.nick, new = %new_nick, "nick changed");
        self.nick = new_nick;
        Ok(())
    }

    /// Send QUIT.
    pub async fn quit(&mut self, reason: Option<String>) -> Result<(), ClientError> {
        self.send(OutboundCommand::Quit(reason)).await
    }

    /// Wait for the next inbound line.
    ///
    /// Returns `Ok(None)` once the server closes the stream. This only reads,
    /// so it is safe to race in `tokio::select!`.
    pub async fn next_frame(&mut self) -> Result<Option<Frame>, ClientError> {
        let next = self.framed.next();
        let item = match self.idle_timeout {
            Some(idle) => match tokio::time::timeout_at(self.last_received + idle, next).await {
                Ok(item) => item,
                Err(_) => {
                    // Restart the clock so the next report comes one full period later.
                    self.last_received = Instant::now();
                    return Err(ClientError::IdleTimeout(idle.as_secs()));
                }
            },
            None => next.await,
        };

        match item {
            Some(Ok(frame)) => {
                self.last_received = Instant::now();
                Ok(Some(frame))
            }
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Dispatch one frame, write any replies, and return the events.
    ///
    /// A line that failed to parse or was too long becomes a single
    /// `Event::Error`. A reply that cannot be written as a legal line is
    /// dropped and reported the same way.
    pub async fn process(&mut self, frame: Frame) -> Result<Vec<Event>, ClientError> {
        let msg = match frame {
            Ok(msg) => msg,
            Err(ProtocolError::InvalidMessage { string, cause }) => {
                warn!(line = %string, error = %cause, "dropping unparseable line");
                return Ok(vec![Event::Error(EventError::Parse {
                    line: string,
                    cause,
                })]);
            }
            Err(other) => return line_failure(other.into()).map(|event| vec![event]),
        };

        trace!(line = %msg, "recv");
        let actions = dispatch(&msg, &DispatchContext::new(&self.nick));

        let mut events = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                Action::Emit(event) => events.push(event),
                Action::Send(cmd) => {
                    if let Err(e) = self.send(cmd).await {
                        events.push(line_failure(e)?);
                    }
                }
            }
        }
        Ok(events)
    }

    /// Read, parse and dispatch one line.
    ///
    /// Returns `Ok(None)` once the server closes the stream.
    pub async fn next_events(&mut self) -> Result<Option<Vec<Event>>, ClientError> {
        match self.next_frame().await? {
            Some(frame) => self.process(frame).await.map(Some),
            None => Ok(None),
        }
    }
}
