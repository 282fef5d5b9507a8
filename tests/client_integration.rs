//! End-to-end tests: a [`Client`] talking to a scripted server on localhost.

#![cfg(feature = "tokio")]

use std::time::Duration;

use slirc_client::{Client, ClientConfig, Event, EventError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::time::timeout;

const STEP: Duration = Duration::from_secs(5);

struct Server {
    lines: tokio::io::Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Server {
    async fn expect(&mut self, expected: &str) {
        let line = timeout(STEP, self.lines.next_line())
            .await
            .expect("timed out waiting for client line")
            .expect("read failed")
            .expect("client hung up");
        assert_eq!(line, expected);
    }

    async fn say(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .await
            .expect("write failed");
    }
}

async fn start(nick: &str, channels: &[&str]) -> (Client, Server) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut config = ClientConfig::new("127.0.0.1", nick)
        .with_port(port)
        .with_realname("Integration Bot");
    for channel in channels {
        config = config.with_channel(*channel);
    }

    let client = Client::spawn(config).unwrap();
    let (stream, _) = timeout(STEP, listener.accept()).await.unwrap().unwrap();
    let (read, writer) = stream.into_split();
    let server = Server {
        lines: BufReader::new(read).lines(),
        writer,
    };
    (client, server)
}

/// Next event that is not one of the per-line raw events.
async fn next_domain(client: &mut Client) -> Event {
    loop {
        let event = timeout(STEP, client.next_event())
            .await
            .expect("timed out waiting for event")
            .expect("event stream ended");
        if !event.is_raw() {
            return event;
        }
    }
}

#[tokio::test]
async fn test_registration_and_autojoin() {
    let (mut client, mut server) = start("bot", &["#rust", "#tokio"]).await;

    assert_eq!(next_domain(&mut client).await, Event::Connect);
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;
    assert_eq!(next_domain(&mut client).await, Event::AfterConnect);

    server.say(":irc.test 001 bot :Welcome to the test network").await;
    assert_eq!(next_domain(&mut client).await, Event::Welcome);
    server.expect("JOIN #rust").await;
    server.expect("JOIN #tokio").await;

    server.say(":bot!bot@127.0.0.1 JOIN :#rust").await;
    assert_eq!(
        next_domain(&mut client).await,
        Event::Join {
            channel: "#rust".into()
        }
    );
    assert_eq!(
        next_domain(&mut client).await,
        Event::ChannelJoin {
            channel: "#rust".into(),
            nick: "bot".into()
        }
    );
}

#[tokio::test]
async fn test_ping_is_answered() {
    let (mut client, mut server) = start("bot", &[]).await;
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;

    server.say("PING :abc123").await;
    server.expect("PONG: abc123").await;

    // The PING produced no domain event; the next one is from this NOTICE.
    server.say(":irc.test NOTICE bot :after ping").await;
    assert_eq!(next_domain(&mut client).await, Event::Connect);
    assert_eq!(next_domain(&mut client).await, Event::AfterConnect);
    assert_eq!(
        next_domain(&mut client).await,
        Event::Notice {
            message: "after ping".into()
        }
    );
}

#[tokio::test]
async fn test_handle_commands_and_nick_change() {
    let (mut client, mut server) = start("bot", &[]).await;
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;

    let handle = client.handle();
    handle.join_with_password("#secret", "hunter2").unwrap();
    server.expect("JOIN #secret :hunter2").await;

    handle.privmsg("#secret", "hello").unwrap();
    server.expect("PRIVMSG #secret :hello").await;

    handle.send_raw("AWAY :lunch").unwrap();
    server.expect("AWAY :lunch").await;

    handle.nick("newbot").unwrap();
    server.expect("NICK newbot").await;

    server.say(":alice!a@h PRIVMSG newbot :psst").await;
    let privmsg = loop {
        match next_domain(&mut client).await {
            Event::Connect | Event::AfterConnect => continue,
            other => break other,
        }
    };
    assert_eq!(
        privmsg,
        Event::PrivMsg {
            nick: "alice".into(),
            message: "psst".into()
        }
    );
}

#[tokio::test]
async fn test_parse_error_does_not_close() {
    let (mut client, mut server) = start("bot", &[]).await;
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;

    server.say(":lonely").await;
    server.say(":irc.test 001 bot :Welcome").await;

    assert_eq!(next_domain(&mut client).await, Event::Connect);
    assert_eq!(next_domain(&mut client).await, Event::AfterConnect);
    assert!(matches!(
        next_domain(&mut client).await,
        Event::Error(EventError::Parse { .. })
    ));
    assert_eq!(next_domain(&mut client).await, Event::Welcome);
}

#[tokio::test]
async fn test_overlong_line_does_not_close() {
    let (mut client, mut server) = start("bot", &[]).await;
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;

    server
        .say(&format!(":irc.test 372 bot :{}", "x".repeat(600)))
        .await;
    server.say("PING :abc").await;
    server.expect("PONG: abc").await;

    assert_eq!(next_domain(&mut client).await, Event::Connect);
    assert_eq!(next_domain(&mut client).await, Event::AfterConnect);
    assert!(matches!(
        next_domain(&mut client).await,
        Event::Error(EventError::LineTooLong { limit: 512, .. })
    ));
}

#[tokio::test]
async fn test_rejected_line_does_not_close() {
    let (mut client, mut server) = start("bot", &[]).await;
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;

    let handle = client.handle();
    handle.privmsg("#c", "tab\there").unwrap();
    handle.privmsg("#c", "ok").unwrap();
    server.expect("PRIVMSG #c :ok").await;

    assert_eq!(next_domain(&mut client).await, Event::Connect);
    assert_eq!(next_domain(&mut client).await, Event::AfterConnect);
    assert_eq!(
        next_domain(&mut client).await,
        Event::Error(EventError::Rejected('\t'))
    );
    assert!(!client.is_finished());
}

#[tokio::test]
async fn test_undrained_events_do_not_stall_ping() {
    let (_client, mut server) = start("bot", &[]).await;
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;

    // Nobody reads events while the burst arrives.
    for i in 0..400 {
        server.say(&format!(":irc.test NOTICE bot :notice {}", i)).await;
    }
    server.say("PING :abc123").await;
    server.expect("PONG: abc123").await;
}

#[tokio::test]
async fn test_quit_and_server_close() {
    let (mut client, mut server) = start("bot", &[]).await;
    server.expect("NICK bot").await;
    server.expect("USER bot 0 * : Integration Bot").await;

    client.handle().quit(Some("bye".into())).unwrap();
    server.expect("QUIT :bye").await;

    let mut last = None;
    while let Ok(Some(event)) = timeout(STEP, client.next_event()).await {
        last = Some(event);
    }
    assert_eq!(last, Some(Event::Close));
    assert!(client.handle().privmsg("#x", "late").is_err());
}

#[tokio::test]
async fn test_connect_failure_reports_error_then_close() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut client = Client::spawn(ClientConfig::new("127.0.0.1", "bot").with_port(port)).unwrap();

    assert!(matches!(
        next_domain(&mut client).await,
        Event::Error(EventError::Transport(_))
    ));
    assert_eq!(next_domain(&mut client).await, Event::Close);
}
