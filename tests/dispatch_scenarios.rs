//! RFC 1459/2812 shaped session transcripts run through the dispatcher.
//!
//! Each scenario feeds real-looking server lines and checks only the
//! domain events (the two raw events every line produces are filtered out).
//!
//! Run with: `cargo test --test dispatch_scenarios`

use slirc_client::{
    dispatch, Action, DispatchContext, Event, NameEntry, OutboundCommand, ParsedMessage,
    ServerError,
};

fn run(nick: &str, lines: &[&str]) -> (Vec<Event>, Vec<OutboundCommand>) {
    let ctx = DispatchContext::new(nick);
    let mut events = Vec::new();
    let mut replies = Vec::new();

    for line in lines {
        let msg = ParsedMessage::parse(line).expect("scenario lines are well formed");
        for action in dispatch(&msg, &ctx) {
            match action {
                Action::Emit(event) if !event.is_raw() => events.push(event),
                Action::Emit(_) => {}
                Action::Send(cmd) => replies.push(cmd),
            }
        }
    }

    (events, replies)
}

mod registration {
    use super::*;

    #[test]
    fn test_welcome_burst() {
        let (events, replies) = run(
            "bot",
            &[
                ":irc.example.net NOTICE * :*** Looking up your hostname...",
                ":irc.example.net 001 bot :Welcome to the ExampleNet IRC Network bot!bot@host",
                ":irc.example.net 002 bot :Your host is irc.example.net",
                ":irc.example.net 005 bot CHANTYPES=# PREFIX=(ov)@+ :are supported by this server",
                ":irc.example.net 375 bot :- irc.example.net Message of the day -",
                ":irc.example.net 376 bot :End of /MOTD command.",
            ],
        );

        assert_eq!(
            events,
            vec![
                Event::Notice {
                    message: "*** Looking up your hostname...".into()
                },
                Event::Welcome,
            ]
        );
        assert!(replies.is_empty());
    }

    #[test]
    fn test_nick_in_use() {
        let (events, _) = run(
            "bot",
            &[":irc.example.net 433 * bot :Nickname is already in use"],
        );

        assert_eq!(
            events,
            vec![Event::IrcError {
                error: ServerError {
                    code: 433,
                    message: "Nickname is already in use".into(),
                }
            }]
        );
    }

    #[test]
    fn test_keepalive_ping() {
        let (events, replies) = run("bot", &["PING :abc123", "PING irc.example.net"]);

        assert!(events.is_empty());
        assert_eq!(
            replies,
            vec![
                OutboundCommand::pong("abc123"),
                OutboundCommand::pong("irc.example.net"),
            ]
        );
        assert_eq!(replies[0].to_string(), "PONG: abc123");
    }
}

mod channels {
    use super::*;

    #[test]
    fn test_self_join_burst() {
        let (events, _) = run(
            "bot",
            &[
                ":bot!~bot@host.example JOIN :#rust",
                ":irc.example.net 332 bot #rust :Rust programming | be nice",
                ":irc.example.net 353 bot = #rust :@ferris +bors bot",
                ":irc.example.net 366 bot #rust :End of /NAMES list.",
            ],
        );

        assert_eq!(
            events,
            vec![
                Event::Join {
                    channel: "#rust".into()
                },
                Event::ChannelJoin {
                    channel: "#rust".into(),
                    nick: "bot".into()
                },
                Event::ChannelTopic {
                    channel: "#rust".into(),
                    topic: Some("Rust programming | be nice".into())
                },
                Event::ChannelList {
                    channel: "#rust".into(),
                    names: vec![
                        NameEntry {
                            nick: "ferris".into(),
                            operator: true,
                            voice: false
                        },
                        NameEntry {
                            nick: "bors".into(),
                            operator: false,
                            voice: true
                        },
                        NameEntry {
                            nick: "bot".into(),
                            operator: false,
                            voice: false
                        },
                    ]
                },
            ]
        );
    }

    #[test]
    fn test_join_without_topic() {
        let (events, _) = run(
            "bot",
            &[
                ":bot!~bot@host JOIN #quiet",
                ":irc.example.net 331 bot #quiet :No topic is set",
            ],
        );

        assert_eq!(
            events.last(),
            Some(&Event::ChannelTopic {
                channel: "#quiet".into(),
                topic: None
            })
        );
    }

    #[test]
    fn test_other_users_come_and_go() {
        let (events, _) = run(
            "bot",
            &[
                ":alice!al@example.com JOIN #rust",
                ":alice!al@example.com MODE #rust +v alice",
                ":irc.example.net MODE #rust +o alice",
                ":alice!al@example.com TOPIC #rust :new topic",
                ":alice!al@example.com NICK :alicia",
                ":alicia!al@example.com PART #rust :bye",
                ":alicia!al@example.com QUIT :Client Quit",
            ],
        );

        assert_eq!(
            events,
            vec![
                Event::ChannelJoin {
                    channel: "#rust".into(),
                    nick: "alice".into()
                },
                Event::ChannelModeChange {
                    channel: "#rust".into(),
                    mode: "+v".into(),
                    nick: "alice".into()
                },
                Event::ChannelModeChange {
                    channel: "#rust".into(),
                    mode: "+o".into(),
                    nick: "alice".into()
                },
                Event::ChannelTopic {
                    channel: "#rust".into(),
                    topic: Some("new topic".into())
                },
                Event::NickChange {
                    old_nick: "alice".into(),
                    new_nick: "alicia".into()
                },
                Event::ChannelLeave {
                    channel: "#rust".into(),
                    nick: "alicia".into()
                },
                Event::Quit {
                    nick: "alicia".into()
                },
            ]
        );
    }

    #[test]
    fn test_channel_mode_without_target_is_ignored() {
        let (events, _) = run("bot", &[":op!o@h MODE #rust +m", ":op!o@h MODE bot +i"]);
        assert!(events.is_empty());
    }
}

mod messages {
    use super::*;

    #[test]
    fn test_private_and_channel_messages() {
        let (events, _) = run(
            "Bot",
            &[
                ":alice!al@example.com PRIVMSG bot :hello",
                ":alice!al@example.com PRIVMSG #rust :hi all",
                ":irc.example.net NOTICE Bot :Server restarting",
            ],
        );

        assert_eq!(
            events,
            vec![
                Event::PrivMsg {
                    nick: "alice".into(),
                    message: "hello".into()
                },
                Event::Message {
                    nick: "alice".into(),
                    message: "hi all".into(),
                    channel: "#rust".into()
                },
                Event::Notice {
                    message: "Server restarting".into()
                },
            ]
        );
    }

    #[test]
    fn test_server_prefix_has_no_sender() {
        let (events, _) = run("bot", &[":irc.example.net PRIVMSG bot :from the server"]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_unknown_commands_only_raw() {
        let ctx = DispatchContext::new("bot");
        let msg = ParsedMessage::parse(":alice!al@example.com INVITE bot #secret").unwrap();
        let actions = dispatch(&msg, &ctx);

        assert_eq!(actions.len(), 2);
        assert!(slirc_client::events(&actions).all(Event::is_raw));
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_error_range_bounds() {
        let (events, _) = run(
            "bot",
            &[
                ":s 399 bot :not an error",
                ":s 400 bot :lower bound",
                ":s 600 bot :upper bound",
                ":s 601 bot :out of range",
            ],
        );

        let codes: Vec<u16> = events
            .iter()
            .filter_map(|e| match e {
                Event::IrcError { error } => Some(error.code),
                _ => None,
            })
            .collect();
        assert_eq!(codes, vec![400, 600]);
    }

    #[test]
    fn test_error_text_carries_code() {
        let (events, _) = run("bot", &[":s 403 bot #nope :No such channel"]);
        match events.as_slice() {
            [Event::IrcError { error }] => {
                let text = error.to_string();
                assert!(text.contains("403"));
                assert!(text.contains("No such channel"));
            }
            other => panic!("expected one IrcError, got {:?}", other),
        }
    }
}
