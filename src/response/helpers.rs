//! Helper methods and trait implementations for numeric replies.

use std::ops::RangeInclusive;

use super::Response;

/// Numerics the dispatcher reports as server errors.
pub const ERROR_CODES: RangeInclusive<u16> = 400..=600;

/// Check whether a numeric falls in the error range.
#[inline]
pub fn is_error_code(code: u16) -> bool {
    ERROR_CODES.contains(&code)
}

impl Response {
    /// Returns the numeric code as u16
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Creates a Response from a numeric code
    pub fn from_code(code: u16) -> Option<Response> {
        use Response::*;

        Some(match code {
            1 => RPL_WELCOME,
            2 => RPL_YOURHOST,
            3 => RPL_CREATED,
            4 => RPL_MYINFO,
            5 => RPL_BOUNCE,
            331 => RPL_NOTOPIC,
            332 => RPL_TOPIC,
            353 => RPL_NAMREPLY,
            366 => RPL_ENDOFNAMES,
            372 => RPL_MOTD,
            375 => RPL_MOTDSTART,
            376 => RPL_ENDOFMOTD,
            401 => ERR_NOSUCHNICK,
            402 => ERR_NOSUCHSERVER,
            403 => ERR_NOSUCHCHANNEL,
            404 => ERR_CANNOTSENDTOCHAN,
            405 => ERR_TOOMANYCHANNELS,
            411 => ERR_NORECIPIENT,
            412 => ERR_NOTEXTTOSEND,
            421 => ERR_UNKNOWNCOMMAND,
            422 => ERR_NOMOTD,
            431 => ERR_NONICKNAMEGIVEN,
            432 => ERR_ERRONEUSNICKNAME,
            433 => ERR_NICKNAMEINUSE,
            436 => ERR_NICKCOLLISION,
            441 => ERR_USERNOTINCHANNEL,
            442 => ERR_NOTONCHANNEL,
            443 => ERR_USERONCHANNEL,
            451 => ERR_NOTREGISTERED,
            461 => ERR_NEEDMOREPARAMS,
            462 => ERR_ALREADYREGISTRED,
            464 => ERR_PASSWDMISMATCH,
            465 => ERR_YOUREBANNEDCREEP,
            471 => ERR_CHANNELISFULL,
            472 => ERR_UNKNOWNMODE,
            473 => ERR_INVITEONLYCHAN,
            474 => ERR_BANNEDFROMCHAN,
            475 => ERR_BADCHANNELKEY,
            481 => ERR_NOPRIVILEGES,
            482 => ERR_CHANOPRIVSNEEDED,
            501 => ERR_UMODEUNKNOWNFLAG,
            502 => ERR_USERSDONTMATCH,
            _ => return None,
        })
    }

    /// The symbolic name, e.g. `ERR_NICKNAMEINUSE`.
    pub fn name(&self) -> &'static str {
        use Response::*;

        match self {
            RPL_WELCOME => "RPL_WELCOME",
            RPL_YOURHOST => "RPL_YOURHOST",
            RPL_CREATED => "RPL_CREATED",
            RPL_MYINFO => "RPL_MYINFO",
            RPL_BOUNCE => "RPL_BOUNCE",
            RPL_NOTOPIC => "RPL_NOTOPIC",
            RPL_TOPIC => "RPL_TOPIC",
            RPL_NAMREPLY => "RPL_NAMREPLY",
            RPL_ENDOFNAMES => "RPL_ENDOFNAMES",
            RPL_MOTD => "RPL_MOTD",
            RPL_MOTDSTART => "RPL_MOTDSTART",
            RPL_ENDOFMOTD => "RPL_ENDOFMOTD",
            ERR_NOSUCHNICK => "ERR_NOSUCHNICK",
            ERR_NOSUCHSERVER => "ERR_NOSUCHSERVER",
            ERR_NOSUCHCHANNEL => "ERR_NOSUCHCHANNEL",
            ERR_CANNOTSENDTOCHAN => "ERR_CANNOTSENDTOCHAN",
            ERR_TOOMANYCHANNELS => "ERR_TOOMANYCHANNELS",
            ERR_NORECIPIENT => "ERR_NORECIPIENT",
            ERR_NOTEXTTOSEND => "ERR_NOTEXTTOSEND",
            ERR_UNKNOWNCOMMAND => "ERR_UNKNOWNCOMMAND",
            ERR_NOMOTD => "ERR_NOMOTD",
            ERR_NONICKNAMEGIVEN => "ERR_NONICKNAMEGIVEN",
            ERR_ERRONEUSNICKNAME => "ERR_ERRONEUSNICKNAME",
            ERR_NICKNAMEINUSE => "ERR_NICKNAMEINUSE",
            ERR_NICKCOLLISION => "ERR_NICKCOLLISION",
            ERR_USERNOTINCHANNEL => "ERR_USERNOTINCHANNEL",
            ERR_NOTONCHANNEL => "ERR_NOTONCHANNEL",
            ERR_USERONCHANNEL => "ERR_USERONCHANNEL",
            ERR_NOTREGISTERED => "ERR_NOTREGISTERED",
            ERR_NEEDMOREPARAMS => "ERR_NEEDMOREPARAMS",
            ERR_ALREADYREGISTRED => "ERR_ALREADYREGISTRED",
            ERR_PASSWDMISMATCH => "ERR_PASSWDMISMATCH",
            ERR_YOUREBANNEDCREEP => "ERR_YOUREBANNEDCREEP",
            ERR_CHANNELISFULL => "ERR_CHANNELISFULL",
            ERR_UNKNOWNMODE => "ERR_UNKNOWNMODE",
            ERR_INVITEONLYCHAN => "ERR_INVITEONLYCHAN",
            ERR_BANNEDFROMCHAN => "ERR_BANNEDFROMCHAN",
            ERR_BADCHANNELKEY => "ERR_BADCHANNELKEY",
            ERR_NOPRIVILEGES => "ERR_NOPRIVILEGES",
            ERR_CHANOPRIVSNEEDED => "ERR_CHANOPRIVSNEEDED",
            ERR_UMODEUNKNOWNFLAG => "ERR_UMODEUNKNOWNFLAG",
            ERR_USERSDONTMATCH => "ERR_USERSDONTMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_code() {
        assert_eq!(Response::RPL_WELCOME.code(), 1);
        assert_eq!(Response::ERR_NICKNAMEINUSE.code(), 433);
        assert_eq!(Response::RPL_NAMREPLY.code(), 353);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Response::from_code(1), Some(Response::RPL_WELCOME));
        assert_eq!(Response::from_code(433), Some(Response::ERR_NICKNAMEINUSE));
        assert_eq!(Response::from_code(999), None);
    }

    #[test]
    fn test_from_code_round_trips_every_name() {
        for code in 0..=999 {
            if let Some(resp) = Response::from_code(code) {
                assert_eq!(resp.code(), code);
                assert!(!resp.name().is_empty());
            }
        }
    }

    #[test]
    fn test_error_range_is_inclusive() {
        assert!(!is_error_code(399));
        assert!(is_error_code(400));
        assert!(is_error_code(433));
        assert!(is_error_code(600));
        assert!(!is_error_code(601));
        assert!(is_error_code(Response::ERR_NICKNAMEINUSE.code()));
        assert!(!is_error_code(Response::RPL_TOPIC.code()));
    }

    #[test]
    fn test_name() {
        assert_eq!(Response::ERR_NICKNAMEINUSE.name(), "ERR_NICKNAMEINUSE");
        assert_eq!(Response::RPL_NAMREPLY.name(), "RPL_NAMREPLY");
    }
}
