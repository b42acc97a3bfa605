//! Command parser for the console
//!
//! Parses user intents like "more", "like 2", "post hello world".

use crate::domain::entities::PostVariant;
use crate::error::ParseError;

/// Intents a user can express at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    /// Load the first page, replacing the feed
    Load,

    /// Pull-to-refresh
    Refresh,

    /// Load the next page
    More,

    /// Toggle the like on the post at a 0-based feed index
    Like { post_index: usize },

    /// Create a post
    Post {
        variant: PostVariant,
        content: String,
        media_url: Option<String>,
    },

    /// Print the loaded posts as JSON
    Export,

    Help,

    Quit,
}

/// Parse a command from a line of input
pub fn parse_command(input: &str) -> Result<FeedCommand, ParseError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ParseError::UnknownCommand("empty input".to_string()));
    }

    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (input.to_lowercase(), ""),
    };

    match command.as_str() {
        "load" | "reload" | "init" => Ok(FeedCommand::Load),

        "refresh" | "r" => Ok(FeedCommand::Refresh),

        "more" | "m" | "next" | "scroll" => Ok(FeedCommand::More),

        "like" | "unlike" | "l" => {
            let Some(arg) = rest.split_whitespace().next() else {
                return Err(ParseError::MissingArgument("like".to_string()));
            };
            let index: usize = arg.trim_start_matches('#').parse().map_err(|_| {
                ParseError::InvalidArgument(format!("'{}' is not a valid number", arg))
            })?;
            if index == 0 {
                return Err(ParseError::InvalidArgument(
                    "index must be 1 or greater".to_string(),
                ));
            }
            Ok(FeedCommand::Like {
                post_index: index - 1,
            })
        }

        "post" | "say" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("post".to_string()));
            }
            Ok(FeedCommand::Post {
                variant: PostVariant::Text,
                content: rest.to_string(),
                media_url: None,
            })
        }

        "image" | "video" => {
            let (url, caption) = split_first_word(rest)
                .ok_or_else(|| ParseError::MissingArgument(command.clone()))?;
            if caption.is_empty() {
                return Err(ParseError::MissingArgument(format!("{} caption", command)));
            }
            Ok(FeedCommand::Post {
                variant: PostVariant::from(command.as_str()),
                content: caption.to_string(),
                media_url: Some(url.to_string()),
            })
        }

        "custom" => {
            let (tag, content) = split_first_word(rest)
                .ok_or_else(|| ParseError::MissingArgument("custom".to_string()))?;
            if content.is_empty() {
                return Err(ParseError::MissingArgument("custom content".to_string()));
            }
            Ok(FeedCommand::Post {
                variant: PostVariant::from(tag),
                content: content.to_string(),
                media_url: None,
            })
        }

        "export" | "json" => Ok(FeedCommand::Export),

        "help" | "h" | "?" => Ok(FeedCommand::Help),

        "quit" | "exit" | "q" => Ok(FeedCommand::Quit),

        _ => Err(ParseError::UnknownCommand(command.clone())),
    }
}

fn split_first_word(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() {
        return None;
    }
    Some(match s.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (s, ""),
    })
}

/// Get help text listing all commands
pub fn help_text() -> String {
    r#"# Commands

- `load` - Load the first page of the feed
- `refresh` - Refresh the feed from the top
- `more` - Load the next page
- `like N` - Like or unlike post N
- `post <text>` - Create a text post
- `image <url> <caption>` - Create an image post
- `video <url> <caption>` - Create a video post
- `custom <tag> <text>` - Create a post with a custom type
- `export` - Print the loaded posts as JSON
- `help` - Show this help
- `quit` - Exit
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("load").unwrap(), FeedCommand::Load);
        assert_eq!(parse_command("refresh").unwrap(), FeedCommand::Refresh);
        assert_eq!(parse_command("  R ").unwrap(), FeedCommand::Refresh);
        assert_eq!(parse_command("more").unwrap(), FeedCommand::More);
        assert_eq!(parse_command("scroll").unwrap(), FeedCommand::More);
        assert_eq!(parse_command("export").unwrap(), FeedCommand::Export);
        assert_eq!(parse_command("help").unwrap(), FeedCommand::Help);
        assert_eq!(parse_command("q").unwrap(), FeedCommand::Quit);
    }

    #[test]
    fn test_parse_like() {
        assert_eq!(
            parse_command("like 1").unwrap(),
            FeedCommand::Like { post_index: 0 }
        );
        assert_eq!(
            parse_command("like #12").unwrap(),
            FeedCommand::Like { post_index: 11 }
        );
        assert_eq!(
            parse_command("unlike 3").unwrap(),
            FeedCommand::Like { post_index: 2 }
        );
    }

    #[test]
    fn test_parse_post() {
        assert_eq!(
            parse_command("post hello   world").unwrap(),
            FeedCommand::Post {
                variant: PostVariant::Text,
                content: "hello   world".to_string(),
                media_url: None,
            }
        );
    }

    #[test]
    fn test_parse_media_posts() {
        assert_eq!(
            parse_command("image https://example.com/sunset.jpg Check out this sunset!").unwrap(),
            FeedCommand::Post {
                variant: PostVariant::Image,
                content: "Check out this sunset!".to_string(),
                media_url: Some("https://example.com/sunset.jpg".to_string()),
            }
        );
        assert_eq!(
            parse_command("VIDEO clip.mp4 watch").unwrap(),
            FeedCommand::Post {
                variant: PostVariant::Video,
                content: "watch".to_string(),
                media_url: Some("clip.mp4".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_custom_post() {
        assert_eq!(
            parse_command("custom poll Tabs or spaces?").unwrap(),
            FeedCommand::Post {
                variant: PostVariant::Custom("poll".to_string()),
                content: "Tabs or spaces?".to_string(),
                media_url: None,
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("like").is_err()); // Missing argument
        assert!(parse_command("like abc").is_err()); // Invalid number
        assert!(parse_command("like 0").is_err()); // Zero index
        assert!(parse_command("post").is_err()); // Missing text
        assert!(parse_command("image").is_err()); // Missing url
        assert!(parse_command("image url.jpg").is_err()); // Missing caption
        assert!(parse_command("custom poll").is_err()); // Missing content
        assert!(parse_command("foobar").is_err()); // Unknown command
    }

    #[test]
    fn test_help_lists_commands() {
        let help = help_text();

        for command in ["`load`", "`refresh`", "`more`", "`like N`", "`post <text>`", "`quit`"] {
            assert!(help.contains(command), "missing {}", command);
        }
    }
}
