//! Split raw arguments into declared flags and encoder pass-through.
//!
//! Any token that is not one of the declared flags (or the value of one)
//! is forwarded verbatim, in order, to the encoder as a global option.
//! The flag schema is read from the clap definition itself.

use std::collections::HashMap;

use clap::Command;

/// Arguments after splitting.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitArgs {
    /// Tokens for clap, without the program name.
    pub recognized: Vec<String>,
    /// Tokens for the encoder.
    pub passthrough: Vec<String>,
}

/// Declared flags and whether each takes a value.
struct FlagSchema {
    longs: HashMap<String, bool>,
    shorts: HashMap<char, bool>,
}

impl FlagSchema {
    fn from_command(command: &Command) -> Self {
        let mut longs = HashMap::new();
        let mut shorts = HashMap::new();
        for arg in command.get_arguments() {
            let takes_value = arg.get_action().takes_values();
            if let Some(long) = arg.get_long() {
                longs.insert(long.to_string(), takes_value);
            }
            if let Some(short) = arg.get_short() {
                shorts.insert(short, takes_value);
            }
        }
        // clap only materializes these once the command is built.
        longs.entry("help".to_string()).or_insert(false);
        longs.entry("version".to_string()).or_insert(false);
        shorts.entry('h').or_insert(false);
        shorts.entry('V').or_insert(false);
        Self { longs, shorts }
    }

    /// `Some(takes_value)` when `token` names a declared flag.
    fn lookup(&self, token: &str) -> Option<bool> {
        if let Some(long) = token.strip_prefix("--") {
            return match long.split_once('=') {
                // Inline value, nothing more to consume.
                Some((name, _)) => self.longs.get(name).map(|_| false),
                None => self.longs.get(long).copied(),
            };
        }
        let mut chars = token.strip_prefix('-')?.chars();
        match (chars.next(), chars.next()) {
            (Some(short), None) => self.shorts.get(&short).copied(),
            _ => None,
        }
    }
}

/// Split `args` (program name excluded) against the flags of `command`.
///
/// Everything after a bare `--` is pass-through.
pub fn split_known_args<I>(command: &Command, args: I) -> SplitArgs
where
    I: IntoIterator<Item = String>,
{
    let schema = FlagSchema::from_command(command);
    let mut split = SplitArgs::default();
    let mut args = args.into_iter();

    while let Some(token) = args.next() {
        if token == "--" {
            split.passthrough.extend(args.by_ref());
            break;
        }
        match schema.lookup(&token) {
            Some(takes_value) => {
                split.recognized.push(token);
                if takes_value {
                    if let Some(value) = args.next() {
                        split.recognized.push(value);
                    }
                }
            }
            None => split.passthrough.push(token),
        }
    }

    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use clap::CommandFactory;

    fn split(args: &[&str]) -> SplitArgs {
        let command = Cli::command();
        split_known_args(&command, args.iter().map(|s| s.to_string()))
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_declared() {
        let args = [
            "--sentry-dir",
            "/media/TeslaCam/SentryClips",
            "--scale",
            "4",
            "--dry-run",
        ];
        let s = split(&args);
        assert_eq!(s.recognized, strings(&args));
        assert!(s.passthrough.is_empty());
    }

    #[test]
    fn test_unknown_tokens_pass_through_in_order() {
        let s = split(&[
            "-hide_banner",
            "--speed",
            "8",
            "-loglevel",
            "error",
            "--overwrite",
            "-threads",
            "2",
        ]);
        assert_eq!(s.recognized, strings(&["--speed", "8", "--overwrite"]));
        assert_eq!(
            s.passthrough,
            strings(&["-hide_banner", "-loglevel", "error", "-threads", "2"])
        );
    }

    #[test]
    fn test_flag_values_are_not_passed_through() {
        let s = split(&["--quality", "-hwaccel"]);
        assert_eq!(s.recognized, strings(&["--quality", "-hwaccel"]));
        assert!(s.passthrough.is_empty());
    }

    #[test]
    fn test_inline_values() {
        let s = split(&["--scale=2", "--speed=16", "-vsync", "0"]);
        assert_eq!(s.recognized, strings(&["--scale=2", "--speed=16"]));
        assert_eq!(s.passthrough, strings(&["-vsync", "0"]));
    }

    #[test]
    fn test_unknown_long_flag_with_inline_value() {
        let s = split(&["--bogus=1"]);
        assert!(s.recognized.is_empty());
        assert_eq!(s.passthrough, strings(&["--bogus=1"]));
    }

    #[test]
    fn test_double_dash_forwards_rest() {
        let s = split(&["--dry-run", "--", "--scale", "2"]);
        assert_eq!(s.recognized, strings(&["--dry-run"]));
        assert_eq!(s.passthrough, strings(&["--scale", "2"]));
    }

    #[test]
    fn test_encoder_short_flags_are_not_ours() {
        let s = split(&["-v", "error", "-y"]);
        assert!(s.recognized.is_empty());
        assert_eq!(s.passthrough, strings(&["-v", "error", "-y"]));
    }

    #[test]
    fn test_help_is_recognized() {
        assert_eq!(split(&["-h"]).recognized, strings(&["-h"]));
        assert_eq!(split(&["--version"]).recognized, strings(&["--version"]));
    }
}
