//! Prompt commands. Post positions are 1-based, as rendered.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Post(String),
    Like(usize),
    Delete(usize),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("there is no post #{0}")]
    NoSuchPost(usize),
    #[error("you can only delete your own posts")]
    NotAuthor,
    #[error("nothing to post")]
    NothingToPost,
}

pub const HELP: &str = "\
commands:
  post <text>   publish a new post (bare `post` retries a kept draft)
  like <n>      like or unlike post #n
  delete <n>    delete post #n (your own posts only)
  show          print the feed again
  help          show this help
  quit          leave";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match word {
            "post" => Ok(Command::Post(rest.to_string())),
            "like" => position(rest, "like <n>").map(Command::Like),
            "delete" => position(rest, "delete <n>").map(Command::Delete),
            "" | "show" => Ok(Command::Show),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn position(arg: &str, usage: &'static str) -> Result<usize, CommandError> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::Usage(usage)),
    }
}
