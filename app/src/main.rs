use std::error::Error;
use std::io::{self, BufRead, Write};

use feed_app::command::HELP;
use feed_app::render::render;
use feed_app::{Command, Config, Session};
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    config.init_logger();

    let viewer = config.viewer();
    info!("connecting to {} as {}", config.base_url(), viewer.name());
    let mut session = Session::new(config.base_url(), viewer);
    session.load();
    print!("{}", render(session.feed()));
    println!("type `help` for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let command = match Command::parse(&line?) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        let result = match command {
            Command::Post(text) => session.submit(&text).map(|_| ()),
            Command::Like(position) => session.toggle_like(position),
            Command::Delete(position) => session.delete(position).map(|_| ()),
            Command::Show => Ok(()),
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        };
        if let Err(e) = result {
            println!("{e}");
            continue;
        }
        print!("{}", render(session.feed()));
    }
    Ok(())
}
