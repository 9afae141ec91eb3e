//! Interactive console loop
//!
//! Reads operator lines, forwards commands through the executor and writes one
//! reply line per command. Generic over reader and writer so sessions can be
//! replayed from memory.

use crate::command::{parse_line, CommandExecutor, ConsoleInput};
use anyhow::Result;
use dronectl_shared::CommandHandler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  S            start the drone
  R            restart (clears the boundary)
  D            shut down
  T            toggle lights
  F            flash lights
  H            go home
  A secs       sound the horn for secs seconds
  B x y        set the max boundary corner
  P x y        set the initial (home) position
  M secs deg   move for secs seconds heading deg (0, 90, 180, 270)
  ?            this help
  Q            quit";

/// Run a session until `Q` or end of input
pub async fn run<R, W, H>(
    reader: R,
    writer: &mut W,
    prompt: &str,
    executor: &CommandExecutor<H>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    H: CommandHandler,
{
    let mut lines = reader.lines();

    loop {
        writer.write_all(prompt.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        let reply = match parse_line(&line) {
            Ok(ConsoleInput::Empty) => continue,
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Help) => HELP.to_string(),
            Ok(ConsoleInput::Command { name, args }) => {
                executor.execute(&name, &args).await.message().to_string()
            }
            Err(e) => {
                warn!("Unparseable input {:?}: {}", line, e);
                e.to_string()
            }
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    Ok(())
}
