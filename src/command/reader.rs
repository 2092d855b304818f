//! Command sources: a blocking iterator and an async producer task.
//!
//! The producer hands commands over one at a time. Each [`Handoff`] carries an
//! acknowledgement the consumer completes once the command has been applied;
//! the producer does not assemble the next command before that. Dropping the
//! feed stops the producer.

use std::collections::VecDeque;
use std::io::{self, Read};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::assembler::CommandParser;
use super::model::Command;

/// Bytes requested from the input per read.
const CHUNK_SIZE: usize = 4096;

// ---------------------------------------------------------------------------
// CommandReader
// ---------------------------------------------------------------------------

/// Blocking reader yielding commands as their lines complete.
///
/// End of input flushes the last command and ends the iteration.
pub struct CommandReader<R> {
    input: R,
    parser: CommandParser,
    pending: VecDeque<Command>,
    done: bool,
}

impl<R: Read> CommandReader<R> {
    pub fn new(input: R, buffer_size: usize) -> Self {
        Self {
            input,
            parser: CommandParser::new(buffer_size),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<R: Read> Iterator for CommandReader<R> {
    type Item = io::Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            if let Some(command) = self.pending.pop_front() {
                return Some(Ok(command));
            }
            if self.done {
                return None;
            }
            match self.input.read(&mut chunk) {
                Ok(0) => {
                    self.done = true;
                    self.pending.extend(self.parser.finish());
                }
                Ok(n) => self.pending.extend(self.parser.feed(&chunk[..n])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Producer task
// ---------------------------------------------------------------------------

/// One command in flight between producer and consumer.
#[derive(Debug)]
pub struct Handoff {
    command: Command,
    done: oneshot::Sender<()>,
}

impl Handoff {
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Release the producer to assemble the next command.
    pub fn complete(self) {
        let _ = self.done.send(());
    }
}

/// Consumer side of the producer task.
pub struct CommandFeed {
    receiver: mpsc::Receiver<Handoff>,
    producer: JoinHandle<io::Result<()>>,
}

impl CommandFeed {
    /// Wait for the next command. `None` once the input is exhausted.
    pub async fn recv(&mut self) -> Option<Handoff> {
        self.receiver.recv().await
    }

    /// Stop the producer without waiting for it, e.g. while it is blocked
    /// on input that may never arrive.
    pub fn abort(self) {
        self.producer.abort();
    }

    /// Stop listening and collect the producer's result.
    pub async fn finish(self) -> io::Result<()> {
        let CommandFeed { receiver, producer } = self;
        drop(receiver);
        match producer.await {
            Ok(result) => result,
            Err(err) => Err(io::Error::other(err)),
        }
    }
}

/// Spawn a producer task reading commands from `input`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_reader<I>(input: I, buffer_size: usize) -> CommandFeed
where
    I: AsyncRead + Unpin + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(1);
    let producer = tokio::spawn(produce(input, buffer_size, sender));
    CommandFeed { receiver, producer }
}

async fn produce<I>(mut input: I, buffer_size: usize, sender: mpsc::Sender<Handoff>) -> io::Result<()>
where
    I: AsyncRead + Unpin,
{
    let mut parser = CommandParser::new(buffer_size);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let n = input.read(&mut chunk).await?;
        let commands = if n == 0 {
            parser.finish()
        } else {
            parser.feed(&chunk[..n])
        };
        for command in commands {
            let (done, acknowledged) = oneshot::channel();
            if sender.send(Handoff { command, done }).await.is_err() {
                tracing::debug!("consumer gone, producer stopping");
                return Ok(());
            }
            // A dropped acknowledgement counts as completion.
            let _ = acknowledged.await;
        }
        if n == 0 {
            tracing::debug!("end of input");
            return Ok(());
        }
    }
}
