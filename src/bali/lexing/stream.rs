//! Threaded token producer
//!
//! [`scan`] runs a [`Scanner`] on its own thread and hands tokens to the caller through a
//! bounded channel. The consumer blocks while the queue is empty and the producer blocks
//! while it is full. The stream ends when the producer drops its sender, either because
//! the source is exhausted or because an `Error` token was sent.
//!
//! If the consumer goes away early, the next `send` fails and the producer returns.

use super::scanner::Scanner;
use crate::bali::token::Token;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Default number of tokens buffered between the scanner thread and its consumer.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Receiving end of a scanner thread.
#[derive(Debug)]
pub struct TokenStream {
    receiver: Receiver<Token>,
}

impl TokenStream {
    /// Start scanning `source` on a new thread with a queue of `capacity` tokens.
    pub fn spawn(source: String, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        thread::spawn(move || {
            let mut sent = 0usize;
            for token in Scanner::new(&source) {
                if sender.send(token).is_err() {
                    log::debug!("scanner thread stopped: consumer hung up after {sent} tokens");
                    return;
                }
                sent += 1;
            }
            log::debug!("scanner thread finished after {sent} tokens");
        });
        Self { receiver }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.receiver.recv().ok()
    }
}

/// Scan `source` concurrently using the default queue capacity.
pub fn scan(source: &str) -> TokenStream {
    TokenStream::spawn(source.to_string(), DEFAULT_QUEUE_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bali::token::TokenKind;

    #[test]
    fn stream_matches_inline_scanner() {
        let source = "{\n    let x := [1, 2, 3]\n    return x\n}";
        let threaded: Vec<Token> = scan(source).collect();
        let inline: Vec<Token> = Scanner::new(source).collect();
        assert_eq!(threaded, inline);
    }

    #[test]
    fn small_queue_still_delivers_everything() {
        let source = "[".to_string() + &"1, ".repeat(200) + "1]";
        let tokens: Vec<Token> = TokenStream::spawn(source.clone(), 1).collect();
        assert_eq!(tokens.len(), Scanner::new(&source).count());
    }

    #[test]
    fn error_token_closes_the_stream() {
        let tokens: Vec<Token> = scan("x ? y").collect();
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Error));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn dropping_the_stream_early_is_harmless() {
        let source = "1 ".repeat(1_000);
        let mut stream = TokenStream::spawn(source, 2);
        assert!(stream.next().is_some());
        drop(stream);
    }
}
