//! # Interactive Shell
//!
//! Line-driven event loop: each input line is parsed into an [`Action`],
//! dispatched to its command handler, and the response is rendered.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► Action::from_str ──► Shell::execute ──► render ──► out │
//! │                      │                     │                           │
//! │                  parse error           ApiError                        │
//! │                      └──────────┬──────────┘                           │
//! │                                 ▼                                       │
//! │                       one-line message, loop continues                 │
//! │                                                                         │
//! │  Each line is fully handled (cart saves included) before the next     │
//! │  one is read.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::commands::{cart, modal, product};
use crate::render;
use crate::state::AppState;

// =============================================================================
// Actions
// =============================================================================

/// One user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Show,
    Search(String),
    Category(String),
    Categories,
    Sort(String),
    More,
    Add(String),
    Increment(String),
    Decrement(String),
    Clear,
    Cart,
    Open(String),
    Wheel(f64),
    Move { x: f64, y: f64 },
    Click,
    Close,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("Unknown command '{0}'. Type `help` for the list of commands.")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("`{command}`: '{value}' is not a number")]
    InvalidNumber { command: &'static str, value: String },
}

fn required(command: &'static str, argument: &'static str, rest: &str) -> Result<String, ActionParseError> {
    if rest.is_empty() {
        Err(ActionParseError::MissingArgument { command, argument })
    } else {
        Ok(rest.to_string())
    }
}

fn number(command: &'static str, value: &str) -> Result<f64, ActionParseError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ActionParseError::InvalidNumber {
            command,
            value: value.to_string(),
        })
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Parses `<command> [arguments]`. Commands are case-insensitive; the
    /// search text keeps its case.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_ascii_lowercase().as_str() {
            "show" | "grid" => Ok(Action::Show),
            "search" => Ok(Action::Search(rest.to_string())),
            "category" => required("category", "a category name or `all`", rest).map(Action::Category),
            "categories" => Ok(Action::Categories),
            "sort" => required("sort", "none, low-high or high-low", rest).map(Action::Sort),
            "more" => Ok(Action::More),
            "add" => required("add", "a product id", rest).map(Action::Add),
            "inc" | "+" => required("inc", "a product id", rest).map(Action::Increment),
            "dec" | "-" => required("dec", "a product id", rest).map(Action::Decrement),
            "clear" => Ok(Action::Clear),
            "cart" => Ok(Action::Cart),
            "open" => required("open", "a product id", rest).map(Action::Open),
            "wheel" => {
                let delta = required("wheel", "a delta", rest)?;
                number("wheel", &delta).map(Action::Wheel)
            }
            "move" => {
                let mut coords = rest.split_whitespace();
                match (coords.next(), coords.next()) {
                    (Some(x), Some(y)) => Ok(Action::Move {
                        x: number("move", x)?,
                        y: number("move", y)?,
                    }),
                    _ => Err(ActionParseError::MissingArgument {
                        command: "move",
                        argument: "x and y",
                    }),
                }
            }
            "click" => Ok(Action::Click),
            "close" => Ok(Action::Close),
            "help" | "?" => Ok(Action::Help),
            "quit" | "exit" => Ok(Action::Quit),
            other => Err(ActionParseError::Unknown(other.to_string())),
        }
    }
}

// =============================================================================
// Shell
// =============================================================================

/// What to do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Owns the application state for the session and dispatches actions.
#[derive(Debug)]
pub struct Shell {
    state: AppState,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Shell { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Startup screen: the grid (or the unavailable notice) and the cart.
    pub fn welcome(&self) -> String {
        let grid = product::get_grid(&self.state)
            .map(|response| render::grid(&response))
            .unwrap_or_else(|e| render::error(&e));
        let cart = render::cart(&cart::get_cart(&self.state));
        format!("{}\n\n{}", grid, cart)
    }

    /// Handles one input line.
    pub async fn handle_line(&mut self, line: &str) -> Option<Reply> {
        if line.trim().is_empty() {
            return None;
        }
        let reply = match line.parse::<Action>() {
            Ok(action) => self.execute(action).await,
            Err(e) => Reply::Print(e.to_string()),
        };
        Some(reply)
    }

    /// Runs one action against the state.
    pub async fn execute(&mut self, action: Action) -> Reply {
        debug!(?action, "Executing action");
        let state = &mut self.state;

        let text = match action {
            Action::Quit => return Reply::Quit,
            Action::Help => Ok(render::help()),
            Action::Show => product::get_grid(state).map(|r| render::grid(&r)),
            Action::Search(text) => product::set_search(state, &text).map(|r| render::grid(&r)),
            Action::Category(name) => product::set_category(state, &name).map(|r| render::grid(&r)),
            Action::Categories => product::get_categories(state).map(|r| render::categories(&r)),
            Action::Sort(order) => product::set_sort(state, &order).map(|r| render::grid(&r)),
            Action::More => product::load_more(state).map(|r| render::grid(&r)),
            Action::Add(id) => Shell::add(state, &id).await,
            Action::Increment(id) => cart::increment_item(state, &id).await.map(|r| render::cart(&r)),
            Action::Decrement(id) => cart::decrement_item(state, &id).await.map(|r| render::cart(&r)),
            Action::Clear => cart::clear_cart(state).await.map(|r| render::cart(&r)),
            Action::Cart => Ok(render::cart(&cart::get_cart(state))),
            Action::Open(id) => modal::open_preview(state, &id).map(|r| render::modal(&r)),
            Action::Wheel(delta) => Ok(render::modal(&modal::wheel(state, delta))),
            Action::Move { x, y } => Ok(render::modal(&modal::pointer_move(state, x, y))),
            Action::Click => Ok(render::modal(&modal::click(state))),
            Action::Close => Ok(render::modal(&modal::close_preview(state))),
        };

        Reply::Print(text.unwrap_or_else(|e| render::error(&e)))
    }

    /// Adds to the cart and prefixes the "added" notice.
    async fn add(state: &mut AppState, raw_id: &str) -> Result<String, crate::error::ApiError> {
        let id = product::resolve_product_id(state, raw_id)?.to_string();
        let response = cart::add_to_cart(state, raw_id).await?;

        let notice = response
            .items
            .iter()
            .find(|line| line.product_id == id)
            .map(|line| render::added_notice(&line.title));

        Ok(match notice {
            Some(notice) => format!("{}\n{}", notice, render::cart(&response)),
            None => render::cart(&response),
        })
    }

    /// Reads lines until `quit` or end of input, writing every reply.
    ///
    /// Input bytes that are not UTF-8 are replaced, so a bad line becomes an
    /// unknown command instead of ending the session.
    pub async fn run<R, W>(&mut self, mut input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(self.welcome().as_bytes()).await?;
        output.write_all(b"\n> ").await?;
        output.flush().await?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let raw = String::from_utf8_lossy(&buf);
            let line = raw.trim_end_matches(['\n', '\r']);
            match self.handle_line(line).await {
                Some(Reply::Quit) => break,
                Some(Reply::Print(text)) => {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
                None => {}
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        output.flush().await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{app_state, app_state_with};

    #[test]
    fn test_parse_commands() {
        assert_eq!("ADD 3".parse::<Action>().unwrap(), Action::Add("3".into()));
        assert_eq!(
            "search  Running Shoe ".parse::<Action>().unwrap(),
            Action::Search("Running Shoe".into())
        );
        assert_eq!("search".parse::<Action>().unwrap(), Action::Search(String::new()));
        assert_eq!("wheel -120".parse::<Action>().unwrap(), Action::Wheel(-120.0));
        assert_eq!(
            "move 25 75".parse::<Action>().unwrap(),
            Action::Move { x: 25.0, y: 75.0 }
        );
        assert_eq!("quit".parse::<Action>().unwrap(), Action::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "dance".parse::<Action>(),
            Err(ActionParseError::Unknown(_))
        ));
        assert!(matches!(
            "add".parse::<Action>(),
            Err(ActionParseError::MissingArgument { command: "add", .. })
        ));
        assert!(matches!(
            "wheel up".parse::<Action>(),
            Err(ActionParseError::InvalidNumber { command: "wheel", .. })
        ));
        assert!(matches!(
            "move 10".parse::<Action>(),
            Err(ActionParseError::MissingArgument { command: "move", .. })
        ));
        assert!("wheel NaN".parse::<Action>().is_err());
    }

    #[tokio::test]
    async fn test_add_prints_notice_and_cart() {
        let mut shell = Shell::new(app_state().await);
        let reply = shell.handle_line("add 1").await.unwrap();
        assert_eq!(
            reply,
            Reply::Print(
                "Shoe added to cart\n[1] Shoe\n    $50.00 x 1 = $50.00\nTotal: $50.00".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let mut shell = Shell::new(app_state().await);
        let reply = shell.handle_line("add 77").await.unwrap();
        assert_eq!(reply, Reply::Print("[NOT_FOUND] Product not found: 77".to_string()));

        assert!(shell.handle_line("   ").await.is_none());
        assert_eq!(shell.handle_line("exit").await, Some(Reply::Quit));
    }

    #[tokio::test]
    async fn test_unavailable_catalog_messages() {
        let shell = Shell::new(app_state_with(b"[1,2,3]").await);
        assert!(shell.welcome().starts_with("Catalog unavailable."));
        assert!(shell.welcome().ends_with("Your cart is empty.\nTotal: $0.00"));
    }

    #[tokio::test]
    async fn test_run_session() {
        let mut shell = Shell::new(app_state().await);
        let input: &[u8] = b"search boot\nadd 3\ninc 3\nquit\nadd 1\n";
        let mut output = Vec::new();

        shell.run(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[3] Boot | $120.00 | shoes\nShowing 1 of 1."));
        assert!(text.contains("Boot added to cart"));
        assert!(text.contains("$120.00 x 2 = $240.00"));

        // Lines after quit are not read.
        assert_eq!(shell.state().cart.cart().len(), 1);
        let saved = shell.state().db.inner().carts().load().await.unwrap();
        assert_eq!(saved.lines()[0].qty, 2);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_session_alive() {
        let mut shell = Shell::new(app_state().await);
        let input: &[u8] = b"add 1\n\xff\xfe\nadd 1\r\n";
        let mut output = Vec::new();

        shell.run(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unknown command"));
        assert_eq!(shell.state().cart.cart().lines()[0].qty, 2);
    }
}
