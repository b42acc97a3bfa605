//! Console view
//!
//! `ConsoleRenderer` is the observer half: it redraws the whole feed on
//! every notification. `FeedView` is the intent half: it turns parsed
//! commands into view model calls. Neither holds feed state of its own.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::app::{FeedState, FeedViewModel, Observer, Outcome, Subscription};
use crate::domain::ports::PostRepository;
use crate::error::ObserverError;
use crate::feed::{render_feed, render_json, PluginRegistry};
use crate::view::command::{help_text, FeedCommand};

/// Writes a rendered feed to `W` on every state change
pub struct ConsoleRenderer<W: Write> {
    plugins: Rc<PluginRegistry>,
    out: RefCell<W>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(plugins: Rc<PluginRegistry>, out: W) -> Self {
        Self {
            plugins,
            out: RefCell::new(out),
        }
    }

    /// Write a line of text below the feed
    pub fn message(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{}", text)?;
        out.flush()
    }
}

impl<W: Write> Observer<FeedState> for ConsoleRenderer<W> {
    fn update(&self, snapshot: &FeedState) -> Result<(), ObserverError> {
        let rendered = render_feed(snapshot, &self.plugins);
        let mut out = self
            .out
            .try_borrow_mut()
            .map_err(|_| ObserverError::Render("output is already in use".to_string()))?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Whether the input loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The console feed: renders on notification, forwards intents
pub struct FeedView<R, W>
where
    R: PostRepository,
    W: Write + 'static,
{
    view_model: Rc<FeedViewModel<R>>,
    renderer: Rc<ConsoleRenderer<W>>,
    _subscription: Option<Subscription<FeedState>>,
}

impl<R, W> FeedView<R, W>
where
    R: PostRepository,
    W: Write + 'static,
{
    /// Build the view and subscribe it to `view_model`
    pub fn new(view_model: Rc<FeedViewModel<R>>, plugins: Rc<PluginRegistry>, out: W) -> Self {
        let renderer = Rc::new(ConsoleRenderer::new(plugins, out));
        let subscription = view_model.subscribe(renderer.clone());
        Self {
            view_model,
            renderer,
            _subscription: subscription,
        }
    }

    pub fn message(&self, text: &str) -> io::Result<()> {
        self.renderer.message(text)
    }

    /// Forward one intent to the view model
    pub async fn handle(&self, command: FeedCommand) -> io::Result<Flow> {
        tracing::debug!(?command, "handling command");

        let outcome = match command {
            FeedCommand::Load => self.view_model.load_initial().await,
            FeedCommand::Refresh => self.view_model.refresh().await,
            FeedCommand::More => {
                let outcome = self.view_model.load_more().await;
                let state = self.view_model.state();
                if outcome == Outcome::Skipped && !state.has_more && !state.is_busy() {
                    self.message("No more posts to load.")?;
                    return Ok(Flow::Continue);
                }
                outcome
            }
            FeedCommand::Like { post_index } => {
                let post_id = self
                    .view_model
                    .state()
                    .posts
                    .get(post_index)
                    .map(|post| post.id);
                match post_id {
                    Some(id) => self.view_model.toggle_like(id).await,
                    None => {
                        self.message(&format!("No post #{} in the feed.", post_index + 1))?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            FeedCommand::Post {
                variant,
                content,
                media_url,
            } => match media_url {
                Some(url) => {
                    self.view_model
                        .create_media_post(content, variant, url)
                        .await
                }
                None => self.view_model.create_post(content, variant).await,
            },
            FeedCommand::Export => {
                let json = render_json(&self.view_model.state())?;
                self.message(&json)?;
                return Ok(Flow::Continue);
            }
            FeedCommand::Help => {
                self.message(&help_text())?;
                return Ok(Flow::Continue);
            }
            FeedCommand::Quit => return Ok(Flow::Quit),
        };

        if outcome == Outcome::Skipped {
            self.message("Busy with another request, try again once it finishes.")?;
        }
        Ok(Flow::Continue)
    }
}
