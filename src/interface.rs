// SPDX-License-Identifier: GPL-3.0

//! GUI-thread owner of the main context and the bookmark model.

use crate::bridge::{GuiQueue, Message};
use crate::engine::EnginePlayer;
use crate::error::IntfError;
use crate::library::MediaLibrary;
use crate::main_ctx::{Collaborators, MainCtx};
use crate::models::bookmark_model::BookmarkModel;
use crate::settings::Settings;
use futures::StreamExt;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

pub struct Interface {
    ctx: MainCtx,
    bookmarks: Option<BookmarkModel>,
    queue: GuiQueue,
    receiver: UnboundedReceiver<Message>,
}

impl Interface {
    pub fn new(collaborators: Collaborators, settings: Settings) -> Result<Self, IntfError> {
        let (queue, receiver) = GuiQueue::channel();
        let ctx = MainCtx::new(collaborators, settings, queue.clone())?;
        log::info!("interface created");
        Ok(Self {
            ctx,
            bookmarks: None,
            queue,
            receiver,
        })
    }

    pub fn ctx(&self) -> &MainCtx {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut MainCtx {
        &mut self.ctx
    }

    /// A handle for posting GUI tasks from any thread.
    pub fn queue(&self) -> GuiQueue {
        self.queue.clone()
    }

    /// Show the bookmark list for `player`. Replaces any open list.
    pub fn open_bookmarks(
        &mut self,
        player: Arc<dyn EnginePlayer>,
        library: Rc<dyn MediaLibrary>,
    ) -> Result<&mut BookmarkModel, IntfError> {
        let model = BookmarkModel::new(player, library, self.queue.clone())?;
        Ok(self.bookmarks.insert(model))
    }

    pub fn bookmarks(&self) -> Option<&BookmarkModel> {
        self.bookmarks.as_ref()
    }

    pub fn bookmarks_mut(&mut self) -> Option<&mut BookmarkModel> {
        self.bookmarks.as_mut()
    }

    pub fn close_bookmarks(&mut self) {
        self.bookmarks = None;
    }

    pub fn update(&mut self, message: Message) {
        dispatch(&mut self.ctx, &mut self.bookmarks, message);
    }

    /// Run every queued task, including tasks queued meanwhile.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.update(message);
            processed += 1;
        }
        processed
    }

    /// Process tasks as they arrive until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) -> Self {
        let Self {
            mut ctx,
            mut bookmarks,
            queue,
            receiver,
        } = self;
        let mut messages = UnboundedReceiverStream::new(receiver);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                message = messages.next() => match message {
                    Some(message) => dispatch(&mut ctx, &mut bookmarks, message),
                    None => break,
                },
            }
        }
        log::info!("interface loop stopped");

        Self {
            ctx,
            bookmarks,
            queue,
            receiver: messages.into_inner(),
        }
    }
}

fn dispatch(ctx: &mut MainCtx, bookmarks: &mut Option<BookmarkModel>, message: Message) {
    match message {
        Message::Bookmarks(id, message) => match bookmarks {
            Some(model) if model.id() == id => model.handle(message),
            _ => log::debug!("dropping task of closed bookmark model"),
        },
        message => ctx.update(message),
    }
}
