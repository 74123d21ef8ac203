use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::domain::{DeckError, DeckState, DeckView, DrawnCard, NewDeck, Operation, ShuffledDeck};
use crate::infrastructure::DeckApi;
use crate::shared::{COMMAND_CHANNEL_CAPACITY, EVENT_CHANNEL_CAPACITY};

#[derive(Debug)]
pub enum DeckCommand {
    /// Start a fresh instance and request a new deck.
    Mount,
    Draw,
    Shuffle,
    Snapshot { reply: oneshot::Sender<DeckSnapshot> },
    /// Tear the instance down; responses still in flight are dropped.
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEvent {
    View(DeckView),
    Exhausted,
    Failed { operation: Operation, error: DeckError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckSnapshot {
    pub mounted: bool,
    pub state: DeckState,
    pub stale_completions: u64,
    /// Count of `Exhausted`/`Failed` events sent so far.
    pub notices: u64,
    pub last_notice: Option<DeckEvent>,
}

impl DeckEvent {
    /// Notices are one-off messages for the user; views are replaceable.
    pub fn is_notice(&self) -> bool {
        !matches!(self, DeckEvent::View(_))
    }
}

/// Generation of a mount. Requests remember the epoch they were issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Epoch(u64);

#[derive(Debug)]
enum Completion {
    Created(Result<NewDeck, DeckError>),
    Drawn(Result<DrawnCard, DeckError>),
    Shuffled(Result<ShuffledDeck, DeckError>),
}

pub struct DeckApp<A> {
    api: Arc<A>,
    state: DeckState,
    epoch: Epoch,
    mounted: bool,
    stale_completions: u64,
    notices: u64,
    last_notice: Option<DeckEvent>,
    broadcaster: broadcast::Sender<DeckEvent>,
    completions: mpsc::UnboundedSender<(Epoch, Completion)>,
}

impl<A: DeckApi> DeckApp<A> {
    pub fn start(api: Arc<A>) -> (mpsc::Sender<DeckCommand>, broadcast::Sender<DeckEvent>) {
        let (tx_cmd, rx_cmd) = mpsc::channel::<DeckCommand>(COMMAND_CHANNEL_CAPACITY);
        let (tx_done, rx_done) = mpsc::unbounded_channel();
        let (broadcaster, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let mut app = DeckApp {
            api,
            state: DeckState::default(),
            epoch: Epoch(0),
            mounted: false,
            stale_completions: 0,
            notices: 0,
            last_notice: None,
            broadcaster: broadcaster.clone(),
            completions: tx_done,
        };
        tokio::spawn(async move { app.run(rx_cmd, rx_done).await; });
        (tx_cmd, broadcaster)
    }

    async fn run(
        &mut self,
        mut commands: mpsc::Receiver<DeckCommand>,
        mut completions: mpsc::UnboundedReceiver<(Epoch, Completion)>,
    ) {
        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                // never closes: `self` holds a sender
                Some((epoch, completion)) = completions.recv() => {
                    self.handle_completion(epoch, completion);
                }
            }
        }
        tracing::info!("DeckApp actor exiting (command channel closed)");
    }

    fn handle_command(&mut self, cmd: DeckCommand) {
        match cmd {
            DeckCommand::Mount => self.mount(),
            DeckCommand::Draw => self.draw(),
            DeckCommand::Shuffle => self.shuffle(),
            DeckCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            DeckCommand::Unmount => self.unmount(),
        }
    }

    fn mount(&mut self) {
        if self.mounted {
            tracing::debug!(epoch = self.epoch.0, "mount ignored: already mounted");
            return;
        }
        self.epoch = Epoch(self.epoch.0 + 1);
        self.mounted = true;
        self.state = DeckState::default();
        self.publish_view();
        self.initialize();
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        tracing::debug!(epoch = self.epoch.0, "unmounted");
    }

    fn initialize(&mut self) {
        tracing::debug!(epoch = self.epoch.0, "requesting new deck");
        self.spawn_request(|api| async move { Completion::Created(api.new_deck().await) });
    }

    fn draw(&mut self) {
        if !self.mounted || self.state.draw_disabled() {
            tracing::debug!("draw ignored: disabled");
            return;
        }
        let Some(deck_id) = self.state.deck_id.clone() else { return };

        self.spawn_request(move |api| async move { Completion::Drawn(api.draw(&deck_id).await) });
    }

    fn shuffle(&mut self) {
        if !self.mounted || self.state.shuffle_disabled() {
            tracing::debug!("shuffle ignored: disabled");
            return;
        }
        let Some(deck_id) = self.state.deck_id.clone() else { return };

        // busy before the request leaves, so a second click cannot slip in
        self.state.begin_shuffle();
        self.publish_view();

        self.spawn_request(move |api| async move {
            Completion::Shuffled(api.shuffle(&deck_id).await)
        });
    }

    fn spawn_request<F, Fut>(&self, request: F)
    where
        F: FnOnce(Arc<A>) -> Fut,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        let epoch = self.epoch;
        let completions = self.completions.clone();
        let pending = request(Arc::clone(&self.api));
        tokio::spawn(async move {
            let completion = pending.await;
            // the actor may already be gone
            let _ = completions.send((epoch, completion));
        });
    }

    fn is_active(&self, epoch: Epoch) -> bool {
        self.mounted && epoch == self.epoch
    }

    fn handle_completion(&mut self, epoch: Epoch, completion: Completion) {
        if !self.is_active(epoch) {
            self.stale_completions += 1;
            tracing::debug!(
                issued = epoch.0,
                current = self.epoch.0,
                mounted = self.mounted,
                "discarding completion from inactive mount"
            );
            return;
        }

        match completion {
            Completion::Created(Ok(deck)) => {
                tracing::info!(deck_id = %deck.deck_id, remaining = deck.remaining, "deck created");
                self.state.apply_new_deck(deck);
                self.publish_view();
            }
            Completion::Created(Err(error)) => self.fail(Operation::Initialize, error),

            Completion::Drawn(Ok(drawn)) => {
                let exhausted = self.state.apply_draw(drawn);
                self.publish_view();
                if exhausted {
                    tracing::info!(deck_id = ?self.state.deck_id, "deck exhausted");
                    self.notify(DeckEvent::Exhausted);
                }
            }
            Completion::Drawn(Err(error)) => self.fail(Operation::Draw, error),

            Completion::Shuffled(Ok(shuffled)) => {
                tracing::info!(deck_id = ?self.state.deck_id, remaining = shuffled.remaining, "deck shuffled");
                self.state.apply_shuffle(shuffled);
                self.publish_view();
            }
            Completion::Shuffled(Err(error)) => {
                self.state.end_shuffle();
                self.publish_view();
                self.fail(Operation::Shuffle, error);
            }
        }
    }

    fn fail(&mut self, operation: Operation, error: DeckError) {
        tracing::warn!(?operation, %error, "deck service call failed");
        self.notify(DeckEvent::Failed { operation, error });
    }

    fn notify(&mut self, notice: DeckEvent) {
        self.notices += 1;
        self.last_notice = Some(notice.clone());
        let _ = self.broadcaster.send(notice);
    }

    fn publish_view(&self) {
        let _ = self.broadcaster.send(DeckEvent::View(self.state.view()));
    }

    fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            mounted: self.mounted,
            state: self.state.clone(),
            stale_completions: self.stale_completions,
            notices: self.notices,
            last_notice: self.last_notice.clone(),
        }
    }
}
