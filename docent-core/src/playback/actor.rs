//! Actor implementation for the playback controller.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{Duration, Instant};

use super::bus::{MessageBus, Subscription};
use super::commands::ControllerCommand;
use super::handle::PlaybackControllerHandle;
use super::protocol::{PlayerCommand, PlayerEvent, parse_player_message};
use super::state::{Effect, Input, PlaybackMachine, PlaybackPolicy, PlaybackState};
use crate::catalog::Catalog;
use crate::config::PlaybackConfig;
use crate::resolver::resolve;

/// Destination for commands addressed to the embedded player.
///
/// Delivery is fire-and-forget. The player confirms through the message bus,
/// never through this channel.
pub trait PlayerFrame: Send + 'static {
    fn post(&mut self, command: PlayerCommand);
}

impl PlayerFrame for mpsc::UnboundedSender<PlayerCommand> {
    fn post(&mut self, command: PlayerCommand) {
        if self.send(command).is_err() {
            tracing::debug!(func = command.func(), "Player frame gone, command dropped");
        }
    }
}

/// Mounts a playback controller for `route` and returns its handle.
///
/// The route is resolved against `catalog` immediately. The bus
/// subscription is registered before this returns, so messages published
/// right after mounting are not lost. A failed resolution mounts directly
/// into the error state without subscribing or starting timers.
///
/// Must be called from within a Tokio runtime.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use docent_core::Catalog;
/// use docent_core::config::PlaybackConfig;
/// use docent_core::playback::{MessageBus, spawn_playback_controller};
///
/// let bus = MessageBus::new();
/// let (frame, _commands) = tokio::sync::mpsc::unbounded_channel();
/// let handle = spawn_playback_controller(
///     "exhibit01-fr",
///     &Catalog::builtin(),
///     &bus,
///     frame,
///     &PlaybackConfig::default(),
/// );
/// handle.interact().await.ok();
/// # }
/// ```
pub fn spawn_playback_controller<F>(
    route: &str,
    catalog: &Catalog,
    bus: &MessageBus,
    frame: F,
    config: &PlaybackConfig,
) -> PlaybackControllerHandle
where
    F: PlayerFrame,
{
    let resolution = resolve(route, catalog);
    match &resolution {
        Ok(found) => tracing::debug!(
            route,
            exhibit = %found.exhibit_id,
            media = %found.media_ref,
            "Mounting playback controller"
        ),
        Err(err) => {
            tracing::info!(route, error = %err, "Mounting playback controller in error state");
        }
    }

    let (machine, effects) = PlaybackMachine::mount(&resolution, PlaybackPolicy::from(config));
    let subscription = (!machine.is_terminal()).then(|| bus.subscribe(parse_player_message));
    let (state_sender, state_receiver) = watch::channel(machine.state().clone());
    let (sender, receiver) = mpsc::channel(32);

    let mut controller = Controller {
        machine,
        frame,
        subscription,
        state: state_sender,
        ready_timeout: config.ready_timeout,
        controls_hide_after: config.controls_hide_after,
        ready_deadline: None,
        controls_deadline: None,
    };
    controller.run_effects(effects);

    tokio::spawn(async move {
        run_actor_loop(controller, receiver).await;
    });

    PlaybackControllerHandle::new(sender, state_receiver, Arc::new(resolution))
}

struct Controller<F> {
    machine: PlaybackMachine,
    frame: F,
    subscription: Option<Subscription<PlayerEvent>>,
    state: watch::Sender<PlaybackState>,
    ready_timeout: Duration,
    controls_hide_after: Duration,
    ready_deadline: Option<Instant>,
    /// Deadline paired with the countdown generation it belongs to
    controls_deadline: Option<(Instant, u64)>,
}

impl<F: PlayerFrame> Controller<F> {
    fn apply(&mut self, input: Input) {
        let effects = self.machine.apply(input);
        self.run_effects(effects);

        if self.machine.is_terminal() {
            self.subscription = None;
        }

        let next = self.machine.state();
        self.state.send_if_modified(|current| {
            if current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        });
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Send(command) => self.frame.post(command),
                Effect::StartReadyTimeout => {
                    self.ready_deadline = Some(Instant::now() + self.ready_timeout);
                }
                Effect::CancelReadyTimeout => self.ready_deadline = None,
                Effect::StartControlsCountdown { generation } => {
                    self.controls_deadline =
                        Some((Instant::now() + self.controls_hide_after, generation));
                }
                Effect::CancelControlsCountdown => self.controls_deadline = None,
            }
        }
    }

    fn teardown(&mut self) {
        self.subscription = None;
        self.ready_deadline = None;
        self.controls_deadline = None;
    }
}

/// Runs the controller until it is unmounted or every handle is dropped.
async fn run_actor_loop<F: PlayerFrame>(
    mut controller: Controller<F>,
    mut receiver: mpsc::Receiver<ControllerCommand>,
) {
    tracing::debug!("Playback controller started");

    loop {
        let ready_deadline = controller.ready_deadline;
        let controls_deadline = controller.controls_deadline;

        tokio::select! {
            command = receiver.recv() => match command {
                Some(ControllerCommand::Act { action, responder }) => {
                    controller.apply(action.into());
                    let _ = responder.send(controller.machine.state().clone());
                }
                Some(ControllerCommand::Unmount { responder }) => {
                    controller.teardown();
                    let _ = responder.send(());
                    break;
                }
                None => break,
            },
            event = next_player_event(&mut controller.subscription) => match event {
                Some(event) => controller.apply(Input::Player(event)),
                None => {
                    tracing::debug!("Message bus closed");
                    controller.subscription = None;
                }
            },
            () = sleep_until(ready_deadline) => {
                controller.ready_deadline = None;
                controller.apply(Input::ReadyTimeoutElapsed);
            }
            generation = countdown(controls_deadline) => {
                controller.controls_deadline = None;
                controller.apply(Input::ControlsCountdownElapsed { generation });
            }
        }
    }

    controller.teardown();
    tracing::debug!("Playback controller stopped");
}

async fn next_player_event(
    subscription: &mut Option<Subscription<PlayerEvent>>,
) -> Option<PlayerEvent> {
    match subscription {
        Some(subscription) => subscription.recv().await,
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn countdown(deadline: Option<(Instant, u64)>) -> u64 {
    match deadline {
        Some((deadline, generation)) => {
            tokio::time::sleep_until(deadline).await;
            generation
        }
        None => std::future::pending().await,
    }
}
