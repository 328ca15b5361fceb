//! The dialog service: open, route, resolve, remove
//!
//! A single task owns every piece of mutable state: the instance stack, the
//! trigger bindings, the per-instance Escape listeners, and the container.
//! Public operations, the host's input feed, and timer elapses all funnel
//! into one command channel, so handlers never interleave and no locking is
//! needed. Each caller suspends on a oneshot receiver until exactly one
//! trigger fires for its dialog.

use crate::config::ServiceConfig;
use crate::dialog::instance::{DialogInstance, InstanceState};
use crate::dialog::types::{Alert, Confirm, DialogId, DialogRequest, Outcome, Prompt};
use crate::events::{InputEvent, Key, ServiceEvent};
use crate::markup;
use crate::surface::{element_ids, Surface};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Commands processed by the service task.
enum Command {
    Open {
        request: DialogRequest,
        resolver: oneshot::Sender<Outcome>,
    },
    Input(InputEvent),
    EntryElapsed(DialogId),
    ExitElapsed(DialogId),
    SetEventSender(mpsc::UnboundedSender<ServiceEvent>),
}

/// Which control a registered element id stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Confirm,
    Cancel,
    Dismiss,
    Backdrop,
    Input,
}

#[derive(Debug, Clone)]
struct Binding {
    dialog: DialogId,
    trigger: Trigger,
}

/// Handle to the dialog service. Cheap to clone; all clones drive the same
/// container and dialog stack.
#[derive(Clone)]
pub struct DialogService {
    commands: mpsc::UnboundedSender<Command>,
}

impl DialogService {
    /// Spawn the service task on the current tokio runtime, with default
    /// timings.
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self::with_config(surface, ServiceConfig::default())
    }

    pub fn with_config(surface: Arc<dyn Surface>, config: ServiceConfig) -> Self {
        let (commands, inbox) = mpsc::unbounded_channel();
        let task = ServiceTask {
            surface,
            config,
            commands: commands.downgrade(),
            instances: HashMap::new(),
            bindings: HashMap::new(),
            escape_listeners: Vec::new(),
            container_mounted: false,
            events: None,
        };
        tokio::spawn(task.run(inbox));
        Self { commands }
    }

    /// Route lifecycle notifications to `sender`.
    pub fn set_event_sender(&self, sender: mpsc::UnboundedSender<ServiceEvent>) {
        let _ = self.commands.send(Command::SetEventSender(sender));
    }

    /// Forward a document-level input event from the host.
    pub fn dispatch(&self, event: InputEvent) {
        let _ = self.commands.send(Command::Input(event));
    }

    /// Open a dialog of any kind and await its resolution. Never errors; if
    /// the service task is gone the dismissed outcome is returned.
    pub async fn open(&self, request: impl Into<DialogRequest>) -> Outcome {
        let (tx, rx) = oneshot::channel();
        let command = Command::Open {
            request: request.into(),
            resolver: tx,
        };
        if self.commands.send(command).is_err() {
            return Outcome::Dismissed;
        }
        rx.await.unwrap_or(Outcome::Dismissed)
    }

    /// Ask for a yes/no decision. `true` only when the confirm control
    /// fired; every other trigger yields `false`.
    pub async fn confirm(&self, request: impl Into<Confirm>) -> bool {
        self.open(DialogRequest::Confirm(request.into()))
            .await
            .is_confirmed()
    }

    /// Show a message and wait until it is acknowledged or dismissed.
    pub async fn alert(&self, request: impl Into<Alert>) {
        let _ = self.open(DialogRequest::Alert(request.into())).await;
    }

    /// Ask for a line (or block) of text. Resolves to the trimmed input on
    /// confirm; `None` on any cancellation path or empty input.
    pub async fn prompt(&self, request: impl Into<Prompt>) -> Option<String> {
        self.open(DialogRequest::Prompt(request.into()))
            .await
            .into_input()
    }
}

struct ServiceTask {
    surface: Arc<dyn Surface>,
    config: ServiceConfig,
    /// Weak so pending timer tasks do not keep the service alive after the
    /// last handle is dropped.
    commands: mpsc::WeakUnboundedSender<Command>,
    instances: HashMap<DialogId, DialogInstance>,
    /// Element id -> control binding for every open instance. Torn down as
    /// a unit when the instance resolves.
    bindings: HashMap<String, Binding>,
    /// Document-level Escape listeners, one per open instance, in
    /// registration order.
    escape_listeners: Vec<DialogId>,
    container_mounted: bool,
    events: Option<mpsc::UnboundedSender<ServiceEvent>>,
}

impl ServiceTask {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = inbox.recv().await {
            match command {
                Command::Open { request, resolver } => self.open(request, resolver).await,
                Command::Input(event) => self.route(event).await,
                Command::EntryElapsed(id) => self.entry_elapsed(&id).await,
                Command::ExitElapsed(id) => self.exit_elapsed(&id).await,
                Command::SetEventSender(sender) => self.events = Some(sender),
            }
        }
    }

    async fn open(&mut self, request: DialogRequest, resolver: oneshot::Sender<Outcome>) {
        let mut instance = DialogInstance::new(request, resolver);
        if !self.ensure_container().await {
            instance.resolve(Outcome::Dismissed);
            return;
        }
        let fragment = markup::dialog(&instance.ids, &instance.request);
        if let Err(err) = self
            .surface
            .mount(Some(element_ids::CONTAINER), &fragment)
            .await
        {
            warn!("Failed to mount dialog {}: {}", instance.id, err);
            instance.resolve(Outcome::Dismissed);
            return;
        }
        if let Err(err) = self.surface.set_visible(element_ids::CONTAINER, true).await {
            debug!("Could not show dialog container: {}", err);
        }
        self.register_bindings(&instance);
        self.escape_listeners.push(instance.id.clone());
        self.schedule(
            self.config.show_delay(),
            Command::EntryElapsed(instance.id.clone()),
        );
        debug!("Opened {:?} dialog {}", instance.request.kind(), instance.id);
        self.emit(ServiceEvent::Opened {
            id: instance.id.clone(),
            kind: instance.request.kind(),
        });
        self.instances.insert(instance.id.clone(), instance);
    }

    async fn ensure_container(&mut self) -> bool {
        if self.container_mounted {
            return true;
        }
        match self.surface.mount(None, &markup::container()).await {
            Ok(()) => {
                self.container_mounted = true;
                true
            }
            Err(err) => {
                warn!("Failed to mount dialog container: {}", err);
                false
            }
        }
    }

    fn register_bindings(&mut self, instance: &DialogInstance) {
        let id = &instance.id;
        self.bind(&instance.ids.confirm, id, Trigger::Confirm);
        self.bind(&instance.ids.dismiss, id, Trigger::Dismiss);
        self.bind(&instance.ids.backdrop, id, Trigger::Backdrop);
        match &instance.request {
            DialogRequest::Confirm(_) => self.bind(&instance.ids.cancel, id, Trigger::Cancel),
            DialogRequest::Alert(_) => {}
            DialogRequest::Prompt(prompt) => {
                self.bind(&instance.ids.cancel, id, Trigger::Cancel);
                if !prompt.multiline {
                    // Enter in a single-line field doubles as confirm.
                    self.bind(&instance.ids.input, id, Trigger::Input);
                }
            }
        }
    }

    fn bind(&mut self, element: &str, dialog: &DialogId, trigger: Trigger) {
        self.bindings.insert(
            element.to_string(),
            Binding {
                dialog: dialog.clone(),
                trigger,
            },
        );
    }

    async fn route(&mut self, event: InputEvent) {
        match event {
            InputEvent::Click { target } => {
                // Only the exact backdrop element counts as a backdrop
                // click; anything inside the panel reports its own id and
                // has no dismissal binding.
                let Some(binding) = self.bindings.get(&target).cloned() else {
                    return;
                };
                match binding.trigger {
                    Trigger::Confirm => self.settle(&binding.dialog, true).await,
                    Trigger::Cancel | Trigger::Dismiss | Trigger::Backdrop => {
                        self.settle(&binding.dialog, false).await
                    }
                    // Clicks inside the field just focus it.
                    Trigger::Input => {}
                }
            }
            InputEvent::Key {
                key: Key::Escape, ..
            } => {
                // Every open instance registered its own document-level
                // listener; one press dispatches to all of them. Resolved
                // instances are already unregistered.
                let listeners = self.escape_listeners.clone();
                for dialog in listeners {
                    self.settle(&dialog, false).await;
                }
            }
            InputEvent::Key {
                key: Key::Enter,
                target: Some(target),
            } => {
                let Some(binding) = self.bindings.get(&target).cloned() else {
                    return;
                };
                if binding.trigger == Trigger::Input {
                    self.settle(&binding.dialog, true).await;
                }
            }
            InputEvent::Key { .. } => {}
        }
    }

    /// The single resolve-and-close path behind every trigger.
    async fn settle(&mut self, id: &DialogId, affirmed: bool) {
        let (input_id, wants_input) = match self.instances.get(id) {
            Some(instance) if instance.is_open() => (
                instance.ids.input.clone(),
                matches!(instance.request, DialogRequest::Prompt(_)),
            ),
            _ => return,
        };
        let outcome = if !affirmed {
            Outcome::Dismissed
        } else if wants_input {
            match self.read_input(&input_id).await {
                Some(text) => Outcome::Confirmed { input: Some(text) },
                // Empty-after-trim input folds into the cancelled result.
                None => Outcome::Dismissed,
            }
        } else {
            Outcome::Confirmed { input: None }
        };
        let confirmed = outcome.is_confirmed();
        let Some(instance) = self.instances.get_mut(id) else {
            return;
        };
        instance.resolve(outcome);
        instance.state = InstanceState::Closing;
        let root = instance.ids.root.clone();
        self.teardown(id);
        if let Err(err) = self.surface.set_shown(&root, false).await {
            debug!("Could not start close transition for {}: {}", id, err);
        }
        self.schedule(self.config.remove_delay(), Command::ExitElapsed(id.clone()));
        debug!("Resolved dialog {} (confirmed: {})", id, confirmed);
        self.emit(ServiceEvent::Resolved {
            id: id.clone(),
            confirmed,
        });
    }

    async fn read_input(&self, input_id: &str) -> Option<String> {
        let raw = match self.surface.input_value(input_id).await {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                debug!("Could not read prompt input {}: {}", input_id, err);
                String::new()
            }
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Detach every listener registered for an instance. After this no
    /// trigger can reach the instance again.
    fn teardown(&mut self, id: &DialogId) {
        self.bindings.retain(|_, binding| binding.dialog != *id);
        self.escape_listeners.retain(|dialog| dialog != id);
    }

    async fn entry_elapsed(&mut self, id: &DialogId) {
        // The instance may already be resolved or removed; applying the
        // shown state then would restart a closing transition.
        let Some(instance) = self.instances.get(id) else {
            return;
        };
        if !instance.is_open() {
            return;
        }
        if let Err(err) = self.surface.set_shown(&instance.ids.root, true).await {
            debug!("Could not apply shown state for {}: {}", id, err);
        }
        if matches!(instance.request, DialogRequest::Prompt(_)) {
            if let Err(err) = self.surface.focus(&instance.ids.input).await {
                debug!("Could not focus prompt input for {}: {}", id, err);
            }
        }
    }

    async fn exit_elapsed(&mut self, id: &DialogId) {
        let Some(instance) = self.instances.remove(id) else {
            return;
        };
        if let Err(err) = self.surface.remove(&instance.ids.root).await {
            debug!("Could not remove dialog node {}: {}", id, err);
        }
        if self.instances.is_empty() {
            if let Err(err) = self
                .surface
                .set_visible(element_ids::CONTAINER, false)
                .await
            {
                debug!("Could not hide dialog container: {}", err);
            }
        }
        debug!("Removed dialog {}", id);
        self.emit(ServiceEvent::Removed { id: instance.id });
    }

    fn schedule(&self, delay: Duration, command: Command) {
        let commands = self.commands.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(commands) = commands.upgrade() {
                let _ = commands.send(command);
            }
        });
    }

    fn emit(&self, event: ServiceEvent) {
        if let Some(sender) = &self.events {
            let _ = sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::instance::ElementIds;
    use crate::dialog::types::Severity;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory surface recording every mutation the service makes.
    #[derive(Default)]
    struct MockSurface {
        state: Mutex<MockState>,
    }

    #[derive(Default)]
    struct MockState {
        mounted: Vec<(Option<String>, String)>,
        removed: Vec<String>,
        visible: HashMap<String, bool>,
        shown: HashMap<String, bool>,
        input: String,
        focused: Vec<String>,
    }

    impl MockSurface {
        fn set_input(&self, value: &str) {
            self.state.lock().unwrap().input = value.to_string();
        }

        fn visible(&self, id: &str) -> Option<bool> {
            self.state.lock().unwrap().visible.get(id).copied()
        }

        fn shown(&self, id: &str) -> Option<bool> {
            self.state.lock().unwrap().shown.get(id).copied()
        }

        fn mounted_markup(&self) -> Vec<String> {
            self.state
                .lock()
                .unwrap()
                .mounted
                .iter()
                .map(|(_, markup)| markup.clone())
                .collect()
        }

        fn removed(&self) -> Vec<String> {
            self.state.lock().unwrap().removed.clone()
        }
    }

    #[async_trait]
    impl Surface for MockSurface {
        async fn mount(&self, parent: Option<&str>, markup: &str) -> Result<()> {
            self.state
                .lock()
                .unwrap()
                .mounted
                .push((parent.map(str::to_string), markup.to_string()));
            Ok(())
        }

        async fn remove(&self, id: &str) -> Result<()> {
            self.state.lock().unwrap().removed.push(id.to_string());
            Ok(())
        }

        async fn set_visible(&self, id: &str, visible: bool) -> Result<()> {
            self.state
                .lock()
                .unwrap()
                .visible
                .insert(id.to_string(), visible);
            Ok(())
        }

        async fn set_shown(&self, id: &str, shown: bool) -> Result<()> {
            self.state
                .lock()
                .unwrap()
                .shown
                .insert(id.to_string(), shown);
            Ok(())
        }

        async fn input_value(&self, _id: &str) -> Result<Option<String>> {
            Ok(Some(self.state.lock().unwrap().input.clone()))
        }

        async fn focus(&self, id: &str) -> Result<()> {
            self.state.lock().unwrap().focused.push(id.to_string());
            Ok(())
        }
    }

    struct Fixture {
        surface: Arc<MockSurface>,
        service: DialogService,
        events: mpsc::UnboundedReceiver<ServiceEvent>,
    }

    fn quick() -> ServiceConfig {
        ServiceConfig {
            show_delay_ms: 1,
            remove_delay_ms: 1,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(quick())
    }

    fn fixture_with(config: ServiceConfig) -> Fixture {
        let surface = Arc::new(MockSurface::default());
        let service = DialogService::with_config(surface.clone(), config);
        let (sender, events) = mpsc::unbounded_channel();
        service.set_event_sender(sender);
        Fixture {
            surface,
            service,
            events,
        }
    }

    async fn opened_id(events: &mut mpsc::UnboundedReceiver<ServiceEvent>) -> DialogId {
        loop {
            match events.recv().await {
                Some(ServiceEvent::Opened { id, .. }) => return id,
                Some(_) => continue,
                None => panic!("event stream closed before a dialog opened"),
            }
        }
    }

    async fn removed_id(events: &mut mpsc::UnboundedReceiver<ServiceEvent>) -> DialogId {
        loop {
            match events.recv().await {
                Some(ServiceEvent::Removed { id }) => return id,
                Some(_) => continue,
                None => panic!("event stream closed before a dialog was removed"),
            }
        }
    }

    #[tokio::test]
    async fn confirm_resolves_true_on_confirm_control() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.confirm("Delete this record?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.service.dispatch(InputEvent::Click { target: ids.confirm });

        assert!(pending.await.unwrap());
    }

    #[tokio::test]
    async fn confirm_resolves_false_on_every_dismissal_path() {
        let triggers: Vec<fn(&ElementIds) -> InputEvent> = vec![
            |ids| InputEvent::Click {
                target: ids.cancel.clone(),
            },
            |ids| InputEvent::Click {
                target: ids.dismiss.clone(),
            },
            |ids| InputEvent::Click {
                target: ids.backdrop.clone(),
            },
            |_| InputEvent::Key {
                key: Key::Escape,
                target: None,
            },
        ];
        for trigger in triggers {
            let mut fx = fixture();
            let service = fx.service.clone();
            let pending = tokio::spawn(async move { service.confirm("Sure?").await });

            let ids = ElementIds::of(&opened_id(&mut fx.events).await);
            fx.service.dispatch(trigger(&ids));

            assert!(!pending.await.unwrap());
        }
    }

    #[tokio::test]
    async fn alert_resolves_once_for_every_trigger() {
        let triggers: Vec<fn(&ElementIds) -> InputEvent> = vec![
            |ids| InputEvent::Click {
                target: ids.confirm.clone(),
            },
            |ids| InputEvent::Click {
                target: ids.dismiss.clone(),
            },
            |ids| InputEvent::Click {
                target: ids.backdrop.clone(),
            },
            |_| InputEvent::Key {
                key: Key::Escape,
                target: None,
            },
        ];
        for trigger in triggers {
            let mut fx = fixture();
            let service = fx.service.clone();
            let pending = tokio::spawn(async move {
                service
                    .alert(Alert::new("Payroll exported").with_severity(Severity::Success))
                    .await
            });

            let ids = ElementIds::of(&opened_id(&mut fx.events).await);
            fx.service.dispatch(trigger(&ids));

            pending.await.unwrap();
        }
    }

    #[tokio::test]
    async fn prompt_trims_and_returns_input() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.prompt("Reason?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.surface.set_input("  hello  ");
        fx.service.dispatch(InputEvent::Click { target: ids.confirm });

        assert_eq!(pending.await.unwrap(), Some("hello".to_string()));
    }

    #[tokio::test]
    async fn prompt_empty_input_counts_as_cancelled() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.prompt("Reason?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.surface.set_input("   ");
        fx.service.dispatch(InputEvent::Click { target: ids.confirm });

        assert_eq!(pending.await.unwrap(), None);
    }

    #[tokio::test]
    async fn prompt_dismissal_paths_return_none() {
        let triggers: Vec<fn(&ElementIds) -> InputEvent> = vec![
            |ids| InputEvent::Click {
                target: ids.cancel.clone(),
            },
            |ids| InputEvent::Click {
                target: ids.dismiss.clone(),
            },
            |ids| InputEvent::Click {
                target: ids.backdrop.clone(),
            },
            |_| InputEvent::Key {
                key: Key::Escape,
                target: None,
            },
        ];
        for trigger in triggers {
            let mut fx = fixture();
            let service = fx.service.clone();
            let pending = tokio::spawn(async move { service.prompt("Reason?").await });

            let ids = ElementIds::of(&opened_id(&mut fx.events).await);
            fx.surface.set_input("still here");
            fx.service.dispatch(trigger(&ids));

            assert_eq!(pending.await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn enter_confirms_a_single_line_prompt() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.prompt("Name?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.surface.set_input("Finance");
        fx.service.dispatch(InputEvent::Key {
            key: Key::Enter,
            target: Some(ids.input),
        });

        assert_eq!(pending.await.unwrap(), Some("Finance".to_string()));
    }

    #[tokio::test]
    async fn enter_leaves_a_multiline_prompt_open() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending =
            tokio::spawn(async move { service.prompt(Prompt::new("Notes?").multiline(true)).await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.surface.set_input("kept");
        // Enter is a literal newline in multiline mode; the later cancel
        // proving it did not confirm.
        fx.service.dispatch(InputEvent::Key {
            key: Key::Enter,
            target: Some(ids.input.clone()),
        });
        fx.service.dispatch(InputEvent::Click { target: ids.cancel });

        assert_eq!(pending.await.unwrap(), None);
    }

    #[tokio::test]
    async fn stacked_dialogs_resolve_independently() {
        let mut fx = fixture();

        let service = fx.service.clone();
        let first = tokio::spawn(async move { service.confirm("First?").await });
        let first_ids = ElementIds::of(&opened_id(&mut fx.events).await);

        let service = fx.service.clone();
        let second = tokio::spawn(async move { service.confirm("Second?").await });
        let second_ids = ElementIds::of(&opened_id(&mut fx.events).await);

        // Dismissing the second via its own backdrop must not touch the
        // first.
        fx.service.dispatch(InputEvent::Click {
            target: second_ids.backdrop,
        });
        assert!(!second.await.unwrap());

        fx.service.dispatch(InputEvent::Click {
            target: first_ids.confirm,
        });
        assert!(first.await.unwrap());
    }

    #[tokio::test]
    async fn escape_resolves_every_open_instance() {
        let mut fx = fixture();

        let service = fx.service.clone();
        let first = tokio::spawn(async move { service.confirm("First?").await });
        opened_id(&mut fx.events).await;

        let service = fx.service.clone();
        let second = tokio::spawn(async move { service.confirm("Second?").await });
        opened_id(&mut fx.events).await;

        fx.service.dispatch(InputEvent::Key {
            key: Key::Escape,
            target: None,
        });

        assert!(!first.await.unwrap());
        assert!(!second.await.unwrap());
    }

    #[tokio::test]
    async fn triggers_for_a_resolved_instance_are_no_ops() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.confirm("Sure?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.service.dispatch(InputEvent::Click {
            target: ids.confirm.clone(),
        });
        assert!(pending.await.unwrap());

        // Stale activations, including the torn-down Escape listener, must
        // not reach the next dialog or panic on a spent resolver.
        fx.service.dispatch(InputEvent::Click {
            target: ids.confirm,
        });
        fx.service.dispatch(InputEvent::Click { target: ids.cancel });
        fx.service.dispatch(InputEvent::Key {
            key: Key::Escape,
            target: None,
        });

        let service = fx.service.clone();
        let next = tokio::spawn(async move { service.confirm("Again?").await });
        let next_ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.service.dispatch(InputEvent::Click {
            target: next_ids.confirm,
        });
        assert!(next.await.unwrap());
    }

    #[tokio::test]
    async fn clicks_inside_the_panel_do_not_dismiss() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.confirm("Sure?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.service.dispatch(InputEvent::Click {
            target: ids.panel.clone(),
        });
        fx.service.dispatch(InputEvent::Click {
            target: ids.message.clone(),
        });
        fx.service.dispatch(InputEvent::Click {
            target: "not-a-dialog-element".to_string(),
        });

        // Still open: only the confirm control resolves it.
        fx.service.dispatch(InputEvent::Click { target: ids.confirm });
        assert!(pending.await.unwrap());
    }

    #[tokio::test]
    async fn container_stays_visible_until_the_last_instance_is_removed() {
        let mut fx = fixture();

        let service = fx.service.clone();
        let first = tokio::spawn(async move { service.confirm("First?").await });
        let first_ids = ElementIds::of(&opened_id(&mut fx.events).await);

        let service = fx.service.clone();
        let second = tokio::spawn(async move { service.confirm("Second?").await });
        let second_ids = ElementIds::of(&opened_id(&mut fx.events).await);

        assert_eq!(fx.surface.visible(element_ids::CONTAINER), Some(true));

        fx.service.dispatch(InputEvent::Click {
            target: second_ids.confirm,
        });
        assert!(second.await.unwrap());
        removed_id(&mut fx.events).await;
        assert_eq!(fx.surface.visible(element_ids::CONTAINER), Some(true));

        fx.service.dispatch(InputEvent::Click {
            target: first_ids.confirm,
        });
        assert!(first.await.unwrap());
        let removed = removed_id(&mut fx.events).await;
        assert_eq!(removed.as_str(), first_ids.root);
        assert!(fx.surface.removed().contains(&first_ids.root));
        assert_eq!(fx.surface.visible(element_ids::CONTAINER), Some(false));
    }

    #[tokio::test]
    async fn caller_strings_are_escaped_in_mounted_markup() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move {
            service
                .alert(Alert::new(r#"<script>alert('x')</script> & "q""#).with_title("<b>T</b>"))
                .await
        });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        let fragments = fx.surface.mounted_markup();
        let fragment = fragments.last().expect("dialog fragment mounted");
        assert!(!fragment.contains("<script>"));
        assert!(fragment
            .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;q&quot;"));
        assert!(fragment.contains("&lt;b&gt;T&lt;/b&gt;"));

        fx.service.dispatch(InputEvent::Click { target: ids.confirm });
        pending.await.unwrap();
    }

    #[tokio::test]
    async fn resolution_does_not_depend_on_the_entry_delay() {
        let mut fx = fixture_with(ServiceConfig {
            show_delay_ms: 30,
            remove_delay_ms: 1,
        });
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.confirm("Fast?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        fx.service.dispatch(InputEvent::Click {
            target: ids.confirm,
        });
        assert!(pending.await.unwrap());
        removed_id(&mut fx.events).await;

        // Once the entry timer fires it must not re-show the resolved node.
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(fx.surface.shown(&ids.root), Some(false));
    }

    #[tokio::test]
    async fn prompt_input_gets_focus_after_the_entry_delay() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.prompt("Name?").await });

        let ids = ElementIds::of(&opened_id(&mut fx.events).await);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(fx
            .surface
            .state
            .lock()
            .unwrap()
            .focused
            .contains(&ids.input));
        assert_eq!(fx.surface.shown(&ids.root), Some(true));

        fx.surface.set_input("x");
        fx.service.dispatch(InputEvent::Click { target: ids.confirm });
        assert_eq!(pending.await.unwrap(), Some("x".to_string()));
    }

    #[tokio::test]
    async fn lifecycle_events_arrive_in_order() {
        let mut fx = fixture();
        let service = fx.service.clone();
        let pending = tokio::spawn(async move { service.confirm("Sure?").await });

        let id = opened_id(&mut fx.events).await;
        let ids = ElementIds::of(&id);
        fx.service.dispatch(InputEvent::Click { target: ids.confirm });
        assert!(pending.await.unwrap());

        match fx.events.recv().await {
            Some(ServiceEvent::Resolved {
                id: resolved,
                confirmed,
            }) => {
                assert_eq!(resolved, id);
                assert!(confirmed);
            }
            other => panic!("expected a resolved event, got {:?}", other),
        }
        assert_eq!(removed_id(&mut fx.events).await, id);
    }
}
