//! Wizard Controller: the hooks → angles → script flow as a state machine.
//!
//! Steps:
//!   1  CollectingInput  --hooks ok-->   2  SelectingHook
//!   2  SelectingHook    --angles ok-->  3a SelectingAngle   (needs a selected hook)
//!   3a SelectingAngle   --script ok-->  3b ScriptReady      (needs a selected angle)
//!
//! A step only advances when its call succeeds; a failed call leaves state
//! untouched so the user can retry. While a call is in flight further
//! submissions are refused, but navigation (`back`, `forward`, `reset`) stays
//! available and supersedes the call: its result is discarded on arrival.
//!
//! Submission is split into `begin_next` and `complete` so a front-end can
//! drive the network call itself; `advance` does both in one step.

use thiserror::Error;
use tracing::{debug, warn};

use crate::client::gateway::{GatewayError, GenerationGateway};
use crate::generation::models::{Angle, GenerationRequest, Hook, Task, TaskOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    CollectingInput,
    SelectingHook,
    SelectingAngle,
    ScriptReady,
}

impl WizardStep {
    /// Step number shown to the user. Both halves of step 3 share it.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::CollectingInput => 1,
            WizardStep::SelectingHook => 2,
            WizardStep::SelectingAngle | WizardStep::ScriptReady => 3,
        }
    }
}

/// Which product field the user is filling in. Only that one is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Description,
    Url,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// Blocked by a missing input or selection. No call was made.
    #[error("{0}")]
    Validation(&'static str),

    #[error("A request is already in progress.")]
    Busy,

    #[error("cannot go {action} from step {step:?}")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },

    #[error("unknown {kind} id: {id}")]
    UnknownSelection { kind: &'static str, id: String },

    /// The endpoint call failed. The message is the user-facing toast text.
    #[error("Failed to generate {task}. Please try again.")]
    Generation { task: Task, detail: String },
}

pub const MISSING_INPUT: &str = "Please provide either a product description or URL.";
pub const MISSING_HOOK: &str = "Please select a hook to continue.";
pub const MISSING_ANGLE: &str = "Please select an angle to generate the final script.";

/// A submitted call awaiting its result.
#[derive(Debug, Clone)]
pub struct PendingCall {
    task: Task,
    request: GenerationRequest,
    epoch: u64,
}

impl PendingCall {
    pub fn task(&self) -> Task {
        self.task
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was applied; the wizard is now at this step.
    Applied(WizardStep),
    /// The call was superseded by navigation or a reset.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    input_type: InputType,
    product_input: String,
    product_url: String,
    hooks: Vec<Hook>,
    selected_hook_id: Option<String>,
    angles: Vec<Angle>,
    selected_angle_id: Option<String>,
    script: Option<String>,
    // Requests that produced the cached hooks/angles; forward() reuses the
    // cache only while the current state would send the same request.
    hooks_request: Option<GenerationRequest>,
    angles_request: Option<GenerationRequest>,
    in_flight: Option<u64>,
    epoch: u64,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            step: WizardStep::CollectingInput,
            input_type: InputType::default(),
            product_input: String::new(),
            product_url: String::new(),
            hooks: Vec::new(),
            selected_hook_id: None,
            angles: Vec::new(),
            selected_angle_id: None,
            script: None,
            hooks_request: None,
            angles_request: None,
            in_flight: None,
            epoch: 0,
        }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    pub fn selected_hook_id(&self) -> Option<&str> {
        self.selected_hook_id.as_deref()
    }

    pub fn selected_angle_id(&self) -> Option<&str> {
        self.selected_angle_id.as_deref()
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// True while a submitted call has not settled. The submit action should
    /// be disabled.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn set_input_type(&mut self, input_type: InputType) {
        self.input_type = input_type;
    }

    pub fn set_product_input(&mut self, text: impl Into<String>) {
        self.product_input = text.into();
    }

    pub fn set_product_url(&mut self, url: impl Into<String>) {
        self.product_url = url.into();
    }

    pub fn select_hook(&mut self, id: &str) -> Result<(), WizardError> {
        if !self.hooks.iter().any(|h| h.id == id) {
            return Err(WizardError::UnknownSelection {
                kind: "hook",
                id: id.to_string(),
            });
        }
        self.selected_hook_id = Some(id.to_string());
        Ok(())
    }

    pub fn select_angle(&mut self, id: &str) -> Result<(), WizardError> {
        if !self.angles.iter().any(|a| a.id == id) {
            return Err(WizardError::UnknownSelection {
                kind: "angle",
                id: id.to_string(),
            });
        }
        self.selected_angle_id = Some(id.to_string());
        Ok(())
    }

    /// Starts the call that leads out of the current step.
    pub fn begin_next(&mut self) -> Result<PendingCall, WizardError> {
        if self.is_busy() {
            return Err(WizardError::Busy);
        }

        let task = match self.step {
            WizardStep::CollectingInput => Task::Hooks,
            WizardStep::SelectingHook => Task::Angles,
            WizardStep::SelectingAngle => Task::Script,
            WizardStep::ScriptReady => {
                return Err(WizardError::InvalidTransition {
                    step: self.step,
                    action: "next",
                })
            }
        };
        let request = self.request_for(task)?;

        self.epoch += 1;
        self.in_flight = Some(self.epoch);
        debug!("Wizard submitting {task} at step {}", self.step.number());

        Ok(PendingCall {
            task,
            request,
            epoch: self.epoch,
        })
    }

    /// Applies the result of a call started with [`Wizard::begin_next`].
    pub fn complete(
        &mut self,
        pending: PendingCall,
        result: Result<TaskOutput, GatewayError>,
    ) -> Result<Completion, WizardError> {
        if self.in_flight != Some(pending.epoch) {
            debug!("Discarding superseded {} result", pending.task);
            return Ok(Completion::Discarded);
        }
        self.in_flight = None;

        let output = result.map_err(|e| {
            warn!("Wizard {} call failed: {e}", pending.task);
            WizardError::Generation {
                task: pending.task,
                detail: e.to_string(),
            }
        })?;

        match (pending.task, output) {
            (Task::Hooks, TaskOutput::Hooks(hooks)) => {
                retain_selection(&mut self.selected_hook_id, hooks.iter().map(|h| &h.id));
                self.hooks = hooks;
                self.hooks_request = Some(pending.request);
                self.step = WizardStep::SelectingHook;
            }
            (Task::Angles, TaskOutput::Angles(angles)) => {
                retain_selection(&mut self.selected_angle_id, angles.iter().map(|a| &a.id));
                self.angles = angles;
                self.angles_request = Some(pending.request);
                self.step = WizardStep::SelectingAngle;
            }
            (Task::Script, TaskOutput::Script(script)) => {
                self.script = Some(script);
                self.step = WizardStep::ScriptReady;
            }
            (task, other) => {
                return Err(WizardError::Generation {
                    task,
                    detail: format!("unexpected {} response", other.task()),
                })
            }
        }

        Ok(Completion::Applied(self.step))
    }

    /// Submits the current step through `gateway` and applies the result.
    pub async fn advance(
        &mut self,
        gateway: &dyn GenerationGateway,
    ) -> Result<WizardStep, WizardError> {
        let pending = self.begin_next()?;
        let result = gateway.generate(pending.task, &pending.request).await;
        self.complete(pending, result)?;
        Ok(self.step)
    }

    /// Steps back without discarding fetched hooks or angles.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let previous = match self.step {
            WizardStep::SelectingHook => WizardStep::CollectingInput,
            WizardStep::SelectingAngle => WizardStep::SelectingHook,
            step => return Err(WizardError::InvalidTransition { step, action: "back" }),
        };
        self.cancel_in_flight();
        self.step = previous;
        Ok(previous)
    }

    /// Re-enters the next step from cache, without a call, when the cached
    /// results were produced by the request the current state would send.
    pub fn forward(&mut self) -> Result<WizardStep, WizardError> {
        let (task, next) = match self.step {
            WizardStep::CollectingInput => (Task::Hooks, WizardStep::SelectingHook),
            WizardStep::SelectingHook => (Task::Angles, WizardStep::SelectingAngle),
            step => {
                return Err(WizardError::InvalidTransition {
                    step,
                    action: "forward",
                })
            }
        };

        let request = self.request_for(task)?;
        let cached = match task {
            Task::Hooks => &self.hooks_request,
            _ => &self.angles_request,
        };
        if cached.as_ref() != Some(&request) {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "forward",
            });
        }

        self.cancel_in_flight();
        self.step = next;
        Ok(next)
    }

    /// Back to step 1 with everything cleared. Any in-flight call is discarded.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self {
            epoch,
            ..Self::default()
        };
    }

    fn cancel_in_flight(&mut self) {
        if self.in_flight.take().is_some() {
            debug!("Wizard navigation superseded an in-flight call");
        }
        self.epoch += 1;
    }

    /// The request the given task would send from the current state.
    fn request_for(&self, task: Task) -> Result<GenerationRequest, WizardError> {
        let mut request = self.product_request()?;

        if matches!(task, Task::Angles | Task::Script) {
            let hook = self
                .selected_hook()
                .ok_or(WizardError::Validation(MISSING_HOOK))?;
            request.selected_hook = Some(hook.text.clone());
        }
        if task == Task::Script {
            let angle = self
                .selected_angle()
                .ok_or(WizardError::Validation(MISSING_ANGLE))?;
            request.selected_angle = Some(format!("{}: {}", angle.title, angle.description));
        }
        Ok(request)
    }

    fn product_request(&self) -> Result<GenerationRequest, WizardError> {
        let mut request = GenerationRequest::default();
        match self.input_type {
            InputType::Description => request.product_input = Some(self.product_input.clone()),
            InputType::Url => request.product_url = Some(self.product_url.clone()),
        }
        if request.description().is_none() && request.url().is_none() {
            return Err(WizardError::Validation(MISSING_INPUT));
        }
        Ok(request)
    }

    fn selected_hook(&self) -> Option<&Hook> {
        let id = self.selected_hook_id.as_deref()?;
        self.hooks.iter().find(|h| h.id == id)
    }

    fn selected_angle(&self) -> Option<&Angle> {
        let id = self.selected_angle_id.as_deref()?;
        self.angles.iter().find(|a| a.id == id)
    }
}

/// Drops a selection that no longer names one of the fresh results.
fn retain_selection<'a>(selected: &mut Option<String>, mut ids: impl Iterator<Item = &'a String>) {
    if let Some(id) = selected.as_deref() {
        if !ids.any(|candidate| candidate == id) {
            *selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::generation::normalizer::{fallback_angles, fallback_hooks};

    /// Replays queued results and records every call it receives.
    #[derive(Default)]
    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<TaskOutput, GatewayError>>>,
        calls: Mutex<Vec<(Task, GenerationRequest)>>,
    }

    impl ScriptedGateway {
        fn with(replies: Vec<Result<TaskOutput, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<(Task, GenerationRequest)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationGateway for ScriptedGateway {
        async fn generate(
            &self,
            task: Task,
            request: &GenerationRequest,
        ) -> Result<TaskOutput, GatewayError> {
            self.calls.lock().unwrap().push((task, request.clone()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected gateway call")
        }
    }

    fn server_error() -> Result<TaskOutput, GatewayError> {
        Err(GatewayError::Status {
            status: 500,
            message: "Failed to generate angles".to_string(),
        })
    }

    fn wizard_at_hook_selection() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.set_product_input("rose gold tennis bracelet");
        let pending = wizard.begin_next().unwrap();
        wizard
            .complete(pending, Ok(TaskOutput::Hooks(fallback_hooks())))
            .unwrap();
        wizard
    }

    fn wizard_at_angle_selection() -> Wizard {
        let mut wizard = wizard_at_hook_selection();
        wizard.select_hook("4").unwrap();
        let pending = wizard.begin_next().unwrap();
        wizard
            .complete(pending, Ok(TaskOutput::Angles(fallback_angles())))
            .unwrap();
        wizard
    }

    #[tokio::test]
    async fn test_full_flow_reaches_script() {
        let gateway = ScriptedGateway::with(vec![
            Ok(TaskOutput::Hooks(fallback_hooks())),
            Ok(TaskOutput::Angles(fallback_angles())),
            Ok(TaskOutput::Script("0-5s: hello".to_string())),
        ]);
        let mut wizard = Wizard::new();
        wizard.set_input_type(InputType::Url);
        wizard.set_product_url("https://stateproperty.com/signet");

        assert_eq!(wizard.advance(&gateway).await, Ok(WizardStep::SelectingHook));
        wizard.select_hook("1").unwrap();
        assert_eq!(wizard.advance(&gateway).await, Ok(WizardStep::SelectingAngle));
        wizard.select_angle("angle_3").unwrap();
        assert_eq!(wizard.advance(&gateway).await, Ok(WizardStep::ScriptReady));
        assert_eq!(wizard.script(), Some("0-5s: hello"));
        assert_eq!(wizard.step().number(), 3);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].1.product_url.as_deref(), Some("https://stateproperty.com/signet"));
        assert!(calls[0].1.product_input.is_none());
        assert_eq!(
            calls[1].1.selected_hook.as_deref(),
            Some("POV: You're about to see the jewelry piece that changes everything")
        );
        assert_eq!(
            calls[2].1.selected_angle.as_deref(),
            Some("Quality Spotlight: Highlight the craftsmanship and premium materials up close")
        );
    }

    #[tokio::test]
    async fn test_empty_input_is_blocked_without_a_call() {
        let gateway = ScriptedGateway::default();
        let mut wizard = Wizard::new();
        wizard.set_product_url("https://ignored-while-description-is-active");

        assert_eq!(
            wizard.advance(&gateway).await,
            Err(WizardError::Validation(MISSING_INPUT))
        );
        assert!(gateway.calls().is_empty());
        assert!(!wizard.is_busy());
    }

    #[tokio::test]
    async fn test_angles_blocked_without_selected_hook() {
        let gateway = ScriptedGateway::default();
        let mut wizard = wizard_at_hook_selection();

        assert_eq!(
            wizard.advance(&gateway).await,
            Err(WizardError::Validation(MISSING_HOOK))
        );
        assert_eq!(wizard.step(), WizardStep::SelectingHook);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_script_blocked_without_selected_angle() {
        let gateway = ScriptedGateway::default();
        let mut wizard = wizard_at_angle_selection();

        assert_eq!(
            wizard.advance(&gateway).await,
            Err(WizardError::Validation(MISSING_ANGLE))
        );
        assert_eq!(wizard.step(), WizardStep::SelectingAngle);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_call_keeps_step_and_selection() {
        let gateway = ScriptedGateway::with(vec![server_error()]);
        let mut wizard = wizard_at_hook_selection();
        wizard.select_hook("2").unwrap();

        let err = wizard.advance(&gateway).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to generate angles. Please try again.");
        assert_eq!(wizard.step(), WizardStep::SelectingHook);
        assert_eq!(wizard.selected_hook_id(), Some("2"));
        assert_eq!(wizard.hooks().len(), 5);
        assert!(!wizard.is_busy());
    }

    #[test]
    fn test_second_submission_while_in_flight_is_refused() {
        let mut wizard = Wizard::new();
        wizard.set_product_input("charm necklace");

        let pending = wizard.begin_next().unwrap();
        assert!(wizard.is_busy());
        assert_eq!(wizard.begin_next().unwrap_err(), WizardError::Busy);

        wizard.complete(pending, server_error()).unwrap_err();
        assert!(!wizard.is_busy());
        assert!(wizard.begin_next().is_ok());
    }

    #[test]
    fn test_result_arriving_after_back_is_discarded() {
        let mut wizard = wizard_at_hook_selection();
        wizard.select_hook("3").unwrap();
        let pending = wizard.begin_next().unwrap();

        assert_eq!(wizard.back(), Ok(WizardStep::CollectingInput));
        assert!(!wizard.is_busy());

        let completion = wizard
            .complete(pending, Ok(TaskOutput::Angles(fallback_angles())))
            .unwrap();
        assert_eq!(completion, Completion::Discarded);
        assert_eq!(wizard.step(), WizardStep::CollectingInput);
        assert!(wizard.angles().is_empty());
    }

    #[test]
    fn test_result_arriving_after_reset_is_discarded() {
        let mut wizard = Wizard::new();
        wizard.set_product_input("stacking rings");
        let pending = wizard.begin_next().unwrap();

        wizard.reset();

        let completion = wizard
            .complete(pending, Ok(TaskOutput::Hooks(fallback_hooks())))
            .unwrap();
        assert_eq!(completion, Completion::Discarded);
        assert!(wizard.hooks().is_empty());
        assert_eq!(wizard.step(), WizardStep::CollectingInput);
    }

    #[test]
    fn test_back_then_forward_reuses_cached_results() {
        let mut wizard = wizard_at_angle_selection();

        assert_eq!(wizard.back(), Ok(WizardStep::SelectingHook));
        assert_eq!(wizard.back(), Ok(WizardStep::CollectingInput));
        assert_eq!(wizard.hooks().len(), 5);
        assert_eq!(wizard.angles().len(), 5);

        assert_eq!(wizard.forward(), Ok(WizardStep::SelectingHook));
        assert_eq!(wizard.forward(), Ok(WizardStep::SelectingAngle));
    }

    #[test]
    fn test_forward_refused_once_inputs_change() {
        let mut wizard = wizard_at_angle_selection();
        wizard.back().unwrap();

        wizard.select_hook("5").unwrap();
        assert!(matches!(
            wizard.forward(),
            Err(WizardError::InvalidTransition { action: "forward", .. })
        ));

        wizard.back().unwrap();
        wizard.set_product_input("a different bracelet");
        assert!(wizard.forward().is_err());
    }

    #[test]
    fn test_back_not_available_from_first_or_last_step() {
        let mut wizard = Wizard::new();
        assert!(wizard.back().is_err());

        let mut wizard = wizard_at_angle_selection();
        wizard.select_angle("angle_1").unwrap();
        let pending = wizard.begin_next().unwrap();
        wizard
            .complete(pending, Ok(TaskOutput::Script("script".to_string())))
            .unwrap();
        assert_eq!(wizard.step(), WizardStep::ScriptReady);
        assert!(wizard.back().is_err());
        assert!(wizard.begin_next().is_err());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut wizard = wizard_at_angle_selection();
        wizard.select_angle("angle_2").unwrap();

        wizard.reset();

        assert_eq!(wizard.step(), WizardStep::CollectingInput);
        assert!(wizard.hooks().is_empty());
        assert!(wizard.angles().is_empty());
        assert!(wizard.selected_hook_id().is_none());
        assert!(wizard.selected_angle_id().is_none());
        assert!(wizard.script().is_none());
        assert!(wizard.forward().is_err());
    }

    #[test]
    fn test_selecting_unknown_ids_is_rejected() {
        let mut wizard = wizard_at_hook_selection();
        assert!(matches!(
            wizard.select_hook("hook_99"),
            Err(WizardError::UnknownSelection { kind: "hook", .. })
        ));
        assert!(wizard.select_angle("angle_1").is_err());
    }

    #[test]
    fn test_refetched_hooks_drop_stale_selection() {
        let mut wizard = wizard_at_hook_selection();
        wizard.select_hook("5").unwrap();
        wizard.back().unwrap();

        let pending = wizard.begin_next().unwrap();
        let fresh = vec![Hook {
            id: "hook_a".to_string(),
            text: "New hook".to_string(),
            description: "fresh".to_string(),
        }];
        wizard.complete(pending, Ok(TaskOutput::Hooks(fresh))).unwrap();

        assert_eq!(wizard.selected_hook_id(), None);
        assert_eq!(wizard.hooks()[0].id, "hook_a");
    }

    #[test]
    fn test_mismatched_output_is_a_failure() {
        let mut wizard = Wizard::new();
        wizard.set_product_input("locket");
        let pending = wizard.begin_next().unwrap();

        let err = wizard
            .complete(pending, Ok(TaskOutput::Script("oops".to_string())))
            .unwrap_err();

        assert!(matches!(err, WizardError::Generation { task: Task::Hooks, .. }));
        assert_eq!(wizard.step(), WizardStep::CollectingInput);
    }
}
