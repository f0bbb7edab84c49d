//! The mock engine.

use super::install::{Fetch, Installer};
use crate::error::FetchError;
use crate::predicate::{Decision, MatchRule};
use crate::queue::{Behavior, BehaviorQueue, DecisionQueue, Gate};
use crate::recording::CallRecorder;
use crate::request::{build_request, normalize_request, ExecutionContext, FetchInput, Request, RequestInit};
use crate::response::{reject, synthesize, MockOutcome, Rejection, Response, ResponseInit};
use async_trait::async_trait;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// Deferred result of one call.
pub type FetchFuture = BoxFuture<'static, Result<Response, FetchError>>;

/// One entry of [`FetchMock::mock_responses`]: an outcome and its overrides.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub outcome: MockOutcome,
    pub init: Option<ResponseInit>,
}

impl From<MockOutcome> for MockReply {
    fn from(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            init: None,
        }
    }
}

impl From<&str> for MockReply {
    fn from(body: &str) -> Self {
        MockOutcome::from(body).into()
    }
}

impl From<String> for MockReply {
    fn from(body: String) -> Self {
        MockOutcome::from(body).into()
    }
}

impl<T: Into<MockOutcome>> From<(T, ResponseInit)> for MockReply {
    fn from((outcome, init): (T, ResponseInit)) -> Self {
        Self {
            outcome: outcome.into(),
            init: Some(init),
        }
    }
}

/// Queues consulted at call start, guarded by a single lock.
#[derive(Default)]
struct EngineState {
    decisions: DecisionQueue,
    behaviors: BehaviorQueue,
}

struct Inner {
    state: Mutex<EngineState>,
    recorder: CallRecorder,
    context: ExecutionContext,
    installer: Arc<dyn Installer>,
    /// Hook that was installed when the engine was created; unmocked calls go here.
    original: Arc<dyn Fetch>,
    enabled: AtomicBool,
}

/// Controllable stand-in for a fetch implementation.
///
/// Every call is normalized and recorded, then a decision says whether it is
/// mocked. Mocked calls take the next behavior (a one-shot if one is queued,
/// otherwise the persistent default); unmocked calls go to the original
/// implementation with the input exactly as given.
///
/// Cloning is cheap and clones share all state.
#[derive(Clone)]
pub struct FetchMock {
    inner: Arc<Inner>,
}

impl FetchMock {
    /// Create an engine capturing the installer's current hook as the original.
    pub fn new(installer: Arc<dyn Installer>) -> Self {
        Self::with_context(installer, ExecutionContext::default())
    }

    /// Create an engine that resolves relative URLs against `context`.
    pub fn with_context(installer: Arc<dyn Installer>, context: ExecutionContext) -> Self {
        let original = installer.current();
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(EngineState::default()),
                recorder: CallRecorder::new(),
                context,
                installer,
                original,
                enabled: AtomicBool::new(false),
            }),
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.inner.context
    }

    /// Start a call.
    ///
    /// Normalization, recording and the decision/behavior selection happen
    /// before this returns, so queue entries are assigned in call order no
    /// matter when the returned futures are polled.
    pub fn fetch(&self, input: impl Into<FetchInput>, init: Option<RequestInit>) -> FetchFuture {
        let input = input.into();

        let request = match normalize_request(&input, init.as_ref(), &self.inner.context) {
            Ok(request) => request,
            Err(FetchError::Aborted) => {
                // Well-formed but already cancelled: recorded, never resolved.
                if let Ok(request) = build_request(&input, init.as_ref(), &self.inner.context) {
                    self.inner.recorder.record(&request);
                }
                debug!("Call to {:?} aborted before it started", input);
                return future::ready(Err(FetchError::Aborted)).boxed();
            }
            Err(err) => {
                debug!("Rejecting call input {:?}: {}", input, err);
                return future::ready(Err(err)).boxed();
            }
        };
        self.inner.recorder.record(&request);

        let Gate { decision, paired } = self.inner.state.lock().decisions.next();
        // Predicates run outside the lock; they may call back into the engine.
        let mocked = match decision.evaluate(&request) {
            Ok(mocked) => mocked,
            Err(err) => return future::ready(Err(err)).boxed(),
        };
        if !mocked {
            debug!("{} {} not mocked, delegating", request.method(), request.url());
            return self.delegate(input, init);
        }

        let behavior = match paired {
            Some(behavior) => behavior,
            None => self.inner.state.lock().behaviors.next(),
        };
        debug!(
            "{} {} mocked with {} behavior",
            request.method(),
            request.url(),
            behavior.kind()
        );

        match behavior {
            Behavior::Respond { outcome, init: overrides } => {
                async move { synthesize(&request, outcome, &overrides).await }.boxed()
            }
            Behavior::RespondIf {
                rule,
                outcome,
                init: overrides,
            } => match rule.matches(&request) {
                Ok(true) => async move { synthesize(&request, outcome, &overrides).await }.boxed(),
                Ok(false) => {
                    debug!("{} did not match conditional response, delegating", request.url());
                    self.delegate(input, init)
                }
                Err(err) => future::ready(Err(err)).boxed(),
            },
            Behavior::Reject(rejection) => async move { reject(&request, rejection).await }.boxed(),
            Behavior::Abort => future::ready(Err(FetchError::Aborted)).boxed(),
        }
    }

    fn delegate(&self, input: FetchInput, init: Option<RequestInit>) -> FetchFuture {
        let original = self.inner.original.clone();
        async move { original.fetch(input, init).await }.boxed()
    }

    fn push_decision(&self, decision: Decision) -> &Self {
        self.push_gate(decision.into())
    }

    fn push_gate(&self, gate: Gate) -> &Self {
        self.inner.state.lock().decisions.push_once(gate);
        self
    }

    fn set_decision(&self, decision: Decision) -> &Self {
        self.inner.state.lock().decisions.set_fallback(decision.into());
        self
    }

    fn push_behavior(&self, behavior: Behavior) -> &Self {
        self.inner.state.lock().behaviors.push_once(behavior);
        self
    }

    fn set_behavior(&self, behavior: Behavior) -> &Self {
        self.inner.state.lock().behaviors.set_fallback(behavior);
        self
    }

    // Responses

    /// Persistent response for mocked calls.
    pub fn mock_response(&self, outcome: impl Into<MockOutcome>, init: Option<ResponseInit>) -> &Self {
        self.set_behavior(Behavior::respond(outcome, init))
    }

    /// Response for the next mocked call.
    pub fn mock_response_once(
        &self,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.push_behavior(Behavior::respond(outcome, init))
    }

    /// Alias for [`mock_response_once`](Self::mock_response_once).
    pub fn once(&self, outcome: impl Into<MockOutcome>, init: Option<ResponseInit>) -> &Self {
        self.mock_response_once(outcome, init)
    }

    /// Queue one response per entry, in order.
    pub fn mock_responses<I>(&self, replies: I) -> &Self
    where
        I: IntoIterator,
        I::Item: Into<MockReply>,
    {
        let mut state = self.inner.state.lock();
        for reply in replies {
            let MockReply { outcome, init } = reply.into();
            state.behaviors.push_once(Behavior::respond(outcome, init));
        }
        drop(state);
        self
    }

    /// Persistent response for mocked calls matching `rule`; the others are
    /// delegated.
    pub fn mock_response_if(
        &self,
        rule: impl Into<MatchRule>,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.set_behavior(Behavior::RespondIf {
            rule: rule.into(),
            outcome: outcome.into(),
            init: init.unwrap_or_default(),
        })
    }

    /// Mock the next call with this response only if it matches `rule`.
    ///
    /// The response is used by that call or not at all.
    pub fn mock_response_once_if(
        &self,
        rule: impl Into<MatchRule>,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.push_gate(Gate::paired(
            Decision::mock_if(rule),
            Behavior::respond(outcome, init),
        ))
    }

    // Failures

    /// Fail every mocked call. Use [`Rejection::none`] for a valueless rejection.
    pub fn mock_reject(&self, rejection: impl Into<Rejection>) -> &Self {
        self.set_behavior(Behavior::Reject(rejection.into()))
    }

    pub fn mock_reject_once(&self, rejection: impl Into<Rejection>) -> &Self {
        self.push_behavior(Behavior::Reject(rejection.into()))
    }

    /// Fail every mocked call as aborted.
    pub fn mock_abort(&self) -> &Self {
        self.set_behavior(Behavior::Abort)
    }

    pub fn mock_abort_once(&self) -> &Self {
        self.push_behavior(Behavior::Abort)
    }

    // Decisions

    /// Mock every call.
    pub fn do_mock(&self) -> &Self {
        self.set_decision(Decision::always())
    }

    /// Mock every call with this response.
    pub fn do_mock_with(&self, outcome: impl Into<MockOutcome>, init: Option<ResponseInit>) -> &Self {
        self.do_mock().mock_response(outcome, init)
    }

    /// Mock the next call.
    pub fn do_mock_once(&self) -> &Self {
        self.push_decision(Decision::always())
    }

    pub fn do_mock_once_with(
        &self,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.do_mock_once().mock_response_once(outcome, init)
    }

    /// Alias for [`do_mock_once`](Self::do_mock_once).
    pub fn mock_once(&self) -> &Self {
        self.do_mock_once()
    }

    pub fn mock_once_with(&self, outcome: impl Into<MockOutcome>, init: Option<ResponseInit>) -> &Self {
        self.do_mock_once_with(outcome, init)
    }

    /// Mock only calls matching `rule`.
    pub fn do_mock_if(&self, rule: impl Into<MatchRule>) -> &Self {
        self.set_decision(Decision::mock_if(rule))
    }

    pub fn do_mock_if_with(
        &self,
        rule: impl Into<MatchRule>,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.do_mock_if(rule).mock_response(outcome, init)
    }

    /// Alias for [`do_mock_if`](Self::do_mock_if).
    pub fn mock_if(&self, rule: impl Into<MatchRule>) -> &Self {
        self.do_mock_if(rule)
    }

    pub fn mock_if_with(
        &self,
        rule: impl Into<MatchRule>,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.do_mock_if_with(rule, outcome, init)
    }

    /// Mock the next call if it matches `rule`.
    pub fn do_mock_once_if(&self, rule: impl Into<MatchRule>) -> &Self {
        self.push_decision(Decision::mock_if(rule))
    }

    pub fn do_mock_once_if_with(
        &self,
        rule: impl Into<MatchRule>,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.mock_response_once_if(rule, outcome, init)
    }

    /// Alias for [`do_mock_once_if`](Self::do_mock_once_if).
    pub fn mock_once_if(&self, rule: impl Into<MatchRule>) -> &Self {
        self.do_mock_once_if(rule)
    }

    pub fn mock_once_if_with(
        &self,
        rule: impl Into<MatchRule>,
        outcome: impl Into<MockOutcome>,
        init: Option<ResponseInit>,
    ) -> &Self {
        self.do_mock_once_if_with(rule, outcome, init)
    }

    /// Delegate every call.
    pub fn dont_mock(&self) -> &Self {
        self.set_decision(Decision::never())
    }

    /// Delegate the next call.
    pub fn dont_mock_once(&self) -> &Self {
        self.push_decision(Decision::never())
    }

    /// Delegate calls matching `rule`, mock the rest.
    pub fn dont_mock_if(&self, rule: impl Into<MatchRule>) -> &Self {
        self.set_decision(Decision::skip_if(rule))
    }

    /// Delegate the next call if it matches `rule`.
    pub fn dont_mock_once_if(&self, rule: impl Into<MatchRule>) -> &Self {
        self.push_decision(Decision::skip_if(rule))
    }

    // Inspection

    /// Whether a call with this input would be mocked. Nothing is consumed.
    pub fn is_mocking(
        &self,
        input: impl Into<FetchInput>,
        init: Option<&RequestInit>,
    ) -> Result<bool, FetchError> {
        let request = normalize_request(&input.into(), init, &self.inner.context)?;
        let decision = self.inner.state.lock().decisions.peek().decision.clone();
        decision.evaluate(&request)
    }

    /// Requests of every call so far, in call order.
    pub fn requests(&self) -> Vec<Request> {
        self.inner.recorder.snapshot()
    }

    pub fn call_count(&self) -> usize {
        self.inner.recorder.len()
    }

    /// Forget every registration and recorded call. Installation is untouched.
    pub fn reset_mocks(&self) -> &Self {
        let mut state = self.inner.state.lock();
        state.decisions.reset();
        state.behaviors.reset();
        drop(state);
        self.inner.recorder.clear();
        info!("Mocks reset");
        self
    }

    // Installation

    /// Install this engine as the hook.
    ///
    /// The installed hook does not keep the engine alive. Once every handle is
    /// dropped, calls through the installer reach the original again.
    pub fn enable_mocks(&self) -> &Self {
        self.inner.installer.install(Arc::new(InstalledMock {
            inner: Arc::downgrade(&self.inner),
            original: self.inner.original.clone(),
        }));
        self.inner.enabled.store(true, Ordering::SeqCst);
        info!("Fetch mocks enabled");
        self
    }

    /// Put the original hook back.
    pub fn disable_mocks(&self) -> &Self {
        self.inner.installer.install(self.inner.original.clone());
        self.inner.enabled.store(false, Ordering::SeqCst);
        info!("Fetch mocks disabled");
        self
    }

    /// Whether this engine is currently installed.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for FetchMock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("FetchMock")
            .field("context", &self.inner.context)
            .field("pending_decisions", &state.decisions.pending())
            .field("pending_behaviors", &state.behaviors.pending())
            .field("calls", &self.inner.recorder.len())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Hook put in place by [`FetchMock::enable_mocks`].
///
/// Holds the engine weakly since the engine owns the installer.
struct InstalledMock {
    inner: Weak<Inner>,
    original: Arc<dyn Fetch>,
}

#[async_trait]
impl Fetch for InstalledMock {
    async fn fetch(
        &self,
        input: FetchInput,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError> {
        match self.inner.upgrade() {
            Some(inner) => FetchMock { inner }.fetch(input, init).await,
            None => {
                debug!("Mock engine dropped, calling original for {:?}", input);
                self.original.fetch(input, init).await
            }
        }
    }
}

#[async_trait]
impl Fetch for FetchMock {
    async fn fetch(
        &self,
        input: FetchInput,
        init: Option<RequestInit>,
    ) -> Result<Response, FetchError> {
        FetchMock::fetch(self, input, init).await
    }
}
