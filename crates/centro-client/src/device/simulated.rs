//! In-process softphone device for tests and local development.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use centro_core::error::AppError;

use super::{CallHandle, CallParameters, DeviceEvent, DeviceOptions, VoiceDevice};

const EVENT_BUFFER: usize = 64;

/// Loopback softphone endpoint.
///
/// Lifecycle-faithful but carries no media: registration, inbound
/// delivery, outbound setup, and token swaps behave like the real
/// device. The remote side is driven explicitly through
/// [`SimulatedDevice::push_incoming`] and the `remote_*` methods on
/// [`SimulatedCall`].
#[derive(Debug)]
pub struct SimulatedDevice {
    /// Event stream shared with every call created by this device.
    events: mpsc::Sender<DeviceEvent>,
    options: DeviceOptions,
    registered: AtomicBool,
    destroyed: AtomicBool,
    token: Mutex<Option<String>>,
    token_updates: AtomicU64,
    connect_count: AtomicU64,
    /// When set, the next `register` emits a failure instead of registering.
    registration_failure: Mutex<Option<String>>,
    /// When set, the next `connect` fails with this message.
    connect_failure: Mutex<Option<String>>,
    last_outbound: Mutex<Option<Arc<SimulatedCall>>>,
    next_call: AtomicU64,
}

impl SimulatedDevice {
    /// Creates a device and the event stream its controller consumes.
    pub fn new() -> (Arc<Self>, mpsc::Receiver<DeviceEvent>) {
        Self::with_options(DeviceOptions::default())
    }

    /// Creates a device with explicit options.
    pub fn with_options(options: DeviceOptions) -> (Arc<Self>, mpsc::Receiver<DeviceEvent>) {
        let (events, receiver) = mpsc::channel(EVENT_BUFFER);
        let device = Arc::new(Self {
            events,
            options,
            registered: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            token: Mutex::new(None),
            token_updates: AtomicU64::new(0),
            connect_count: AtomicU64::new(0),
            registration_failure: Mutex::new(None),
            connect_failure: Mutex::new(None),
            last_outbound: Mutex::new(None),
            next_call: AtomicU64::new(0),
        });
        (device, receiver)
    }

    /// Makes the next `register` call report the given platform failure.
    pub fn fail_next_registration(&self, message: impl Into<String>) {
        *lock(&self.registration_failure) = Some(message.into());
    }

    /// Makes the next `connect` call fail with the given message.
    pub fn fail_next_connect(&self, message: impl Into<String>) {
        *lock(&self.connect_failure) = Some(message.into());
    }

    /// Delivers a ringing inbound call from the given caller.
    pub async fn push_incoming(&self, from: &str) -> Arc<SimulatedCall> {
        let call = Arc::new(SimulatedCall::new(
            self.next_sid(),
            CallParameters {
                from: Some(from.to_string()),
                to: None,
            },
            self.events.clone(),
        ));
        let _ = self
            .events
            .send(DeviceEvent::Incoming {
                call: call.clone() as Arc<dyn CallHandle>,
            })
            .await;
        call
    }

    /// Whether the device is currently registered.
    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    /// The most recently supplied access token.
    pub fn token(&self) -> Option<String> {
        lock(&self.token).clone()
    }

    /// How many times the token was swapped after registration.
    pub fn token_updates(&self) -> u64 {
        self.token_updates.load(Ordering::SeqCst)
    }

    /// How many outbound legs were started.
    pub fn connect_count(&self) -> u64 {
        self.connect_count.load(Ordering::SeqCst)
    }

    /// The most recent outbound leg, for driving the remote side.
    pub fn outbound_call(&self) -> Option<Arc<SimulatedCall>> {
        lock(&self.last_outbound).clone()
    }

    /// The options the device was constructed with.
    pub fn options(&self) -> &DeviceOptions {
        &self.options
    }

    fn next_sid(&self) -> String {
        let n = self.next_call.fetch_add(1, Ordering::SeqCst) + 1;
        format!("SIM{n:08}")
    }
}

#[async_trait]
impl VoiceDevice for SimulatedDevice {
    async fn register(&self, token: &str) -> Result<(), AppError> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(AppError::device("Device was destroyed"));
        }
        *lock(&self.token) = Some(token.to_string());

        let failure = lock(&self.registration_failure).take();
        if let Some(message) = failure {
            let _ = self
                .events
                .send(DeviceEvent::RegistrationFailed { message })
                .await;
            return Ok(());
        }

        self.registered.store(true, Ordering::SeqCst);
        let _ = self.events.send(DeviceEvent::Registered).await;
        Ok(())
    }

    async fn update_token(&self, token: &str) -> Result<(), AppError> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(AppError::device("Device was destroyed"));
        }
        *lock(&self.token) = Some(token.to_string());
        self.token_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn connect(&self, to: &str) -> Result<Arc<dyn CallHandle>, AppError> {
        if !self.registered.load(Ordering::SeqCst) {
            return Err(AppError::device("Device is not registered"));
        }
        if let Some(message) = lock(&self.connect_failure).take() {
            return Err(AppError::device(message));
        }
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        let call = Arc::new(SimulatedCall::new(
            self.next_sid(),
            CallParameters {
                from: None,
                to: Some(to.to_string()),
            },
            self.events.clone(),
        ));
        *lock(&self.last_outbound) = Some(call.clone());
        Ok(call as Arc<dyn CallHandle>)
    }

    async fn destroy(&self) -> Result<(), AppError> {
        self.destroyed.store(true, Ordering::SeqCst);
        self.registered.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// One simulated call leg.
#[derive(Debug)]
pub struct SimulatedCall {
    sid: String,
    parameters: CallParameters,
    events: mpsc::Sender<DeviceEvent>,
    muted: AtomicBool,
    accepted: AtomicBool,
    ended: AtomicBool,
}

impl SimulatedCall {
    fn new(sid: String, parameters: CallParameters, events: mpsc::Sender<DeviceEvent>) -> Self {
        Self {
            sid,
            parameters,
            events,
            muted: AtomicBool::new(false),
            accepted: AtomicBool::new(false),
            ended: AtomicBool::new(false),
        }
    }

    /// Whether the leg was answered.
    pub fn is_accepted(&self) -> bool {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Whether the leg reached a terminal state.
    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    /// Remote party answers an outbound leg.
    pub async fn remote_answer(&self) {
        if self.ended.load(Ordering::SeqCst) || self.accepted.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self
            .events
            .send(DeviceEvent::CallAccepted {
                call_sid: self.sid.clone(),
            })
            .await;
    }

    /// Remote party hangs up.
    pub async fn remote_hangup(&self) {
        if self.ended.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self
            .events
            .send(DeviceEvent::CallDisconnected {
                call_sid: self.sid.clone(),
            })
            .await;
    }

    /// Caller abandons the leg before it is answered.
    pub async fn remote_cancel(&self) {
        if self.accepted.load(Ordering::SeqCst) || self.ended.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self
            .events
            .send(DeviceEvent::CallCanceled {
                call_sid: self.sid.clone(),
            })
            .await;
    }
}

#[async_trait]
impl CallHandle for SimulatedCall {
    fn sid(&self) -> &str {
        &self.sid
    }

    fn parameters(&self) -> CallParameters {
        self.parameters.clone()
    }

    async fn accept(&self) -> Result<(), AppError> {
        if self.ended.load(Ordering::SeqCst) || self.accepted.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let _ = self
            .events
            .send(DeviceEvent::CallAccepted {
                call_sid: self.sid.clone(),
            })
            .await;
        Ok(())
    }

    async fn reject(&self) -> Result<(), AppError> {
        if self.ended.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let _ = self
            .events
            .send(DeviceEvent::CallRejected {
                call_sid: self.sid.clone(),
            })
            .await;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), AppError> {
        if self.ended.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let _ = self
            .events
            .send(DeviceEvent::CallDisconnected {
                call_sid: self.sid.clone(),
            })
            .await;
        Ok(())
    }

    async fn set_muted(&self, muted: bool) -> Result<(), AppError> {
        self.muted.store(muted, Ordering::SeqCst);
        Ok(())
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_emits_registered_and_stores_token() {
        let (device, mut events) = SimulatedDevice::new();
        device.register("tok-1").await.unwrap();

        assert!(device.is_registered());
        assert_eq!(device.token().as_deref(), Some("tok-1"));
        assert!(matches!(events.recv().await, Some(DeviceEvent::Registered)));
    }

    #[tokio::test]
    async fn test_registration_failure_emits_event_once() {
        let (device, mut events) = SimulatedDevice::new();
        device.fail_next_registration("bad credentials");

        device.register("tok-1").await.unwrap();
        assert!(!device.is_registered());
        assert!(matches!(
            events.recv().await,
            Some(DeviceEvent::RegistrationFailed { message }) if message == "bad credentials"
        ));

        device.register("tok-1").await.unwrap();
        assert!(device.is_registered());
    }

    #[tokio::test]
    async fn test_connect_requires_registration() {
        let (device, _events) = SimulatedDevice::new();
        assert!(device.connect("+15550001111").await.is_err());

        device.register("tok-1").await.unwrap();
        let call = device.connect("+15550001111").await.unwrap();
        assert_eq!(call.parameters().to.as_deref(), Some("+15550001111"));
        assert_eq!(device.connect_count(), 1);
    }

    #[tokio::test]
    async fn test_call_terminal_events_fire_once() {
        let (device, mut events) = SimulatedDevice::new();
        device.register("tok-1").await.unwrap();
        let _ = events.recv().await;

        let call = device.push_incoming("+15550001111").await;
        assert!(matches!(events.recv().await, Some(DeviceEvent::Incoming { .. })));

        call.accept().await.unwrap();
        call.accept().await.unwrap();
        assert!(matches!(events.recv().await, Some(DeviceEvent::CallAccepted { .. })));

        call.remote_hangup().await;
        call.remote_hangup().await;
        call.disconnect().await.unwrap();
        assert!(matches!(
            events.recv().await,
            Some(DeviceEvent::CallDisconnected { .. })
        ));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_only_before_accept() {
        let (device, mut events) = SimulatedDevice::new();
        device.register("tok-1").await.unwrap();
        let _ = events.recv().await;

        let call = device.push_incoming("+15550001111").await;
        call.accept().await.unwrap();
        call.remote_cancel().await;

        assert!(matches!(events.recv().await, Some(DeviceEvent::Incoming { .. })));
        assert!(matches!(events.recv().await, Some(DeviceEvent::CallAccepted { .. })));
        assert!(events.try_recv().is_err());
        assert!(!call.is_ended());
    }
}
