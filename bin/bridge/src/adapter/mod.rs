mod bands;
pub use bands::{Bands, Closed, Tier};

mod binding;
pub use binding::{Binding, Body, Reads, Remote, Sensor, Speed, Switch, Temperature, Trigger};

mod snapshot;
pub use snapshot::{Slot, Snapshot};

pub mod conditioner;
pub mod cooker;
pub mod elevator;
pub mod fan;
pub mod heater;
pub mod heater_cooler;
pub mod infrared;
pub mod light;
pub mod light_group;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use hap::{Accessory, CharacteristicType, Handler, HandlerKey, Props, ServiceType, Value};
use hyunho::{Endpoint, Token, Transport};
use log::{debug, error, info};
use serde::de::DeserializeOwned;

pub const MANUFACTURER: &str = "HyunHo Home";

/// One characteristic of a service and where its value lives.
#[derive(Clone, Debug, PartialEq)]
pub struct Capability {
    pub characteristic: CharacteristicType,
    pub props: Props,
    pub binding: Binding,
}

impl Capability {
    pub fn new(characteristic: CharacteristicType, binding: Binding) -> Capability {
        Capability {
            characteristic,
            props: Props::default(),
            binding,
        }
    }

    pub fn props(mut self, props: Props) -> Capability {
        self.props = props;
        self
    }

    fn label(&self) -> String {
        match &self.binding {
            Binding::Switch(switch) => match switch.fixture() {
                Some(index) => format!("({index}) {:?}", self.characteristic),
                None => format!("{:?}", self.characteristic),
            },
            _ => format!("{:?}", self.characteristic),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceProfile {
    pub service_type: ServiceType,
    pub subtype: Option<String>,
    pub name: String,
    pub capabilities: Vec<Capability>,
}

impl ServiceProfile {
    pub fn new(service_type: ServiceType, name: impl Into<String>) -> ServiceProfile {
        ServiceProfile {
            service_type,
            subtype: None,
            name: name.into(),
            capabilities: vec![],
        }
    }

    pub fn subtype(mut self, subtype: impl Into<String>) -> ServiceProfile {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with(mut self, capability: Capability) -> ServiceProfile {
        self.capabilities.push(capability);
        self
    }
}

/// Everything that distinguishes one device category from another.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub model: &'static str,
    /// Query parameters sent first on every request, e.g. `room_name`.
    pub scope: Vec<(&'static str, String)>,
    pub snapshot: Snapshot,
    pub services: Vec<ServiceProfile>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Reading {
    /// Fresh value from the control server.
    Device(Value),
    /// Answered without a round trip.
    Local(Value),
    /// The control server could not be read.
    Fallback(Value),
}

impl Reading {
    pub fn value(self) -> Value {
        match self {
            Reading::Device(value) | Reading::Local(value) | Reading::Fallback(value) => value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Write {
    Sent(Endpoint),
    /// The remembered token already matched, nothing was sent.
    Unchanged,
    Ignored,
    Invalid(Value),
    Rejected(u16),
    Failed(String),
}

#[derive(Debug)]
enum Failure {
    Transport(hyunho::Error),
    Status(u16, String),
    Body(hyunho::Error),
    MissingField(&'static str),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Transport(err) => write!(f, "transport error: {err}"),
            Failure::Status(status, body) => write!(f, "{status} {body}"),
            Failure::Body(err) => write!(f, "unexpected body: {err}"),
            Failure::MissingField(field) => write!(f, "missing field {field}"),
        }
    }
}

/// Bridges the characteristics of one accessory to the control server.
pub struct Adapter {
    name: String,
    model: &'static str,
    transport: Arc<dyn Transport>,
    scope: Vec<(&'static str, String)>,
    services: Vec<ServiceProfile>,
    snapshot: Snapshot,
}

impl Adapter {
    pub fn new(
        name: impl Into<String>,
        transport: Arc<dyn Transport>,
        profile: Profile,
    ) -> Adapter {
        Adapter {
            name: name.into(),
            model: profile.model,
            transport,
            scope: profile.scope,
            services: profile.services,
            snapshot: profile.snapshot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.services.iter().flat_map(|s| s.capabilities.iter())
    }

    /// Handler keys bound to `characteristic`, in registration order.
    pub fn keys(&self, characteristic: CharacteristicType) -> Vec<HandlerKey> {
        self.capabilities()
            .enumerate()
            .filter(|(_, c)| c.characteristic == characteristic)
            .map(|(key, _)| key)
            .collect()
    }

    /// Adds the information, services and characteristic bindings to
    /// `accessory`. Handler keys are the capability positions.
    pub fn register(&self, accessory: &mut Accessory) {
        accessory
            .information()
            .set_characteristic(CharacteristicType::Manufacturer, MANUFACTURER)
            .set_characteristic(CharacteristicType::Model, self.model)
            .set_characteristic(CharacteristicType::SerialNumber, self.model);

        let mut key = 0;

        for profile in &self.services {
            let service = accessory.service(profile.service_type, profile.subtype.as_deref());
            service.set_characteristic(CharacteristicType::Name, profile.name.as_str());

            for capability in &profile.capabilities {
                let characteristic = service.characteristic(capability.characteristic);
                characteristic.set_props(capability.props.clone()).on_get(key);

                if capability.characteristic.is_writable() {
                    characteristic.on_set(key);
                }

                key += 1;
            }
        }
    }

    fn endpoint(&self, path: &str, fixture: Option<usize>) -> Endpoint {
        let mut endpoint = Endpoint::new(path);

        for (key, value) in &self.scope {
            endpoint = endpoint.param(*key, value);
        }

        if let Some(fixture) = fixture {
            endpoint = endpoint.param("device_num", fixture);
        }

        endpoint
    }

    async fn fetch<T>(&self, endpoint: Endpoint) -> Result<T, Failure>
    where
        T: DeserializeOwned + FromStr + Send,
    {
        let response = self
            .transport
            .get(endpoint)
            .await
            .map_err(Failure::Transport)?;

        if !response.is_success() {
            return Err(Failure::Status(
                response.status,
                response.text().into_owned(),
            ));
        }

        response.parse().map_err(Failure::Body)
    }

    async fn fetch_temperature(&self, endpoint: Endpoint, body: Body) -> Result<f32, Failure> {
        match body {
            Body::Number => self.fetch(endpoint).await,
            Body::Field(field) => {
                let body: serde_json::Value = self.fetch(endpoint).await?;
                body.get(field)
                    .and_then(serde_json::Value::as_f64)
                    .map(|value| value as f32)
                    .ok_or(Failure::MissingField(field))
            }
        }
    }

    pub async fn get(&mut self, key: HandlerKey) -> Reading {
        let Some(capability) = self.capabilities().nth(key) else {
            error!("{} has nothing bound to {}", self.name, key);
            return Reading::Fallback(Value::Bool(false));
        };

        let label = capability.label();
        let minimum = capability.props.min_value.unwrap_or_default();
        let binding = capability.binding.clone();

        match binding {
            Binding::Fixed(value) => Reading::Local(value),
            Binding::Switch(switch) => {
                let endpoint = self.endpoint(switch.get, switch.fixture());

                match self.fetch::<Token>(endpoint).await {
                    Ok(token) => {
                        self.snapshot.set(switch.slot, token);
                        let active = switch.reads.active(token);
                        info!("{} Get {} -> {}", self.name, label, active);
                        Reading::Device(active.into())
                    }
                    Err(failure) => {
                        error!("[ERROR] {} Get {} -> {}", self.name, label, failure);
                        let active = self
                            .snapshot
                            .get(switch.slot)
                            .map(|token| switch.reads.active(token))
                            .unwrap_or(false);
                        Reading::Fallback(active.into())
                    }
                }
            }
            Binding::Speed(speed) => {
                let endpoint = self.endpoint(speed.get, None);

                match self.fetch::<Token>(endpoint).await {
                    Ok(token) => {
                        self.snapshot.set(speed.slot, token);

                        match speed.bands.reading(token) {
                            Some(value) => {
                                info!("{} Get {} -> {} ({})", self.name, label, value, token);
                                Reading::Device(value.into())
                            }
                            None => {
                                error!(
                                    "[ERROR] {} Get {} -> unknown speed {}",
                                    self.name, label, token
                                );
                                Reading::Fallback(speed.bands.floor().into())
                            }
                        }
                    }
                    Err(failure) => {
                        error!("[ERROR] {} Get {} -> {}", self.name, label, failure);
                        let value = self
                            .snapshot
                            .get(speed.slot)
                            .and_then(|token| speed.bands.reading(token))
                            .unwrap_or(speed.bands.floor());
                        Reading::Fallback(value.into())
                    }
                }
            }
            Binding::Temperature(temperature) => {
                let endpoint = self.endpoint(temperature.get, None);

                match self.fetch_temperature(endpoint, temperature.body).await {
                    Ok(value) => {
                        info!("{} Get {} -> {}", self.name, label, value);
                        Reading::Device(value.into())
                    }
                    Err(failure) => {
                        error!("[ERROR] {} Get {} -> {}", self.name, label, failure);
                        Reading::Fallback(minimum.into())
                    }
                }
            }
            Binding::Trigger(_) => Reading::Local(false.into()),
            Binding::Sensor(sensor) => {
                let endpoint = self.endpoint(sensor.get, None);

                match self.fetch::<bool>(endpoint).await {
                    Ok(value) => {
                        info!("{} Get {} -> {}", self.name, label, value);
                        Reading::Device(value.into())
                    }
                    Err(failure) => {
                        error!("[ERROR] {} Get {} -> {}", self.name, label, failure);
                        Reading::Fallback(false.into())
                    }
                }
            }
            Binding::Remote(remote) => {
                Reading::Local((self.snapshot.get(remote.slot) == Some(Token::On)).into())
            }
        }
    }

    pub async fn set(&mut self, key: HandlerKey, value: Value) -> Write {
        let Some(capability) = self.capabilities().nth(key) else {
            error!("{} has nothing bound to {}", self.name, key);
            return Write::Ignored;
        };

        let label = capability.label();
        let binding = capability.binding.clone();

        match binding {
            Binding::Fixed(_) | Binding::Sensor(_) => {
                debug!("{} No Set {} -> {:?}", self.name, label, value);
                Write::Ignored
            }
            Binding::Switch(switch) => {
                let Some(active) = value.as_bool() else {
                    return self.invalid(&label, value);
                };

                let token = switch.token(active);
                if self.snapshot.get(switch.slot) == Some(token) {
                    debug!("{} Set {} -> {} unchanged", self.name, label, token);
                    return Write::Unchanged;
                }

                let mut endpoint = self.endpoint(switch.set, switch.fixture());
                if let Some(key) = switch.key {
                    endpoint = endpoint.param(key, token);
                }

                self.apply(endpoint, &label, Some((switch.slot, token)))
                    .await
            }
            Binding::Speed(speed) => {
                let Some(requested) = value.as_f32() else {
                    return self.invalid(&label, value);
                };

                match speed.bands.tier(requested) {
                    None => self.invalid(&label, value),
                    Some(Tier::NoChange) => {
                        debug!("{} Set {} -> {} keeps the speed", self.name, label, requested);
                        Write::Ignored
                    }
                    Some(Tier::Speed(token)) => {
                        if self.snapshot.get(speed.slot) == Some(token) {
                            debug!("{} Set {} -> {} unchanged", self.name, label, token);
                            return Write::Unchanged;
                        }

                        let endpoint = self.endpoint(speed.set, None).param(speed.key, token);
                        self.apply(endpoint, &label, Some((speed.slot, token)))
                            .await
                    }
                }
            }
            Binding::Temperature(temperature) => {
                let Some((path, key)) = temperature.set else {
                    debug!("{} No Set {} -> {:?}", self.name, label, value);
                    return Write::Ignored;
                };

                let Some(requested) = value.as_f32() else {
                    return self.invalid(&label, value);
                };

                let endpoint = self.endpoint(path, None).param(key, requested);
                self.apply(endpoint, &label, None).await
            }
            Binding::Trigger(trigger) => {
                if value.as_bool() != Some(true) {
                    debug!("{} Set {} -> {:?} does nothing", self.name, label, value);
                    return Write::Ignored;
                }

                let endpoint = self.endpoint(trigger.set, None);
                self.apply(endpoint, &label, None).await
            }
            Binding::Remote(remote) => {
                let Some(active) = value.as_bool() else {
                    return self.invalid(&label, value);
                };

                let (key_num, token) = if active {
                    (remote.on, Token::On)
                } else {
                    (remote.off, Token::Off)
                };

                let endpoint = self.endpoint(remote.set, None).param(remote.key, key_num);
                self.apply(endpoint, &label, Some((remote.slot, token)))
                    .await
            }
        }
    }

    fn invalid(&self, label: &str, value: Value) -> Write {
        error!("[ERROR] {} Set {} -> invalid value {:?}", self.name, label, value);
        Write::Invalid(value)
    }

    /// Sends a write; `remember` lands in the snapshot only once the server
    /// answered 200.
    async fn apply(
        &mut self,
        endpoint: Endpoint,
        label: &str,
        remember: Option<(Slot, Token)>,
    ) -> Write {
        let result = match self.transport.get(endpoint.clone()).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => Err(Failure::Status(
                response.status,
                response.text().into_owned(),
            )),
            Err(err) => Err(Failure::Transport(err)),
        };

        match result {
            Ok(()) => {
                if let Some((slot, token)) = remember {
                    self.snapshot.set(slot, token);
                }

                info!("{} Set {} -> {}", self.name, label, endpoint);
                Write::Sent(endpoint)
            }
            Err(Failure::Status(status, body)) => {
                error!("[ERROR] {} Set {} -> {} {}", self.name, label, status, body);
                Write::Rejected(status)
            }
            Err(failure) => {
                error!("[ERROR] {} Set {} -> {}", self.name, label, failure);
                Write::Failed(failure.to_string())
            }
        }
    }
}

#[async_trait]
impl Handler for Adapter {
    async fn handle_get(&mut self, key: HandlerKey) -> Value {
        self.get(key).await.value()
    }

    async fn handle_set(&mut self, key: HandlerKey, value: Value) {
        let write = self.set(key, value).await;
        debug!("{} handled set {}: {:?}", self.name, key, write);
    }
}

/// Registers `adapter` on `accessory` and hands it every get and set.
pub fn install(accessory: &mut Accessory, adapter: Adapter) {
    adapter.register(accessory);
    accessory.set_handler(Box::new(adapter));
}

#[cfg(test)]
pub(crate) mod testing {
    use hyunho::{MockTransport, Response};

    /// Expects exactly `times` requests to `endpoint` (compared through its
    /// display form) answered with `response`.
    pub fn expect(
        transport: &mut MockTransport,
        endpoint: &'static str,
        times: usize,
        response: Response,
    ) {
        transport
            .expect_get()
            .withf(move |e| e.to_string() == endpoint)
            .times(times)
            .returning(move |_| Ok(response.clone()));
    }

    pub fn expect_error(transport: &mut MockTransport, endpoint: &'static str, times: usize) {
        transport
            .expect_get()
            .withf(move |e| e.to_string() == endpoint)
            .times(times)
            .returning(|_| {
                Err(hyunho::Error::UnexpectedBody(
                    "connection refused".to_string(),
                ))
            });
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{expect, expect_error};
    use super::*;
    use hap::Uuid;
    use hyunho::{MockTransport, Response};
    use serde_json::json;

    fn profile() -> Profile {
        Profile {
            model: "Test",
            scope: vec![("room_name", "living".to_string())],
            snapshot: Snapshot::default(),
            services: vec![ServiceProfile::new(ServiceType::Switch, "Test")
                .with(Capability::new(
                    CharacteristicType::On,
                    Binding::Switch(Switch::on_off(
                        Slot::Power,
                        "test/power/get",
                        "test/power/set",
                        "state",
                    )),
                ))
                .with(Capability::new(
                    CharacteristicType::Name,
                    Binding::Fixed(Value::from("fixed")),
                ))],
        }
    }

    fn adapter(transport: MockTransport) -> Adapter {
        Adapter::new("Test", Arc::new(transport), profile())
    }

    #[tokio::test]
    async fn test_get_reads_device() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "test/power/get?room_name=living",
            1,
            Response::ok(json!("on")),
        );

        let mut adapter = adapter(transport);

        assert_eq!(adapter.get(0).await, Reading::Device(Value::Bool(true)));
        assert_eq!(adapter.snapshot().power, Token::On);
    }

    #[tokio::test]
    async fn test_get_failure_falls_back_to_snapshot() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "test/power/set?room_name=living&state=on",
            1,
            Response::ok(json!("ok")),
        );
        expect_error(&mut transport, "test/power/get?room_name=living", 1);

        let mut adapter = adapter(transport);
        adapter.set(0, Value::Bool(true)).await;

        assert_eq!(adapter.get(0).await, Reading::Fallback(Value::Bool(true)));
        assert_eq!(adapter.snapshot().power, Token::On);
    }

    #[tokio::test]
    async fn test_non_200_get_is_a_failure() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "test/power/get?room_name=living",
            1,
            Response::new(500, "boom"),
        );

        let mut adapter = adapter(transport);

        assert_eq!(adapter.get(0).await, Reading::Fallback(Value::Bool(false)));
        assert_eq!(adapter.snapshot().power, Token::Off);
    }

    #[tokio::test]
    async fn test_unparsable_body_is_a_failure() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "test/power/get?room_name=living",
            1,
            Response::new(200, "sideways"),
        );

        let mut adapter = adapter(transport);

        assert_eq!(adapter.get(0).await, Reading::Fallback(Value::Bool(false)));
        assert_eq!(adapter.snapshot().power, Token::Off);
    }

    #[tokio::test]
    async fn test_set_skips_unchanged() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "test/power/set?room_name=living&state=on",
            1,
            Response::ok(json!("ok")),
        );

        let mut adapter = adapter(transport);

        assert_eq!(adapter.set(0, Value::Bool(false)).await, Write::Unchanged);
        assert!(matches!(adapter.set(0, Value::Bool(true)).await, Write::Sent(_)));
        assert_eq!(adapter.set(0, Value::Int(1)).await, Write::Unchanged);
        assert_eq!(adapter.snapshot().power, Token::On);
    }

    #[tokio::test]
    async fn test_rejected_set_keeps_snapshot() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "test/power/set?room_name=living&state=on",
            2,
            Response::new(201, "created"),
        );

        let mut adapter = adapter(transport);

        assert_eq!(adapter.set(0, Value::Bool(true)).await, Write::Rejected(201));
        assert_eq!(adapter.snapshot().power, Token::Off);
        assert_eq!(adapter.set(0, Value::Bool(true)).await, Write::Rejected(201));
    }

    #[tokio::test]
    async fn test_failed_set_keeps_snapshot() {
        let mut transport = MockTransport::new();
        expect_error(&mut transport, "test/power/set?room_name=living&state=on", 1);

        let mut adapter = adapter(transport);

        assert!(matches!(
            adapter.set(0, Value::Bool(true)).await,
            Write::Failed(_)
        ));
        assert_eq!(adapter.snapshot().power, Token::Off);
    }

    #[tokio::test]
    async fn test_fixed_and_unbound() {
        let mut adapter = adapter(MockTransport::new());

        assert_eq!(adapter.get(1).await, Reading::Local(Value::from("fixed")));
        assert_eq!(adapter.set(1, Value::from("other")).await, Write::Ignored);
        assert_eq!(adapter.get(7).await, Reading::Fallback(Value::Bool(false)));
        assert_eq!(adapter.set(7, Value::Bool(true)).await, Write::Ignored);
        assert_eq!(
            adapter.set(0, Value::from("yes")).await,
            Write::Invalid(Value::from("yes"))
        );
    }

    #[tokio::test]
    async fn test_install() {
        let mut transport = MockTransport::new();
        expect(
            &mut transport,
            "test/power/get?room_name=living",
            1,
            Response::ok(json!("off")),
        );

        let mut accessory = Accessory::new("Test", Uuid::nil());
        install(&mut accessory, adapter(transport));

        assert!(accessory.has_handler());

        let information = accessory
            .get_service(ServiceType::AccessoryInformation, None)
            .unwrap();
        assert_eq!(
            information
                .get_characteristic(CharacteristicType::Manufacturer)
                .and_then(|c| c.value()),
            Some(&Value::from(MANUFACTURER))
        );

        let iid = accessory
            .iid_of(ServiceType::Switch, None, CharacteristicType::On)
            .unwrap();
        assert_eq!(accessory.read(iid).await, Ok(Value::Bool(false)));

        let switch = accessory.get_service(ServiceType::Switch, None).unwrap();
        let on = switch.get_characteristic(CharacteristicType::On).unwrap();
        assert_eq!(on.get_handler(), Some(0));
        assert_eq!(on.set_handler(), Some(0));
    }
}
