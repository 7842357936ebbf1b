use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::{json, Map};
use uuid::Uuid;

use crate::{CharacteristicType, Service, ServiceType, Value};

/// Index a device adapter hands out when binding a characteristic; the
/// accessory passes it back on every get/set.
pub type HandlerKey = usize;

/// Get/set callbacks of one accessory. A get must always produce a value.
#[async_trait]
pub trait Handler: Send {
    async fn handle_get(&mut self, key: HandlerKey) -> Value;
    async fn handle_set(&mut self, key: HandlerKey, value: Value);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HapStatus {
    ReadOnlyCharacteristic,
    ResourceDoesNotExist,
    InvalidValueInRequest,
}

impl HapStatus {
    pub fn code(&self) -> i32 {
        match self {
            HapStatus::ReadOnlyCharacteristic => -70404,
            HapStatus::ResourceDoesNotExist => -70409,
            HapStatus::InvalidValueInRequest => -70410,
        }
    }
}

impl fmt::Display for HapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HapStatus::ReadOnlyCharacteristic => write!(f, "read only characteristic"),
            HapStatus::ResourceDoesNotExist => write!(f, "resource does not exist"),
            HapStatus::InvalidValueInRequest => write!(f, "invalid value in request"),
        }
    }
}

impl std::error::Error for HapStatus {}

pub struct Accessory {
    uuid: Uuid,
    display_name: String,
    pub context: serde_json::Value,
    services: Vec<Service>,
    handler: Option<Box<dyn Handler>>,
}

impl Accessory {
    pub fn new(display_name: impl Into<String>, uuid: Uuid) -> Accessory {
        let display_name = display_name.into();

        let mut information = Service::new(ServiceType::AccessoryInformation, None);
        information.set_characteristic(CharacteristicType::Name, display_name.as_str());

        Accessory {
            uuid,
            display_name,
            context: serde_json::Value::Null,
            services: vec![information],
            handler: None,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn information(&mut self) -> &mut Service {
        self.service(ServiceType::AccessoryInformation, None)
    }

    pub fn get_service(
        &self,
        service_type: ServiceType,
        subtype: Option<&str>,
    ) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.service_type() == service_type && s.subtype() == subtype)
    }

    /// Returns the service of the given type and subtype, adding it first when
    /// the accessory does not have it yet.
    pub fn service(&mut self, service_type: ServiceType, subtype: Option<&str>) -> &mut Service {
        let index = match self
            .services
            .iter()
            .position(|s| s.service_type() == service_type && s.subtype() == subtype)
        {
            Some(index) => index,
            None => {
                self.services.push(Service::new(service_type, subtype));
                self.services.len() - 1
            }
        };

        &mut self.services[index]
    }

    pub fn set_handler(&mut self, handler: Box<dyn Handler>) {
        self.handler = Some(handler);
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Instance id of a characteristic. Ids are handed out depth first
    /// starting at 1 with the accessory information service.
    pub fn iid_of(
        &self,
        service_type: ServiceType,
        subtype: Option<&str>,
        characteristic_type: CharacteristicType,
    ) -> Option<u64> {
        self.instances().into_iter().find_map(|(iid, s, c)| {
            let service = &self.services[s];
            let characteristic = &service.characteristics()[c?];

            if service.service_type() == service_type
                && service.subtype() == subtype
                && characteristic.characteristic_type() == characteristic_type
            {
                Some(iid)
            } else {
                None
            }
        })
    }

    fn instances(&self) -> Vec<(u64, usize, Option<usize>)> {
        let mut iid = 0;
        let mut instances = vec![];

        for (s, service) in self.services.iter().enumerate() {
            iid += 1;
            instances.push((iid, s, None));

            for c in 0..service.characteristics().len() {
                iid += 1;
                instances.push((iid, s, Some(c)));
            }
        }

        instances
    }

    fn locate(&self, iid: u64) -> Option<(usize, usize)> {
        self.instances()
            .into_iter()
            .find(|(id, _, _)| *id == iid)
            .and_then(|(_, s, c)| Some((s, c?)))
    }

    pub async fn read(&mut self, iid: u64) -> Result<Value, HapStatus> {
        let (s, c) = self.locate(iid).ok_or(HapStatus::ResourceDoesNotExist)?;

        let characteristic = &self.services[s].characteristics()[c];
        let characteristic_type = characteristic.characteristic_type();
        let format = characteristic_type.format();
        let key = characteristic.get_handler();
        let cached = characteristic.value().cloned();

        let value = match (key, self.handler.as_mut()) {
            (Some(key), Some(handler)) => format.coerce_or_default(handler.handle_get(key).await),
            _ => cached.unwrap_or_else(|| format.default_value()),
        };

        debug!(
            "{} read {:?} = {:?}",
            self.display_name, characteristic_type, value
        );

        if let Some(characteristic) = self.services[s].characteristic_at_mut(c) {
            characteristic.set_value(value.clone());
        }

        Ok(value)
    }

    pub async fn write(&mut self, iid: u64, value: Value) -> Result<(), HapStatus> {
        let (s, c) = self.locate(iid).ok_or(HapStatus::ResourceDoesNotExist)?;

        let characteristic = &self.services[s].characteristics()[c];
        let characteristic_type = characteristic.characteristic_type();

        if !characteristic_type.is_writable() {
            warn!(
                "{} rejected write to {:?}",
                self.display_name, characteristic_type
            );
            return Err(HapStatus::ReadOnlyCharacteristic);
        }

        let Some(value) = characteristic_type.format().coerce(value.clone()) else {
            warn!(
                "{} rejected invalid value {:?} for {:?}",
                self.display_name, value, characteristic_type
            );
            return Err(HapStatus::InvalidValueInRequest);
        };
        let key = characteristic.set_handler();

        debug!(
            "{} write {:?} = {:?}",
            self.display_name, characteristic_type, value
        );

        if let (Some(key), Some(handler)) = (key, self.handler.as_mut()) {
            handler.handle_set(key, value.clone()).await;
        }

        if let Some(characteristic) = self.services[s].characteristic_at_mut(c) {
            characteristic.set_value(value);
        }

        Ok(())
    }

    /// The accessory in the shape of a HAP `/accessories` entry, using the
    /// last known value of every characteristic.
    pub fn to_json(&self, aid: u64) -> serde_json::Value {
        let mut services = vec![];
        let mut iid = 0;

        for service in self.services.iter() {
            iid += 1;
            let service_iid = iid;

            let mut characteristics = vec![];

            for characteristic in service.characteristics() {
                iid += 1;

                let characteristic_type = characteristic.characteristic_type();
                let format = characteristic_type.format();

                let mut object = Map::new();
                object.insert("iid".to_string(), json!(iid));
                object.insert("type".to_string(), json!(characteristic_type.short_uuid()));
                object.insert("format".to_string(), json!(format));
                object.insert(
                    "perms".to_string(),
                    if characteristic_type.is_writable() {
                        json!(["pr", "pw"])
                    } else {
                        json!(["pr"])
                    },
                );
                object.insert(
                    "value".to_string(),
                    json!(characteristic
                        .value()
                        .cloned()
                        .unwrap_or_else(|| format.default_value())),
                );

                if let Ok(serde_json::Value::Object(props)) =
                    serde_json::to_value(characteristic.props())
                {
                    object.extend(props);
                }

                characteristics.push(serde_json::Value::Object(object));
            }

            let mut object = Map::new();
            object.insert("iid".to_string(), json!(service_iid));
            object.insert("type".to_string(), json!(service.service_type().short_uuid()));
            if let Some(subtype) = service.subtype() {
                object.insert("subtype".to_string(), json!(subtype));
            }
            object.insert("characteristics".to_string(), json!(characteristics));

            services.push(serde_json::Value::Object(object));
        }

        json!({ "aid": aid, "services": services })
    }
}
