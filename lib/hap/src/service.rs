use serde::{Deserialize, Serialize};

use crate::{Format, HandlerKey, Props, Value};

// https://github.com/homebridge/HAP-NodeJS/blob/latest/src/lib/definitions/ServiceDefinitions.ts
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ServiceType {
    AccessoryInformation,
    Fanv2,
    HeaterCooler,
    Lightbulb,
    OccupancySensor,
    Outlet,
    Switch,
}

impl ServiceType {
    pub fn short_uuid(&self) -> &'static str {
        match self {
            ServiceType::AccessoryInformation => "3E",
            ServiceType::Fanv2 => "B7",
            ServiceType::HeaterCooler => "BC",
            ServiceType::Lightbulb => "43",
            ServiceType::OccupancySensor => "86",
            ServiceType::Outlet => "47",
            ServiceType::Switch => "49",
        }
    }
}

// https://github.com/homebridge/HAP-NodeJS/blob/latest/src/lib/definitions/CharacteristicDefinitions.ts
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CharacteristicType {
    Active,
    CoolingThresholdTemperature,
    CurrentHeaterCoolerState,
    CurrentTemperature,
    HeatingThresholdTemperature,
    Manufacturer,
    Model,
    Name,
    OccupancyDetected,
    On,
    RotationSpeed,
    SerialNumber,
    SwingMode,
    TargetHeaterCoolerState,
}

impl CharacteristicType {
    pub fn short_uuid(&self) -> &'static str {
        match self {
            CharacteristicType::Active => "B0",
            CharacteristicType::CoolingThresholdTemperature => "D",
            CharacteristicType::CurrentHeaterCoolerState => "B1",
            CharacteristicType::CurrentTemperature => "11",
            CharacteristicType::HeatingThresholdTemperature => "12",
            CharacteristicType::Manufacturer => "20",
            CharacteristicType::Model => "21",
            CharacteristicType::Name => "23",
            CharacteristicType::OccupancyDetected => "71",
            CharacteristicType::On => "25",
            CharacteristicType::RotationSpeed => "29",
            CharacteristicType::SerialNumber => "30",
            CharacteristicType::SwingMode => "B6",
            CharacteristicType::TargetHeaterCoolerState => "B2",
        }
    }

    pub fn format(&self) -> Format {
        match self {
            CharacteristicType::Manufacturer
            | CharacteristicType::Model
            | CharacteristicType::Name
            | CharacteristicType::SerialNumber => Format::String,
            CharacteristicType::On => Format::Bool,
            CharacteristicType::Active
            | CharacteristicType::CurrentHeaterCoolerState
            | CharacteristicType::OccupancyDetected
            | CharacteristicType::SwingMode
            | CharacteristicType::TargetHeaterCoolerState => Format::Uint8,
            CharacteristicType::CoolingThresholdTemperature
            | CharacteristicType::CurrentTemperature
            | CharacteristicType::HeatingThresholdTemperature
            | CharacteristicType::RotationSpeed => Format::Float,
        }
    }

    pub fn is_writable(&self) -> bool {
        matches!(
            self,
            CharacteristicType::Active
                | CharacteristicType::CoolingThresholdTemperature
                | CharacteristicType::HeatingThresholdTemperature
                | CharacteristicType::On
                | CharacteristicType::RotationSpeed
                | CharacteristicType::SwingMode
                | CharacteristicType::TargetHeaterCoolerState
        )
    }
}

#[derive(Debug)]
pub struct Characteristic {
    characteristic_type: CharacteristicType,
    props: Props,
    value: Option<Value>,
    get: Option<HandlerKey>,
    set: Option<HandlerKey>,
}

impl Characteristic {
    fn new(characteristic_type: CharacteristicType) -> Characteristic {
        Characteristic {
            characteristic_type,
            props: Props::default(),
            value: None,
            get: None,
            set: None,
        }
    }

    pub fn characteristic_type(&self) -> CharacteristicType {
        self.characteristic_type
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// The last value read or written through the bridge.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn get_handler(&self) -> Option<HandlerKey> {
        self.get
    }

    pub fn set_handler(&self) -> Option<HandlerKey> {
        self.set
    }

    pub fn set_props(&mut self, props: Props) -> &mut Self {
        self.props = props;
        self
    }

    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = Some(self.characteristic_type.format().coerce_or_default(value.into()));
        self
    }

    pub fn on_get(&mut self, key: HandlerKey) -> &mut Self {
        self.get = Some(key);
        self
    }

    pub fn on_set(&mut self, key: HandlerKey) -> &mut Self {
        self.set = Some(key);
        self
    }
}

#[derive(Debug)]
pub struct Service {
    service_type: ServiceType,
    subtype: Option<String>,
    characteristics: Vec<Characteristic>,
}

impl Service {
    pub fn new(service_type: ServiceType, subtype: Option<&str>) -> Service {
        Service {
            service_type,
            subtype: subtype.map(str::to_string),
            characteristics: vec![],
        }
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    pub fn characteristics(&self) -> &[Characteristic] {
        &self.characteristics
    }

    pub(crate) fn characteristic_at_mut(&mut self, index: usize) -> Option<&mut Characteristic> {
        self.characteristics.get_mut(index)
    }

    pub fn get_characteristic(
        &self,
        characteristic_type: CharacteristicType,
    ) -> Option<&Characteristic> {
        self.characteristics
            .iter()
            .find(|c| c.characteristic_type == characteristic_type)
    }

    /// Returns the characteristic of the given type, adding it first when the
    /// service does not have it yet.
    pub fn characteristic(
        &mut self,
        characteristic_type: CharacteristicType,
    ) -> &mut Characteristic {
        let index = match self
            .characteristics
            .iter()
            .position(|c| c.characteristic_type == characteristic_type)
        {
            Some(index) => index,
            None => {
                self.characteristics.push(Characteristic::new(characteristic_type));
                self.characteristics.len() - 1
            }
        };

        &mut self.characteristics[index]
    }

    pub fn set_characteristic(
        &mut self,
        characteristic_type: CharacteristicType,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.characteristic(characteristic_type).set_value(value);
        self
    }
}
